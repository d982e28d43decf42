#![allow(non_camel_case_types, non_snake_case)]

use serde::{Deserialize, Serialize};

use super::run_state::QuizSnapshot;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "response", content = "data")]
pub enum Response {
    quizState { snapshot: QuizSnapshot },
    errorResponse { errorText: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    startQuiz {},
    selectAnswer { option: String },
    heartbeat {},
}
