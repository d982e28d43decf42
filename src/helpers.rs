use log::{info, warn};
use serde::Deserialize;
use std::{fs, path::Path};
use tungstenite::Message;

use crate::{
    error::QuizError,
    models::{
        communication::Command,
        quiz::{QuizQuestion, QuizSet},
    },
};

pub fn parse_command(msg: &Message) -> Result<Command, serde_json::Error> {
    serde_json::from_str(&msg.to_string())
}

/// Generated study documents carry the questions under `quiz`, next to
/// other keys like `summary`.
#[derive(Deserialize)]
struct GeneratedDocument {
    quiz: Vec<QuizQuestion>,
}

/// Removes markdown code fences that language models like to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_quiz_document(text: &str) -> Result<QuizSet, QuizError> {
    let cleaned = strip_code_fences(text);
    // Either a bare question list or a generated document.
    let document: serde_json::Value = serde_json::from_str(&cleaned)?;
    let questions = if document.is_array() {
        serde_json::from_str::<Vec<QuizQuestion>>(&cleaned)?
    } else {
        serde_json::from_str::<GeneratedDocument>(&cleaned)?.quiz
    };
    QuizSet::new(questions)
}

pub fn load_quiz_pack(path: &Path) -> Result<QuizSet, QuizError> {
    info!("Loading quiz pack: {}", path.display());
    let data = fs::read_to_string(path).map_err(|source| QuizError::PackRead {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_quiz_document(&data)?;
    for number in set.unwinnable_questions() {
        warn!(
            "Question {} in {} has no option equal to its correct answer",
            number,
            path.display()
        );
    }
    info!("Loaded {} question(s) from {}", set.len(), path.display());
    Ok(set)
}
