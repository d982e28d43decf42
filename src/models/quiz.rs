use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::QuizError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn new<Q, O, A>(question: Q, options: O, correct_answer: A) -> Self
    where
        Q: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
        A: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// Exact, case-sensitive comparison. No trimming or normalisation.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    /// False when the correct answer is not literally one of the options.
    pub fn is_winnable(&self) -> bool {
        self.has_option(&self.correct_answer)
    }
}

/// Ordered, non-empty list of questions, read-only once built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "Vec<QuizQuestion>", into = "Vec<QuizQuestion>")]
pub struct QuizSet {
    questions: Vec<QuizQuestion>,
}

impl QuizSet {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(QuizError::TooFewOptions {
                    question: index + 1,
                    count: question.options.len(),
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    // Construction guarantees at least one question.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    /// 1-based numbers of questions nobody can answer correctly.
    pub fn unwinnable_questions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, question)| !question.is_winnable())
            .map(|(index, _)| index + 1)
            .collect()
    }
}

impl Index<usize> for QuizSet {
    type Output = QuizQuestion;

    fn index(&self, index: usize) -> &QuizQuestion {
        &self.questions[index]
    }
}

impl TryFrom<Vec<QuizQuestion>> for QuizSet {
    type Error = QuizError;

    fn try_from(questions: Vec<QuizQuestion>) -> Result<Self, Self::Error> {
        QuizSet::new(questions)
    }
}

impl From<QuizSet> for Vec<QuizQuestion> {
    fn from(set: QuizSet) -> Self {
        set.questions
    }
}
