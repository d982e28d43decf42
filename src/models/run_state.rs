use serde::{Deserialize, Serialize};

use super::quiz::QuizQuestion;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    /// Answer locked in (or time ran out), hold delay in progress.
    AwaitingAdvance,
    Finished,
}

/// The answer recorded for the active question.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    #[default]
    Unset,
    Chosen(String),
    /// Time expired before anything was picked.
    NoAnswer,
}

impl Selection {
    pub fn is_set(&self) -> bool {
        !matches!(self, Selection::Unset)
    }

    pub fn chosen(&self) -> Option<&str> {
        match self {
            Selection::Chosen(option) => Some(option),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RunState {
    pub index: usize,
    pub remaining_secs: u32,
    pub score: u32,
    pub selection: Selection,
    pub phase: Phase,
}

impl RunState {
    pub fn fresh(seconds_per_question: u32) -> Self {
        Self {
            index: 0,
            remaining_secs: seconds_per_question,
            score: 0,
            selection: Selection::Unset,
            phase: Phase::Running,
        }
    }
}

/// How an option should be shown. Colours and icons are left to the client.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OptionMarker {
    Idle,
    Correct,
    Incorrect,
    Dimmed,
}

impl OptionMarker {
    pub fn for_option(question: &QuizQuestion, option: &str, selection: &Selection) -> Self {
        if !selection.is_set() {
            return OptionMarker::Idle;
        }
        if question.is_correct(option) {
            return OptionMarker::Correct;
        }
        if selection.chosen() == Some(option) {
            return OptionMarker::Incorrect;
        }
        OptionMarker::Dimmed
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub text: String,
    pub marker: OptionMarker,
}

/// Final tally. Pass/fail thresholds and progress bars are derived by the
/// client from these numbers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

impl QuizResult {
    pub fn new(score: u32, total: u32) -> Self {
        Self {
            score,
            total,
            percentage: percentage(score, total),
        }
    }
}

/// `round(score / total * 100)`, halves rounded up.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (u64::from(score), u64::from(total));
    ((score * 200 + total) / (2 * total)) as u32
}

/// Everything a rendering layer needs after a state change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
    pub phase: Phase,
    pub index: usize,
    pub total: usize,
    pub question: Option<String>,
    pub options: Vec<OptionView>,
    pub remaining_secs: u32,
    pub countdown_running: bool,
    pub score: u32,
    pub selection: Selection,
    pub result: Option<QuizResult>,
}
