//! The timed quiz state machine.
//!
//! [`QuizEngine`] owns one [`RunState`] and never sleeps. Instead it keeps at
//! most one [`ScheduledTimer`] that the caller is expected to arm; when the
//! delay elapses the caller hands the timer's id back through
//! [`QuizEngine::fire`]. Scheduling a new timer replaces the previous one, and
//! an id that is no longer scheduled is ignored, so a countdown tick racing a
//! manual answer can never cause a second transition out of `Running`.
//!
//! ```text
//! NotStarted --start--> Running --select | timeout--> AwaitingAdvance
//! AwaitingAdvance --hold, more questions--> Running (settle, then countdown)
//! AwaitingAdvance --hold, last question--> Finished --start--> Running
//! ```

use log::{debug, info};
use std::{sync::Arc, time::Duration};

use crate::{
    config::QuizConfig,
    error::QuizError,
    models::{
        quiz::{QuizQuestion, QuizSet},
        run_state::{
            OptionMarker, OptionView, Phase, QuizResult, QuizSnapshot, RunState, Selection,
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// One countdown step.
    Tick,
    /// Result is on screen; advance when it elapses.
    Hold,
    /// New question is on screen; start the countdown when it elapses.
    Settle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct QuizEngine {
    questions: Arc<QuizSet>,
    config: QuizConfig,
    state: RunState,
    scheduled: Option<ScheduledTimer>,
    timer_generation: u64,
}

impl QuizEngine {
    pub fn new(questions: Arc<QuizSet>, config: QuizConfig) -> Result<Self, QuizError> {
        config.validate()?;

        let state = RunState {
            remaining_secs: config.seconds_per_question,
            ..RunState::default()
        };

        Ok(Self {
            questions,
            config,
            state,
            scheduled: None,
            timer_generation: 0,
        })
    }

    /// (Re)starts the quiz from the first question.
    ///
    /// Allowed before the first run and after `Finished`. While a run is in
    /// progress the call is rejected and nothing changes.
    pub fn start(&mut self) -> Result<(), QuizError> {
        match self.state.phase {
            Phase::NotStarted | Phase::Finished => (),
            Phase::Running | Phase::AwaitingAdvance => return Err(QuizError::AlreadyRunning),
        }

        self.state = RunState::fresh(self.config.seconds_per_question);
        self.schedule(TimerKind::Tick);
        info!(
            "Quiz started: {} question(s), {}s each",
            self.questions.len(),
            self.config.seconds_per_question
        );
        Ok(())
    }

    /// Locks in `option` for the current question. Returns whether it was
    /// correct.
    pub fn select_answer(&mut self, option: &str) -> Result<bool, QuizError> {
        match self.state.phase {
            Phase::Running => (),
            Phase::AwaitingAdvance => return Err(QuizError::AlreadyAnswered),
            Phase::NotStarted | Phase::Finished => return Err(QuizError::NotRunning),
        }

        let question = &self.questions[self.state.index];
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption {
                option: option.to_string(),
            });
        }

        let correct = question.is_correct(option);
        if correct {
            self.state.score += 1;
        }
        self.state.selection = Selection::Chosen(option.to_string());
        self.state.phase = Phase::AwaitingAdvance;
        // Replaces any pending tick or settle timer.
        self.schedule(TimerKind::Hold);

        info!(
            "Question {}: answered {:?} ({})",
            self.state.index + 1,
            option,
            if correct { "correct" } else { "incorrect" }
        );
        Ok(correct)
    }

    /// Delivers an elapsed timer. Returns false when `id` is not the timer
    /// currently scheduled, in which case nothing changes.
    pub fn fire(&mut self, id: TimerId) -> bool {
        let timer = match self.scheduled {
            Some(timer) if timer.id == id => timer,
            _ => {
                debug!("Ignoring stale timer {:?}", id);
                return false;
            }
        };
        self.scheduled = None;

        match timer.kind {
            TimerKind::Tick => self.tick(),
            TimerKind::Hold => self.advance(),
            TimerKind::Settle => self.schedule(TimerKind::Tick),
        }
        true
    }

    fn tick(&mut self) {
        if self.state.phase != Phase::Running || self.state.selection.is_set() {
            return;
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            self.schedule(TimerKind::Tick);
            return;
        }

        info!("Question {}: time is up", self.state.index + 1);
        self.state.selection = Selection::NoAnswer;
        self.state.phase = Phase::AwaitingAdvance;
        self.schedule(TimerKind::Hold);
    }

    fn advance(&mut self) {
        if self.state.index + 1 >= self.questions.len() {
            self.state.phase = Phase::Finished;
            self.scheduled = None;
            let result = self.result_unchecked();
            info!(
                "Quiz finished: {}/{} ({}%)",
                result.score, result.total, result.percentage
            );
            return;
        }

        self.state.index += 1;
        self.state.selection = Selection::Unset;
        self.state.remaining_secs = self.config.seconds_per_question;
        self.state.phase = Phase::Running;
        self.schedule(TimerKind::Settle);
    }

    fn schedule(&mut self, kind: TimerKind) {
        self.timer_generation += 1;
        let delay = match kind {
            TimerKind::Tick => self.config.tick_interval(),
            TimerKind::Hold => self.config.hold_delay(),
            TimerKind::Settle => self.config.settle_delay(),
        };
        self.scheduled = Some(ScheduledTimer {
            id: TimerId(self.timer_generation),
            kind,
            delay,
        });
    }

    pub fn scheduled(&self) -> Option<ScheduledTimer> {
        self.scheduled
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state.phase {
            Phase::Running | Phase::AwaitingAdvance => self.questions.get(self.state.index),
            Phase::NotStarted | Phase::Finished => None,
        }
    }

    pub fn countdown_running(&self) -> bool {
        matches!(
            self.scheduled,
            Some(ScheduledTimer {
                kind: TimerKind::Tick,
                ..
            })
        )
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.state.phase {
            Phase::Finished => Some(self.result_unchecked()),
            _ => None,
        }
    }

    fn result_unchecked(&self) -> QuizResult {
        QuizResult::new(self.state.score, self.questions.len() as u32)
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let question = self.current_question();
        let options: Vec<OptionView> = question
            .map(|question| {
                question
                    .options
                    .iter()
                    .map(|option| OptionView {
                        text: option.clone(),
                        marker: OptionMarker::for_option(question, option, &self.state.selection),
                    })
                    .collect()
            })
            .unwrap_or_default();

        QuizSnapshot {
            phase: self.state.phase,
            index: self.state.index,
            total: self.questions.len(),
            question: question.map(|question| question.question.clone()),
            options,
            remaining_secs: self.state.remaining_secs,
            countdown_running: self.countdown_running(),
            score: self.state.score,
            selection: self.state.selection.clone(),
            result: self.result(),
        }
    }
}
