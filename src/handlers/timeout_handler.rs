use futures_timer::Delay;
use futures_util::future;
use std::pin::Pin;

use crate::engine::{ScheduledTimer, TimerId};

/// Holds the one real delay backing an engine's scheduled timer.
///
/// Replacing the delay drops the old one, which is how pending countdown,
/// hold and settle timers get cancelled.
#[derive(Default)]
pub struct TimerSlot {
    armed: Option<(TimerId, Pin<Box<Delay>>)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches the slot to the engine's schedule. A timer that is already
    /// armed keeps its original deadline.
    pub fn sync(&mut self, scheduled: Option<ScheduledTimer>) {
        match (scheduled, self.armed_id()) {
            (Some(timer), Some(armed_id)) if armed_id == timer.id => (),
            (Some(timer), _) => {
                self.armed = Some((timer.id, Box::pin(Delay::new(timer.delay))));
            }
            (None, _) => self.armed = None,
        }
    }

    pub fn armed_id(&self) -> Option<TimerId> {
        self.armed.as_ref().map(|(id, _)| *id)
    }

    /// Resolves with the armed timer's id once its delay elapses, and empties
    /// the slot. Never resolves while the slot is empty.
    pub async fn elapsed(&mut self) -> TimerId {
        let id = match self.armed.as_mut() {
            Some((id, delay)) => {
                let id = *id;
                delay.as_mut().await;
                id
            }
            None => future::pending::<TimerId>().await,
        };
        self.armed = None;
        id
    }
}
