//! Runtime configuration for the quiz server and its sessions.
//!
//! Values come from an optional JSON file named by `QUIZ_CONFIG`, then the
//! command line: `quiz-server [pack_path] [addr]`.

use crate::error::QuizError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, str::FromStr, time::Duration};

pub const CONFIG_ENV_VAR: &str = "QUIZ_CONFIG";

pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 15;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_HOLD_DELAY_MS: u64 = 1500;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Timing of a single quiz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Countdown length, applied uniformly to every question.
    pub seconds_per_question: u32,
    /// Length of one countdown step.
    pub tick_interval_ms: u64,
    /// Pause after an answer is locked in or time runs out.
    pub hold_delay_ms: u64,
    /// Pause on a new question before its countdown starts.
    pub settle_delay_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            hold_delay_ms: DEFAULT_HOLD_DELAY_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.seconds_per_question == 0 {
            return Err(QuizError::InvalidConfig {
                reason: "seconds_per_question must be greater than 0".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(QuizError::InvalidConfig {
                reason: "tick_interval_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub pack_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub quiz: QuizConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9001".to_string(),
            pack_path: None,
            log_dir: PathBuf::from("log"),
            log_level: "info".to_string(),
            quiz: QuizConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the file named by `QUIZ_CONFIG`, or falls back to defaults.
    pub fn from_env() -> Result<Self, QuizError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: PathBuf) -> Result<Self, QuizError> {
        let data = fs::read_to_string(&path).map_err(|source| QuizError::InvalidConfig {
            reason: format!("cannot read '{}': {}", path.display(), source),
        })?;
        serde_json::from_str(&data).map_err(|error| QuizError::InvalidConfig {
            reason: format!("cannot parse '{}': {}", path.display(), error),
        })
    }

    /// Positional overrides: pack path, then listen address.
    pub fn apply_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(pack_path) = args.next() {
            self.pack_path = Some(PathBuf::from(pack_path));
        }
        if let Some(addr) = args.next() {
            self.addr = addr;
        }
        self
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, QuizError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| QuizError::InvalidConfig {
            reason: format!("unknown log level '{}'", self.log_level),
        })
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        self.quiz.validate()?;
        self.log_level_filter()?;
        if self.pack_path.is_none() {
            return Err(QuizError::InvalidConfig {
                reason: "no quiz pack given (pass it as the first argument or set pack_path)"
                    .to_string(),
            });
        }
        Ok(())
    }
}
