use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::error::QuizError;

const LOG_PATTERN: &str = "{d(%H:%M:%S)(utc)} {l} - {m}\n";

/// Logs to `<log_dir>/<YYYY-MM-DD>.log` and to stdout.
pub fn init_file_logger(log_dir: &Path, level: LevelFilter) -> Result<(), QuizError> {
    let current_date = chrono::offset::Utc::now().date_naive().to_string();
    let path = log_dir.join(format!("{}.log", current_date));

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&path)
        .map_err(|error| QuizError::Logging(format!("{}: {}", path.display(), error)))?;

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("logfile")
                .appender("stdout")
                .build(level),
        )
        .map_err(|error| QuizError::Logging(error.to_string()))?;

    log4rs::init_config(config).map_err(|error| QuizError::Logging(error.to_string()))?;
    info!("File logger initialized: {}", path.display());

    Ok(())
}
