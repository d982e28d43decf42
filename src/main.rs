use log::info;
use std::{env, sync::Arc};
use timed_quiz::{
    config::ServerConfig, error::QuizError, handlers::connection_handler::handle_connection,
    helpers::load_quiz_pack, loggers::file_logger::init_file_logger,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuizError> {
    let config = ServerConfig::from_env()?.apply_args(env::args().skip(1));
    config.validate()?;

    init_file_logger(&config.log_dir, config.log_level_filter()?)?;
    info!("App started!");

    let pack_path = config.pack_path.clone().ok_or_else(|| QuizError::InvalidConfig {
        reason: "no quiz pack given".to_string(),
    })?;
    let questions = Arc::new(load_quiz_pack(&pack_path)?);

    let listener = TcpListener::bind(&config.addr)
        .await
        .map_err(|source| QuizError::Bind {
            addr: config.addr.clone(),
            source,
        })?;
    info!("Listening on: {}", config.addr);

    while let Ok((stream, addr)) = listener.accept().await {
        tokio::spawn(handle_connection(
            questions.clone(),
            config.quiz.clone(),
            stream,
            addr,
        ));
    }

    Ok(())
}
