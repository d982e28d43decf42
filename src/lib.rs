pub mod config;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod server_messages;

pub mod handlers {
    pub mod connection_handler;
    pub mod quiz_handler;
    pub mod timeout_handler;
}

pub mod loggers {
    pub mod file_logger;
}

pub mod models {
    pub mod communication;
    pub mod quiz;
    pub mod run_state;
}
