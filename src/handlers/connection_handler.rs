use crate::{
    config::QuizConfig,
    engine::QuizEngine,
    handlers::quiz_handler::run_quiz_session,
    helpers::parse_command,
    models::{communication::Response, quiz::QuizSet},
    server_messages::{encode_response, send_message},
};
use futures_channel::mpsc::unbounded;
use futures_util::{future, pin_mut, StreamExt, TryStreamExt};
use log::{info, warn};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpStream;
use uuid::Uuid;

/// Serves one browser connection with its own quiz session.
pub async fn handle_connection(
    questions: Arc<QuizSet>,
    config: QuizConfig,
    raw_stream: TcpStream,
    addr: SocketAddr,
) {
    info!("Incoming TCP connection from: {}", &addr);

    let ws_stream = match tokio_tungstenite::accept_async(raw_stream).await {
        Ok(stream) => stream,
        Err(error) => {
            warn!("Handshake with {} error: {}", addr, error);
            return;
        }
    };
    info!("WebSocket connection established: {}", &addr);

    let session_id = Uuid::new_v4().to_string();
    let engine = match QuizEngine::new(questions, config) {
        Ok(engine) => engine,
        Err(error) => {
            warn!("Cannot open quiz session for {}: {}", &addr, error);
            return;
        }
    };

    let (command_tx, command_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();
    let (outgoing, incoming) = ws_stream.split();

    let session = run_quiz_session(session_id.clone(), engine, command_rx, response_tx.clone());

    let receive_commands = incoming.try_for_each(|msg| {
        if msg.is_text() {
            match parse_command(&msg) {
                Ok(command) => {
                    if command_tx.unbounded_send(command).is_err() {
                        warn!("Session {} is no longer accepting commands", &session_id);
                    }
                }
                Err(error) => {
                    warn!("Error parsing command!: {}", error);
                    let response = Response::errorResponse {
                        errorText: error.to_string(),
                    };
                    send_message(response, &response_tx, &session_id);
                }
            }
        } else if msg.is_binary() {
            warn!("Binary frame from {} ignored", &session_id);
            let response = Response::errorResponse {
                errorText: "Commands must be sent as text frames".to_string(),
            };
            send_message(response, &response_tx, &session_id);
        }

        future::ok(())
    });

    let send_responses = response_rx
        .filter_map(|response| future::ready(encode_response(&response)))
        .map(Ok)
        .forward(outgoing);

    pin_mut!(session, receive_commands, send_responses);
    future::select(session, future::select(receive_commands, send_responses)).await;

    info!("{} disconnected (session {})", &addr, &session_id);
}
