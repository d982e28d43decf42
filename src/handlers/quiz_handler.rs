use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures_util::{future, pin_mut, StreamExt};
use log::{debug, info, warn};

use crate::{
    engine::{QuizEngine, TimerId},
    error::QuizError,
    handlers::timeout_handler::TimerSlot,
    models::communication::{Command, Response},
    server_messages::send_message,
};

type Rx = UnboundedReceiver<Command>;
type Tx = UnboundedSender<Response>;

enum SessionEvent {
    Command(Option<Command>),
    Timer(TimerId),
}

/// Drives one quiz run: applies client commands, arms the engine's timer and
/// publishes a snapshot after every state change.
///
/// Returns when the command channel closes or nobody listens for responses.
pub async fn run_quiz_session(
    session_id: String,
    mut engine: QuizEngine,
    mut commands: Rx,
    responses: Tx,
) {
    info!("Quiz session {} opened", &session_id);

    let mut timers = TimerSlot::new();
    if !publish_state(&engine, &responses, &session_id) {
        return;
    }

    loop {
        timers.sync(engine.scheduled());

        let event = {
            let next_command = commands.next();
            let timer = timers.elapsed();
            pin_mut!(next_command, timer);
            match future::select(next_command, timer).await {
                future::Either::Left((command, _)) => SessionEvent::Command(command),
                future::Either::Right((id, _)) => SessionEvent::Timer(id),
            }
        };

        let delivered = match event {
            SessionEvent::Command(None) => break,
            SessionEvent::Command(Some(command)) => {
                match apply_command(&mut engine, command, &session_id) {
                    Ok(true) => publish_state(&engine, &responses, &session_id),
                    Ok(false) => true,
                    Err(error) => {
                        if error.is_rejection() {
                            info!("Session {} rejected command: {}", &session_id, error);
                        } else {
                            warn!("Session {} command failed: {}", &session_id, error);
                        }
                        let response = Response::errorResponse {
                            errorText: error.to_string(),
                        };
                        send_message(response, &responses, &session_id)
                    }
                }
            }
            SessionEvent::Timer(id) => {
                if engine.fire(id) {
                    publish_state(&engine, &responses, &session_id)
                } else {
                    true
                }
            }
        };

        if !delivered {
            break;
        }
    }

    info!("Quiz session {} closed", &session_id);
}

/// Ok(true) when the engine's state changed.
fn apply_command(
    engine: &mut QuizEngine,
    command: Command,
    session_id: &str,
) -> Result<bool, QuizError> {
    match command {
        Command::startQuiz {} => {
            info!("Start quiz request from: {}", session_id);
            engine.start()?;
            Ok(true)
        }
        Command::selectAnswer { option } => {
            engine.select_answer(&option)?;
            Ok(true)
        }
        Command::heartbeat {} => {
            debug!("Heartbeat from: {}", session_id);
            Ok(false)
        }
    }
}

fn publish_state(engine: &QuizEngine, responses: &Tx, session_id: &str) -> bool {
    let response = Response::quizState {
        snapshot: engine.snapshot(),
    };
    send_message(response, responses, session_id)
}
