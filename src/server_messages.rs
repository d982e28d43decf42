use futures_channel::mpsc::UnboundedSender;
use log::{debug, warn};
use tungstenite::protocol::Message;

use crate::models::communication::Response;

type Tx = UnboundedSender<Response>;

/// Queues a response for one session. Returns false once the receiving side
/// is gone.
pub fn send_message(response: Response, tx: &Tx, session_id: &str) -> bool {
    debug!("Sending msg to: {}", session_id);

    match tx.unbounded_send(response) {
        Ok(()) => true,
        Err(_) => {
            debug!("Receiver for {} is closed", session_id);
            false
        }
    }
}

pub fn encode_response(response: &Response) -> Option<Message> {
    match serde_json::to_string(response) {
        Ok(text) => Some(Message::Text(text)),
        Err(error) => {
            warn!("Failed to serialize response: {}", error);
            None
        }
    }
}
