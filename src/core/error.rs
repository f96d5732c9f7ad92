//! Error type for the chat client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// The connection form was submitted without a server address
    #[error("Server address must not be empty")]
    EmptyAddress,

    /// The socket could not be constructed; carries the raw error text
    #[error("{0}")]
    Connect(String),

    /// A frame could not be encoded or decoded
    #[error("Malformed chat frame: {0}")]
    Json(#[from] serde_json::Error),

    /// The socket is gone and can no longer take outgoing frames
    #[error("Failed to send: {0}")]
    Send(String),
}
