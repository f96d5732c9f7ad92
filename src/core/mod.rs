//! Platform-agnostic core module - shared between the browser app and CLI

pub mod close_codes;
pub mod config;
pub mod error;
pub mod log;
pub mod protocol;
pub mod session;

pub use close_codes::{close_reason, describe_close};
pub use config::ClientConfig;
pub use error::ChatError;
pub use log::MessageLog;
pub use protocol::{parse_incoming, ChatMessage, ClientMessage, OutgoingMessage};
pub use session::ChatSession;
