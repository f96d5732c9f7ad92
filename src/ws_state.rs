//! Shared WebSocket connection state
//!
//! Used by both WASM and native WebSocket clients, and by the chat session
//! that consumes their events.

/// Close code reported when the peer closed without a status code.
pub const CLOSE_NO_STATUS: u16 = 1005;

/// Close code reported when the connection dropped without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// WebSocket connection state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WsState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl WsState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WsState::Connected)
    }
}

/// Something the socket reported, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WsEvent {
    /// Handshake completed
    Opened,
    /// A text frame arrived
    Text(String),
    /// The connection closed with the given close code
    Closed { code: u16 },
    /// The connection could not be attempted at all
    Error(String),
}
