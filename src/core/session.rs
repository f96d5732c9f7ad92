//! Chat session state machine
//!
//! Front ends feed socket events in and send whatever envelopes come back.
//! The session never touches the socket itself.

use tracing::{debug, info, warn};

use super::{describe_close, parse_incoming, ChatError, ChatMessage, ClientMessage, MessageLog};
use crate::ws_state::{WsEvent, WsState};

/// One user's view of a chat connection
#[derive(Debug, Default)]
pub struct ChatSession {
    state: WsState,
    name: String,
    log: MessageLog,
    next_id: u64,
    error: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new connection attempt from the form contents.
    ///
    /// Returns the socket URL to open. The log and message ids start over.
    pub fn connect(&mut self, address: &str, name: &str) -> Result<String, ChatError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ChatError::EmptyAddress);
        }

        let url = format!("ws://{}", address);
        info!(url = %url, name, "Starting connection");

        self.state = WsState::Connecting;
        self.name = name.to_string();
        self.log.clear();
        self.next_id = 0;
        self.error = None;
        Ok(url)
    }

    /// Apply a socket event. Returns the envelope to send back, if any.
    pub fn handle(&mut self, event: WsEvent) -> Option<ClientMessage> {
        if self.state == WsState::Disconnected {
            debug!(?event, "Ignoring event while disconnected");
            return None;
        }

        match event {
            WsEvent::Opened => {
                if self.state != WsState::Connecting {
                    return None;
                }
                info!(name = %self.name, "Connected, joining");
                self.state = WsState::Connected;
                Some(ClientMessage::join(self.name.clone()))
            }
            WsEvent::Text(frame) => {
                match parse_incoming(&frame) {
                    Ok(messages) => {
                        debug!(count = messages.len(), "Received messages");
                        self.log.extend(messages);
                    }
                    Err(e) => warn!(error = %e, "Dropping frame"),
                }
                None
            }
            WsEvent::Closed { code } => {
                let reason = describe_close(code);
                warn!(code, reason = %reason, "Connection closed");
                self.reset(Some(reason));
                None
            }
            WsEvent::Error(e) => {
                warn!(error = %e, "Connection failed");
                self.reset(Some(e));
                None
            }
        }
    }

    /// Record a failure to construct the socket.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.reset(Some(error.into()));
    }

    /// Build the envelope for a typed message, if connected.
    pub fn compose(&mut self, text: &str) -> Option<ClientMessage> {
        if !self.state.is_connected() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        Some(ClientMessage::chat(id, text))
    }

    /// Leave the chat and return to the form. A previous failure stays
    /// visible until the next connection attempt.
    pub fn disconnect(&mut self) {
        if self.state != WsState::Disconnected {
            info!("Leaving chat");
        }
        self.state = WsState::Disconnected;
    }

    fn reset(&mut self, error: Option<String>) {
        self.state = WsState::Disconnected;
        self.error = error;
    }

    pub fn state(&self) -> WsState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last failure shown on the connection form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.log.iter()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(name: &str) -> ChatSession {
        let mut session = ChatSession::new();
        session.connect("127.0.0.1:8080", name).unwrap();
        session.handle(WsEvent::Opened);
        session
    }

    fn text(name: &str, text: &str) -> WsEvent {
        WsEvent::Text(format!(r#"{{"name":"{}","text":"{}"}}"#, name, text))
    }

    #[test]
    fn test_connect_enters_connecting() {
        let mut session = ChatSession::new();
        let url = session.connect("  10.0.0.1:9000 ", "alice").unwrap();
        assert_eq!(url, "ws://10.0.0.1:9000");
        assert_eq!(session.state(), WsState::Connecting);
    }

    #[test]
    fn test_empty_address_rejected() {
        let mut session = ChatSession::new();
        assert!(matches!(session.connect("   ", "alice"), Err(ChatError::EmptyAddress)));
        assert_eq!(session.state(), WsState::Disconnected);
    }

    #[test]
    fn test_join_sent_once_on_open() {
        let mut session = ChatSession::new();
        session.connect("host:1", "alice").unwrap();
        assert_eq!(session.handle(WsEvent::Opened), Some(ClientMessage::join("alice")));
        assert_eq!(session.state(), WsState::Connected);
        assert_eq!(session.handle(WsEvent::Opened), None);
    }

    #[test]
    fn test_messages_appended_in_order() {
        let mut session = connected("alice");
        assert_eq!(session.handle(text("bob", "one")), None);
        session.handle(text("eve", "two"));
        session.handle(WsEvent::Text(
            r#"[{"name":"bob","text":"three"}]"#.to_string(),
        ));
        let texts: Vec<&str> = session.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn test_bad_frame_dropped() {
        let mut session = connected("alice");
        session.handle(WsEvent::Text("{oops".to_string()));
        session.handle(text("bob", "ok"));
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.state(), WsState::Connected);
    }

    #[test]
    fn test_compose_ids_strictly_increase() {
        let mut session = connected("alice");
        let ids: Vec<u64> = (0..4)
            .map(|i| match session.compose(&format!("m{}", i)) {
                Some(ClientMessage::Message(m)) => m.id,
                other => panic!("unexpected envelope {:?}", other),
            })
            .collect();
        assert_eq!(ids, [0, 1, 2, 3]);
    }

    #[test]
    fn test_compose_requires_connection() {
        let mut session = ChatSession::new();
        assert_eq!(session.compose("hi"), None);
        session.connect("host:1", "alice").unwrap();
        assert_eq!(session.compose("hi"), None);
    }

    #[test]
    fn test_close_maps_reason() {
        let mut session = connected("alice");
        session.handle(WsEvent::Closed { code: 1001 });
        assert_eq!(session.state(), WsState::Disconnected);
        assert_eq!(session.error(), Some("Connection closed: Going Away"));
    }

    #[test]
    fn test_close_unmapped_code() {
        let mut session = connected("alice");
        session.handle(WsEvent::Closed { code: 4321 });
        assert_eq!(session.error(), Some("Connection closed: undefined"));
    }

    #[test]
    fn test_close_while_connecting() {
        let mut session = ChatSession::new();
        session.connect("host:1", "alice").unwrap();
        session.handle(WsEvent::Closed { code: 1006 });
        assert_eq!(session.state(), WsState::Disconnected);
        assert_eq!(session.error(), Some("Connection closed: Abnormal Closure"));
    }

    #[test]
    fn test_fail_keeps_raw_error() {
        let mut session = ChatSession::new();
        session.connect("bad host", "alice").unwrap();
        session.fail("SyntaxError: invalid url");
        assert_eq!(session.state(), WsState::Disconnected);
        assert_eq!(session.error(), Some("SyntaxError: invalid url"));
    }

    #[test]
    fn test_error_event_keeps_raw_error() {
        let mut session = ChatSession::new();
        session.connect("host:1", "alice").unwrap();
        session.handle(WsEvent::Error("URL error: bad".to_string()));
        assert_eq!(session.error(), Some("URL error: bad"));
    }

    #[test]
    fn test_reconnect_clears_log_and_ids() {
        let mut session = connected("alice");
        session.handle(text("bob", "old"));
        session.compose("x");
        session.handle(WsEvent::Closed { code: 1000 });

        session.connect("host:2", "alice").unwrap();
        assert!(session.log().is_empty());
        assert_eq!(session.error(), None);
        session.handle(WsEvent::Opened);
        match session.compose("y") {
            Some(ClientMessage::Message(m)) => assert_eq!(m.id, 0),
            other => panic!("unexpected envelope {:?}", other),
        }
    }

    #[test]
    fn test_disconnect_has_no_error() {
        let mut session = connected("alice");
        session.disconnect();
        assert_eq!(session.state(), WsState::Disconnected);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_disconnect_keeps_previous_error() {
        let mut session = connected("alice");
        session.handle(WsEvent::Closed { code: 1011 });
        session.disconnect();
        assert_eq!(session.state(), WsState::Disconnected);
        assert_eq!(session.error(), Some("Connection closed: Internal Error"));

        session.connect("host:1", "alice").unwrap();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_events_ignored_after_disconnect() {
        let mut session = connected("alice");
        session.disconnect();
        assert_eq!(session.handle(WsEvent::Opened), None);
        session.handle(text("bob", "late"));
        session.handle(WsEvent::Closed { code: 1000 });
        assert!(session.log().is_empty());
        assert_eq!(session.error(), None);
    }
}
