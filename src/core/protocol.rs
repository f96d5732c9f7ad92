//! JSON envelopes exchanged with the chat server
//!
//! Outgoing frames are externally tagged: `{"Name": ..}` to join and
//! `{"Message": {"id": .., "text": ..}}` to post. Incoming frames carry a
//! `{"name": .., "text": ..}` object, either bare or wrapped in an array.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ChatError;

/// A chat message as broadcast by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub name: String,
    pub text: String,
}

/// Body of an outgoing chat message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Client-local sequence number, unique per connection
    pub id: u64,
    pub text: String,
}

/// Frames the client sends
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Join envelope, sent once right after the socket opens
    Name(String),
    Message(OutgoingMessage),
}

impl ClientMessage {
    pub fn join(name: impl Into<String>) -> Self {
        ClientMessage::Name(name.into())
    }

    pub fn chat(id: u64, text: impl Into<String>) -> Self {
        ClientMessage::Message(OutgoingMessage {
            id,
            text: text.into(),
        })
    }

    /// Serialize into the text frame payload
    pub fn to_json(&self) -> Result<String, ChatError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IncomingFrame {
    Single(ChatMessage),
    Batch(Vec<ChatMessage>),
}

/// Decode an incoming text frame into the chat messages it carries, in order.
pub fn parse_incoming(frame: &str) -> Result<Vec<ChatMessage>, ChatError> {
    trace!(len = frame.len(), "Parsing frame");

    let messages = match serde_json::from_str(frame)? {
        IncomingFrame::Single(message) => vec![message],
        IncomingFrame::Batch(messages) => messages,
    };
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_envelope_shape() {
        let json = ClientMessage::join("alice").to_json().unwrap();
        assert_eq!(json, r#"{"Name":"alice"}"#);
    }

    #[test]
    fn test_chat_envelope_shape() {
        let json = ClientMessage::chat(3, "hello there").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Message"]["id"], 3);
        assert_eq!(value["Message"]["text"], "hello there");
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_bare_object() {
        let msgs = parse_incoming(r#"{"name": "bob", "text": "hi"}"#).unwrap();
        assert_eq!(
            msgs,
            vec![ChatMessage {
                name: "bob".into(),
                text: "hi".into()
            }]
        );
    }

    #[test]
    fn test_parse_array_keeps_order() {
        let msgs = parse_incoming(
            r#"[{"name": "bob", "text": "first"}, {"name": "eve", "text": "second"}]"#,
        )
        .unwrap();
        let texts: Vec<&str> = msgs.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn test_parse_single_element_array() {
        let msgs = parse_incoming(r#"[{"name": "bob", "text": "hi"}]"#).unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].name, "bob");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let msgs = parse_incoming(r#"{"name": "bob", "text": "hi", "id": 7}"#).unwrap();
        assert_eq!(msgs[0].text, "hi");
    }

    #[test]
    fn test_reject_malformed() {
        assert!(matches!(parse_incoming("not json"), Err(ChatError::Json(_))));
        assert!(parse_incoming(r#"{"name": "bob"}"#).is_err());
        assert!(parse_incoming(r#"{"Name": "bob"}"#).is_err());
    }
}
