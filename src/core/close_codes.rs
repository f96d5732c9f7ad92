//! Display text for WebSocket close codes

/// Close codes 1000..=1015 with their reasons, for user feedback only.
pub const CLOSE_REASONS: &[(u16, &str)] = &[
    (1000, "Normal Closure"),
    (1001, "Going Away"),
    (1002, "Protocol Error"),
    (1003, "Unsupported Data"),
    (1004, "(For future)"),
    (1005, "No Status Received"),
    (1006, "Abnormal Closure"),
    (1007, "Invalid frame payload data"),
    (1008, "Policy Violation"),
    (1009, "Message too big"),
    (1010, "Missing Extension"),
    (1011, "Internal Error"),
    (1012, "Service Restart"),
    (1013, "Try Again Later"),
    (1014, "Bad Gateway"),
    (1015, "TLS Handshake"),
];

/// Placeholder shown for codes outside the table
pub const UNKNOWN_REASON: &str = "undefined";

pub fn close_reason(code: u16) -> Option<&'static str> {
    CLOSE_REASONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, reason)| *reason)
}

/// Message shown on the connection form after the socket closed
pub fn describe_close(code: u16) -> String {
    format!(
        "Connection closed: {}",
        close_reason(code).unwrap_or(UNKNOWN_REASON)
    )
}
