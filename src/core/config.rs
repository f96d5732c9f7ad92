//! Connection defaults
//!
//! The terminal client reads these from the environment; the browser client
//! only takes a server address from the host page.

/// Default server address (override with HYDRO_CHAT_SERVER env var)
pub const DEFAULT_SERVER: &str = "127.0.0.1:8080";

/// Default display name (override with HYDRO_CHAT_NAME env var)
pub const DEFAULT_NAME: &str = "anonymous";

pub const SERVER_ENV: &str = "HYDRO_CHAT_SERVER";
pub const NAME_ENV: &str = "HYDRO_CHAT_NAME";

/// What the connection form is filled with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port`, without scheme
    pub server: String,
    pub name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            name: DEFAULT_NAME.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            server: get(SERVER_ENV, DEFAULT_SERVER),
            name: get(NAME_ENV, DEFAULT_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            SERVER_ENV => Some("chat.example:9000".to_string()),
            NAME_ENV => Some("alice".to_string()),
            _ => None,
        });
        assert_eq!(config.server, "chat.example:9000");
        assert_eq!(config.name, "alice");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.server, DEFAULT_SERVER);
        assert_eq!(config.name, DEFAULT_NAME);
    }
}
