//! Terminal chat client
//!
//! Run with: HYDRO_CHAT_SERVER=127.0.0.1:8080 HYDRO_CHAT_NAME=alice cargo run --features cli --bin chat-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use hydro_chat::core::{ChatSession, ClientConfig};
    use hydro_chat::websocket_native::NativeWsClient;
    use hydro_chat::ws_state::WsState;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tracing::{error, info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hydro_chat=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    info!(server = %config.server, name = %config.name, "Config resolved");

    let mut session = ChatSession::new();
    let url = match session.connect(&config.server, &config.name) {
        Ok(url) => url,
        Err(e) => exit_with(&e.to_string()),
    };

    let mut client = match NativeWsClient::connect(&url) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create socket");
            session.fail(e.to_string());
            exit_with(session.error().unwrap_or_default());
        }
    };
    println!("Connecting...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0usize;

    loop {
        tokio::select! {
            // Pending socket events win over stdin so a close is never missed
            biased;

            event = client.next_event() => {
                let Some(event) = event else { break };
                let was_connected = session.state().is_connected();
                if let Some(reply) = session.handle(event) {
                    if let Err(e) = client.send(&reply) {
                        warn!(error = %e, "Failed to send join message");
                    }
                }
                if !was_connected && session.state().is_connected() {
                    println!("Connected as {}", session.name());
                }
                for message in session.messages().skip(printed) {
                    println!("{}: {}", message.name, message.text);
                }
                printed = session.log().len();
                if session.state() == WsState::Disconnected {
                    break;
                }
            }
            line = lines.next_line(), if session.state().is_connected() => {
                match line? {
                    Some(text) => {
                        if let Some(envelope) = session.compose(&text) {
                            // The close event that explains this is still queued
                            if let Err(e) = client.send(&envelope) {
                                warn!(error = %e, "Failed to send message");
                            }
                        }
                    }
                    None => {
                        client.close();
                        session.disconnect();
                        break;
                    }
                }
            }
        }
    }

    match session.error() {
        Some(reason) => exit_with(reason),
        None => Ok(()),
    }
}

/// Print the text the connection form would show and fail
#[cfg(not(target_arch = "wasm32"))]
fn exit_with(reason: &str) -> ! {
    eprintln!("{}", reason);
    std::process::exit(1);
}

#[cfg(target_arch = "wasm32")]
fn main() {}
