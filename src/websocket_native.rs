//! Native WebSocket client for talking to a chat server
//!
//! Uses tokio-tungstenite in a background thread, with channel-based message passing.

use crate::core::{ChatError, ClientMessage};
use crate::ws_state::{WsEvent, CLOSE_ABNORMAL, CLOSE_NO_STATUS};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tracing::{debug, error, info, warn};

enum Outgoing {
    Text(String),
    Close,
}

/// Native WebSocket client that runs in a background thread
///
/// Dropping the client closes the socket without reporting a close event.
pub struct NativeWsClient {
    /// Socket events, in the order they happened
    events: UnboundedReceiver<WsEvent>,
    outgoing: UnboundedSender<Outgoing>,
}

impl NativeWsClient {
    /// Connect to a WebSocket endpoint
    ///
    /// Fails right away when `url` is not a usable request. Otherwise spawns
    /// a background thread with a tokio runtime to own the connection; the
    /// outcome of the handshake arrives as the first event.
    pub fn connect(url: &str) -> Result<Self, ChatError> {
        let request = url
            .into_client_request()
            .map_err(|e| ChatError::Connect(e.to_string()))?;

        let (event_tx, events) = mpsc::unbounded_channel();
        let (outgoing, out_rx) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("chat-ws".into())
            .spawn(move || {
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!(error = %e, "Failed to create tokio runtime");
                        let _ = event_tx.send(WsEvent::Error(e.to_string()));
                        return;
                    }
                };
                rt.block_on(Self::run_websocket(request, event_tx, out_rx));
            })
            .map_err(|e| ChatError::Connect(e.to_string()))?;

        Ok(Self { events, outgoing })
    }

    /// Queue an envelope for sending
    pub fn send(&self, message: &ClientMessage) -> Result<(), ChatError> {
        let text = message.to_json()?;
        self.outgoing
            .send(Outgoing::Text(text))
            .map_err(|_| ChatError::Send("connection is gone".into()))
    }

    /// Close the socket. No close event is reported for it.
    pub fn close(&self) {
        let _ = self.outgoing.send(Outgoing::Close);
    }

    /// Wait for the next socket event. `None` once the connection is over
    /// and every event has been taken.
    pub async fn next_event(&mut self) -> Option<WsEvent> {
        self.events.recv().await
    }

    async fn run_websocket(
        request: Request,
        tx: UnboundedSender<WsEvent>,
        mut outgoing: UnboundedReceiver<Outgoing>,
    ) {
        use futures_util::{SinkExt, StreamExt};
        use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message};

        info!(uri = %request.uri(), "Connecting to WebSocket");

        let ws_stream = match connect_async(request).await {
            Ok((stream, _)) => {
                info!("WebSocket connected");
                stream
            }
            Err(tungstenite::Error::Url(e)) => {
                error!(error = %e, "Invalid WebSocket URL");
                let _ = tx.send(WsEvent::Error(e.to_string()));
                return;
            }
            Err(e) => {
                error!(error = %e, "Failed to connect");
                let _ = tx.send(WsEvent::Closed { code: CLOSE_ABNORMAL });
                return;
            }
        };

        if tx.send(WsEvent::Opened).is_err() {
            return;
        }

        let (mut write, mut read) = ws_stream.split();

        let code = loop {
            tokio::select! {
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!(len = text.len(), "Frame received");
                        if tx.send(WsEvent::Text(text.to_string())).is_err() {
                            // Receiver dropped, exit
                            let _ = write.send(Message::Close(None)).await;
                            return;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let code = frame
                            .map(|f| u16::from(f.code))
                            .unwrap_or(CLOSE_NO_STATUS);
                        warn!(code, "WebSocket closed by server");
                        let _ = write.close().await;
                        break code;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!(error = %e, "WebSocket error");
                        break CLOSE_ABNORMAL;
                    }
                    None => {
                        warn!("WebSocket stream ended");
                        break CLOSE_ABNORMAL;
                    }
                },
                out = outgoing.recv() => match out {
                    Some(Outgoing::Text(text)) => {
                        debug!(len = text.len(), "Sending frame");
                        if let Err(e) = write.send(Message::Text(text.into())).await {
                            error!(error = %e, "Failed to send frame");
                            break CLOSE_ABNORMAL;
                        }
                    }
                    Some(Outgoing::Close) | None => {
                        info!("Closing WebSocket");
                        let _ = write.send(Message::Close(None)).await;
                        return;
                    }
                },
            }
        };

        let _ = tx.send(WsEvent::Closed { code });
    }
}
