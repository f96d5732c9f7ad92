//! WASM WebSocket client for talking to a chat server

use crate::core::{ChatError, ClientMessage};
use crate::ws_state::WsEvent;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Shared event buffer: WS callbacks push, app drains in update()
pub type EventBuffer = Rc<RefCell<VecDeque<WsEvent>>>;

/// WASM WebSocket client
///
/// Callbacks stay attached for as long as the client lives. Dropping it
/// detaches them and closes the socket, so no close event is reported.
pub struct WsClient {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(JsValue)>,
    _on_msg: Closure<dyn FnMut(MessageEvent)>,
    _on_err: Closure<dyn FnMut(ErrorEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl WsClient {
    /// Connect to a WebSocket endpoint
    ///
    /// Events are buffered into `events` for the app to drain.
    pub fn connect(url: &str, events: EventBuffer) -> Result<Self, JsValue> {
        info!(url, "Connecting to WebSocket");

        let ws = WebSocket::new(url)?;

        // On open the app answers with the join envelope
        let buffer = events.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            info!("WebSocket connected");
            buffer.borrow_mut().push_back(WsEvent::Opened);
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let buffer = events.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                let msg: String = txt.into();
                debug!(len = msg.len(), "Frame received");
                buffer.borrow_mut().push_back(WsEvent::Text(msg));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));

        // On error the browser follows up with a close event
        let on_err = Closure::wrap(Box::new(move |e: ErrorEvent| {
            error!(error = %e.message(), "WebSocket error");
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));

        let buffer = events;
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let code = e.code();
            let reason = e.reason();
            warn!(code, reason = %reason, "WebSocket closed");
            buffer.borrow_mut().push_back(WsEvent::Closed { code });
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            _on_open: on_open,
            _on_msg: on_msg,
            _on_err: on_err,
            _on_close: on_close,
        })
    }

    /// Send an envelope as a text frame
    pub fn send(&self, message: &ClientMessage) -> Result<(), ChatError> {
        let text = message.to_json()?;
        self.ws
            .send_with_str(&text)
            .map_err(|e| ChatError::Send(js_error_string(&e)))
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Err(e) = self.ws.close() {
            warn!(error = %js_error_string(&e), "Failed to close WebSocket");
        }
    }
}

/// Render a thrown JS value the way the browser would print it
pub fn js_error_string(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
