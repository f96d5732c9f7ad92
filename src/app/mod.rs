//! Browser chat app
//!
//! Connection form, connecting screen and chat view over one WebSocket.

mod chat;
mod form;

use eframe::egui;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::ChatSession;
use crate::theme::{chat_visuals, colors};
use crate::websocket_wasm::{js_error_string, EventBuffer, WsClient};
use crate::ws_state::WsState;

/// Plain-HTTP deployment offered to visitors arriving over https
pub const HTTP_URL: &str = "http://chat.hydro.run";

/// Host-page global that may carry a server address to prefill the form
const SERVER_GLOBAL: &str = "__hydro_chat_server";

const REPAINT_INTERVAL: Duration = Duration::from_millis(50);

pub struct ChatApp {
    pub(crate) session: ChatSession,
    pub(crate) typed_server: String,
    pub(crate) typed_name: String,
    pub(crate) typed_message: String,
    /// Socket events waiting for the next frame
    events: EventBuffer,
    /// Socket of the current connection (kept alive)
    client: Option<WsClient>,
    /// Page was served over https, where ws:// sockets are blocked
    pub(crate) is_https: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(chat_visuals());

        let window = web_sys::window();
        let is_https = window
            .as_ref()
            .and_then(|w| w.location().protocol().ok())
            .is_some_and(|p| p == "https:");

        let typed_server = window
            .as_ref()
            .and_then(|w| js_sys::Reflect::get(w, &SERVER_GLOBAL.into()).ok())
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        info!(server = %typed_server, is_https, "Chat app started");

        Self {
            session: ChatSession::new(),
            typed_server,
            typed_name: String::new(),
            typed_message: String::new(),
            events: Rc::new(RefCell::new(VecDeque::new())),
            client: None,
            is_https,
        }
    }

    /// Form submitted: open a fresh socket for the typed address
    pub(crate) fn start_connection(&mut self) {
        self.client = None;
        self.events.borrow_mut().clear();

        let url = match self.session.connect(&self.typed_server, &self.typed_name) {
            Ok(url) => url,
            Err(e) => {
                self.session.fail(e.to_string());
                return;
            }
        };

        match WsClient::connect(&url, self.events.clone()) {
            Ok(client) => self.client = Some(client),
            Err(e) => {
                let msg = js_error_string(&e);
                warn!(error = %msg, "Failed to create WebSocket");
                self.session.fail(msg);
            }
        }
    }

    /// Back to the form without reporting a close reason
    pub(crate) fn leave(&mut self) {
        self.session.disconnect();
        self.client = None;
    }

    /// Typed message submitted: the input clears even when nothing is sent
    pub(crate) fn submit_message(&mut self) {
        let text = std::mem::take(&mut self.typed_message);
        let Some(envelope) = self.session.compose(&text) else {
            return;
        };
        if let Some(client) = &self.client {
            if let Err(e) = client.send(&envelope) {
                warn!(error = %e, "Failed to send message");
            }
        }
    }

    /// Feed buffered socket events to the session
    fn process_events(&mut self) {
        loop {
            let Some(event) = self.events.borrow_mut().pop_front() else {
                break;
            };
            if let Some(reply) = self.session.handle(event) {
                if let Some(client) = &self.client {
                    if let Err(e) = client.send(&reply) {
                        warn!(error = %e, "Failed to send join message");
                    }
                }
            }
            if self.session.state() == WsState::Disconnected {
                self.client = None;
                self.events.borrow_mut().clear();
                break;
            }
        }
    }

    fn render_title(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let title = ui
                .add(
                    egui::Label::new(
                        egui::RichText::new("HydroChat")
                            .color(colors::ACCENT)
                            .strong()
                            .size(48.0),
                    )
                    .sense(egui::Sense::click()),
                )
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if title.clicked() {
                self.leave();
            }
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Socket callbacks do not wake egui, so poll
        ctx.request_repaint_after(REPAINT_INTERVAL);

        self.process_events();

        egui::TopBottomPanel::top("title")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(5.0))
            .show(ctx, |ui| {
                self.render_title(ui);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(colors::BG_PRIMARY)
                    .inner_margin(10.0),
            )
            .show(ctx, |ui| match self.session.state() {
                WsState::Disconnected if self.is_https => self.render_https_notice(ui),
                WsState::Disconnected => self.render_connect_form(ui),
                WsState::Connecting => {
                    ui.heading(egui::RichText::new("Connecting...").size(32.0));
                }
                WsState::Connected => self.render_chat(ui),
            });
    }
}

