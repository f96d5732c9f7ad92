//! HydroChat - minimal chat client over a single WebSocket
//!
//! Runs in the browser (`wasm` feature, egui on a canvas) and in a terminal
//! (`cli` feature, `chat-cli` binary). Both share the session logic in
//! [`core`].

pub mod core;
pub mod ws_state;

#[cfg(all(feature = "cli", not(target_arch = "wasm32")))]
pub mod websocket_native;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod app;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod theme;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod websocket_wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::ChatApp;

    /// Id of the canvas element the host page provides
    const CANVAS_ID: &str = "hydro_chat_canvas";

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CANVAS_ID))
            .ok_or_else(|| JsValue::from_str("no canvas element"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async move {
            let started = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(ChatApp::new(cc)))),
                )
                .await;
            if let Err(e) = started {
                tracing::error!(error = ?e, "Failed to start eframe");
            }
        });

        Ok(())
    }
}
