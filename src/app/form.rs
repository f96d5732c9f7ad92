//! Connection form: server address, display name, last error

use eframe::egui;

use super::{ChatApp, HTTP_URL};
use crate::theme::{colors, BUTTON_ROUNDING, CHAT_FONT_SIZE, FORM_FONT_SIZE};

const FORM_MAX_WIDTH: f32 = 500.0;

impl ChatApp {
    pub(crate) fn render_connect_form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.2);
            let width = ui.available_width().min(FORM_MAX_WIDTH);

            let server = ui.add(
                egui::TextEdit::singleline(&mut self.typed_server)
                    .hint_text("IP:Port")
                    .font(egui::FontId::proportional(FORM_FONT_SIZE))
                    .margin(10.0)
                    .desired_width(width),
            );

            ui.add_space(15.0);

            let name = ui.add(
                egui::TextEdit::singleline(&mut self.typed_name)
                    .hint_text("Name")
                    .font(egui::FontId::proportional(FORM_FONT_SIZE))
                    .margin(10.0)
                    .desired_width(width),
            );

            ui.add_space(10.0);

            let clicked = ui.add(accent_button("Connect", FORM_FONT_SIZE)).clicked();
            let entered = (server.lost_focus() || name.lost_focus())
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if clicked || entered {
                self.start_connection();
            }

            if let Some(error) = self.session.error() {
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(error)
                        .color(colors::TEXT_ERROR)
                        .size(CHAT_FONT_SIZE),
                );
            }
        });
    }

    pub(crate) fn render_https_notice(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.2);
            ui.horizontal_wrapped(|ui| {
                ui.heading("You appear to be using https, please use the");
                ui.hyperlink_to(egui::RichText::new("HTTP version").heading(), HTTP_URL);
            });
        });
    }
}

/// Filled blue button used by both the form and the chat input
pub(crate) fn accent_button(label: &str, size: f32) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label.to_owned())
            .color(colors::ON_ACCENT)
            .size(size),
    )
    .fill(colors::ACCENT)
    .stroke(egui::Stroke::NONE)
    .corner_radius(BUTTON_ROUNDING)
}
