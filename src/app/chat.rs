//! Chat view: message cards and the send bar

use eframe::egui;

use super::form::accent_button;
use super::ChatApp;
use crate::core::ChatMessage;
use crate::theme::{colors, CARD_ROUNDING, CHAT_FONT_SIZE};

/// Height kept free below the message list for the send bar
const SEND_BAR_HEIGHT: f32 = 70.0;
const SEND_BUTTON_WIDTH: f32 = 100.0;

impl ChatApp {
    pub(crate) fn render_chat(&mut self, ui: &mut egui::Ui) {
        let list_height = (ui.available_height() - SEND_BAR_HEIGHT).max(0.0);

        egui::ScrollArea::vertical()
            .max_height(list_height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in self.session.messages() {
                    message_card(ui, message);
                }
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.typed_message)
                    .font(egui::FontId::proportional(CHAT_FONT_SIZE))
                    .margin(10.0)
                    .desired_width((ui.available_width() - SEND_BUTTON_WIDTH).max(0.0)),
            );

            let clicked = ui.add(accent_button("Send", CHAT_FONT_SIZE)).clicked();
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if clicked || entered {
                self.submit_message();
                input.request_focus();
            }
        });
    }
}

fn message_card(ui: &mut egui::Ui, message: &ChatMessage) {
    ui.add_space(10.0);
    egui::Frame::new()
        .stroke(egui::Stroke::new(1.0, colors::BORDER))
        .corner_radius(CARD_ROUNDING)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(&message.name)
                    .strong()
                    .size(CHAT_FONT_SIZE),
            );
            ui.label(egui::RichText::new(&message.text).size(CHAT_FONT_SIZE));
        });
}
