//! Light theme for the chat page

use egui::Color32;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BG_HOVER: Color32 = Color32::from_rgb(240, 240, 240);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 110, 110);
    pub const TEXT_ERROR: Color32 = Color32::from_rgb(255, 0, 0);
    pub const TEXT_LINK: Color32 = Color32::from_rgb(0, 0, 255);

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(170, 170, 170); // #aaa

    // === Buttons ===
    pub const ACCENT: Color32 = Color32::from_rgb(0, 150, 255); // #0096FF
    pub const ON_ACCENT: Color32 = Color32::from_rgb(255, 255, 255);
}

pub const FORM_FONT_SIZE: f32 = 40.0;
pub const CHAT_FONT_SIZE: f32 = 24.0;
pub const CARD_ROUNDING: f32 = 10.0;
pub const BUTTON_ROUNDING: f32 = 8.0;

/// Create egui Visuals for the chat page
pub fn chat_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    // Inputs: thin grey border, rounded
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.corner_radius = CARD_ROUNDING.into();
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.corner_radius = CARD_ROUNDING.into();
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.active.corner_radius = CARD_ROUNDING.into();

    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.hyperlink_color = TEXT_LINK;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
