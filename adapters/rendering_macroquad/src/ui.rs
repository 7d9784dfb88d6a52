//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Height reserved at the bottom of the screen for the touch buttons.
pub(crate) const BUTTON_PANEL_HEIGHT: f32 = 72.0;

const BUTTON_COUNT: f32 = 4.0;
const BUTTON_GAP: f32 = 8.0;

/// Buttons pressed on the panel during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ButtonPanelResult {
    pub(crate) swap: bool,
    pub(crate) action: bool,
    pub(crate) restart: bool,
    pub(crate) mute: bool,
}

/// Snapshot of the button panel's layout for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ButtonPanelContext {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Panel background.
    pub(crate) background: Color,
    /// Whether audio is currently muted, used for the mute button caption.
    pub(crate) muted: bool,
}

/// Renders the on-screen swap, action, restart and mute buttons.
pub(crate) fn draw_button_panel_ui(ui: &mut Ui, context: ButtonPanelContext) -> ButtonPanelResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(8.0, 8.0, 8.0, 8.0))
        .build();
    skin.window_style = window_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .color_selected(Color::from_rgba(70, 70, 70, 255))
        .color_selected_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_inactive(Color::from_rgba(56, 56, 56, 200))
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let slot = ((context.size.x - BUTTON_GAP * (BUTTON_COUNT + 1.0)) / BUTTON_COUNT).max(0.0);
    let top = BUTTON_GAP;
    let mute_label = if context.muted { "UNMUTE" } else { "MUTE" };

    let mut result = ButtonPanelResult::default();
    let _ = ui.window(hash!("button_panel"), context.origin, context.size, |ui| {
        let column = |index: f32| Vec2::new(BUTTON_GAP + index * (slot + BUTTON_GAP), top);
        result.swap = ui.button(column(0.0), "SWAP");
        result.action = ui.button(column(1.0), "ACTION");
        result.restart = ui.button(column(2.0), "RESTART");
        result.mute = ui.button(column(3.0), mute_label);
    });

    ui.pop_skin();

    result
}
