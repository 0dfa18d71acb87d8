//! egui widgets for the SlideDesk editor panels.
//!
//! - **Buttons**: tool toggles and font-size preset buttons
//! - **Colors**: the slide palette and its swatches
//! - **Layout**: section labels, separators, panel frames

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{FontSizeButton, ToggleButton};
pub use colors::{ColorSwatch, PaletteColor, SLIDE_PALETTE, palette_row};
pub use layout::{panel_frame, section_label, separator, toolbar_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Palette swatch size
    pub const SWATCH: f32 = 22.0;
    /// Height of toggle and preset buttons
    pub const BUTTON_HEIGHT: f32 = 26.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 6;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    pub const TEXT: Color32 = Color32::from_rgb(50, 50, 50);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    pub const BORDER: Color32 = Color32::from_rgb(204, 204, 204);
    /// Matches the canvas selection color.
    pub const ACCENT: Color32 = Color32::from_rgb(0x44, 0x72, 0xC4);
    pub const BUTTON_BG: Color32 = Color32::from_rgb(240, 240, 240);
    pub const HOVER_BG: Color32 = Color32::from_rgb(228, 232, 240);
    pub const PANEL_BG: Color32 = Color32::from_rgb(255, 255, 255);
}
