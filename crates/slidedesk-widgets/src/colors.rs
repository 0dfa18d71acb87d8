//! The slide palette and its swatches.

use egui::{Color32, CornerRadius, CursorIcon, Rect, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// A named palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl PaletteColor {
    pub const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { name, rgb: (r, g, b) }
    }

    pub const fn color32(&self) -> Color32 {
        Color32::from_rgb(self.rgb.0, self.rgb.1, self.rgb.2)
    }

    /// `#RRGGBB`, upper case.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

/// Quick colors offered in the property panel.
pub const SLIDE_PALETTE: [PaletteColor; 6] = [
    PaletteColor::new("Dark gray", 0x40, 0x40, 0x40),
    PaletteColor::new("Light blue", 0x8F, 0xAA, 0xDC),
    PaletteColor::new("Blue", 0x44, 0x72, 0xC4),
    PaletteColor::new("Navy", 0x1F, 0x38, 0x64),
    PaletteColor::new("Orange", 0xED, 0x7D, 0x31),
    PaletteColor::new("White", 0xFF, 0xFF, 0xFF),
];

/// A clickable square color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let size = vec2(sizing::SWATCH, sizing::SWATCH);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, self.color);
            let outline = if self.selected {
                Stroke::new(2.0, theme::ACCENT)
            } else {
                Stroke::new(1.0, theme::BORDER)
            };
            ui.painter()
                .rect_stroke(rect, radius, outline, StrokeKind::Inside);
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// Lay out the whole palette in one row. Returns the clicked entry, if any.
pub fn palette_row(ui: &mut Ui, current: Option<Color32>) -> Option<PaletteColor> {
    let mut picked = None;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for entry in SLIDE_PALETTE {
            let tooltip = entry.hex();
            let (clicked, _) = ColorSwatch::new(entry.color32(), &tooltip)
                .selected(current == Some(entry.color32()))
                .show(ui);
            if clicked {
                picked = Some(entry);
            }
        }
    });
    picked
}
