//! Tool toggles and font-size preset buttons.

use egui::{Align2, Color32, CornerRadius, CursorIcon, FontId, Sense, Ui, vec2};

use crate::{sizing, theme};

/// A text button that renders solid accent when active.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: f32,
    tooltip: Option<&'a str>,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: 0.0,
            tooltip: None,
        }
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::proportional(12.0);
        let text_width = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
            .size()
            .x;
        let width = (text_width + 18.0).max(self.min_width);
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, sizing::BUTTON_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg, fg) = if self.selected {
                (theme::ACCENT, Color32::WHITE)
            } else if response.hovered() {
                (theme::HOVER_BG, theme::TEXT)
            } else {
                (theme::BUTTON_BG, theme::TEXT)
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, fg);
        }

        let clicked = response.clicked();
        let response = match self.tooltip {
            Some(tip) => response.on_hover_text(tip),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A button for one font-size preset, labelled with its point size.
pub struct FontSizeButton {
    points: f64,
    selected: bool,
}

impl FontSizeButton {
    pub fn new(points: f64, selected: bool) -> Self {
        Self { points, selected }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let label = format!("{}pt", self.points);
        let (rect, response) =
            ui.allocate_exact_size(vec2(40.0, sizing::BUTTON_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg, fg) = if self.selected {
                (theme::ACCENT, Color32::WHITE)
            } else if response.hovered() {
                (theme::HOVER_BG, theme::TEXT)
            } else {
                (theme::BUTTON_BG, theme::TEXT)
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg);
            // Label drawn at a size hinting the preset, capped to fit the button.
            let display = (self.points as f32).clamp(9.0, 14.0);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(display),
                fg,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
