//! A single placed object.

use super::{ObjectId, ObjectKind, PropertyEdit, SerializableColor, TextBody, VAlign};
use crate::units::to_device;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed object on the slide. Geometry is in inches, origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideObject {
    id: ObjectId,
    kind: ObjectKind,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: SerializableColor,
    pub font_size: f64,
    pub valign: VAlign,
}

impl SlideObject {
    /// Size given to objects placed with a creation tool.
    pub const DEFAULT_WIDTH: f64 = 1.0;
    pub const DEFAULT_HEIGHT: f64 = 0.5;
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    /// Create an object with default style. Negative sizes are clamped to zero.
    pub fn new(kind: ObjectKind, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
            fill_color: SerializableColor::white(),
            font_size: Self::DEFAULT_FONT_SIZE,
            valign: VAlign::Middle,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn text_body(&self) -> Option<&TextBody> {
        self.kind.text_body()
    }

    pub fn text_body_mut(&mut self) -> Option<&mut TextBody> {
        self.kind.text_body_mut()
    }

    /// Bounds in device pixels. Recomputed on every call.
    pub fn device_bounds(&self) -> Rect {
        let x = to_device(self.left);
        let y = to_device(self.top);
        Rect::new(x, y, x + to_device(self.width), y + to_device(self.height))
    }

    /// Inclusive containment test in device space.
    pub fn hit_test(&self, point: Point) -> bool {
        let b = self.device_bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Apply a property edit. Returns `false` when the edit does not apply to
    /// this kind or the value is rejected.
    pub fn apply(&mut self, edit: PropertyEdit) -> bool {
        match edit {
            PropertyEdit::Left(v) if v.is_finite() => self.left = v,
            PropertyEdit::Top(v) if v.is_finite() => self.top = v,
            PropertyEdit::Width(v) if v.is_finite() => self.width = v.max(0.0),
            PropertyEdit::Height(v) if v.is_finite() => self.height = v.max(0.0),
            PropertyEdit::FillColor(color) => {
                // Free text has no background.
                if matches!(self.kind, ObjectKind::Text(_)) {
                    return false;
                }
                self.fill_color = color;
            }
            PropertyEdit::FontSize(size) => {
                let Some(size) = whole_font_size(size) else {
                    return false;
                };
                if !self.kind.has_text() {
                    return false;
                }
                self.font_size = size;
            }
            PropertyEdit::VAlign(valign) => {
                if !self.kind.has_text() {
                    return false;
                }
                self.valign = valign;
            }
            PropertyEdit::Text(text) => match self.kind.text_body_mut() {
                Some(body) => body.text = text,
                None => return false,
            },
            PropertyEdit::FontColor(color) => match self.kind.text_body_mut() {
                Some(body) => body.font_color = color,
                None => return false,
            },
            PropertyEdit::HAlign(halign) => match self.kind.text_body_mut() {
                Some(body) => body.halign = halign,
                None => return false,
            },
            _ => return false,
        }
        true
    }
}

/// Font sizes are whole points, at least 1. Returns `None` for values that
/// cannot be used.
pub fn whole_font_size(size: f64) -> Option<f64> {
    let rounded = size.round();
    (rounded.is_finite() && rounded >= 1.0).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ArrowDirection, HAlign};

    fn sample() -> SlideObject {
        SlideObject::new(ObjectKind::boxed(), 1.0, 2.0, 1.5, 0.5)
    }

    #[test]
    fn test_defaults() {
        let obj = sample();
        assert_eq!(obj.fill_color, SerializableColor::white());
        assert!((obj.font_size - 12.0).abs() < f64::EPSILON);
        assert_eq!(obj.valign, VAlign::Middle);
        let body = obj.text_body().unwrap();
        assert_eq!(body.font_color, SerializableColor::black());
        assert!(body.text.is_empty());
    }

    #[test]
    fn test_ids_unique() {
        assert_ne!(sample().id(), sample().id());
    }

    #[test]
    fn test_negative_size_clamped() {
        let obj = SlideObject::new(ObjectKind::Line, 0.0, 0.0, -1.0, -0.2);
        assert!(obj.width.abs() < f64::EPSILON);
        assert!(obj.height.abs() < f64::EPSILON);
    }

    #[test]
    fn test_device_bounds() {
        let b = sample().device_bounds();
        assert!((b.x0 - 96.0).abs() < f64::EPSILON);
        assert!((b.y0 - 192.0).abs() < f64::EPSILON);
        assert!((b.width() - 144.0).abs() < f64::EPSILON);
        assert!((b.height() - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_center_and_edges() {
        let obj = sample();
        let b = obj.device_bounds();
        assert!(obj.hit_test(b.center()));
        assert!(obj.hit_test(Point::new(b.x0, b.y0)));
        assert!(obj.hit_test(Point::new(b.x1, b.y1)));
        assert!(!obj.hit_test(Point::new(b.x0 - 0.01, b.center().y)));
        assert!(!obj.hit_test(Point::new(b.x1 + 0.01, b.center().y)));
        assert!(!obj.hit_test(Point::new(b.center().x, b.y0 - 0.01)));
        assert!(!obj.hit_test(Point::new(b.center().x, b.y1 + 0.01)));
    }

    #[test]
    fn test_apply_geometry() {
        let mut obj = sample();
        assert!(obj.apply(PropertyEdit::Left(3.25)));
        assert!(obj.apply(PropertyEdit::Width(-2.0)));
        assert!(!obj.apply(PropertyEdit::Top(f64::NAN)));
        assert!((obj.left - 3.25).abs() < f64::EPSILON);
        assert!(obj.width.abs() < f64::EPSILON);
        assert!((obj.top - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_size_must_be_positive() {
        let mut obj = sample();
        assert!(!obj.apply(PropertyEdit::FontSize(0.0)));
        assert!(!obj.apply(PropertyEdit::FontSize(-4.0)));
        assert!(obj.apply(PropertyEdit::FontSize(14.0)));
        assert!((obj.font_size - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_size_rounds_to_whole_points() {
        let mut obj = sample();
        assert!(obj.apply(PropertyEdit::FontSize(12.5)));
        assert!((obj.font_size - 13.0).abs() < f64::EPSILON);
        assert!(obj.apply(PropertyEdit::FontSize(9.4)));
        assert!((obj.font_size - 9.0).abs() < f64::EPSILON);
        assert!(!obj.apply(PropertyEdit::FontSize(0.4)));
        assert!(!obj.apply(PropertyEdit::FontSize(f64::INFINITY)));
        assert!((obj.font_size - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fill_color_rejected_for_text() {
        let mut text = SlideObject::new(ObjectKind::text(), 1.0, 1.0, 2.0, 0.5);
        assert!(!text.apply(PropertyEdit::FillColor(SerializableColor::rgb(0x44, 0x72, 0xC4))));
        assert_eq!(text.fill_color, SerializableColor::white());

        let mut boxed = sample();
        assert!(boxed.apply(PropertyEdit::FillColor(SerializableColor::rgb(0x44, 0x72, 0xC4))));
        assert_eq!(boxed.fill_color, SerializableColor::rgb(0x44, 0x72, 0xC4));
    }

    #[test]
    fn test_text_edits_ignored_for_arrow() {
        let mut arrow = SlideObject::new(ObjectKind::arrow(ArrowDirection::Left), 0.0, 0.0, 1.0, 0.5);
        let before = arrow.clone();
        assert!(!arrow.apply(PropertyEdit::Text("hello".into())));
        assert!(!arrow.apply(PropertyEdit::FontColor(SerializableColor::white())));
        assert!(!arrow.apply(PropertyEdit::HAlign(HAlign::Right)));
        assert!(!arrow.apply(PropertyEdit::FontSize(9.0)));
        assert_eq!(arrow, before);
        assert!(arrow.apply(PropertyEdit::FillColor(SerializableColor::rgb(0xED, 0x7D, 0x31))));
    }

    #[test]
    fn test_text_edits_apply_to_box() {
        let mut obj = sample();
        assert!(obj.apply(PropertyEdit::Text("a\nb".into())));
        assert!(obj.apply(PropertyEdit::HAlign(HAlign::Right)));
        let body = obj.text_body().unwrap();
        assert_eq!(body.lines().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(body.halign, HAlign::Right);
    }
}
