//! Slide object definitions.

mod edit;
mod object;

pub use edit::PropertyEdit;
pub use object::{SlideObject, whole_font_size};

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB` with upper-case digits. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Direction an arrow points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl ArrowDirection {
    pub const ALL: [ArrowDirection; 4] = [
        ArrowDirection::Right,
        ArrowDirection::Left,
        ArrowDirection::Up,
        ArrowDirection::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArrowDirection::Up => "up",
            ArrowDirection::Down => "down",
            ArrowDirection::Left => "left",
            ArrowDirection::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(ArrowDirection::Up),
            "down" => Some(ArrowDirection::Down),
            "left" => Some(ArrowDirection::Left),
            "right" => Some(ArrowDirection::Right),
            _ => None,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub const ALL: [HAlign; 3] = [HAlign::Left, HAlign::Center, HAlign::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(HAlign::Left),
            "center" => Some(HAlign::Center),
            "right" => Some(HAlign::Right),
            _ => None,
        }
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    pub const ALL: [VAlign; 3] = [VAlign::Top, VAlign::Middle, VAlign::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(VAlign::Top),
            "middle" => Some(VAlign::Middle),
            "bottom" => Some(VAlign::Bottom),
            _ => None,
        }
    }
}

/// Text content carried by boxes and text objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBody {
    /// Possibly multi-line text. Lines are split on `\n` only.
    pub text: String,
    pub font_color: SerializableColor,
    pub halign: HAlign,
}

impl TextBody {
    pub fn new(halign: HAlign) -> Self {
        Self {
            text: String::new(),
            font_color: SerializableColor::black(),
            halign,
        }
    }

    /// Iterate over the explicit lines of the text.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// The kind of a slide object, carrying only the data that kind uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    Box(TextBody),
    Arrow { direction: ArrowDirection },
    Line,
    Circle,
    Text(TextBody),
}

impl ObjectKind {
    /// A box with centered text.
    pub fn boxed() -> Self {
        ObjectKind::Box(TextBody::new(HAlign::Center))
    }

    /// A free text object, left aligned.
    pub fn text() -> Self {
        ObjectKind::Text(TextBody::new(HAlign::Left))
    }

    pub fn arrow(direction: ArrowDirection) -> Self {
        ObjectKind::Arrow { direction }
    }

    /// Name used in documents (`arrow` for every direction).
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Box(_) => "box",
            ObjectKind::Arrow { .. } => "arrow",
            ObjectKind::Line => "line",
            ObjectKind::Circle => "circle",
            ObjectKind::Text(_) => "text",
        }
    }

    pub fn text_body(&self) -> Option<&TextBody> {
        match self {
            ObjectKind::Box(body) | ObjectKind::Text(body) => Some(body),
            _ => None,
        }
    }

    pub fn text_body_mut(&mut self) -> Option<&mut TextBody> {
        match self {
            ObjectKind::Box(body) | ObjectKind::Text(body) => Some(body),
            _ => None,
        }
    }

    /// Whether text, font and alignment fields apply to this kind.
    pub fn has_text(&self) -> bool {
        self.text_body().is_some()
    }

    pub fn direction(&self) -> Option<ArrowDirection> {
        match self {
            ObjectKind::Arrow { direction } => Some(*direction),
            _ => None,
        }
    }
}
