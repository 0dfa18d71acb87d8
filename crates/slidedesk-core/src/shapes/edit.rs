use super::{HAlign, SerializableColor, VAlign};

/// A single property-panel edit applied to the selected object.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Text(String),
    Left(f64),
    Top(f64),
    Width(f64),
    Height(f64),
    FillColor(SerializableColor),
    FontColor(SerializableColor),
    FontSize(f64),
    HAlign(HAlign),
    VAlign(VAlign),
}
