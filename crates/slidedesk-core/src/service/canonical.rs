//! Canonical slide JSON (the `01_content.json` format).
//!
//! Keys are snake_case, colors are upper-case hex without `#`, geometry is
//! rounded to 3 decimals and font sizes are integers.

use super::{ServiceError, ServiceResult};
use crate::bridge::{ExternalObject, SlideDocument, default_slide_index};
use crate::shapes::{ArrowDirection, HAlign, ObjectKind, VAlign, whole_font_size};
use crate::units::round3;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One slide in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSlide {
    #[serde(default = "default_slide_index")]
    pub index: u32,
    #[serde(rename = "type", default = "content_type")]
    pub slide_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub objects: Vec<CanonicalObject>,
}

fn content_type() -> String {
    "content".to_string()
}

/// One object in canonical form. Missing fields take per-kind defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanonicalObject {
    Box {
        #[serde(default)]
        text: String,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        #[serde(default = "one")]
        width: f64,
        #[serde(default = "half")]
        height: f64,
        #[serde(default = "white")]
        fill_color: String,
        #[serde(default = "black")]
        font_color: String,
        #[serde(default = "box_font_size", deserialize_with = "box_font_size_from")]
        font_size: u32,
        #[serde(default = "align_center", deserialize_with = "align_center_from")]
        h_align: HAlign,
        #[serde(default = "align_middle", deserialize_with = "align_middle_from")]
        v_align: VAlign,
    },
    Arrow {
        #[serde(default, deserialize_with = "direction_from")]
        direction: ArrowDirection,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        #[serde(default = "half")]
        width: f64,
        #[serde(default = "arrow_height")]
        height: f64,
        #[serde(default = "white")]
        fill_color: String,
    },
    Text {
        #[serde(default)]
        text: String,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        #[serde(default = "one")]
        width: f64,
        #[serde(default = "half")]
        height: f64,
        #[serde(default = "text_font_size", deserialize_with = "text_font_size_from")]
        font_size: u32,
        #[serde(default = "black")]
        font_color: String,
        #[serde(default = "align_left", deserialize_with = "align_left_from")]
        h_align: HAlign,
        #[serde(default = "align_top", deserialize_with = "align_top_from")]
        v_align: VAlign,
    },
    Line {
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        #[serde(default = "one")]
        width: f64,
        #[serde(default = "line_height")]
        height: f64,
        #[serde(default = "white")]
        fill_color: String,
    },
    Circle {
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        #[serde(default = "half")]
        width: f64,
        #[serde(default = "half")]
        height: f64,
        #[serde(default = "white")]
        fill_color: String,
    },
}

fn one() -> f64 {
    1.0
}
fn half() -> f64 {
    0.5
}
fn arrow_height() -> f64 {
    0.3
}
fn line_height() -> f64 {
    0.1
}
fn white() -> String {
    "FFFFFF".to_string()
}
fn black() -> String {
    "000000".to_string()
}
fn box_font_size() -> u32 {
    12
}
fn text_font_size() -> u32 {
    10
}
fn align_center() -> HAlign {
    HAlign::Center
}
fn align_left() -> HAlign {
    HAlign::Left
}
fn align_middle() -> VAlign {
    VAlign::Middle
}
fn align_top() -> VAlign {
    VAlign::Top
}

/// Read a field that tolerates hand-written values: anything that does not
/// parse takes the per-kind default instead of failing the whole object.
fn lenient<'de, D, T>(
    deserializer: D,
    parse: impl FnOnce(&Value) -> Option<T>,
    fallback: T,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse(&value).unwrap_or_else(|| {
        log::warn!("unusable canonical value {value}, using default");
        fallback
    }))
}

/// `14`, `14.0` and `"14"` all read as 14pt.
fn font_points(value: &Value) -> Option<u32> {
    let points = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    whole_font_size(points).map(|v| v as u32)
}

fn named<T>(value: &Value, from_name: fn(&str) -> Option<T>) -> Option<T> {
    value.as_str().map(str::trim).and_then(from_name)
}

fn box_font_size_from<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient(d, font_points, box_font_size())
}
fn text_font_size_from<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient(d, font_points, text_font_size())
}
fn align_center_from<'de, D: Deserializer<'de>>(d: D) -> Result<HAlign, D::Error> {
    lenient(d, |v| named(v, HAlign::from_name), HAlign::Center)
}
fn align_left_from<'de, D: Deserializer<'de>>(d: D) -> Result<HAlign, D::Error> {
    lenient(d, |v| named(v, HAlign::from_name), HAlign::Left)
}
fn align_middle_from<'de, D: Deserializer<'de>>(d: D) -> Result<VAlign, D::Error> {
    lenient(d, |v| named(v, VAlign::from_name), VAlign::Middle)
}
fn align_top_from<'de, D: Deserializer<'de>>(d: D) -> Result<VAlign, D::Error> {
    lenient(d, |v| named(v, VAlign::from_name), VAlign::Top)
}
fn direction_from<'de, D: Deserializer<'de>>(d: D) -> Result<ArrowDirection, D::Error> {
    lenient(d, |v| named(v, ArrowDirection::from_name), ArrowDirection::default())
}

/// `#4472c4` -> `4472C4`
fn canonical_color(value: Option<&str>, fallback: &str) -> String {
    value
        .map(|v| v.trim_start_matches('#').to_uppercase())
        .unwrap_or_else(|| fallback.to_string())
}

/// `4472c4` -> `#4472C4`
fn editor_color(value: &str) -> String {
    format!("#{}", value.trim_start_matches('#').to_uppercase())
}

fn font_size(value: Option<f64>, fallback: u32) -> u32 {
    value
        .and_then(whole_font_size)
        .map(|v| v as u32)
        .unwrap_or(fallback)
}

/// Convert one editor object. Unknown types yield `None`.
fn canonical_object(obj: &ExternalObject) -> Option<CanonicalObject> {
    let (left, top, width, height) = (
        round3(obj.left),
        round3(obj.top),
        round3(obj.width),
        round3(obj.height),
    );
    let fill_color = canonical_color(obj.fill_color.as_deref(), "FFFFFF");
    let font_color = canonical_color(obj.font_color.as_deref(), "000000");
    let h_align = obj.halign.as_deref().and_then(HAlign::from_name);
    let v_align = obj.valign.as_deref().and_then(VAlign::from_name);

    let converted = match obj.object_kind()? {
        ObjectKind::Box(_) => CanonicalObject::Box {
            text: obj.text.clone().unwrap_or_default(),
            left,
            top,
            width,
            height,
            fill_color,
            font_color,
            font_size: font_size(obj.font_size, box_font_size()),
            h_align: h_align.unwrap_or(HAlign::Center),
            v_align: v_align.unwrap_or(VAlign::Middle),
        },
        ObjectKind::Arrow { direction } => CanonicalObject::Arrow {
            direction,
            left,
            top,
            width,
            height,
            fill_color,
        },
        ObjectKind::Text(_) => CanonicalObject::Text {
            text: obj.text.clone().unwrap_or_default(),
            left,
            top,
            width,
            height,
            font_size: font_size(obj.font_size, text_font_size()),
            font_color,
            h_align: h_align.unwrap_or(HAlign::Left),
            v_align: v_align.unwrap_or(VAlign::Top),
        },
        ObjectKind::Line => CanonicalObject::Line {
            left,
            top,
            width,
            height,
            fill_color,
        },
        ObjectKind::Circle => CanonicalObject::Circle {
            left,
            top,
            width,
            height,
            fill_color,
        },
    };
    Some(converted)
}

/// Convert editor objects, dropping unknown types.
pub fn to_canonical_objects(objects: &[ExternalObject]) -> Vec<CanonicalObject> {
    objects
        .iter()
        .filter_map(|obj| {
            let converted = canonical_object(obj);
            if converted.is_none() {
                log::warn!("dropping object of unknown type {:?}", obj.kind);
            }
            converted
        })
        .collect()
}

/// Convert an editor document to a canonical slide.
pub fn to_canonical(document: &SlideDocument) -> CanonicalSlide {
    CanonicalSlide {
        index: document.slide_index,
        slide_type: content_type(),
        title: document.title.clone(),
        subtitle: document.subtitle.clone(),
        objects: to_canonical_objects(&document.objects),
    }
}

impl CanonicalObject {
    /// Convert back to the editor's flattened shape.
    pub fn into_external(self) -> ExternalObject {
        match self {
            CanonicalObject::Box {
                text,
                left,
                top,
                width,
                height,
                fill_color,
                font_color,
                font_size,
                h_align,
                v_align,
            } => text_external(
                "box",
                text,
                (left, top, width, height),
                fill_color,
                font_color,
                font_size,
                h_align,
                v_align,
            ),
            CanonicalObject::Text {
                text,
                left,
                top,
                width,
                height,
                font_size,
                font_color,
                h_align,
                v_align,
            } => text_external(
                "text",
                text,
                (left, top, width, height),
                white(),
                font_color,
                font_size,
                h_align,
                v_align,
            ),
            CanonicalObject::Arrow {
                direction,
                left,
                top,
                width,
                height,
                fill_color,
            } => ExternalObject {
                direction: Some(direction.as_str().to_string()),
                ..plain_external("arrow", (left, top, width, height), &fill_color)
            },
            CanonicalObject::Line {
                left,
                top,
                width,
                height,
                fill_color,
            } => plain_external("line", (left, top, width, height), &fill_color),
            CanonicalObject::Circle {
                left,
                top,
                width,
                height,
                fill_color,
            } => plain_external("circle", (left, top, width, height), &fill_color),
        }
    }
}

fn plain_external(
    kind: &str,
    (left, top, width, height): (f64, f64, f64, f64),
    fill_color: &str,
) -> ExternalObject {
    ExternalObject {
        kind: kind.to_string(),
        left,
        top,
        width,
        height,
        fill_color: Some(editor_color(fill_color)),
        ..Default::default()
    }
}

#[allow(clippy::too_many_arguments)]
fn text_external(
    kind: &str,
    text: String,
    geometry: (f64, f64, f64, f64),
    fill_color: String,
    font_color: String,
    font_size: u32,
    h_align: HAlign,
    v_align: VAlign,
) -> ExternalObject {
    ExternalObject {
        text: Some(text),
        font_color: Some(editor_color(&font_color)),
        font_size: Some(f64::from(font_size)),
        halign: Some(h_align.as_str().to_string()),
        valign: Some(v_align.as_str().to_string()),
        ..plain_external(kind, geometry, &fill_color)
    }
}

/// Convert a canonical slide back to an editor document.
pub fn from_canonical(slide: CanonicalSlide) -> SlideDocument {
    SlideDocument {
        title: slide.title,
        subtitle: slide.subtitle,
        slide_index: slide.index,
        objects: slide
            .objects
            .into_iter()
            .map(CanonicalObject::into_external)
            .collect(),
    }
}

/// Parse user-supplied canonical JSON.
///
/// The text must be a JSON object with an `objects` array. Entries that do
/// not describe a known object are skipped.
pub fn parse_canonical(json_string: &str) -> ServiceResult<CanonicalSlide> {
    if json_string.trim().is_empty() {
        return Err(ServiceError::Required("jsonString"));
    }
    let value: Value =
        serde_json::from_str(json_string).map_err(|e| ServiceError::Parse(e.to_string()))?;
    let Value::Object(mut map) = value else {
        return Err(ServiceError::Parse("expected a JSON object".to_string()));
    };
    let items = match map.remove("objects") {
        None | Some(Value::Null) => return Err(ServiceError::MissingObjects),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ServiceError::ObjectsNotArray),
    };

    let mut slide: CanonicalSlide = serde_json::from_value(Value::Object(map))
        .map_err(|e| ServiceError::Parse(e.to_string()))?;
    slide.objects = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CanonicalObject>(item) {
            Ok(obj) => Some(obj),
            Err(e) => {
                log::warn!("skipping canonical object: {e}");
                None
            }
        })
        .collect();
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external(kind: &str) -> ExternalObject {
        ExternalObject {
            kind: kind.to_string(),
            left: 0.123456,
            top: 1.0,
            width: 1.0,
            height: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_box_export_fields() {
        let mut obj = external("box");
        obj.fill_color = Some("#8faadc".into());
        obj.font_size = Some(14.0);
        obj.text = Some("Step 1".into());
        let value = serde_json::to_value(canonical_object(&obj).unwrap()).unwrap();
        assert_eq!(value["type"], "box");
        assert_eq!(value["fill_color"], "8FAADC");
        assert_eq!(value["font_color"], "000000");
        assert_eq!(value["font_size"], 14);
        assert_eq!(value["h_align"], "center");
        assert_eq!(value["v_align"], "middle");
        assert_eq!(value["left"], 0.123);
    }

    #[test]
    fn test_text_export_defaults() {
        let value = serde_json::to_value(canonical_object(&external("text")).unwrap()).unwrap();
        assert_eq!(value["font_size"], 10);
        assert_eq!(value["h_align"], "left");
        assert_eq!(value["v_align"], "top");
        assert!(value.get("fill_color").is_none());
    }

    #[test]
    fn test_arrow_export_keeps_direction() {
        let mut obj = external("arrow");
        obj.direction = Some("down".into());
        let value = serde_json::to_value(canonical_object(&obj).unwrap()).unwrap();
        assert_eq!(value["type"], "arrow");
        assert_eq!(value["direction"], "down");
        assert!(value.get("text").is_none());

        let legacy = serde_json::to_value(canonical_object(&external("arrow-left")).unwrap()).unwrap();
        assert_eq!(legacy["direction"], "left");
    }

    #[test]
    fn test_slide_header() {
        let doc = SlideDocument {
            title: "概要".into(),
            subtitle: String::new(),
            slide_index: 3,
            objects: vec![external("circle"), external("star")],
        };
        let slide = to_canonical(&doc);
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value["index"], 3);
        assert_eq!(value["type"], "content");
        assert_eq!(value["title"], "概要");
        assert_eq!(slide.objects.len(), 1);
    }

    #[test]
    fn test_parse_requires_objects_array() {
        assert!(matches!(parse_canonical("  "), Err(ServiceError::Required(_))));
        assert!(matches!(parse_canonical("{oops"), Err(ServiceError::Parse(_))));
        assert!(matches!(parse_canonical("[1, 2]"), Err(ServiceError::Parse(_))));
        assert!(matches!(
            parse_canonical(r#"{"title": "x"}"#),
            Err(ServiceError::MissingObjects)
        ));
        assert!(matches!(
            parse_canonical(r#"{"objects": {"type": "box"}}"#),
            Err(ServiceError::ObjectsNotArray)
        ));
    }

    #[test]
    fn test_parse_applies_defaults_and_skips_unknown() {
        let slide = parse_canonical(
            r#"{"title": "T", "objects": [
                {"type": "arrow", "left": 1},
                {"type": "cloud"},
                {"type": "line"},
                {"type": "text", "text": "hi"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(slide.index, 1);
        assert_eq!(slide.objects.len(), 3);
        assert_eq!(
            slide.objects[0],
            CanonicalObject::Arrow {
                direction: ArrowDirection::Right,
                left: 1.0,
                top: 0.0,
                width: 0.5,
                height: 0.3,
                fill_color: "FFFFFF".into(),
            }
        );
        match &slide.objects[2] {
            CanonicalObject::Text { font_size, h_align, .. } => {
                assert_eq!(*font_size, 10);
                assert_eq!(*h_align, HAlign::Left);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_from_canonical_restores_editor_shape() {
        let slide = parse_canonical(
            r#"{"index": 2, "title": "T", "subtitle": "S", "objects": [
                {"type": "box", "text": "A", "fill_color": "4472c4", "font_color": "ffffff"},
                {"type": "arrow", "direction": "up", "fill_color": "ED7D31"}
            ]}"#,
        )
        .unwrap();
        let doc = from_canonical(slide);
        assert_eq!(doc.slide_index, 2);
        assert_eq!(doc.objects[0].fill_color.as_deref(), Some("#4472C4"));
        assert_eq!(doc.objects[0].font_color.as_deref(), Some("#FFFFFF"));
        assert_eq!(doc.objects[0].font_size, Some(12.0));
        assert_eq!(doc.objects[1].kind, "arrow");
        assert_eq!(doc.objects[1].direction.as_deref(), Some("up"));
    }

    #[test]
    fn test_parse_accepts_float_font_size() {
        let slide = parse_canonical(
            r#"{"objects": [
                {"type": "box", "font_size": 14.0},
                {"type": "text", "font_size": "9"},
                {"type": "box", "font_size": 10.6}
            ]}"#,
        )
        .unwrap();
        let sizes: Vec<u32> = slide
            .objects
            .iter()
            .map(|obj| match obj {
                CanonicalObject::Box { font_size, .. } | CanonicalObject::Text { font_size, .. } => {
                    *font_size
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(sizes, vec![14, 9, 11]);
    }

    #[test]
    fn test_parse_unusable_font_size_takes_kind_default() {
        let slide = parse_canonical(
            r#"{"objects": [
                {"type": "box", "font_size": "large"},
                {"type": "text", "font_size": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(slide.objects.len(), 2);
        assert!(matches!(slide.objects[0], CanonicalObject::Box { font_size: 12, .. }));
        assert!(matches!(slide.objects[1], CanonicalObject::Text { font_size: 10, .. }));
    }

    #[test]
    fn test_parse_unknown_alignment_keeps_object() {
        let slide = parse_canonical(
            r#"{"objects": [
                {"type": "box", "text": "kept", "h_align": "justify", "v_align": "baseline"},
                {"type": "text", "h_align": 3, "v_align": "bottom"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(slide.objects.len(), 2);
        match &slide.objects[0] {
            CanonicalObject::Box { text, h_align, v_align, .. } => {
                assert_eq!(text, "kept");
                assert_eq!(*h_align, HAlign::Center);
                assert_eq!(*v_align, VAlign::Middle);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &slide.objects[1] {
            CanonicalObject::Text { h_align, v_align, .. } => {
                assert_eq!(*h_align, HAlign::Left);
                assert_eq!(*v_align, VAlign::Bottom);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_direction_keeps_arrow() {
        let slide = parse_canonical(
            r#"{"objects": [
                {"type": "arrow", "direction": "northeast", "left": 2},
                {"type": "arrow", "direction": "up"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(slide.objects.len(), 2);
        assert!(matches!(
            slide.objects[0],
            CanonicalObject::Arrow { direction: ArrowDirection::Right, .. }
        ));
        assert!(matches!(
            slide.objects[1],
            CanonicalObject::Arrow { direction: ArrowDirection::Up, .. }
        ));
    }
}
