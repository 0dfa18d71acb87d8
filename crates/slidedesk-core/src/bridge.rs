//! Conversion between the scene and the flattened external document.
//!
//! The external document is what the JSON service consumes and produces:
//!
//! ```json
//! { "title": "", "subtitle": "", "slideIndex": 1,
//!   "objects": [ { "type": "arrow", "direction": "left", "left": 1.0, ... } ] }
//! ```
//!
//! Arrows are flattened to `type: "arrow"` plus a `direction` field. Input is
//! trusted: schema checks happen in the service before a document gets here.

use crate::scene::Scene;
use crate::shapes::{
    ArrowDirection, HAlign, ObjectKind, SerializableColor, SlideObject, TextBody, VAlign,
    whole_font_size,
};
use serde::{Deserialize, Serialize};

const DEFAULT_FILL: SerializableColor = SerializableColor::white();
const DEFAULT_FONT: SerializableColor = SerializableColor::black();

/// Slide document exchanged with the JSON service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_slide_index")]
    pub slide_index: u32,
    #[serde(default)]
    pub objects: Vec<ExternalObject>,
}

impl Default for SlideDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            slide_index: default_slide_index(),
            objects: Vec::new(),
        }
    }
}

pub(crate) fn default_slide_index() -> u32 {
    1
}

/// Flattened projection of one slide object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halign: Option<String>,
}

impl ExternalObject {
    /// Flatten a slide object.
    pub fn from_object(obj: &SlideObject) -> Self {
        let mut out = ExternalObject {
            kind: obj.kind().name().to_string(),
            direction: obj.kind().direction().map(|d| d.as_str().to_string()),
            left: obj.left,
            top: obj.top,
            width: obj.width,
            height: obj.height,
            fill_color: Some(obj.fill_color.to_hex()),
            font_size: Some(obj.font_size),
            valign: Some(obj.valign.as_str().to_string()),
            ..Default::default()
        };
        if let Some(body) = obj.text_body() {
            out.text = Some(body.text.clone());
            out.font_color = Some(body.font_color.to_hex());
            out.halign = Some(body.halign.as_str().to_string());
        }
        out
    }

    /// Resolve `type` (and `direction`) into an object kind with default text
    /// style. Accepts the combined `arrow-<direction>` form as well.
    pub fn object_kind(&self) -> Option<ObjectKind> {
        let (base, suffix) = match self.kind.split_once('-') {
            Some((base, suffix)) => (base, Some(suffix)),
            None => (self.kind.as_str(), None),
        };
        match (base, suffix) {
            ("box", None) => Some(ObjectKind::boxed()),
            ("line", None) => Some(ObjectKind::Line),
            ("circle", None) => Some(ObjectKind::Circle),
            ("text", None) => Some(ObjectKind::text()),
            ("arrow", suffix) => {
                let name = self.direction.as_deref().or(suffix);
                let direction = name
                    .and_then(ArrowDirection::from_name)
                    .unwrap_or_default();
                Some(ObjectKind::arrow(direction))
            }
            _ => None,
        }
    }

    /// Rebuild a slide object, filling missing style fields with defaults.
    /// Returns `None` for unknown types.
    pub fn to_object(&self) -> Option<SlideObject> {
        let mut kind = self.object_kind()?;
        if let Some(body) = kind.text_body_mut() {
            fill_text_body(body, self);
        }
        let mut obj = SlideObject::new(kind, self.left, self.top, self.width, self.height);
        if !matches!(obj.kind(), ObjectKind::Text(_)) {
            obj.fill_color = parse_color(self.fill_color.as_deref(), DEFAULT_FILL);
        }
        obj.font_size = self
            .font_size
            .and_then(whole_font_size)
            .unwrap_or(SlideObject::DEFAULT_FONT_SIZE);
        obj.valign = self
            .valign
            .as_deref()
            .and_then(VAlign::from_name)
            .unwrap_or_default();
        Some(obj)
    }
}

fn fill_text_body(body: &mut TextBody, external: &ExternalObject) {
    body.text = external.text.clone().unwrap_or_default();
    body.font_color = parse_color(external.font_color.as_deref(), DEFAULT_FONT);
    if let Some(halign) = external.halign.as_deref().and_then(HAlign::from_name) {
        body.halign = halign;
    }
}

fn parse_color(value: Option<&str>, fallback: SerializableColor) -> SerializableColor {
    match value {
        None => fallback,
        Some(hex) => SerializableColor::from_hex(hex).unwrap_or_else(|| {
            log::warn!("ignoring malformed color {hex:?}");
            fallback
        }),
    }
}

/// Build the external document for the current scene.
pub fn export_document(title: &str, subtitle: &str, slide_index: u32, scene: &Scene) -> SlideDocument {
    SlideDocument {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        slide_index,
        objects: scene.objects().iter().map(ExternalObject::from_object).collect(),
    }
}

/// Rebuild slide objects from external ones, skipping unknown types.
pub fn import_objects(objects: &[ExternalObject]) -> Vec<SlideObject> {
    objects
        .iter()
        .filter_map(|external| {
            let obj = external.to_object();
            if obj.is_none() {
                log::warn!("skipping object of unknown type {:?}", external.kind);
            }
            obj
        })
        .collect()
}
