//! JSON request and response envelopes for the HTTP form of the services.

use super::{CanonicalObject, CanonicalSlide, ExportedJson, SavedScreenshot, ServiceResult};
use crate::bridge::{ExternalObject, SlideDocument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    #[serde(default)]
    pub json_string: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequest {
    #[serde(default)]
    pub image_data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub objects: Vec<ExternalObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<CanonicalSlide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ServiceResult<ExportedJson>> for ExportResponse {
    fn from(result: ServiceResult<ExportedJson>) -> Self {
        match result {
            Ok(exported) => Self {
                success: true,
                json: Some(exported.json),
                json_string: Some(exported.json_string),
                error: None,
            },
            Err(e) => Self {
                success: false,
                json: None,
                json_string: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `{success, title, subtitle, slideIndex, objects}` or `{success, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub document: Option<SlideDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ServiceResult<SlideDocument>> for ImportResponse {
    fn from(result: ServiceResult<SlideDocument>) -> Self {
        match result {
            Ok(document) => Self {
                success: true,
                document: Some(document),
                error: None,
            },
            Err(e) => Self {
                success: false,
                document: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ServiceResult<SavedScreenshot>> for ScreenshotResponse {
    fn from(result: ServiceResult<SavedScreenshot>) -> Self {
        match result {
            Ok(saved) => Self {
                success: true,
                data: Some(saved.data),
                filename: Some(saved.filename),
                timestamp: Some(saved.timestamp),
                error: None,
            },
            Err(e) => Self {
                success: false,
                data: None,
                filename: None,
                timestamp: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<CanonicalObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ServiceResult<Vec<CanonicalObject>>> for BatchResponse {
    fn from(result: ServiceResult<Vec<CanonicalObject>>) -> Self {
        match result {
            Ok(objects) => Self {
                success: true,
                count: Some(objects.len()),
                objects: Some(objects),
                error: None,
            },
            Err(e) => Self {
                success: false,
                count: None,
                objects: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;

    #[test]
    fn test_import_response_is_flat() {
        let response = ImportResponse::from(Ok(SlideDocument {
            title: "T".into(),
            subtitle: "S".into(),
            slide_index: 4,
            objects: Vec::new(),
        }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["title"], "T");
        assert_eq!(value["slideIndex"], 4);
        assert!(value["objects"].is_array());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let response = ScreenshotResponse::from(Err(ServiceError::Required("imageData")));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "imageData is required");
        assert!(value.get("filename").is_none());
    }

    #[test]
    fn test_requests_tolerate_missing_fields() {
        let load: LoadRequest = serde_json::from_str("{}").unwrap();
        assert!(load.json_string.is_empty());
        let shot: ScreenshotRequest = serde_json::from_str(r#"{"imageData": "abc"}"#).unwrap();
        assert_eq!(shot.image_data, "abc");
    }
}
