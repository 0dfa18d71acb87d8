//! Router and request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use slidedesk_core::service::ServiceResult;
use slidedesk_core::service::wire::{
    BatchRequest, BatchResponse, ExportResponse, ImportResponse, LoadRequest, ScreenshotRequest,
    ScreenshotResponse,
};
use slidedesk_core::{LocalService, ServiceError, SlideDocument, SlideService};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared server state.
pub struct AppState {
    service: LocalService,
}

impl AppState {
    pub fn new(service: LocalService) -> Self {
        Self { service }
    }
}

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/export-json", post(export_json))
        .route("/api/load-json", post(load_json))
        .route("/api/canvas/screenshot", post(save_screenshot))
        .route("/api/batch-add", post(batch_add))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Client mistakes are 400; only failed writes are the server's fault.
fn service_error_to_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Required(_)
        | ServiceError::Parse(_)
        | ServiceError::MissingObjects
        | ServiceError::ObjectsNotArray
        | ServiceError::Decode(_) => StatusCode::BAD_REQUEST,
    }
}

fn reply<T, R>(route: &str, result: ServiceResult<T>) -> (StatusCode, Json<R>)
where
    R: From<ServiceResult<T>>,
{
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!("{} failed: {}", route, e);
            service_error_to_status(e)
        }
    };
    (status, Json(R::from(result)))
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// `POST /api/export-json`
async fn export_json(
    State(state): State<SharedState>,
    Json(document): Json<SlideDocument>,
) -> (StatusCode, Json<ExportResponse>) {
    info!(
        "export-json: slide {} with {} objects",
        document.slide_index,
        document.objects.len()
    );
    let result = state.service.export_json(document).await;
    reply("export-json", result)
}

/// `POST /api/load-json`
async fn load_json(
    State(state): State<SharedState>,
    Json(request): Json<LoadRequest>,
) -> (StatusCode, Json<ImportResponse>) {
    let result = state.service.load_json(request.json_string).await;
    if let Ok(document) = &result {
        info!("load-json: {} objects", document.objects.len());
    }
    reply("load-json", result)
}

/// `POST /api/canvas/screenshot`
async fn save_screenshot(
    State(state): State<SharedState>,
    Json(request): Json<ScreenshotRequest>,
) -> (StatusCode, Json<ScreenshotResponse>) {
    // Decoding and the file write block, so they run off the async workers.
    let store = state.service.screenshots().clone();
    let result = tokio::task::spawn_blocking(move || store.save(&request.image_data))
        .await
        .unwrap_or_else(|e| Err(ServiceError::Io(format!("Screenshot task failed: {e}"))));
    reply("screenshot", result)
}

/// `POST /api/batch-add`
async fn batch_add(
    State(state): State<SharedState>,
    Json(request): Json<BatchRequest>,
) -> (StatusCode, Json<BatchResponse>) {
    let result = state.service.batch_convert(request.objects).await;
    reply("batch-add", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidedesk_core::ExternalObject;
    use tempfile::tempdir;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+P+/HgAFhAJ/wlseKgAAAABJRU5ErkJggg==";

    fn state_in(dir: &std::path::Path) -> SharedState {
        Arc::new(AppState::new(LocalService::new(dir)))
    }

    fn sample_document() -> SlideDocument {
        serde_json::from_value(serde_json::json!({
            "title": "Plan",
            "subtitle": "Q3",
            "slideIndex": 2,
            "objects": [
                {"type": "box", "left": 1.0, "top": 1.0, "width": 2.0, "height": 1.0,
                 "fillColor": "#4472c4", "text": "Go", "fontColor": "#ffffff",
                 "fontSize": 14, "valign": "top", "halign": "left"},
                {"type": "arrow", "direction": "up", "left": 4.0, "top": 1.0,
                 "width": 0.5, "height": 1.0, "fillColor": "#ED7D31"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_export_json_handler() {
        let dir = tempdir().unwrap();
        let (status, Json(body)) =
            export_json(State(state_in(dir.path())), Json(sample_document())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);

        let json = body.json.unwrap();
        assert_eq!(json.index, 2);
        assert_eq!(json.objects.len(), 2);
        let text = body.json_string.unwrap();
        assert!(text.contains("\"fill_color\": \"4472C4\""));
        assert!(text.contains("\"h_align\": \"left\""));
        assert!(text.contains("\"direction\": \"up\""));
    }

    #[tokio::test]
    async fn test_export_then_load() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let (_, Json(exported)) = export_json(State(state.clone()), Json(sample_document())).await;

        let request = LoadRequest {
            json_string: exported.json_string.unwrap(),
        };
        let (status, Json(body)) = load_json(State(state), Json(request)).await;
        assert_eq!(status, StatusCode::OK);
        let document = body.document.unwrap();
        assert_eq!(document.title, "Plan");
        assert_eq!(document.slide_index, 2);
        assert_eq!(document.objects.len(), 2);
        assert_eq!(document.objects[0].fill_color.as_deref(), Some("#4472C4"));
        assert_eq!(document.objects[1].direction.as_deref(), Some("up"));
    }

    #[tokio::test]
    async fn test_load_json_errors_are_bad_request() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        for input in ["", "not json", "{\"title\": \"x\"}", "{\"objects\": {}}"] {
            let request = LoadRequest {
                json_string: input.to_string(),
            };
            let (status, Json(body)) = load_json(State(state.clone()), Json(request)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "input {input:?}");
            assert!(!body.success);
            assert!(body.error.is_some());
        }
    }

    #[tokio::test]
    async fn test_screenshot_handler_writes_file() {
        let dir = tempdir().unwrap();
        let request = ScreenshotRequest {
            image_data: format!("data:image/png;base64,{PNG_1X1}"),
        };
        let (status, Json(body)) = save_screenshot(State(state_in(dir.path())), Json(request)).await;
        assert_eq!(status, StatusCode::OK);
        let filename = body.filename.unwrap();
        assert!(dir.path().join(&filename).exists());
        assert_eq!(body.data.as_deref(), Some(PNG_1X1));
    }

    #[tokio::test]
    async fn test_screenshot_write_failure_is_server_error() {
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("not_a_dir");
        std::fs::write(&blocked, b"file").unwrap();
        let request = ScreenshotRequest {
            image_data: PNG_1X1.to_string(),
        };
        let (status, Json(body)) = save_screenshot(State(state_in(&blocked)), Json(request)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.unwrap().starts_with("IO error: Failed to create"));
    }

    #[tokio::test]
    async fn test_screenshot_requires_image() {
        let dir = tempdir().unwrap();
        let (status, Json(body)) =
            save_screenshot(State(state_in(dir.path())), Json(ScreenshotRequest::default())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("imageData is required"));
    }

    #[tokio::test]
    async fn test_batch_add_handler() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let (status, Json(body)) =
            batch_add(State(state.clone()), Json(BatchRequest::default())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("objects is required"));

        let request = BatchRequest {
            objects: vec![
                ExternalObject {
                    kind: "line".into(),
                    width: 2.0,
                    height: 0.1,
                    ..Default::default()
                },
                ExternalObject {
                    kind: "hexagon".into(),
                    ..Default::default()
                },
            ],
        };
        let (status, Json(body)) = batch_add(State(state), Json(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.count, Some(1));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            service_error_to_status(&ServiceError::MissingObjects),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            service_error_to_status(&ServiceError::Io("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
