//! In-process implementation of the slide services.

use super::{
    BoxFuture, CanonicalObject, ExportedJson, SavedScreenshot, ScreenshotStore, ServiceError,
    ServiceResult, SlideService, canonical,
};
use crate::bridge::{ExternalObject, SlideDocument};
use std::path::PathBuf;

/// Performs the canonical JSON conversion and screenshot writes locally.
#[derive(Debug, Clone)]
pub struct LocalService {
    screenshots: ScreenshotStore,
}

impl LocalService {
    pub fn new(screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            screenshots: ScreenshotStore::new(screenshot_dir),
        }
    }

    pub fn screenshots(&self) -> &ScreenshotStore {
        &self.screenshots
    }

    pub fn export_now(&self, document: &SlideDocument) -> ServiceResult<ExportedJson> {
        let json = canonical::to_canonical(document);
        let json_string =
            serde_json::to_string_pretty(&json).map_err(|e| ServiceError::Parse(e.to_string()))?;
        Ok(ExportedJson { json, json_string })
    }

    pub fn load_now(&self, json_string: &str) -> ServiceResult<SlideDocument> {
        let slide = canonical::parse_canonical(json_string)?;
        Ok(canonical::from_canonical(slide))
    }

    pub fn batch_now(&self, objects: &[ExternalObject]) -> ServiceResult<Vec<CanonicalObject>> {
        if objects.is_empty() {
            return Err(ServiceError::Required("objects"));
        }
        Ok(canonical::to_canonical_objects(objects))
    }
}

impl SlideService for LocalService {
    fn export_json(&self, document: SlideDocument) -> BoxFuture<'_, ServiceResult<ExportedJson>> {
        Box::pin(async move { self.export_now(&document) })
    }

    fn load_json(&self, json_string: String) -> BoxFuture<'_, ServiceResult<SlideDocument>> {
        Box::pin(async move { self.load_now(&json_string) })
    }

    fn save_screenshot(&self, image_data: String) -> BoxFuture<'_, ServiceResult<SavedScreenshot>> {
        Box::pin(async move { self.screenshots.save(&image_data) })
    }

    fn batch_convert(
        &self,
        objects: Vec<ExternalObject>,
    ) -> BoxFuture<'_, ServiceResult<Vec<CanonicalObject>>> {
        Box::pin(async move { self.batch_now(&objects) })
    }
}
