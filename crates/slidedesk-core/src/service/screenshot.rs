//! Screenshot persistence.

use super::{ServiceError, ServiceResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};

/// A screenshot written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedScreenshot {
    /// Base64 payload as received, without any `data:` prefix.
    pub data: String,
    /// File name inside the screenshot directory.
    pub filename: String,
    /// ISO-8601 local time of the save.
    pub timestamp: String,
}

/// Wrap PNG bytes as a `data:image/png;base64,` URL.
pub fn encode_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Writes screenshots as timestamped PNG files into one directory.
///
/// The directory is created on first save.
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    base_path: PathBuf,
}

impl ScreenshotStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Decode `image_data` (base64, optionally a `data:` URL) and write it as
    /// `canvas_<YYYYmmdd_HHMMSS_micros>.png`.
    pub fn save(&self, image_data: &str) -> ServiceResult<SavedScreenshot> {
        let payload = strip_data_url(image_data.trim());
        if payload.is_empty() {
            return Err(ServiceError::Required("imageData"));
        }
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ServiceError::Decode(e.to_string()))?;

        fs::create_dir_all(&self.base_path).map_err(|e| {
            ServiceError::Io(format!(
                "Failed to create {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let now = chrono::Local::now();
        let filename = format!("canvas_{}.png", now.format("%Y%m%d_%H%M%S_%6f"));
        let path = self.base_path.join(&filename);
        fs::write(&path, &bytes).map_err(|e| {
            ServiceError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("saved screenshot {} ({} bytes)", path.display(), bytes.len());

        Ok(SavedScreenshot {
            data: payload.to_string(),
            filename,
            timestamp: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        })
    }
}

fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        data.split_once(',').map(|(_, rest)| rest).unwrap_or("")
    } else {
        data
    }
}
