//! Application configuration.

use std::path::PathBuf;

pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";
/// Default name offered when saving the exported slide JSON.
pub const JSON_ARTIFACT_NAME: &str = "01_content.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Where captured screenshots are written.
    pub screenshot_dir: PathBuf,
    pub json_file_name: String,
    /// Gap between the panels and the slide, in logical pixels.
    pub canvas_margin: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SlideDesk".to_string(),
            width: 1600,
            height: 1000,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            json_file_name: JSON_ARTIFACT_NAME.to_string(),
            canvas_margin: 16.0,
        }
    }
}

impl AppConfig {
    /// Defaults, with `SLIDEDESK_SCREENSHOT_DIR` overriding the screenshot directory.
    pub fn from_env() -> Self {
        Self::default().with_screenshot_dir(std::env::var("SLIDEDESK_SCREENSHOT_DIR").ok())
    }

    fn with_screenshot_dir(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()) {
            self.screenshot_dir = PathBuf::from(dir);
        }
        self
    }
}
