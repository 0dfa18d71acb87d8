//! SlideDesk Application
//!
//! The desktop shell: windowing, input routing, egui panels and the
//! background service calls around the core editor.

mod actions;
mod app;
mod canvas_view;
mod capture;
mod config;
mod error;
mod jobs;
mod shortcuts;
mod ui;

pub use app::App;
pub use config::AppConfig;
pub use error::AppError;
pub use ui::{EditorView, Notification, NotificationKind, UiAction, UiState, render_ui};
