//! Application errors.

use slidedesk_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error("Window creation failed: {0}")]
    Window(String),
    #[error("Surface creation failed: {0}")]
    Surface(String),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("PNG encoding failed: {0}")]
    Png(String),
}
