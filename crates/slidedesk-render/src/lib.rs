//! SlideDesk Render Library
//!
//! Painter abstraction, the full-repaint slide painter, and a Vello backend.

mod renderer;
mod slide;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{
    Painter, RenderContext, RenderResult, Renderer, RendererError, TextRun, palette,
};
pub use slide::{paint_object, paint_slide};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{PngRenderResult, VelloRenderer};
