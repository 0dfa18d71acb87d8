//! Renderer trait abstraction.

use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Color;
use slidedesk_core::scene::Scene;
use slidedesk_core::shapes::{HAlign, VAlign};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Fixed editor colors.
pub mod palette {
    use peniko::Color;

    /// Slide background (#f9f9f9).
    pub const BACKGROUND: Color = Color::from_rgb8(0xF9, 0xF9, 0xF9);
    /// Reference grid (#e0e0e0).
    pub const GRID: Color = Color::from_rgb8(0xE0, 0xE0, 0xE0);
    /// Unselected borders (#cccccc).
    pub const BORDER: Color = Color::from_rgb8(0xCC, 0xCC, 0xCC);
    /// Selection outline and handles (#4472C4).
    pub const SELECTION: Color = Color::from_rgb8(0x44, 0x72, 0xC4);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Slide device space to surface space.
    pub transform: Affine,
    pub background_color: Color,
    pub grid_color: Color,
    pub show_grid: bool,
    pub selection_color: Color,
    pub border_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            transform: Affine::IDENTITY,
            background_color: palette::BACKGROUND,
            grid_color: palette::GRID,
            show_grid: true,
            selection_color: palette::SELECTION,
            border_color: palette::BORDER,
        }
    }

    /// Place the slide on the surface.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }
}

/// One line of text anchored at a point, in the manner of a 2D canvas
/// `fillText`: `halign` picks which edge of the line sits on the anchor and
/// `baseline` picks top, middle or bottom of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub anchor: Point,
    pub font_size: f64,
    pub color: Color,
    pub halign: HAlign,
    pub baseline: VAlign,
}

/// Drawing primitives in slide device coordinates.
pub trait Painter {
    fn fill(&mut self, path: &BezPath, color: Color);

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    fn text(&mut self, run: &TextRun<'_>);
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame. Every call repaints the whole slide.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
