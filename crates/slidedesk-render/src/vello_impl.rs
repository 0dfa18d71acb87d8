//! Vello-based renderer implementation.

use crate::renderer::{Painter, RenderContext, Renderer, TextRun};
use crate::slide::paint_slide;
use kurbo::{Affine, BezPath, Size, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use slidedesk_core::scene::Scene as SlideScene;
use slidedesk_core::shapes::{HAlign, VAlign};
use slidedesk_core::units::slide_device_size;
use vello::Scene;

/// Generic family list used for every slide text run.
const FONT_STACK: &str = "Arial, Helvetica, sans-serif";

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering, reused across frames.
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Slide device space to scene space for the frame being built.
    transform: Affine,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            transform: Affine::IDENTITY,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Build an offscreen scene of the whole slide at `scale` pixels per device
    /// pixel, as the editor currently shows it. Returns the scene and its pixel size.
    pub fn build_export_scene(&mut self, slide: &SlideScene, scale: f64) -> (Scene, Size) {
        let ctx = RenderContext::new(slide).with_transform(Affine::scale(scale));
        self.build_scene(&ctx);
        let size = slide_device_size();
        (
            self.take_scene(),
            Size::new((size.width * scale).ceil(), (size.height * scale).ceil()),
        )
    }

    /// Lay out one line and draw its glyphs so the line box sits on the anchor.
    fn render_text(&mut self, run: &TextRun<'_>) {
        if run.text.is_empty() {
            return;
        }
        let brush = Brush::Solid(run.color);

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, run.text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(run.font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(
            FONT_STACK.into(),
        )));
        let mut layout = builder.build(run.text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let width = layout.width() as f64;
        let height = layout.height() as f64;
        let dx = match run.halign {
            HAlign::Left => 0.0,
            HAlign::Center => -width / 2.0,
            HAlign::Right => -width,
        };
        let dy = match run.baseline {
            VAlign::Top => 0.0,
            VAlign::Middle => -height / 2.0,
            VAlign::Bottom => -height,
        };
        let text_transform =
            self.transform * Affine::translate((run.anchor.x + dx, run.anchor.y + dy));

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let parley_run = glyph_run.run();
                let font = parley_run.font();
                let font_size = parley_run.font_size();
                let glyph_xform = parley_run
                    .synthesis()
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(parley_run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        if glyph_count == 0 {
            log::debug!("no glyphs shaped for {:?}; is a system font available?", run.text);
        }
    }
}

impl Painter for VelloRenderer {
    fn fill(&mut self, path: &BezPath, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, color, None, path);
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.scene.stroke(stroke, self.transform, color, None, path);
    }

    fn text(&mut self, run: &TextRun<'_>) {
        self.render_text(run);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.transform = ctx.transform;
        paint_slide(self, ctx);
    }
}
