//! Placement of the slide inside the window.

use kurbo::{Affine, Point, Rect, Vec2};
use slidedesk_core::units::slide_device_size;

/// Where the slide sits in the window. The slide is drawn at one device
/// pixel per logical pixel, so only the origin and the window scale matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Top-left of the slide, in logical window pixels.
    pub origin: Vec2,
    /// Physical pixels per logical pixel.
    pub scale_factor: f64,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scale_factor: 1.0,
        }
    }
}

impl CanvasView {
    pub fn new(origin: Vec2, scale_factor: f64) -> Self {
        Self {
            origin,
            scale_factor,
        }
    }

    /// Slide device space to physical surface pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * Affine::translate(self.origin)
    }

    /// Map a physical window position to slide device coordinates.
    pub fn to_slide(&self, physical: Point) -> Point {
        let logical = Point::new(
            physical.x / self.scale_factor,
            physical.y / self.scale_factor,
        );
        logical - self.origin
    }

    /// Whether a slide-space point lies on the slide.
    pub fn contains(&self, slide_point: Point) -> bool {
        let page = Rect::from_origin_size(Point::ZERO, slide_device_size());
        slide_point.x >= page.x0
            && slide_point.x <= page.x1
            && slide_point.y >= page.y0
            && slide_point.y <= page.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slide_subtracts_origin() {
        let view = CanvasView::new(Vec2::new(20.0, 60.0), 1.0);
        let p = view.to_slide(Point::new(116.0, 156.0));
        assert!((p.x - 96.0).abs() < 1e-9);
        assert!((p.y - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_slide_hidpi() {
        let view = CanvasView::new(Vec2::new(10.0, 10.0), 2.0);
        let p = view.to_slide(Point::new(212.0, 40.0));
        assert!((p.x - 96.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_inverts_mapping() {
        let view = CanvasView::new(Vec2::new(30.0, 45.0), 1.5);
        let slide_point = Point::new(200.0, 100.0);
        let physical = view.transform() * slide_point;
        let back = view.to_slide(physical);
        assert!((back.x - slide_point.x).abs() < 1e-9);
        assert!((back.y - slide_point.y).abs() < 1e-9);
    }

    #[test]
    fn test_contains() {
        let view = CanvasView::default();
        assert!(view.contains(Point::new(0.0, 0.0)));
        assert!(view.contains(Point::new(1228.8, 691.2)));
        assert!(!view.contains(Point::new(-1.0, 10.0)));
        assert!(!view.contains(Point::new(10.0, 700.0)));
    }
}
