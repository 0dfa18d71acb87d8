//! Full-repaint drawing of a slide and its objects.

use crate::renderer::{Painter, RenderContext, TextRun};
use kurbo::{BezPath, Circle, Point, Rect, Shape, Stroke};
use peniko::Color;
use slidedesk_core::shapes::{ArrowDirection, HAlign, ObjectKind, SlideObject, TextBody, VAlign};
use slidedesk_core::units::{GRID_INTERVAL, SLIDE_HEIGHT, SLIDE_WIDTH, slide_device_size, to_device};

/// Padding between a box edge and its text.
const BOX_TEXT_INSET: f64 = 5.0;
/// Length of an arrow head along the pointing axis.
const ARROW_HEAD: f64 = 10.0;
/// Thickness of an arrow shaft.
const ARROW_SHAFT: f64 = 6.0;
/// Side of a selection handle square.
const HANDLE_SIZE: f64 = 6.0;
const GRID_STROKE: f64 = 0.5;
const PATH_TOLERANCE: f64 = 0.1;

/// Repaint the whole slide: background, grid, then every object in order.
pub fn paint_slide(painter: &mut dyn Painter, ctx: &RenderContext) {
    let size = slide_device_size();
    let page = Rect::from_origin_size(Point::ZERO, size);
    painter.fill(&page.to_path(PATH_TOLERANCE), ctx.background_color);

    if ctx.show_grid {
        paint_grid(painter, page, ctx.grid_color);
    }

    for (index, object) in ctx.scene.objects().iter().enumerate() {
        paint_object(painter, object, ctx.scene.is_selected(index), ctx);
    }
}

fn grid_steps(extent: f64) -> usize {
    (extent / GRID_INTERVAL + 1e-9).floor() as usize
}

fn paint_grid(painter: &mut dyn Painter, page: Rect, color: Color) {
    let stroke = Stroke::new(GRID_STROKE);
    let mut path = BezPath::new();

    for i in 0..=grid_steps(SLIDE_WIDTH) {
        let x = to_device(i as f64 * GRID_INTERVAL);
        path.move_to(Point::new(x, page.y0));
        path.line_to(Point::new(x, page.y1));
    }
    for i in 0..=grid_steps(SLIDE_HEIGHT) {
        let y = to_device(i as f64 * GRID_INTERVAL);
        path.move_to(Point::new(page.x0, y));
        path.line_to(Point::new(page.x1, y));
    }

    painter.stroke(&path, &stroke, color);
}

/// Draw one object, plus its selection decoration when `selected`.
pub fn paint_object(
    painter: &mut dyn Painter,
    object: &SlideObject,
    selected: bool,
    ctx: &RenderContext,
) {
    let bounds = object.device_bounds();
    let fill: Color = object.fill_color.into();

    match object.kind() {
        ObjectKind::Box(body) => {
            let path = bounds.to_path(PATH_TOLERANCE);
            painter.fill(&path, fill);
            if selected {
                painter.stroke(&path, &Stroke::new(3.0), ctx.selection_color);
            } else {
                painter.stroke(&path, &Stroke::new(1.0), ctx.border_color);
            }
            paint_box_text(painter, object, body, bounds);
        }
        ObjectKind::Arrow { direction } => {
            painter.fill(&arrow_path(bounds, *direction), fill);
            if selected {
                painter.stroke(
                    &bounds.to_path(PATH_TOLERANCE),
                    &Stroke::new(2.0),
                    ctx.selection_color,
                );
            }
        }
        ObjectKind::Line => {
            let mid = bounds.center().y;
            let mut path = BezPath::new();
            path.move_to(Point::new(bounds.x0, mid));
            path.line_to(Point::new(bounds.x1, mid));
            painter.stroke(&path, &Stroke::new(2.0), fill);
            if selected {
                let dashed = Stroke::new(2.0).with_dashes(0.0, [4.0, 4.0]);
                painter.stroke(&bounds.to_path(PATH_TOLERANCE), &dashed, ctx.selection_color);
            }
        }
        ObjectKind::Circle => {
            let radius = bounds.width().min(bounds.height()) / 2.0;
            let path = Circle::new(bounds.center(), radius).to_path(PATH_TOLERANCE);
            painter.fill(&path, fill);
            if selected {
                painter.stroke(&path, &Stroke::new(2.0), ctx.selection_color);
            } else {
                painter.stroke(&path, &Stroke::new(1.0), ctx.border_color);
            }
        }
        ObjectKind::Text(body) => {
            paint_free_text(painter, object, body, bounds);
            if selected {
                painter.stroke(
                    &bounds.to_path(PATH_TOLERANCE),
                    &Stroke::new(2.0),
                    ctx.selection_color,
                );
            }
        }
    }

    if selected {
        paint_handles(painter, bounds, ctx.selection_color);
    }
}

/// Box text: anchored by both alignments, with the line block centered on the anchor.
fn paint_box_text(painter: &mut dyn Painter, object: &SlideObject, body: &TextBody, bounds: Rect) {
    if body.text.is_empty() {
        return;
    }
    let anchor_x = match body.halign {
        HAlign::Left => bounds.x0 + BOX_TEXT_INSET,
        HAlign::Center => bounds.center().x,
        HAlign::Right => bounds.x1 - BOX_TEXT_INSET,
    };
    let anchor_y = match object.valign {
        VAlign::Top => bounds.y0 + BOX_TEXT_INSET,
        VAlign::Middle => bounds.center().y,
        VAlign::Bottom => bounds.y1 - BOX_TEXT_INSET,
    };

    let line_height = object.font_size + 4.0;
    let count = body.lines().count();
    let start_y = anchor_y - (count as f64 * line_height) / 2.0;
    let color: Color = body.font_color.into();

    for (idx, line) in body.lines().enumerate() {
        painter.text(&TextRun {
            text: line,
            anchor: Point::new(anchor_x, start_y + idx as f64 * line_height),
            font_size: object.font_size,
            color,
            halign: body.halign,
            baseline: object.valign,
        });
    }
}

/// Free text hangs from the top of its bounds.
fn paint_free_text(painter: &mut dyn Painter, object: &SlideObject, body: &TextBody, bounds: Rect) {
    let anchor_x = match body.halign {
        HAlign::Left => bounds.x0,
        HAlign::Center => bounds.center().x,
        HAlign::Right => bounds.x1,
    };
    let step = object.font_size + 2.0;
    let color: Color = body.font_color.into();

    for (idx, line) in body.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        painter.text(&TextRun {
            text: line,
            anchor: Point::new(anchor_x, bounds.y0 + idx as f64 * step),
            font_size: object.font_size,
            color,
            halign: body.halign,
            baseline: VAlign::Top,
        });
    }
}

/// Shaft rectangle plus triangular head, pointing toward `direction`.
fn arrow_path(bounds: Rect, direction: ArrowDirection) -> BezPath {
    let Rect { x0, y0, x1, y1 } = bounds;
    let center = bounds.center();
    let half = ARROW_SHAFT / 2.0;

    let (shaft, head) = match direction {
        ArrowDirection::Right => (
            Rect::new(x0, center.y - half, x1 - ARROW_HEAD, center.y + half),
            [
                Point::new(x1 - ARROW_HEAD, y0),
                Point::new(x1, center.y),
                Point::new(x1 - ARROW_HEAD, y1),
            ],
        ),
        ArrowDirection::Left => (
            Rect::new(x0 + ARROW_HEAD, center.y - half, x1, center.y + half),
            [
                Point::new(x0 + ARROW_HEAD, y0),
                Point::new(x0, center.y),
                Point::new(x0 + ARROW_HEAD, y1),
            ],
        ),
        ArrowDirection::Down => (
            Rect::new(center.x - half, y0, center.x + half, y1 - ARROW_HEAD),
            [
                Point::new(x0, y1 - ARROW_HEAD),
                Point::new(center.x, y1),
                Point::new(x1, y1 - ARROW_HEAD),
            ],
        ),
        ArrowDirection::Up => (
            Rect::new(center.x - half, y0 + ARROW_HEAD, center.x + half, y1),
            [
                Point::new(x0, y0 + ARROW_HEAD),
                Point::new(center.x, y0),
                Point::new(x1, y0 + ARROW_HEAD),
            ],
        ),
    };

    let mut path = shaft.to_path(PATH_TOLERANCE);
    path.move_to(head[0]);
    path.line_to(head[1]);
    path.line_to(head[2]);
    path.close_path();
    path
}

fn paint_handles(painter: &mut dyn Painter, bounds: Rect, color: Color) {
    let half = HANDLE_SIZE / 2.0;
    let corners = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x0, bounds.y1),
        Point::new(bounds.x1, bounds.y1),
    ];
    for corner in corners {
        let handle = Rect::new(corner.x - half, corner.y - half, corner.x + half, corner.y + half);
        painter.fill(&handle.to_path(PATH_TOLERANCE), color);
    }
}
