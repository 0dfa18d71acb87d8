//! Pointer interaction state machine: create, select and drag.

use crate::input::{MouseButton, PointerEvent};
use crate::scene::Scene;
use crate::shapes::{ArrowDirection, ObjectKind, SlideObject};
use crate::units::{SLIDE_HEIGHT, SLIDE_WIDTH, to_physical};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Creation tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Box,
    Arrow(ArrowDirection),
    Line,
    Circle,
    Text,
}

impl ToolKind {
    /// Tools in toolbar order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Box,
        ToolKind::Arrow(ArrowDirection::Right),
        ToolKind::Arrow(ArrowDirection::Left),
        ToolKind::Arrow(ArrowDirection::Up),
        ToolKind::Arrow(ArrowDirection::Down),
        ToolKind::Line,
        ToolKind::Circle,
        ToolKind::Text,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Box => "Box",
            ToolKind::Arrow(ArrowDirection::Right) => "Arrow →",
            ToolKind::Arrow(ArrowDirection::Left) => "Arrow ←",
            ToolKind::Arrow(ArrowDirection::Up) => "Arrow ↑",
            ToolKind::Arrow(ArrowDirection::Down) => "Arrow ↓",
            ToolKind::Line => "Line",
            ToolKind::Circle => "Circle",
            ToolKind::Text => "Text",
        }
    }

    /// The object kind this tool places, with its default style.
    pub fn object_kind(self) -> ObjectKind {
        match self {
            ToolKind::Box => ObjectKind::boxed(),
            ToolKind::Arrow(direction) => ObjectKind::arrow(direction),
            ToolKind::Line => ObjectKind::Line,
            ToolKind::Circle => ObjectKind::Circle,
            ToolKind::Text => ObjectKind::text(),
        }
    }
}

/// Cursor the host should show over the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    Move,
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Waiting for a press to place a new object.
    Creating(ToolKind),
    /// Moving the object at `index`. `offset` is the pointer position minus
    /// the object's device origin at press time.
    Dragging { index: usize, offset: Vec2 },
}

/// Outcome of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    /// The scene or selection changed; repaint and refresh the property panel.
    pub changed: bool,
    pub cursor: CursorHint,
}

/// Translates pointer events into scene mutations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    cursor: CursorHint,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Arm a creation tool; the next press places an object.
    pub fn begin_create(&mut self, tool: ToolKind) {
        self.state = InteractionState::Creating(tool);
        self.cursor = CursorHint::Crosshair;
    }

    /// The armed creation tool, if any.
    pub fn pending_tool(&self) -> Option<ToolKind> {
        match self.state {
            InteractionState::Creating(tool) => Some(tool),
            _ => None,
        }
    }

    /// Return to idle from any state. Returns true if something was aborted.
    pub fn cancel(&mut self) -> bool {
        let was_busy = self.state != InteractionState::Idle;
        self.state = InteractionState::Idle;
        self.cursor = CursorHint::Default;
        was_busy
    }

    pub fn handle(&mut self, scene: &mut Scene, event: PointerEvent) -> Response {
        let changed = match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.press(scene, position),
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => self.pointer_moved(scene, position),
            PointerEvent::Up { .. } => {
                if matches!(self.state, InteractionState::Dragging { .. }) {
                    self.state = InteractionState::Idle;
                }
                false
            }
        };
        Response {
            changed,
            cursor: self.cursor,
        }
    }

    fn press(&mut self, scene: &mut Scene, position: Point) -> bool {
        if let InteractionState::Creating(tool) = self.state {
            let object = SlideObject::new(
                tool.object_kind(),
                to_physical(position.x),
                to_physical(position.y),
                SlideObject::DEFAULT_WIDTH,
                SlideObject::DEFAULT_HEIGHT,
            );
            log::debug!("placing {} at ({}, {})", object.kind().name(), object.left, object.top);
            let index = scene.add(object);
            scene.select(Some(index));
            self.state = InteractionState::Idle;
            self.cursor = CursorHint::Default;
            return true;
        }

        match scene.object_at(position) {
            Some(index) => {
                scene.select(Some(index));
                let origin = scene
                    .get(index)
                    .map(|obj| obj.device_bounds().origin())
                    .unwrap_or(position);
                self.state = InteractionState::Dragging {
                    index,
                    offset: position - origin,
                };
                self.cursor = CursorHint::Move;
            }
            None => {
                scene.select(None);
                self.state = InteractionState::Idle;
            }
        }
        true
    }

    fn pointer_moved(&mut self, scene: &mut Scene, position: Point) -> bool {
        match self.state {
            InteractionState::Creating(_) => {
                self.cursor = CursorHint::Crosshair;
                false
            }
            InteractionState::Dragging { index, offset } => {
                let Some(obj) = scene.get_mut(index) else {
                    self.state = InteractionState::Idle;
                    return false;
                };
                let target = position - offset;
                obj.left = clamp_axis(to_physical(target.x), SLIDE_WIDTH - obj.width);
                obj.top = clamp_axis(to_physical(target.y), SLIDE_HEIGHT - obj.height);
                self.cursor = CursorHint::Move;
                true
            }
            InteractionState::Idle => {
                self.cursor = if scene.object_at(position).is_some() {
                    CursorHint::Move
                } else {
                    CursorHint::Default
                };
                false
            }
        }
    }
}

/// Clamp into `[0, max]`. An object larger than the slide pins to 0.
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
