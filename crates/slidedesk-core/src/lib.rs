//! SlideDesk Core Library
//!
//! Platform-agnostic data model, interaction logic and serialization for the
//! SlideDesk slide layout editor.

pub mod bridge;
pub mod controller;
pub mod editor;
pub mod input;
pub mod scene;
pub mod service;
pub mod shapes;
pub mod units;

pub use bridge::{ExternalObject, SlideDocument};
pub use controller::{CursorHint, InteractionController, InteractionState, Response, ToolKind};
pub use editor::{Editor, SlideInfo};
pub use input::PointerEvent;
pub use scene::Scene;
pub use service::{LocalService, ServiceError, SlideService};
pub use shapes::{
    ArrowDirection, HAlign, ObjectId, ObjectKind, PropertyEdit, SerializableColor, SlideObject,
    TextBody, VAlign,
};
