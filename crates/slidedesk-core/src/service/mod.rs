//! Service contracts for JSON export/import and screenshot capture.

mod canonical;
mod local;
mod screenshot;
pub mod wire;

pub use canonical::{
    CanonicalObject, CanonicalSlide, from_canonical, parse_canonical, to_canonical,
    to_canonical_objects,
};
pub use local::LocalService;
pub use screenshot::{SavedScreenshot, ScreenshotStore, encode_data_url};

use crate::bridge::{ExternalObject, SlideDocument};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Invalid JSON: {0}")]
    Parse(String),
    #[error("Document has no objects array")]
    MissingObjects,
    #[error("objects must be an array")]
    ObjectsNotArray,
    #[error("Invalid image data: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boxed future for service calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Canonical export produced by the JSON service.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedJson {
    pub json: CanonicalSlide,
    /// Pretty-printed form, ready to show or save as `01_content.json`.
    pub json_string: String,
}

/// The JSON and screenshot services the editor talks to.
///
/// Calls are independent requests; the editor never issues two at once from
/// the same control but does not rely on that.
pub trait SlideService: Send + Sync {
    /// Convert an editor document to canonical form.
    fn export_json(&self, document: SlideDocument) -> BoxFuture<'_, ServiceResult<ExportedJson>>;

    /// Parse user-supplied canonical JSON text back into an editor document.
    fn load_json(&self, json_string: String) -> BoxFuture<'_, ServiceResult<SlideDocument>>;

    /// Persist a PNG screenshot given as base64 or a `data:` URL.
    fn save_screenshot(&self, image_data: String) -> BoxFuture<'_, ServiceResult<SavedScreenshot>>;

    /// Convert a batch of editor objects to canonical objects.
    fn batch_convert(
        &self,
        objects: Vec<ExternalObject>,
    ) -> BoxFuture<'_, ServiceResult<Vec<CanonicalObject>>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
