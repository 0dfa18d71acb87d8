//! Conversion between slide inches and device pixels.

use kurbo::Size;

/// Device units (pixels) per physical inch.
pub const RESOLUTION: f64 = 96.0;

/// Slide width in inches.
pub const SLIDE_WIDTH: f64 = 12.8;

/// Slide height in inches.
pub const SLIDE_HEIGHT: f64 = 7.2;

/// Spacing of the reference grid in inches.
pub const GRID_INTERVAL: f64 = 0.5;

/// Convert a physical length in inches to device pixels.
pub fn to_device(inches: f64) -> f64 {
    inches * RESOLUTION
}

/// Convert a device length in pixels to inches, rounded to 3 decimals.
pub fn to_physical(device: f64) -> f64 {
    round3(device / RESOLUTION)
}

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Slide extent in device pixels.
pub fn slide_device_size() -> Size {
    Size::new(to_device(SLIDE_WIDTH), to_device(SLIDE_HEIGHT))
}
