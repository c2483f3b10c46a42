//! Browser host for the field animator.
//!
//! `mountField(canvasId, scene?, configToml?, seed?)` sizes the canvas to the
//! window, starts a `requestAnimationFrame` loop drawing through the canvas
//! 2D context and follows window resizes until the returned handle is torn
//! down. Everything except [`viewport_from_inner`] only exists on wasm32.

use animator::Viewport;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod mount;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use host::WebHost;
#[cfg(target_arch = "wasm32")]
pub use mount::{mount_field, FieldHandle};

/// Converts `window.innerWidth/innerHeight` into a viewport. Missing,
/// negative or non-finite values count as zero.
pub fn viewport_from_inner(width: Option<f64>, height: Option<f64>) -> Viewport {
    fn pixels(value: Option<f64>) -> u32 {
        match value {
            Some(value) if value.is_finite() && value > 0.0 => value.min(u32::MAX as f64) as u32,
            _ => 0,
        }
    }
    Viewport::new(pixels(width), pixels(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_size_truncates_to_pixels() {
        assert_eq!(
            viewport_from_inner(Some(1280.7), Some(720.2)),
            Viewport::new(1280, 720)
        );
    }

    #[test]
    fn unusable_inner_size_is_empty() {
        assert!(viewport_from_inner(None, Some(600.0)).is_empty());
        assert!(viewport_from_inner(Some(f64::NAN), Some(600.0)).is_empty());
        assert!(viewport_from_inner(Some(800.0), Some(-1.0)).is_empty());
    }
}
