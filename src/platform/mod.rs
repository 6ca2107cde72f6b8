//! Platform abstraction layer
//!
//! Handles host-facing concerns that sit between the browser and the sim:
//! - Frame loop driver (dt measurement and clamping)
//! - Input events folded into one debounced activate pulse
//! - Startup errors

pub mod clock;
pub mod input;

pub use clock::{Frame, GameLoop};
pub use input::{EdgeDetector, InputSource, KeyboardSource};

use thiserror::Error;

/// Fatal host setup failures
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("canvas element `{0}` not found")]
    NoCanvas(String),
    #[error("2D drawing context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PlatformError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js(format!("{:?}", value))
    }
}
