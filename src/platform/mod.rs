//! Platform abstraction layer
//!
//! Browser bindings for the pure modules:
//! - `dom`: layout discovery and the DOM `ViewRenderer`
//! - `canvas`: Canvas 2D painter for the particle background
//!
//! Empty on native builds.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Milliseconds since the epoch, used to seed the simulations
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
