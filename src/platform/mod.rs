//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Viewport size tracking
//! - The DOM card (web only)

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod viewport;

pub use viewport::ViewportTracker;
