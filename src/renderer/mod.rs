//! WebGPU rendering module
//!
//! Draws the confetti overlay on a transparent canvas above the card.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::OverlayRenderState;
pub use shapes::confetti_vertices;
pub use vertex::Vertex;
