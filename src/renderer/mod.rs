//! WebGPU rendering module
//!
//! Draws the blaster scene. Geometry is projected on the CPU (`scene`), the
//! GPU pipeline only rasterizes coloured triangles (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use pipeline::SceneRenderer;
pub use scene::build_scene;
pub use vertex::Vertex;
