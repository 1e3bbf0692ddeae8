//! WebGPU rendering module
//!
//! The scene is rebuilt as a colored triangle list every frame and drawn
//! with a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
