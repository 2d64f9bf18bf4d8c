//! 3D rendering for the globe view
//!
//! wgpu pipelines for the textured Earth, instanced satellite markers,
//! and track polylines, integrated with egui through a paint callback.

mod camera;
mod globe;
mod markers;
mod scene;

pub use camera::*;
pub use globe::*;
pub use markers::*;
pub use scene::*;
