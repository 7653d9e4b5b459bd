//! Windowed wgpu backend for the render engine boundary.
//!
//! Desktop preview of the scene: primitives render through instanced
//! pipelines, panels replay through egui, the mouse stands in for a
//! controller ray. Suited to running the demo without a headset.
//!
//! # Invariants
//! - `step` pumps the event loop exactly once; all window and device events
//!   are handled inside the pump, never between frames.
//! - GPU resources come up inside the first pump. A bring-up failure
//!   surfaces as the next `step`'s error, and the frame callback never runs
//!   on a session that failed to come up.
//! - Frame buckets are cleared at frame start; nothing drawn in one frame
//!   leaks into the next.

pub mod backend;
pub mod camera;
pub mod gpu;
pub mod mesh;
pub mod panel;
pub mod pick;
pub mod shaders;

pub use backend::WgpuEngine;
pub use camera::{CameraMoves, FlyCamera};

pub fn crate_info() -> &'static str {
    "shapeyard-engine-wgpu v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("engine-wgpu"));
    }
}
