//! Render engine adapter: the boundary the demo draws and reads input through.
//!
//! # Invariants
//! - The core never talks to a concrete backend; everything flows through the
//!   `Engine` and `FrameServices` traits.
//! - The adapter owns the thread and the frame cadence; `step` runs exactly
//!   one frame per call.
//! - Model handles are only meaningful to the backend that created them.
//!
//! The headless backend in this crate records every draw and answers scripted
//! input, which is what the tests and the CLI run against. The wgpu desktop
//! preview lives in its own crate; an XR backend would plug in at the same
//! seam.

pub mod adapter;
pub mod frame;
pub mod headless;
pub mod mesh;
pub mod stats;

pub use adapter::{DisplayMode, Engine, EngineConfig, EngineError, StepFlow};
pub use frame::{FrameCtx, FrameServices};
pub use headless::{DrawRecord, HeadlessEngine, HeadlessModel};
pub use mesh::{MaterialDesc, MeshPrimitive, ShaderRef, Transparency};
pub use stats::{FrameStats, FrameSummary};

pub fn crate_info() -> &'static str {
    "shapeyard-engine v0.1.0"
}
