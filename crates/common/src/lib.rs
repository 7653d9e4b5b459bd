//! Shared value types for the shapeyard workspace.
//!
//! # Invariants
//! - Types here are plain data with no engine or backend dependencies.
//! - A `Pose` stores rigid placement only; scale enters at matrix construction.
//! - Colors are linear-space RGBA once they leave a constructor.

pub mod color;
pub mod types;

pub use color::Color;
pub use types::{
    Bounds, CM, EntityId, MaterialHandle, Model, ModelHandle, Pose, quat_look_at, quat_look_dir,
};

pub fn crate_info() -> &'static str {
    "shapeyard-common v0.1.0"
}
