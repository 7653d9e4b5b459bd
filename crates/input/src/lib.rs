//! Controller input: per-frame motion controller snapshots and scripted playback.
//!
//! # Invariants
//! - Consumers read per-frame snapshots; raw device events never cross this
//!   boundary.
//! - An untracked controller still carries a well-formed identity pose.

pub mod controller;
pub mod script;

pub use controller::{ControllerRig, ControllerState, Handed, TrackState};
pub use script::ScriptedControllers;

pub fn crate_info() -> &'static str {
    "shapeyard-input v0.1.0"
}
