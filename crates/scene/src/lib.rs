//! Scene registry: insertion-ordered entity storage for the shape sandbox.
//!
//! # Invariants
//! - Iteration visits entities in creation order, including across
//!   interleaved removals.
//! - All mutations flow through explicit registry operations.
//! - Entities of the same kind share one model; the registry owns the catalog.

pub mod registry;
pub mod shapes;

pub use registry::{SceneEntity, SceneRegistry};
pub use shapes::{ShapeKind, ShapeSet};

pub fn crate_info() -> &'static str {
    "shapeyard-scene v0.1.0"
}
