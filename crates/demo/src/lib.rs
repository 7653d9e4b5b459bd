//! The shape sandbox demo: a floor, a creation panel, draggable shapes, and
//! controller status overlays, drawn through the render engine boundary.
//!
//! # Invariants
//! - Frame order is fixed: floor, panel, entities in creation order,
//!   controller overlays left then right.
//! - All state lives in [`ShapesApp`]; the frame callback has no globals.
//! - The loop is synchronous and single-threaded; the adapter owns the
//!   cadence.

pub mod app;
pub mod overlay;
pub mod run;

pub use app::ShapesApp;
pub use run::run;

pub fn crate_info() -> &'static str {
    "shapeyard-demo v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("demo"));
    }
}
