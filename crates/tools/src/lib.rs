//! Developer tooling: scene inspector and draw stream dumps.
//!
//! # Invariants
//! - Tools are read-only; nothing here mutates the scene or the engine.
//! - Output formats are for humans and tests, not a stable wire format.

pub mod dump;
pub mod inspector;

pub use dump::{dump_frame, format_record};
pub use inspector::{EntityInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "shapeyard-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
