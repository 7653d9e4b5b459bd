use serde::{Deserialize, Serialize};
use shapeyard_common::Model;

/// The shapes offered by the creation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Cube,
    Ball,
    Cylinder,
}

impl ShapeKind {
    /// All kinds, in panel order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Ball, ShapeKind::Cylinder];

    /// Label shown on the creation panel for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Ball => "Ball",
            ShapeKind::Cylinder => "Cylinder",
        }
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Cube
    }
}

/// The shared models every entity references, one per shape kind.
///
/// Models are engine resources created once at startup; entities of the same
/// kind all point at the same model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeSet {
    pub cube: Model,
    pub ball: Model,
    pub cylinder: Model,
}

impl ShapeSet {
    pub fn new(cube: Model, ball: Model, cylinder: Model) -> Self {
        Self {
            cube,
            ball,
            cylinder,
        }
    }

    /// The shared model for a shape kind.
    pub fn model(&self, kind: ShapeKind) -> Model {
        match kind {
            ShapeKind::Cube => self.cube,
            ShapeKind::Ball => self.ball,
            ShapeKind::Cylinder => self.cylinder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeyard_common::{Bounds, ModelHandle};

    fn model(handle: u64) -> Model {
        Model {
            handle: ModelHandle(handle),
            bounds: Bounds::from_dimensions(glam::Vec3::ONE),
        }
    }

    #[test]
    fn all_kinds_in_panel_order() {
        assert_eq!(ShapeKind::ALL, [ShapeKind::Cube, ShapeKind::Ball, ShapeKind::Cylinder]);
    }

    #[test]
    fn labels_match_kinds() {
        assert_eq!(ShapeKind::Cube.label(), "Cube");
        assert_eq!(ShapeKind::Ball.label(), "Ball");
        assert_eq!(ShapeKind::Cylinder.label(), "Cylinder");
    }

    #[test]
    fn model_lookup_by_kind() {
        let set = ShapeSet::new(model(1), model(2), model(3));
        assert_eq!(set.model(ShapeKind::Cube).handle, ModelHandle(1));
        assert_eq!(set.model(ShapeKind::Ball).handle, ModelHandle(2));
        assert_eq!(set.model(ShapeKind::Cylinder).handle, ModelHandle(3));
    }
}
