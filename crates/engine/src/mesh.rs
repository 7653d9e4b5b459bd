use std::path::PathBuf;

use glam::Vec3;
use shapeyard_common::Bounds;

/// Parametric meshes a backend can generate on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshPrimitive {
    Cube {
        dimensions: Vec3,
    },
    /// Cube with filleted edges. The rounding stays inside `dimensions`.
    RoundedCube {
        dimensions: Vec3,
        edge_radius: f32,
    },
    Sphere {
        diameter: f32,
    },
    Cylinder {
        diameter: f32,
        height: f32,
    },
}

impl MeshPrimitive {
    /// Tight local-space bounds of the generated mesh.
    pub fn bounds(&self) -> Bounds {
        let dimensions = match *self {
            MeshPrimitive::Cube { dimensions } => dimensions,
            MeshPrimitive::RoundedCube { dimensions, .. } => dimensions,
            MeshPrimitive::Sphere { diameter } => Vec3::splat(diameter),
            MeshPrimitive::Cylinder { diameter, height } => Vec3::new(diameter, height, diameter),
        };
        Bounds::from_dimensions(dimensions)
    }
}

/// Which shader a material runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderRef {
    /// The engine's standard lit shader.
    Default,
    /// The engine's UI-styled shader, matched to panel chrome.
    DefaultUi,
    /// A shader source file, resolved against the configured assets
    /// directory. Backends translate by file stem.
    File(PathBuf),
}

/// Alpha handling for a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    None,
    Blend,
}

/// Everything a backend needs to realize a material.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    pub shader: ShaderRef,
    pub transparency: Transparency,
}

impl MaterialDesc {
    /// The standard lit material.
    pub fn standard() -> Self {
        Self {
            shader: ShaderRef::Default,
            transparency: Transparency::None,
        }
    }

    /// The UI-styled material used by panel-adjacent models.
    pub fn default_ui() -> Self {
        Self {
            shader: ShaderRef::DefaultUi,
            transparency: Transparency::None,
        }
    }

    /// A material running a shader file, with blending enabled.
    pub fn from_file(path: impl Into<PathBuf>, transparency: Transparency) -> Self {
        Self {
            shader: ShaderRef::File(path.into()),
            transparency,
        }
    }
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_bounds_are_tight() {
        let cube = MeshPrimitive::Cube {
            dimensions: Vec3::new(1.0, 2.0, 3.0),
        };
        assert_eq!(cube.bounds().dimensions, Vec3::new(1.0, 2.0, 3.0));

        let rounded = MeshPrimitive::RoundedCube {
            dimensions: Vec3::splat(0.1),
            edge_radius: 0.02,
        };
        assert_eq!(rounded.bounds().dimensions, Vec3::splat(0.1));

        let sphere = MeshPrimitive::Sphere { diameter: 0.1 };
        assert_eq!(sphere.bounds().dimensions, Vec3::splat(0.1));

        let cylinder = MeshPrimitive::Cylinder {
            diameter: 0.1,
            height: 0.2,
        };
        assert_eq!(cylinder.bounds().dimensions, Vec3::new(0.1, 0.2, 0.1));
    }

    #[test]
    fn bounds_center_on_origin() {
        let sphere = MeshPrimitive::Sphere { diameter: 2.0 };
        assert_eq!(sphere.bounds().center, Vec3::ZERO);
        assert_eq!(sphere.bounds().max(), Vec3::ONE);
    }

    #[test]
    fn material_constructors() {
        assert_eq!(MaterialDesc::default().shader, ShaderRef::Default);
        assert_eq!(MaterialDesc::default_ui().shader, ShaderRef::DefaultUi);

        let floor = MaterialDesc::from_file("floor.hlsl", Transparency::Blend);
        assert_eq!(floor.shader, ShaderRef::File(PathBuf::from("floor.hlsl")));
        assert_eq!(floor.transparency, Transparency::Blend);
    }
}
