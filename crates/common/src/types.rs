use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One centimeter in world units (world units are meters).
pub const CM: f32 = 0.01;

/// Unique identifier for a scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Rigid placement in world space: position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` facing along `dir`, upright around +Y.
    pub fn look_dir(position: Vec3, dir: Vec3) -> Self {
        Self {
            position,
            orientation: quat_look_dir(dir),
        }
    }

    /// Rigid transform matrix for this pose.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Transform matrix with a non-uniform scale applied before the pose.
    pub fn to_matrix_scaled(&self, scale: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(scale, self.orientation, self.position)
    }

    /// The local -Z axis rotated into world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orientation whose forward (-Z) axis points along `dir`, upright around +Y.
pub fn quat_look_dir(dir: Vec3) -> Quat {
    quat_look_at(Vec3::ZERO, dir, Vec3::Y)
}

/// Orientation at `from` looking toward `at`, with `up` as the roll reference.
pub fn quat_look_at(from: Vec3, at: Vec3, up: Vec3) -> Quat {
    let forward = (at - from).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let back = -forward;
    let mut right = up.cross(back);
    if right.length_squared() < 1e-8 {
        // up is parallel to the view direction; fall back to another axis
        right = Vec3::Z.cross(back);
        if right.length_squared() < 1e-8 {
            right = Vec3::X.cross(back);
        }
    }
    let right = right.normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Axis-aligned bounds in a model's local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    pub dimensions: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, dimensions: Vec3) -> Self {
        Self { center, dimensions }
    }

    /// Bounds centered on the local origin.
    pub fn from_dimensions(dimensions: Vec3) -> Self {
        Self {
            center: Vec3::ZERO,
            dimensions,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.dimensions * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.dimensions * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }
}

/// Handle to a model uploaded to the render engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(pub u64);

/// Handle to a material owned by the render engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// A renderable model reference plus its local-space bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub handle: ModelHandle,
    pub bounds: Bounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn pose_default_is_identity() {
        let p = Pose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.orientation, Quat::IDENTITY);
    }

    #[test]
    fn look_dir_forward_is_identity() {
        let q = quat_look_dir(Vec3::NEG_Z);
        assert!((q * Vec3::NEG_Z).abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn look_dir_faces_direction() {
        let q = quat_look_dir(Vec3::X);
        assert!((q * Vec3::NEG_Z).abs_diff_eq(Vec3::X, 1e-6));
        // stays upright
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn look_at_honors_up_reference() {
        // facing straight up with the top edge toward -Z
        let q = quat_look_at(Vec3::ZERO, Vec3::Y, Vec3::NEG_Z);
        assert!((q * Vec3::NEG_Z).abs_diff_eq(Vec3::Y, 1e-6));
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn pose_matrix_applies_scale_first() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let m = pose.to_matrix_scaled(Vec3::splat(2.0));
        let p = m.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn bounds_contains_points() {
        let b = Bounds::from_dimensions(Vec3::ONE);
        assert!(b.contains(Vec3::ZERO));
        assert!(b.contains(Vec3::splat(0.5)));
        assert!(!b.contains(Vec3::splat(0.51)));
    }
}
