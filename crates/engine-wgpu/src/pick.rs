use glam::{Vec2, Vec3};
use shapeyard_common::{Bounds, Pose};

use crate::camera::FlyCamera;

/// A world-space picking ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// A handle drag in progress: the grabbed id, the grab depth along the
/// cursor ray, and the grab point's offset from the pose origin. Keeping
/// both fixed holds the grab point under the cursor at constant depth.
#[derive(Debug, Clone)]
pub struct DragState {
    pub id: String,
    pub distance: f32,
    pub offset: Vec3,
}

/// Unproject the cursor (physical pixels) into a world-space ray.
pub fn cursor_ray(camera: &FlyCamera, cursor: Vec2, viewport: Vec2) -> Ray {
    let ndc = Vec2::new(
        2.0 * cursor.x / viewport.x.max(1.0) - 1.0,
        1.0 - 2.0 * cursor.y / viewport.y.max(1.0),
    );
    let inv = camera.view_projection().inverse();
    // wgpu clip space is 0..1 in depth
    let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    Ray {
        origin: near,
        dir: (far - near).normalize(),
    }
}

/// Ray versus an oriented box: `bounds` sits in the local space of `pose`.
/// Returns the hit distance in world units, or the exit distance when the
/// ray starts inside.
pub fn ray_hits_box(ray: &Ray, pose: &Pose, bounds: Bounds) -> Option<f32> {
    // pose matrices are rigid, so distances survive the change of basis
    let inv = pose.to_matrix().inverse();
    let origin = inv.transform_point3(ray.origin);
    let dir = inv.transform_vector3(ray.dir);

    let min = bounds.min();
    let max = bounds.max();
    let inv_dir = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);

    let t1 = (min.x - origin.x) * inv_dir.x;
    let t2 = (max.x - origin.x) * inv_dir.x;
    let t3 = (min.y - origin.y) * inv_dir.y;
    let t4 = (max.y - origin.y) * inv_dir.y;
    let t5 = (min.z - origin.z) * inv_dir.z;
    let t6 = (max.z - origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(if tmin < 0.0 { tmax } else { tmin })
}
