use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use shapeyard_engine::MeshPrimitive;

const SPHERE_STACKS: u32 = 16;
const SPHERE_SECTORS: u32 = 24;
const CYLINDER_SECTORS: u32 = 24;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangulate a primitive. Counter-clockwise winding viewed from outside,
/// matching the pipeline's back-face culling.
pub fn generate(primitive: &MeshPrimitive) -> (Vec<Vertex>, Vec<u32>) {
    match *primitive {
        MeshPrimitive::Cube { dimensions } => box_mesh(dimensions),
        // preview ignores the fillet
        MeshPrimitive::RoundedCube { dimensions, .. } => box_mesh(dimensions),
        MeshPrimitive::Sphere { diameter } => {
            sphere_mesh(diameter * 0.5, SPHERE_STACKS, SPHERE_SECTORS)
        }
        MeshPrimitive::Cylinder { diameter, height } => {
            cylinder_mesh(diameter * 0.5, height, CYLINDER_SECTORS)
        }
    }
}

fn box_mesh(dimensions: Vec3) -> (Vec<Vertex>, Vec<u32>) {
    let x = dimensions.x * 0.5;
    let y = dimensions.y * 0.5;
    let z = dimensions.z * 0.5;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-x, -y,  z], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ x, -y,  z], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ x,  y,  z], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-x,  y,  z], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ x, -y, -z], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-x, -y, -z], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-x,  y, -z], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ x,  y, -z], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ x, -y,  z], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ x, -y, -z], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ x,  y, -z], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ x,  y,  z], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-x, -y, -z], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-x, -y,  z], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-x,  y,  z], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-x,  y, -z], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-x,  y,  z], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ x,  y,  z], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ x,  y, -z], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-x,  y, -z], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-x, -y, -z], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ x, -y, -z], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ x, -y,  z], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-x, -y,  z], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

fn sphere_mesh(radius: f32, stacks: u32, sectors: u32) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - (i as f32) * PI / (stacks as f32);
        let ring = radius * stack_angle.cos();
        let y = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let nx = stack_angle.cos() * sector_angle.cos();
            let ny = stack_angle.sin();
            let nz = stack_angle.cos() * sector_angle.sin();
            vertices.push(Vertex {
                position: [ring * sector_angle.cos(), y, ring * sector_angle.sin()],
                normal: [nx, ny, nz],
            });
        }
    }

    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * (sectors + 1) + j;
            let second = first + sectors + 1;
            indices.extend_from_slice(&[first, first + 1, second]);
            indices.extend_from_slice(&[first + 1, second + 1, second]);
        }
    }

    (vertices, indices)
}

fn cylinder_mesh(radius: f32, height: f32, sectors: u32) -> (Vec<Vertex>, Vec<u32>) {
    let half = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // side: two rings with radial normals, seam vertex duplicated
    for &y in &[half, -half] {
        for j in 0..=sectors {
            let angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vertex {
                position: [radius * cos, y, radius * sin],
                normal: [cos, 0.0, sin],
            });
        }
    }
    for j in 0..sectors {
        let top = j;
        let bottom = sectors + 1 + j;
        indices.extend_from_slice(&[top, bottom + 1, bottom]);
        indices.extend_from_slice(&[top, top + 1, bottom + 1]);
    }

    // caps: center fan with flat normals
    for &(y, ny) in &[(half, 1.0_f32), (-half, -1.0)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for j in 0..=sectors {
            let angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vertex {
                position: [radius * cos, y, radius * sin],
                normal: [0.0, ny, 0.0],
            });
        }
        for j in 0..sectors {
            let a = center + 1 + j;
            let b = center + 2 + j;
            if ny > 0.0 {
                indices.extend_from_slice(&[center, b, a]);
            } else {
                indices.extend_from_slice(&[center, a, b]);
            }
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces_point_along_normals(vertices: &[Vertex], indices: &[u32]) {
        for tri in indices.chunks(3) {
            let a = Vec3::from(vertices[tri[0] as usize].position);
            let b = Vec3::from(vertices[tri[1] as usize].position);
            let c = Vec3::from(vertices[tri[2] as usize].position);
            let face = (b - a).cross(c - a);
            if face.length() < 1e-9 {
                continue; // degenerate (pole) triangle
            }
            let n0 = Vec3::from(vertices[tri[0] as usize].normal);
            let n1 = Vec3::from(vertices[tri[1] as usize].normal);
            let n2 = Vec3::from(vertices[tri[2] as usize].normal);
            let outward = n0 + n1 + n2;
            assert!(face.dot(outward) > 0.0, "face winding disagrees with vertex normals");
        }
    }

    #[test]
    fn box_dimensions_are_respected() {
        let (vertices, indices) = generate(&MeshPrimitive::Cube {
            dimensions: Vec3::new(1.0, 2.0, 4.0),
        });
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        let max_x = vertices.iter().map(|v| v.position[0]).fold(0.0, f32::max);
        let max_y = vertices.iter().map(|v| v.position[1]).fold(0.0, f32::max);
        let max_z = vertices.iter().map(|v| v.position[2]).fold(0.0, f32::max);
        assert_eq!((max_x, max_y, max_z), (0.5, 1.0, 2.0));
    }

    #[test]
    fn rounded_cube_previews_as_a_box() {
        let rounded = generate(&MeshPrimitive::RoundedCube {
            dimensions: Vec3::splat(0.1),
            edge_radius: 0.02,
        });
        let plain = generate(&MeshPrimitive::Cube {
            dimensions: Vec3::splat(0.1),
        });
        assert_eq!(rounded.0.len(), plain.0.len());
        assert_eq!(rounded.1, plain.1);
    }

    #[test]
    fn sphere_vertices_sit_on_the_surface() {
        let (vertices, indices) = generate(&MeshPrimitive::Sphere { diameter: 0.1 });
        for v in &vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 0.05).abs() < 1e-5, "vertex off the sphere: r={r}");
        }
        for &i in &indices {
            assert!((i as usize) < vertices.len());
        }
        faces_point_along_normals(&vertices, &indices);
    }

    #[test]
    fn cylinder_spans_height_and_radius() {
        let (vertices, indices) = generate(&MeshPrimitive::Cylinder {
            diameter: 0.1,
            height: 0.2,
        });
        for v in &vertices {
            assert!(v.position[1].abs() <= 0.1 + 1e-6);
            let ring = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!(ring <= 0.05 + 1e-5);
        }
        faces_point_along_normals(&vertices, &indices);
    }

    #[test]
    fn box_faces_wind_outward() {
        let (vertices, indices) = generate(&MeshPrimitive::Cube {
            dimensions: Vec3::ONE,
        });
        faces_point_along_normals(&vertices, &indices);
    }
}
