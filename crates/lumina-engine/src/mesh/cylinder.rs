//! Cylinder, radius 0.5, height 1, axis on Y, centered at the origin.

use std::f32::consts::PI;

use glam::Vec3;

use super::MeshData;

const SEGMENTS: u32 = 32;
const RADIUS: f32 = 0.5;
const HALF_HEIGHT: f32 = 0.5;

pub fn generate() -> MeshData {
    let mut mesh = MeshData::default();

    // Side: two rings sharing smooth radial normals.
    for y in [-HALF_HEIGHT, HALF_HEIGHT] {
        for segment in 0..=SEGMENTS {
            let theta = 2.0 * PI * segment as f32 / SEGMENTS as f32;
            let radial = Vec3::new(theta.cos(), 0.0, theta.sin());
            mesh.push_vertex(radial * RADIUS + Vec3::new(0.0, y, 0.0), radial);
        }
    }

    let stride = SEGMENTS + 1;
    for segment in 0..SEGMENTS {
        let a = segment; // bottom ring
        let b = a + 1;
        let c = a + stride; // top ring
        let d = c + 1;
        mesh.push_tri(a, c, b);
        mesh.push_tri(b, c, d);
    }

    // Caps: triangle fans with flat normals.
    for (y, normal) in [
        (HALF_HEIGHT, Vec3::Y),
        (-HALF_HEIGHT, Vec3::NEG_Y),
    ] {
        let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let first_rim = mesh.vertices.len() as u32;
        for segment in 0..=SEGMENTS {
            let theta = 2.0 * PI * segment as f32 / SEGMENTS as f32;
            let rim = Vec3::new(theta.cos() * RADIUS, y, theta.sin() * RADIUS);
            mesh.push_vertex(rim, normal);
        }
        for segment in 0..SEGMENTS {
            let p0 = first_rim + segment;
            let p1 = p0 + 1;
            if normal.y > 0.0 {
                mesh.push_tri(center, p1, p0);
            } else {
                mesh.push_tri(center, p0, p1);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_rim_vertices_lie_on_the_radius() {
        let mesh = generate();
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r < RADIUS + 1e-5);
            assert!(p.y.abs() <= HALF_HEIGHT + 1e-5);
        }
    }
}
