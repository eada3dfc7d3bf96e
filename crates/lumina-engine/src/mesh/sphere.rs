//! UV sphere, radius 0.5, centered at the origin.

use std::f32::consts::PI;

use glam::Vec3;

use super::MeshData;

const SEGMENTS: u32 = 32;
const RINGS: u32 = 16;
const RADIUS: f32 = 0.5;

pub fn generate() -> MeshData {
    let mut mesh = MeshData::default();

    for ring in 0..=RINGS {
        let phi = PI * ring as f32 / RINGS as f32;
        for segment in 0..=SEGMENTS {
            let theta = 2.0 * PI * segment as f32 / SEGMENTS as f32;
            let normal = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.push_vertex(normal * RADIUS, normal);
        }
    }

    let stride = SEGMENTS + 1;
    for ring in 0..RINGS {
        for segment in 0..SEGMENTS {
            let a = ring * stride + segment;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;

            // Pole rows collapse one triangle of each quad; skip the
            // degenerate ones.
            if ring != 0 {
                mesh.push_tri(a, b, c);
            }
            if ring != RINGS - 1 {
                mesh.push_tri(b, d, c);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let mesh = generate();
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - RADIUS).abs() < 1e-5);
        }
    }
}
