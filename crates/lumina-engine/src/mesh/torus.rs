//! Torus, outer radius 0.5, axis on Y, centered at the origin.

use std::f32::consts::PI;

use glam::Vec3;

use super::MeshData;

const MAJOR_SEGMENTS: u32 = 32;
const MINOR_SEGMENTS: u32 = 16;
const MAJOR_RADIUS: f32 = 0.35;
const MINOR_RADIUS: f32 = 0.15;

pub fn generate() -> MeshData {
    let mut mesh = MeshData::default();

    for major in 0..=MAJOR_SEGMENTS {
        let theta = 2.0 * PI * major as f32 / MAJOR_SEGMENTS as f32;
        let (ring_x, ring_z) = (theta.cos(), theta.sin());

        for minor in 0..=MINOR_SEGMENTS {
            let phi = 2.0 * PI * minor as f32 / MINOR_SEGMENTS as f32;
            let tube = MAJOR_RADIUS + MINOR_RADIUS * phi.cos();

            let position = Vec3::new(
                tube * ring_x,
                MINOR_RADIUS * phi.sin(),
                tube * ring_z,
            );
            let normal = Vec3::new(
                phi.cos() * ring_x,
                phi.sin(),
                phi.cos() * ring_z,
            );
            mesh.push_vertex(position, normal);
        }
    }

    let stride = MINOR_SEGMENTS + 1;
    for major in 0..MAJOR_SEGMENTS {
        for minor in 0..MINOR_SEGMENTS {
            let a = major * stride + minor;
            let b = a + 1; // next minor
            let c = a + stride; // next major
            let d = c + 1;
            mesh.push_tri(a, b, c);
            mesh.push_tri(b, d, c);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_vertices_lie_on_the_tube() {
        let mesh = generate();
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let ring_distance = (p.x * p.x + p.z * p.z).sqrt() - MAJOR_RADIUS;
            let tube_distance = (ring_distance * ring_distance + p.y * p.y).sqrt();
            assert!((tube_distance - MINOR_RADIUS).abs() < 1e-5);
        }
    }
}
