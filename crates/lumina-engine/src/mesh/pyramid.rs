//! Square pyramid, base side 1, apex on +Y, centered at the origin.

use glam::Vec3;

use super::MeshData;

pub fn generate() -> MeshData {
    let mut mesh = MeshData::default();

    let apex = Vec3::new(0.0, 0.5, 0.0);
    // Base corners, ordered so each (corner, apex, next-corner) face winds
    // counter-clockwise seen from outside.
    let corners = [
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(-0.5, -0.5, 0.5),
    ];

    for k in 0..4 {
        let c0 = corners[k];
        let c1 = corners[(k + 1) % 4];
        let normal = (apex - c0).cross(c1 - c0).normalize();

        let i0 = mesh.push_vertex(c0, normal);
        let i1 = mesh.push_vertex(apex, normal);
        let i2 = mesh.push_vertex(c1, normal);
        mesh.push_tri(i0, i1, i2);
    }

    mesh.push_quad(
        [corners[0], corners[1], corners[2], corners[3]],
        Vec3::NEG_Y,
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_has_four_sides_and_a_base() {
        let mesh = generate();
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn side_normals_point_up_and_out() {
        let mesh = generate();
        // The first 12 vertices belong to the side faces.
        for v in mesh.vertices.iter().take(12) {
            assert!(v.normal[1] > 0.0);
        }
    }
}
