//! Unit cube, side 1, centered at the origin.

use glam::Vec3;

use super::MeshData;

/// Face basis: outward normal plus two tangents with `t.cross(b) == n`, so
/// the generated quads are counter-clockwise seen from outside.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

pub fn generate() -> MeshData {
    let mut mesh = MeshData::default();

    for (n, t, b) in FACES {
        let corners = [
            (n - t - b) * 0.5,
            (n + t - b) * 0.5,
            (n + t + b) * 0.5,
            (n - t + b) * 0.5,
        ];
        mesh.push_quad(corners, n);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces() {
        let mesh = generate();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }
}
