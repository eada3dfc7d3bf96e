//! Procedural meshes for the drawable primitives.
//!
//! One generator module per primitive. All generators produce indexed
//! triangle lists with per-vertex normals, unit-ish size, centered at the
//! origin, counter-clockwise front faces (the culling convention of every
//! pipeline in `render`).
//!
//! Geometry is generated once on the CPU and uploaded once per process via
//! [`MeshSet::init`]; nothing here is touched per frame.

pub mod cube;
pub mod cylinder;
pub mod pyramid;
pub mod sphere;
pub mod torus;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::scene::Primitive;

/// Vertex layout shared by every mesh: position + normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side mesh: indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }

    pub(crate) fn push_tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Emits a quad `p0..p3` (counter-clockwise seen from outside) with one
    /// flat normal.
    pub(crate) fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let i0 = self.push_vertex(corners[0], normal);
        let i1 = self.push_vertex(corners[1], normal);
        let i2 = self.push_vertex(corners[2], normal);
        let i3 = self.push_vertex(corners[3], normal);
        self.push_tri(i0, i1, i2);
        self.push_tri(i0, i2, i3);
    }
}

/// One-time uploaded mesh buffers.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

/// The five primitive meshes, uploaded once before the loop starts.
pub struct MeshSet {
    sphere: GpuMesh,
    cube: GpuMesh,
    pyramid: GpuMesh,
    cylinder: GpuMesh,
    torus: GpuMesh,
}

impl MeshSet {
    pub fn init(device: &wgpu::Device) -> Self {
        Self {
            sphere: GpuMesh::upload(device, "lumina sphere mesh", &sphere::generate()),
            cube: GpuMesh::upload(device, "lumina cube mesh", &cube::generate()),
            pyramid: GpuMesh::upload(device, "lumina pyramid mesh", &pyramid::generate()),
            cylinder: GpuMesh::upload(device, "lumina cylinder mesh", &cylinder::generate()),
            torus: GpuMesh::upload(device, "lumina torus mesh", &torus::generate()),
        }
    }

    pub fn get(&self, primitive: Primitive) -> &GpuMesh {
        match primitive {
            Primitive::Sphere => &self.sphere,
            Primitive::Cube => &self.cube,
            Primitive::Pyramid => &self.pyramid,
            Primitive::Cylinder => &self.cylinder,
            Primitive::Torus => &self.torus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_meshes() -> [(Primitive, MeshData); 5] {
        [
            (Primitive::Sphere, sphere::generate()),
            (Primitive::Cube, cube::generate()),
            (Primitive::Pyramid, pyramid::generate()),
            (Primitive::Cylinder, cylinder::generate()),
            (Primitive::Torus, torus::generate()),
        ]
    }

    #[test]
    fn index_counts_are_whole_triangles() {
        for (primitive, mesh) in all_meshes() {
            assert!(!mesh.indices.is_empty(), "{primitive} has no indices");
            assert_eq!(
                mesh.indices.len() % 3,
                0,
                "{primitive} index count is not a multiple of 3"
            );
            let max = *mesh.indices.iter().max().unwrap() as usize;
            assert!(max < mesh.vertices.len(), "{primitive} has out-of-range indices");
        }
    }

    #[test]
    fn normals_are_unit_length() {
        for (primitive, mesh) in all_meshes() {
            for v in &mesh.vertices {
                let n = Vec3::from_array(v.normal);
                assert!(
                    (n.length() - 1.0).abs() < 1e-4,
                    "{primitive} has a non-unit normal {n:?}"
                );
            }
        }
    }

    #[test]
    fn meshes_are_centered_and_unit_sized() {
        for (primitive, mesh) in all_meshes() {
            let mut min = Vec3::splat(f32::INFINITY);
            let mut max = Vec3::splat(f32::NEG_INFINITY);
            for v in &mesh.vertices {
                let p = Vec3::from_array(v.position);
                min = min.min(p);
                max = max.max(p);
            }
            let center = (min + max) * 0.5;
            assert!(center.length() < 1e-4, "{primitive} is off-center: {center:?}");
            let extent = max - min;
            assert!(
                extent.max_element() <= 1.0 + 1e-4,
                "{primitive} exceeds unit size: {extent:?}"
            );
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_outward() {
        // Front faces must agree with the vertex normals; a backwards
        // triangle would be culled by every pipeline.
        for (primitive, mesh) in all_meshes() {
            for tri in mesh.indices.chunks_exact(3) {
                let [a, b, c] = [
                    mesh.vertices[tri[0] as usize],
                    mesh.vertices[tri[1] as usize],
                    mesh.vertices[tri[2] as usize],
                ];
                let pa = Vec3::from_array(a.position);
                let pb = Vec3::from_array(b.position);
                let pc = Vec3::from_array(c.position);
                let face = (pb - pa).cross(pc - pa);
                let n = Vec3::from_array(a.normal)
                    + Vec3::from_array(b.normal)
                    + Vec3::from_array(c.normal);
                assert!(
                    face.dot(n) > 0.0,
                    "{primitive} triangle {tri:?} winds against its normals"
                );
            }
        }
    }
}
