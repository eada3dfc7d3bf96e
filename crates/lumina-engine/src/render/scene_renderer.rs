use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::core::{RenderCtx, RenderTarget};
use crate::device::DEPTH_FORMAT;
use crate::mesh::{MeshSet, Vertex};
use crate::scene::{Light, MAX_LIGHTS, Material, RenderOptions};

use super::frame::{DrawCall, FrameGlobals, FramePlan};

/// Upper bound on draws per frame: eight light markers, the base, the figure.
const MAX_DRAWS: usize = MAX_LIGHTS + 2;

/// Dynamic-offset stride for object uniforms. 256 satisfies
/// `min_uniform_buffer_offset_alignment` on every backend wgpu supports.
const OBJECT_STRIDE: usize = 256;

/// GPU-side light record; see `LightData` in scene.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct LightUniform {
    /// xyz = position or direction; w = 1.0 when directional.
    position: [f32; 4],
    /// rgb in [0, 1]; w = 1.0 when the light is active.
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
}

impl LightUniform {
    fn pack(light: &Light) -> Self {
        let p = light.position;
        Self {
            position: [p.x, p.y, p.z, if light.directional { 1.0 } else { 0.0 }],
            ambient: scaled(light.ia, if light.active { 1.0 } else { 0.0 }),
            diffuse: scaled(light.id, 1.0),
            specular: scaled(light.is, 1.0),
        }
    }
}

/// Frame-global uniform block; see `Globals` in scene.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct GlobalsUniform {
    model_view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    normals: [[f32; 4]; 4],
    view_normals: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    lights: [LightUniform; MAX_LIGHTS],
    light_count: u32,
    _pad: [u32; 3],
}

impl GlobalsUniform {
    fn pack(globals: &FrameGlobals) -> Self {
        let mut lights = [LightUniform::zeroed(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(globals.lights.iter()) {
            *slot = LightUniform::pack(light);
        }

        Self {
            model_view: globals.model_view.to_cols_array_2d(),
            projection: globals.projection.to_cols_array_2d(),
            normals: globals.normals.to_cols_array_2d(),
            view_normals: globals.view_normals.to_cols_array_2d(),
            view: globals.view.to_cols_array_2d(),
            lights,
            light_count: globals.lights.len().min(MAX_LIGHTS) as u32,
            _pad: [0; 3],
        }
    }
}

/// Per-draw uniform block, one 256-byte slot per draw; see `ObjectData` in
/// scene.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ObjectUniform {
    model_view: [[f32; 4]; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    /// rgb = specular reflectance; w = shininess exponent.
    specular: [f32; 4],
    light_tag: i32,
    _pad: [i32; 3],
}

impl ObjectUniform {
    fn pack(draw: &DrawCall) -> Self {
        let Material {
            ka,
            kd,
            ks,
            shininess,
        } = &draw.material;
        Self {
            model_view: draw.model_view.to_cols_array_2d(),
            ambient: scaled(*ka, 1.0),
            diffuse: scaled(*kd, 1.0),
            specular: scaled(*ks, *shininess),
            light_tag: draw.light_tag,
            _pad: [0; 3],
        }
    }
}

/// Scales 0-255 channels to [0, 1] and appends `w` untouched.
fn scaled(channels: [f32; 3], w: f32) -> [f32; 4] {
    [
        channels[0] / 255.0,
        channels[1] / 255.0,
        channels[2] / 255.0,
        w,
    ]
}

/// Pipeline variant selector. Both toggles come straight from the render
/// options, so flipping a checkbox swaps pipelines without any rebuild of
/// buffers or bind groups.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PipelineKey {
    pub cull_back_faces: bool,
    pub depth_test: bool,
}

impl PipelineKey {
    pub fn from_options(options: &RenderOptions) -> Self {
        Self {
            cull_back_faces: options.back_face_culling,
            depth_test: options.z_buffer,
        }
    }
}

/// Draws a [`FramePlan`]: one render pass, one pipeline per frame, one
/// dynamic-offset uniform slot per draw.
///
/// Pipeline variants are built lazily per [`PipelineKey`] and cached for the
/// life of the renderer; the surface format is fixed at construction.
pub struct SceneRenderer {
    meshes: MeshSet,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    surface_format: wgpu::TextureFormat,
    globals_buffer: wgpu::Buffer,
    objects_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let meshes = MeshSet::init(device);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumina scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumina scene globals"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let objects_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumina scene objects"),
            size: (OBJECT_STRIDE * MAX_DRAWS) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("lumina scene bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<GlobalsUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ObjectUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                ],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumina scene bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &objects_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                    }),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumina scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        Self {
            meshes,
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            surface_format,
            globals_buffer,
            objects_buffer,
            bind_group,
        }
    }

    /// Encodes the plan into one render pass on `target`. The pass loads the
    /// existing color/depth contents; clearing happens once per frame before
    /// any renderer runs.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, plan: &FramePlan) {
        let draws = &plan.draws[..plan.draws.len().min(MAX_DRAWS)];
        if draws.is_empty() {
            return;
        }

        ctx.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsUniform::pack(&plan.globals)),
        );

        let mut staging = vec![0u8; OBJECT_STRIDE * draws.len()];
        for (slot, draw) in staging.chunks_exact_mut(OBJECT_STRIDE).zip(draws) {
            let object = ObjectUniform::pack(draw);
            let bytes = bytemuck::bytes_of(&object);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(&self.objects_buffer, 0, &staging);

        let key = PipelineKey::from_options(&plan.options);
        let pipeline = self.pipelines.entry(key).or_insert_with(|| {
            build_pipeline(
                ctx.device,
                &self.pipeline_layout,
                &self.shader,
                self.surface_format,
                key,
            )
        });

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumina scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(pipeline);
        for (index, draw) in draws.iter().enumerate() {
            let mesh = self.meshes.get(draw.mesh);
            pass.set_bind_group(0, &self.bind_group, &[(index * OBJECT_STRIDE) as u32]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    // The depth attachment is always bound; a disabled z-buffer becomes
    // "always passes, never writes" so toggling never reshapes the pass.
    let depth_stencil = wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: key.depth_test,
        depth_compare: if key.depth_test {
            wgpu::CompareFunction::Less
        } else {
            wgpu::CompareFunction::Always
        },
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("lumina scene pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: key.cull_back_faces.then_some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    use crate::render::frame::{DrawKind, LIGHT_TAG_SENTINEL};
    use crate::scene::Primitive;

    #[test]
    fn uniform_blocks_match_the_shader_layout() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 5 * 64 + 8 * 64 + 16);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
        assert!(std::mem::size_of::<ObjectUniform>() <= OBJECT_STRIDE);
    }

    #[test]
    fn pipeline_key_tracks_both_toggles() {
        let mut options = RenderOptions::default();
        let on = PipelineKey::from_options(&options);
        assert!(on.cull_back_faces);
        assert!(on.depth_test);

        options.back_face_culling = false;
        options.z_buffer = false;
        let off = PipelineKey::from_options(&options);
        assert!(!off.cull_back_faces);
        assert!(!off.depth_test);
        assert_ne!(on, off);

        // Toggling back lands on the same key, so the cache is reused.
        options.back_face_culling = true;
        options.z_buffer = true;
        assert_eq!(PipelineKey::from_options(&options), on);
    }

    #[test]
    fn light_packing_scales_channels_and_encodes_flags() {
        let light = Light {
            position: Vec3::new(1.0, 2.0, 3.0),
            ia: [255.0, 0.0, 127.5],
            id: [255.0, 255.0, 255.0],
            is: [0.0, 0.0, 0.0],
            directional: true,
            active: false,
        };

        let packed = LightUniform::pack(&light);
        assert_eq!(packed.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(packed.ambient, [1.0, 0.0, 0.5, 0.0]);
        assert_eq!(packed.diffuse, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(packed.specular, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn object_packing_carries_shininess_and_tag() {
        let draw = DrawCall {
            kind: DrawKind::Figure,
            mesh: Primitive::Torus,
            model_view: Mat4::IDENTITY,
            material: Material::figure_default(),
            light_tag: LIGHT_TAG_SENTINEL,
        };

        let packed = ObjectUniform::pack(&draw);
        assert_eq!(packed.diffuse, [0.0, 100.0 / 255.0, 0.0, 1.0]);
        assert_eq!(packed.specular, [1.0, 1.0, 1.0, 50.0]);
        assert_eq!(packed.light_tag, LIGHT_TAG_SENTINEL);
    }

    #[test]
    fn globals_packing_counts_only_stored_lights() {
        let globals = FrameGlobals {
            model_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            normals: Mat4::IDENTITY,
            view_normals: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            lights: vec![Light {
                position: Vec3::Y,
                ia: [255.0; 3],
                id: [255.0; 3],
                is: [255.0; 3],
                directional: false,
                active: true,
            }],
        };

        let packed = GlobalsUniform::pack(&globals);
        assert_eq!(packed.light_count, 1);
        // Unused slots stay zeroed, which also marks them inactive.
        assert_eq!(packed.lights[1], LightUniform::zeroed());
    }
}
