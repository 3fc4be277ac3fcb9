use super::helpers;
use super::mesh::{mesh_vertex_layout, MeshBuffers};
use crate::core::camera::spot_shadow_matrix;
use crate::core::color::hex_to_linear;
use crate::core::{
    SpotLightParams, HEMI_GROUND_HEX, HEMI_INTENSITY, HEMI_SKY_HEX, SHADOW_DEPTH_BIAS,
    SHADOW_MAP_SIZE,
};
use glam::{Mat4, Vec3};

const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightUniforms {
    pub(crate) shadow_view_proj: [[f32; 4]; 4],
    pub(crate) position: [f32; 4],   // xyz, intensity
    pub(crate) target_pos: [f32; 4], // xyz, cut-off distance
    pub(crate) color: [f32; 4],      // rgb, decay
    pub(crate) cone: [f32; 4],       // outer cos, inner cos, shadows, bias
    pub(crate) sky: [f32; 4],        // rgb, hemisphere intensity
    pub(crate) ground: [f32; 4],
}

impl LightUniforms {
    pub(crate) fn new(params: &SpotLightParams, position: Vec3, shadow_view_proj: Mat4) -> Self {
        let [r, g, b] = params.color;
        let [sr, sg, sb] = hex_to_linear(HEMI_SKY_HEX);
        let [gr, gg, gb] = hex_to_linear(HEMI_GROUND_HEX);
        Self {
            shadow_view_proj: shadow_view_proj.to_cols_array_2d(),
            position: [position.x, position.y, position.z, params.intensity],
            target_pos: [0.0, 0.0, 0.0, params.distance],
            color: [r, g, b, params.decay],
            cone: [
                params.angle.cos(),
                (params.angle * (1.0 - params.penumbra)).cos(),
                if params.shadows { 1.0 } else { 0.0 },
                SHADOW_DEPTH_BIAS,
            ],
            sky: [sr, sg, sb, HEMI_INTENSITY],
            ground: [gr, gg, gb, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ShadowUniforms {
    light_view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

/// Spot light uniform (group 2 of the mesh pipeline) and its shadow map.
pub(crate) struct LightResources {
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    shadow_view: wgpu::TextureView,
    shadow_pipeline: wgpu::RenderPipeline,
    shadow_uniform_buffer: wgpu::Buffer,
    shadow_bind_group: wgpu::BindGroup,
}

pub(crate) fn create_light_resources(device: &wgpu::Device) -> LightResources {
    let (_shadow_tex, shadow_view) = helpers::create_render_texture(
        device,
        "shadow_map",
        SHADOW_MAP_SIZE,
        SHADOW_MAP_SIZE,
        SHADOW_FORMAT,
        1,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    );
    let compare_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("shadow_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        compare: Some(wgpu::CompareFunction::LessEqual),
        ..Default::default()
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("light_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Depth,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("light_uniforms"),
        size: std::mem::size_of::<LightUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("light_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&shadow_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&compare_sampler),
            },
        ],
    });

    // Depth-only pipeline rendering the mesh from the light
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shadow_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SHADOW_WGSL.into()),
    });
    let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("shadow_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shadow_pl"),
        bind_group_layouts: &[&shadow_bgl],
        push_constant_ranges: &[],
    });
    let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shadow_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_shadow"),
            buffers: &[mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: SHADOW_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: None,
        cache: None,
        multiview: None,
    });
    let shadow_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("shadow_uniforms"),
        size: std::mem::size_of::<ShadowUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("shadow_bg"),
        layout: &shadow_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: shadow_uniform_buffer.as_entire_binding(),
        }],
    });

    LightResources {
        bgl,
        bind_group,
        uniform_buffer,
        shadow_view,
        shadow_pipeline,
        shadow_uniform_buffer,
        shadow_bind_group,
    }
}

impl LightResources {
    /// Upload the light for this frame; returns the shadow camera matrix.
    pub(crate) fn write(&self, queue: &wgpu::Queue, params: &SpotLightParams, position: Vec3) -> Mat4 {
        let view_proj = spot_shadow_matrix(position, Vec3::ZERO, params.angle, params.shadow_focus);
        let u = LightUniforms::new(params, position, view_proj);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
        view_proj
    }

    pub(crate) fn shadow_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        mesh: &MeshBuffers,
        view_proj: Mat4,
        model: Mat4,
    ) {
        let u = ShadowUniforms {
            light_view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        };
        queue.write_buffer(&self.shadow_uniform_buffer, 0, bytemuck::bytes_of(&u));
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shadow_pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.shadow_pipeline);
        rpass.set_bind_group(0, &self.shadow_bind_group, &[]);
        mesh.draw_geometry(&mut rpass);
    }
}
