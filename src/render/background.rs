use super::helpers;
use crate::core::background::ShaderFrame;
use crate::core::plane::{BackgroundPlane, PlaneVertex, PLANE_INDICES};
use crate::core::BackgroundParams;
use glam::Vec2;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackgroundUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) mouse: [f32; 2],
    pub(crate) time: f32,
    pub(crate) total: f32,
    pub(crate) min_size: f32,
    pub(crate) max_size: f32,
    pub(crate) y_distribution: f32,
    pub(crate) noise_intensity: f32,
    pub(crate) noise_definition: f32,
    pub(crate) _pad0: f32,
    pub(crate) glow_pos: [f32; 2],
    pub(crate) _pad1: [f32; 2],
    pub(crate) bg_color: [f32; 4],
    pub(crate) rect_color: [f32; 4],
}

impl BackgroundUniforms {
    pub(crate) fn new(frame: &ShaderFrame, mouse: Vec2, params: &BackgroundParams) -> Self {
        let [br, bg, bb] = params.bg_color;
        let [rr, rg, rb] = params.rect_color;
        Self {
            resolution: frame.resolution.to_array(),
            mouse: mouse.to_array(),
            time: frame.time,
            total: params.total,
            min_size: params.min_size,
            max_size: params.max_size,
            y_distribution: params.y_distribution,
            noise_intensity: params.noise_intensity,
            noise_definition: params.noise_definition,
            _pad0: 0.0,
            glow_pos: params.glow_pos,
            _pad1: [0.0; 2],
            bg_color: [br, bg, bb, 1.0],
            rect_color: [rr, rg, rb, 1.0],
        }
    }
}

pub(crate) struct BackgroundResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    /// `Scene::plane_generation` the vertex buffer was built from.
    pub(crate) plane_generation: u64,
}

pub(crate) fn create_background_resources(
    device: &wgpu::Device,
    camera_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
    plane: &BackgroundPlane,
    plane_generation: u64,
) -> BackgroundResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("background_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::BACKGROUND_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("background_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("background_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("background_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_plane"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PlaneVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // both faces, no depth test or write
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(false, wgpu::CompareFunction::Always)),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_background"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("background_uniforms"),
        size: std::mem::size_of::<BackgroundUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("background_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_ib"),
        contents: bytemuck::cast_slice(&PLANE_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });

    BackgroundResources {
        pipeline,
        uniform_buffer,
        bind_group,
        vertex_buffer: create_plane_vb(device, plane),
        index_buffer,
        plane_generation,
    }
}

fn create_plane_vb(device: &wgpu::Device, plane: &BackgroundPlane) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_vb"),
        contents: bytemuck::cast_slice(&plane.vertices()),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

impl BackgroundResources {
    /// Replace the plane geometry when the scene has rebuilt it.
    pub(crate) fn sync_plane(&mut self, device: &wgpu::Device, plane: &BackgroundPlane, generation: u64) {
        if generation == self.plane_generation {
            return;
        }
        self.vertex_buffer = create_plane_vb(device, plane);
        self.plane_generation = generation;
        log::debug!("[gpu] plane rebuilt {:.2}x{:.2}", plane.width, plane.height);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, camera_bg: &wgpu::BindGroup) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, camera_bg, &[]);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
    }
}
