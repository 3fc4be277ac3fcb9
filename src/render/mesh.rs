use super::helpers;
use crate::core::mesh::{MeshData, MeshVertex};
use crate::core::{MaterialState, MeshTransform, TONE_MAPPING_EXPOSURE};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    pub(crate) base_color: [f32; 4],
    pub(crate) ior: f32,
    pub(crate) transmission: f32,
    pub(crate) roughness: f32,
    pub(crate) metalness: f32,
    pub(crate) env_intensity: f32,
    pub(crate) flat_shading: f32,
    pub(crate) exposure: f32,
    pub(crate) _pad: f32,
}

impl MaterialUniforms {
    pub(crate) fn new(m: &MaterialState) -> Self {
        Self {
            base_color: [1.0; 4],
            ior: m.ior,
            transmission: m.transmission,
            roughness: m.roughness,
            metalness: m.metalness,
            env_intensity: m.env_map_intensity,
            flat_shading: if m.flat_shading { 1.0 } else { 0.0 },
            exposure: TONE_MAPPING_EXPOSURE,
            _pad: 0.0,
        }
    }
}

pub(crate) struct MeshPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) object_bgl: wgpu::BindGroupLayout,
}

pub(crate) fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

pub(crate) fn create_mesh_pipeline(
    device: &wgpu::Device,
    camera_bgl: &wgpu::BindGroupLayout,
    light_bgl: &wgpu::BindGroupLayout,
    env_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> MeshPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::MESH_WGSL.into()),
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
            helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[camera_bgl, &object_bgl, light_bgl, env_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("mesh_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_mesh"),
            buffers: &[mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(true, wgpu::CompareFunction::Less)),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_mesh"),
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
    MeshPipeline {
        pipeline,
        object_bgl,
    }
}

/// GPU side of the loaded mesh: geometry plus its object and material uniforms.
pub struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MeshBuffers {
    pub(crate) fn upload(device: &wgpu::Device, pipeline: &MeshPipeline, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vb"),
            contents: bytemuck::cast_slice(&data.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_ib"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let object_buffer = helpers::uniform_buffer(
            device,
            "object_uniforms",
            &ObjectUniforms {
                model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            },
        );
        let material_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material_uniforms"),
            size: std::mem::size_of::<MaterialUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &pipeline.object_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            object_buffer,
            material_buffer,
            bind_group,
        }
    }

    /// Push this frame's transform, and the material when it is dirty.
    pub(crate) fn write(&self, queue: &wgpu::Queue, transform: &MeshTransform, material: &mut MaterialState) {
        let object = ObjectUniforms {
            model: transform.model_matrix().to_cols_array_2d(),
        };
        queue.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(&object));
        if material.needs_update {
            let m = MaterialUniforms::new(material);
            queue.write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(&m));
            material.needs_update = false;
        }
    }

    pub(crate) fn draw_geometry(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        pipeline: &MeshPipeline,
        camera_bg: &wgpu::BindGroup,
        light_bg: &wgpu::BindGroup,
        env_bg: &wgpu::BindGroup,
    ) {
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, camera_bg, &[]);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_bind_group(2, light_bg, &[]);
        rpass.set_bind_group(3, env_bg, &[]);
        self.draw_geometry(rpass);
    }
}
