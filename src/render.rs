use crate::core::mesh::MeshData;
use crate::core::plane::BackgroundPlane;
use crate::core::{MeshSlot, Scene, SceneParams, MSAA_SAMPLES};
use glam::Vec3;
use web_sys as web;

mod background;
mod helpers;
mod light;
mod mesh;
mod targets;
mod textures;

use background::{create_background_resources, BackgroundResources, BackgroundUniforms};
use light::{create_light_resources, LightResources};
use mesh::{create_mesh_pipeline, MeshPipeline};
pub use mesh::MeshBuffers;
use targets::RenderTargets;
use textures::TextureLibrary;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
}

pub type SceneState = Scene<MeshBuffers>;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    background: BackgroundResources,
    mesh_pipeline: MeshPipeline,
    light: LightResources,
    textures: TextureLibrary,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        plane: BackgroundPlane,
        plane_generation: u64,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // the background writes raw values and the mesh shader encodes sRGB itself
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };
        log::info!(
            "[gpu] surface {:?} {}x{} msaa={} alpha={:?}",
            format,
            width,
            height,
            sample_count,
            alpha_mode
        );
        let targets = RenderTargets::new(&device, format, width, height, sample_count);

        let camera_bgl = helpers::camera_bind_group_layout(&device);
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let background = create_background_resources(
            &device,
            &camera_bgl,
            format,
            sample_count,
            &plane,
            plane_generation,
        );
        let light = create_light_resources(&device);
        let textures = TextureLibrary::new(&device, &queue);
        let mesh_pipeline = create_mesh_pipeline(
            &device,
            &camera_bgl,
            &light.bgl,
            &textures.env_bgl,
            format,
            sample_count,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            camera_buffer,
            camera_bind_group,
            background,
            mesh_pipeline,
            light,
            textures,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface configuration and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.config.format, self.width, self.height);
    }

    pub fn upload_mesh(&self, data: &MeshData) -> MeshBuffers {
        MeshBuffers::upload(&self.device, &self.mesh_pipeline, data)
    }

    pub fn insert_texture(&mut self, name: &str, image: &image::RgbaImage) {
        self.textures.insert(&self.device, &self.queue, name, image);
        log::debug!("[gpu] {} textures resident", self.textures.len());
    }

    pub fn render(&mut self, scene: &mut SceneState, params: &SceneParams) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera_uniforms(scene)),
        );
        self.background
            .sync_plane(&self.device, &scene.plane, scene.plane_generation);
        let bg = BackgroundUniforms::new(&scene.shader_frame(), scene.pointer, &params.background);
        self.queue
            .write_buffer(&self.background.uniform_buffer, 0, bytemuck::bytes_of(&bg));
        let shadow_view_proj = self
            .light
            .write(&self.queue, &params.light, scene.spot_position);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        if let MeshSlot::Loaded(mesh) = &mut scene.mesh {
            mesh.gpu
                .write(&self.queue, &mesh.transform, &mut mesh.material);
            if params.light.shadows {
                self.light.shadow_pass(
                    &mut encoder,
                    &self.queue,
                    &mesh.gpu,
                    shadow_view_proj,
                    mesh.transform.model_matrix(),
                );
            }
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(
                    self.targets
                        .color_attachment(&view, wgpu::Color::TRANSPARENT),
                )],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.background.draw(&mut rpass, &self.camera_bind_group);
            if let Some(mesh) = scene.mesh.loaded() {
                mesh.gpu.draw(
                    &mut rpass,
                    &self.mesh_pipeline,
                    &self.camera_bind_group,
                    &self.light.bind_group,
                    &self.textures.env_bind_group,
                );
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn camera_uniforms(scene: &SceneState) -> CameraUniforms {
    let eye: Vec3 = scene.camera.eye;
    CameraUniforms {
        view_proj: scene.camera.view_projection().to_cols_array_2d(),
        eye: eye.extend(1.0).to_array(),
    }
}
