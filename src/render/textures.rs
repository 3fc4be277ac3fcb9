use crate::core::ENV_MAP_TEXTURE;
use fnv::FnvHashMap;

pub(crate) const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Decoded, uploaded textures keyed by file name, plus the environment-map
/// bind group (group 3 of the mesh pipeline).
///
/// Until the environment texture arrives the bind group points at a 1x1
/// neutral placeholder, so the mesh can draw as soon as it has loaded.
pub(crate) struct TextureLibrary {
    textures: FnvHashMap<String, wgpu::TextureView>,
    sampler: wgpu::Sampler,
    pub(crate) env_bgl: wgpu::BindGroupLayout,
    pub(crate) env_bind_group: wgpu::BindGroup,
}

impl TextureLibrary {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let env_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("env_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let placeholder = upload_rgba(device, queue, "env_placeholder", 1, 1, &[128, 128, 128, 255]);
        let env_bind_group = env_bind_group(device, &env_bgl, &placeholder, &sampler);
        Self {
            textures: FnvHashMap::default(),
            sampler,
            env_bgl,
            env_bind_group,
        }
    }

    /// Upload a decoded image under `name`; the environment map is rebound
    /// when it arrives.
    pub(crate) fn insert(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        image: &image::RgbaImage,
    ) {
        let (width, height) = image.dimensions();
        let view = upload_rgba(device, queue, name, width, height, image.as_raw());
        if name == ENV_MAP_TEXTURE {
            self.env_bind_group = env_bind_group(device, &self.env_bgl, &view, &self.sampler);
            log::info!("[gpu] environment map bound ({}x{})", width, height);
        }
        self.textures.insert(name.to_string(), view);
    }

    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }
}

fn env_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("env_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
