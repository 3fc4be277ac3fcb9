use super::helpers;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen attachments of the main pass.
///
/// - `msaa_*` is the multisampled colour target resolved into the swapchain
///   image; absent when the surface format cannot be multisampled.
/// - `depth_*` matches the colour target's sample count.
pub(crate) struct RenderTargets {
    pub(crate) sample_count: u32,
    pub(crate) msaa_tex: Option<wgpu::Texture>,
    pub(crate) msaa_view: Option<wgpu::TextureView>,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let (msaa_tex, msaa_view) = create_msaa(device, color_format, width, height, sample_count);
        let (depth_tex, depth_view) = helpers::create_render_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            sample_count,
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        *self = Self::new(device, color_format, width, height, self.sample_count);
    }

    /// Colour attachment for the main pass, resolving into `frame` when
    /// multisampled.
    pub(crate) fn color_attachment<'v>(
        &'v self,
        frame: &'v wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'v> {
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(frame)),
            None => (frame, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                // the resolve target keeps the image
                store: if resolve_target.is_some() {
                    wgpu::StoreOp::Discard
                } else {
                    wgpu::StoreOp::Store
                },
            },
        }
    }
}

fn create_msaa(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> (Option<wgpu::Texture>, Option<wgpu::TextureView>) {
    if sample_count <= 1 {
        return (None, None);
    }
    let (tex, view) = helpers::create_render_texture(
        device,
        "msaa_color",
        width,
        height,
        format,
        sample_count,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    );
    (Some(tex), Some(view))
}
