use crate::coords::Viewport;
use crate::error::ResourceError;

/// Texture formats of the three attachments the passes draw into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetFormats {
    /// Presented surface; color target of the composite pass.
    pub surface: wgpu::TextureFormat,
    /// Offscreen color target; must be filterable.
    pub offscreen: wgpu::TextureFormat,
    /// Depth-stencil target shared by both passes.
    pub depth: wgpu::TextureFormat,
}

impl TargetFormats {
    pub const OFFSCREEN: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
    pub const DEPTH: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

    pub fn new(surface: wgpu::TextureFormat) -> Self {
        Self {
            surface,
            offscreen: Self::OFFSCREEN,
            depth: Self::DEPTH,
        }
    }
}

/// Offscreen color target plus the shared depth target, sized to the output.
pub struct RenderTargets {
    pub size: (u32, u32),
    pub color: wgpu::Texture,
    pub color_view: wgpu::TextureView,
    pub depth: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub fn new(
        device: &wgpu::Device,
        viewport: Viewport,
        formats: TargetFormats,
    ) -> Result<Self, ResourceError> {
        if !viewport.is_valid() {
            return Err(ResourceError::EmptyTarget {
                width: viewport.width.max(0.0) as u32,
                height: viewport.height.max(0.0) as u32,
            });
        }

        let (width, height) = viewport.texel_size();
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("toroid offscreen color"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: formats.offscreen,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("toroid depth"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: formats.depth,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        log::debug!("render targets created at {width}x{height}");

        Ok(Self {
            size: (width, height),
            color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
            color,
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
            depth,
        })
    }
}

/// Linear filtering, repeat addressing.
pub fn create_scene_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("toroid scene sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_format_is_filterable_color() {
        let formats = TargetFormats::new(wgpu::TextureFormat::Bgra8UnormSrgb);
        let features = formats.offscreen.guaranteed_format_features(wgpu::Features::empty());
        assert!(features.flags.contains(wgpu::TextureFormatFeatureFlags::FILTERABLE));
        assert!(features.allowed_usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT));
        assert!(formats.depth.has_depth_aspect());
        assert!(formats.depth.has_stencil_aspect());
    }
}
