/// Device handles plus the presented surface for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_view: &'a wgpu::TextureView,
    /// Physical size of `surface_view`.
    pub surface_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_view: &'a wgpu::TextureView,
        surface_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            surface_view,
            surface_size,
        }
    }
}
