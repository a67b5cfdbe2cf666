/// Represents a single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// frame. Call `present` once all passes have been submitted.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl GpuFrame {
    /// Physical size of the acquired texture.
    pub fn size(&self) -> (u32, u32) {
        let t = &self.surface_texture.texture;
        (t.width(), t.height())
    }

    pub fn present(self) {
        drop(self.view);
        self.surface_texture.present();
    }
}
