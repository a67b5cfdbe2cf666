use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Uniform block shared by both passes.
///
/// Matrices are column-major, matching WGSL's `mat4x4<f32>`, so they upload
/// without a transpose.
///
/// ```text
/// offset   0  model       mat4x4<f32>
/// offset  64  view        mat4x4<f32>
/// offset 128  projection  mat4x4<f32>
/// offset 192  eye         vec4<f32>
/// offset 208  light       vec4<f32>
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformBlock {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub light: [f32; 4],
}

impl TransformBlock {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(model: Mat4, view: Mat4, projection: Mat4, eye: Vec4, light: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            eye: eye.to_array(),
            light: light.to_array(),
        }
    }

    #[inline]
    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection)
    }

    #[inline]
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model.to_cols_array_2d();
    }

    /// Full clip-space transform.
    pub fn clip_from_object(&self) -> Mat4 {
        self.projection() * self.view() * self.model()
    }
}

impl Default for TransformBlock {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ZERO, Vec4::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn layout_matches_wgsl_struct() {
        assert_eq!(TransformBlock::SIZE, 224);
        assert_eq!(offset_of!(TransformBlock, view), 64);
        assert_eq!(offset_of!(TransformBlock, projection), 128);
        assert_eq!(offset_of!(TransformBlock, eye), 192);
        assert_eq!(offset_of!(TransformBlock, light), 208);
    }

    #[test]
    fn default_matrices_are_identity() {
        let block = TransformBlock::default();
        assert_eq!(block.model(), Mat4::IDENTITY);
        assert_eq!(block.view(), Mat4::IDENTITY);
        assert_eq!(block.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn stored_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let mut block = TransformBlock::default();
        block.set_model(m);
        assert_eq!(block.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&block).len(), 224);
    }
}
