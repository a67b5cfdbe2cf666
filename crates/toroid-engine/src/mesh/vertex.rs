use bytemuck::{Pod, Zeroable};

/// Vertex shared by the torus and the screen quad.
///
/// ```text
/// offset  0  position  Float32x3  @location(0)
/// offset 12  color     Float32x3  @location(1)
/// offset 24  normal    Float32x3  @location(2)
/// offset 36  texcoord  Float32x2  @location(3)
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // color
        2 => Float32x3, // normal
        3 => Float32x2  // texcoord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
