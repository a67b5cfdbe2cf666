use crate::coords::Viewport;
use crate::error::MeshError;

use super::{Mesh, Vertex};

/// Two triangles over the four corners below.
pub const SCREEN_QUAD_INDICES: [u16; 6] = [3, 1, 0, 2, 3, 0];

/// Builds the composite-pass quad covering `viewport` in pixel units.
///
/// The composite camera looks down +Z in a right-handed frame, which
/// mirrors X on screen, so `u` runs right-to-left in object space. `v` is
/// flipped to follow the texture's top-down row order.
pub fn build_screen_quad(viewport: Viewport) -> Result<Mesh, MeshError> {
    if !viewport.is_valid() {
        return Err(MeshError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let hx = viewport.width / 2.0;
    let hy = viewport.height / 2.0;

    let corner = |x: f32, y: f32, u: f32, v: f32| Vertex {
        position: [x, y, 0.0],
        color: [0.0; 3],
        normal: [0.0, 0.0, -1.0],
        texcoord: [u, v],
    };

    let vertices = vec![
        corner(-hx, -hy, 1.0, 1.0),
        corner(-hx, hy, 1.0, 0.0),
        corner(hx, -hy, 0.0, 1.0),
        corner(hx, hy, 0.0, 0.0),
    ];

    Ok(Mesh {
        vertices,
        indices: SCREEN_QUAD_INDICES.to_vec(),
    })
}
