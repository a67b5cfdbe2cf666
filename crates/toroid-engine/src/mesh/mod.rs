//! Procedural geometry: the torus drawn by the scene pass and the screen
//! quad drawn by the composite pass.

mod mesh;
mod quad;
mod torus;
mod vertex;

pub use mesh::Mesh;
pub use quad::{build_screen_quad, SCREEN_QUAD_INDICES};
pub use torus::{build_torus, TorusParams};
pub use vertex::Vertex;
