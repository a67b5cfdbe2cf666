//! Device-resource lifecycle: shader loading, buffer upload, render targets
//! and the readiness gate that keeps rendering off until all of it exists.

mod gpu_mesh;
mod lifecycle;
mod loader;
mod readiness;
mod shaders;

pub use gpu_mesh::GpuMesh;
pub use lifecycle::{create_device_resources, DeviceResources, SizeDependent};
pub use loader::{ByteLoader, FileLoader, StaticLoader};
pub use readiness::{ReadinessGate, ResourceTask};
pub use shaders::{load_shader, load_shader_source, validate_wgsl};
