//! GPU device + surface management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue, configures the surface,
//! acquires frames and answers the output-size query.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
