//! Error types for mesh validation and GPU resource construction.

use thiserror::Error;

/// Rejected mesh-generation parameters.
///
/// Raised before anything reaches the GPU. Inputs are never clamped into a
/// valid range; the caller receives the error and decides what to do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("torus needs at least 3 rings, got {0}")]
    TooFewRings(u32),
    #[error("torus needs at least 3 tube segments, got {0}")]
    TooFewTubeSegments(u32),
    #[error("torus with {vertices} vertices does not fit 16-bit indices")]
    IndexOverflow { vertices: u64 },
    #[error("invalid torus radii: tube {tube}, ring {ring}")]
    InvalidRadii { tube: f32, ring: f32 },
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// Fatal failure while creating GPU-side resources.
///
/// Any of these aborts the transition to the ready state. There is no
/// automatic retry; the host decides whether to try again.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("failed to load '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no resource named '{0}'")]
    NotFound(String),
    #[error("shader '{0}' is not valid UTF-8")]
    NotUtf8(String),
    #[error("shader '{name}' failed to compile: {message}")]
    ShaderCompile { name: String, message: String },
    #[error("'{label}' rejected by the device: {message}")]
    Pipeline { label: String, message: String },
    #[error("mesh rejected: {0}")]
    Mesh(#[from] MeshError),
    #[error("cannot create a {width}x{height} render target")]
    EmptyTarget { width: u32, height: u32 },
    #[error("resource worker could not be started: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("resource worker stopped before reporting")]
    Disconnected,
}
