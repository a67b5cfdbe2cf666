//! Toroid engine crate.
//!
//! Procedural torus geometry, per-frame transform state, an asynchronous
//! device-resource lifecycle and a two-pass renderer (offscreen scene, then
//! a textured screen quad), plus the platform and GPU runtime that hosts it.

pub mod config;
pub mod error;

pub mod coords;
pub mod mesh;
pub mod paint;
pub mod transform;

pub mod render;
pub mod resources;

pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
pub mod core;

pub use config::{RendererConfig, ShaderNames};
pub use error::{MeshError, ResourceError};
