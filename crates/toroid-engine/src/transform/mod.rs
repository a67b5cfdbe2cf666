//! Per-frame transform state: model/view/projection plus eye and light,
//! one block per render pass.

mod block;
pub mod camera;
mod state;
mod tracking;

pub use block::TransformBlock;
pub use state::{idle_angle, tracking_angle, TransformState};
pub use tracking::TrackingHandle;
