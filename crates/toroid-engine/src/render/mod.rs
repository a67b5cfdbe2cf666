//! Two-pass renderer.
//!
//! Pass 1 draws the torus into an offscreen color target; pass 2 draws a
//! screen-sized quad sampling that target into the presented surface. Both
//! passes share one depth target and one uniform buffer.

mod ctx;
mod pipeline;
mod plan;
mod targets;

pub use ctx::RenderCtx;
pub use pipeline::{FrameOutcome, RenderPipeline};
pub use plan::{plan_frame, PassKind, PassPlan, PassTarget, QUAD_INDEX_COUNT};
pub use targets::{create_scene_sampler, RenderTargets, TargetFormats};
