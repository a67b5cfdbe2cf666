//! Output-surface geometry consumed by the renderer.
//!
//! Sizes are physical pixels. The screen quad is laid out in the same units,
//! centred on the origin, +X right, +Y up.

mod orientation;
mod viewport;

pub use orientation::DisplayOrientation;
pub use viewport::Viewport;

/// Answer to the output-size query: current pixel size plus the orientation
/// correction of the presented surface.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OutputSize {
    pub viewport: Viewport,
    pub orientation: DisplayOrientation,
}

impl OutputSize {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            orientation: DisplayOrientation::Identity,
        }
    }

    #[inline]
    pub const fn with_orientation(mut self, orientation: DisplayOrientation) -> Self {
        self.orientation = orientation;
        self
    }
}
