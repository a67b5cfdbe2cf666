/// Output size in physical pixels.
///
/// Projection and screen-quad extents are derived from this value, so it is
/// re-queried on every window-size change.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width divided by height. Undefined for an invalid viewport.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        self.width / self.height
    }

    /// Size rounded to whole texels, never below 1x1.
    #[inline]
    pub fn texel_size(self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}
