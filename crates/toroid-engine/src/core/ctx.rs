use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{FrameOutcome, RenderCtx};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:      WindowCtx<'a>,
    pub gpu:         &'a mut Gpu<'w>,
    pub input:       &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time:        FrameTime,
    pub runtime:     &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the surface texture, calls `draw` with a ready [`RenderCtx`]
    /// and presents the frame if anything was drawn.
    ///
    /// A skipped frame is discarded instead of presented. Surface errors are
    /// mapped to an action; only fatal ones stop the app.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>) -> FrameOutcome,
    {
        let frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let outcome = {
            let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), &frame.view, frame.size());
            draw(&rctx)
        };

        if outcome == FrameOutcome::Rendered {
            self.window.window.pre_present_notify();
            frame.present();
        }

        AppControl::Continue
    }
}
