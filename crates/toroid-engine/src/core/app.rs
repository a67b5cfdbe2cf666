use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::device::Gpu;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
pub trait App {
    /// Called once the window and its GPU context exist.
    fn on_window_created(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> AppControl {
        let _ = (window, gpu);
        AppControl::Continue
    }

    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured for a new size.
    fn on_resized(&mut self, window_id: WindowId, gpu: &Gpu<'_>) -> AppControl {
        let _ = (window_id, gpu);
        AppControl::Continue
    }

    /// Called once per redraw per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
