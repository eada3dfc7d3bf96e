use std::sync::Arc;

use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer.
pub trait App {
    /// Called once after the window and GPU context exist.
    ///
    /// GPU-resource construction belongs here; an error is fatal and aborts
    /// the runtime (a pipeline/shader mismatch is not a recoverable
    /// condition).
    fn on_ready(&mut self, window: &Arc<Window>, gpu: &Gpu) -> Result<()> {
        let _ = (window, gpu);
        Ok(())
    }

    /// Called for window events, before the runtime's own handling.
    fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
