use anyhow::Result;

use crate::input::{InputFrame, InputState};
use crate::render::RenderCtx;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Program contract driven by the runtime.
///
/// Call order: `init` once after the GPU context exists, `on_resize` with the
/// initial size and on every resize, then per frame `on_input` followed by
/// `on_frame`.
pub trait App {
    /// One-time resource creation. An error aborts the program before the
    /// first frame.
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Drawable size changed (physical pixels; either side may be 0).
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Input gathered since the previous frame.
    fn on_input(&mut self, frame: &InputFrame, state: &InputState, runtime: &mut RuntimeCtx) {
        let _ = (frame, state, runtime);
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
