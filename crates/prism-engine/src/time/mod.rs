//! Frame timing.
//!
//! - one `FrameClock` per window; call `tick()` once per presented frame
//! - `FpsCounter` averages the frame rate for periodic debug logging

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
