//! Prism engine crate.
//!
//! Owns the platform + GPU runtime pieces shared by the tutorial programs:
//! window loop, input, timing, logging, transform math and the renderers for
//! both the immediate-mode and the buffer-based drawing styles.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod math;
pub mod render;
pub mod paint;
