//! Immediate-mode drawing on top of wgpu.
//!
//! [`Immediate`] records vertices between `begin`/`end` with an implicit
//! current color and model-view matrix, the way the fixed-function API does.
//! Vertices are projected on the CPU and collected into an [`ImmediateBatch`]
//! of ordered draw runs, which [`ImmediateRenderer`] uploads and draws once
//! per frame.

mod batch;
mod recorder;
mod renderer;

pub use batch::{ClipVertex, DrawRun, ImmediateBatch, Primitive, Topology};
pub use recorder::Immediate;
pub use renderer::ImmediateRenderer;
