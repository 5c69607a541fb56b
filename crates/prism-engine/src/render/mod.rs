//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, bind groups) and
//! records into the frame's [`RenderTarget`] with load-and-store passes; the
//! frame clear happens once in `FrameCtx::render`.
//!
//! Convention: vertices are in right-handed eye/world units, projected with
//! an MVP matrix to clip space with depth in `[0, 1]`.

mod common;
mod ctx;
pub mod immediate;
pub mod mesh;
pub mod texture;
pub mod textured;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use immediate::{Immediate, ImmediateBatch, ImmediateRenderer, Primitive};
pub use mesh::{ColoredMesh, ColoredMeshRenderer};
pub use texture::{checkerboard, Texture2d};
pub use textured::{TexturedQuad, TexturedQuadRenderer};
