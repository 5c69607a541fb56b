//! Transform math shared by the programs.
//!
//! Conventions:
//! - right-handed eye space, camera looking down -Z
//! - clip-space depth in `[0, 1]` (wgpu)
//! - column-major `glam::Mat4`, column vectors: `mvp = projection * model_view`

mod projection;
mod spin;
mod transform;

pub use projection::{AspectRatios, Projection};
pub use spin::Spin;
pub use transform::{mvp, rotation_deg, MatrixStack};

pub use glam::{Mat4, Vec3, Vec4};
