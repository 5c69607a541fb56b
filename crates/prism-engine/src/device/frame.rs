/// A single acquired swap-chain image plus the encoder recording into it.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// image, so submit it through [`Gpu::submit`](super::Gpu::submit) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
