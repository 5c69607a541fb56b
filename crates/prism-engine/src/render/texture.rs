use anyhow::{ensure, Result};

/// Generates an RGBA8 checkerboard.
///
/// `cell` is the bit tested on row and column indices: a texel is white when
/// exactly one of `row & cell` / `col & cell` is zero, black otherwise. With
/// `cell = 8` the cells are 8 texels wide. Alpha is always opaque.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        for col in 0..width {
            let white = ((row & cell) == 0) ^ ((col & cell) == 0);
            let c = if white { 255 } else { 0 };
            pixels.extend_from_slice(&[c, c, c, 255]);
        }
    }
    pixels
}

/// Checks that `len` bytes hold exactly `width * height` RGBA8 texels.
fn validate_rgba8(label: &str, width: u32, height: u32, len: usize) -> Result<()> {
    ensure!(width > 0 && height > 0, "{label}: texture size {width}x{height} is empty");
    let expected = width as usize * height as usize * 4;
    ensure!(
        len == expected,
        "{label}: expected {expected} bytes for {width}x{height} RGBA8, got {len}"
    );
    Ok(())
}

/// Sampled 2D texture with its view and a nearest/repeat sampler.
pub struct Texture2d {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl Texture2d {
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        validate_rgba8(label, width, height, pixels.len())?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("{label}: uploaded {width}x{height} texture");

        Ok(Self { texture, view, sampler })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(pixels: &[u8], width: u32, row: u32, col: u32) -> [u8; 4] {
        let i = ((row * width + col) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn checkerboard_has_four_bytes_per_texel() {
        assert_eq!(checkerboard(64, 64, 8).len(), 64 * 64 * 4);
        assert_eq!(checkerboard(3, 5, 8).len(), 3 * 5 * 4);
    }

    #[test]
    fn origin_cell_is_black() {
        let px = checkerboard(64, 64, 8);
        assert_eq!(texel(&px, 64, 0, 0), [0, 0, 0, 255]);
        assert_eq!(texel(&px, 64, 7, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn cells_flip_every_eight_texels() {
        let px = checkerboard(64, 64, 8);
        assert_eq!(texel(&px, 64, 0, 8), [255, 255, 255, 255]);
        assert_eq!(texel(&px, 64, 8, 0), [255, 255, 255, 255]);
        assert_eq!(texel(&px, 64, 8, 8), [0, 0, 0, 255]);
        assert_eq!(texel(&px, 64, 15, 16), [255, 255, 255, 255]);
        assert_eq!(texel(&px, 64, 16, 16), [0, 0, 0, 255]);
    }

    #[test]
    fn rgba8_length_must_match_size() {
        assert!(validate_rgba8("tex", 64, 64, 64 * 64 * 4).is_ok());

        let err = validate_rgba8("tex", 64, 64, 64 * 64 * 3).unwrap_err();
        assert_eq!(err.to_string(), "tex: expected 16384 bytes for 64x64 RGBA8, got 12288");
    }

    #[test]
    fn zero_sized_texture_is_rejected() {
        assert!(validate_rgba8("tex", 0, 64, 0).is_err());
        assert!(validate_rgba8("tex", 64, 0, 0).is_err());
    }

    #[test]
    fn alpha_is_always_opaque() {
        let px = checkerboard(16, 16, 8);
        assert!(px.chunks_exact(4).all(|t| t[3] == 255));
    }
}
