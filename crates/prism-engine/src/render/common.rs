//! Pipeline state shared by all renderers.

use std::num::NonZeroU64;

use super::RenderCtx;

/// Size of one column-major 4x4 `f32` matrix.
pub(super) const MAT4_SIZE: u64 = std::mem::size_of::<[f32; 16]>() as u64;

pub(super) fn mat4_binding_size() -> NonZeroU64 {
    NonZeroU64::new(MAT4_SIZE).expect("a 4x4 matrix has non-zero size")
}

/// Depth test that lets later draws at equal depth win, like `GL_LEQUAL`.
pub(super) fn depth_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Both faces are drawn so rotating shapes show their back sides.
pub(super) fn primitive_state(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

pub(super) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub layout: &'a wgpu::PipelineLayout,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
}

pub(super) fn create_pipeline(ctx: &RenderCtx<'_>, desc: PipelineDesc<'_>) -> wgpu::RenderPipeline {
    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),

        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: desc.buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: primitive_state(desc.topology),
        depth_stencil: Some(depth_state(ctx.depth_format)),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

pub(super) fn create_shader(ctx: &RenderCtx<'_>, label: &str, source: &str) -> wgpu::ShaderModule {
    ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Rounds `size` up to a multiple of `align` (`align` > 0).
pub(super) fn align_up(size: u64, align: u64) -> u64 {
    debug_assert!(align > 0);
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_multiple() {
        assert_eq!(align_up(64, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(0, 256), 0);
    }

    #[test]
    fn depth_test_is_less_equal() {
        let state = depth_state(wgpu::TextureFormat::Depth32Float);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::LessEqual);
        assert!(state.depth_write_enabled);
    }

    #[test]
    fn faces_are_not_culled() {
        assert_eq!(primitive_state(wgpu::PrimitiveTopology::TriangleList).cull_mode, None);
    }
}
