//! Flat quads sampled from one texture, drawn as indexed triangle fans.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::common::{create_pipeline, create_shader, PipelineDesc};
use super::texture::Texture2d;
use super::uniform::MatrixUniformRing;
use super::{RenderCtx, RenderTarget};

/// Four corners in fan order; texcoords `(0,0) (1,0) (1,1) (0,1)` follow the same order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedQuad {
    pub corners: [[f32; 3]; 4],
}

impl TexturedQuad {
    pub const fn new(corners: [[f32; 3]; 4]) -> Self {
        Self { corners }
    }
}

const QUAD_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Fan `0-1-2-3` as two triangles.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const TEXCOORD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

/// Draws a fixed set of quads with one MVP matrix and one texture.
///
/// Every quad has its own region of the position buffer; the quads are drawn
/// with the shared index list and a per-quad base vertex.
pub struct TexturedQuadRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms: MatrixUniformRing,
    texture_bind_group: wgpu::BindGroup,
    positions: wgpu::Buffer,
    texcoords: wgpu::Buffer,
    indices: wgpu::Buffer,
    quad_count: u32,
}

impl TexturedQuadRenderer {
    pub fn new(ctx: &RenderCtx<'_>, texture: &Texture2d, quads: &[TexturedQuad]) -> Self {
        let uniforms = MatrixUniformRing::new(ctx, "prism textured quad mvp", wgpu::ShaderStages::VERTEX);

        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism textured quad texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism textured quad texture bind group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        });

        let shader = create_shader(ctx, "prism textured quad shader", include_str!("shaders/textured.wgsl"));

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism textured quad pipeline layout"),
            bind_group_layouts: &[uniforms.layout(), &texture_layout],
            immediate_size: 0,
        });

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &TEXCOORD_ATTRS,
            },
        ];

        let pipeline = create_pipeline(
            ctx,
            PipelineDesc {
                label: "prism textured quad pipeline",
                shader: &shader,
                layout: &layout,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        let (positions, texcoords) = quad_vertices(quads);

        let positions = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism textured quad positions"),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let texcoords = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism textured quad texcoords"),
            contents: bytemuck::cast_slice(&texcoords),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism textured quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            uniforms,
            texture_bind_group,
            positions,
            texcoords,
            indices,
            quad_count: quads.len() as u32,
        }
    }

    pub fn quad_count(&self) -> u32 {
        self.quad_count
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, mvp: Mat4) {
        if self.quad_count == 0 {
            return;
        }

        self.uniforms.write(ctx, &[mvp]);

        let mut rpass = target.load_pass("prism textured quad pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, self.uniforms.bind_group(), &[self.uniforms.offset(0)]);
        rpass.set_bind_group(1, &self.texture_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.texcoords.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);

        for quad in 0..self.quad_count {
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, (quad * 4) as i32, 0..1);
        }
    }
}

/// Positions of all quads back to back, with the texcoords repeated per quad.
///
/// An empty quad list still yields one degenerate quad so the buffers are
/// never zero-sized.
fn quad_vertices(quads: &[TexturedQuad]) -> (Vec<[f32; 3]>, Vec<[f32; 2]>) {
    if quads.is_empty() {
        return (vec![[0.0; 3]; 4], QUAD_TEXCOORDS.to_vec());
    }

    let positions = quads.iter().flat_map(|q| q.corners).collect();
    let texcoords = quads.iter().flat_map(|_| QUAD_TEXCOORDS).collect();
    (positions, texcoords)
}
