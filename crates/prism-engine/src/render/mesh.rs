//! Static per-vertex position/color buffers drawn with one MVP per draw.

use anyhow::{ensure, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::common::{create_pipeline, create_shader, PipelineDesc};
use super::uniform::MatrixUniformRing;
use super::{RenderCtx, RenderTarget};

/// Triangle-list mesh with separate position and color vertex buffers.
///
/// Data is uploaded once at creation and never changes.
pub struct ColoredMesh {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    vertex_count: u32,
}

impl ColoredMesh {
    pub fn upload(device: &wgpu::Device, label: &str, positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Result<Self> {
        validate_vertex_data(label, positions, colors)?;

        let positions_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} positions")),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} colors")),
            contents: bytemuck::cast_slice(colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("{label}: uploaded {} vertices", positions.len());

        Ok(Self {
            positions: positions_buf,
            colors: colors_buf,
            vertex_count: positions.len() as u32,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Rejects empty meshes and position/color arrays of different lengths.
fn validate_vertex_data(label: &str, positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Result<()> {
    ensure!(!positions.is_empty(), "{label}: mesh has no vertices");
    ensure!(
        positions.len() == colors.len(),
        "{label}: {} positions but {} colors",
        positions.len(),
        colors.len()
    );
    Ok(())
}

const VEC3_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

/// Draws [`ColoredMesh`]es, each with its own MVP matrix.
pub struct ColoredMeshRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms: MatrixUniformRing,
}

impl ColoredMeshRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let uniforms = MatrixUniformRing::new(ctx, "prism colored mesh mvp", wgpu::ShaderStages::VERTEX);

        let shader = create_shader(ctx, "prism colored mesh shader", include_str!("shaders/colored_mesh.wgsl"));

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism colored mesh pipeline layout"),
            bind_group_layouts: &[uniforms.layout()],
            immediate_size: 0,
        });

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRS,
            },
        ];

        let pipeline = create_pipeline(
            ctx,
            PipelineDesc {
                label: "prism colored mesh pipeline",
                shader: &shader,
                layout: &layout,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        Self { pipeline, uniforms }
    }

    /// Draws every mesh with its matrix, in order, in one pass.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draws: &[(&ColoredMesh, Mat4)]) {
        if draws.is_empty() {
            return;
        }

        let matrices: Vec<Mat4> = draws.iter().map(|(_, m)| *m).collect();
        self.uniforms.write(ctx, &matrices);

        let mut rpass = target.load_pass("prism colored mesh pass");
        rpass.set_pipeline(&self.pipeline);

        for (i, (mesh, _)) in draws.iter().enumerate() {
            rpass.set_bind_group(0, self.uniforms.bind_group(), &[self.uniforms.offset(i)]);
            rpass.set_vertex_buffer(0, mesh.positions.slice(..));
            rpass.set_vertex_buffer(1, mesh.colors.slice(..));
            rpass.draw(0..mesh.vertex_count, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_vertex_data_is_accepted() {
        let v = [[0.0; 3]; 3];
        assert!(validate_vertex_data("tri", &v, &v).is_ok());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = validate_vertex_data("empty", &[], &[]).unwrap_err();
        assert!(err.to_string().contains("no vertices"));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = validate_vertex_data("cube", &[[0.0; 3]; 4], &[[1.0; 3]; 3]).unwrap_err();
        assert_eq!(err.to_string(), "cube: 4 positions but 3 colors");
    }
}
