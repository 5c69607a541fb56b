use super::batch::{ClipVertex, ImmediateBatch, Topology};
use crate::render::common::{create_pipeline, create_shader, PipelineDesc};
use crate::render::{RenderCtx, RenderTarget};

/// Draws an [`ImmediateBatch`] in recorded order.
///
/// Vertices arrive already in clip space, so the pipelines take no uniforms.
/// One pipeline per topology; both share the same shader and vertex layout.
#[derive(Default)]
pub struct ImmediateRenderer {
    pipelines: Option<Pipelines>,
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

struct Pipelines {
    format: wgpu::TextureFormat,
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
}

impl ImmediateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batch: &ImmediateBatch) {
        if batch.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_capacity(ctx, batch.vertices().len());

        let Some(vbo) = self.vbo.as_ref() else { return; };
        let Some(pipelines) = self.pipelines.as_ref() else { return; };

        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(batch.vertices()));

        let mut rpass = target.load_pass("prism immediate pass");
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for run in batch.runs() {
            let pipeline = match run.topology {
                Topology::LineList => &pipelines.lines,
                Topology::TriangleList => &pipelines.triangles,
            };
            rpass.set_pipeline(pipeline);
            rpass.draw(run.first..run.first + run.count, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }

        let shader = create_shader(ctx, "prism immediate shader", include_str!("../shaders/immediate.wgsl"));

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism immediate pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let buffers = [ClipVertex::layout()];
        let make = |label, topology| {
            create_pipeline(
                ctx,
                PipelineDesc {
                    label,
                    shader: &shader,
                    layout: &layout,
                    buffers: &buffers,
                    topology,
                },
            )
        };

        self.pipelines = Some(Pipelines {
            format: ctx.surface_format,
            lines: make("prism immediate lines", wgpu::PrimitiveTopology::LineList),
            triangles: make("prism immediate triangles", wgpu::PrimitiveTopology::TriangleList),
        });
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism immediate vbo"),
            size: (new_cap * std::mem::size_of::<ClipVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}
