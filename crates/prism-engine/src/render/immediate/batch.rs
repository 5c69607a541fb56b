use bytemuck::{Pod, Zeroable};

/// Primitive kinds accepted by [`Immediate::begin`](super::Immediate::begin).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Primitive {
    Points,
    Lines,
    LineLoop,
    Triangles,
    Quads,
}

/// GPU topology a primitive is flattened into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    LineList,
    TriangleList,
}

/// Vertex already transformed to clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ClipVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl ClipVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x4, // clip position
        1 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ClipVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Consecutive vertices drawn with one topology.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawRun {
    pub topology: Topology,
    pub first: u32,
    pub count: u32,
}

/// Flattened vertices of one frame, in submission order.
#[derive(Debug, Default, Clone)]
pub struct ImmediateBatch {
    vertices: Vec<ClipVertex>,
    runs: Vec<DrawRun>,
}

impl ImmediateBatch {
    pub fn vertices(&self) -> &[ClipVertex] {
        &self.vertices
    }

    pub fn runs(&self) -> &[DrawRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.runs.clear();
    }

    /// Appends vertices, extending the last run when the topology matches.
    pub(super) fn push(&mut self, topology: Topology, vertices: &[ClipVertex]) {
        if vertices.is_empty() {
            return;
        }

        let first = self.vertices.len() as u32;
        let count = vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);

        match self.runs.last_mut() {
            Some(run) if run.topology == topology => run.count += count,
            _ => self.runs.push(DrawRun {
                topology,
                first,
                count,
            }),
        }
    }
}

/// Converts the vertices of one `begin`/`end` block into a list topology.
///
/// Incomplete trailing groups are dropped. Points become screen-aligned
/// squares whose half size in NDC is `point_half`.
pub(super) fn flatten(
    primitive: Primitive,
    vertices: &[ClipVertex],
    point_half: [f32; 2],
) -> (Topology, Vec<ClipVertex>) {
    match primitive {
        Primitive::Lines => {
            let out = vertices.chunks_exact(2).flatten().copied().collect();
            (Topology::LineList, out)
        }

        Primitive::LineLoop => {
            let n = vertices.len();
            if n < 2 {
                return (Topology::LineList, Vec::new());
            }
            let mut out = Vec::with_capacity(n * 2);
            for i in 0..n {
                out.push(vertices[i]);
                out.push(vertices[(i + 1) % n]);
            }
            (Topology::LineList, out)
        }

        Primitive::Triangles => {
            let out = vertices.chunks_exact(3).flatten().copied().collect();
            (Topology::TriangleList, out)
        }

        Primitive::Quads => {
            let mut out = Vec::with_capacity(vertices.len() / 4 * 6);
            for q in vertices.chunks_exact(4) {
                out.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
            }
            (Topology::TriangleList, out)
        }

        Primitive::Points => {
            let mut out = Vec::with_capacity(vertices.len() * 6);
            for v in vertices {
                let [x, y, z, w] = v.position;
                // Offsets are scaled by w so they stay fixed in pixels after the divide.
                let hx = point_half[0] * w;
                let hy = point_half[1] * w;
                let corner = |dx: f32, dy: f32| ClipVertex {
                    position: [x + dx, y + dy, z, w],
                    color: v.color,
                };
                let (a, b, c, d) = (corner(-hx, -hy), corner(hx, -hy), corner(hx, hy), corner(-hx, hy));
                out.extend_from_slice(&[a, b, c, a, c, d]);
            }
            (Topology::TriangleList, out)
        }
    }
}
