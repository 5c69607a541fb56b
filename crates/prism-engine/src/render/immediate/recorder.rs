use glam::{Mat4, Vec4};

use super::batch::{flatten, ClipVertex, ImmediateBatch, Primitive};
use crate::math::MatrixStack;
use crate::paint::Color;

/// `begin`/`vertex`/`end` recorder with fixed-function style state.
///
/// State that persists between blocks: projection, model-view matrix,
/// current color, point size and viewport. Vertices are transformed when they
/// are submitted, so later matrix changes do not affect them.
#[derive(Debug)]
pub struct Immediate {
    projection: Mat4,
    model_view: MatrixStack,
    color: Color,
    point_size: f32,
    viewport: (u32, u32),

    open: Option<Primitive>,
    pending: Vec<ClipVertex>,
    batch: ImmediateBatch,
}

impl Default for Immediate {
    fn default() -> Self {
        Self::new()
    }
}

impl Immediate {
    pub fn new() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            model_view: MatrixStack::default(),
            color: Color::WHITE,
            point_size: 1.0,
            viewport: (1, 1),
            open: None,
            pending: Vec::new(),
            batch: ImmediateBatch::default(),
        }
    }

    /// Drawable size in pixels; used to size points.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn model_view(&self) -> Mat4 {
        self.model_view.current()
    }

    pub fn load_identity(&mut self) {
        self.model_view.load_identity();
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.model_view.translate(x, y, z);
    }

    /// Rotates by `angle_deg` degrees about the axis `(x, y, z)`.
    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) {
        self.model_view.rotate(angle_deg, x, y, z);
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.model_view.scale(x, y, z);
    }

    pub fn color3(&mut self, r: f32, g: f32, b: f32) {
        self.color = Color::rgb(r, g, b);
    }

    pub fn color(&mut self, color: Color) {
        self.color = color;
    }

    /// Side length of points in pixels.
    pub fn point_size(&mut self, size: f32) {
        self.point_size = size.max(0.0);
    }

    pub fn begin(&mut self, primitive: Primitive) {
        if let Some(open) = self.open {
            log::warn!("begin({primitive:?}) inside open {open:?} block ignored");
            return;
        }
        self.open = Some(primitive);
    }

    pub fn vertex3(&mut self, x: f32, y: f32, z: f32) {
        if self.open.is_none() {
            log::warn!("vertex outside begin/end ignored");
            return;
        }

        let mvp = self.projection * self.model_view.current();
        let clip = mvp * Vec4::new(x, y, z, 1.0);
        self.pending.push(ClipVertex {
            position: clip.to_array(),
            color: self.color.to_array(),
        });
    }

    pub fn end(&mut self) {
        let Some(primitive) = self.open.take() else {
            log::warn!("end without begin ignored");
            return;
        };

        let half = [
            self.point_size / self.viewport.0 as f32,
            self.point_size / self.viewport.1 as f32,
        ];
        let (topology, vertices) = flatten(primitive, &self.pending, half);
        self.batch.push(topology, &vertices);
        self.pending.clear();
    }

    /// Takes everything recorded since the last call.
    pub fn take_batch(&mut self) -> ImmediateBatch {
        if let Some(open) = self.open.take() {
            log::warn!("{open:?} block left open at end of frame; discarding it");
            self.pending.clear();
        }
        std::mem::take(&mut self.batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::immediate::Topology;

    #[test]
    fn vertices_use_matrix_at_submission_time() {
        let mut imm = Immediate::new();
        imm.begin(Primitive::Lines);
        imm.translate(1.0, 0.0, 0.0);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.translate(1.0, 0.0, 0.0);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.end();

        let batch = imm.take_batch();
        let xs: Vec<f32> = batch.vertices().iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn color_is_sticky_across_vertices() {
        let mut imm = Immediate::new();
        imm.color3(1.0, 0.0, 0.0);
        imm.begin(Primitive::Triangles);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.vertex3(1.0, 0.0, 0.0);
        imm.color3(0.0, 0.0, 1.0);
        imm.vertex3(0.0, 1.0, 0.0);
        imm.end();

        let batch = imm.take_batch();
        let v = batch.vertices();
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v[1].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v[2].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn projection_applies_before_model_view() {
        let mut imm = Immediate::new();
        imm.set_projection(Mat4::from_scale(glam::Vec3::splat(2.0)));
        imm.translate(1.0, 0.0, 0.0);
        imm.begin(Primitive::Lines);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.vertex3(1.0, 0.0, 0.0);
        imm.end();

        let batch = imm.take_batch();
        assert_eq!(batch.vertices()[0].position, [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.vertices()[1].position, [4.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn point_size_is_in_pixels() {
        let mut imm = Immediate::new();
        imm.set_viewport(200, 100);
        imm.point_size(2.0);
        imm.begin(Primitive::Points);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.end();

        let batch = imm.take_batch();
        // 2px on a 200px wide viewport is 0.02 NDC wide, so half is 0.01.
        let first = batch.vertices()[0].position;
        assert!((first[0] + 0.01).abs() < 1e-6);
        assert!((first[1] + 0.02).abs() < 1e-6);
    }

    #[test]
    fn vertex_outside_block_is_ignored() {
        let mut imm = Immediate::new();
        imm.vertex3(0.0, 0.0, 0.0);
        imm.end();
        assert!(imm.take_batch().is_empty());
    }

    #[test]
    fn nested_begin_keeps_open_block() {
        let mut imm = Immediate::new();
        imm.begin(Primitive::Lines);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.vertex3(1.0, 0.0, 0.0);
        imm.begin(Primitive::Triangles);
        imm.vertex3(2.0, 0.0, 0.0);
        imm.end();

        let batch = imm.take_batch();
        // The stray vertex joins the line block and is dropped as an unpaired end.
        assert_eq!(batch.vertices().len(), 2);
        assert_eq!(batch.runs()[0].topology, Topology::LineList);
        assert_eq!(batch.vertices()[1].position[0], 1.0);
    }

    #[test]
    fn unterminated_block_is_discarded() {
        let mut imm = Immediate::new();
        imm.begin(Primitive::Lines);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.vertex3(1.0, 0.0, 0.0);
        assert!(imm.take_batch().is_empty());

        imm.begin(Primitive::Lines);
        imm.vertex3(0.0, 0.0, 0.0);
        imm.vertex3(1.0, 0.0, 0.0);
        imm.end();
        assert_eq!(imm.take_batch().vertices().len(), 2);
    }

    #[test]
    fn take_batch_resets_recording() {
        let mut imm = Immediate::new();
        imm.begin(Primitive::Quads);
        for _ in 0..4 {
            imm.vertex3(0.0, 0.0, 0.0);
        }
        imm.end();

        let batch = imm.take_batch();
        assert_eq!(batch.runs()[0].topology, Topology::TriangleList);
        assert_eq!(batch.runs()[0].count, 6);
        assert!(imm.take_batch().is_empty());
    }
}
