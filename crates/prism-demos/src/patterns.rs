//! The 2D pattern grid: six line/point figures laid out under an ortho view.

use prism_engine::math::AspectRatios;
use prism_engine::paint::Color;
use prism_engine::render::{Immediate, Primitive};

/// Distance between grid lines: three cells across a 25-unit figure.
pub const SPACING: f32 = 25.0 / 3.0;

/// Side of a dot in pixels.
pub const POINT_SIZE: f32 = 2.0;

/// Half extent of the square that must always stay visible.
pub const HALF_EXTENT: f32 = 50.0;

/// Depth at which every figure is placed.
pub const DEPTH: f32 = -6.0;

/// One `begin`/`end` block with a single color.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub primitive: Primitive,
    pub color: Color,
    pub vertices: Vec<[f32; 3]>,
}

impl Block {
    fn white(primitive: Primitive, vertices: Vec<[f32; 3]>) -> Self {
        Self {
            primitive,
            color: Color::WHITE,
            vertices,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pattern {
    Dots,
    Triangles,
    Boxes,
    LineRays,
    ColoredBoxes,
    BoxTriangles,
}

impl Pattern {
    pub fn blocks(self) -> Vec<Block> {
        match self {
            Pattern::Dots => dots(),
            Pattern::Triangles => triangles(),
            Pattern::Boxes => boxes(),
            Pattern::LineRays => line_rays(),
            Pattern::ColoredBoxes => colored_boxes(),
            Pattern::BoxTriangles => box_triangles(),
        }
    }
}

fn at(col: f32, row: f32) -> [f32; 3] {
    [SPACING * col, SPACING * row, 0.0]
}

/// 4x4 grid of points.
pub fn dots() -> Vec<Block> {
    let mut vertices = Vec::with_capacity(16);
    for x in 0..4 {
        for y in 0..4 {
            vertices.push(at(x as f32, y as f32));
        }
    }
    vec![Block::white(Primitive::Points, vertices)]
}

/// 3x3 cells, each outlined by a right triangle.
pub fn triangles() -> Vec<Block> {
    let mut blocks = Vec::with_capacity(9);
    for x in 0..3 {
        for y in 0..3 {
            let (x, y) = (x as f32, y as f32);
            blocks.push(Block::white(
                Primitive::LineLoop,
                vec![at(x, y), at(x, y + 1.0), at(x + 1.0, y + 1.0)],
            ));
        }
    }
    blocks
}

/// 3x3 grid made of 4 vertical and 4 horizontal lines.
pub fn boxes() -> Vec<Block> {
    let mut vertices = Vec::with_capacity(16);
    for i in 0..4 {
        vertices.push(at(i as f32, 0.0));
        vertices.push(at(i as f32, 3.0));
    }
    for i in 0..4 {
        vertices.push(at(0.0, i as f32));
        vertices.push(at(3.0, i as f32));
    }
    vec![Block::white(Primitive::Lines, vertices)]
}

/// Square outline with five rays fanning out from its top-left corner.
pub fn line_rays() -> Vec<Block> {
    let outline = vec![
        [25.0, 25.0, 0.0],
        [0.0, 25.0, 0.0],
        [0.0, 0.0, 0.0],
        [25.0, 0.0, 0.0],
    ];

    let corner = [0.0, 25.0, 0.0];
    let ends = [at(1.0, 0.0), at(2.0, 0.0), at(3.0, 0.0), at(3.0, 2.0), at(3.0, 1.0)];
    let rays = ends.iter().flat_map(|&end| [corner, end]).collect();

    vec![
        Block::white(Primitive::LineLoop, outline),
        Block::white(Primitive::Lines, rays),
    ]
}

/// 3x3 filled cells; the columns are red, green and blue.
pub fn colored_boxes() -> Vec<Block> {
    const COLUMN_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

    let mut blocks = Vec::with_capacity(9);
    for y in 0..3 {
        for (x, color) in COLUMN_COLORS.iter().enumerate() {
            let (x, y) = (x as f32, y as f32);
            blocks.push(Block {
                primitive: Primitive::Quads,
                color: *color,
                vertices: vec![at(x, y), at(x, y + 1.0), at(x + 1.0, y + 1.0), at(x + 1.0, y)],
            });
        }
    }
    blocks
}

/// 3x3 outlined cells, each split by its rising diagonal.
pub fn box_triangles() -> Vec<Block> {
    let mut blocks = Vec::with_capacity(18);
    for x in 0..3 {
        for y in 0..3 {
            let (x, y) = (x as f32, y as f32);
            blocks.push(Block::white(
                Primitive::LineLoop,
                vec![at(x, y), at(x, y + 1.0), at(x + 1.0, y + 1.0), at(x + 1.0, y)],
            ));
            blocks.push(Block::white(Primitive::Lines, vec![at(x, y), at(x + 1.0, y + 1.0)]));
        }
    }
    blocks
}

/// Figures in draw order with their translations.
///
/// The box grid is drawn a second time over the colored boxes so the cells
/// get white borders.
pub fn layout(ratios: AspectRatios) -> [(Pattern, [f32; 3]); 7] {
    let x = |v: f32| v * ratios.width_by_height;
    let y = |v: f32| v * ratios.height_by_width;

    [
        (Pattern::Dots, [x(-40.0), y(20.0), DEPTH]),
        (Pattern::Triangles, [x(-8.5), y(20.0), DEPTH]),
        (Pattern::Boxes, [x(20.0), y(20.0), DEPTH]),
        (Pattern::LineRays, [x(-8.5), y(-40.0), DEPTH]),
        (Pattern::ColoredBoxes, [x(20.0), y(-40.0), DEPTH]),
        (Pattern::Boxes, [x(20.0), y(-40.0), DEPTH]),
        (Pattern::BoxTriangles, [x(-40.0), y(-40.0), DEPTH]),
    ]
}

/// Records the whole grid into `imm`; projection and viewport must already be set.
pub fn record(imm: &mut Immediate, ratios: AspectRatios) {
    imm.point_size(POINT_SIZE);

    for (pattern, [tx, ty, tz]) in layout(ratios) {
        imm.load_identity();
        imm.translate(tx, ty, tz);

        for block in pattern.blocks() {
            imm.color(block.color);
            imm.begin(block.primitive);
            for [vx, vy, vz] in block.vertices {
                imm.vertex3(vx, vy, vz);
            }
            imm.end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::render::immediate::Topology;

    fn vertex_count(blocks: &[Block]) -> usize {
        blocks.iter().map(|b| b.vertices.len()).sum()
    }

    // ── generators ────────────────────────────────────────────────────────

    #[test]
    fn dots_are_a_four_by_four_grid() {
        let blocks = dots();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].primitive, Primitive::Points);
        assert_eq!(blocks[0].vertices.len(), 16);
        assert_eq!(blocks[0].vertices[15], [25.0, 25.0, 0.0]);
    }

    #[test]
    fn triangles_are_nine_closed_loops() {
        let blocks = triangles();
        assert_eq!(blocks.len(), 9);
        assert!(blocks.iter().all(|b| b.primitive == Primitive::LineLoop && b.vertices.len() == 3));
    }

    #[test]
    fn boxes_are_eight_lines_spanning_the_figure() {
        let blocks = boxes();
        assert_eq!(vertex_count(&blocks), 16);
        let v = &blocks[0].vertices;
        assert_eq!(v[0], [0.0, 0.0, 0.0]);
        assert_eq!(v[1], [0.0, 25.0, 0.0]);
        assert_eq!(v[15], [25.0, 25.0, 0.0]);
    }

    #[test]
    fn line_rays_start_at_top_left_corner() {
        let blocks = line_rays();
        assert_eq!(blocks[0].vertices.len(), 4);
        let rays = &blocks[1].vertices;
        assert_eq!(rays.len(), 10);
        assert!(rays.chunks_exact(2).all(|seg| seg[0] == [0.0, 25.0, 0.0]));
    }

    #[test]
    fn colored_boxes_color_by_column() {
        let blocks = colored_boxes();
        assert_eq!(blocks.len(), 9);
        for b in &blocks {
            let column = (b.vertices[0][0] / SPACING).round() as usize;
            let expected = [Color::RED, Color::GREEN, Color::BLUE][column];
            assert_eq!(b.color, expected);
            assert_eq!(b.primitive, Primitive::Quads);
        }
    }

    #[test]
    fn box_triangles_pair_outline_with_diagonal() {
        let blocks = box_triangles();
        assert_eq!(blocks.len(), 18);
        assert_eq!(blocks[0].primitive, Primitive::LineLoop);
        assert_eq!(blocks[1].vertices, vec![[0.0, 0.0, 0.0], at(1.0, 1.0)]);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_scales_translations_by_aspect() {
        let ratios = AspectRatios {
            width_by_height: 2.0,
            height_by_width: 1.0,
        };
        let placed = layout(ratios);
        assert_eq!(placed[0], (Pattern::Dots, [-80.0, 20.0, DEPTH]));
        assert_eq!(placed[6], (Pattern::BoxTriangles, [-80.0, -40.0, DEPTH]));
    }

    #[test]
    fn box_grid_overlays_colored_boxes() {
        let placed = layout(AspectRatios::default());
        assert_eq!(placed[4].0, Pattern::ColoredBoxes);
        assert_eq!(placed[5].0, Pattern::Boxes);
        assert_eq!(placed[4].1, placed[5].1);
    }

    #[test]
    fn record_emits_every_figure() {
        let mut imm = Immediate::new();
        imm.set_viewport(800, 600);
        record(&mut imm, AspectRatios::default());
        let batch = imm.take_batch();

        // dots | line figures | colored quads | box overlay and the rest
        let topologies: Vec<_> = batch.runs().iter().map(|r| r.topology).collect();
        assert_eq!(
            topologies,
            vec![Topology::TriangleList, Topology::LineList, Topology::TriangleList, Topology::LineList]
        );
    }
}
