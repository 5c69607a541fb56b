//! Pyramid and cube geometry shared by both rotating programs.

use prism_engine::math::{rotation_deg, Mat4, Vec3};
use prism_engine::paint::Color;
use prism_engine::render::{Immediate, Primitive};

const RED: [f32; 3] = Color::RED.to_rgb();
const GREEN: [f32; 3] = Color::GREEN.to_rgb();
const BLUE: [f32; 3] = Color::BLUE.to_rgb();

/// Four side faces (front, right, back, left) sharing the apex; no base.
pub const PYRAMID_POSITIONS: [[f32; 3]; 12] = [
    [0.0, 1.0, 0.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    //
    [0.0, 1.0, 0.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    //
    [0.0, 1.0, 0.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    //
    [0.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

/// Red apex; base corners alternate green and blue so shared corners match.
pub const PYRAMID_COLORS: [[f32; 3]; 12] = [
    RED, GREEN, BLUE, //
    RED, BLUE, GREEN, //
    RED, GREEN, BLUE, //
    RED, BLUE, GREEN,
];

/// Faces top, bottom, front, back, right, left; corners in fan order.
pub const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    [[1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
    [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]],
    [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]],
    [[1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]],
    [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]],
    [[-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]],
];

pub const CUBE_FACE_COLORS: [[f32; 3]; 6] = [
    RED,
    GREEN,
    BLUE,
    Color::CYAN.to_rgb(),
    Color::MAGENTA.to_rgb(),
    Color::YELLOW.to_rgb(),
];

/// Splits a convex fan `v0, v1, .., vn` into the triangles `(v0, vi, vi+1)`.
pub fn fan_to_triangles<T: Copy>(fan: &[T]) -> Vec<T> {
    if fan.len() < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((fan.len() - 2) * 3);
    for i in 1..fan.len() - 1 {
        out.extend_from_slice(&[fan[0], fan[i], fan[i + 1]]);
    }
    out
}

/// Cube as a flat triangle list with per-vertex colors (36 vertices).
pub fn cube_triangles() -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let mut positions = Vec::with_capacity(36);
    let mut colors = Vec::with_capacity(36);
    for (face, color) in CUBE_FACES.iter().zip(CUBE_FACE_COLORS) {
        let tris = fan_to_triangles(face);
        colors.extend(std::iter::repeat_n(color, tris.len()));
        positions.extend(tris);
    }
    (positions, colors)
}

/// Records the pyramid with per-vertex colors.
pub fn record_pyramid(imm: &mut Immediate) {
    imm.begin(Primitive::Triangles);
    for (p, c) in PYRAMID_POSITIONS.iter().zip(PYRAMID_COLORS) {
        imm.color3(c[0], c[1], c[2]);
        imm.vertex3(p[0], p[1], p[2]);
    }
    imm.end();
}

/// Records the cube with one color per face.
pub fn record_cube(imm: &mut Immediate) {
    imm.begin(Primitive::Quads);
    for (face, c) in CUBE_FACES.iter().zip(CUBE_FACE_COLORS) {
        imm.color3(c[0], c[1], c[2]);
        for p in face {
            imm.vertex3(p[0], p[1], p[2]);
        }
    }
    imm.end();
}

/// Pyramid model-view for the buffer-based program.
pub fn pyramid_model_view(angle_deg: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(-1.5, 0.0, -6.0)) * rotation_deg(angle_deg, Vec3::Y)
}

/// Cube model-view for the buffer-based program: translate, scale, then
/// rotate about X, Y and Z by the same angle.
pub fn cube_model_view(angle_deg: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(1.5, 0.0, -6.0))
        * Mat4::from_scale(Vec3::splat(0.75))
        * rotation_deg(angle_deg, Vec3::X)
        * rotation_deg(angle_deg, Vec3::Y)
        * rotation_deg(angle_deg, Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::math::Vec4;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn pyramid_faces_share_the_apex() {
        assert!(PYRAMID_POSITIONS.chunks_exact(3).all(|f| f[0] == [0.0, 1.0, 0.0]));
        assert!(PYRAMID_COLORS.chunks_exact(3).all(|f| f[0] == RED));
    }

    #[test]
    fn pyramid_corner_colors_agree_across_faces() {
        // Front-right corner (1,-1,1) ends face 0 and starts the base of face 1.
        assert_eq!(PYRAMID_COLORS[2], PYRAMID_COLORS[4]);
        assert_eq!(PYRAMID_COLORS[5], PYRAMID_COLORS[7]);
    }

    #[test]
    fn cube_faces_lie_on_unit_planes() {
        for face in &CUBE_FACES {
            let on_plane = (0..3).any(|axis| {
                let v = face[0][axis];
                v.abs() == 1.0 && face.iter().all(|p| p[axis] == v)
            });
            assert!(on_plane, "face {face:?} is not axis-aligned");
        }
    }

    #[test]
    fn fan_of_four_is_two_triangles() {
        assert_eq!(fan_to_triangles(&[0, 1, 2, 3]), vec![0, 1, 2, 0, 2, 3]);
        assert!(fan_to_triangles(&[0, 1]).is_empty());
    }

    #[test]
    fn cube_triangles_have_flat_face_colors() {
        let (positions, colors) = cube_triangles();
        assert_eq!(positions.len(), 36);
        assert_eq!(colors.len(), 36);
        for (face, chunk) in colors.chunks_exact(6).enumerate() {
            assert!(chunk.iter().all(|c| *c == CUBE_FACE_COLORS[face]));
        }
    }

    #[test]
    fn cube_face_colors_follow_the_palette() {
        assert_eq!(CUBE_FACE_COLORS[0], [1.0, 0.0, 0.0]);
        assert_eq!(CUBE_FACE_COLORS[3], [0.0, 1.0, 1.0]);
        assert_eq!(CUBE_FACE_COLORS[4], [1.0, 0.0, 1.0]);
        assert_eq!(CUBE_FACE_COLORS[5], [1.0, 1.0, 0.0]);
        assert_eq!(PYRAMID_COLORS[1], Color::GREEN.to_rgb());
    }

    #[test]
    fn immediate_cube_has_six_quads() {
        let mut imm = Immediate::new();
        record_cube(&mut imm);
        record_pyramid(&mut imm);
        let batch = imm.take_batch();
        assert_eq!(batch.vertices().len(), 36 + 12);
    }

    // ── model-view ────────────────────────────────────────────────────────

    #[test]
    fn pyramid_sits_left_of_center() {
        let apex = pyramid_model_view(90.0) * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!(approx(apex, Vec4::new(-1.5, 1.0, -6.0, 1.0)));
    }

    #[test]
    fn cube_is_scaled_around_its_center() {
        let corner = cube_model_view(0.0) * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert!(approx(corner, Vec4::new(2.25, 0.75, -5.25, 1.0)));
    }
}
