use glam::{Mat4, Vec3};

/// Combines projection and model-view into the matrix uploaded per draw.
#[inline]
pub fn mvp(projection: Mat4, model_view: Mat4) -> Mat4 {
    projection * model_view
}

/// Rotation of `angle_deg` degrees about `axis`; the axis need not be unit length.
///
/// A zero axis yields the identity.
pub fn rotation_deg(angle_deg: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle_deg.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Current model-view matrix with post-multiplying edits, the way a
/// fixed-function pipeline composes `translate`/`rotate`/`scale` calls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatrixStack {
    current: Mat4,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self {
            current: Mat4::IDENTITY,
        }
    }
}

impl MatrixStack {
    pub fn current(&self) -> Mat4 {
        self.current
    }

    pub fn load_identity(&mut self) {
        self.current = Mat4::IDENTITY;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.current *= Mat4::from_translation(Vec3::new(x, y, z));
    }

    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) {
        self.current *= rotation_deg(angle_deg, Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.current *= Mat4::from_scale(Vec3::new(x, y, z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx_v(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn edits_apply_last_to_vertices_first() {
        // translate then scale: vertices are scaled, then moved.
        let mut stack = MatrixStack::default();
        stack.translate(1.5, 0.0, -7.0);
        stack.scale(0.75, 0.75, 0.75);

        let v = stack.current() * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert!(approx_v(v, Vec4::new(2.25, 0.75, -6.25, 1.0)));
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let a = rotation_deg(90.0, Vec3::new(0.0, 5.0, 0.0));
        let b = rotation_deg(90.0, Vec3::Y);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn zero_axis_is_identity() {
        assert_eq!(rotation_deg(45.0, Vec3::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn y_rotation_quarter_turn() {
        let v = rotation_deg(90.0, Vec3::Y) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(approx_v(v, Vec4::new(0.0, 0.0, -1.0, 1.0)));
    }

    #[test]
    fn mvp_applies_model_view_first() {
        let proj = Mat4::from_scale(Vec3::splat(2.0));
        let mv = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let v = mvp(proj, mv) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx_v(v, Vec4::new(2.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn load_identity_resets() {
        let mut stack = MatrixStack::default();
        stack.rotate(30.0, 1.0, 1.0, 1.0);
        stack.load_identity();
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }
}
