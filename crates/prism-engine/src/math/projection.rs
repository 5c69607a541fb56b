use glam::Mat4;

/// Projection recomputed on every resize.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    /// Perspective with a vertical field of view in degrees.
    Perspective { fovy_deg: f32, near: f32, far: f32 },

    /// Orthographic volume that always contains the square
    /// `[-half_extent, half_extent]²`, widened along the longer window axis.
    OrthoFit { half_extent: f32, near: f32, far: f32 },
}

/// Aspect correction factors for layouts under [`Projection::OrthoFit`].
///
/// The factor of the longer axis is its ratio to the shorter one; the other
/// factor is exactly 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AspectRatios {
    pub width_by_height: f32,
    pub height_by_width: f32,
}

impl Default for AspectRatios {
    fn default() -> Self {
        Self {
            width_by_height: 1.0,
            height_by_width: 1.0,
        }
    }
}

impl AspectRatios {
    /// Computes the factors for a drawable size; zero dimensions count as 1.
    pub fn from_size(width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        if w <= h {
            Self {
                width_by_height: 1.0,
                height_by_width: h / w,
            }
        } else {
            Self {
                width_by_height: w / h,
                height_by_width: 1.0,
            }
        }
    }
}

impl Projection {
    pub const fn perspective(fovy_deg: f32, near: f32, far: f32) -> Self {
        Self::Perspective { fovy_deg, near, far }
    }

    pub const fn ortho_fit(half_extent: f32, near: f32, far: f32) -> Self {
        Self::OrthoFit { half_extent, near, far }
    }

    /// Builds the projection matrix for a drawable size in pixels.
    ///
    /// A zero height is treated as 1 (and a zero width too for ortho), so a
    /// minimized window never produces a degenerate matrix.
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        match *self {
            Projection::Perspective { fovy_deg, near, far } => {
                let aspect = width as f32 / height.max(1) as f32;
                Mat4::perspective_rh(fovy_deg.to_radians(), aspect.max(f32::EPSILON), near, far)
            }
            Projection::OrthoFit { half_extent, near, far } => {
                let r = AspectRatios::from_size(width, height);
                let x = half_extent * r.width_by_height;
                let y = half_extent * r.height_by_width;
                Mat4::orthographic_rh(-x, x, -y, y, near, far)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── aspect ratios ─────────────────────────────────────────────────────

    #[test]
    fn wide_window_widens_x() {
        let r = AspectRatios::from_size(800, 600);
        assert!(approx(r.width_by_height, 800.0 / 600.0));
        assert_eq!(r.height_by_width, 1.0);
    }

    #[test]
    fn tall_window_widens_y() {
        let r = AspectRatios::from_size(300, 600);
        assert_eq!(r.width_by_height, 1.0);
        assert!(approx(r.height_by_width, 2.0));
    }

    #[test]
    fn square_window_is_neutral() {
        assert_eq!(AspectRatios::from_size(500, 500), AspectRatios::default());
    }

    #[test]
    fn zero_height_counts_as_one() {
        let r = AspectRatios::from_size(640, 0);
        assert!(approx(r.width_by_height, 640.0));
    }

    #[test]
    fn zero_width_counts_as_one() {
        let r = AspectRatios::from_size(0, 480);
        assert_eq!(r.width_by_height, 1.0);
        assert!(approx(r.height_by_width, 480.0));
    }

    // ── matrices ──────────────────────────────────────────────────────────

    #[test]
    fn ortho_fit_keeps_square_visible() {
        let p = Projection::ortho_fit(50.0, -50.0, 50.0).matrix(800, 600);
        let corner = p * Vec4::new(50.0, 50.0, 0.0, 1.0);
        assert!(corner.x <= 1.0 + 1e-5 && corner.y <= 1.0 + 1e-5);
        assert!(approx(corner.y, 1.0));
        assert!(approx(corner.x, 600.0 / 800.0));
    }

    #[test]
    fn ortho_depth_range_maps_to_unit_interval() {
        let p = Projection::ortho_fit(50.0, -50.0, 50.0).matrix(100, 100);
        let front = p * Vec4::new(0.0, 0.0, 50.0, 1.0);
        let back = p * Vec4::new(0.0, 0.0, -50.0, 1.0);
        assert!(approx(front.z, 0.0));
        assert!(approx(back.z, 1.0));
    }

    #[test]
    fn ortho_fit_survives_zero_width() {
        let p = Projection::ortho_fit(50.0, -50.0, 50.0).matrix(0, 480);
        assert!(p.is_finite());
        let corner = p * Vec4::new(50.0, 50.0, 0.0, 1.0);
        assert!(approx(corner.x, 1.0));
        assert!(approx(corner.y, 1.0 / 480.0));
    }

    #[test]
    fn perspective_near_and_far_planes() {
        let p = Projection::perspective(45.0, 1.0, 100.0).matrix(800, 600);
        let near = p * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!(approx(near.z / near.w, 0.0));
        assert!(approx(far.z / far.w, 1.0));
    }

    #[test]
    fn perspective_survives_zero_height() {
        let p = Projection::perspective(45.0, 0.1, 100.0).matrix(800, 0);
        assert!(p.is_finite());
    }
}
