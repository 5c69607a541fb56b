/// Rotation angle in degrees advanced once per frame.
///
/// The angle resets to 0 when it reaches a full turn in the direction of
/// travel: `>= 360` for positive steps, `<= -360` for negative ones.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Spin {
    angle: f32,
}

impl Spin {
    pub const fn new() -> Self {
        Self { angle: 0.0 }
    }

    pub fn degrees(&self) -> f32 {
        self.angle
    }

    pub fn radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Advances the angle by `step` degrees.
    pub fn advance(&mut self, step: f32) {
        self.angle += step;
        if self.angle >= 360.0 || self.angle <= -360.0 {
            self.angle = 0.0;
        }
    }
}
