//! Rotation speed control and the two opposing spins.

use prism_engine::input::{InputFrame, MouseButton};
use prism_engine::math::Spin;

/// Degrees per frame for one speed step.
pub const STEP_DEGREES: f32 = 0.1;

/// Speed as a step count `1..=9`; degrees per frame is `0.1 * step`.
///
/// Digit keys set the step directly; a left click advances it, wrapping
/// from 9 back to 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpeedControl {
    step: u8,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self { step: 1 }
    }
}

impl SpeedControl {
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn degrees_per_frame(&self) -> f32 {
        STEP_DEGREES * self.step as f32
    }

    /// Sets the step from a digit key; 0 is ignored.
    pub fn set_digit(&mut self, digit: u8) -> bool {
        if !(1..=9).contains(&digit) {
            return false;
        }
        self.step = digit;
        true
    }

    pub fn cycle(&mut self) {
        self.step = if self.step >= 9 { 1 } else { self.step + 1 };
    }

    /// Applies this frame's digit presses and left clicks.
    pub fn handle_input(&mut self, frame: &InputFrame) {
        let before = self.step;

        for digit in frame.digits_pressed() {
            self.set_digit(digit);
        }
        if frame.button_pressed(MouseButton::Left) {
            self.cycle();
        }

        if self.step != before {
            log::info!("speed: {:.1} deg/frame", self.degrees_per_frame());
        }
    }
}

/// Pyramid spins forward, cube spins backward, both at the same speed.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rotation {
    pub pyramid: Spin,
    pub cube: Spin,
}

impl Rotation {
    pub fn advance(&mut self, degrees: f32) {
        self.pyramid.advance(degrees);
        self.cube.advance(-degrees);
    }

    /// Advances only when the drawable has a visible area, so a minimized
    /// window holds the scene still. Returns whether it advanced.
    pub fn advance_if_drawn(&mut self, degrees: f32, (width, height): (u32, u32)) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.advance(degrees);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::input::{ButtonState, InputEvent, InputState, Key, KeyState};

    fn press_key(state: &mut InputState, frame: &mut InputFrame, key: Key) {
        state.apply_event(frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
    }

    // ── speed ─────────────────────────────────────────────────────────────

    #[test]
    fn starts_at_one_tenth_degree() {
        let s = SpeedControl::default();
        assert_eq!(s.step(), 1);
        assert!((s.degrees_per_frame() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn digits_set_speed_and_zero_is_ignored() {
        let mut s = SpeedControl::default();
        assert!(s.set_digit(7));
        assert!((s.degrees_per_frame() - 0.7).abs() < 1e-6);
        assert!(!s.set_digit(0));
        assert_eq!(s.step(), 7);
    }

    #[test]
    fn click_cycles_from_nine_back_to_one() {
        let mut s = SpeedControl::default();
        for expected in 2..=9 {
            s.cycle();
            assert_eq!(s.step(), expected);
        }
        s.cycle();
        assert_eq!(s.step(), 1);
    }

    #[test]
    fn handle_input_reads_digits_then_clicks() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        press_key(&mut state, &mut frame, Key::Digit(4));
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed },
        );

        let mut s = SpeedControl::default();
        s.handle_input(&frame);
        assert_eq!(s.step(), 5);
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn pyramid_and_cube_turn_in_opposite_directions() {
        let mut r = Rotation::default();
        r.advance(2.0);
        assert_eq!(r.pyramid.degrees(), 2.0);
        assert_eq!(r.cube.degrees(), -2.0);
    }

    #[test]
    fn minimized_window_holds_rotation() {
        let mut r = Rotation::default();
        assert!(!r.advance_if_drawn(0.5, (0, 600)));
        assert!(!r.advance_if_drawn(0.5, (800, 0)));
        assert_eq!(r, Rotation::default());

        assert!(r.advance_if_drawn(0.5, (800, 600)));
        assert_eq!(r.pyramid.degrees(), 0.5);
        assert_eq!(r.cube.degrees(), -0.5);
    }
}
