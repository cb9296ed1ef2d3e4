//! The three view angles sent to the render service.

use serde::{Deserialize, Serialize};

const FULL_TURN: f64 = 360.0;

/// Current view orientation as three Euler angles in degrees.
///
/// Each angle is kept reduced modulo 360 after every update. The sign is
/// preserved, so an angle lies in `(-360, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    /// Pitch, driven by vertical drag.
    pub x: f64,
    /// Yaw, driven by horizontal drag.
    pub y: f64,
    /// Roll. Never touched by drag.
    pub z: f64,
}

impl RotationState {
    /// Unrotated view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all three angles to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a drag delta: vertical movement pitches, horizontal movement
    /// yaws.
    pub fn apply_delta(&mut self, dx: f64, dy: f64) {
        self.x = (self.x + dy) % FULL_TURN;
        self.y = (self.y + dx) % FULL_TURN;
    }

    /// Angles rounded to whole degrees, in `(x, y, z)` order.
    ///
    /// The render service quantizes angles, so requests always carry the
    /// rounded values.
    #[must_use]
    pub fn rounded(&self) -> (i32, i32, i32) {
        (round_degrees(self.x), round_degrees(self.y), round_degrees(self.z))
    }
}

fn round_degrees(angle: f64) -> i32 {
    angle.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_zeroes_all_angles() {
        let mut rot = RotationState { x: 10.0, y: -20.0, z: 5.0 };
        rot.reset();
        assert_eq!(rot, RotationState::new());
    }

    #[test]
    fn horizontal_drag_yaws_and_vertical_drag_pitches() {
        let mut rot = RotationState::new();
        rot.apply_delta(30.0, -12.0);
        assert_eq!(rot.y, 30.0);
        assert_eq!(rot.x, -12.0);
        assert_eq!(rot.z, 0.0);
    }

    #[test]
    fn angles_stay_within_one_turn() {
        let mut rot = RotationState::new();
        let deltas = [(250.0, 100.0), (200.0, -500.0), (-900.0, 45.5), (3.25, -1.0)];
        let (mut sum_x, mut sum_y) = (0.0_f64, 0.0_f64);
        for (dx, dy) in deltas {
            rot.apply_delta(dx, dy);
            sum_x += dy;
            sum_y += dx;
            assert!((-360.0..360.0).contains(&rot.x), "x out of range: {}", rot.x);
            assert!((-360.0..360.0).contains(&rot.y), "y out of range: {}", rot.y);
        }
        assert!(congruent(rot.x, sum_x));
        assert!(congruent(rot.y, sum_y));
    }

    fn congruent(angle: f64, total: f64) -> bool {
        let diff = (angle - total).rem_euclid(360.0);
        diff < 1e-9 || 360.0 - diff < 1e-9
    }

    #[test]
    fn negative_angles_keep_their_sign() {
        let mut rot = RotationState::new();
        rot.apply_delta(-370.0, 0.0);
        assert_eq!(rot.y, -10.0);
    }

    #[test]
    fn rounding_uses_nearest_degree() {
        let rot = RotationState { x: 12.5, y: -7.4, z: 0.49 };
        assert_eq!(rot.rounded(), (13, -7, 0));
    }
}
