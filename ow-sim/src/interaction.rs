//! This module handles pointer interaction and the rotation offset state.
//!
//! Host event handlers never touch the rotation directly: they hand [`PointerEvent`]s to the
//! sim, which parks the latest one in a single-slot inbox and consumes it at the start of the
//! next tick. That keeps the frame loop the only writer of simulation state even when the
//! host's event dispatch isn't strictly single-threaded.

use glam::Vec2;

/// How strongly `current` is pulled toward `target` each frame while the pointer is active.
const ENGAGE_SMOOTHING: f32 = 0.04;

/// How strongly `current` decays back toward neutral each frame while the pointer is inactive.
///
/// Gentler than [`ENGAGE_SMOOTHING`], so letting go eases out instead of springing back.
const RELEASE_SMOOTHING: f32 = 0.02;

/// The pitch offset implied by a pointer at the vertical edge of the surface.
const PITCH_RANGE: f32 = 0.4;

/// The yaw offset implied by a pointer at the horizontal edge of the surface.
///
/// Larger than [`PITCH_RANGE`] to bias yaw sensitivity.
const YAW_RANGE: f32 = 0.6;

/// A pointer event from the host, with coordinates normalised to `[-1, 1]` from the centre of
/// the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to the given normalised position.
    Moved {
        /// The horizontal position, `-1` at the left edge and `1` at the right.
        x: f32,

        /// The vertical position, `-1` at the top edge and `1` at the bottom.
        y: f32,
    },

    /// The pointer left the surface, or the touch ended.
    Left,
}

/// The rotation offset state driven by pointer interaction.
///
/// `current` is only ever moved by exponential smoothing, never assigned directly, so the
/// applied rotation can't visually snap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    /// The `(pitch, yaw)` offset actually applied this frame.
    current: Vec2,

    /// The `(pitch, yaw)` offset implied by the pointer position.
    target: Vec2,

    /// Whether pointer input is currently active.
    active: bool,
}

impl RotationState {
    /// The applied `(pitch, yaw)` offset.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Consume one pointer event, updating the target offset and the active flag.
    pub fn apply_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { x, y } => {
                self.target = Vec2::new(y * PITCH_RANGE, x * YAW_RANGE);
                self.active = true;
            }
            PointerEvent::Left => self.active = false,
        }
    }

    /// Advance the smoothing by one frame: toward the target while active, back toward neutral
    /// otherwise.
    pub fn step(&mut self) {
        if self.active {
            self.current += (self.target - self.current) * ENGAGE_SMOOTHING;
        } else {
            self.current += (Vec2::ZERO - self.current) * RELEASE_SMOOTHING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn stepping_at_rest_changes_nothing() {
        let mut state = RotationState::default();
        for _ in 0..100 {
            state.step();
            assert_eq!(state.current(), Vec2::ZERO);
        }
    }

    #[test]
    fn pointer_position_maps_to_asymmetric_pitch_and_yaw() {
        let mut state = RotationState::default();
        state.apply_event(PointerEvent::Moved { x: 1., y: 1. });

        // Drive the smoothing to convergence
        for _ in 0..2000 {
            state.step();
        }

        assert!(approx_eq!(f32, state.current().x, PITCH_RANGE, epsilon = 1e-3));
        assert!(approx_eq!(f32, state.current().y, YAW_RANGE, epsilon = 1e-3));
    }

    #[test]
    fn decay_is_monotonic_and_converges_to_neutral() {
        let mut state = RotationState::default();
        state.apply_event(PointerEvent::Moved { x: -0.8, y: 0.5 });
        for _ in 0..50 {
            state.step();
        }
        assert!(state.current().length() > 0.);

        state.apply_event(PointerEvent::Left);

        let mut last_magnitude = state.current().length();
        for _ in 0..3000 {
            state.step();
            let magnitude = state.current().length();
            assert!(magnitude <= last_magnitude);
            last_magnitude = magnitude;
        }

        assert!(last_magnitude < 1e-3);
    }

    #[test]
    fn engagement_moves_current_toward_the_target_every_step() {
        let mut state = RotationState::default();
        state.apply_event(PointerEvent::Moved { x: 0.3, y: -0.7 });
        let target = Vec2::new(-0.7 * PITCH_RANGE, 0.3 * YAW_RANGE);

        let mut last_distance = (target - state.current()).length();
        for _ in 0..200 {
            state.step();
            let distance = (target - state.current()).length();
            assert!(distance < last_distance);
            last_distance = distance;
        }
    }
}
