//! Held control flags
//!
//! Platform handlers write these whenever a key, touch or pulse changes;
//! the tick reads them once and never writes back. Last writer wins.

use serde::{Deserialize, Serialize};

/// Logical controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    SteerLeft,
    SteerRight,
    Accelerate,
}

/// Current held-state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
}

impl InputState {
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::SteerLeft => self.steer_left = held,
            Control::SteerRight => self.steer_right = held,
            Control::Accelerate => self.accelerate = held,
        }
    }

    pub fn held(&self, control: Control) -> bool {
        match control {
            Control::SteerLeft => self.steer_left,
            Control::SteerRight => self.steer_right,
            Control::Accelerate => self.accelerate,
        }
    }

    /// Release everything (window blur, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Net steering direction: -1 left, +1 right, 0 when neither or both
    pub fn steer_axis(&self) -> f32 {
        match (self.steer_left, self.steer_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_held() {
        let mut input = InputState::default();
        input.set(Control::Accelerate, true);
        assert!(input.held(Control::Accelerate));
        assert!(!input.held(Control::SteerLeft));

        // Last writer wins
        input.set(Control::Accelerate, false);
        input.set(Control::Accelerate, true);
        assert!(input.accelerate);

        input.clear();
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_steer_axis() {
        let mut input = InputState::default();
        assert_eq!(input.steer_axis(), 0.0);
        input.steer_left = true;
        assert_eq!(input.steer_axis(), -1.0);
        input.steer_right = true;
        assert_eq!(input.steer_axis(), 0.0);
        input.steer_left = false;
        assert_eq!(input.steer_axis(), 1.0);
    }
}
