//! Keyboard and touch translation

use crate::sim::input::{Control, InputState};

/// Horizontal drag (px) before a touch counts as steering
pub const TOUCH_STEER_THRESHOLD: f32 = 10.0;

/// How long a double-tap holds the throttle (ms)
pub const ACCELERATE_PULSE_MS: f64 = 100.0;

/// Map a `KeyboardEvent.code` to a control. Unknown keys are ignored.
pub fn control_for_key(code: &str) -> Option<Control> {
    match code {
        "ArrowLeft" => Some(Control::SteerLeft),
        "ArrowRight" => Some(Control::SteerRight),
        "Space" => Some(Control::Accelerate),
        _ => None,
    }
}

/// Drag-to-steer relative to where the finger went down
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchSteer {
    start_x: Option<f32>,
}

impl TouchSteer {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Small drags leave the flags untouched
    pub fn moved(&mut self, x: f32, input: &mut InputState) {
        let Some(start) = self.start_x else { return };
        let dx = x - start;
        if dx > TOUCH_STEER_THRESHOLD {
            input.steer_right = true;
            input.steer_left = false;
        } else if dx < -TOUCH_STEER_THRESHOLD {
            input.steer_left = true;
            input.steer_right = false;
        }
    }

    pub fn end(&mut self, input: &mut InputState) {
        self.start_x = None;
        input.steer_left = false;
        input.steer_right = false;
    }

    pub fn is_active(&self) -> bool {
        self.start_x.is_some()
    }
}

/// Short throttle burst triggered by a double-tap
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratePulse {
    release_at: Option<f64>,
}

impl AcceleratePulse {
    /// Press the throttle now; `now_ms` is any monotonic clock
    pub fn trigger(&mut self, now_ms: f64, input: &mut InputState) {
        input.set(Control::Accelerate, true);
        self.release_at = Some(now_ms + ACCELERATE_PULSE_MS);
    }

    /// Release once the deadline has passed
    pub fn update(&mut self, now_ms: f64, input: &mut InputState) {
        if let Some(deadline) = self.release_at
            && now_ms >= deadline
        {
            input.set(Control::Accelerate, false);
            self.release_at = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.release_at.is_some()
    }
}
