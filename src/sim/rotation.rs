//! Smoothed rotation of the shared ring parent
//!
//! Steering accumulates into an unbounded target angle; the applied angle
//! converges toward it with exponential decay. All active rings inherit
//! the yaw through the shared parent, so no per-ring rotation state exists.

use serde::{Deserialize, Serialize};

/// Player steering direction for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    #[default]
    Idle,
    /// Left half of view / A / left arrow
    Left,
    /// Right half of view / D / right arrow
    Right,
}

impl Steer {
    /// Signed rotation direction
    #[inline]
    pub fn direction(self) -> f32 {
        match self {
            Steer::Idle => 0.0,
            Steer::Left => 1.0,
            Steer::Right => -1.0,
        }
    }
}

/// Target/current yaw pair with frame-rate-independent smoothing.
///
/// Both angles are unbounded (never wrapped modulo 360) so steering can
/// accumulate continuously across many full turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationController {
    target: f32,
    current: f32,
    /// Steering speed, degrees per second
    speed: f32,
    /// Exponential decay rate toward the target
    smoothing: f32,
}

impl RotationController {
    pub fn new(speed: f32, smoothing: f32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            speed,
            smoothing,
        }
    }

    /// Accumulate steering input into the target angle
    pub fn steer(&mut self, steer: Steer, dt: f32) {
        self.target += steer.direction() * self.speed * dt;
    }

    /// Move the applied angle toward the target.
    ///
    /// Exact exponential decay rather than `lerp(c, t, rate * dt)`: the
    /// blend factor stays below 1 for any positive dt, so a frame hitch
    /// slows convergence instead of snapping past the target.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let blend = 1.0 - (-self.smoothing * dt).exp();
        self.current += (self.target - self.current) * blend;
    }

    /// Yaw currently applied to the shared ring parent, degrees
    #[inline]
    pub fn current_yaw(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target_yaw(&self) -> f32 {
        self.target
    }

    /// Snap both angles back to zero (run start / return to menu)
    pub fn reset(&mut self) {
        self.target = 0.0;
        self.current = 0.0;
    }
}
