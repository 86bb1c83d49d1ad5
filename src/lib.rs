//! Ring Descent - an endless ring-descent arcade game core
//!
//! A ball falls through a vertically stacked column of rotating ring
//! platforms. Each ring is split into angular segments that are safe
//! (bounce), dangerous (run over) or open (score). The interesting parts
//! live in `sim`: procedural arc-mesh construction, pattern generation,
//! a fixed-size recycling ring pool with spawn-ahead, and smoothed
//! player-steered rotation of the shared ring parent.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pattern, mesh, pool, rotation, tick)
//! - `config`: Construction-time tuning values
//! - `game`: Game session collaborator (phase, score, difficulty)
//! - `profile`: Persisted player counters

pub mod config;
pub mod game;
pub mod profile;
pub mod sim;

pub use config::RingConfig;
pub use game::{GamePhase, GameSession};
pub use profile::Profile;

use glam::Vec3;

/// Simulation loop constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Point on a horizontal circle of `radius` at `angle_deg`, at height `y`.
///
/// Angle 0 points along +Z and grows clockwise when seen from above,
/// so `x = sin`, `z = cos`.
#[inline]
pub fn arc_point(radius: f32, angle_deg: f32, y: f32) -> Vec3 {
    let a = angle_deg.to_radians();
    Vec3::new(a.sin() * radius, y, a.cos() * radius)
}

/// Rotate `point` around the Y axis by `yaw_deg` (same convention as
/// [`arc_point`]: positive yaw moves +Z toward +X).
#[inline]
pub fn rotate_y(point: Vec3, yaw_deg: f32) -> Vec3 {
    let a = yaw_deg.to_radians();
    let (sin, cos) = a.sin_cos();
    Vec3::new(
        point.x * cos + point.z * sin,
        point.y,
        -point.x * sin + point.z * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_point_cardinals() {
        let p = arc_point(2.0, 0.0, 1.0);
        assert!((p.x).abs() < 1e-5 && (p.z - 2.0).abs() < 1e-5 && p.y == 1.0);

        let p = arc_point(2.0, 90.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-5 && p.z.abs() < 1e-5);
    }

    #[test]
    fn test_rotate_y_round_trip() {
        let p = Vec3::new(1.5, 0.3, -0.7);
        let q = rotate_y(rotate_y(p, 37.0), -37.0);
        assert!((p - q).length() < 1e-5);
    }

    #[test]
    fn test_rotate_y_matches_arc_point() {
        // Rotating the 0-degree point by yaw lands on the yaw-degree point.
        let p = rotate_y(arc_point(2.0, 0.0, 0.0), 45.0);
        let q = arc_point(2.0, 45.0, 0.0);
        assert!((p - q).length() < 1e-5);
    }
}
