//! Construction-time tuning values
//!
//! Everything here is fixed for the lifetime of a [`crate::sim::World`];
//! nothing is runtime-mutable. Defaults mirror the shipped game's layout:
//! 8 segments per ring, a 20-ring pool, 3 units of vertical spacing.

use serde::{Deserialize, Serialize};

/// All tuning for ring geometry, the spawner pool and rotation control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    // === Ring geometry ===
    /// Angular segments per ring
    pub segments_per_ring: usize,
    /// Inner radius of the ring band
    pub inner_radius: f32,
    /// Outer radius of the ring band
    pub outer_radius: f32,
    /// Vertical thickness of a ring
    pub height: f32,
    /// Solid collision boxes approximating each arc segment
    pub boxes_per_segment: usize,

    // === Spawning ===
    /// Fixed pool capacity; the pool never grows past this
    pub pool_size: usize,
    /// Rings spawned up front when a run starts
    pub initial_burst: usize,
    /// Vertical distance between consecutive rings
    pub ring_spacing: f32,
    /// Height of the first ring below the start position
    pub first_ring_y: f32,
    /// How far below the viewpoint rings are spawned ahead
    pub spawn_ahead_distance: f32,
    /// How far above the viewpoint a ring despawns
    pub despawn_distance: f32,

    // === Danger placement ===
    /// Minimum danger segments per ring once danger unlocks
    pub min_danger_zones: usize,
    /// Maximum danger segments per ring
    pub max_danger_zones: usize,
    /// Rings before the first danger segment appears
    pub safe_platforms_count: u32,

    // === Rotation control ===
    /// Steering speed in degrees per second
    pub rotation_speed: f32,
    /// Exponential smoothing rate toward the target rotation
    pub rotation_smoothing: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            segments_per_ring: 8,
            inner_radius: 0.5,
            outer_radius: 2.0,
            height: 0.3,
            boxes_per_segment: 2,

            pool_size: 20,
            initial_burst: 12,
            ring_spacing: 3.0,
            first_ring_y: -3.0,
            spawn_ahead_distance: 30.0,
            despawn_distance: 20.0,

            min_danger_zones: 1,
            max_danger_zones: 3,
            safe_platforms_count: 5,

            rotation_speed: 280.0,
            rotation_smoothing: 10.0,
        }
    }
}

impl RingConfig {
    /// Mid-line radius of the ring band
    #[inline]
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Angular width of one segment in degrees
    #[inline]
    pub fn angle_per_segment(&self) -> f32 {
        360.0 / self.segments_per_ring as f32
    }

    /// Clamp degenerate values into a usable range.
    ///
    /// A config that asks for more danger than fits is clamped, never
    /// rejected; the pattern generator additionally clamps per ring
    /// against the slices that are still safe.
    pub fn validate(mut self) -> Self {
        if self.segments_per_ring < 2 {
            log::warn!(
                "segments_per_ring {} too small, clamping to 2",
                self.segments_per_ring
            );
            self.segments_per_ring = 2;
        }
        self.boxes_per_segment = self.boxes_per_segment.max(1);
        self.pool_size = self.pool_size.max(1);
        self.initial_burst = self.initial_burst.min(self.pool_size);
        self.ring_spacing = self.ring_spacing.max(0.1);
        if self.outer_radius <= self.inner_radius {
            log::warn!(
                "outer_radius {} <= inner_radius {}, widening band",
                self.outer_radius,
                self.inner_radius
            );
            self.outer_radius = self.inner_radius + 1.0;
        }
        if self.max_danger_zones < self.min_danger_zones {
            self.max_danger_zones = self.min_danger_zones;
        }
        self.max_danger_zones = self.max_danger_zones.min(self.segments_per_ring);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_already_valid() {
        let cfg = RingConfig::default();
        let validated = cfg.clone().validate();
        assert_eq!(cfg.segments_per_ring, validated.segments_per_ring);
        assert_eq!(cfg.pool_size, validated.pool_size);
        assert_eq!(cfg.max_danger_zones, validated.max_danger_zones);
    }

    #[test]
    fn test_validate_clamps_danger_overdraw() {
        let cfg = RingConfig {
            max_danger_zones: 99,
            ..Default::default()
        }
        .validate();
        assert_eq!(cfg.max_danger_zones, cfg.segments_per_ring);
    }

    #[test]
    fn test_validate_clamps_burst_to_pool() {
        let cfg = RingConfig {
            pool_size: 4,
            initial_burst: 12,
            ..Default::default()
        }
        .validate();
        assert_eq!(cfg.initial_burst, 4);
    }

    #[test]
    fn test_validate_fixes_inverted_band() {
        let cfg = RingConfig {
            inner_radius: 2.0,
            outer_radius: 1.0,
            ..Default::default()
        }
        .validate();
        assert!(cfg.outer_radius > cfg.inner_radius);
    }
}
