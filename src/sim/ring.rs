//! Pooled ring platforms and segment assembly
//!
//! A [`Ring`] is a recyclable container for one platform. Activating it
//! rebuilds its segment pieces from a [`Pattern`]: solid slices get an arc
//! mesh plus a few oriented collision boxes, gap slices get a single
//! trigger volume. Rebuilding clears the previous pieces first, so
//! re-initialization is idempotent and the backing storage is reused
//! across recycles.
//!
//! Arc meshes are a poor fit for direct collision (non-convex, rebuilt on
//! every recycle), so each solid slice is approximated by a small fixed
//! number of yawed boxes whose footprint tracks the local arc length. At
//! gameplay speed the difference is invisible.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mesh::{Mesh, build_arc_solid};
use super::pattern::{Pattern, SegmentKind};
use crate::arc_point;
use crate::config::RingConfig;

/// Collision tag carried by every generated volume. The external
/// falling-body handler discriminates outcome on this alone, never on
/// mesh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceTag {
    /// Solid, bounces the ball
    SafeZone,
    /// Solid, ends the run
    DangerZone,
    /// Trigger, awards a point on passage
    GapTrigger,
}

/// Segment colors handed to the host renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Palette {
    pub safe: [f32; 4],
    pub danger: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            safe: [0.2, 0.8, 0.4, 1.0],
            danger: [1.0, 0.3, 0.2, 1.0],
        }
    }
}

/// An axis-yawed box volume in ring-local space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColliderBox {
    /// Center relative to the ring origin
    pub center: Vec3,
    /// Rotation around the vertical axis, degrees
    pub yaw_deg: f32,
    /// Half extents along the box's local axes
    pub half_extents: Vec3,
    /// Trigger volumes overlap without blocking
    pub is_trigger: bool,
    pub tag: SurfaceTag,
}

impl ColliderBox {
    /// Whether a ring-local point lies inside the box
    pub fn contains(&self, point: Vec3) -> bool {
        let local = crate::rotate_y(point - self.center, -self.yaw_deg);
        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }
}

/// One assembled slice of a ring
#[derive(Debug, Clone)]
pub enum SegmentPiece {
    /// Solid arc: render mesh plus its box approximation
    Solid {
        slice: usize,
        mesh: Mesh,
        colliders: Vec<ColliderBox>,
        tag: SurfaceTag,
        color: [f32; 4],
    },
    /// Traversable opening: a single trigger volume, no mesh
    Gap { slice: usize, trigger: ColliderBox },
}

/// A pooled ring platform.
///
/// Constructed once when the pool is filled and reused for the rest of the
/// program. The `active` flag is the shared contract between the spawner's
/// recycle pass and the ring's own out-of-view despawn: either side may
/// clear it, and the spawner reads it rather than assuming it.
#[derive(Debug, Default)]
pub struct Ring {
    active: bool,
    /// Vertical offset below the start position
    y: f32,
    pieces: Vec<SegmentPiece>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Assembled pieces of the current activation
    pub fn pieces(&self) -> &[SegmentPiece] {
        &self.pieces
    }

    /// Place the ring at `y` and rebuild its geometry from `pattern`.
    pub fn activate(
        &mut self,
        y: f32,
        pattern: &Pattern,
        danger_enabled: bool,
        palette: &Palette,
        cfg: &RingConfig,
    ) {
        self.y = y;
        self.active = true;
        self.rebuild(pattern, danger_enabled, palette, cfg);
    }

    /// Return the ring to the pool's inactive state. Pieces stay in place
    /// until the next rebuild so their storage can be reused.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Out-of-view despawn contract: deactivate once the ring has risen
    /// past the viewpoint by the configured distance. Runs every tick,
    /// independent of the spawner's recycle pass.
    pub fn tick_despawn(&mut self, view_y: f32, despawn_distance: f32) {
        if self.active && self.y > view_y + despawn_distance {
            log::debug!("ring at y={:.1} left view, despawning", self.y);
            self.deactivate();
        }
    }

    /// Rebuild all segment geometry from `pattern`.
    ///
    /// Any pieces from a previous activation are dropped first; a second
    /// call leaves exactly the geometry of the second pattern. A pattern
    /// whose length disagrees with the configured segment count is a
    /// programming error and fails fast - geometry built from it would
    /// corrupt gameplay silently.
    pub fn rebuild(
        &mut self,
        pattern: &Pattern,
        danger_enabled: bool,
        palette: &Palette,
        cfg: &RingConfig,
    ) {
        assert_eq!(
            pattern.len(),
            cfg.segments_per_ring,
            "pattern length does not match configured segment count",
        );

        self.pieces.clear();

        let angle_per = cfg.angle_per_segment();
        for (slice, kind) in pattern.iter().enumerate() {
            let resolved = match kind {
                SegmentKind::Gap => None,
                // Danger is globally gated; before it unlocks the slice
                // degrades to an opening.
                SegmentKind::Danger if !danger_enabled => None,
                SegmentKind::Danger => Some(SurfaceTag::DangerZone),
                SegmentKind::Safe => Some(SurfaceTag::SafeZone),
            };

            let piece = match resolved {
                None => build_gap(slice, angle_per, cfg),
                Some(tag) => {
                    let color = match tag {
                        SurfaceTag::DangerZone => palette.danger,
                        _ => palette.safe,
                    };
                    build_solid(slice, angle_per, tag, color, cfg)
                }
            };
            self.pieces.push(piece);
        }
    }

    /// Tag of the first volume containing a ring-local point, solid boxes
    /// before triggers so a point inside both reads as a surface hit.
    pub fn hit_test(&self, local_point: Vec3) -> Option<SurfaceTag> {
        let mut trigger_hit = None;
        for piece in &self.pieces {
            match piece {
                SegmentPiece::Solid { colliders, .. } => {
                    if colliders.iter().any(|c| c.contains(local_point)) {
                        return Some(colliders[0].tag);
                    }
                }
                SegmentPiece::Gap { trigger, .. } => {
                    if trigger_hit.is_none() && trigger.contains(local_point) {
                        trigger_hit = Some(trigger.tag);
                    }
                }
            }
        }
        trigger_hit
    }
}

fn build_gap(slice: usize, angle_per: f32, cfg: &RingConfig) -> SegmentPiece {
    let mid_angle = slice as f32 * angle_per + angle_per / 2.0;
    let mut center = arc_point(cfg.mid_radius(), mid_angle, 0.0);
    // Sunk slightly so the falling ball crosses it after clearing the
    // ring plane.
    center.y = -0.5;

    SegmentPiece::Gap {
        slice,
        trigger: ColliderBox {
            center,
            yaw_deg: 0.0,
            half_extents: Vec3::new(0.75, 0.5, 0.75),
            is_trigger: true,
            tag: SurfaceTag::GapTrigger,
        },
    }
}

fn build_solid(
    slice: usize,
    angle_per: f32,
    tag: SurfaceTag,
    color: [f32; 4],
    cfg: &RingConfig,
) -> SegmentPiece {
    let start_angle = slice as f32 * angle_per;
    let mesh = build_arc_solid(
        start_angle,
        angle_per,
        cfg.inner_radius,
        cfg.outer_radius,
        cfg.height,
    );

    let mid_radius = cfg.mid_radius();
    let depth = cfg.outer_radius - cfg.inner_radius;
    let sub_angle = angle_per / cfg.boxes_per_segment as f32;
    // Box footprint proportional to the local arc length.
    let width = mid_radius * sub_angle.to_radians();

    let colliders = (0..cfg.boxes_per_segment)
        .map(|b| {
            let yaw = start_angle + sub_angle * (b as f32 + 0.5);
            ColliderBox {
                center: arc_point(mid_radius, yaw, 0.0),
                yaw_deg: yaw,
                half_extents: Vec3::new(
                    width * 0.95 / 2.0,
                    (cfg.height + 0.1) / 2.0,
                    depth / 2.0,
                ),
                is_trigger: false,
                tag,
            }
        })
        .collect();

    SegmentPiece::Solid {
        slice,
        mesh,
        colliders,
        tag,
        color,
    }
}
