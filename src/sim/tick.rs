//! Fixed timestep simulation tick
//!
//! Advances the world one step: one-shot inputs, phase edge detection,
//! rotation, then the spawner's despawn/recycle/spawn-ahead passes. The
//! host feeds the current viewpoint height in with the input each tick.

use glam::Vec3;

use super::ring::{Palette, SurfaceTag};
use super::rotation::{RotationController, Steer};
use super::spawner::RingSpawner;
use crate::config::RingConfig;
use crate::game::{GamePhase, GameSession};
use crate::rotate_y;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steering direction held this tick
    pub steer: Steer,
    /// Start or restart a run (one-shot)
    pub start: bool,
    /// Return to menu (one-shot)
    pub menu: bool,
    /// Viewpoint height (camera), read fresh every tick
    pub view_y: f32,
}

/// The simulation world: session, ring pool and shared-parent rotation.
#[derive(Debug)]
pub struct World {
    pub session: GameSession,
    pub spawner: RingSpawner,
    pub rotation: RotationController,
    last_phase: GamePhase,
}

impl World {
    pub fn new(cfg: RingConfig, session: GameSession, seed: u64) -> Self {
        let cfg = cfg.validate();
        let rotation = RotationController::new(cfg.rotation_speed, cfg.rotation_smoothing);
        Self {
            spawner: RingSpawner::new(cfg, Palette::default(), seed),
            session,
            rotation,
            last_phase: GamePhase::Menu,
        }
    }

    /// Tag of the generated volume containing a world-space point, if any.
    ///
    /// Applies the inverse of the shared parent yaw, then each active
    /// ring's vertical offset. This is the whole interface gameplay
    /// outcomes flow through: the falling-body handler bounces, ends the
    /// run or scores purely on the returned tag.
    pub fn probe(&self, world_point: Vec3) -> Option<SurfaceTag> {
        let unrotated = rotate_y(world_point, -self.rotation.current_yaw());
        // Vertical cull band: solid boxes span the ring height plus a
        // small skin, gap triggers reach a unit below the ring plane.
        let cfg = self.spawner.config();
        let band = ((cfg.height + 0.1) / 2.0).max(1.0);
        for ring in self.spawner.active_rings() {
            let local = unrotated - Vec3::new(0.0, ring.y(), 0.0);
            if local.y.abs() > band {
                continue;
            }
            if let Some(tag) = ring.hit_test(local) {
                return Some(tag);
            }
        }
        None
    }

    /// Compare the session phase against the last observed one and fire
    /// the transition reactions exactly once per actual change.
    fn apply_phase_edge(&mut self) {
        let phase = self.session.phase();
        if phase == self.last_phase {
            return;
        }
        log::debug!("phase change {:?} -> {:?}", self.last_phase, phase);
        if matches!(phase, GamePhase::Playing | GamePhase::Menu) {
            self.rotation.reset();
        }
        self.spawner.on_state_changed(phase);
        self.last_phase = phase;
    }
}

/// Advance the world by one fixed timestep.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    // External transitions (the collision handler calling game_over
    // between ticks) must be observed before this tick's inputs move the
    // phase again, or a same-tick restart would mask the game over and
    // the run would never reset.
    world.apply_phase_edge();

    // One-shot inputs.
    if input.start && world.session.phase() != GamePhase::Playing {
        world.session.start_game();
    }
    if input.menu {
        world.session.return_to_menu();
    }
    world.apply_phase_edge();

    if world.session.phase() != GamePhase::Playing {
        return;
    }

    // Fixed in-tick order: input, rotation, then the pool passes.
    world.rotation.steer(input.steer, dt);
    world.rotation.update(dt);
    world.spawner.tick(input.view_y);
}
