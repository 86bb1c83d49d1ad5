//! Ring pool and spawn-ahead logic
//!
//! A fixed-size pool of rings is partitioned into an available queue and
//! an active list; every ring is in exactly one of the two at all times.
//! While spawning, each tick first honors ring-local despawns, then
//! recycles rings whose active flag was cleared (by despawn or by the
//! collision handler), then spawns ahead of the falling viewpoint until
//! the lookahead distance is covered or the pool runs dry. Exhaustion is
//! backpressure, not an error: spawning stalls until recycling frees a
//! ring.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pattern::Pattern;
use super::ring::{Palette, Ring};
use crate::config::RingConfig;
use crate::game::GamePhase;

/// Owns the ring pool and drives spawning for one run at a time.
#[derive(Debug)]
pub struct RingSpawner {
    cfg: RingConfig,
    palette: Palette,
    rings: Vec<Ring>,
    available: VecDeque<usize>,
    active: Vec<usize>,
    /// Height the next ring will spawn at
    next_spawn_y: f32,
    /// Rings spawned since the run started (1-based after first spawn)
    ring_count: u32,
    spawning: bool,
    rng: Pcg32,
}

impl RingSpawner {
    /// Build the pool up front; it never grows afterwards.
    pub fn new(cfg: RingConfig, palette: Palette, seed: u64) -> Self {
        let cfg = cfg.validate();
        let rings = (0..cfg.pool_size).map(|_| Ring::new()).collect();
        let available = (0..cfg.pool_size).collect();
        log::info!("ring pool initialized with {} rings", cfg.pool_size);

        Self {
            next_spawn_y: cfg.first_ring_y,
            cfg,
            palette,
            rings,
            available,
            active: Vec::new(),
            ring_count: 0,
            spawning: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// React to a game phase transition. Must be called exactly once per
    /// actual change (the tick loop edge-triggers it from a polled
    /// snapshot).
    pub fn on_state_changed(&mut self, phase: GamePhase) {
        match phase {
            GamePhase::Menu => {
                self.stop_spawning();
                self.clear_all();
            }
            GamePhase::Playing => self.start_spawning(),
            GamePhase::GameOver => self.stop_spawning(),
        }
    }

    /// Enter the spawning state: reclaim everything, reset the run
    /// counters and pre-fill the column with the initial burst.
    fn start_spawning(&mut self) {
        self.clear_all();
        self.ring_count = 0;
        self.next_spawn_y = self.cfg.first_ring_y;
        self.spawning = true;

        for _ in 0..self.cfg.initial_burst {
            self.spawn_next();
        }
        log::info!(
            "spawning started, {} rings pre-filled down to y={:.1}",
            self.active.len(),
            self.next_spawn_y + self.cfg.ring_spacing
        );
    }

    fn stop_spawning(&mut self) {
        self.spawning = false;
    }

    /// Deactivate and reclaim every active ring.
    fn clear_all(&mut self) {
        for idx in self.active.drain(..) {
            self.rings[idx].deactivate();
            self.available.push_back(idx);
        }
    }

    /// One simulation tick while the game is playing: despawn pass,
    /// recycle pass, then spawn-ahead against the current viewpoint.
    pub fn tick(&mut self, view_y: f32) {
        if !self.spawning {
            return;
        }

        // Rings honor their out-of-view contract first, so the recycle
        // pass below sees the flag within the same tick.
        for &idx in &self.active {
            self.rings[idx].tick_despawn(view_y, self.cfg.despawn_distance);
        }

        self.recycle();
        self.spawn_ahead(view_y);
    }

    /// Return rings that are no longer active to the pool. The flag may
    /// have been cleared by despawn or externally by the collision
    /// handler; it is read, never assumed.
    fn recycle(&mut self) {
        for i in (0..self.active.len()).rev() {
            let idx = self.active[i];
            if !self.rings[idx].is_active() {
                self.active.swap_remove(i);
                self.available.push_back(idx);
            }
        }
    }

    /// Spawn rings until the column reaches `view_y` minus the lookahead
    /// distance, or the pool is exhausted.
    fn spawn_ahead(&mut self, view_y: f32) {
        let target_y = view_y - self.cfg.spawn_ahead_distance;
        while self.next_spawn_y > target_y {
            if !self.spawn_next() {
                // Pool exhausted; stall until recycling frees capacity.
                break;
            }
        }
    }

    /// Take a ring from the pool, generate a fresh pattern and assemble
    /// it at the next spawn height. Returns false when the pool is empty.
    fn spawn_next(&mut self) -> bool {
        let Some(idx) = self.available.pop_front() else {
            return false;
        };

        self.ring_count += 1;
        let danger_enabled = self.ring_count > self.cfg.safe_platforms_count;
        let is_first_ring = self.ring_count == 1;

        let pattern = Pattern::generate(
            &mut self.rng,
            self.cfg.segments_per_ring,
            danger_enabled,
            is_first_ring,
            self.cfg.min_danger_zones,
            self.cfg.max_danger_zones,
        );

        self.rings[idx].activate(
            self.next_spawn_y,
            &pattern,
            danger_enabled,
            &self.palette,
            &self.cfg,
        );
        self.active.push(idx);

        log::debug!(
            "spawned ring #{} at y={:.1} (danger: {})",
            self.ring_count,
            self.next_spawn_y,
            danger_enabled
        );
        self.next_spawn_y -= self.cfg.ring_spacing;
        true
    }

    #[inline]
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Rings spawned since the run started
    #[inline]
    pub fn rings_spawned(&self) -> u32 {
        self.ring_count
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    #[inline]
    pub fn pool_capacity(&self) -> usize {
        self.rings.len()
    }

    /// Iterate currently active rings
    pub fn active_rings(&self) -> impl Iterator<Item = &Ring> {
        self.active.iter().map(|&idx| &self.rings[idx])
    }

    /// Mutable access for external consumers of the active flag (the
    /// collision handler deactivates a ring the ball has cleared).
    pub fn active_rings_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        self.rings
            .iter_mut()
            .filter(|ring| ring.is_active())
    }

    pub fn config(&self) -> &RingConfig {
        &self.cfg
    }
}
