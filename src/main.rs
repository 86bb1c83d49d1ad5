//! Ring Descent entry point
//!
//! Headless autoplay demo: runs the fixed-timestep simulation with a
//! minimal falling ball on top of the surface probe, the same way a
//! rendering host would drive it. Useful for profiling the spawner and
//! for watching the core play out in logs.

use std::path::PathBuf;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ring_descent::consts::SIM_DT;
use ring_descent::sim::{Steer, SurfaceTag, TickInput, World, tick};
use ring_descent::{GamePhase, GameSession, Profile, RingConfig};

/// Ball tuning for the demo, mirroring the reference player controller
mod ball {
    /// Extra gravity on top of the base fall, units per second squared
    pub const GRAVITY: f32 = 12.8;
    /// Upward velocity applied on a safe bounce
    pub const BOUNCE: f32 = 6.0;
    /// Camera height above the ball
    pub const CAMERA_OFFSET: f32 = 2.0;
}

/// The falling body the collision handler moves
struct Ball {
    pos: Vec3,
    vy: f32,
    /// Debounce so one gap passage scores once
    in_gap: bool,
}

impl Ball {
    fn new(ring_radius: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, 0.0, ring_radius),
            vy: 0.0,
            in_gap: false,
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Ring Descent (headless demo) starting...");

    let profile_path = PathBuf::from(Profile::FILE_NAME);
    let profile = Profile::load_from(&profile_path);
    log::info!(
        "profile: high score {}, games played {}",
        profile.high_score,
        profile.games_played
    );

    let cfg = RingConfig::default();
    let mid_radius = cfg.mid_radius();
    let mut world = World::new(cfg, GameSession::new(profile), 0xDECE57);
    let mut ball = Ball::new(mid_radius);
    let mut steer_rng = Pcg32::seed_from_u64(1);
    let mut steer = Steer::Idle;

    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    // Up to two minutes of simulated play.
    let max_ticks = (120.0 / SIM_DT) as u32;
    for step in 0..max_ticks {
        // Wander the steering every quarter second; a real host maps
        // touch halves or A/D here.
        if step % 30 == 0 {
            steer = match steer_rng.random_range(0..3) {
                0 => Steer::Left,
                1 => Steer::Right,
                _ => Steer::Idle,
            };
        }
        input.steer = steer;
        input.view_y = ball.pos.y + ball::CAMERA_OFFSET;

        tick(&mut world, &input, SIM_DT);
        input.start = false;

        // Falling-body handler: move, then act on the collision tag.
        let max_fall = world.session.fall_speed();
        ball.vy = (ball.vy - ball::GRAVITY * SIM_DT).max(-max_fall);
        ball.pos.y += ball.vy * SIM_DT;

        match world.probe(ball.pos) {
            Some(SurfaceTag::SafeZone) => {
                if ball.vy < 0.0 {
                    ball.vy = ball::BOUNCE;
                }
                ball.in_gap = false;
            }
            Some(SurfaceTag::DangerZone) => {
                world.session.game_over();
            }
            Some(SurfaceTag::GapTrigger) => {
                if !ball.in_gap {
                    world.session.add_score(1);
                    ball.in_gap = true;
                    log::debug!("gap passed, score {}", world.session.score());
                }
            }
            None => ball.in_gap = false,
        }

        if step % 120 == 0 {
            log::info!(
                "t={:>5.1}s score={:<3} depth={:>7.1} yaw={:>7.1} rings {}/{} spawned {}",
                step as f32 * SIM_DT,
                world.session.score(),
                ball.pos.y,
                world.rotation.current_yaw(),
                world.spawner.active_count(),
                world.spawner.pool_capacity(),
                world.spawner.rings_spawned(),
            );
        }

        if world.session.phase() == GamePhase::GameOver {
            break;
        }
    }

    if world.session.phase() == GamePhase::Playing {
        world.session.game_over();
    }

    log::info!(
        "run ended: score {}, high score {}, {} rings spawned",
        world.session.score(),
        world.session.profile.high_score,
        world.spawner.rings_spawned(),
    );

    if let Err(e) = world.session.profile.save_to(&profile_path) {
        log::warn!("could not save profile: {e}");
    }
}
