//! Deterministic simulation module
//!
//! All ring generation and pooling logic lives here. The module is pure
//! and deterministic: fixed timestep, seeded RNG, no rendering or
//! platform dependencies. Mutation happens synchronously within one tick
//! in a fixed order: input, rotation, despawn, recycle, spawn-ahead.

pub mod mesh;
pub mod pattern;
pub mod ring;
pub mod rotation;
pub mod spawner;
pub mod tick;

pub use mesh::{ARC_STEPS, Mesh, Vertex, build_arc_solid};
pub use pattern::{Pattern, SegmentKind};
pub use ring::{ColliderBox, Palette, Ring, SegmentPiece, SurfaceTag};
pub use rotation::{RotationController, Steer};
pub use spawner::RingSpawner;
pub use tick::{TickInput, World, tick};
