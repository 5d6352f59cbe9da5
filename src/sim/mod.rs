//! Simulation: physics, AI drivers, and effect timers
//!
//! Pure and platform-free: no drawing, no input polling, no clocks. The
//! scene composer owns the entities and drives everything through explicit
//! dt-scaled ticks; cues out, snapshots in.

pub mod ai;
pub mod ball;
pub mod effects;
pub mod paddle;

pub use ball::{BallController, Goal};
pub use effects::{FlashEffect, Particle, ParticleBurst};
pub use paddle::{PaddleController, Player};
