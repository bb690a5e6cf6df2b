//! Brickout - a brick-and-paddle arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, game state)
//! - `scheduler`: Fixed-timestep accumulator driving the simulation
//! - `scene`: Draw-list snapshot consumed by an external renderer

pub mod scene;
pub mod scheduler;
pub mod sim;

pub use scene::{SceneItem, SpriteId};
pub use scheduler::FrameScheduler;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1250.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Launch velocity components (velocity units, y grows downward)
    pub const BALL_LAUNCH_VEL: (f32, f32) = (50.0, -50.0);
    /// Velocity units to pixels/second
    pub const BASE_SPEED: f32 = 3.0;
    /// Ball speed scaling under the Slow / Fast power states
    pub const SLOW_MULTIPLIER: f32 = 0.6;
    pub const FAST_MULTIPLIER: f32 = 1.6;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    pub const PADDLE_SMALL_WIDTH: f32 = 60.0;
    pub const PADDLE_LARGE_WIDTH: f32 = 150.0;
    /// Horizontal paddle velocity (velocity units)
    pub const PADDLE_SPEED: f32 = 100.0;
    /// Paddle rest height above the bottom of the field
    pub const PADDLE_Y_OFFSET: f32 = 160.0;
    /// Strike-offset scaling for paddle rebounds
    pub const PADDLE_VARIANCE: f32 = 0.8;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    /// Highest valid shield tier (tier N survives N extra hits)
    pub const MAX_SHIELD_TIER: u8 = 3;

    pub const STARTING_LIVES: u8 = 3;
    /// Power-up lifetime: 10 simulated seconds at 60 Hz
    pub const POWERUP_DURATION_TICKS: u64 = 600;
    /// Pause between a cleared board and the next one (2 seconds)
    pub const LEVEL_CLEAR_PAUSE_TICKS: u32 = 120;
}
