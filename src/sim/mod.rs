//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level bricks keep their authored order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, aabb_contact, paddle_rebound, rebound};
pub use level::{BrickColor, BrickSize, BrickSpec, Level, LevelData, LevelError, LevelQueue};
pub use rect::{Rect, Tracked};
pub use state::{Ball, BallPower, Brick, GameEvent, GamePhase, GameState, HitOutcome, Paddle, PaddleSize, PowerUp};
pub use tick::{TickInput, tick};
