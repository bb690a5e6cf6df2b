//! Game state and core simulation types
//!
//! Entities are exclusively owned by `GameState` and replaced wholesale on
//! life loss and level start, never patched in place, so power-up state can
//! never leak across a respawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{BrickColor, Level, LevelData, LevelError, LevelQueue};
use super::rect::{Rect, Tracked};
use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    Splash,
    /// Entities provisioned, ball attached, waiting for the first launch
    Ready,
    /// Active gameplay
    Playing,
    /// Short pause between a cleared board and the next one
    LevelCleared,
    /// Run ended; the next launch input starts a fresh session
    GameOver,
}

/// Ball power state (affects speed scaling and sprite selection only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallPower {
    #[default]
    Normal,
    Slow,
    Fast,
}

impl BallPower {
    #[inline]
    pub fn multiplier(&self) -> f32 {
        match self {
            BallPower::Normal => 1.0,
            BallPower::Slow => SLOW_MULTIPLIER,
            BallPower::Fast => FAST_MULTIPLIER,
        }
    }
}

/// Paddle size state (affects collision width and sprite selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl PaddleSize {
    #[inline]
    pub fn width(&self) -> f32 {
        match self {
            PaddleSize::Small => PADDLE_SMALL_WIDTH,
            PaddleSize::Normal => PADDLE_WIDTH,
            PaddleSize::Large => PADDLE_LARGE_WIDTH,
        }
    }
}

/// Effect granted by breaking (well, striking) a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUp {
    #[default]
    None,
    Slow,
    Fast,
    Expand,
    Contract,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Tracked,
    /// Velocity components in velocity units (see `consts::BASE_SPEED`)
    pub vel: Vec2,
    /// False while resting on the paddle
    pub launched: bool,
    /// Base speed scalar
    pub speed: f32,
    pub power: BallPower,
    /// Simulation tick at which the power state reverts to Normal
    pub power_expires: Option<u64>,
}

impl Ball {
    /// Spawn a fresh ball resting on the paddle. The tracked bounds start
    /// at the spawn position, so the first scene snapshot has nothing
    /// stale to erase.
    pub fn new(paddle: &Paddle) -> Self {
        let pad = paddle.body.rect();
        let spawn = Rect::new(
            pad.center().x - BALL_SIZE / 2.0,
            pad.top() - BALL_SIZE,
            BALL_SIZE,
            BALL_SIZE,
        );
        Self {
            body: Tracked::new(spawn),
            vel: Vec2::new(BALL_LAUNCH_VEL.0, BALL_LAUNCH_VEL.1),
            launched: false,
            speed: BASE_SPEED,
            power: BallPower::Normal,
            power_expires: None,
        }
    }

    /// Slave the ball to the paddle while unlaunched: centered, resting
    /// just above the paddle's top edge
    pub fn follow(&mut self, paddle: &Paddle) {
        let rect = self.body.rect_mut();
        rect.pos.x = paddle.body.rect().center().x - rect.size.x / 2.0;
        rect.pos.y = paddle.body.rect().top() - rect.size.y;
    }

    /// Advance position by one timestep
    pub fn integrate(&mut self, dt: f32) {
        let step = self.vel * self.speed * self.power.multiplier() * dt;
        self.body.rect_mut().pos += step;
    }

    /// Reflect off the left/right/top field edges, clamping position.
    /// The bottom edge is deliberately open: falling past the paddle is
    /// the life-loss trigger, detected by the state machine.
    pub fn bounce_walls(&mut self) {
        let rect = self.body.rect_mut();
        if rect.left() < 0.0 {
            rect.pos.x = 0.0;
            self.vel.x = -self.vel.x;
        } else if rect.right() > FIELD_WIDTH {
            rect.pos.x = FIELD_WIDTH - rect.size.x;
            self.vel.x = -self.vel.x;
        }
        if rect.top() < 0.0 {
            rect.pos.y = 0.0;
            self.vel.y = -self.vel.y;
        }
    }

    pub fn set_power(&mut self, power: BallPower, now: u64) {
        self.power = power;
        self.power_expires = Some(now + POWERUP_DURATION_TICKS);
    }

    /// Revert an expired power state; returns true if a revert happened
    pub fn expire_power(&mut self, now: u64) -> bool {
        if let Some(at) = self.power_expires
            && now >= at
        {
            self.power = BallPower::Normal;
            self.power_expires = None;
            return true;
        }
        false
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Tracked,
    /// Horizontal velocity in velocity units; vertical motion never happens
    pub vel_x: f32,
    pub size: PaddleSize,
    /// Simulation tick at which the size state reverts to Normal
    pub size_expires: Option<u64>,
}

impl Paddle {
    /// Spawn a fresh normal-size paddle at the field's bottom center
    pub fn new() -> Self {
        let w = PaddleSize::Normal.width();
        Self {
            body: Tracked::new(Rect::new(
                FIELD_WIDTH / 2.0 - w / 2.0,
                FIELD_HEIGHT - PADDLE_Y_OFFSET,
                w,
                PADDLE_HEIGHT,
            )),
            vel_x: PADDLE_SPEED,
            size: PaddleSize::Normal,
            size_expires: None,
        }
    }

    /// Move horizontally by direction (-1 left, +1 right) for one timestep
    pub fn steer(&mut self, dir: f32, dt: f32) {
        self.body.rect_mut().pos.x += dir * self.vel_x * BASE_SPEED * dt;
    }

    /// Move toward a pointer target at the same max speed as key steering
    pub fn track_target(&mut self, target_x: f32, dt: f32) {
        let center = self.body.rect().center().x;
        let max_step = self.vel_x * BASE_SPEED * dt;
        let delta = (target_x - center).clamp(-max_step, max_step);
        self.body.rect_mut().pos.x += delta;
    }

    /// Clamp (not reflect) to the field's left/right edges
    pub fn clamp_to_field(&mut self) {
        let rect = self.body.rect_mut();
        rect.pos.x = rect.pos.x.clamp(0.0, FIELD_WIDTH - rect.size.x);
    }

    pub fn set_size(&mut self, size: PaddleSize, now: u64) {
        self.size = size;
        self.size_expires = Some(now + POWERUP_DURATION_TICKS);
        self.resize(size);
    }

    /// Revert an expired size state; returns true if a revert happened
    pub fn expire_size(&mut self, now: u64) -> bool {
        if let Some(at) = self.size_expires
            && now >= at
        {
            self.size = PaddleSize::Normal;
            self.size_expires = None;
            self.resize(PaddleSize::Normal);
            return true;
        }
        false
    }

    fn resize(&mut self, size: PaddleSize) {
        self.body
            .rect_mut()
            .resize_centered(Vec2::new(size.width(), PADDLE_HEIGHT));
        self.clamp_to_field();
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of striking a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Non-breakable brick: permanent obstacle, nothing happens
    Ignored,
    /// Shield absorbed the hit and dropped one tier
    Damaged,
    /// Shield exhausted; remove the brick from the live set
    Destroyed,
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub body: Tracked,
    pub color: BrickColor,
    pub breakable: bool,
    /// Remaining shield tier: 0 breaks on the next hit
    pub shield: u8,
    pub power: PowerUp,
    /// Set once the power tag has been read (first successful hit)
    pub power_spent: bool,
    /// Half-width size variant
    pub half: bool,
}

impl Brick {
    /// Apply one hit. Tier N bricks take N+1 hits to destroy.
    pub fn hit(&mut self) -> HitOutcome {
        if !self.breakable {
            return HitOutcome::Ignored;
        }
        if self.shield > 0 {
            self.shield -= 1;
            HitOutcome::Damaged
        } else {
            HitOutcome::Destroyed
        }
    }

    /// Read the power tag on the first successful hit only. Later hits of
    /// a multi-shield brick yield nothing.
    pub fn take_power(&mut self) -> PowerUp {
        if self.power_spent || !self.breakable {
            return PowerUp::None;
        }
        self.power_spent = true;
        self.power
    }
}

/// Observable events produced by the simulation, drained once per frame by
/// the embedder (renderer, audio, UI). `BrickDestroyed` carries the freed
/// bounds so the renderer can erase the stale footprint.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BallLaunched,
    BrickDamaged { shield_left: u8 },
    BrickDestroyed { bounds: Rect },
    PowerUpActivated(PowerUp),
    PowerUpExpired(PowerUp),
    BallLost { lives_left: u8 },
    LevelCleared { index: u32 },
    GameWon,
    GameOver,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Index of the board currently at the head of the queue (0-based)
    pub level_index: u32,
    /// Ticks remaining in the LevelCleared pause
    pub clear_pause_ticks: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub levels: LevelQueue,
    /// Pristine parsed boards, kept for the game-won reset
    authored: Vec<Level>,
    /// Pending events for the embedder (not part of saved state)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Parse and validate every board up front, then start at the splash
    /// screen. Malformed level data fails here, never mid-game.
    pub fn new(data: Vec<LevelData>) -> Result<Self, LevelError> {
        if data.is_empty() {
            return Err(LevelError::NoLevels);
        }
        let authored = data
            .iter()
            .enumerate()
            .map(|(i, d)| Level::build(i as u32, d))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("loaded {} level(s)", authored.len());

        let paddle = Paddle::new();
        let ball = Ball::new(&paddle);
        let mut state = Self {
            phase: GamePhase::Splash,
            lives: STARTING_LIVES,
            time_ticks: 0,
            level_index: 0,
            clear_pause_ticks: 0,
            paddle,
            ball,
            levels: LevelQueue::default(),
            authored,
            events: Vec::new(),
        };
        state.reset_session();
        Ok(state)
    }

    /// Rebuild the whole session: full queue from the authored boards,
    /// starting lives, fresh entities. Used on new-game, game-over restart
    /// and the game-won reset.
    pub fn reset_session(&mut self) {
        self.levels = LevelQueue::from_levels(self.authored.clone());
        self.level_index = 0;
        self.lives = STARTING_LIVES;
        self.clear_pause_ticks = 0;
        self.respawn();
    }

    /// Fresh ball and paddle (unlaunched, normal size/speed). Replacing
    /// both wholesale is what guarantees no stale power-up state.
    pub fn respawn(&mut self) {
        self.paddle = Paddle::new();
        self.ball = Ball::new(&self.paddle);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
