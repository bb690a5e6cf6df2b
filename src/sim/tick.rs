//! Fixed timestep simulation tick
//!
//! The per-tick update order while Playing is fixed and load-bearing:
//! level-clear check, ball-drop check, paddle motion, then ball motion with
//! wall, paddle and brick collisions resolved in that order.

use super::collision::{aabb_contact, paddle_rebound, rebound};
use super::level::Level;
use super::state::{
    BallPower, GameEvent, GamePhase, GameState, HitOutcome, PaddleSize, PowerUp,
};
use crate::consts::*;

/// Input signals for a single tick (deterministic)
///
/// `left`/`right` are the held-key set sampled every tick. `launch` is a
/// one-shot edge the input collaborator raises exactly once per press; it
/// doubles as the start/restart input outside of gameplay.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub launch: bool,
    /// Optional pointer target for the paddle center (alternate input
    /// source with the same velocity contract as key steering)
    pub paddle_target: Option<f32>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Splash => {
            if input.launch {
                log::info!("session start");
                state.phase = GamePhase::Ready;
            }
        }

        GamePhase::Ready => {
            steer_paddle(state, input, dt);
            state.ball.follow(&state.paddle);
            if input.launch {
                state.ball.launched = true;
                state.push_event(GameEvent::BallLaunched);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => playing_tick(state, input, dt),

        GamePhase::LevelCleared => {
            state.clear_pause_ticks = state.clear_pause_ticks.saturating_sub(1);
            if state.clear_pause_ticks == 0 {
                log::info!("starting level {}", state.level_index);
                state.respawn();
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::GameOver => {
            if input.launch {
                state.reset_session();
                state.phase = GamePhase::Ready;
            }
        }
    }
}

fn playing_tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // 1. Board cleared? No breakable bricks left means stop simulating
    //    this level and move the queue along.
    let remaining = state
        .levels
        .current()
        .map_or(0, Level::breakable_remaining);
    if remaining == 0 {
        let cleared = state.level_index;
        state.levels.advance();
        state.push_event(GameEvent::LevelCleared { index: cleared });
        log::info!("level {cleared} cleared");

        if state.levels.current().is_none() {
            // Every authored board destroyed: the run is won. Reset to
            // the first level and return to the splash screen.
            log::info!("game won");
            state.push_event(GameEvent::GameWon);
            state.reset_session();
            state.phase = GamePhase::Splash;
        } else {
            state.level_index += 1;
            state.clear_pause_ticks = LEVEL_CLEAR_PAUSE_TICKS;
            state.phase = GamePhase::LevelCleared;
        }
        return;
    }

    // 2. Dropped ball? Past the paddle by more than twice its height.
    if state.ball.launched {
        let paddle_rect = *state.paddle.body.rect();
        let drop_line = paddle_rect.bottom() + 2.0 * paddle_rect.size.y;
        if state.ball.body.rect().top() > drop_line {
            state.lives = state.lives.saturating_sub(1);
            state.push_event(GameEvent::BallLost {
                lives_left: state.lives,
            });
            log::info!("ball lost, {} live(s) left", state.lives);
            if state.lives == 0 {
                state.push_event(GameEvent::GameOver);
                state.phase = GamePhase::GameOver;
            } else {
                state.respawn();
            }
            return;
        }
    }

    // 3. Paddle motion, clamped to the field.
    expire_paddle_size(state);
    steer_paddle(state, input, dt);

    // 4. Unlaunched ball rides the paddle until the launch edge.
    if !state.ball.launched {
        state.ball.follow(&state.paddle);
        if input.launch {
            state.ball.launched = true;
            state.push_event(GameEvent::BallLaunched);
        }
        return;
    }

    // 5. Ball motion: integrate, then walls, paddle, bricks in order.
    expire_ball_power(state);
    state.ball.integrate(dt);
    state.ball.bounce_walls();
    resolve_paddle_collision(state);
    resolve_brick_collision(state);
}

fn steer_paddle(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(target) = input.paddle_target {
        state.paddle.track_target(target, dt);
    } else {
        let dir = (input.right as i8 - input.left as i8) as f32;
        if dir != 0.0 {
            state.paddle.steer(dir, dt);
        }
    }
    state.paddle.clamp_to_field();
}

fn expire_ball_power(state: &mut GameState) {
    let prior = state.ball.power;
    if state.ball.expire_power(state.time_ticks) {
        let tag = match prior {
            BallPower::Slow => PowerUp::Slow,
            BallPower::Fast => PowerUp::Fast,
            BallPower::Normal => return,
        };
        state.push_event(GameEvent::PowerUpExpired(tag));
    }
}

fn expire_paddle_size(state: &mut GameState) {
    let prior = state.paddle.size;
    if state.paddle.expire_size(state.time_ticks) {
        let tag = match prior {
            PaddleSize::Large => PowerUp::Expand,
            PaddleSize::Small => PowerUp::Contract,
            PaddleSize::Normal => return,
        };
        state.push_event(GameEvent::PowerUpExpired(tag));
    }
}

fn resolve_paddle_collision(state: &mut GameState) {
    // Only respond while descending, so a fresh rebound can't re-trigger
    if state.ball.vel.y <= 0.0 {
        return;
    }
    let paddle_rect = *state.paddle.body.rect();
    let contact = aabb_contact(state.ball.body.rect(), &paddle_rect);
    if !contact.overlaps {
        return;
    }

    state.ball.vel = paddle_rebound(state.ball.vel, state.ball.body.rect(), &paddle_rect);
    // Seat the ball on the paddle's top edge
    let ball_rect = state.ball.body.rect_mut();
    ball_rect.pos.y = paddle_rect.top() - ball_rect.size.y;
}

fn resolve_brick_collision(state: &mut GameState) {
    let ball_rect = *state.ball.body.rect();
    let Some(level) = state.levels.current_mut() else {
        return;
    };

    // First overlapping brick in authored order; position correction makes
    // a second same-tick overlap impossible in practice.
    let Some((idx, contact)) = level.bricks.iter().enumerate().find_map(|(i, brick)| {
        let contact = aabb_contact(&ball_rect, brick.body.rect());
        contact.overlaps.then_some((i, contact))
    }) else {
        return;
    };

    // Push the ball clear along the response axis, then flip velocity on
    // exactly that axis.
    state.ball.body.rect_mut().pos += contact.penetration;
    state.ball.vel = rebound(state.ball.vel, &contact);

    let brick = &mut level.bricks[idx];
    let power = brick.take_power();
    let mut events = Vec::new();
    match brick.hit() {
        HitOutcome::Ignored => {}
        HitOutcome::Damaged => events.push(GameEvent::BrickDamaged {
            shield_left: brick.shield,
        }),
        HitOutcome::Destroyed => {
            let bounds = *brick.body.rect();
            level.bricks.remove(idx);
            events.push(GameEvent::BrickDestroyed { bounds });
        }
    }
    for event in events {
        state.push_event(event);
    }
    apply_power(state, power);
}

fn apply_power(state: &mut GameState, power: PowerUp) {
    let now = state.time_ticks;
    match power {
        PowerUp::None => return,
        PowerUp::Slow => state.ball.set_power(BallPower::Slow, now),
        PowerUp::Fast => state.ball.set_power(BallPower::Fast, now),
        PowerUp::Expand => state.paddle.set_size(PaddleSize::Large, now),
        PowerUp::Contract => state.paddle.set_size(PaddleSize::Small, now),
    }
    log::debug!("power-up activated: {power:?}");
    state.push_event(GameEvent::PowerUpActivated(power));
}
