//! Draw-list snapshot for an external renderer
//!
//! The core never draws; it exposes, per live entity, a symbolic sprite
//! identifier, the current bounds, and - when the bounds changed since the
//! renderer last looked - the stale bounds to erase first (the dirty-rect
//! contract). Resolving sprite names to drawable regions is the renderer's
//! job. Bricks destroyed since the last frame arrive separately via
//! `GameEvent::BrickDestroyed`, which carries the freed bounds.

use crate::sim::level::BrickColor;
use crate::sim::rect::Rect;
use crate::sim::state::{BallPower, GameState, PaddleSize};

/// Symbolic sprite identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Ball(BallPower),
    Paddle(PaddleSize),
    Brick {
        color: BrickColor,
        half: bool,
        shield: u8,
    },
}

impl SpriteId {
    /// Sprite-sheet lookup name, e.g. "brick/full/sapphire/shield2"
    pub fn name(&self) -> String {
        match self {
            SpriteId::Ball(power) => {
                let tag = match power {
                    BallPower::Normal => "normal",
                    BallPower::Slow => "slow",
                    BallPower::Fast => "fast",
                };
                format!("ball/{tag}")
            }
            SpriteId::Paddle(size) => {
                let tag = match size {
                    PaddleSize::Small => "small",
                    PaddleSize::Normal => "normal",
                    PaddleSize::Large => "large",
                };
                format!("paddle/{tag}")
            }
            SpriteId::Brick {
                color,
                half,
                shield,
            } => {
                let width = if *half { "half" } else { "full" };
                if *shield > 0 {
                    format!("brick/{width}/{}/shield{shield}", color.name())
                } else {
                    format!("brick/{width}/{}", color.name())
                }
            }
        }
    }
}

/// One entry in the frame's draw list
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub sprite: SpriteId,
    pub rect: Rect,
    /// Previous-frame bounds to clear before drawing, if they went stale
    pub erase: Option<Rect>,
}

/// Snapshot the live entities into a draw list, marking their bounds as
/// observed. Call exactly once per rendered frame.
pub fn collect(state: &mut GameState) -> Vec<SceneItem> {
    let mut items = Vec::new();

    if let Some(level) = state.levels.current_mut() {
        for brick in &mut level.bricks {
            items.push(SceneItem {
                sprite: SpriteId::Brick {
                    color: brick.color,
                    half: brick.half,
                    shield: brick.shield,
                },
                rect: *brick.body.rect(),
                erase: brick.body.observe(),
            });
        }
    }

    items.push(SceneItem {
        sprite: SpriteId::Paddle(state.paddle.size),
        rect: *state.paddle.body.rect(),
        erase: state.paddle.body.observe(),
    });
    items.push(SceneItem {
        sprite: SpriteId::Ball(state.ball.power),
        rect: *state.ball.body.rect(),
        erase: state.ball.body.observe(),
    });

    items
}
