//! Level content: brick descriptors, validation, and the level queue
//!
//! Level data is static configuration consumed by the simulation, never
//! generated by it. Parsing is fail-fast: an out-of-range shield tier or
//! power tag is a load error, not something to silently default.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use super::rect::{Rect, Tracked};
use super::state::{Brick, PowerUp};
use crate::consts::*;

/// Errors raised while loading level content
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level list is empty")]
    NoLevels,
    #[error("level {level} has no bricks")]
    EmptyLevel { level: u32 },
    #[error("level {level}: unknown shield tier {tier} (max {MAX_SHIELD_TIER})")]
    ShieldTier { level: u32, tier: u8 },
    #[error("level {level}: out-of-range power tag {tag}")]
    PowerTag { level: u32, tag: u8 },
    #[error("unknown brick color index {value}")]
    UnknownColor { value: u8 },
    #[error("malformed level json: {0}")]
    Json(String),
}

/// Brick palette, in sprite-sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickColor {
    Red,
    Rose,
    Pink,
    Purple,
    Berry,
    Blue,
    Sapphire,
    Sky,
    Arctic,
    Seafoam,
    Green,
    Olive,
    Yellow,
    Orange,
    White,
}

impl BrickColor {
    const PALETTE: [BrickColor; 15] = [
        BrickColor::Red,
        BrickColor::Rose,
        BrickColor::Pink,
        BrickColor::Purple,
        BrickColor::Berry,
        BrickColor::Blue,
        BrickColor::Sapphire,
        BrickColor::Sky,
        BrickColor::Arctic,
        BrickColor::Seafoam,
        BrickColor::Green,
        BrickColor::Olive,
        BrickColor::Yellow,
        BrickColor::Orange,
        BrickColor::White,
    ];

    /// Palette lookup for grid layouts (0-based)
    pub fn from_index(index: u8) -> Option<Self> {
        Self::PALETTE.get(index as usize).copied()
    }

    /// Symbolic name used in sprite identifiers
    pub fn name(&self) -> &'static str {
        match self {
            BrickColor::Red => "red",
            BrickColor::Rose => "rose",
            BrickColor::Pink => "pink",
            BrickColor::Purple => "purple",
            BrickColor::Berry => "berry",
            BrickColor::Blue => "blue",
            BrickColor::Sapphire => "sapphire",
            BrickColor::Sky => "sky",
            BrickColor::Arctic => "arctic",
            BrickColor::Seafoam => "seafoam",
            BrickColor::Green => "green",
            BrickColor::Olive => "olive",
            BrickColor::Yellow => "yellow",
            BrickColor::Orange => "orange",
            BrickColor::White => "white",
        }
    }
}

/// Brick width variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickSize {
    #[default]
    Full,
    Half,
}

impl BrickSize {
    #[inline]
    pub fn width(&self) -> f32 {
        match self {
            BrickSize::Full => BRICK_WIDTH,
            BrickSize::Half => BRICK_WIDTH / 2.0,
        }
    }
}

/// One brick descriptor in the level content feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickSpec {
    pub x: f32,
    pub y: f32,
    pub color: BrickColor,
    #[serde(default, rename = "shieldTier")]
    pub shield: u8,
    #[serde(default = "default_breakable")]
    pub breakable: bool,
    #[serde(default, rename = "powerTag")]
    pub power: u8,
    #[serde(default, rename = "sizeVariant")]
    pub size: BrickSize,
}

fn default_breakable() -> bool {
    true
}

/// An authored board: an ordered list of brick descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub bricks: Vec<BrickSpec>,
}

impl LevelData {
    pub fn new(bricks: Vec<BrickSpec>) -> Self {
        Self { bricks }
    }

    /// Build a board from a grid of palette indices, one cell per brick
    /// slot: 0 is empty, N places a full-size breakable brick of palette
    /// color N-1 at column * brick-width, row * brick-height.
    pub fn from_grid(rows: &[&[u8]]) -> Result<Self, LevelError> {
        let mut bricks = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let color = BrickColor::from_index(cell - 1)
                    .ok_or(LevelError::UnknownColor { value: cell })?;
                bricks.push(BrickSpec {
                    x: j as f32 * BRICK_WIDTH,
                    y: i as f32 * BRICK_HEIGHT,
                    color,
                    shield: 0,
                    breakable: true,
                    power: 0,
                    size: BrickSize::Full,
                });
            }
        }
        Ok(Self { bricks })
    }

    /// Parse an ordered list of boards from the JSON content feed
    pub fn from_json(json: &str) -> Result<Vec<Self>, LevelError> {
        serde_json::from_str(json).map_err(|e| LevelError::Json(e.to_string()))
    }
}

fn power_from_tag(tag: u8) -> Option<PowerUp> {
    match tag {
        0 => Some(PowerUp::None),
        1 => Some(PowerUp::Slow),
        2 => Some(PowerUp::Fast),
        3 => Some(PowerUp::Expand),
        4 => Some(PowerUp::Contract),
        _ => None,
    }
}

/// One screen of play: the live brick set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Authored position in the level sequence (0-based)
    pub index: u32,
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Instantiate live bricks from descriptors, validating every field
    pub fn build(index: u32, data: &LevelData) -> Result<Self, LevelError> {
        if data.bricks.is_empty() {
            return Err(LevelError::EmptyLevel { level: index });
        }

        let mut bricks = Vec::with_capacity(data.bricks.len());
        for spec in &data.bricks {
            if spec.shield > MAX_SHIELD_TIER {
                return Err(LevelError::ShieldTier {
                    level: index,
                    tier: spec.shield,
                });
            }
            let power = power_from_tag(spec.power).ok_or(LevelError::PowerTag {
                level: index,
                tag: spec.power,
            })?;
            bricks.push(Brick {
                body: Tracked::new(Rect::new(
                    spec.x,
                    spec.y,
                    spec.size.width(),
                    BRICK_HEIGHT,
                )),
                color: spec.color,
                breakable: spec.breakable,
                shield: spec.shield,
                power,
                power_spent: false,
                half: spec.size == BrickSize::Half,
            });
        }

        let level = Self { index, bricks };
        if level.breakable_remaining() == 0 {
            log::warn!("level {index} has no breakable bricks and will clear instantly");
        }
        Ok(level)
    }

    /// Number of live breakable bricks - zero means the board is cleared
    pub fn breakable_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.breakable).count()
    }
}

/// Ordered queue of boards; the head is always the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelQueue {
    levels: VecDeque<Level>,
}

impl LevelQueue {
    pub fn from_levels(levels: Vec<Level>) -> Self {
        Self {
            levels: levels.into(),
        }
    }

    /// The current level, or `None` once the queue is drained. Callers
    /// branch on `None` to distinguish "next level" from "all levels won".
    pub fn current(&self) -> Option<&Level> {
        self.levels.front()
    }

    pub fn current_mut(&mut self) -> Option<&mut Level> {
        self.levels.front_mut()
    }

    /// Pop the head unconditionally; emptiness is the caller's problem
    pub fn advance(&mut self) -> Option<Level> {
        self.levels.pop_front()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// The built-in boards: the original's authored layout plus a second board
/// that exercises shields, power bricks and permanent obstacles.
pub fn builtin_levels() -> Vec<LevelData> {
    // Board one, row by row (palette indices, 0 = empty)
    const BOARD_ONE: [&[u8]; 10] = [
        &[4, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 10, 10, 10, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 4],
        &[0, 4, 0, 0, 0, 10, 0, 3, 0, 0, 0, 10, 10, 10, 0, 0, 0, 3, 0, 10, 0, 0, 0, 4, 0],
        &[0, 0, 4, 0, 10, 0, 0, 13, 3, 0, 0, 10, 10, 10, 0, 0, 3, 13, 0, 0, 10, 0, 4, 0, 0],
        &[0, 0, 0, 10, 0, 0, 0, 13, 0, 6, 6, 6, 6, 6, 6, 6, 0, 13, 0, 0, 0, 10, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 0, 6, 6, 0, 0, 0, 6, 6, 0, 13, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 0, 6, 6, 0, 1, 0, 6, 6, 0, 13, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 0, 6, 6, 0, 0, 0, 6, 6, 0, 13, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 0, 6, 6, 6, 6, 6, 6, 6, 0, 13, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 0, 0, 0, 0, 0, 0, 0],
    ];

    let board_one = LevelData::from_grid(&BOARD_ONE).expect("static board data is valid");

    // Board two: shielded top row, power bricks mid-field, unbreakable
    // posts at the outer columns.
    let mut bricks = Vec::new();
    for j in 0..25u32 {
        let x = j as f32 * BRICK_WIDTH;
        let edge = j == 0 || j == 24;
        bricks.push(BrickSpec {
            x,
            y: BRICK_HEIGHT,
            color: if edge { BrickColor::White } else { BrickColor::Berry },
            shield: if edge { 0 } else { 2 },
            breakable: !edge,
            power: 0,
            size: BrickSize::Full,
        });
        bricks.push(BrickSpec {
            x,
            y: BRICK_HEIGHT * 3.0,
            color: BrickColor::Sapphire,
            shield: if j % 5 == 0 { 1 } else { 0 },
            breakable: true,
            // Sprinkle each power tag across the row
            power: match j % 6 {
                1 => 1, // slow
                2 => 2, // fast
                4 => 3, // expand
                5 => 4, // contract
                _ => 0,
            },
            size: BrickSize::Full,
        });
        if j % 2 == 0 {
            bricks.push(BrickSpec {
                x,
                y: BRICK_HEIGHT * 5.0,
                color: BrickColor::Olive,
                shield: 0,
                breakable: true,
                power: 0,
                size: BrickSize::Half,
            });
        }
    }

    vec![board_one, LevelData::new(bricks)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(shield: u8, power: u8) -> BrickSpec {
        BrickSpec {
            x: 0.0,
            y: 0.0,
            color: BrickColor::Green,
            shield,
            breakable: true,
            power,
            size: BrickSize::Full,
        }
    }

    #[test]
    fn test_build_rejects_bad_shield_tier() {
        let data = LevelData::new(vec![spec(4, 0)]);
        assert_eq!(
            Level::build(0, &data),
            Err(LevelError::ShieldTier { level: 0, tier: 4 })
        );
    }

    #[test]
    fn test_build_rejects_bad_power_tag() {
        let data = LevelData::new(vec![spec(0, 9)]);
        assert_eq!(
            Level::build(2, &data),
            Err(LevelError::PowerTag { level: 2, tag: 9 })
        );
    }

    #[test]
    fn test_build_rejects_empty_board() {
        let data = LevelData::new(vec![]);
        assert_eq!(
            Level::build(1, &data),
            Err(LevelError::EmptyLevel { level: 1 })
        );
    }

    #[test]
    fn test_build_maps_power_tags() {
        let data = LevelData::new(vec![spec(0, 3)]);
        let level = Level::build(0, &data).unwrap();
        assert_eq!(level.bricks[0].power, PowerUp::Expand);
    }

    #[test]
    fn test_half_brick_width() {
        let mut half = spec(0, 0);
        half.size = BrickSize::Half;
        let level = Level::build(0, &LevelData::new(vec![half])).unwrap();
        assert_eq!(level.bricks[0].body.rect().size.x, BRICK_WIDTH / 2.0);
        assert!(level.bricks[0].half);
    }

    #[test]
    fn test_from_grid_places_bricks_on_cell_boundaries() {
        let data = LevelData::from_grid(&[&[0, 1, 0], &[0, 0, 6]]).unwrap();
        assert_eq!(data.bricks.len(), 2);
        assert_eq!(data.bricks[0].x, BRICK_WIDTH);
        assert_eq!(data.bricks[0].y, 0.0);
        assert_eq!(data.bricks[0].color, BrickColor::Red);
        assert_eq!(data.bricks[1].x, 2.0 * BRICK_WIDTH);
        assert_eq!(data.bricks[1].y, BRICK_HEIGHT);
        assert_eq!(data.bricks[1].color, BrickColor::Blue);
    }

    #[test]
    fn test_from_grid_rejects_unknown_color() {
        assert_eq!(
            LevelData::from_grid(&[&[16]]),
            Err(LevelError::UnknownColor { value: 16 })
        );
    }

    #[test]
    fn test_from_json_feed() {
        let json = r#"[{"bricks": [
            {"x": 50.0, "y": 30.0, "color": "sapphire", "shieldTier": 2,
             "powerTag": 3, "sizeVariant": "half"},
            {"x": 100.0, "y": 30.0, "color": "white", "breakable": false}
        ]}]"#;
        let boards = LevelData::from_json(json).unwrap();
        assert_eq!(boards.len(), 1);
        let level = Level::build(0, &boards[0]).unwrap();
        assert_eq!(level.bricks[0].shield, 2);
        assert_eq!(level.bricks[0].power, PowerUp::Expand);
        assert!(level.bricks[0].half);
        assert!(!level.bricks[1].breakable);
        // Omitted fields take their defaults
        assert_eq!(level.bricks[1].shield, 0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            LevelData::from_json("not json"),
            Err(LevelError::Json(_))
        ));
    }

    #[test]
    fn test_queue_sentinel_and_advance() {
        let data = LevelData::new(vec![spec(0, 0)]);
        let levels = vec![
            Level::build(0, &data).unwrap(),
            Level::build(1, &data).unwrap(),
        ];
        let mut queue = LevelQueue::from_levels(levels);
        assert_eq!(queue.current().unwrap().index, 0);

        queue.advance();
        assert_eq!(queue.current().unwrap().index, 1);

        queue.advance();
        assert!(queue.current().is_none());
    }

    #[test]
    fn test_builtin_levels_parse_clean() {
        let boards = builtin_levels();
        assert!(boards.len() >= 2);
        for (i, board) in boards.iter().enumerate() {
            let level = Level::build(i as u32, board).unwrap();
            assert!(level.breakable_remaining() > 0);
        }
    }
}
