//! Shared game types. Plain data, no simulation logic.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::boss::Boss;
use crate::config::Balance;
use crate::effect::Effect;
use crate::obstacle::Obstacle;
use crate::player::Player;
use crate::power_up::PowerUp;

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` heading along `angle` (radians, screen
    /// coordinates: +y points down).
    pub fn from_angle(angle: f32, speed: f32) -> Self {
        Self {
            x: angle.cos() * speed,
            y: angle.sin() * speed,
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    pub fn angle_to(&self, target: Vec2) -> f32 {
        (target.y - self.y).atan2(target.x - self.x)
    }

    pub fn normalize(&self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

// ── Tags ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Title,
    Playing,
    GameOver,
    Cleared,
}

impl GameStatus {
    /// The match has ended, one way or the other.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Cleared)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Boss,
}

/// Draw style of a bullet. Player shots are always `Shot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Shot,
    Red,
    GreenLarge,
    Blue,
    Purple,
    Star,
}

impl BulletKind {
    /// The four round boss styles, cycled by spiral arms and ring bullets.
    pub fn cycle(index: i64) -> Self {
        match index.rem_euclid(4) {
            0 => BulletKind::Red,
            1 => BulletKind::GreenLarge,
            2 => BulletKind::Blue,
            _ => BulletKind::Purple,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Power,
    Bomb,
    Life,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Falls straight down.
    Straight,
    /// Spins while drifting sideways.
    Rotating,
    /// Swings wall to wall; takes three hits.
    Zigzag,
}

impl ObstacleKind {
    pub fn from_index(index: u8) -> Self {
        match index % 3 {
            0 => ObstacleKind::Straight,
            1 => ObstacleKind::Rotating,
            _ => ObstacleKind::Zigzag,
        }
    }
}

/// Fire-and-forget audio cues. `id()` is the stable integer handed to the
/// audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Fire,
    Explosion,
    PowerUp,
    Bomb,
    Hit,
}

impl SoundCue {
    pub fn id(self) -> u8 {
        match self {
            SoundCue::Fire => 0,
            SoundCue::Explosion => 1,
            SoundCue::PowerUp => 2,
            SoundCue::Bomb => 3,
            SoundCue::Hit => 4,
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state. Cloneable so `compute::tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub boss: Boss,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    /// Cosmetic only; never part of collision checks.
    pub effects: Vec<Effect>,
    pub score: u32,
    /// Best score seen so far, updated live during play.
    pub high_score: u32,
    pub status: GameStatus,
    /// Ticks in every status; drives periodic attacks and animation.
    pub frame: u64,
    /// Ticks spent in `Playing` during this match.
    pub play_frames: u64,
    /// Sound cues raised during the last tick.
    pub cues: Vec<SoundCue>,
    pub balance: Balance,
}
