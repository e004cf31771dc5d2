use std::f32::consts::TAU;

use rand::Rng;

use crate::config::Balance;
use crate::context::Playfield;
use crate::entities::{ItemKind, Rect, Vec2};
use crate::player::Player;
use crate::render::{palette, Surface};

pub const ITEM_SIZE: f32 = 8.0;
pub const BASE_FALL_SPEED: f32 = 1.0;
/// Fall speed multiplier once homing.
pub const HOMING_BOOST: f32 = 3.0;
/// Largest horizontal correction per frame while homing.
pub const HOMING_STEER: f32 = 1.5;

impl ItemKind {
    /// Weighted draw: 70% power, 20% bomb, 10% life.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let r: f64 = rng.gen();
        if r < 0.7 {
            ItemKind::Power
        } else if r < 0.9 {
            ItemKind::Bomb
        } else {
            ItemKind::Life
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    /// Top-left corner.
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub speed: f32,
    pub kind: ItemKind,
    pub sin_offset: f32,
    /// Frames since spawn.
    pub age: u32,
    pub homing_delay: u32,
    pub is_homing: bool,
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: ItemKind, sin_offset: f32, homing_delay: u32) -> Self {
        Self {
            pos,
            width: ITEM_SIZE,
            height: ITEM_SIZE,
            base_speed: BASE_FALL_SPEED,
            speed: BASE_FALL_SPEED,
            kind,
            sin_offset,
            age: 0,
            homing_delay,
            is_homing: false,
            active: true,
        }
    }

    /// A random item just above the top edge.
    pub fn spawn<R: Rng>(field: &Playfield, homing_delay: u32, rng: &mut R) -> Self {
        let max_x = (field.width - ITEM_SIZE).max(0.0);
        let x = rng.gen_range(0.0..=max_x).floor();
        let kind = ItemKind::roll(rng);
        Self::new(Vec2::new(x, -ITEM_SIZE), kind, rng.gen_range(0.0..TAU), homing_delay)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Advance one frame toward `target` (the player's center). Returns
    /// `true` once the item has left the playfield.
    pub fn update(&mut self, target: Vec2, frame: u64, field: &Playfield) -> bool {
        self.age += 1;
        if !self.is_homing && self.age >= self.homing_delay {
            self.is_homing = true;
        }

        if self.is_homing {
            self.speed = self.base_speed * HOMING_BOOST;
            self.pos.y += self.speed;
            let dx = target.x - self.rect().center().x;
            self.pos.x += dx.clamp(-HOMING_STEER, HOMING_STEER);
        } else {
            self.pos.y += self.speed;
            self.pos.x += (frame as f32 / 15.0 + self.sin_offset).sin() * 0.5;
        }

        self.pos.x < -self.width
            || self.pos.x > field.width + self.width
            || self.pos.y > field.height + self.height
    }

    /// Grant the item to the player. Returns the score it is worth.
    pub fn apply_effect(&self, player: &mut Player, balance: &Balance) -> u32 {
        match self.kind {
            ItemKind::Power => {
                player.power_up();
                balance.power_score
            }
            ItemKind::Bomb => {
                player.add_bomb();
                balance.bomb_score
            }
            ItemKind::Life => {
                player.add_life();
                balance.life_score
            }
        }
    }

    pub fn draw(&self, s: &mut impl Surface, frame: u64) {
        let (x, y, w, h) = (self.pos.x, self.pos.y, self.width, self.height);
        let (fill, label, ink) = match self.kind {
            ItemKind::Power => (palette::PINK, "P", palette::BLACK),
            ItemKind::Life => (palette::RED, "L", palette::WHITE),
            ItemKind::Bomb => (palette::CYAN, "B", palette::WHITE),
        };
        s.rect(x, y, w, h, fill);
        s.text(x + 2.0, y + 2.0, label, ink);

        if self.is_homing && frame % 4 < 2 {
            let col = if frame % 8 < 4 { palette::WHITE } else { palette::YELLOW };
            s.rectb(x - 1.0, y - 1.0, w + 2.0, h + 2.0, col);
        }
    }
}
