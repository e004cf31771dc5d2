use std::f32::consts::TAU;

use rand::Rng;

use crate::collision::Shape;
use crate::context::Playfield;
use crate::entities::{ObstacleKind, Rect, Vec2};
use crate::render::{palette, Surface};

pub const OBSTACLE_SIZE: f32 = 20.0;
pub const OBSTACLE_SPEED: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Top-left corner.
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: ObstacleKind,
    /// Spin angle (rotating kind).
    pub angle: f32,
    /// Horizontal swing direction, ±1 (zigzag kind).
    pub direction: f32,
    pub sin_offset: f32,
    pub health: i32,
    pub active: bool,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: f32, speed: f32, kind: ObstacleKind, sin_offset: f32) -> Self {
        Self {
            pos,
            width: size,
            height: size,
            speed,
            kind,
            angle: 0.0,
            direction: 1.0,
            sin_offset,
            health: if kind == ObstacleKind::Zigzag { 3 } else { 1 },
            active: true,
        }
    }

    /// A fresh obstacle just above the top edge at a random column.
    pub fn spawn<R: Rng>(field: &Playfield, rng: &mut R) -> Self {
        let max_x = (field.width - OBSTACLE_SIZE).max(0.0);
        let x = rng.gen_range(0.0..=max_x).floor();
        let kind = ObstacleKind::from_index(rng.gen_range(0..3));
        Self::new(
            Vec2::new(x, -OBSTACLE_SIZE),
            OBSTACLE_SIZE,
            OBSTACLE_SPEED,
            kind,
            rng.gen_range(0.0..TAU),
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn shape(&self) -> Shape {
        Shape::Rect(self.rect())
    }

    /// Advance one frame. Returns `true` once it has fallen past the bottom.
    pub fn update(&mut self, frame: u64, field: &Playfield) -> bool {
        self.pos.y += self.speed;
        match self.kind {
            ObstacleKind::Straight => {}
            ObstacleKind::Rotating => {
                self.angle += 0.1;
                self.pos.x += (self.angle + self.sin_offset).sin() * 0.5;
            }
            ObstacleKind::Zigzag => {
                self.pos.x +=
                    (frame as f32 / 10.0 + self.sin_offset).sin() * 2.0 * self.direction;
                let max_x = field.width - self.width;
                if self.pos.x < 0.0 {
                    self.pos.x = 0.0;
                    self.direction = 1.0;
                } else if self.pos.x > max_x {
                    self.pos.x = max_x;
                    self.direction = -1.0;
                }
            }
        }
        self.pos.y > field.height
    }

    /// Returns `true` when this hit destroyed it.
    pub fn get_hit(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.health <= 0
    }

    pub fn draw(&self, s: &mut impl Surface) {
        let (x, y, w, h) = (self.pos.x, self.pos.y, self.width, self.height);
        match self.kind {
            ObstacleKind::Straight => s.rect(x, y, w, h, palette::DARK_BLUE),
            ObstacleKind::Rotating => {
                let c = self.rect().center();
                let half = w / 2.0;
                s.tri(c.x, c.y - half, c.x + half, c.y, c.x, c.y + half, palette::ORANGE);
                s.tri(c.x, c.y - half, c.x - half, c.y, c.x, c.y + half, palette::ORANGE);
            }
            ObstacleKind::Zigzag => {
                s.rect(x, y, w, h, palette::YELLOW);
                let margin = 2.0;
                let segment = (w - margin * 2.0) / 3.0;
                for i in 0..self.health.max(0) {
                    s.rect(
                        x + margin + segment * i as f32,
                        y + margin,
                        segment,
                        h - margin * 2.0,
                        palette::LIME,
                    );
                }
            }
        }
    }
}
