use std::f32::consts::FRAC_PI_2;

use crate::collision::Shape;
use crate::context::Playfield;
use crate::entities::{BulletKind, BulletOwner, Vec2};
use crate::render::{palette, Surface};

/// Player shots are drawn as 2×6 bars and leave play once fully off screen.
pub const SHOT_WIDTH: f32 = 2.0;
pub const SHOT_HEIGHT: f32 = 6.0;
/// Boss bullets may stray this far past the edge before they are dropped.
pub const BOSS_BULLET_MARGIN: f32 = 10.0;
pub const BOSS_BULLET_RADIUS: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Draw radius.
    pub radius: f32,
    pub hitbox_radius: f32,
    pub kind: BulletKind,
    pub owner: BulletOwner,
    /// Cleared when the bullet is consumed by a collision; inactive bullets
    /// are compacted out at the end of the collision pass.
    pub active: bool,
}

impl Bullet {
    /// A player shot heading along `angle`, measured counter-clockwise from
    /// +x with straight up at π/2.
    pub fn player(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos() * speed, -angle.sin() * speed),
            radius: SHOT_WIDTH / 2.0,
            hitbox_radius: 0.0,
            kind: BulletKind::Shot,
            owner: BulletOwner::Player,
            active: true,
        }
    }

    /// A straight-up player shot.
    pub fn player_forward(pos: Vec2, speed: f32) -> Self {
        Self::player(pos, FRAC_PI_2, speed)
    }

    pub fn boss(pos: Vec2, vel: Vec2, kind: BulletKind) -> Self {
        Self {
            pos,
            vel,
            radius: BOSS_BULLET_RADIUS,
            hitbox_radius: BOSS_BULLET_RADIUS,
            kind,
            owner: BulletOwner::Boss,
            active: true,
        }
    }

    pub fn margin(&self) -> Vec2 {
        match self.owner {
            BulletOwner::Player => Vec2::new(SHOT_WIDTH, SHOT_HEIGHT),
            BulletOwner::Boss => Vec2::new(BOSS_BULLET_MARGIN, BOSS_BULLET_MARGIN),
        }
    }

    /// Advance one frame. Returns `true` once the bullet has left the
    /// playfield (grown by its margin) and should be dropped.
    pub fn update(&mut self, field: &Playfield) -> bool {
        self.pos += self.vel;
        field.is_outside(self.pos, self.margin())
    }

    /// Player shots are fast and thin, so they test as a point; boss bullets
    /// carry a round hitbox.
    pub fn shape(&self) -> Shape {
        match self.owner {
            BulletOwner::Player => Shape::Point(self.pos),
            BulletOwner::Boss => Shape::Circle {
                center: self.pos,
                radius: self.hitbox_radius,
            },
        }
    }

    pub fn draw(&self, s: &mut impl Surface) {
        let (x, y, r) = (self.pos.x, self.pos.y, self.radius);
        match self.kind {
            BulletKind::Shot => {
                s.rect(x - SHOT_WIDTH / 2.0, y, SHOT_WIDTH, SHOT_HEIGHT, palette::WHITE)
            }
            BulletKind::Red => s.circ(x, y, r, palette::RED),
            BulletKind::GreenLarge => s.circ(x, y, r + 1.0, palette::ORANGE),
            BulletKind::Blue => s.circ(x, y, r, palette::YELLOW),
            BulletKind::Purple => s.circ(x, y, r, palette::LIME),
            BulletKind::Star => {
                s.circ(x, y, r, palette::PINK);
                s.pset(x, y, palette::WHITE);
            }
        }
    }
}

/// Move every bullet and drop the ones that left play.
pub fn advance_all(bullets: &mut Vec<Bullet>, field: &Playfield) {
    bullets.retain_mut(|b| !b.update(field));
}

/// Drop bullets consumed during a collision pass.
pub fn compact(bullets: &mut Vec<Bullet>) {
    bullets.retain(|b| b.active);
}
