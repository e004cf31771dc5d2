//! The player's ship: movement, the power-driven fire table, bombs and the
//! post-hit grace period.

use std::f32::consts::FRAC_PI_2;

use crate::bullet::{self, Bullet};
use crate::collision::Shape;
use crate::config::Balance;
use crate::context::Playfield;
use crate::entities::{Rect, Vec2};
use crate::input::FrameInput;
use crate::render::{palette, Surface};

pub const MIN_POWER: u8 = 1;
pub const MAX_POWER: u8 = 5;
pub const PLAYER_SIZE: f32 = 8.0;
pub const HITBOX_RADIUS: f32 = 2.0;

/// One muzzle of the fire table: offset from the ship's top-center and
/// heading (radians, π/2 is straight up).
#[derive(Clone, Copy, Debug)]
struct Muzzle {
    dx: f32,
    dy: f32,
    angle: f32,
}

const fn muzzle(dx: f32, dy: f32, angle: f32) -> Muzzle {
    Muzzle { dx, dy, angle }
}

const UP: f32 = FRAC_PI_2;

const FIRE_TABLE: [&[Muzzle]; MAX_POWER as usize] = [
    &[muzzle(0.0, 0.0, UP)],
    &[muzzle(-3.0, 0.0, UP), muzzle(3.0, 0.0, UP)],
    &[muzzle(0.0, 0.0, UP), muzzle(-4.0, 2.0, UP), muzzle(4.0, 2.0, UP)],
    &[
        muzzle(0.0, 0.0, UP),
        muzzle(-4.0, 2.0, UP),
        muzzle(4.0, 2.0, UP),
        muzzle(-6.0, 4.0, UP + 0.2),
        muzzle(6.0, 4.0, UP - 0.2),
    ],
    &[
        muzzle(0.0, 0.0, UP),
        muzzle(-4.0, 2.0, UP),
        muzzle(4.0, 2.0, UP),
        muzzle(-6.0, 4.0, UP + 0.2),
        muzzle(6.0, 4.0, UP - 0.2),
        muzzle(-8.0, 6.0, UP + 0.4),
        muzzle(8.0, 6.0, UP - 0.4),
    ],
];

/// The slice of [`Balance`] the ship needs between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    pub speed: f32,
    pub focus_factor: f32,
    pub bullet_speed: f32,
    pub shot_cooldown: u32,
    pub hit_invincibility: u32,
    pub bomb_invincibility: u32,
}

impl From<&Balance> for PlayerTuning {
    fn from(b: &Balance) -> Self {
        Self {
            speed: b.player_speed,
            focus_factor: b.focus_factor,
            bullet_speed: b.player_bullet_speed,
            shot_cooldown: b.shot_cooldown,
            hit_invincibility: b.hit_invincibility,
            bomb_invincibility: b.bomb_invincibility,
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from(&Balance::default())
    }
}

/// What happened during one `Player::update`, for the orchestrator to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub fired: bool,
    pub bombed: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Top-left corner of the sprite.
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub bullets: Vec<Bullet>,
    pub power: u8,
    pub lives: u32,
    /// Frames of post-hit (or post-bomb) grace remaining.
    pub invincible: u32,
    pub bombs: u32,
    pub shot_cooldown: u32,
    /// Satellite positions, recomputed from `power` every frame.
    pub options: Vec<Vec2>,
    pub focusing: bool,
    pub hitbox_radius: f32,
    pub tuning: PlayerTuning,
}

impl Player {
    pub fn new(balance: &Balance) -> Self {
        let field = Playfield::from_balance(balance);
        let mut player = Self {
            pos: Vec2::new((field.width / 2.0).floor(), field.height - 30.0),
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            bullets: Vec::new(),
            power: MIN_POWER,
            lives: balance.starting_lives,
            invincible: 0,
            bombs: balance.starting_bombs,
            shot_cooldown: 0,
            options: Vec::new(),
            focusing: false,
            hitbox_radius: HITBOX_RADIUS,
            tuning: PlayerTuning::from(balance),
        };
        player.update_options();
        player
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    /// The small fairness hitbox used against bullets and obstacles.
    pub fn hitbox(&self) -> Shape {
        Shape::Circle {
            center: self.center(),
            radius: self.hitbox_radius,
        }
    }

    /// The full sprite rectangle, used for item pickup.
    pub fn body(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn update(&mut self, input: &FrameInput, field: &Playfield) -> PlayerUpdate {
        let mut outcome = PlayerUpdate::default();

        self.focusing = input.focus;
        let speed = if self.focusing {
            self.tuning.speed * self.tuning.focus_factor
        } else {
            self.tuning.speed
        };
        let moved = self.pos + input.motion * speed;
        self.pos = field.clamp_box(moved, self.width, self.height);

        self.shot_cooldown = self.shot_cooldown.saturating_sub(1);
        if input.fire && self.shot_cooldown == 0 {
            self.shoot();
            self.shot_cooldown = self.tuning.shot_cooldown;
            outcome.fired = true;
        }

        if input.bomb {
            outcome.bombed = self.use_bomb();
        }

        bullet::advance_all(&mut self.bullets, field);
        self.update_options();
        self.invincible = self.invincible.saturating_sub(1);

        outcome
    }

    /// Append one volley from the fire table row for the current power.
    pub fn shoot(&mut self) {
        let row = usize::from(self.power.clamp(MIN_POWER, MAX_POWER) - 1);
        let origin_x = self.pos.x + self.width / 2.0;
        for m in FIRE_TABLE[row] {
            let pos = Vec2::new(origin_x + m.dx, self.pos.y + m.dy);
            self.bullets
                .push(Bullet::player(pos, m.angle, self.tuning.bullet_speed));
        }
    }

    /// Spend a bomb for a long grace period. Clearing enemy bullets is up to
    /// the caller. Returns `false` when no bombs are left.
    pub fn use_bomb(&mut self) -> bool {
        if self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        self.invincible = self.tuning.bomb_invincibility;
        tracing::debug!(bombs_left = self.bombs, "bomb used");
        true
    }

    pub fn update_options(&mut self) {
        self.options.clear();
        if self.power >= 3 {
            self.options.push(Vec2::new(self.pos.x - 12.0, self.pos.y + 8.0));
        }
        if self.power >= MAX_POWER {
            self.options.push(Vec2::new(self.pos.x + 12.0, self.pos.y + 8.0));
        }
    }

    /// Take a hit. A no-op while invincible; otherwise costs a life and a
    /// power level and starts the grace period. Returns whether a life was
    /// lost.
    pub fn get_hit(&mut self) -> bool {
        if self.invincible > 0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.power = self.power.saturating_sub(1).max(MIN_POWER);
        self.invincible = self.tuning.hit_invincibility;
        true
    }

    pub fn power_up(&mut self) {
        self.power = (self.power + 1).min(MAX_POWER);
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    pub fn add_bomb(&mut self) {
        self.bombs += 1;
    }

    pub fn draw(&self, s: &mut impl Surface, frame: u64) {
        // blink while invincible
        if self.invincible == 0 || frame % 4 < 2 {
            s.blt(
                self.pos.x,
                self.pos.y,
                0,
                0.0,
                0.0,
                self.width,
                self.height,
                Some(palette::BLACK),
            );
            if self.focusing {
                let c = self.center();
                s.circ(c.x, c.y, self.hitbox_radius, palette::RED);
            }
            for opt in &self.options {
                s.blt(opt.x, opt.y, 0, 8.0, 0.0, 6.0, 6.0, Some(palette::BLACK));
            }
        }
        for b in &self.bullets {
            b.draw(s);
        }
    }
}
