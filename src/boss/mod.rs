//! The boss: phase state machine, spell-card sub-state, movement and attack
//! cadence.
//!
//! Phases only move forward (1 → 2 → 3) on HP thresholds. Each transition
//! clears the screen of boss bullets and declares the spell card of the new
//! phase. While a card is active it alone decides what is fired and it soaks
//! up all damage.

pub mod patterns;
pub mod spell_card;

use std::f32::consts::PI;

use rand::Rng;

use crate::bullet::{self, Bullet};
use crate::collision::Shape;
use crate::config::Balance;
use crate::context::SimContext;
use crate::entities::{BulletKind, Rect, Vec2};
use crate::render::{palette, Surface};

pub use spell_card::{SpellCard, SpellCardSlot, SpellEnd};

pub const BOSS_SIZE: f32 = 32.0;
pub const HOME_Y: f32 = 40.0;
/// Frames between normal-pattern rotations.
pub const PATTERN_PERIOD: u32 = 180;
/// The movement timer wraps after this many frames (20 s at 60 FPS).
pub const MOVE_PERIOD: u32 = 1200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    One,
    Two,
    Three,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
            Phase::Three => 3,
        }
    }

    /// Frames between normal-pattern volleys.
    pub fn fire_period(self) -> u64 {
        match self {
            Phase::One => 20,
            Phase::Two => 15,
            Phase::Three => 10,
        }
    }

    pub fn fan_count(self) -> usize {
        match self {
            Phase::One => 5,
            Phase::Two => 7,
            Phase::Three => 9,
        }
    }

    pub fn aim_speed_factor(self) -> f32 {
        match self {
            Phase::One => 1.0,
            Phase::Two => 1.2,
            Phase::Three => 1.5,
        }
    }

    pub fn burst_count(self) -> usize {
        match self {
            Phase::One => 3,
            Phase::Two => 5,
            Phase::Three => 7,
        }
    }

    /// HP gauge and body color.
    pub fn color(self) -> u8 {
        match self {
            Phase::One => palette::RED,
            Phase::Two => palette::ORANGE,
            Phase::Three => palette::YELLOW,
        }
    }
}

/// The normal-attack pattern currently selected by the pattern timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Fan,
    Aimed,
    Burst,
}

impl Pattern {
    pub fn from_index(index: u8) -> Self {
        match index % 3 {
            0 => Pattern::Fan,
            1 => Pattern::Aimed,
            _ => Pattern::Burst,
        }
    }
}

/// Notable transitions from one `Boss::update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BossUpdate {
    pub phase_changed: Option<Phase>,
    pub spell_ended: Option<(SpellCardSlot, SpellEnd)>,
}

#[derive(Clone, Debug)]
pub struct Boss {
    /// Top-left corner.
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub phase: Phase,
    /// Index of the normal pattern, cycling 0..3.
    pub pattern: u8,
    pub pattern_timer: u32,
    pub move_timer: u32,
    pub bullets: Vec<Bullet>,
    pub spell_cards: [SpellCard; 3],
    pub active_spell: Option<SpellCardSlot>,
    /// Frames during which the boss holds fire.
    pub attack_cooldown: u32,
    pub bullet_speed: f32,
    home_x: f32,
}

impl Boss {
    pub fn new(balance: &Balance) -> Self {
        let home_x = (balance.width / 2.0).floor() - BOSS_SIZE / 2.0;
        let cards = SpellCardSlot::ALL.map(|slot| {
            SpellCard::new(slot, balance.spell_card_hp[slot.index()], balance.spell_card_duration)
        });
        Self {
            pos: Vec2::new(home_x, HOME_Y),
            width: BOSS_SIZE,
            height: BOSS_SIZE,
            hp: balance.boss_hp,
            max_hp: balance.boss_hp,
            phase: Phase::One,
            pattern: 0,
            pattern_timer: 0,
            move_timer: 0,
            bullets: Vec::new(),
            spell_cards: cards,
            active_spell: None,
            attack_cooldown: 0,
            bullet_speed: balance.enemy_bullet_speed,
            home_x,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn shape(&self) -> Shape {
        Shape::Rect(self.rect())
    }

    pub fn is_spell_card_active(&self) -> bool {
        self.active_spell.is_some()
    }

    pub fn current_spell(&self) -> Option<&SpellCard> {
        self.active_spell.map(|slot| &self.spell_cards[slot.index()])
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Advance one frame. `target` is the player's center, read for aiming.
    pub fn update<R: Rng>(&mut self, target: Vec2, ctx: &mut SimContext<'_, R>) -> BossUpdate {
        let mut outcome = BossUpdate::default();

        self.update_movement();
        outcome.phase_changed = self.check_phase_transition();
        outcome.spell_ended = self.update_spell_card();
        self.update_attack(target, ctx);
        bullet::advance_all(&mut self.bullets, &ctx.playfield);

        outcome
    }

    pub fn update_movement(&mut self) {
        self.move_timer += 1;
        let t = self.move_timer as f32;
        match self.phase {
            Phase::One => {
                self.pos.x = self.home_x + (t / 60.0).sin() * 40.0;
            }
            Phase::Two => {
                self.pos.x = self.home_x + (t / 40.0).sin() * 60.0;
                if self.move_timer > 400 && self.move_timer < 600 {
                    self.pos.y = HOME_Y + (t / 30.0).sin() * 20.0;
                }
            }
            Phase::Three => {
                self.pos.x = self.home_x + (t / 30.0).sin() * 70.0;
                self.pos.y = HOME_Y + (t / 20.0).sin() * 30.0;
            }
        }
        if self.move_timer > MOVE_PERIOD {
            self.move_timer = 0;
        }
    }

    /// Move to the next phase once HP drops below its threshold. Returns the
    /// new phase on a transition.
    pub fn check_phase_transition(&mut self) -> Option<Phase> {
        let hp = self.hp as f32;
        let max = self.max_hp as f32;
        let (next, slot) = match self.phase {
            Phase::One if hp < max * 0.6 => (Phase::Two, SpellCardSlot::ButterflyStorm),
            Phase::Two if hp < max * 0.3 => (Phase::Three, SpellCardSlot::RedMagic),
            _ => return None,
        };
        self.phase = next;
        tracing::info!(phase = next.number(), hp = self.hp, "boss phase transition");
        self.declare_spell(slot);
        Some(next)
    }

    /// Make `slot` the active spell card and wipe the boss's bullets.
    pub fn declare_spell(&mut self, slot: SpellCardSlot) {
        self.active_spell = Some(slot);
        self.bullets.clear();
        tracing::info!(spell = %slot, "spell card declared");
    }

    fn update_spell_card(&mut self) -> Option<(SpellCardSlot, SpellEnd)> {
        let slot = self.active_spell?;
        let end = self.spell_cards[slot.index()].tick()?;
        self.active_spell = None;
        tracing::info!(spell = %slot, reason = ?end, "spell card ended");
        Some((slot, end))
    }

    fn update_attack<R: Rng>(&mut self, target: Vec2, ctx: &mut SimContext<'_, R>) {
        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
            return;
        }

        self.pattern_timer += 1;
        if self.pattern_timer > PATTERN_PERIOD {
            self.pattern = (self.pattern + 1) % 3;
            self.pattern_timer = 0;
        }

        if let Some(slot) = self.active_spell {
            self.fire_spell(slot, target, ctx.frame);
            return;
        }

        if !ctx.every(self.phase.fire_period()) {
            return;
        }
        self.fire_pattern(Pattern::from_index(self.pattern), target, ctx);
        let origin = self.center();
        let speed = self.bullet_speed;
        match self.phase {
            Phase::One => {}
            Phase::Two => {
                if ctx.every(45) {
                    self.bullets
                        .extend(patterns::circle(origin, 8, speed, BulletKind::Purple));
                }
            }
            Phase::Three => {
                if ctx.every(30) {
                    self.bullets
                        .extend(patterns::circle(origin, 12, speed, BulletKind::Purple));
                }
                if ctx.every(90) {
                    self.bullets
                        .extend(patterns::spiral(origin, 20, 2, ctx.frame, speed));
                }
            }
        }
    }

    /// Fire one volley of a normal pattern.
    pub fn fire_pattern<R: Rng>(
        &mut self,
        pattern: Pattern,
        target: Vec2,
        ctx: &mut SimContext<'_, R>,
    ) {
        let origin = self.center();
        let speed = self.bullet_speed;
        let volley = match pattern {
            Pattern::Fan => patterns::fan(
                Vec2::new(origin.x, origin.y + self.height / 2.0),
                self.phase.fan_count(),
                PI / 2.0,
                patterns::DOWN,
                speed,
                BulletKind::Red,
            ),
            Pattern::Aimed => patterns::aimed(
                origin,
                target,
                &[-0.2, 0.0, 0.2],
                speed * self.phase.aim_speed_factor(),
                BulletKind::GreenLarge,
            ),
            Pattern::Burst => patterns::random_burst(
                origin,
                self.phase.burst_count(),
                1.0,
                speed,
                BulletKind::Blue,
                &mut *ctx.rng,
            ),
        };
        self.bullets.extend(volley);
    }

    fn fire_spell(&mut self, slot: SpellCardSlot, target: Vec2, frame: u64) {
        let origin = self.center();
        let speed = self.bullet_speed;
        match slot {
            SpellCardSlot::ScarletLaser => {
                if frame % 30 == 0 {
                    self.bullets.extend(patterns::fan(
                        origin,
                        10,
                        PI / 3.0,
                        patterns::DOWN,
                        speed * 1.2,
                        BulletKind::Red,
                    ));
                }
                if frame % 60 == 0 {
                    self.bullets.extend(patterns::aimed_ring(
                        origin,
                        target,
                        5,
                        5.0,
                        speed,
                        BulletKind::GreenLarge,
                    ));
                }
            }
            SpellCardSlot::ButterflyStorm => {
                if frame % 20 == 0 {
                    self.bullets
                        .extend(patterns::butterfly(origin, 15, 15.0, speed * 0.8));
                }
            }
            SpellCardSlot::RedMagic => {
                if frame % 15 == 0 {
                    self.bullets
                        .extend(patterns::complex_circle(origin, 20, 0.1, frame, speed));
                }
            }
        }
    }

    /// Apply damage: to the active spell card's pool if there is one (ending
    /// the card once it is drained), otherwise to the boss. Returns `true`
    /// when the boss is out of HP.
    pub fn get_hit(&mut self, damage: i32) -> bool {
        match self.active_spell {
            Some(slot) => {
                if self.spell_cards[slot.index()].get_hit(damage) {
                    self.active_spell = None;
                    tracing::info!(spell = %slot, reason = ?SpellEnd::Broken, "spell card ended");
                }
            }
            None => self.hp -= damage,
        }
        self.is_defeated()
    }

    pub fn draw(&self, s: &mut impl Surface) {
        let (x, y, w, h) = (self.pos.x, self.pos.y, self.width, self.height);
        let color = self.phase.color();

        s.rect(x, y, w, h, color);
        s.rect(x + 5.0, y + 8.0, 5.0, 5.0, palette::WHITE);
        s.rect(x + w - 10.0, y + 8.0, 5.0, 5.0, palette::WHITE);
        // wings
        s.tri(x, y + h / 2.0, x - 10.0, y + h / 3.0, x - 5.0, y + h / 2.0 + 10.0, color);
        s.tri(
            x + w,
            y + h / 2.0,
            x + w + 10.0,
            y + h / 3.0,
            x + w + 5.0,
            y + h / 2.0 + 10.0,
            color,
        );

        self.draw_gauges(s);

        for b in &self.bullets {
            b.draw(s);
        }
    }

    fn draw_gauges(&self, s: &mut impl Surface) {
        let full = s.width() - 20.0;
        let ratio = self.hp.max(0) as f32 / self.max_hp.max(1) as f32;
        s.rect(10.0, 10.0, full, 5.0, palette::NAVY);
        s.rect(10.0, 10.0, (ratio * full).floor(), 5.0, self.phase.color());

        if let Some(card) = self.current_spell() {
            s.rect(10.0, 15.0, (card.hp_ratio() * full).floor(), 3.0, palette::LIME);

            let name = card.name();
            let name_x = s.width() / 2.0 - name.chars().count() as f32 * 2.0;
            s.text(name_x, 20.0, name, palette::WHITE);

            let timer_full = s.width() - 40.0;
            s.rect(20.0, 30.0, timer_full, 2.0, palette::NAVY);
            s.rect(20.0, 30.0, (card.time_ratio() * timer_full).floor(), 2.0, palette::LIME);
        }
    }
}
