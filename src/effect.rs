//! Purely cosmetic bursts. Effects never take part in collisions.

use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::context::Playfield;
use crate::entities::Vec2;
use crate::render::{palette, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Explosion,
    Hit,
    Spawn,
    Bomb,
}

#[derive(Clone, Debug, PartialEq)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    size: f32,
    color: u8,
    lifetime: u32,
    age: u32,
}

impl Particle {
    fn fade(&self) -> f32 {
        1.0 - self.age as f32 / self.lifetime.max(1) as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub pos: Vec2,
    pub kind: EffectKind,
    pub size: f32,
    pub duration: u32,
    pub timer: u32,
    particles: Vec<Particle>,
    /// Current wave radius (bomb).
    wave_radius: f32,
    wave_max: f32,
}

impl Effect {
    fn bare(pos: Vec2, kind: EffectKind, size: f32, duration: u32) -> Self {
        Self {
            pos,
            kind,
            size,
            duration,
            timer: 0,
            particles: Vec::new(),
            wave_radius: 0.0,
            wave_max: 0.0,
        }
    }

    pub fn explosion<R: Rng>(pos: Vec2, size: f32, rng: &mut R) -> Self {
        let mut fx = Self::bare(pos, EffectKind::Explosion, size, 30);
        fx.scatter(
            20,
            (0.5, 2.0),
            (1.0, 3.0),
            (10, 30),
            &[palette::RED, palette::ORANGE, palette::YELLOW],
            rng,
        );
        fx
    }

    pub fn hit<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let mut fx = Self::bare(pos, EffectKind::Hit, 5.0, 15);
        fx.scatter(5, (0.3, 1.0), (0.5, 1.5), (5, 15), &[palette::WHITE], rng);
        fx
    }

    pub fn spawn(pos: Vec2, size: f32) -> Self {
        Self::bare(pos, EffectKind::Spawn, size, 20)
    }

    pub fn bomb<R: Rng>(pos: Vec2, field: &Playfield, rng: &mut R) -> Self {
        let mut fx = Self::bare(pos, EffectKind::Bomb, 0.0, 60);
        fx.wave_max = field.width.max(field.height) * 1.5;
        fx.scatter(
            50,
            (1.0, 4.0),
            (1.0, 4.0),
            (20, 60),
            &[palette::WHITE, palette::LIME, palette::CYAN],
            rng,
        );
        fx
    }

    fn scatter<R: Rng>(
        &mut self,
        count: usize,
        speed: (f32, f32),
        size: (f32, f32),
        lifetime: (u32, u32),
        colors: &[u8],
        rng: &mut R,
    ) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            self.particles.push(Particle {
                pos: self.pos,
                vel: Vec2::from_angle(angle, rng.gen_range(speed.0..=speed.1)),
                size: rng.gen_range(size.0..=size.1),
                color: colors.choose(rng).copied().unwrap_or(palette::WHITE),
                lifetime: rng.gen_range(lifetime.0..=lifetime.1),
                age: 0,
            });
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Advance one frame. Returns `true` once the effect has run its course.
    pub fn update(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= self.duration {
            return true;
        }

        let gravity = if self.kind == EffectKind::Explosion { 0.05 } else { 0.0 };
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += gravity;
            p.age += 1;
        }
        self.particles.retain(|p| p.age < p.lifetime);

        if self.kind == EffectKind::Bomb {
            self.wave_radius += self.wave_max / self.duration as f32 * 2.0;
        }
        false
    }

    pub fn draw(&self, s: &mut impl Surface) {
        match self.kind {
            EffectKind::Explosion | EffectKind::Hit => self.draw_particles(s),
            EffectKind::Spawn => {
                let r = self.size * self.timer as f32 / self.duration as f32;
                if r > 0.0 {
                    s.circb(self.pos.x, self.pos.y, r, palette::WHITE);
                    if r > 2.0 {
                        s.circb(self.pos.x, self.pos.y, r - 2.0, palette::LIME);
                    }
                }
            }
            EffectKind::Bomb => {
                const WAVE: [u8; 4] =
                    [palette::WHITE, palette::LIME, palette::CYAN, palette::LIGHT_BLUE];
                let base = (self.timer / 3) as usize;
                for i in 0..3 {
                    let r = self.wave_radius - i as f32 * 10.0;
                    if r > 0.0 {
                        s.circb(self.pos.x, self.pos.y, r, WAVE[(base + i) % WAVE.len()]);
                    }
                }
                self.draw_particles(s);
            }
        }
    }

    fn draw_particles(&self, s: &mut impl Surface) {
        for p in &self.particles {
            let size = p.size * p.fade();
            if size > 0.0 {
                s.circ(p.pos.x, p.pos.y, size, p.color);
            }
        }
    }
}

/// Advance all effects and drop the finished ones.
pub fn advance_all(effects: &mut Vec<Effect>) {
    effects.retain_mut(|fx| !fx.update());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn effects_expire_after_duration() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut effects = vec![
            Effect::hit(Vec2::new(10.0, 10.0), &mut rng),
            Effect::explosion(Vec2::new(50.0, 50.0), 30.0, &mut rng),
        ];
        assert_eq!(effects[0].particle_count(), 5);
        assert_eq!(effects[1].particle_count(), 20);

        for _ in 0..15 {
            advance_all(&mut effects);
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::Explosion);

        for _ in 0..15 {
            advance_all(&mut effects);
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn bomb_wave_grows() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Playfield::new(240.0, 320.0);
        let mut fx = Effect::bomb(Vec2::new(120.0, 290.0), &field, &mut rng);
        assert_eq!(fx.particle_count(), 50);
        fx.update();
        let first = fx.wave_radius;
        fx.update();
        assert!(fx.wave_radius > first && first > 0.0);
    }
}
