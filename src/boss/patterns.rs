//! Bullet-pattern generators.
//!
//! Each generator is a pure function of its geometry (and of the frame or RNG
//! where the pattern rotates or scatters). A zero count yields no bullets
//! instead of dividing by zero.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use crate::bullet::Bullet;
use crate::entities::{BulletKind, Vec2};

/// Straight down in screen coordinates.
pub const DOWN: f32 = PI / 2.0;

/// `count` bullets evenly spread across `spread` radians centered on
/// `facing`. A single bullet flies straight along `facing`.
pub fn fan(
    origin: Vec2,
    count: usize,
    spread: f32,
    facing: f32,
    speed: f32,
    kind: BulletKind,
) -> Vec<Bullet> {
    match count {
        0 => Vec::new(),
        1 => vec![Bullet::boss(origin, Vec2::from_angle(facing, speed), kind)],
        _ => (0..count)
            .map(|i| {
                let t = i as f32 / (count - 1) as f32;
                let angle = facing - spread / 2.0 + spread * t;
                Bullet::boss(origin, Vec2::from_angle(angle, speed), kind)
            })
            .collect(),
    }
}

/// One bullet per offset, each heading at the target plus that offset.
pub fn aimed(
    origin: Vec2,
    target: Vec2,
    offsets: &[f32],
    speed: f32,
    kind: BulletKind,
) -> Vec<Bullet> {
    let angle = origin.angle_to(target);
    offsets
        .iter()
        .map(|off| Bullet::boss(origin, Vec2::from_angle(angle + off, speed), kind))
        .collect()
}

/// `count` bullets laid out on a small ring around `origin`, all flying
/// parallel toward the target so the cluster arrives together.
pub fn aimed_ring(
    origin: Vec2,
    target: Vec2,
    count: usize,
    ring_radius: f32,
    speed: f32,
    kind: BulletKind,
) -> Vec<Bullet> {
    let vel = Vec2::from_angle(origin.angle_to(target), speed);
    (0..count)
        .map(|i| {
            let theta = i as f32 / count as f32 * TAU;
            let pos = origin + Vec2::from_angle(theta, ring_radius);
            Bullet::boss(pos, vel, kind)
        })
        .collect()
}

/// `count` bullets at uniformly random headings with speeds drawn from
/// `[min_speed, max_speed]`.
pub fn random_burst<R: Rng>(
    origin: Vec2,
    count: usize,
    min_speed: f32,
    max_speed: f32,
    kind: BulletKind,
    rng: &mut R,
) -> Vec<Bullet> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = if max_speed > min_speed {
                rng.gen_range(min_speed..=max_speed)
            } else {
                min_speed
            };
            Bullet::boss(origin, Vec2::from_angle(angle, speed), kind)
        })
        .collect()
}

/// `count` bullets evenly spaced over a full turn.
pub fn circle(origin: Vec2, count: usize, speed: f32, kind: BulletKind) -> Vec<Bullet> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            Bullet::boss(origin, Vec2::from_angle(angle, speed), kind)
        })
        .collect()
}

/// `arms` interleaved rings of `count` bullets whose base angle turns with
/// the frame counter, so repeated volleys trace rotating spiral arms.
pub fn spiral(origin: Vec2, count: usize, arms: usize, frame: u64, speed: f32) -> Vec<Bullet> {
    if count == 0 || arms == 0 {
        return Vec::new();
    }
    let base = frame as f32 / 30.0;
    let mut out = Vec::with_capacity(count * arms);
    for i in 0..count {
        for s in 0..arms {
            let angle = base + i as f32 / count as f32 * TAU + s as f32 / arms as f32 * TAU;
            out.push(Bullet::boss(
                origin,
                Vec2::from_angle(angle, speed),
                BulletKind::cycle(s as i64),
            ));
        }
    }
    out
}

/// Ring speed multipliers of [`complex_circle`].
pub const RING_SCALES: [f32; 2] = [1.0, 1.5];

/// Two concentric rings (speeds ×1.0 and ×1.5) whose base angle advances by
/// `frame × rotation_speed`.
pub fn complex_circle(
    origin: Vec2,
    count: usize,
    rotation_speed: f32,
    frame: u64,
    speed: f32,
) -> Vec<Bullet> {
    let base = frame as f32 * rotation_speed;
    let mut out = Vec::with_capacity(count * RING_SCALES.len());
    for i in 0..count {
        let angle = base + i as f32 / count as f32 * TAU;
        let kind = BulletKind::cycle((angle * 3.0).floor() as i64);
        for scale in RING_SCALES {
            out.push(Bullet::boss(origin, Vec2::from_angle(angle, speed * scale), kind));
        }
    }
    out
}

/// Bullets placed on the lobed curve `r = sin(2t)·lobe_radius`, `t` sampled
/// over a full turn, each launched along its own `t`.
pub fn butterfly(origin: Vec2, count: usize, lobe_radius: f32, speed: f32) -> Vec<Bullet> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32 * TAU;
            let r = (2.0 * t).sin() * lobe_radius;
            let pos = origin + Vec2::from_angle(t, r);
            Bullet::boss(pos, Vec2::from_angle(t, speed), BulletKind::Star)
        })
        .collect()
}
