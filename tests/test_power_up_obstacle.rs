use danmaku::config::Balance;
use danmaku::context::Playfield;
use danmaku::entities::{ItemKind, ObstacleKind, Vec2};
use danmaku::obstacle::*;
use danmaku::player::{Player, MAX_POWER};
use danmaku::power_up::*;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> Playfield {
    Playfield::new(240.0, 320.0)
}

fn item(kind: ItemKind) -> PowerUp {
    PowerUp::new(Vec2::new(100.0, 50.0), kind, 0.0, 180)
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn power_item_raises_power_and_scores() {
    let b = Balance::default();
    let mut p = Player::new(&b);
    p.power = 3;
    assert_eq!(item(ItemKind::Power).apply_effect(&mut p, &b), 50);
    assert_eq!(p.power, 4);
}

#[test]
fn power_item_at_max_still_scores() {
    let b = Balance::default();
    let mut p = Player::new(&b);
    p.power = MAX_POWER;
    assert_eq!(item(ItemKind::Power).apply_effect(&mut p, &b), 50);
    assert_eq!(p.power, MAX_POWER);
}

#[test]
fn life_and_bomb_items() {
    let b = Balance::default();
    let mut p = Player::new(&b);
    assert_eq!(item(ItemKind::Life).apply_effect(&mut p, &b), 200);
    assert_eq!(p.lives, 4);
    assert_eq!(item(ItemKind::Bomb).apply_effect(&mut p, &b), 100);
    assert_eq!(p.bombs, 4);
}

#[test]
fn item_starts_homing_after_delay() {
    let mut pu = item(ItemKind::Power);
    let target = Vec2::new(10.0, 290.0);
    for frame in 0..179 {
        pu.update(target, frame, &field());
    }
    assert!(!pu.is_homing);

    let x_before = pu.pos.x;
    let y_before = pu.pos.y;
    pu.update(target, 179, &field());
    assert!(pu.is_homing);
    assert_eq!(pu.speed, BASE_FALL_SPEED * HOMING_BOOST);
    assert_relative_eq!(pu.pos.y - y_before, 3.0);
    // steers toward the player, capped per frame
    assert_relative_eq!(x_before - pu.pos.x, HOMING_STEER, epsilon = 1e-4);
}

#[test]
fn item_leaves_past_bottom() {
    let mut pu = PowerUp::new(Vec2::new(100.0, 328.5), ItemKind::Bomb, 0.0, 180);
    assert!(pu.update(Vec2::ZERO, 0, &field()));
}

#[test]
fn roll_covers_every_kind() {
    let mut rng = StdRng::seed_from_u64(42);
    let kinds: Vec<ItemKind> = (0..500).map(|_| ItemKind::roll(&mut rng)).collect();
    let power = kinds.iter().filter(|k| **k == ItemKind::Power).count();
    assert!(kinds.contains(&ItemKind::Bomb));
    assert!(kinds.contains(&ItemKind::Life));
    assert!(power > 250, "power drawn {power} times");
}

#[test]
fn spawned_item_is_above_screen() {
    let mut rng = StdRng::seed_from_u64(42);
    let pu = PowerUp::spawn(&field(), 180, &mut rng);
    assert!(pu.pos.y < 0.0);
    assert!(pu.pos.x >= 0.0 && pu.pos.x <= 240.0 - ITEM_SIZE);
    assert!(pu.active);
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

fn obstacle(kind: ObstacleKind) -> Obstacle {
    Obstacle::new(Vec2::new(100.0, 0.0), OBSTACLE_SIZE, OBSTACLE_SPEED, kind, 0.0)
}

#[test]
fn zigzag_takes_three_hits() {
    let mut o = obstacle(ObstacleKind::Zigzag);
    assert_eq!(o.health, 3);
    assert!(!o.get_hit(1));
    assert!(!o.get_hit(1));
    assert!(o.get_hit(1));
}

#[test]
fn others_break_in_one_hit() {
    assert!(obstacle(ObstacleKind::Straight).get_hit(1));
    assert!(obstacle(ObstacleKind::Rotating).get_hit(1));
}

#[test]
fn straight_falls_straight() {
    let mut o = obstacle(ObstacleKind::Straight);
    o.update(1, &field());
    assert_eq!(o.pos, Vec2::new(100.0, 2.0));
}

#[test]
fn zigzag_stays_on_screen() {
    let mut o = Obstacle::new(Vec2::new(0.0, 0.0), OBSTACLE_SIZE, 0.0, ObstacleKind::Zigzag, 0.0);
    for frame in 0..500 {
        o.update(frame, &field());
        assert!(o.pos.x >= 0.0 && o.pos.x <= 240.0 - o.width);
    }
}

#[test]
fn obstacle_leaves_past_bottom() {
    let mut o = Obstacle::new(
        Vec2::new(100.0, 319.0),
        OBSTACLE_SIZE,
        OBSTACLE_SPEED,
        ObstacleKind::Straight,
        0.0,
    );
    assert!(o.update(0, &field()));
}

#[test]
fn spawned_obstacle_is_above_screen() {
    let mut rng = StdRng::seed_from_u64(42);
    let o = Obstacle::spawn(&field(), &mut rng);
    assert_eq!(o.pos.y, -OBSTACLE_SIZE);
    assert!(o.active);
}
