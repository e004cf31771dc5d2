use danmaku::config::Balance;
use danmaku::context::Playfield;
use danmaku::input::FrameInput;
use danmaku::player::*;

use approx::assert_relative_eq;

fn make_player() -> Player {
    Player::new(&Balance::default())
}

fn field() -> Playfield {
    Playfield::new(240.0, 320.0)
}

#[test]
fn new_player_sits_bottom_center() {
    let p = make_player();
    assert_eq!(p.pos.x, 120.0);
    assert_eq!(p.pos.y, 290.0);
    assert_eq!(p.power, MIN_POWER);
    assert_eq!(p.lives, 3);
    assert_eq!(p.bombs, 3);
    assert!(p.options.is_empty());
}

#[test]
fn power_one_fires_single_shot_straight_up() {
    let mut p = make_player();
    p.shoot();
    assert_eq!(p.bullets.len(), 1);
    let b = &p.bullets[0];
    assert_relative_eq!(b.vel.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(b.vel.y, -6.0, epsilon = 1e-5);
    assert_relative_eq!(b.pos.x, p.pos.x + p.width / 2.0);
}

#[test]
fn full_power_fires_seven() {
    let mut p = make_player();
    p.power = MAX_POWER;
    p.shoot();
    assert_eq!(p.bullets.len(), 7);
    // outer shots angle away from the center line
    assert!(p.bullets.iter().any(|b| b.vel.x < -1.0));
    assert!(p.bullets.iter().any(|b| b.vel.x > 1.0));
}

#[test]
fn power_clamps_at_max() {
    let mut p = make_player();
    for _ in 0..10 {
        p.power_up();
    }
    assert_eq!(p.power, MAX_POWER);
    p.power_up();
    assert_eq!(p.power, MAX_POWER);
}

#[test]
fn options_follow_power() {
    let mut p = make_player();
    p.power = 3;
    p.update_options();
    assert_eq!(p.options.len(), 1);
    p.power = 5;
    p.update_options();
    assert_eq!(p.options.len(), 2);
}

#[test]
fn hit_costs_life_and_power() {
    let mut p = make_player();
    p.power = 3;
    assert!(p.get_hit());
    assert_eq!(p.lives, 2);
    assert_eq!(p.power, 2);
    assert_eq!(p.invincible, 60);
}

#[test]
fn hit_while_invincible_is_noop() {
    let mut p = make_player();
    p.invincible = 10;
    p.power = 3;
    assert!(!p.get_hit());
    assert_eq!(p.lives, 3);
    assert_eq!(p.power, 3);
    assert_eq!(p.invincible, 10);
}

#[test]
fn power_never_drops_below_min() {
    let mut p = make_player();
    p.get_hit();
    assert_eq!(p.power, MIN_POWER);
}

#[test]
fn last_life_reports_loss() {
    let mut p = make_player();
    p.lives = 1;
    assert!(p.get_hit());
    assert_eq!(p.lives, 0);
}

#[test]
fn bomb_grants_grace_and_consumes_stock() {
    let mut p = make_player();
    assert!(p.use_bomb());
    assert_eq!(p.bombs, 2);
    assert_eq!(p.invincible, 120);

    p.bombs = 0;
    assert!(!p.use_bomb());
}

#[test]
fn focus_halves_speed() {
    let mut p = make_player();
    let start = p.pos.x;
    let input = FrameInput {
        motion: danmaku::entities::Vec2::new(1.0, 0.0),
        focus: true,
        ..FrameInput::default()
    };
    p.update(&input, &field());
    assert_relative_eq!(p.pos.x - start, 1.5);
    assert!(p.focusing);
}

#[test]
fn movement_is_clamped_to_playfield() {
    let mut p = make_player();
    let input = FrameInput {
        motion: danmaku::entities::Vec2::new(1.0, 1.0),
        ..FrameInput::default()
    };
    for _ in 0..200 {
        p.update(&input, &field());
    }
    assert_eq!(p.pos.x, 240.0 - p.width);
    assert_eq!(p.pos.y, 320.0 - p.height);
}

#[test]
fn held_fire_respects_cooldown() {
    let mut p = make_player();
    let input = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    let fired: usize = (0..10)
        .map(|_| usize::from(p.update(&input, &field()).fired))
        .sum();
    assert_eq!(fired, 2);
}
