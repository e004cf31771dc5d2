use danmaku::entities::*;

use approx::assert_relative_eq;

#[test]
fn vec2_arithmetic() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(3.0, -1.0);
    assert_eq!(a + b, Vec2::new(4.0, 1.0));
    assert_eq!(b - a, Vec2::new(2.0, -3.0));
    assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));

    let mut c = a;
    c += b;
    assert_eq!(c, Vec2::new(4.0, 1.0));
}

#[test]
fn vec2_geometry() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(3.0, 4.0);
    assert_relative_eq!(b.length(), 5.0);
    assert_relative_eq!(a.distance(b), 5.0);
    assert_relative_eq!(b.normalize().length(), 1.0);
    assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);

    // +y points down the screen
    let down = a.angle_to(Vec2::new(0.0, 10.0));
    assert_relative_eq!(down, std::f32::consts::FRAC_PI_2);
    let v = Vec2::from_angle(down, 2.0);
    assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(v.y, 2.0);
}

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 4.0, 6.0);
    assert_eq!(r.right(), 14.0);
    assert_eq!(r.bottom(), 26.0);
    assert_eq!(r.center(), Vec2::new(12.0, 23.0));
}

#[test]
fn bullet_kind_cycles_through_four_styles() {
    assert_eq!(BulletKind::cycle(0), BulletKind::Red);
    assert_eq!(BulletKind::cycle(1), BulletKind::GreenLarge);
    assert_eq!(BulletKind::cycle(2), BulletKind::Blue);
    assert_eq!(BulletKind::cycle(3), BulletKind::Purple);
    assert_eq!(BulletKind::cycle(4), BulletKind::Red);
    assert_eq!(BulletKind::cycle(-1), BulletKind::Purple);
}

#[test]
fn obstacle_kind_from_index_wraps() {
    assert_eq!(ObstacleKind::from_index(0), ObstacleKind::Straight);
    assert_eq!(ObstacleKind::from_index(1), ObstacleKind::Rotating);
    assert_eq!(ObstacleKind::from_index(2), ObstacleKind::Zigzag);
    assert_eq!(ObstacleKind::from_index(3), ObstacleKind::Straight);
}

#[test]
fn sound_cue_ids_are_stable() {
    let ids: Vec<u8> = [
        SoundCue::Fire,
        SoundCue::Explosion,
        SoundCue::PowerUp,
        SoundCue::Bomb,
        SoundCue::Hit,
    ]
    .iter()
    .map(|c| c.id())
    .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn terminal_statuses() {
    assert!(!GameStatus::Title.is_terminal());
    assert!(!GameStatus::Playing.is_terminal());
    assert!(GameStatus::GameOver.is_terminal());
    assert!(GameStatus::Cleared.is_terminal());
}
