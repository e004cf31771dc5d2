use danmaku::boss::*;
use danmaku::bullet::Bullet;
use danmaku::config::Balance;
use danmaku::context::{Playfield, SimContext};
use danmaku::entities::{BulletKind, Vec2};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_boss() -> Boss {
    Boss::new(&Balance::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn field() -> Playfield {
    Playfield::new(240.0, 320.0)
}

fn target() -> Vec2 {
    Vec2::new(124.0, 294.0)
}

fn litter(boss: &mut Boss) {
    for i in 0..5 {
        boss.bullets.push(Bullet::boss(
            Vec2::new(20.0 * i as f32, 150.0),
            Vec2::ZERO,
            BulletKind::Red,
        ));
    }
}

// ── Phases ────────────────────────────────────────────────────────────────────

#[test]
fn starts_in_phase_one_without_spell() {
    let b = make_boss();
    assert_eq!(b.phase, Phase::One);
    assert_eq!(b.hp, 1000);
    assert!(!b.is_spell_card_active());
    assert!(b.current_spell().is_none());
}

#[test]
fn crossing_sixty_percent_enters_phase_two() {
    let mut b = make_boss();
    litter(&mut b);
    for _ in 0..400 {
        b.get_hit(1);
    }
    assert_eq!(b.check_phase_transition(), None);

    b.get_hit(1);
    assert_eq!(b.check_phase_transition(), Some(Phase::Two));
    assert_eq!(b.phase, Phase::Two);
    assert!(b.bullets.is_empty());
    assert_eq!(b.active_spell, Some(SpellCardSlot::ButterflyStorm));
}

#[test]
fn one_phase_per_check() {
    let mut b = make_boss();
    b.hp = 100;
    assert_eq!(b.check_phase_transition(), Some(Phase::Two));
    assert_eq!(b.check_phase_transition(), Some(Phase::Three));
    assert_eq!(b.active_spell, Some(SpellCardSlot::RedMagic));
    assert_eq!(b.check_phase_transition(), None);
}

#[test]
fn phase_never_goes_back() {
    let mut b = make_boss();
    b.hp = 500;
    b.check_phase_transition();
    b.hp = b.max_hp;
    assert_eq!(b.check_phase_transition(), None);
    assert_eq!(b.phase, Phase::Two);
}

// ── Spell cards ───────────────────────────────────────────────────────────────

#[test]
fn declare_spell_clears_bullets() {
    let mut b = make_boss();
    litter(&mut b);
    b.declare_spell(SpellCardSlot::ScarletLaser);
    assert!(b.bullets.is_empty());
    assert_eq!(b.current_spell().map(|c| c.name()), Some("Crimson Sign \"Scarlet Laser\""));
}

#[test]
fn spell_soaks_damage() {
    let mut b = make_boss();
    b.declare_spell(SpellCardSlot::ScarletLaser);
    assert!(!b.get_hit(1));
    assert_eq!(b.hp, 1000);
    assert_eq!(b.spell_cards[0].hp, 399);
}

#[test]
fn spell_breaks_when_pool_drained() {
    let mut b = make_boss();
    b.declare_spell(SpellCardSlot::ScarletLaser);
    for _ in 0..400 {
        b.get_hit(1);
    }
    assert!(!b.is_spell_card_active());
    assert_eq!(b.hp, 1000);

    // back on the boss's own HP
    b.get_hit(1);
    assert_eq!(b.hp, 999);
}

#[test]
fn spell_times_out() {
    let mut b = make_boss();
    let mut rng = seeded_rng();
    b.declare_spell(SpellCardSlot::ButterflyStorm);
    b.spell_cards[SpellCardSlot::ButterflyStorm.index()].time_left = 1;

    let mut ctx = SimContext::new(1, field(), &mut rng);
    let outcome = b.update(target(), &mut ctx);
    assert_eq!(
        outcome.spell_ended,
        Some((SpellCardSlot::ButterflyStorm, SpellEnd::TimedOut))
    );
    assert!(!b.is_spell_card_active());
}

#[test]
fn spell_card_tick_prefers_broken() {
    let mut card = SpellCard::new(SpellCardSlot::RedMagic, 1, 1);
    card.get_hit(1);
    assert_eq!(card.tick(), Some(SpellEnd::Broken));
}

#[test]
fn defeat_at_zero_hp() {
    let mut b = make_boss();
    b.hp = 2;
    assert!(!b.get_hit(1));
    assert!(b.get_hit(1));
    assert!(b.is_defeated());
}

// ── Attacks ───────────────────────────────────────────────────────────────────

#[test]
fn phase_one_fan_on_cadence() {
    let mut b = make_boss();
    let mut rng = seeded_rng();

    let mut ctx = SimContext::new(19, field(), &mut rng);
    b.update(target(), &mut ctx);
    assert!(b.bullets.is_empty());

    let mut ctx = SimContext::new(20, field(), &mut rng);
    b.update(target(), &mut ctx);
    assert_eq!(b.bullets.len(), Phase::One.fan_count());
    assert!(b.bullets.iter().all(|bl| bl.kind == BulletKind::Red));
}

#[test]
fn active_spell_replaces_normal_attack() {
    let mut b = make_boss();
    let mut rng = seeded_rng();
    b.declare_spell(SpellCardSlot::ButterflyStorm);

    let mut ctx = SimContext::new(20, field(), &mut rng);
    b.update(target(), &mut ctx);
    assert_eq!(b.bullets.len(), 15);
    assert!(b.bullets.iter().all(|bl| bl.kind == BulletKind::Star));
}

#[test]
fn cooldown_holds_fire() {
    let mut b = make_boss();
    let mut rng = seeded_rng();
    b.attack_cooldown = 5;

    let mut ctx = SimContext::new(20, field(), &mut rng);
    b.update(target(), &mut ctx);
    assert!(b.bullets.is_empty());
    assert_eq!(b.attack_cooldown, 4);
}

#[test]
fn burst_uses_rng() {
    let mut b = make_boss();
    let mut rng = seeded_rng();
    let mut ctx = SimContext::new(0, field(), &mut rng);
    b.fire_pattern(Pattern::Burst, target(), &mut ctx);
    assert_eq!(b.bullets.len(), Phase::One.burst_count());
}

#[test]
fn pattern_index_wraps() {
    assert_eq!(Pattern::from_index(0), Pattern::Fan);
    assert_eq!(Pattern::from_index(1), Pattern::Aimed);
    assert_eq!(Pattern::from_index(2), Pattern::Burst);
    assert_eq!(Pattern::from_index(3), Pattern::Fan);
}
