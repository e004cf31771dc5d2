//! Game orchestration.
//!
//! Every public function takes an immutable reference to the current
//! [`GameState`] (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG, so a seeded RNG
//! replays a match exactly.

use rand::Rng;

use crate::boss::Boss;
use crate::bullet;
use crate::collision::{collides, Shape};
use crate::config::Balance;
use crate::context::{Playfield, SimContext};
use crate::effect::{self, Effect};
use crate::entities::{GameState, GameStatus, SoundCue};
use crate::input::FrameInput;
use crate::obstacle::Obstacle;
use crate::player::Player;
use crate::power_up::PowerUp;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh match waiting on the title screen.
pub fn init_state(balance: Balance, high_score: u32) -> GameState {
    GameState {
        player: Player::new(&balance),
        boss: Boss::new(&balance),
        obstacles: Vec::new(),
        power_ups: Vec::new(),
        effects: Vec::new(),
        score: 0,
        high_score,
        status: GameStatus::Title,
        frame: 0,
        play_frames: 0,
        cues: Vec::new(),
        balance,
    }
}

// ── Status transitions ───────────────────────────────────────────────────────

/// Title → Playing. Any other status is returned unchanged.
pub fn start(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.status == GameStatus::Title {
        next.status = GameStatus::Playing;
        tracing::info!("match started");
    }
    next
}

/// GameOver/Cleared → a fresh match, already playing. The best score carries
/// over; everything else is rebuilt.
pub fn restart(state: &GameState) -> GameState {
    match state.status {
        GameStatus::GameOver | GameStatus::Cleared => {
            let mut next = init_state(state.balance.clone(), state.high_score.max(state.score));
            next.frame = state.frame;
            next.status = GameStatus::Playing;
            tracing::info!("match restarted");
            next
        }
        _ => state.clone(),
    }
}

/// Drop the current match and go back to the title screen, keeping the best
/// score. Used when a frame faults.
pub fn reset_to_title(state: &GameState) -> GameState {
    let mut next = init_state(state.balance.clone(), state.high_score.max(state.score));
    next.frame = state.frame;
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the whole game by one frame.
pub fn tick(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.frame += 1;
    next.cues.clear();

    match state.status {
        GameStatus::Title => {
            if input.start {
                next = start(&next);
            }
        }
        GameStatus::Playing => step_playing(&mut next, input, rng),
        GameStatus::GameOver | GameStatus::Cleared => {
            if input.restart {
                next = restart(&next);
            }
        }
    }
    next
}

fn step_playing(state: &mut GameState, input: &FrameInput, rng: &mut impl Rng) {
    state.play_frames += 1;
    let field = Playfield::from_balance(&state.balance);

    // ── 1. Player ────────────────────────────────────────────────────────────
    let outcome = state.player.update(input, &field);
    if outcome.fired {
        state.cues.push(SoundCue::Fire);
    }
    if outcome.bombed {
        state.boss.bullets.clear();
        state
            .effects
            .push(Effect::bomb(state.player.center(), &field, rng));
        state.cues.push(SoundCue::Bomb);
    }

    // ── 2. Boss ──────────────────────────────────────────────────────────────
    let target = state.player.center();
    let mut ctx = SimContext::new(state.frame, field, rng);
    let boss_outcome = state.boss.update(target, &mut ctx);
    if boss_outcome.phase_changed.is_some() {
        state.cues.push(SoundCue::Explosion);
    }

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    spawn_obstacles(state, &mut ctx);
    spawn_power_ups(state, &mut ctx);

    // ── 4. Falling entities & effects ────────────────────────────────────────
    let frame = state.frame;
    state.obstacles.retain_mut(|o| !o.update(frame, &field));
    state
        .power_ups
        .retain_mut(|p| !p.update(target, frame, &field));

    // ── 5. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(state, &mut *ctx.rng);

    effect::advance_all(&mut state.effects);
}

fn spawn_obstacles<R: Rng>(state: &mut GameState, ctx: &mut SimContext<'_, R>) {
    if state.play_frames > state.balance.obstacle_warmup
        && ctx.rng.gen_bool(state.balance.obstacle_chance)
    {
        let obstacle = Obstacle::spawn(&ctx.playfield, &mut *ctx.rng);
        tracing::debug!(kind = ?obstacle.kind, x = obstacle.pos.x, "obstacle spawned");
        state.obstacles.push(obstacle);
    }
}

fn spawn_power_ups<R: Rng>(state: &mut GameState, ctx: &mut SimContext<'_, R>) {
    if ctx.rng.gen_bool(state.balance.power_up_chance) {
        let item = PowerUp::spawn(&ctx.playfield, state.balance.homing_delay, &mut *ctx.rng);
        let c = item.rect().center();
        state.effects.push(Effect::spawn(c, 15.0));
        state.power_ups.push(item);
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Resolve every entity-pair interaction for this frame.
///
/// Consumed entities are only marked inactive while a pass runs and are
/// compacted out afterwards, so nothing removed earlier in the frame can be
/// matched again.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    player_bullets_vs_boss(state, rng);
    player_bullets_vs_obstacles(state, rng);
    bullet::compact(&mut state.player.bullets);

    boss_bullets_vs_player(state);
    bullet::compact(&mut state.boss.bullets);

    player_vs_obstacles(state);
    state.obstacles.retain(|o| o.active);

    player_vs_power_ups(state);
    state.power_ups.retain(|p| p.active);

    if state.score > state.high_score {
        state.high_score = state.score;
    }
}

/// Only the first terminal transition of a frame counts.
fn finish(current: &mut GameStatus, status: GameStatus, score: u32) {
    if *current == GameStatus::Playing {
        *current = status;
        tracing::info!(?status, score, "match over");
    }
}

fn player_bullets_vs_boss(state: &mut GameState, rng: &mut impl Rng) {
    let boss_shape = state.boss.shape();
    for b in state.player.bullets.iter_mut().filter(|b| b.active) {
        if !collides(&b.shape(), &boss_shape) {
            continue;
        }
        b.active = false;
        state.score += state.balance.boss_hit_score;
        state.effects.push(Effect::hit(b.pos, rng));
        state.cues.push(SoundCue::Hit);
        if state.boss.get_hit(1) && state.status == GameStatus::Playing {
            state
                .effects
                .push(Effect::explosion(state.boss.center(), 30.0, rng));
            state.cues.push(SoundCue::Explosion);
            finish(&mut state.status, GameStatus::Cleared, state.score);
        }
    }
}

fn player_bullets_vs_obstacles(state: &mut GameState, rng: &mut impl Rng) {
    for b in state.player.bullets.iter_mut().filter(|b| b.active) {
        let shot = b.shape();
        let Some(obstacle) = state
            .obstacles
            .iter_mut()
            .find(|o| o.active && collides(&shot, &o.shape()))
        else {
            continue;
        };
        b.active = false;
        if obstacle.get_hit(1) {
            obstacle.active = false;
            state.score += state.balance.obstacle_score;
            state
                .effects
                .push(Effect::explosion(obstacle.rect().center(), 10.0, rng));
            state.cues.push(SoundCue::Explosion);
        }
    }
    state.obstacles.retain(|o| o.active);
}

fn boss_bullets_vs_player(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    for b in state.boss.bullets.iter_mut().filter(|b| b.active) {
        if !collides(&b.shape(), &hitbox) {
            continue;
        }
        b.active = false;
        if state.player.get_hit() {
            state.cues.push(SoundCue::Hit);
            if state.player.lives == 0 {
                finish(&mut state.status, GameStatus::GameOver, state.score);
            }
        }
    }
}

fn player_vs_obstacles(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    for o in state.obstacles.iter_mut().filter(|o| o.active) {
        if !collides(&hitbox, &o.shape()) {
            continue;
        }
        // contact always destroys the obstacle, whatever its health
        o.active = false;
        if state.player.get_hit() {
            state.cues.push(SoundCue::Hit);
            if state.player.lives == 0 {
                finish(&mut state.status, GameStatus::GameOver, state.score);
            }
        }
    }
}

fn player_vs_power_ups(state: &mut GameState) {
    let body = Shape::Rect(state.player.body());
    for p in state.power_ups.iter_mut().filter(|p| p.active) {
        if !collides(&body, &Shape::Rect(p.rect())) {
            continue;
        }
        p.active = false;
        state.score += p.apply_effect(&mut state.player, &state.balance);
        state.cues.push(SoundCue::PowerUp);
    }
}
