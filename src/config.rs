//! Balance table: every tuning constant of the encounter in one place.
//!
//! The defaults reproduce the stock balance at 60 FPS. A JSON file may
//! override any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    // ── Playfield ────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_speed: f32,
    /// Speed multiplier while the focus (slow-move) button is held.
    pub focus_factor: f32,
    pub player_bullet_speed: f32,
    pub shot_cooldown: u32,
    pub hit_invincibility: u32,
    pub bomb_invincibility: u32,
    pub starting_lives: u32,
    pub starting_bombs: u32,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_hp: i32,
    pub enemy_bullet_speed: f32,
    pub spell_card_duration: u32,
    /// HP pools of the three spell-card slots, in slot order.
    pub spell_card_hp: [i32; 3],

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub obstacle_chance: f64,
    /// Playing frames before obstacles may appear.
    pub obstacle_warmup: u64,
    pub power_up_chance: f64,
    pub homing_delay: u32,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub boss_hit_score: u32,
    pub power_score: u32,
    pub bomb_score: u32,
    pub life_score: u32,
    pub obstacle_score: u32,

    // ── Pointer control ──────────────────────────────────────────────────────
    /// Distance (playfield units) under which the pointer produces no motion.
    pub pointer_dead_zone: f32,
    /// Motion magnitude per playfield unit of pointer offset, before capping.
    pub pointer_sensitivity: f32,
    /// Extra speed gained after holding the pointer for a full second.
    pub pointer_acceleration: f32,
    /// Two pointer presses within this many frames trigger a bomb.
    pub double_tap_frames: u64,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            width: 240.0,
            height: 320.0,

            player_speed: 3.0,
            focus_factor: 0.5,
            player_bullet_speed: 6.0,
            shot_cooldown: 5,
            hit_invincibility: 60,
            bomb_invincibility: 120,
            starting_lives: 3,
            starting_bombs: 3,

            boss_hp: 1000,
            enemy_bullet_speed: 2.0,
            spell_card_duration: 1800,
            spell_card_hp: [400, 600, 800],

            obstacle_chance: 0.01,
            obstacle_warmup: 180,
            power_up_chance: 0.01,
            homing_delay: 180,

            boss_hit_score: 10,
            power_score: 50,
            bomb_score: 100,
            life_score: 200,
            obstacle_score: 30,

            pointer_dead_zone: 2.0,
            pointer_sensitivity: 0.08,
            pointer_acceleration: 0.5,
            double_tap_frames: 15,
        }
    }
}

impl Balance {
    /// Parse a (possibly partial) balance table and validate it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let balance: Balance = serde_json::from_str(text)?;
        balance.validate()?;
        Ok(balance)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let balance = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded balance config");
        Ok(balance)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(invalid("width/height", "playfield must have positive size"));
        }
        if self.player_speed <= 0.0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.focus_factor) {
            return Err(invalid("focus_factor", "must lie in [0, 1]"));
        }
        for (field, p) in [
            ("obstacle_chance", self.obstacle_chance),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }
        if self.boss_hp <= 0 {
            return Err(invalid("boss_hp", "boss needs at least 1 HP"));
        }
        if self.spell_card_hp.iter().any(|&hp| hp <= 0) {
            return Err(invalid("spell_card_hp", "every spell card needs at least 1 HP"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "match would start lost"));
        }
        if self.spell_card_duration == 0 {
            return Err(invalid("spell_card_duration", "must be at least one frame"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> GameError {
    GameError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Balance::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let b = Balance::from_json_str(r#"{ "boss_hp": 500, "starting_lives": 5 }"#).unwrap();
        assert_eq!(b.boss_hp, 500);
        assert_eq!(b.starting_lives, 5);
        assert_eq!(b.width, 240.0);
        assert_eq!(b.spell_card_hp, [400, 600, 800]);
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let err = Balance::from_json_str(r#"{ "power_up_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfig { field: "power_up_chance", .. }
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            Balance::from_json_str("{ not json"),
            Err(GameError::Parse(_))
        ));
    }
}
