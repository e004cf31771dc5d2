use std::fmt;

/// Fixed spell-card slots. Phase transitions declare the card of their slot;
/// the active card is tracked by slot, never by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellCardSlot {
    ScarletLaser,
    ButterflyStorm,
    RedMagic,
}

impl SpellCardSlot {
    pub const ALL: [SpellCardSlot; 3] = [
        SpellCardSlot::ScarletLaser,
        SpellCardSlot::ButterflyStorm,
        SpellCardSlot::RedMagic,
    ];

    pub fn index(self) -> usize {
        match self {
            SpellCardSlot::ScarletLaser => 0,
            SpellCardSlot::ButterflyStorm => 1,
            SpellCardSlot::RedMagic => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellCardSlot::ScarletLaser => "Crimson Sign \"Scarlet Laser\"",
            SpellCardSlot::ButterflyStorm => "Butterfly Sign \"Butterfly Storm\"",
            SpellCardSlot::RedMagic => "Taboo \"Red Magic\"",
        }
    }
}

impl fmt::Display for SpellCardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a spell card stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellEnd {
    TimedOut,
    Broken,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpellCard {
    pub slot: SpellCardSlot,
    /// Separate damage pool, drained instead of the boss's HP while active.
    pub hp: i32,
    pub max_hp: i32,
    pub duration: u32,
    pub time_left: u32,
}

impl SpellCard {
    pub fn new(slot: SpellCardSlot, hp: i32, duration: u32) -> Self {
        Self {
            slot,
            hp,
            max_hp: hp,
            duration,
            time_left: duration,
        }
    }

    pub fn name(&self) -> &'static str {
        self.slot.name()
    }

    /// Count down one frame. Returns why the card ended, if it did. A broken
    /// card reports `Broken` even when its timer ran out on the same frame.
    pub fn tick(&mut self) -> Option<SpellEnd> {
        self.time_left = self.time_left.saturating_sub(1);
        if self.hp <= 0 {
            Some(SpellEnd::Broken)
        } else if self.time_left == 0 {
            Some(SpellEnd::TimedOut)
        } else {
            None
        }
    }

    /// Returns `true` once the pool is exhausted.
    pub fn get_hit(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        self.hp <= 0
    }

    pub fn hp_ratio(&self) -> f32 {
        (self.hp.max(0) as f32) / (self.max_hp.max(1) as f32)
    }

    pub fn time_ratio(&self) -> f32 {
        self.time_left as f32 / self.duration.max(1) as f32
    }
}
