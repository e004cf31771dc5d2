//! Explicit per-frame simulation context.
//!
//! Nothing in the core reads a global frame counter or a global RNG; both are
//! handed in through [`SimContext`], which keeps every update replayable from
//! a seed.

use rand::Rng;

use crate::config::Balance;
use crate::entities::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_balance(balance: &Balance) -> Self {
        Self::new(balance.width, balance.height)
    }

    /// True when `pos` lies outside the playfield grown by `margin` on each
    /// side. Points exactly on the grown edge are still inside.
    pub fn is_outside(&self, pos: Vec2, margin: Vec2) -> bool {
        pos.x < -margin.x
            || pos.x > self.width + margin.x
            || pos.y < -margin.y
            || pos.y > self.height + margin.y
    }

    /// Clamp a `w`×`h` box anchored at `pos` so it stays fully on screen.
    pub fn clamp_box(&self, pos: Vec2, w: f32, h: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - w).max(0.0)),
            pos.y.clamp(0.0, (self.height - h).max(0.0)),
        )
    }
}

pub struct SimContext<'a, R: Rng> {
    pub frame: u64,
    pub playfield: Playfield,
    pub rng: &'a mut R,
}

impl<'a, R: Rng> SimContext<'a, R> {
    pub fn new(frame: u64, playfield: Playfield, rng: &'a mut R) -> Self {
        Self {
            frame,
            playfield,
            rng,
        }
    }

    /// True on frames that are multiples of `period` (period 0 never fires).
    pub fn every(&self, period: u64) -> bool {
        period != 0 && self.frame % period == 0
    }
}
