//! Device-independent input.
//!
//! The core only ever sees a [`FrameInput`]: a numeric motion vector plus a
//! handful of buttons. [`Controls`] builds one per frame from logical key
//! events and an optional pointer, whatever the device behind them.

use std::collections::{HashMap, HashSet};

use crate::config::Balance;
use crate::entities::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Desired motion; each axis is nominally in `[-1, 1]`, pointer
    /// acceleration may push it slightly past that.
    pub motion: Vec2,
    /// Level-triggered.
    pub fire: bool,
    /// Edge-triggered.
    pub bomb: bool,
    pub focus: bool,
    pub start: bool,
    pub restart: bool,
    pub quit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Bomb,
    Focus,
    Start,
    Restart,
    Quit,
}

/// A key is considered held if it was seen within this many frames. Covers
/// terminals that never report key releases: OS key repeat refreshes the
/// timestamp well before it expires.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, Default)]
struct Pointer {
    pos: Vec2,
    down: bool,
    /// Frame the current press started.
    pressed_at: u64,
    /// Frame of the previous press, for double-tap detection.
    last_press: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Controls {
    last_seen: HashMap<Action, u64>,
    /// Actions pressed since the last `frame_input` call.
    edges: HashSet<Action>,
    pointer: Pointer,
    pointer_edge: bool,
    double_tap: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// A press while the key is still held is OS auto-repeat on a terminal
    /// without release events: it refreshes the hold but is not a new edge.
    pub fn press(&mut self, action: Action, frame: u64) {
        if !self.is_held(action, frame) {
            self.edges.insert(action);
        }
        self.last_seen.insert(action, frame);
    }

    /// Key-repeat: keeps a key held without producing a new edge.
    pub fn repeat(&mut self, action: Action, frame: u64) {
        self.last_seen.insert(action, frame);
    }

    pub fn release(&mut self, action: Action) {
        self.last_seen.remove(&action);
    }

    pub fn is_held(&self, action: Action, frame: u64) -> bool {
        self.last_seen
            .get(&action)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn pointer_down(&mut self, pos: Vec2, frame: u64, balance: &Balance) {
        if let Some(prev) = self.pointer.last_press {
            if frame.saturating_sub(prev) <= balance.double_tap_frames {
                self.double_tap = true;
            }
        }
        self.pointer = Pointer {
            pos,
            down: true,
            pressed_at: frame,
            last_press: Some(frame),
        };
        self.pointer_edge = true;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer.pos = pos;
    }

    pub fn pointer_up(&mut self) {
        self.pointer.down = false;
    }

    /// Snapshot this frame's input and consume pending edges.
    ///
    /// `anchor` is the point the pointer steers from (the player's center).
    pub fn frame_input(&mut self, frame: u64, anchor: Vec2, balance: &Balance) -> FrameInput {
        let held = |a: Action| self.is_held(a, frame);
        let axis = |neg, pos| match (held(neg), held(pos)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let mut motion = Vec2::new(
            axis(Action::Left, Action::Right),
            axis(Action::Up, Action::Down),
        );
        let mut fire = held(Action::Fire);

        if self.pointer.down {
            let hold = frame.saturating_sub(self.pointer.pressed_at);
            motion = pointer_motion(self.pointer.pos - anchor, hold, balance);
            fire = true;
        }

        let edge = |a: Action| self.edges.contains(&a);
        let input = FrameInput {
            motion,
            fire,
            bomb: edge(Action::Bomb) || self.double_tap,
            focus: held(Action::Focus),
            start: edge(Action::Start) || edge(Action::Fire) || self.pointer_edge,
            restart: edge(Action::Restart) || self.pointer_edge,
            quit: edge(Action::Quit),
        };

        self.edges.clear();
        self.pointer_edge = false;
        self.double_tap = false;
        input
    }
}

/// Ease toward the pointer: nothing inside the dead zone, proportional
/// response beyond it capped at full speed, plus a boost that grows over the
/// first second of holding.
pub fn pointer_motion(offset: Vec2, hold_frames: u64, balance: &Balance) -> Vec2 {
    let dist = offset.length();
    if dist <= balance.pointer_dead_zone {
        return Vec2::ZERO;
    }
    let magnitude = ((dist - balance.pointer_dead_zone) * balance.pointer_sensitivity).min(1.0);
    let ramp = (hold_frames.min(60) as f32) / 60.0;
    offset.normalize() * (magnitude * (1.0 + balance.pointer_acceleration * ramp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut c = Controls::new();
        let b = Balance::default();
        c.press(Action::Left, 10);
        c.press(Action::Right, 10);
        let input = c.frame_input(10, Vec2::ZERO, &b);
        assert_eq!(input.motion.x, 0.0);
    }

    #[test]
    fn key_expires_after_hold_window() {
        let mut c = Controls::new();
        c.press(Action::Up, 10);
        assert!(c.is_held(Action::Up, 10 + HOLD_WINDOW));
        assert!(!c.is_held(Action::Up, 11 + HOLD_WINDOW));
    }

    #[test]
    fn edges_are_consumed_once() {
        let mut c = Controls::new();
        let b = Balance::default();
        c.press(Action::Bomb, 1);
        assert!(c.frame_input(1, Vec2::ZERO, &b).bomb);
        assert!(!c.frame_input(2, Vec2::ZERO, &b).bomb);
    }

    #[test]
    fn held_key_repeating_as_presses_bombs_once() {
        let mut c = Controls::new();
        let b = Balance::default();
        let bombs = (1..=10)
            .filter(|&f| {
                c.press(Action::Bomb, f);
                c.frame_input(f, Vec2::ZERO, &b).bomb
            })
            .count();
        assert_eq!(bombs, 1);
    }

    #[test]
    fn press_after_release_is_a_new_edge() {
        let mut c = Controls::new();
        let b = Balance::default();
        c.press(Action::Bomb, 1);
        assert!(c.frame_input(1, Vec2::ZERO, &b).bomb);
        c.release(Action::Bomb);
        c.press(Action::Bomb, 2);
        assert!(c.frame_input(2, Vec2::ZERO, &b).bomb);
    }

    #[test]
    fn double_tap_bombs() {
        let mut c = Controls::new();
        let b = Balance::default();
        c.pointer_down(Vec2::new(50.0, 50.0), 100, &b);
        c.pointer_up();
        assert!(!c.frame_input(100, Vec2::ZERO, &b).bomb);
        c.pointer_down(Vec2::new(50.0, 50.0), 110, &b);
        assert!(c.frame_input(110, Vec2::ZERO, &b).bomb);
    }

    #[test]
    fn pointer_dead_zone_is_still() {
        let b = Balance::default();
        assert_eq!(pointer_motion(Vec2::new(1.0, 1.0), 0, &b), Vec2::ZERO);
        let m = pointer_motion(Vec2::new(100.0, 0.0), 60, &b);
        assert!((m.x - 1.5).abs() < 1e-5);
        assert_eq!(m.y, 0.0);
    }
}
