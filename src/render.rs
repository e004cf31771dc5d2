//! The rendering/audio collaborator seam.
//!
//! The core never draws pixels itself: during the draw pass it issues
//! primitive calls against a [`Surface`] and hands sound cues to an
//! [`AudioSink`]. Colors are indices into a fixed 16-entry palette.

use crate::entities::{GameState, GameStatus, SoundCue};

pub mod palette {
    pub const BLACK: u8 = 0;
    pub const NAVY: u8 = 1;
    pub const PURPLE: u8 = 2;
    pub const GREEN: u8 = 3;
    pub const BROWN: u8 = 4;
    pub const DARK_BLUE: u8 = 5;
    pub const LIGHT_BLUE: u8 = 6;
    pub const WHITE: u8 = 7;
    pub const RED: u8 = 8;
    pub const ORANGE: u8 = 9;
    pub const YELLOW: u8 = 10;
    pub const LIME: u8 = 11;
    pub const CYAN: u8 = 12;
    pub const GRAY: u8 = 13;
    pub const PINK: u8 = 14;
    pub const PEACH: u8 = 15;
}

/// A drawing target measured in playfield units.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn cls(&mut self, col: u8);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8);
    fn rectb(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8);
    fn circ(&mut self, x: f32, y: f32, r: f32, col: u8);
    fn circb(&mut self, x: f32, y: f32, r: f32, col: u8);
    #[allow(clippy::too_many_arguments)]
    fn tri(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, col: u8);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, col: u8);
    fn pset(&mut self, x: f32, y: f32, col: u8);
    fn text(&mut self, x: f32, y: f32, s: &str, col: u8);
    /// Copy the `w`×`h` region at (`u`, `v`) of image bank `bank` to
    /// (`x`, `y`). Pixels of color `colkey` are transparent.
    #[allow(clippy::too_many_arguments)]
    fn blt(&mut self, x: f32, y: f32, bank: u8, u: f32, v: f32, w: f32, h: f32, colkey: Option<u8>);
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// One recorded primitive call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Cls(u8),
    Rect { x: f32, y: f32, w: f32, h: f32, col: u8, filled: bool },
    Circ { x: f32, y: f32, r: f32, col: u8, filled: bool },
    Tri { points: [(f32, f32); 3], col: u8 },
    Line { from: (f32, f32), to: (f32, f32), col: u8 },
    Pset { x: f32, y: f32, col: u8 },
    Text { x: f32, y: f32, text: String, col: u8 },
    Blt { x: f32, y: f32, bank: u8, u: f32, v: f32, w: f32, h: f32 },
}

/// A headless surface that records every call. Used by tests and replays.
#[derive(Clone, Debug)]
pub struct DrawLog {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl DrawLog {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawLog {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn cls(&mut self, col: u8) {
        self.commands.clear();
        self.commands.push(DrawCommand::Cls(col));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, col, filled: true });
    }

    fn rectb(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, col, filled: false });
    }

    fn circ(&mut self, x: f32, y: f32, r: f32, col: u8) {
        self.commands.push(DrawCommand::Circ { x, y, r, col, filled: true });
    }

    fn circb(&mut self, x: f32, y: f32, r: f32, col: u8) {
        self.commands.push(DrawCommand::Circ { x, y, r, col, filled: false });
    }

    fn tri(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, col: u8) {
        self.commands.push(DrawCommand::Tri {
            points: [(x1, y1), (x2, y2), (x3, y3)],
            col,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, col: u8) {
        self.commands.push(DrawCommand::Line {
            from: (x1, y1),
            to: (x2, y2),
            col,
        });
    }

    fn pset(&mut self, x: f32, y: f32, col: u8) {
        self.commands.push(DrawCommand::Pset { x, y, col });
    }

    fn text(&mut self, x: f32, y: f32, s: &str, col: u8) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: s.to_string(),
            col,
        });
    }

    fn blt(
        &mut self,
        x: f32,
        y: f32,
        bank: u8,
        u: f32,
        v: f32,
        w: f32,
        h: f32,
        _colkey: Option<u8>,
    ) {
        self.commands.push(DrawCommand::Blt { x, y, bank, u, v, w, h });
    }
}

// ── Scene ────────────────────────────────────────────────────────────────────

/// Issue the draw calls for one complete frame.
pub fn draw_frame(state: &GameState, s: &mut impl Surface) {
    s.cls(palette::BLACK);
    draw_stars(s, state.frame);

    match state.status {
        GameStatus::Title => draw_title(s, state),
        GameStatus::Playing => draw_playing(s, state),
        GameStatus::GameOver => {
            draw_playing(s, state);
            draw_result(s, state, false);
        }
        GameStatus::Cleared => {
            draw_playing(s, state);
            draw_result(s, state, true);
        }
    }
}

fn draw_stars(s: &mut impl Surface, frame: u64) {
    let (w, h) = (s.width().max(1.0) as u64, s.height().max(1.0) as u64);
    for i in 0..50u64 {
        let x = (i * 7 + frame) % w;
        let y = (i * 11 + frame / 2) % h;
        s.pset(x as f32, y as f32, palette::LIGHT_BLUE);
    }
}

fn centered_x(s: &impl Surface, text: &str) -> f32 {
    s.width() / 2.0 - text.chars().count() as f32 * 2.0
}

fn draw_title(s: &mut impl Surface, state: &GameState) {
    let (w, h) = (s.width(), s.height());

    let title = "DANMAKU SHOOTER";
    let x = centered_x(&*s, title);
    s.text(x, h / 3.0, title, palette::WHITE);

    if state.high_score > 0 {
        let best = format!("BEST {}", state.high_score);
        let x = centered_x(&*s, &best);
        s.text(x, h / 3.0 + 12.0, &best, palette::YELLOW);
    }

    let prompt = "PRESS Z OR TAP TO START";
    let (frame_col, text_col) = if state.frame % 30 < 15 {
        (palette::LIME, palette::YELLOW)
    } else {
        (palette::WHITE, palette::WHITE)
    };
    s.rectb(w / 2.0 - 80.0, h / 2.0 - 5.0, 160.0, 15.0, frame_col);
    let x = centered_x(&*s, prompt);
    s.text(x, h / 2.0, prompt, text_col);

    let controls = [
        ("CONTROLS", palette::WHITE),
        ("ARROWS  MOVE", palette::WHITE),
        ("Z       SHOT", palette::WHITE),
        ("X       BOMB", palette::WHITE),
        ("SHIFT   FOCUS", palette::WHITE),
        ("R       RESTART", palette::WHITE),
        ("Q       QUIT", palette::WHITE),
        ("MOUSE   HOLD TO STEER", palette::LIME),
        ("        DOUBLE-CLICK BOMB", palette::LIME),
    ];
    for (i, (line, col)) in controls.iter().enumerate() {
        s.text(10.0, h - 120.0 + i as f32 * 10.0, line, *col);
    }
}

fn draw_playing(s: &mut impl Surface, state: &GameState) {
    for o in &state.obstacles {
        o.draw(s);
    }
    for p in &state.power_ups {
        p.draw(s, state.frame);
    }
    for fx in &state.effects {
        fx.draw(s);
    }
    state.boss.draw(s);
    state.player.draw(s, state.frame);
    draw_hud(s, state);
}

fn draw_hud(s: &mut impl Surface, state: &GameState) {
    let (w, h) = (s.width(), s.height());
    let p = &state.player;
    s.text(5.0, h - 20.0, &format!("SCORE {}", state.score), palette::WHITE);
    s.text(5.0, h - 10.0, &format!("LIVES {}  BOMBS {}", p.lives, p.bombs), palette::WHITE);
    s.text(w - 50.0, h - 10.0, &format!("POWER {}", p.power), palette::WHITE);
}

fn draw_result(s: &mut impl Surface, state: &GameState, cleared: bool) {
    let (w, h) = (s.width(), s.height());
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (backdrop, panel, border, headline, headline_col) = if cleared {
        (palette::NAVY, palette::DARK_BLUE, palette::LIME, "STAGE CLEAR!", palette::YELLOW)
    } else {
        (palette::BLACK, palette::NAVY, palette::RED, "GAME OVER", palette::RED)
    };

    s.rect(0.0, 0.0, w, h, backdrop);
    s.rect(cx - 80.0, cy - 60.0, 160.0, 120.0, panel);
    s.rectb(cx - 80.0, cy - 60.0, 160.0, 120.0, border);
    let x = centered_x(&*s, headline);
    s.text(x, cy - 45.0, headline, headline_col);

    if state.frame % 20 < 10 {
        s.line(cx - 60.0, cy - 30.0, cx + 60.0, cy - 30.0, palette::WHITE);
    }

    let lines = [
        format!("FINAL SCORE  {}", state.score),
        format!("LIVES        {}", state.player.lives),
        format!("POWER LEVEL  {}", state.player.power),
    ];
    for (i, line) in lines.iter().enumerate() {
        s.text(cx - 60.0, cy - 15.0 + i as f32 * 15.0, line, palette::WHITE);
    }
    if cleared {
        let congrats = "CONGRATULATIONS!";
        let x = centered_x(&*s, congrats);
        s.text(x, cy + 30.0, congrats, palette::YELLOW);
    }

    let retry = "PRESS R OR TAP TO RESTART";
    let col = if state.frame % 30 < 15 { palette::YELLOW } else { palette::WHITE };
    let x = centered_x(&*s, retry);
    s.text(x, cy + 45.0, retry, col);
}
