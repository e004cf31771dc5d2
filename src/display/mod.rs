//! Rendering layer: all terminal I/O lives here.
//!
//! The game core draws in playfield units through the `Surface` trait. This
//! module rasterises those calls onto a grid of character cells and writes
//! the grid to the terminal in one pass per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use danmaku::context::Playfield;
use danmaku::entities::Vec2;
use danmaku::render::{palette, Surface};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

// ── Colour palette ────────────────────────────────────────────────────────────

fn color(col: u8) -> Color {
    match col {
        palette::BLACK => Color::Black,
        palette::NAVY => Color::DarkBlue,
        palette::PURPLE => Color::DarkMagenta,
        palette::GREEN => Color::DarkGreen,
        palette::BROWN => Color::DarkYellow,
        palette::DARK_BLUE => Color::Blue,
        palette::LIGHT_BLUE => Color::DarkCyan,
        palette::WHITE => Color::White,
        palette::RED => Color::Red,
        palette::ORANGE => Color::Rgb { r: 255, g: 140, b: 0 },
        palette::YELLOW => Color::Yellow,
        palette::LIME => Color::Green,
        palette::CYAN => Color::Cyan,
        palette::GRAY => Color::DarkGrey,
        palette::PINK => Color::Magenta,
        _ => Color::Grey,
    }
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface {
    field: Playfield,
    cols: usize,
    rows: usize,
    /// Cells per playfield unit along each axis.
    sx: f32,
    sy: f32,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    /// Fit `field` into a `term_cols`×`term_rows` terminal, keeping its
    /// aspect ratio.
    pub fn new(field: Playfield, term_cols: u16, term_rows: u16) -> Self {
        let avail_cols = term_cols.max(1) as f32;
        let avail_rows = term_rows.max(1) as f32;
        let mut sy = avail_rows / field.height;
        let mut sx = sy * CELL_ASPECT;
        if field.width * sx > avail_cols {
            sx = avail_cols / field.width;
            sy = sx / CELL_ASPECT;
        }
        let cols = ((field.width * sx) as usize).max(1);
        let rows = ((field.height * sy) as usize).max(1);
        Self {
            field,
            cols,
            rows,
            sx,
            sy,
            cells: vec![BLANK; cols * rows],
        }
    }

    /// Map a terminal cell back to the playfield point at its center.
    pub fn to_playfield(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            ((col as f32 + 0.5) / self.sx).clamp(0.0, self.field.width),
            ((row as f32 + 0.5) / self.sy).clamp(0.0, self.field.height),
        )
    }

    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (c, r) = ((x * self.sx).floor(), (y * self.sy).floor());
        if c < 0.0 || r < 0.0 {
            return None;
        }
        let (c, r) = (c as usize, r as usize);
        (c < self.cols && r < self.rows).then_some((c, r))
    }

    fn put(&mut self, x: f32, y: f32, ch: char, col: u8) {
        if let Some((c, r)) = self.cell_of(x, y) {
            self.cells[r * self.cols + c] = Cell { ch, fg: color(col) };
        }
    }

    /// Call `f` with the playfield-space center of every cell whose center
    /// lies in the box [x0, x1) × [y0, y1).
    fn cells_in(&self, x0: f32, y0: f32, x1: f32, y1: f32, mut f: impl FnMut(f32, f32)) {
        let c0 = (x0 * self.sx).floor().max(0.0) as usize;
        let r0 = (y0 * self.sy).floor().max(0.0) as usize;
        let c1 = ((x1 * self.sx).ceil().max(0.0) as usize).min(self.cols);
        let r1 = ((y1 * self.sy).ceil().max(0.0) as usize).min(self.rows);
        for r in r0..r1 {
            for c in c0..c1 {
                let px = (c as f32 + 0.5) / self.sx;
                let py = (r as f32 + 0.5) / self.sy;
                if px >= x0 && px < x1 && py >= y0 && py < y1 {
                    f(px, py);
                }
            }
        }
    }

    /// Write the whole grid, then park the cursor below it.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        out.queue(style::SetForegroundColor(current))?;
        for r in 0..self.rows {
            out.queue(cursor::MoveTo(0, r as u16))?;
            let mut run = String::with_capacity(self.cols);
            for cell in &self.cells[r * self.cols..(r + 1) * self.cols] {
                if cell.fg != current && cell.ch != ' ' {
                    out.queue(Print(std::mem::take(&mut run)))?;
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    current = cell.fg;
                }
                run.push(cell.ch);
            }
            out.queue(Print(run))?;
            out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows as u16))?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> f32 {
        self.field.width
    }

    fn height(&self) -> f32 {
        self.field.height
    }

    fn cls(&mut self, _col: u8) {
        self.cells.fill(BLANK);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8) {
        // Full-screen backdrops would hide everything drawn before them.
        if w >= self.field.width && h >= self.field.height {
            self.cells.fill(BLANK);
            return;
        }
        let mut hits = Vec::new();
        self.cells_in(x, y, x + w, y + h, |px, py| hits.push((px, py)));
        if hits.is_empty() {
            self.put(x, y, '█', col);
        }
        for (px, py) in hits {
            self.put(px, py, '█', col);
        }
    }

    fn rectb(&mut self, x: f32, y: f32, w: f32, h: f32, col: u8) {
        let (x1, y1) = (x + w - 1.0, y + h - 1.0);
        self.line(x, y, x1, y, col);
        self.line(x, y1, x1, y1, col);
        self.line(x, y, x, y1, col);
        self.line(x1, y, x1, y1, col);
    }

    fn circ(&mut self, x: f32, y: f32, r: f32, col: u8) {
        let mut hits = Vec::new();
        self.cells_in(x - r, y - r, x + r + 1.0, y + r + 1.0, |px, py| {
            if Vec2::new(px, py).distance(Vec2::new(x, y)) <= r {
                hits.push((px, py));
            }
        });
        if hits.is_empty() {
            self.put(x, y, '•', col);
        }
        for (px, py) in hits {
            self.put(px, py, '●', col);
        }
    }

    fn circb(&mut self, x: f32, y: f32, r: f32, col: u8) {
        let steps = ((r * std::f32::consts::TAU * self.sx.max(self.sy)).ceil() as usize).max(8);
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.put(x + a.cos() * r, y + a.sin() * r, '·', col);
        }
    }

    fn tri(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, col: u8) {
        let edge = |ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32| {
            (bx - ax) * (py - ay) - (by - ay) * (px - ax)
        };
        let (lx, hx) = (x1.min(x2).min(x3), x1.max(x2).max(x3));
        let (ly, hy) = (y1.min(y2).min(y3), y1.max(y2).max(y3));
        let mut hits = Vec::new();
        self.cells_in(lx, ly, hx + 1.0, hy + 1.0, |px, py| {
            let d1 = edge(x1, y1, x2, y2, px, py);
            let d2 = edge(x2, y2, x3, y3, px, py);
            let d3 = edge(x3, y3, x1, y1, px, py);
            let neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            if !(neg && pos) {
                hits.push((px, py));
            }
        });
        if hits.is_empty() {
            self.put((x1 + x2 + x3) / 3.0, (y1 + y2 + y3) / 3.0, '▲', col);
        }
        for (px, py) in hits {
            self.put(px, py, '▲', col);
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, col: u8) {
        let (dx, dy) = ((x2 - x1) * self.sx, (y2 - y1) * self.sy);
        let ch = if dy.abs() < 0.5 {
            '─'
        } else if dx.abs() < 0.5 {
            '│'
        } else {
            '·'
        };
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.put(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t, ch, col);
        }
    }

    fn pset(&mut self, x: f32, y: f32, col: u8) {
        // Only mark empty cells, so stars stay behind everything else.
        if let Some((c, r)) = self.cell_of(x, y) {
            let cell = &mut self.cells[r * self.cols + c];
            if cell.ch == ' ' {
                *cell = Cell { ch: '.', fg: color(col) };
            }
        }
    }

    fn text(&mut self, x: f32, y: f32, s: &str, col: u8) {
        let Some((c0, r)) = self.cell_of(x.max(0.0), y) else {
            return;
        };
        let fg = color(col);
        for (i, ch) in s.chars().enumerate() {
            let c = c0 + i;
            if c >= self.cols {
                break;
            }
            self.cells[r * self.cols + c] = Cell { ch, fg };
        }
    }

    fn blt(
        &mut self,
        x: f32,
        y: f32,
        _bank: u8,
        u: f32,
        _v: f32,
        w: f32,
        h: f32,
        _colkey: Option<u8>,
    ) {
        // Image bank 0: the ship at u = 0, the option pod at u = 8.
        let (ch, col) = if u == 0.0 {
            ('A', palette::WHITE)
        } else {
            ('o', palette::CYAN)
        };
        self.put(x + w / 2.0, y + h / 2.0, ch, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_fits_terminal() {
        let s = TerminalSurface::new(Playfield::new(240.0, 320.0), 200, 40);
        assert_eq!(s.rows, 40);
        assert!(s.cols <= 200);
    }

    #[test]
    fn mouse_cells_map_inside_playfield() {
        let s = TerminalSurface::new(Playfield::new(240.0, 320.0), 80, 40);
        let p = s.to_playfield(0, 0);
        assert!(p.x > 0.0 && p.y > 0.0);
        let q = s.to_playfield(500, 500);
        assert_eq!(q, Vec2::new(240.0, 320.0));
    }
}
