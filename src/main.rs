mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use danmaku::compute::{init_state, reset_to_title, tick};
use danmaku::config::Balance;
use danmaku::context::Playfield;
use danmaku::entities::{GameState, SoundCue};
use danmaku::input::{Action, Controls};
use danmaku::render::{self, AudioSink};

use display::TerminalSurface;

#[derive(Parser, Debug)]
#[command(name = "danmaku", about = "Terminal danmaku boss fight")]
struct Args {
    /// JSON balance table overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a replayable match.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write logs here. Nothing is logged without it, the terminal belongs
    /// to the game.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Never ring the terminal bell.
    #[arg(long)]
    mute: bool,
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".danmaku_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    if let Err(err) = std::fs::write(high_score_path(), score.to_string()) {
        tracing::warn!(%err, "could not save high score");
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell for the loud cues. At most once per frame.
struct Bell {
    muted: bool,
    pending: bool,
}

impl AudioSink for Bell {
    fn play(&mut self, cue: SoundCue) {
        if !self.muted && matches!(cue, SoundCue::Explosion | SoundCue::Bomb | SoundCue::Hit) {
            self.pending = true;
        }
    }
}

impl Bell {
    fn ring<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if std::mem::take(&mut self.pending) {
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn key_action(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char(' ') => Action::Fire,
        KeyCode::Char('x') | KeyCode::Char('X') => Action::Bomb,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::Focus,
        KeyCode::Enter => Action::Start,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn handle_event(
    ev: Event,
    controls: &mut Controls,
    surface: &mut TerminalSurface,
    state: &GameState,
    frame: u64,
) {
    match ev {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                controls.press(Action::Quit, frame);
                return;
            }
            // Shift is only visible alongside another key on most terminals.
            if modifiers.contains(KeyModifiers::SHIFT) && kind != KeyEventKind::Release {
                controls.repeat(Action::Focus, frame);
            }
            let Some(action) = key_action(code) else {
                return;
            };
            match kind {
                KeyEventKind::Press => controls.press(action, frame),
                KeyEventKind::Repeat => controls.repeat(action, frame),
                KeyEventKind::Release => controls.release(action),
            }
        }
        Event::Mouse(MouseEvent { kind, column, row, .. }) => {
            let pos = surface.to_playfield(column, row);
            match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    controls.pointer_down(pos, frame, &state.balance)
                }
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    controls.pointer_move(pos)
                }
                MouseEventKind::Up(MouseButton::Left) => controls.pointer_up(),
                _ => {}
            }
        }
        Event::Resize(cols, rows) => {
            *surface = TerminalSurface::new(Playfield::from_balance(&state.balance), cols, rows);
        }
        _ => {}
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. Returns the final state.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
) -> Result<GameState> {
    let frame_time = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let field = Playfield::from_balance(&state.balance);
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(field, cols, rows);
    let mut controls = Controls::new();
    let mut bell = Bell {
        muted: args.mute,
        pending: false,
    };
    let mut saved_best = state.high_score;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            handle_event(ev, &mut controls, &mut surface, &state, frame);
        }

        let input = controls.frame_input(frame, state.player.center(), &state.balance);
        if input.quit {
            return Ok(state);
        }

        state = match panic::catch_unwind(AssertUnwindSafe(|| tick(&state, &input, &mut rng))) {
            Ok(next) => next,
            Err(_) => {
                tracing::error!(frame = state.frame, "frame update panicked, back to title");
                reset_to_title(&state)
            }
        };

        for &cue in &state.cues {
            bell.play(cue);
        }
        if state.high_score > saved_best && state.status.is_terminal() {
            saved_best = state.high_score;
            save_high_score(saved_best);
        }

        render::draw_frame(&state, &mut surface);
        surface.present(out)?;
        bell.ring(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// `RUST_LOG`-style directives; anything unparsable is dropped and an empty
/// set falls back to `info`.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let balance = match &args.config {
        Some(path) => Balance::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Balance::default(),
    };
    let state = init_state(balance, load_high_score());
    tracing::info!(seed = ?args.seed, fps = args.fps, "starting");

    // The default hook prints to a raw-mode screen; send panics to the log.
    panic::set_hook(Box::new(|info| tracing::error!(%info, "panic")));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key-release events where the terminal supports them; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, state, &rx, &args);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let final_state = result?;
    if final_state.high_score > load_high_score() {
        save_high_score(final_state.high_score);
    }
    tracing::info!(score = final_state.score, best = final_state.high_score, "bye");
    Ok(())
}
