//! Terminal Relic Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term crate.
//! The loop polls input until the next 16 ms tick, advances gravity by the
//! real elapsed time, and redraws only when the game or terminal changed.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use relic_tetris::core::{GameSnapshot, GameState};
use relic_tetris::input::{handle_key_event, should_quit};
use relic_tetris::term::{FrameBuffer, GameView, StatusLine, TerminalRenderer, Viewport};
use relic_tetris::types::{RuleSet, Variant, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "relic-tetris", version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    /// Rule set to play: classic, arsenal or relic
    #[arg(long, default_value = "relic")]
    variant: Variant,

    /// Seed for piece and relic draws (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON rule set file; overrides --variant
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn load_game(cli: &Cli) -> Result<GameState> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let Some(path) = &cli.rules else {
        return Ok(GameState::new(cli.variant, seed));
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rule set {}", path.display()))?;
    let rules: RuleSet = serde_json::from_str(&raw)
        .with_context(|| format!("parsing rule set {}", path.display()))?;
    GameState::with_rules(rules, seed).with_context(|| format!("invalid rule set {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Fail on bad configuration before touching the terminal.
    let game = load_game(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut status: Option<StatusLine> = None;
    // (revision, terminal size) of the frame on screen.
    let mut drawn: Option<(u64, (u16, u16))> = None;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        for event in game.drain_events() {
            if let Some(line) = StatusLine::from_event(&event) {
                status = Some(line);
            }
        }

        // Render.
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        if drawn != Some((game.revision(), size)) {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, status, Viewport::new(size.0, size.1), &mut fb);
            term.draw_swap(&mut fb)?;
            drawn = Some((game.revision(), size));
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply_command(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    drawn = None;
                }
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.advance(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }
    }
}
