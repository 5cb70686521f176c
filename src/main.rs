//! Terminal runner: the display-driven loop that paces the session.
//!
//! Owns the wall clock and the terminal; everything stateful lives in
//! [`Session`]. The loop polls input with a timeout until the next frame is
//! due, runs one session frame, and draws the snapshot.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::engine::{Session, TickScheduler};
use blockfall::feedback::TerminalFeedback;
use blockfall::input::{action_for_key, is_mute_toggle, should_quit, InputHandler};
use blockfall::store::{FileStore, MemoryStore, ScoreStore};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// RNG seed for the piece sequence; random when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// Board cell width in terminal columns.
    #[arg(long, default_value = "2", value_name = "COLS")]
    cell_width: u16,

    /// Start with sound muted.
    #[arg(long)]
    muted: bool,

    /// Do not read or write the high-score file.
    #[arg(long)]
    no_store: bool,
}

/// Ceiling on a single frame delta, so a stall never turns into a gravity
/// burst.
const MAX_FRAME_MS: u32 = 100;

/// How often to repaint while nothing is ticking (pause, reward, menus).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The display loop's end of the scheduling seam: a single re-arm flag.
#[derive(Debug, Default)]
struct FramePacer {
    armed: bool,
}

impl TickScheduler for FramePacer {
    fn schedule(&mut self) {
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &args);
    // Always restore the terminal, even on error.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let store: Box<dyn ScoreStore> = if args.no_store {
        Box::new(MemoryStore::default())
    } else {
        Box::new(FileStore::new())
    };

    let seed = args.seed.unwrap_or_else(random_seed);
    let mut session = Session::new(seed, store, TerminalFeedback::default());
    if args.muted && !session.muted() {
        session.toggle_mute();
    }

    let view = GameView::new(args.cell_width, 1);
    let mut input = InputHandler::new();
    let mut pacer = FramePacer::default();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // One session frame when due; a zero delta keeps overlays fresh
        // while nothing is ticking.
        let elapsed = last_frame.elapsed();
        if elapsed >= tick || !pacer.armed {
            let elapsed_ms = if pacer.armed {
                (elapsed.as_millis() as u32).min(MAX_FRAME_MS)
            } else {
                0
            };
            last_frame = Instant::now();
            input.advance(elapsed_ms);

            let frame = session.frame(elapsed_ms, &mut pacer);
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let fb = view.render(&frame, session.effects(), session.muted(), Viewport::new(w, h));
            term.draw(&fb)?;
        }

        // Sleep on input until the next frame is due.
        let timeout = if pacer.armed {
            tick.saturating_sub(last_frame.elapsed())
        } else {
            IDLE_POLL
        };

        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if is_mute_toggle(key) {
                    session.toggle_mute();
                    continue;
                }

                // The reward overlay swallows the next key as its
                // acknowledgment.
                if session.game().reward_pending() {
                    session.acknowledge_reward();
                    last_frame = Instant::now();
                    continue;
                }

                if let Some(action) = action_for_key(key).and_then(|a| input.filter(a)) {
                    let was_ticking = session.game().wants_ticks();
                    session.apply_action(action);
                    // Fresh baseline when play (re)starts, so paused
                    // wall-clock time never counts as elapsed.
                    if !was_ticking && session.game().wants_ticks() {
                        last_frame = Instant::now();
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            Event::FocusLost => {
                // Losing the terminal is the visibility-change analogue.
                if session.game().wants_ticks() {
                    session.apply_action(GameAction::Pause);
                }
            }
            _ => {}
        }
    }
}

fn random_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
