//! Session: one game plus its collaborators, driven one frame at a time.
//!
//! The driver loop owns a `Session` and calls [`Session::frame`] with the
//! elapsed wall-clock time; everything else (event fan-out to feedback and
//! persistence, effect ageing, scheduling) happens here so the loop stays a
//! dumb clock.

use crate::core::game::{Game, GameEvent};
use crate::core::snapshot::RenderFrame;
use crate::engine::effects::Effects;
use crate::engine::scheduler::TickScheduler;
use crate::feedback::FeedbackSink;
use crate::store::ScoreStore;
use crate::types::GameAction;

pub struct Session<S: ScoreStore, F: FeedbackSink> {
    game: Game,
    effects: Effects,
    store: S,
    feedback: F,
}

impl<S: ScoreStore, F: FeedbackSink> Session<S, F> {
    /// Build a session, reading the persisted high score and mute flag.
    pub fn new(seed: u32, mut store: S, mut feedback: F) -> Self {
        let high_score = store.load_high_score();
        feedback.set_muted(store.load_muted());
        Self {
            game: Game::new(seed, high_score),
            effects: Effects::new(seed.wrapping_mul(0x9e37_79b9)),
            store,
            feedback,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn muted(&self) -> bool {
        self.feedback.is_muted()
    }

    pub fn start(&mut self) -> bool {
        let started = self.game.start();
        if started {
            self.effects.clear();
        }
        started
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            // Start goes through the session so stale effects are dropped.
            GameAction::Start => self.start(),
            _ => self.game.apply_action(action),
        }
    }

    pub fn acknowledge_reward(&mut self) -> bool {
        self.game.acknowledge_reward()
    }

    /// Flip and persist the mute flag; returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.feedback.is_muted();
        self.feedback.set_muted(muted);
        self.store.save_muted(muted);
        muted
    }

    /// Run one frame: age effects, advance the simulation, fan out events,
    /// and (re-)arm the scheduler. Returns the snapshot to render.
    pub fn frame(&mut self, elapsed_ms: u32, scheduler: &mut impl TickScheduler) -> RenderFrame {
        self.effects.age(elapsed_ms);
        self.game.tick(elapsed_ms);
        self.dispatch_events();

        if self.game.wants_ticks() {
            scheduler.schedule();
        } else {
            scheduler.cancel();
        }

        RenderFrame::capture(&self.game)
    }

    fn dispatch_events(&mut self) {
        for event in self.game.take_events() {
            match event {
                GameEvent::Moved => self.feedback.vibrate(&[10]),
                GameEvent::Locked => self.feedback.vibrate(&[30]),
                GameEvent::HardDropped { trails, .. } => {
                    self.effects.spawn_trails(&trails);
                    self.feedback.vibrate(&[30]);
                }
                GameEvent::ClearingStarted { rows } => {
                    // Rows are still on the board until the animation ends;
                    // grab their colors now.
                    self.effects.spawn_clear_particles(self.game.board(), &rows);
                }
                GameEvent::LinesCleared { count } => {
                    self.feedback.line_clear(count);
                    if count >= 4 {
                        self.feedback.vibrate(&[50, 30, 50, 30, 50]);
                    } else {
                        self.feedback.vibrate(&[50]);
                    }
                }
                GameEvent::NewHighScore { score } => self.store.save_high_score(score),
                GameEvent::GameOver { .. } => {
                    self.feedback.vibrate(&[200]);
                    self.feedback.game_over();
                }
            }
        }
    }

    #[cfg(test)]
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn feedback(&self) -> &F {
        &self.feedback
    }
}
