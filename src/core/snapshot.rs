//! Render snapshot: everything the presentation layer needs for one frame.
//!
//! The renderer never touches `Game` directly; the session hands it one of
//! these per frame, so draw code cannot mutate simulation state.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::game::Game;
use crate::core::piece::Tetromino;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub board: Board,
    pub active: Option<Tetromino>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    /// Rows currently in the clear animation, plus the flicker phase.
    pub clearing_rows: ArrayVec<usize, 4>,
    pub flash_on: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub high_score: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub reward_pending: bool,
}

impl RenderFrame {
    pub fn capture(game: &Game) -> Self {
        let (clearing_rows, flash_on) = match game.clearing() {
            Some(anim) => (anim.rows.clone(), anim.flash_on()),
            None => (ArrayVec::new(), false),
        };

        Self {
            board: game.board().clone(),
            active: game.active().copied(),
            ghost_y: game.ghost_y(),
            next: game.next_kind(),
            clearing_rows,
            flash_on,
            score: game.score(),
            level: game.level(),
            lines: game.lines(),
            combo: game.combo(),
            high_score: game.high_score(),
            running: game.running(),
            paused: game.paused(),
            game_over: game.game_over(),
            reward_pending: game.reward_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reflects_game_state() {
        let mut game = Game::new(42, 123);
        game.start();
        let frame = RenderFrame::capture(&game);

        assert!(frame.running);
        assert!(!frame.game_over);
        assert_eq!(frame.high_score, 123);
        assert_eq!(frame.level, 1);
        assert!(frame.active.is_some());
        assert!(frame.next.is_some());
        assert!(frame.clearing_rows.is_empty());
        assert_eq!(frame.ghost_y, game.ghost_y());
    }

    #[test]
    fn capture_is_detached_from_the_game() {
        let mut game = Game::new(42, 0);
        game.start();
        let frame = RenderFrame::capture(&game);
        let x_before = frame.active.unwrap().x;

        game.move_piece(1);
        assert_eq!(frame.active.unwrap().x, x_before);
    }
}
