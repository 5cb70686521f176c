//! Game state machine - ties together board, pieces, RNG, and scoring.
//!
//! Owns the complete session state and every rule transition: spawn, move,
//! rotate, drops, lock delay, line-clear animation, scoring, leveling, pause,
//! reward acknowledgment, and game over. Pure and deterministic; the engine
//! layer feeds it elapsed time and drains its events.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::piece::Tetromino;
use crate::core::rng::SimpleRng;
use crate::core::scoring::{combo_bonus, drop_interval_ms, level_for_lines, line_clear_points};
use crate::types::{
    GameAction, PieceKind, BASE_DROP_MS, BOARD_WIDTH, CLEAR_ANIM_MS, LOCK_DELAY_MS,
};

/// Column segment left behind by a hard drop, one per filled matrix cell.
/// Presentation fades these out; the core only describes the fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailSpec {
    pub x: i8,
    pub start_y: i8,
    pub end_y: i8,
    pub kind: PieceKind,
}

/// Notifications for the collaborators (renderer effects, audio/haptics,
/// persistence). Drained once per frame by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Active piece shifted sideways.
    Moved,
    /// Active piece fixed onto the board.
    Locked,
    HardDropped {
        distance: u32,
        trails: ArrayVec<TrailSpec, 4>,
    },
    /// A lock completed these rows; the clear animation has started.
    ClearingStarted { rows: ArrayVec<usize, 4> },
    /// Clear animation finished and the rows were removed.
    LinesCleared { count: u32 },
    NewHighScore { score: u32 },
    GameOver { score: u32 },
}

/// In-progress line-clear animation: the matched rows and time left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAnimation {
    pub rows: ArrayVec<usize, 4>,
    pub remaining_ms: u32,
}

impl ClearAnimation {
    /// Flicker phase for the about-to-clear rows: six alternations over the
    /// animation's lifetime.
    pub fn flash_on(&self) -> bool {
        let progress = 1.0 - self.remaining_ms as f32 / CLEAR_ANIM_MS as f32;
        (progress * 6.0) as u32 % 2 == 0
    }
}

/// Complete game session state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<Tetromino>,
    next: Option<PieceKind>,
    rng: SimpleRng,

    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    high_score: u32,

    running: bool,
    paused: bool,
    game_over: bool,
    reward_pending: bool,

    drop_counter_ms: u32,
    drop_interval_ms: u32,
    lock_timer_ms: u32,
    clearing: Option<ClearAnimation>,

    events: Vec<GameEvent>,
}

impl Game {
    /// Create an idle session. `high_score` comes from the persistence
    /// collaborator; the core only updates it as the score changes.
    pub fn new(seed: u32, high_score: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            rng: SimpleRng::new(seed),
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            high_score,
            running: false,
            paused: false,
            game_over: false,
            reward_pending: false,
            drop_counter_ms: 0,
            drop_interval_ms: BASE_DROP_MS,
            lock_timer_ms: LOCK_DELAY_MS,
            clearing: None,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn reward_pending(&self) -> bool {
        self.reward_pending
    }

    pub fn clearing(&self) -> Option<&ClearAnimation> {
        self.clearing.as_ref()
    }

    pub fn drop_interval(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    /// Whether the scheduler should keep requesting ticks.
    pub fn wants_ticks(&self) -> bool {
        self.running && !self.paused
    }

    /// Take every event emitted since the last drain.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Begin (or restart) a session. No-op while a game is in progress.
    pub fn start(&mut self) -> bool {
        if self.running && !self.game_over {
            return false;
        }

        self.board.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.running = true;
        self.paused = false;
        self.game_over = false;
        self.reward_pending = false;
        self.drop_counter_ms = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.clearing = None;
        self.events.clear();

        self.next = Some(self.rng.next_kind());
        self.spawn();
        true
    }

    /// Promote the lookahead piece to active and draw a new lookahead.
    ///
    /// Centers the piece horizontally at the top edge and re-arms the
    /// lock-delay countdown. A blocked spawn position ends the game without
    /// touching the board.
    fn spawn(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.rng.next_kind(),
        };
        self.next = Some(self.rng.next_kind());

        let mut piece = Tetromino::new(kind);
        piece.x = (BOARD_WIDTH as i8) / 2 - (piece.size() as i8) / 2;
        piece.y = 0;
        self.lock_timer_ms = LOCK_DELAY_MS;

        let blocked = !self.board.is_valid_position(&piece);
        self.active = Some(piece);
        if blocked {
            self.end_game();
        }
    }

    fn playable(&self) -> bool {
        self.running && !self.paused && self.clearing.is_none()
    }

    /// Shift the active piece one column left or right.
    pub fn move_piece(&mut self, dir: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.x += dir;
        if !self.board.is_valid_position(&piece) {
            return false;
        }

        self.active = Some(piece);
        self.lock_timer_ms = LOCK_DELAY_MS;
        self.push_event(GameEvent::Moved);
        true
    }

    /// Rotate the active piece clockwise, wall-kicking if needed.
    ///
    /// Kick sequence: accept in place, else one column left, else one column
    /// right of the original spot. When none fits the rotation fails
    /// wholesale and the piece keeps its matrix and position.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.rotate();
        for dx in [0, -1, 2] {
            piece.x += dx;
            if self.board.is_valid_position(&piece) {
                self.active = Some(piece);
                self.lock_timer_ms = LOCK_DELAY_MS;
                return true;
            }
        }
        false
    }

    /// Advance the active piece one row. Never locks; the lock-delay
    /// countdown alone decides when a grounded piece settles.
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.y += 1;
        let moved = self.board.is_valid_position(&piece);
        if moved {
            self.active = Some(piece);
        }
        self.drop_counter_ms = 0;
        moved
    }

    /// Drop the active piece to its landing row and lock immediately,
    /// bypassing lock delay. Emits one trail descriptor per filled cell.
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        let start_y = piece.y;
        loop {
            piece.y += 1;
            if !self.board.is_valid_position(&piece) {
                piece.y -= 1;
                break;
            }
        }
        let end_y = piece.y;
        self.active = Some(piece);

        if end_y > start_y {
            let mut trails = ArrayVec::new();
            for (dx, dy) in piece.blocks() {
                trails.push(TrailSpec {
                    x: piece.x + dx,
                    start_y: start_y + dy,
                    end_y: end_y + dy,
                    kind: piece.kind,
                });
            }
            self.push_event(GameEvent::HardDropped {
                distance: (end_y - start_y) as u32,
                trails,
            });
        }

        self.lock();
        self.drop_counter_ms = 0;
        true
    }

    /// Fix the active piece onto the board and handle completed lines.
    fn lock(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        self.board.lock(&piece);
        self.push_event(GameEvent::Locked);

        let full = self.board.full_lines();
        if full.is_empty() {
            self.combo = 0;
            self.spawn();
        } else {
            // Spawning is suspended until the animation finishes; the locked
            // cells render as part of the board, so the piece goes away.
            self.active = None;
            self.push_event(GameEvent::ClearingStarted { rows: full.clone() });
            self.clearing = Some(ClearAnimation {
                rows: full,
                remaining_ms: CLEAR_ANIM_MS,
            });
        }
    }

    /// Remove the matched rows, score them, and spawn the next piece.
    fn finish_clearing(&mut self) {
        let Some(anim) = self.clearing.take() else {
            return;
        };

        let cleared = self.board.remove_lines(&anim.rows);
        self.combo += 1;
        self.apply_clear_score(cleared);
        self.spawn();
    }

    /// Scoring for one completed clear: award table at the pre-clear level,
    /// combo bonus, then lines/level/gravity bookkeeping and the reward
    /// pause.
    fn apply_clear_score(&mut self, cleared: usize) {
        if cleared == 0 {
            return;
        }

        self.score += line_clear_points(cleared, self.level);
        self.score += combo_bonus(self.combo, self.level);

        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_ms(self.level);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }

        self.push_event(GameEvent::LinesCleared {
            count: cleared as u32,
        });

        // Reward pause: ticking stops until the player acknowledges.
        self.paused = true;
        self.reward_pending = true;
    }

    /// Flip the pause flag. Ignored while idle, over, or waiting on a reward
    /// acknowledgment.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running || self.game_over || self.reward_pending {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// External acknowledgment of the reward overlay; resumes play.
    pub fn acknowledge_reward(&mut self) -> bool {
        if !self.reward_pending {
            return false;
        }
        self.reward_pending = false;
        self.paused = false;
        true
    }

    fn end_game(&mut self) {
        self.running = false;
        self.game_over = true;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }
        self.push_event(GameEvent::GameOver { score: self.score });
    }

    /// Advance timers by `elapsed_ms`: clear animation first, then gravity,
    /// then the lock-delay countdown. Returns whether the scheduler should
    /// re-arm.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.wants_ticks() {
            return false;
        }

        // Clear animation suspends gravity and locking entirely.
        if let Some(anim) = &mut self.clearing {
            if anim.remaining_ms > elapsed_ms {
                anim.remaining_ms -= elapsed_ms;
            } else {
                self.finish_clearing();
            }
            return self.wants_ticks();
        }

        // Gravity.
        self.drop_counter_ms += elapsed_ms;
        if self.drop_counter_ms > self.drop_interval_ms {
            self.soft_drop();
        }

        // Lock delay: counts down only while the piece cannot fall; any
        // frame where it can fall re-arms the full grace period.
        if let Some(piece) = self.active {
            let mut probe = piece;
            probe.y += 1;
            if self.board.is_valid_position(&probe) {
                self.lock_timer_ms = LOCK_DELAY_MS;
            } else {
                self.lock_timer_ms = self.lock_timer_ms.saturating_sub(elapsed_ms);
                if self.lock_timer_ms == 0 {
                    self.lock();
                }
            }
        }

        self.wants_ticks()
    }

    /// Route a player action to the matching operation.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
        }
    }

    /// Landing row for the active piece: projected straight down until
    /// invalid, then stepped back one.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let mut probe = piece;
        loop {
            probe.y += 1;
            if !self.board.is_valid_position(&probe) {
                return Some(probe.y - 1);
            }
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active(&mut self, piece: Tetromino) {
        self.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BOARD_HEIGHT;

    fn started_game() -> Game {
        let mut game = Game::new(12345, 0);
        game.start();
        game
    }

    fn ground_active(game: &mut Game) {
        while game.soft_drop() {}
    }

    /// Fill row `y` except the columns in `gaps`.
    fn fill_row_except(game: &mut Game, y: i8, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                game.board_mut().set(x, y, Some(PieceKind::I));
            }
        }
    }

    /// Park a horizontal I piece above a bottom row missing its four columns,
    /// so the next hard drop clears exactly one line.
    fn stage_single_clear(game: &mut Game) {
        let mut piece = Tetromino::new(PieceKind::I);
        piece.x = 3;
        piece.y = 10;
        game.set_active(piece);
        fill_row_except(game, BOARD_HEIGHT as i8 - 1, &[3, 4, 5, 6]);
    }

    #[test]
    fn start_spawns_active_and_lookahead() {
        let game = started_game();
        assert!(game.running());
        assert!(!game.game_over());
        assert!(game.active().is_some());
        assert!(game.next_kind().is_some());
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.drop_interval(), BASE_DROP_MS);
    }

    #[test]
    fn start_is_noop_while_running() {
        let mut game = started_game();
        game.move_piece(1);
        let x = game.active().unwrap().x;
        assert!(!game.start());
        assert_eq!(game.active().unwrap().x, x);
    }

    #[test]
    fn spawn_centers_piece_at_top() {
        let game = started_game();
        let piece = game.active().unwrap();
        assert_eq!(piece.x, (BOARD_WIDTH as i8) / 2 - (piece.size() as i8) / 2);
        assert_eq!(piece.y, 0);
    }

    /// Block the spawn area with a known layout: rows 0-1 filled except two
    /// cells in column 0, and a T piece parked inside it.
    fn stage_blocked_spawn(game: &mut Game) {
        for y in 0..2 {
            fill_row_except(game, y, &[0]);
        }
        let mut piece = Tetromino::new(PieceKind::T);
        piece.x = 4;
        piece.y = 0;
        game.set_active(piece);
    }

    #[test]
    fn blocked_spawn_sets_over_flag_and_leaves_board_alone() {
        let mut game = started_game();
        stage_blocked_spawn(&mut game);
        let before = game.board().clone();

        // The T cannot descend, so it locks in place; the following spawn
        // collides and ends the game.
        game.hard_drop();

        assert!(game.game_over());
        assert!(!game.running());

        // Only the four locked T cells differ from the staged board; the
        // failed spawn wrote nothing.
        let mut diff = 0;
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if game.board().get(x, y) != before.get(x, y) {
                    diff += 1;
                }
            }
        }
        assert_eq!(diff, 4);
        assert!(game
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn start_resets_after_game_over() {
        let mut game = started_game();
        stage_blocked_spawn(&mut game);
        game.hard_drop();
        assert!(game.game_over());

        assert!(game.start());
        assert!(game.running());
        assert!(!game.game_over());
        assert_eq!(game.board().occupied_count(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.active().is_some());
    }

    #[test]
    fn move_reverts_at_walls() {
        let mut game = started_game();
        for _ in 0..BOARD_WIDTH {
            game.move_piece(-1);
        }
        let x = game.active().unwrap().x;
        assert!(!game.move_piece(-1));
        assert_eq!(game.active().unwrap().x, x);
    }

    #[test]
    fn successful_move_rearms_lock_delay() {
        let mut game = started_game();
        ground_active(&mut game);
        game.tick(100);
        assert_eq!(game.lock_timer_ms(), LOCK_DELAY_MS - 100);

        // Sliding while grounded restores the full grace period.
        let moved = game.move_piece(1) || game.move_piece(-1);
        assert!(moved);
        assert_eq!(game.lock_timer_ms(), LOCK_DELAY_MS);
    }

    #[test]
    fn wall_kick_tries_left_then_right() {
        let mut game = started_game();

        // T pointing right, flush against the left wall, with the cell below
        // its stem blocked so the in-place and left kicks both fail.
        let mut piece = Tetromino::new(PieceKind::T);
        piece.rotate(); // east: blocks (1,0),(1,1),(2,1),(1,2)
        piece.x = 0;
        piece.y = 10;
        game.set_active(piece);
        game.board_mut().set(0, 11, Some(PieceKind::I));

        assert!(game.rotate());
        // Accepted on the third offset: net one column right.
        assert_eq!(game.active().unwrap().x, 1);
    }

    #[test]
    fn failed_rotation_restores_matrix_and_position() {
        let mut game = started_game();

        let mut piece = Tetromino::new(PieceKind::T);
        piece.rotate();
        piece.x = 0;
        piece.y = 10;
        let original = piece;
        game.set_active(piece);
        // Block the rotated footprint in place, and one column right; one
        // column left is the wall.
        game.board_mut().set(0, 11, Some(PieceKind::I));
        game.board_mut().set(3, 11, Some(PieceKind::I));

        assert!(!game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.x, original.x);
        assert_eq!(active.matrix(), original.matrix());
    }

    #[test]
    fn soft_drop_never_locks() {
        let mut game = started_game();
        ground_active(&mut game);
        let occupied = game.board().occupied_count();

        // Repeated failed soft drops leave the piece floating on lock delay.
        for _ in 0..10 {
            assert!(!game.soft_drop());
        }
        assert!(game.active().is_some());
        assert_eq!(game.board().occupied_count(), occupied);
    }

    #[test]
    fn gravity_advances_piece_after_interval() {
        let mut game = started_game();
        let y = game.active().unwrap().y;
        // Strictly-greater comparison: exactly the interval is not enough.
        game.tick(BASE_DROP_MS);
        assert_eq!(game.active().unwrap().y, y);
        game.tick(1);
        assert_eq!(game.active().unwrap().y, y + 1);
    }

    #[test]
    fn lock_delay_counts_down_only_when_grounded() {
        let mut game = started_game();
        game.tick(100);
        assert_eq!(game.lock_timer_ms(), LOCK_DELAY_MS);

        ground_active(&mut game);
        game.tick(200);
        assert_eq!(game.lock_timer_ms(), LOCK_DELAY_MS - 200);

        game.tick(LOCK_DELAY_MS);
        // Countdown expired: the piece locked and a fresh one spawned.
        assert!(game.board().occupied_count() >= 4);
        assert_eq!(game.lock_timer_ms(), LOCK_DELAY_MS);
    }

    #[test]
    fn hard_drop_locks_immediately_with_trails() {
        let mut game = started_game();
        assert!(game.hard_drop());
        assert!(game.board().occupied_count() >= 4);

        let events = game.take_events();
        let dropped = events
            .iter()
            .find_map(|e| match e {
                GameEvent::HardDropped { distance, trails } => Some((*distance, trails.clone())),
                _ => None,
            })
            .expect("hard drop event");
        assert!(dropped.0 > 0);
        assert_eq!(dropped.1.len(), 4);
        for trail in &dropped.1 {
            assert_eq!((trail.end_y - trail.start_y) as u32, dropped.0);
        }
        assert!(events.iter().any(|e| matches!(e, GameEvent::Locked)));
    }

    #[test]
    fn completing_a_row_starts_the_clear_animation() {
        let mut game = started_game();
        stage_single_clear(&mut game);
        game.hard_drop();

        let anim = game.clearing().expect("clear animation");
        assert_eq!(anim.rows.as_slice(), &[BOARD_HEIGHT as usize - 1]);
        assert_eq!(anim.remaining_ms, CLEAR_ANIM_MS);
        assert!(game.active().is_none());
        assert!(game
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ClearingStarted { .. })));

        // Input is rejected while the animation runs.
        assert!(!game.move_piece(1));
        assert!(!game.rotate());
        assert!(!game.soft_drop());
    }

    #[test]
    fn finishing_a_clear_scores_and_enters_reward_pause() {
        let mut game = started_game();
        stage_single_clear(&mut game);
        game.hard_drop();
        game.take_events();

        // Run out the animation in two ticks.
        assert!(game.tick(CLEAR_ANIM_MS / 2));
        assert!(game.clearing().is_some());
        assert!(!game.tick(CLEAR_ANIM_MS / 2));

        assert!(game.clearing().is_none());
        assert_eq!(game.score(), 40);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.combo(), 1);
        assert_eq!(game.high_score(), 40);
        assert!(game.reward_pending());
        assert!(game.paused());
        assert!(game.active().is_some());

        let events = game.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::LinesCleared { count: 1 })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { score: 40 })));

        // Acknowledgment resumes play.
        assert!(game.acknowledge_reward());
        assert!(!game.paused());
        assert!(game.wants_ticks());
    }

    #[test]
    fn combo_bonus_applies_from_second_consecutive_clear() {
        let mut game = started_game();

        for expected_combo in 1..=2u32 {
            stage_single_clear(&mut game);
            game.hard_drop();
            game.tick(CLEAR_ANIM_MS);
            assert_eq!(game.combo(), expected_combo);
            game.acknowledge_reward();
        }

        // 40, then 40 + 50*2 at level 1.
        assert_eq!(game.score(), 180);
    }

    #[test]
    fn lock_without_clear_resets_combo() {
        let mut game = started_game();
        stage_single_clear(&mut game);
        game.hard_drop();
        game.tick(CLEAR_ANIM_MS);
        game.acknowledge_reward();
        assert_eq!(game.combo(), 1);

        game.hard_drop();
        assert_eq!(game.combo(), 0);
    }

    #[test]
    fn four_line_clear_pays_the_big_award() {
        let mut game = started_game();
        let mut piece = Tetromino::new(PieceKind::I);
        piece.rotate(); // vertical bar on matrix column 2
        piece.x = 7; // lands on board column 9
        piece.y = 0;
        game.set_active(piece);
        for dy in 0..4 {
            fill_row_except(&mut game, BOARD_HEIGHT as i8 - 1 - dy, &[9]);
        }
        game.hard_drop();

        let anim = game.clearing().expect("clear animation");
        assert_eq!(anim.rows.len(), 4);
        game.tick(CLEAR_ANIM_MS);

        assert_eq!(game.score(), 1200);
        assert_eq!(game.lines(), 4);
    }

    #[test]
    fn leveling_speeds_up_gravity() {
        let mut game = started_game();
        for _ in 0..10 {
            stage_single_clear(&mut game);
            game.hard_drop();
            game.tick(CLEAR_ANIM_MS);
            game.acknowledge_reward();
        }

        assert_eq!(game.lines(), 10);
        assert_eq!(game.level(), 2);
        assert_eq!(game.drop_interval(), BASE_DROP_MS - 100);
    }

    #[test]
    fn pause_stops_ticks_and_input() {
        let mut game = started_game();
        assert!(game.toggle_pause());
        assert!(game.paused());
        assert!(!game.wants_ticks());
        assert!(!game.tick(1000));
        assert!(!game.move_piece(1));
        assert!(!game.hard_drop());

        assert!(game.toggle_pause());
        assert!(game.wants_ticks());
    }

    #[test]
    fn pause_is_rejected_during_reward() {
        let mut game = started_game();
        stage_single_clear(&mut game);
        game.hard_drop();
        game.tick(CLEAR_ANIM_MS);
        assert!(game.reward_pending());

        assert!(!game.toggle_pause());
        assert!(game.paused());
    }

    #[test]
    fn ghost_projects_to_landing_row() {
        let game = started_game();
        let ghost = game.ghost_y().expect("ghost for active piece");
        let active_y = game.active().unwrap().y;
        assert!(ghost >= active_y);

        let mut probe = *game.active().unwrap();
        probe.y = ghost;
        assert!(game.board().is_valid_position(&probe));
        probe.y = ghost + 1;
        assert!(!game.board().is_valid_position(&probe));
    }

    #[test]
    fn high_score_only_updates_when_beaten() {
        let mut game = Game::new(9, 500);
        game.start();
        assert_eq!(game.high_score(), 500);

        stage_single_clear(&mut game);
        game.hard_drop();
        game.tick(CLEAR_ANIM_MS);
        // 40 points does not beat 500.
        assert_eq!(game.high_score(), 500);
        assert!(!game
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. })));
    }

    #[test]
    fn flash_phase_alternates_over_the_animation() {
        let mut phases = Vec::new();
        for step in 0..6 {
            let anim = ClearAnimation {
                rows: ArrayVec::from_iter([19]),
                remaining_ms: CLEAR_ANIM_MS - step * (CLEAR_ANIM_MS / 6) - 1,
            };
            phases.push(anim.flash_on());
        }
        assert!(phases.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn apply_action_routes_to_operations() {
        let mut game = started_game();
        let x = game.active().unwrap().x;
        assert!(game.apply_action(GameAction::MoveRight));
        assert_eq!(game.active().unwrap().x, x + 1);
        assert!(game.apply_action(GameAction::MoveLeft));
        assert_eq!(game.active().unwrap().x, x);
        assert!(game.apply_action(GameAction::SoftDrop));
        assert!(game.apply_action(GameAction::Pause));
        assert!(game.paused());
    }
}
