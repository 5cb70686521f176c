//! Core types shared across the application.
//! Pure data, no external dependencies.

/// Board dimensions in cells.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Target frame cadence for the driver loop (milliseconds).
pub const TICK_MS: u32 = 16;

/// Gravity timing: base interval, per-level speedup, and floor (milliseconds).
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 100;
pub const DROP_FLOOR_MS: u32 = 100;

/// Grace period before a grounded piece locks (milliseconds).
pub const LOCK_DELAY_MS: u32 = 500;

/// Duration of the line-clear flicker animation (milliseconds).
pub const CLEAR_ANIM_MS: u32 = 400;

/// Lifetime of a hard-drop trail (milliseconds).
pub const TRAIL_FADE_MS: u32 = 200;

/// Minimum interval between accepted hard drops (milliseconds).
pub const HARD_DROP_DEBOUNCE_MS: u32 = 150;

/// Line clear awards indexed by lines-cleared-in-one-lock, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Combo bonus base: `COMBO_BASE * combo * level` once combo exceeds 1.
pub const COMBO_BASE: u32 = 50;

/// Upper bound on live line-clear particles.
pub const MAX_PARTICLES: usize = 200;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

/// All kinds, in draw order for the randomizer.
pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::J,
    PieceKind::L,
    PieceKind::O,
    PieceKind::S,
    PieceKind::T,
    PieceKind::Z,
];

impl PieceKind {
    /// Fill color as 24-bit RGB.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (56, 189, 248),
            PieceKind::J => (129, 140, 248),
            PieceKind::L => (251, 146, 60),
            PieceKind::O => (250, 204, 21),
            PieceKind::S => (74, 222, 128),
            PieceKind::T => (192, 132, 252),
            PieceKind::Z => (248, 113, 113),
        }
    }

    /// Bounding matrix size (N of the N×N occupancy matrix).
    pub const fn matrix_size(self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }
}

/// Cell on the board (`None` = empty, `Some` = filled with piece kind).
pub type Cell = Option<PieceKind>;

/// Player-visible game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Pause,
    Start,
}
