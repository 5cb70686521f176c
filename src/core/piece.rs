//! Tetromino pieces as square occupancy matrices.
//!
//! Each kind carries an N×N boolean matrix (N = 4 for I, 2 for O, 3 for the
//! rest) inside a fixed 4×4 storage box. Rotation is the in-place quarter-turn
//! `rotated[i][j] = original[N-1-j][i]`; whether the rotated placement is
//! legal is the caller's problem (see the wall-kick sequence in `core::game`).

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Fixed-size storage for the occupancy matrix. Only the top-left
/// `size × size` corner is meaningful.
pub type PieceMatrix = [[bool; 4]; 4];

/// An active falling piece: kind, rotation matrix, and board-relative origin.
/// `y` may be negative while the piece is partially above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    matrix: PieceMatrix,
    size: usize,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece with the canonical matrix for `kind` at origin (0, 0).
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: canonical_matrix(kind),
            size: kind.matrix_size(),
            x: 0,
            y: 0,
        }
    }

    /// Side length of the occupancy matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupied cells as `(dx, dy)` offsets from the piece origin.
    pub fn blocks(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for (r, row) in self.matrix.iter().take(self.size).enumerate() {
            for (c, &filled) in row.iter().take(self.size).enumerate() {
                if filled {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Rotate the matrix 90° clockwise in place.
    pub fn rotate(&mut self) {
        let n = self.size;
        let mut rotated = [[false; 4]; 4];
        for (i, row) in rotated.iter_mut().take(n).enumerate() {
            for (j, cell) in row.iter_mut().take(n).enumerate() {
                *cell = self.matrix[n - 1 - j][i];
            }
        }
        self.matrix = rotated;
    }

    /// The raw matrix, for restoring after a failed rotation.
    pub fn matrix(&self) -> PieceMatrix {
        self.matrix
    }

    /// Replace the matrix wholesale (failed-rotation revert path).
    pub fn set_matrix(&mut self, matrix: PieceMatrix) {
        self.matrix = matrix;
    }
}

/// Canonical spawn matrices, padded into the 4×4 storage box.
fn canonical_matrix(kind: PieceKind) -> PieceMatrix {
    let rows: &[&[u8]] = match kind {
        PieceKind::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        PieceKind::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    };

    let mut matrix = [[false; 4]; 4];
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            matrix[r][c] = v != 0;
        }
    }
    matrix
}
