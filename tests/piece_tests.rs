//! Tetromino shape and rotation properties.

use blockfall::core::Tetromino;
use blockfall::types::{PieceKind, ALL_KINDS};

#[test]
fn canonical_shapes_have_four_cells_in_bounds() {
    for kind in ALL_KINDS {
        let piece = Tetromino::new(kind);
        let blocks = piece.blocks();
        assert_eq!(blocks.len(), 4, "{:?}", kind);
        for (dx, dy) in blocks {
            assert!((dx as usize) < piece.size(), "{:?}", kind);
            assert!((dy as usize) < piece.size(), "{:?}", kind);
        }
    }
}

#[test]
fn rotation_has_cycle_order_dividing_four() {
    for kind in ALL_KINDS {
        let original = Tetromino::new(kind);
        let mut piece = original;
        for turn in 1..=4 {
            piece.rotate();
            if piece.matrix() == original.matrix() {
                assert!(
                    4 % turn == 0,
                    "{:?} repeated after {} turns",
                    kind,
                    turn
                );
            }
        }
        assert_eq!(piece.matrix(), original.matrix(), "{:?}", kind);
    }
}

#[test]
fn rotation_preserves_cell_count() {
    for kind in ALL_KINDS {
        let mut piece = Tetromino::new(kind);
        for _ in 0..4 {
            piece.rotate();
            assert_eq!(piece.blocks().len(), 4, "{:?}", kind);
        }
    }
}

#[test]
fn o_piece_never_changes() {
    let original = Tetromino::new(PieceKind::O);
    let mut piece = original;
    piece.rotate();
    assert_eq!(piece.matrix(), original.matrix());
}

#[test]
fn i_piece_alternates_between_row_and_column() {
    let mut piece = Tetromino::new(PieceKind::I);
    let horizontal = piece.blocks();
    assert!(horizontal.iter().all(|&(_, dy)| dy == 1));

    piece.rotate();
    assert!(piece.blocks().iter().all(|&(dx, _)| dx == 2));

    piece.rotate();
    assert!(piece.blocks().iter().all(|&(_, dy)| dy == 2));
}

#[test]
fn rotation_does_not_move_the_origin() {
    let mut piece = Tetromino::new(PieceKind::L);
    piece.x = 4;
    piece.y = 7;
    piece.rotate();
    assert_eq!((piece.x, piece.y), (4, 7));
}
