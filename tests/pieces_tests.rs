//! Piece catalog and rotation tests

use blockfall::core::{catalog, rotate, Piece, ShapeMatrix};
use blockfall::types::{Color, PieceKind};

fn cells(shape: &ShapeMatrix) -> Vec<(i32, i32)> {
    shape.filled_cells().to_vec()
}

#[test]
fn test_catalog_dimensions() {
    let dims = |kind| {
        let (shape, _) = catalog(kind);
        (shape.width(), shape.height())
    };
    assert_eq!(dims(PieceKind::I), (4, 4));
    assert_eq!(dims(PieceKind::O), (2, 2));
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(dims(kind), (3, 3), "{kind:?}");
    }
}

#[test]
fn test_catalog_colors() {
    let expected = [
        (PieceKind::I, "#00ffff"),
        (PieceKind::J, "#0000ff"),
        (PieceKind::L, "#ff7f00"),
        (PieceKind::O, "#ffff00"),
        (PieceKind::S, "#00ff00"),
        (PieceKind::T, "#800080"),
        (PieceKind::Z, "#ff0000"),
    ];
    for (kind, hex) in expected {
        let (_, color) = catalog(kind);
        assert_eq!(color, Color::from_hex(hex).unwrap(), "{kind:?}");
        assert_eq!(color.to_string(), hex);
    }
}

#[test]
fn test_every_piece_has_four_cells() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::spawn(kind);
        for _ in 0..4 {
            assert_eq!(piece.shape.filled_cells().len(), 4, "{kind:?}");
            piece = piece.rotated();
        }
    }
}

#[test]
fn test_spawn_orientations() {
    let (i, _) = catalog(PieceKind::I);
    assert_eq!(cells(&i), [(0, 1), (1, 1), (2, 1), (3, 1)]);

    let (j, _) = catalog(PieceKind::J);
    assert_eq!(cells(&j), [(0, 0), (0, 1), (1, 1), (2, 1)]);

    let (s, _) = catalog(PieceKind::S);
    assert_eq!(cells(&s), [(1, 0), (2, 0), (0, 1), (1, 1)]);
}

#[test]
fn test_rotate_is_clockwise() {
    // .X.      .X.
    // XXX  ->  .XX
    // ...      .X.
    let (t, _) = catalog(PieceKind::T);
    let r = rotate(&t);
    assert_eq!(cells(&r), [(1, 0), (1, 1), (2, 1), (1, 2)]);

    // The horizontal I becomes vertical in column 2.
    let (i, _) = catalog(PieceKind::I);
    assert_eq!(cells(&rotate(&i)), [(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_rotate_non_square_swaps_dimensions() {
    let bar = ShapeMatrix::from_rows(&["XXX"]);
    let r = rotate(&bar);
    assert_eq!((r.width(), r.height()), (1, 3));
    assert_eq!(cells(&r), [(0, 0), (0, 1), (0, 2)]);
    assert_eq!(rotate(&rotate(&rotate(&r))), bar);
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in PieceKind::ALL {
        let (shape, _) = catalog(kind);
        let back = rotate(&rotate(&rotate(&rotate(&shape))));
        assert_eq!(back, shape, "{kind:?}");
    }
}

#[test]
fn test_o_rotation_is_identity() {
    let o = Piece::spawn(PieceKind::O);
    assert_eq!(o.rotated(), o);
}

#[test]
fn test_rotated_keeps_kind_and_color() {
    let z = Piece::spawn(PieceKind::Z);
    let r = z.rotated();
    assert_eq!(r.kind, PieceKind::Z);
    assert_eq!(r.color, z.color);
    assert_ne!(r.shape, z.shape);
}
