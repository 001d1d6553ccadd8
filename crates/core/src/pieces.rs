//! Pieces module - piece catalog and rotation
//!
//! Each kind has a boolean shape matrix in its spawn orientation and a fixed
//! color. Rotation is a purely geometric transform of the bounding matrix:
//! there is no kick table, so a rotation that would collide is simply refused
//! by the session. Some rotations are impossible against a wall because of
//! this.

use arrayvec::ArrayVec;

use crate::types::{Color, PieceKind};

/// Largest bounding box of any catalog shape
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a filled cell inside a shape matrix: (column, row)
pub type CellOffset = (i32, i32);

/// Boolean shape matrix, at most 4x4.
///
/// Cells outside `rows × cols` are always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from row strings, `X` marks a filled cell.
    ///
    /// Panics on ragged rows or anything larger than 4x4; in the catalog
    /// constants that surfaces as a compile error.
    pub const fn from_rows(rows: &[&str]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM);

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < rows.len() {
            let bytes = rows[r].as_bytes();
            assert!(bytes.len() == cols, "ragged shape row");
            let mut c = 0;
            while c < cols {
                cells[r][c] = bytes[c] == b'X';
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    /// Number of columns (the "shape width" used for centering)
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Whether cell (col, row) is filled. Out-of-range cells are empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// All filled cells as (column, row) offsets, row-major.
    ///
    /// Stack-only: never allocates.
    pub fn filled_cells(&self) -> ArrayVec<CellOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }> {
        let mut out = ArrayVec::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                if self.cells[row][col] {
                    out.push((col as i32, row as i32));
                }
            }
        }
        out
    }
}

/// 90° clockwise rotation of a shape matrix.
///
/// Transposes then reverses every row: `new[i][j] = old[rows - 1 - j][i]`.
/// A non-square matrix comes back with its dimensions swapped.
pub fn rotate(shape: &ShapeMatrix) -> ShapeMatrix {
    let old_rows = shape.height();
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    for (i, new_row) in cells.iter_mut().enumerate().take(shape.width()) {
        for (j, cell) in new_row.iter_mut().enumerate().take(old_rows) {
            *cell = shape.cells[old_rows - 1 - j][i];
        }
    }
    ShapeMatrix {
        rows: shape.cols,
        cols: shape.rows,
        cells,
    }
}

/// Spawn-orientation shapes and colors, indexed in `PieceKind::ALL` order.
const CATALOG: [(ShapeMatrix, Color); 7] = [
    (
        ShapeMatrix::from_rows(&["....", "XXXX", "....", "...."]),
        Color::new(0x00, 0xff, 0xff),
    ),
    (
        ShapeMatrix::from_rows(&["X..", "XXX", "..."]),
        Color::new(0x00, 0x00, 0xff),
    ),
    (
        ShapeMatrix::from_rows(&["..X", "XXX", "..."]),
        Color::new(0xff, 0x7f, 0x00),
    ),
    (
        ShapeMatrix::from_rows(&["XX", "XX"]),
        Color::new(0xff, 0xff, 0x00),
    ),
    (
        ShapeMatrix::from_rows(&[".XX", "XX.", "..."]),
        Color::new(0x00, 0xff, 0x00),
    ),
    (
        ShapeMatrix::from_rows(&[".X.", "XXX", "..."]),
        Color::new(0x80, 0x00, 0x80),
    ),
    (
        ShapeMatrix::from_rows(&["XX.", ".XX", "..."]),
        Color::new(0xff, 0x00, 0x00),
    ),
];

/// Catalog lookup: spawn-orientation shape and display color of a kind.
pub fn catalog(kind: PieceKind) -> (ShapeMatrix, Color) {
    let idx = match kind {
        PieceKind::I => 0,
        PieceKind::J => 1,
        PieceKind::L => 2,
        PieceKind::O => 3,
        PieceKind::S => 4,
        PieceKind::T => 5,
        PieceKind::Z => 6,
    };
    CATALOG[idx]
}

/// A piece instance: kind plus its current orientation and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: Color,
}

impl Piece {
    /// Fresh piece in spawn orientation with its catalog color
    pub fn spawn(kind: PieceKind) -> Self {
        let (shape, color) = catalog(kind);
        Self { kind, shape, color }
    }

    /// This piece rotated 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate(&self.shape),
            ..*self
        }
    }
}
