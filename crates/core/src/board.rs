//! Board module - manages the game grid
//!
//! The board is a 16x24 grid of cells, each either empty or filled with a
//! color. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..15 (left to right), y ranges 0..23
//! (top to bottom).
//!
//! Shape placements may reach above the top edge (y < 0). Those cells are
//! never out of bounds and never collide, which lets pieces spawn partially
//! above the visible grid.

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, Color, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The game board - 16 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Cell { filled: true, .. }))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.filled)
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH;
        &self.cells[start..start + BOARD_WIDTH]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    /// Whether `shape` placed at `pos` would be illegal.
    ///
    /// A filled shape cell collides when it lands left of column 0, right of
    /// the last column, at or below the bottom edge, or on a filled cell.
    /// Cells above the top edge are always free.
    pub fn collides(&self, shape: &ShapeMatrix, pos: Position) -> bool {
        shape.filled_cells().iter().any(|&(dx, dy)| {
            let x = pos.x + dx;
            let y = pos.y + dy;
            x < 0
                || x >= BOARD_WIDTH as i32
                || y >= BOARD_HEIGHT as i32
                || (y >= 0 && self.is_filled(x, y))
        })
    }

    /// Fill every in-bounds cell covered by `shape` at `pos` with `color`.
    ///
    /// Cells mapping outside the grid are dropped. No collision check is made;
    /// callers must have verified the placement first.
    pub fn stamp(&mut self, shape: &ShapeMatrix, pos: Position, color: Color) {
        for &(dx, dy) in shape.filled_cells().iter() {
            self.set(pos.x + dx, pos.y + dy, Cell::filled(color));
        }
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Remaining rows shift down keeping their relative order and the same
    /// number of empty rows appear at the top. Uses a two-pointer scan with
    /// zero allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * BOARD_WIDTH;
                    let dst_start = write_y * BOARD_WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + BOARD_WIDTH, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * BOARD_WIDTH].fill(Cell::EMPTY);

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Copy into a 2D grid (row-major, row 0 on top) for snapshots
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH]; BOARD_HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog;
    use crate::types::PieceKind;

    const RED: Color = Color::new(255, 0, 0);

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Cell::filled(RED));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(15, 0), Some(15));
        assert_eq!(Board::index(0, 1), Some(16));
        assert_eq!(Board::index(15, 23), Some(383));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(16, 0), None);
        assert_eq!(Board::index(0, 24), None);
    }

    #[test]
    fn test_collides_ignores_cells_above_top() {
        let board = Board::new();
        let (i, _) = catalog(PieceKind::I);
        // Row 1 of the I matrix is the filled one, so y = -1 puts it on row 0.
        assert!(!board.collides(&i, Position::new(0, -1)));
        // Entirely above the board is still fine.
        assert!(!board.collides(&i, Position::new(0, -5)));
    }

    #[test]
    fn test_collides_ignores_board_contents_above_top() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let (o, _) = catalog(PieceKind::O);
        assert!(!board.collides(&o, Position::new(4, -2)));
        assert!(board.collides(&o, Position::new(4, -1)));
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new();
        let (o, _) = catalog(PieceKind::O);
        assert!(board.collides(&o, Position::new(-1, 0)));
        assert!(board.collides(&o, Position::new(15, 0)));
        assert!(board.collides(&o, Position::new(0, 23)));
        assert!(!board.collides(&o, Position::new(14, 22)));
    }

    #[test]
    fn test_collides_only_on_filled_shape_cells() {
        let board = Board::new();
        let (i, _) = catalog(PieceKind::I);
        // Empty rows 2 and 3 of the I matrix may hang below the floor.
        assert!(!board.collides(&i, Position::new(0, 22)));
        assert!(board.collides(&i, Position::new(0, 23)));
    }

    #[test]
    fn test_stamp_drops_out_of_bounds_cells() {
        let mut board = Board::new();
        let (o, color) = catalog(PieceKind::O);
        board.stamp(&o, Position::new(0, -1), color);

        assert_eq!(board.get(0, 0), Some(Cell::filled(color)));
        assert_eq!(board.get(1, 0), Some(Cell::filled(color)));
        let filled = board.cells().iter().filter(|c| c.filled).count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_clear_full_rows_shifts_down() {
        let mut board = Board::new();
        fill_row(&mut board, 23);
        board.set(3, 22, Cell::filled(RED));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.get(3, 23), Some(Cell::filled(RED)));
        assert!(board.row(0).iter().all(|c| !c.filled));
        assert!(board.row(22).iter().all(|c| !c.filled));
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = Board::new();
        fill_row(&mut board, 23);
        fill_row(&mut board, 21);
        board.set(0, 22, Cell::filled(RED));
        board.set(5, 20, Cell::filled(RED));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(0, 23), Some(Cell::filled(RED)));
        assert_eq!(board.get(5, 22), Some(Cell::filled(RED)));
        assert_eq!(board.cells().iter().filter(|c| c.filled).count(), 2);
    }

    #[test]
    fn test_write_grid_matches_rows() {
        let mut board = Board::new();
        board.set(2, 5, Cell::filled(RED));
        let mut grid = [[Cell::EMPTY; BOARD_WIDTH]; BOARD_HEIGHT];
        board.write_grid(&mut grid);
        assert_eq!(grid[5][2], Cell::filled(RED));
        assert_eq!(grid[5][3], Cell::EMPTY);
    }
}
