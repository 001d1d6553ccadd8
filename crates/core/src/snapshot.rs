use crate::game_state::ActivePiece;
use crate::pieces::ShapeMatrix;
use crate::types::{Cell, Color, GamePhase, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: Color,
    pub position: Position,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.piece.kind,
            shape: value.piece.shape,
            color: value.piece.color,
            position: value.position,
        }
    }
}

/// Which full-screen overlay the frontend should show.
///
/// Derived from the phase and score only, so impossible combinations such as
/// "intro and game over at once" cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    None,
    Intro,
    GameOver { final_score: u32 },
}

pub type BoardGrid = [[Cell; BOARD_WIDTH]; BOARD_HEIGHT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells only; see [`GameSnapshot::composited`]
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub phase: GamePhase,
    pub score: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::EMPTY; BOARD_WIDTH]; BOARD_HEIGHT];
        self.active = None;
        self.next = PieceKind::I;
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    /// Board grid with the active piece drawn on top.
    ///
    /// Active cells outside the grid (above the top edge) are skipped.
    pub fn composited(&self) -> BoardGrid {
        let mut grid = self.board;
        if let Some(active) = self.active {
            for &(dx, dy) in active.shape.filled_cells().iter() {
                let x = active.position.x + dx;
                let y = active.position.y + dy;
                if (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y) {
                    grid[y as usize][x as usize] = Cell::filled(active.color);
                }
            }
        }
        grid
    }

    pub fn overlay(&self) -> Overlay {
        match self.phase {
            GamePhase::NotStarted => Overlay::Intro,
            GamePhase::Running => Overlay::None,
            GamePhase::GameOver => Overlay::GameOver {
                final_score: self.score,
            },
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[Cell::EMPTY; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            next: PieceKind::I,
            phase: GamePhase::NotStarted,
            score: 0,
            lines: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    #[test]
    fn composited_draws_active_piece_over_board() {
        let piece = Piece::spawn(PieceKind::O);
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot::from(ActivePiece {
            piece,
            position: Position::new(3, -1),
        }));

        let grid = snap.composited();
        assert_eq!(grid[0][3], Cell::filled(piece.color));
        assert_eq!(grid[0][4], Cell::filled(piece.color));
        assert_eq!(grid.iter().flatten().filter(|c| c.filled).count(), 2);
        // The locked board is untouched.
        assert!(snap.board.iter().flatten().all(|c| !c.filled));
    }

    #[test]
    fn overlay_is_projection_of_phase() {
        let mut snap = GameSnapshot::default();
        assert_eq!(snap.overlay(), Overlay::Intro);

        snap.phase = GamePhase::Running;
        snap.score = 300;
        assert_eq!(snap.overlay(), Overlay::None);

        snap.phase = GamePhase::GameOver;
        assert_eq!(snap.overlay(), Overlay::GameOver { final_score: 300 });
    }
}
