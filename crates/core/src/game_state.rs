//! Game state module - the authoritative game session
//!
//! Ties together the board, the piece spawner and the scoring rules. The
//! session is a three-phase state machine (`NotStarted → Running → GameOver`)
//! driven one command at a time by the frontend: key presses and the gravity
//! timer both end up here.
//!
//! Locking is a single synchronous step: stamp the piece, clear full rows,
//! score them, then spawn the next piece. Rows are cleared even when the
//! following spawn is blocked and ends the game.

use tracing::{debug, info};

use crate::{
    board::Board,
    pieces::Piece,
    rng::{PieceSpawner, RandomSource, SimpleRng},
    scoring::{drop_interval_for_score, hard_drop_score, line_clear_score},
    snapshot::{ActiveSnapshot, GameSnapshot},
};
use crate::types::{
    GameCommand, GamePhase, LockEvent, Position, BOARD_WIDTH, INITIAL_DROP_INTERVAL_MS,
};

/// The falling piece together with its board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub position: Position,
}

/// Spawn position for a piece: horizontally centered, top row
pub fn spawn_position(piece: &Piece) -> Position {
    let x = (BOARD_WIDTH / 2) as i32 - (piece.shape.width() / 2) as i32;
    Position::new(x, 0)
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    board: Board,
    active: Option<ActivePiece>,
    /// One-piece lookahead, always materialized
    next: Piece,
    spawner: PieceSpawner<R>,
    phase: GamePhase,
    score: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession<SimpleRng> {
    /// Create a session drawing pieces from a seeded LCG
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create a new session in the `NotStarted` phase
    pub fn new(rng: R) -> Self {
        let mut spawner = PieceSpawner::new(rng);
        let next = spawner.next();

        Self {
            board: Board::new(),
            active: None,
            next,
            spawner,
            phase: GamePhase::NotStarted,
            score: 0,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece.
    ///
    /// Returns false unless the session was `NotStarted`.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        info!("game started");
        self.spawn_piece();
        true
    }

    /// Wipe the session back to `NotStarted`.
    ///
    /// Board, score, lines and speed return to their initial values. The
    /// random source keeps its state, so the piece stream continues.
    pub fn reset(&mut self) {
        info!(final_score = self.score, phase = self.phase.as_str(), "game reset");
        self.board.clear();
        self.active = None;
        self.next = self.spawner.next();
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.lines = 0;
        self.drop_interval_ms = INITIAL_DROP_INTERVAL_MS;
        self.last_event = None;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total lines cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity period; re-read after every command that can score
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// The score to record, once the game has ended
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == GamePhase::GameOver).then_some(self.score)
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// The queued piece shown in the preview
    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions
    #[cfg(any(test, feature = "test-support"))]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.kind;
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the queued piece to active and queue a fresh one.
    ///
    /// If the centered spawn position is already blocked the game ends and
    /// the piece is discarded without touching the board. Returns whether a
    /// piece is now active.
    pub fn spawn_piece(&mut self) -> bool {
        if self.phase != GamePhase::Running || self.active.is_some() {
            return false;
        }

        let piece = std::mem::replace(&mut self.next, self.spawner.next());
        let position = spawn_position(&piece);

        if self.board.collides(&piece.shape, position) {
            self.phase = GamePhase::GameOver;
            info!(score = self.score, lines = self.lines, "game over");
            return false;
        }

        self.active = Some(ActivePiece { piece, position });
        true
    }

    /// Try to move the active piece; the position only changes on success
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active_if_running() else {
            return false;
        };

        let target = active.position.offset(dx, dy);
        if self.board.collides(&active.piece.shape, target) {
            return false;
        }

        self.active = Some(ActivePiece {
            position: target,
            ..active
        });
        true
    }

    /// Rotate the active piece clockwise in place.
    ///
    /// There are no wall kicks: a rotation that collides is discarded.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active_if_running() else {
            return false;
        };

        let rotated = active.piece.rotated();
        if self.board.collides(&rotated.shape, active.position) {
            return false;
        }

        self.active = Some(ActivePiece {
            piece: rotated,
            ..active
        });
        true
    }

    /// Move down one row, locking the piece if it cannot move.
    ///
    /// Returns true if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.active_if_running().is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece(0);
        false
    }

    /// Gravity tick from the frontend timer
    pub fn tick(&mut self) -> bool {
        self.soft_drop()
    }

    /// Drop to the lowest legal row, award 2 points per row and lock.
    pub fn hard_drop(&mut self) -> bool {
        if self.active_if_running().is_none() {
            return false;
        }

        let mut distance: u32 = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }

        self.add_score(hard_drop_score(distance));
        self.lock_piece(distance);
        true
    }

    /// Apply a frontend command
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::Start => self.start(),
            GameCommand::Restart => {
                self.reset();
                true
            }
        }
    }

    fn active_if_running(&self) -> Option<ActivePiece> {
        if self.phase != GamePhase::Running {
            return None;
        }
        self.active
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.drop_interval_ms = drop_interval_for_score(self.score);
    }

    /// Stamp the active piece, clear rows, then spawn the next piece
    fn lock_piece(&mut self, hard_drop_distance: u32) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .stamp(&active.piece.shape, active.position, active.piece.color);

        let lines_cleared = self.board.clear_full_rows();
        let line_points = line_clear_score(lines_cleared);
        self.lines += lines_cleared as u32;
        self.add_score(line_points);

        self.spawn_piece();

        let event = LockEvent {
            hard_drop_distance,
            lines_cleared: lines_cleared as u32,
            score_gained: hard_drop_score(hard_drop_distance) + line_points,
            game_over: self.phase == GamePhase::GameOver,
        };
        debug!(
            kind = active.piece.kind.as_str(),
            x = active.position.x,
            y = active.position.y,
            lines = event.lines_cleared,
            score = self.score,
            "piece locked"
        );
        self.last_event = Some(event);
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
