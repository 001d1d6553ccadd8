use blockfall::core::{GameSession, GameSnapshot, ScriptedRng};
use blockfall::scores::{Leaderboard, ScoreRecord};
use blockfall::term::{AnchorY, GameView, Rgb, ScoreBoardView, Viewport};
use blockfall::types::{Cell, Color, GamePhase, PieceKind};

fn running_snapshot(next: PieceKind) -> GameSnapshot {
    let mut session = GameSession::new(ScriptedRng::from_kinds(&[PieceKind::T, next]));
    session.start();
    session.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = running_snapshot(PieceKind::O);
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 16*2 by 24*1 => 32x24
    // plus border => 34x26
    let fb = view.render(&snap, None, Viewport::new(34, 26));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(33, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 25).unwrap().ch, '└');
    assert_eq!(fb.get(33, 25).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = running_snapshot(PieceKind::O);
    snap.board[23][0] = Cell::filled(Color::new(0x00, 0xff, 0xff));
    snap.active = None;

    let fb = GameView::default().render(&snap, None, Viewport::new(34, 26));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 23;
    for x in [1, 2] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(0x00, 0xff, 0xff));
    }
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece() {
    let snap = running_snapshot(PieceKind::O);
    let fb = GameView::default().render(&snap, None, Viewport::new(34, 26));

    // T spawns at x=7: its top cell is board (8, 0).
    let cell = fb.get(1 + 8 * 2, 1).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, Rgb::new(0x80, 0x00, 0x80));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = running_snapshot(PieceKind::O);
    snap.score = 1234;
    snap.lines = 10;
    snap.drop_interval_ms = 900;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, None, Viewport::new(80, 30));

    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("1234"));
    assert!(fb.contains_text("LINES"));
    assert!(fb.contains_text("SPEED"));
    assert!(fb.contains_text("900ms"));
    assert!(fb.contains_text("NEXT"));
    assert!(!fb.contains_text("HIGH SCORES"));
}

#[test]
fn term_view_previews_next_piece() {
    let snap = running_snapshot(PieceKind::O);
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, None, Viewport::new(80, 30));

    let next_y = (0..fb.height())
        .find(|&y| fb.row_text(y).contains("NEXT"))
        .unwrap();
    let row = fb.row_text(next_y);
    let panel_x = row.chars().position(|c| c == 'N').unwrap() as u16;

    // O preview: 2x2 cells, 2 columns each.
    for dy in 1..=2 {
        for dx in 0..4 {
            let cell = fb.get(panel_x + dx, next_y + dy).unwrap();
            assert_eq!(cell.ch, '█');
            assert_eq!(cell.style.fg, Rgb::new(0xff, 0xff, 0x00));
        }
    }
}

#[test]
fn term_view_intro_overlay_before_start() {
    let snap = GameSession::with_seed(1).snapshot();
    assert_eq!(snap.phase, GamePhase::NotStarted);

    let fb = GameView::default().render(&snap, None, Viewport::new(80, 30));
    assert!(fb.contains_text("BLOCKFALL"));
    assert!(fb.contains_text("ENTER to start"));
    assert!(!fb.contains_text("GAME OVER"));
}

#[test]
fn term_view_game_over_overlay_and_leaderboard() {
    let mut snap = running_snapshot(PieceKind::O);
    snap.phase = GamePhase::GameOver;
    snap.score = 4321;

    let mut board = Leaderboard::new();
    board.insert(ScoreRecord::new("grace", 9000));
    let rank = board.insert(ScoreRecord::new("ada", 4321));
    let scores = ScoreBoardView {
        leaderboard: &board,
        last_rank: rank,
    };

    let fb = GameView::default().render(&snap, Some(&scores), Viewport::new(80, 30));
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("SCORE 4321"));
    assert!(fb.contains_text("HIGH SCORE RANK 2"));
    assert!(fb.contains_text("R to restart"));
    assert!(fb.contains_text("HIGH SCORES"));
    assert!(fb.contains_text("grace"));
    assert!(fb.contains_text("9000"));
}

#[test]
fn term_view_running_has_no_overlay() {
    let snap = running_snapshot(PieceKind::O);
    let fb = GameView::default().render(&snap, None, Viewport::new(80, 30));
    assert!(!fb.contains_text("ENTER to start"));
    assert!(!fb.contains_text("GAME OVER"));
}
