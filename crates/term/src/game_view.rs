//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{catalog, GameSnapshot, Overlay};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scores::Leaderboard;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Leaderboard data shown next to the board.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBoardView<'a> {
    pub leaderboard: &'a Leaderboard,
    /// Rank the last finished game earned, if it made the table.
    pub last_rank: Option<usize>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// One overlay line: a label optionally followed by a number.
#[derive(Clone, Copy)]
struct OverlayLine {
    text: &'static str,
    value: Option<u32>,
    style: CellStyle,
}

impl OverlayLine {
    fn width(&self) -> u16 {
        let text = self.text.chars().count() as u16;
        match self.value {
            Some(v) => text + 1 + digit_count(v),
            None => text,
        }
    }
}

/// Board placement for one frame.
#[derive(Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scores: Option<&ScoreBoardView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Leave room for the side panel when the terminal is wide enough.
        let total_w = frame_w + 2 + PANEL_MIN_W;
        let start_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Frame {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, frame, border);

        // Locked cells with the active piece on top.
        let grid = snap.composited();
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_board_cell(fb, frame, x as u16, y as u16, *cell);
            }
        }

        self.draw_side_panel(fb, snap, scores, viewport, frame);

        match snap.overlay() {
            Overlay::None => {}
            Overlay::Intro => self.draw_overlay(fb, frame, &intro_lines()),
            Overlay::GameOver { final_score } => {
                let rank = scores.and_then(|s| s.last_rank);
                self.draw_overlay(fb, frame, &game_over_lines(final_score, rank));
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        scores: Option<&ScoreBoardView<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scores, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, cell: Cell) {
        let (ch, style) = match cell.color {
            Some(color) if cell.filled => ('█', CellStyle::new(color.into(), PLAY_BG).bold()),
            _ => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim()),
        };
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: Option<&ScoreBoardView<'_>>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, snap.drop_interval_ms, value);
        fb.put_str(end, y, "ms", dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let (shape, color) = catalog(snap.next);
        let style = CellStyle::new(color.into(), SCREEN_BG).bold();
        for (dx, dy) in shape.filled_cells() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
        y = y.saturating_add(shape.height() as u16 * self.cell_h + 1);

        let Some(scores) = scores else {
            return;
        };
        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        if scores.leaderboard.is_empty() {
            fb.put_str(panel_x, y, "-", dim);
            return;
        }
        for (rank, record) in scores.leaderboard.records().iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let style = if scores.last_rank == Some(rank) {
                value.bold()
            } else {
                value
            };
            let x = fb.put_u32(panel_x, y, rank as u32 + 1, dim);
            let x = fb.put_str(x + 1, y, truncate(&record.name, NAME_W), style);
            let score_x = (panel_x + 3 + NAME_W as u16).max(x + 1);
            fb.put_u32(score_x, y, record.score, style);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[OverlayLine]) {
        let box_bg = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);
        let inner_w = lines.iter().map(OverlayLine::width).max().unwrap_or(0);
        let box_w = (inner_w + 4).min(frame.w);
        let box_h = (lines.len() as u16 + 2).min(frame.h);
        let box_x = frame.x + (frame.w - box_w) / 2;
        let box_y = frame.y + (frame.h - box_h) / 2;
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', box_bg);

        for (i, line) in lines.iter().enumerate() {
            let y = box_y + 1 + i as u16;
            let x = frame.x + frame.w.saturating_sub(line.width()) / 2;
            let end = fb.put_str(x, y, line.text, line.style);
            if let Some(v) = line.value {
                fb.put_u32(end + 1, y, v, line.style);
            }
        }
    }
}

const PANEL_MIN_W: u16 = 12;
const NAME_W: usize = 8;

fn title_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold()
}

fn text_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG)
}

fn line(text: &'static str, style: CellStyle) -> OverlayLine {
    OverlayLine {
        text,
        value: None,
        style,
    }
}

fn intro_lines() -> [OverlayLine; 8] {
    let text = text_style();
    [
        line("BLOCKFALL", title_style()),
        line("", text),
        line("←/→  move", text),
        line("↑    rotate", text),
        line("↓    soft drop", text),
        line("SPACE hard drop", text),
        line("", text),
        line("ENTER to start  Q to quit", title_style()),
    ]
}

fn game_over_lines(final_score: u32, rank: Option<usize>) -> [OverlayLine; 5] {
    let text = text_style();
    let rank_line = match rank {
        Some(r) => OverlayLine {
            text: "HIGH SCORE RANK",
            value: Some(r as u32 + 1),
            style: title_style(),
        },
        None => line("", text),
    };
    [
        line("GAME OVER", title_style()),
        OverlayLine {
            text: "SCORE",
            value: Some(final_score),
            style: text,
        },
        rank_line,
        line("", text),
        line("R to restart", text),
    ]
}

fn digit_count(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, GamePhase};

    fn running() -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::Running,
            drop_interval_ms: 1000,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(4_294_967_295), 10);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdefghij", 8), "abcdefgh");
        assert_eq!(truncate("ab", 8), "ab");
        assert_eq!(truncate("ééééé", 2), "éé");
    }

    #[test]
    fn filled_cell_uses_catalog_color() {
        let mut snap = running();
        let yellow = Color::new(255, 255, 0);
        snap.board[BOARD_HEIGHT - 1][0] = Cell::filled(yellow);

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, None, Viewport::new(80, 30));

        // Two columns per cell, inside the border.
        let start_x = (80 - (34 + 2 + PANEL_MIN_W)) / 2;
        for dx in 0..2 {
            let cell = fb.get(start_x + 1 + dx, BOARD_HEIGHT as u16).unwrap();
            assert_eq!(cell.ch, '█');
            assert_eq!(cell.style.fg, Rgb::new(255, 255, 0));
        }
    }

    #[test]
    fn game_over_overlay_shows_rank() {
        let mut snap = running();
        snap.phase = GamePhase::GameOver;
        snap.score = 1200;

        let board = Leaderboard::new();
        let scores = ScoreBoardView {
            leaderboard: &board,
            last_rank: Some(0),
        };
        let fb = GameView::default().render(&snap, Some(&scores), Viewport::new(80, 30));
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("SCORE 1200"));
        assert!(fb.contains_text("HIGH SCORE RANK 1"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, None, Viewport::new(10, 5));
        assert_eq!((fb.width(), fb.height()), (10, 5));
    }
}
