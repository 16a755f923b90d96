//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{base_matrix, GameSnapshot, Matrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameEvent, GamePhase, PieceKind, Variant};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
/// Side panel stays readable even on narrow terminals.
const MIN_PANEL_WIDTH: u16 = 12;
const MAX_LISTED_RELICS: usize = 6;

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

/// One-line message below the side panel, built from the latest notable event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub label: &'static str,
    pub value: Option<u32>,
}

impl StatusLine {
    /// Status text for events worth surfacing; `None` for routine ones.
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        let (label, value) = match *event {
            GameEvent::PieceLocked {
                lines_cleared: 0, ..
            } => return None,
            GameEvent::PieceLocked { score_delta, .. } => ("CLEAR +", Some(score_delta)),
            GameEvent::LevelUp { level } => ("LEVEL UP", Some(level)),
            GameEvent::BombChargeGranted { charges } => ("BOMB READY", Some(charges)),
            GameEvent::BombDetonated { score_delta, .. } => ("BOOM +", Some(score_delta)),
            GameEvent::ShieldConsumed { remaining } => ("SHIELD! LEFT", Some(remaining)),
            GameEvent::RelicsOffered => ("PICK A RELIC", None),
            GameEvent::RelicAcquired { relic } => (relic.name(), None),
            GameEvent::GameOver => ("GAME OVER", None),
            GameEvent::Restarted => ("NEW GAME", None),
            GameEvent::HoldUsed { .. } | GameEvent::Paused | GameEvent::Resumed => return None,
        };
        Some(Self { label, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame placement inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for every variant's board size.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
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

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        status: Option<StatusLine>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = snap.width as u16 * self.cell_w;
        let board_px_h = snap.height as u16 * self.cell_h;
        let frame = Frame {
            w: board_px_w + 2,
            h: board_px_h + 2,
            x: viewport.width.saturating_sub(board_px_w + 2 + MIN_PANEL_WIDTH + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Settled cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_board_cell(fb, frame, x as i16, y as i16, *kind),
                    None => self.fill_cell_rect(
                        fb,
                        frame,
                        x as i16,
                        y as i16,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb::from(active.kind.color()).scaled(60), PLAY_BG).dim();
                for (dx, dy) in active.matrix.occupied() {
                    let (x, y) = (active.x as i16 + dx as i16, ghost_y as i16 + dy as i16);
                    self.fill_cell_rect(fb, frame, x, y, '░', ghost);
                }
            }
            for (dx, dy) in active.matrix.occupied() {
                let (x, y) = (active.x as i16 + dx as i16, active.y as i16 + dy as i16);
                self.draw_board_cell(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);

        match snap.phase {
            GamePhase::Playing => {}
            GamePhase::Paused => self.draw_overlay_lines(fb, frame, &["PAUSED", "P to resume"]),
            GamePhase::GameOver => {
                self.draw_overlay_lines(fb, frame, &["GAME OVER", "ENTER to restart"])
            }
            GamePhase::RelicSelection => self.draw_relic_offer(fb, snap, frame),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, status: Option<StatusLine>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
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

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from(kind.color()), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Paint one board cell; cells above the visible board are skipped.
    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, ch: char, style: CellStyle) {
        let cols = (frame.w - 2) / self.cell_w.max(1);
        let rows = (frame.h - 2) / self.cell_h.max(1);
        if x < 0 || y < 0 || x as u16 >= cols || y as u16 >= rows {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: Option<StatusLine>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let stats = snap.stats;
        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", stats.score),
            ("LEVEL", stats.level),
            ("LINES", stats.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        if stats.combo > 1 {
            let end = fb.put_str(panel_x, y, "COMBO x", label);
            fb.put_u32(end, y, stats.combo, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = self.draw_preview(fb, panel_x, y + 1, snap.next);

        if snap.tunables.hold_limit > 0 {
            fb.put_str(panel_x, y, "HOLD", label);
            let end = fb.put_str(panel_x + 5, y, "(", dim);
            let end = fb.put_u32(end, y, snap.holds_left as u32, dim);
            fb.put_str(end, y, ")", dim);
            y = match snap.hold {
                Some(kind) => self.draw_preview(fb, panel_x, y + 1, kind),
                None => {
                    fb.put_str(panel_x, y + 1, "-", value);
                    y.saturating_add(3)
                }
            };
        }

        if snap.variant != Variant::Classic {
            let end = fb.put_str(panel_x, y, "BOMBS ", label);
            fb.put_u32(end, y, stats.bomb_charges, value);
            y = y.saturating_add(1);
        }
        if stats.shields > 0 {
            let end = fb.put_str(panel_x, y, "SHIELDS ", label);
            fb.put_u32(end, y, stats.shields, value);
            y = y.saturating_add(1);
        }

        if !snap.acquired_relics.is_empty() {
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, "RELICS", label);
            for relic in snap.acquired_relics.iter().rev().take(MAX_LISTED_RELICS) {
                y = y.saturating_add(1);
                fb.put_str(panel_x, y, relic.name(), dim);
            }
            y = y.saturating_add(1);
        }

        if let Some(status) = status {
            y = y.saturating_add(1);
            if y < viewport.height {
                let end = fb.put_str(panel_x, y, status.label, label);
                if let Some(v) = status.value {
                    fb.put_u32(end.saturating_add(1), y, v, value);
                }
            }
        }
    }

    /// Mini rendering of a piece's spawn shape. Returns the row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) -> u16 {
        let matrix: Matrix = base_matrix(kind);
        let style = CellStyle::new(Rgb::from(kind.color()), PANEL_BG);
        for (dx, dy) in matrix.occupied() {
            let px = x + dx as u16 * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
        y.saturating_add(matrix.rows() as u16 + 1)
    }

    fn draw_relic_offer(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let body = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let inner_x = frame.x + 1;
        let inner_w = frame.w.saturating_sub(2);

        let lines = 2 + snap.relic_offer.len() as u16 * 3;
        let mut y = frame.y + frame.h.saturating_sub(lines) / 2;
        fb.fill_rect(inner_x, y, inner_w, lines, ' ', body);
        self.put_centered(fb, frame, y, "CHOOSE A RELIC", title);
        y += 2;

        for (i, card) in snap.relic_offer.iter().enumerate() {
            let end = fb.put_u32(inner_x + 1, y, i as u32 + 1, title);
            fb.put_str(end + 1, y, card.name, title);
            put_clipped(fb, inner_x + 3, y + 1, inner_w.saturating_sub(4), card.description, body);
            y += 3;
        }
    }

    fn draw_overlay_lines(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        for (i, text) in lines.iter().enumerate() {
            let s = if i == 0 { style } else { CellStyle { bold: false, ..style } };
            self.put_centered(fb, frame, mid_y + i as u16, text, s);
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

/// Write at most `max` chars of `text`.
fn put_clipped(fb: &mut FrameBuffer, x: u16, y: u16, max: u16, text: &str, style: CellStyle) {
    for (i, ch) in text.chars().take(max as usize).enumerate() {
        fb.put_char(x + i as u16, y, ch, style);
    }
}
