//! GameView: maps a render snapshot plus live effects into a framebuffer.
//!
//! Pure (no I/O), so the layout and overlays are unit-testable.

use crate::core::snapshot::RenderFrame;
use crate::engine::effects::Effects;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAY_BG: Rgb = Rgb::new(24, 24, 34);
const FLASH_WHITE: Rgb = Rgb::new(255, 255, 255);

/// Draws the playfield, effects, side panel, and overlays.
pub struct GameView {
    /// Board cell width in terminal columns (2 compensates glyph aspect).
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn render(
        &self,
        frame: &RenderFrame,
        effects: &Effects,
        muted: bool,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::plain(Rgb::new(70, 70, 84), PLAY_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', bg);

        // A four-line clear flashes the border, the terminal stand-in for a
        // screen shake.
        let border_color = if frame.clearing_rows.len() == 4 && frame.flash_on {
            FLASH_WHITE
        } else {
            Rgb::new(200, 200, 200)
        };
        self.draw_border(
            &mut fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(border_color, Rgb::new(0, 0, 0)),
        );

        self.draw_trails(&mut fb, effects, start_x, start_y);
        self.draw_board(&mut fb, frame, start_x, start_y);
        self.draw_ghost(&mut fb, frame, start_x, start_y);
        self.draw_active(&mut fb, frame, start_x, start_y);
        self.draw_particles(&mut fb, effects, start_x, start_y);
        self.draw_side_panel(&mut fb, frame, muted, viewport, start_x, start_y, frame_w);
        self.draw_overlays(&mut fb, frame, start_x, start_y, frame_w, frame_h);

        fb
    }

    fn cell_origin(&self, start_x: u16, start_y: u16, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            start_x + 1 + (x as u16) * self.cell_w,
            start_y + 1 + (y as u16) * self.cell_h,
        ))
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if let Some((px, py)) = self.cell_origin(start_x, start_y, x, y) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
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

    fn draw_board(&self, fb: &mut FrameBuffer, frame: &RenderFrame, start_x: u16, start_y: u16) {
        for y in 0..BOARD_HEIGHT as i8 {
            let flashing = frame.flash_on && frame.clearing_rows.contains(&(y as usize));
            for x in 0..BOARD_WIDTH as i8 {
                match frame.board.get(x, y).flatten() {
                    Some(kind) => {
                        let fg = if flashing {
                            FLASH_WHITE
                        } else {
                            kind.color().into()
                        };
                        self.fill_cell(
                            fb,
                            start_x,
                            start_y,
                            x,
                            y,
                            '█',
                            CellStyle::plain(fg, PLAY_BG),
                        );
                    }
                    None => {
                        let dot = CellStyle::plain(Rgb::new(52, 52, 66), PLAY_BG);
                        self.fill_cell(fb, start_x, start_y, x, y, '·', dot);
                    }
                }
            }
        }
    }

    fn draw_trails(&self, fb: &mut FrameBuffer, effects: &Effects, start_x: u16, start_y: u16) {
        for trail in effects.trails() {
            let style = CellStyle::plain(
                Rgb::from(trail.color).scaled(0.4 * trail.fade()),
                PLAY_BG,
            );
            for y in trail.start_y..trail.end_y {
                self.fill_cell(fb, start_x, start_y, trail.x, y, '░', style);
            }
        }
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, frame: &RenderFrame, start_x: u16, start_y: u16) {
        let (Some(piece), Some(ghost_y)) = (&frame.active, frame.ghost_y) else {
            return;
        };
        // Skip the ghost when it overlaps the piece itself.
        if ghost_y == piece.y {
            return;
        }
        let style = CellStyle::plain(Rgb::from(piece.kind.color()).scaled(0.35), PLAY_BG);
        for (dx, dy) in piece.blocks() {
            self.fill_cell(fb, start_x, start_y, piece.x + dx, ghost_y + dy, '▒', style);
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, frame: &RenderFrame, start_x: u16, start_y: u16) {
        let Some(piece) = &frame.active else {
            return;
        };
        let style = CellStyle {
            fg: piece.kind.color().into(),
            bg: PLAY_BG,
            bold: true,
        };
        for (dx, dy) in piece.blocks() {
            self.fill_cell(fb, start_x, start_y, piece.x + dx, piece.y + dy, '█', style);
        }
    }

    fn draw_particles(&self, fb: &mut FrameBuffer, effects: &Effects, start_x: u16, start_y: u16) {
        for p in effects.particles() {
            let x = p.x.floor() as i32;
            let y = p.y.floor() as i32;
            if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
                continue;
            }
            let style = CellStyle::plain(Rgb::from(p.color).scaled(p.life), PLAY_BG);
            if let Some((px, py)) = self.cell_origin(start_x, start_y, x as i8, y as i8) {
                fb.put_char(px, py, '•', style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: &RenderFrame,
        muted: bool,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x + 10 >= viewport.width {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle::plain(Rgb::new(190, 190, 190), Rgb::new(0, 0, 0));

        let mut y = start_y;
        let mut stat = |fb: &mut FrameBuffer, name: &str, text: String| {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &text, value);
            y += 3;
        };

        stat(fb, "SCORE", frame.score.to_string());
        stat(fb, "HIGH", frame.high_score.to_string());
        stat(fb, "LEVEL", frame.level.to_string());
        stat(fb, "LINES", frame.lines.to_string());
        if frame.combo > 1 {
            stat(fb, "COMBO", format!("x{}", frame.combo));
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(kind) = frame.next {
            self.draw_preview(fb, kind, panel_x, y);
            y += kind.matrix_size() as u16;
        }

        if muted {
            fb.put_str(panel_x, y + 1, "MUTED", CellStyle::plain(Rgb::new(120, 120, 120), Rgb::new(0, 0, 0)));
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) {
        let piece = crate::core::piece::Tetromino::new(kind);
        let style = CellStyle::plain(kind.color().into(), Rgb::new(0, 0, 0));
        for (dx, dy) in piece.blocks() {
            let px = x + (dx as u16) * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlays(
        &self,
        fb: &mut FrameBuffer,
        frame: &RenderFrame,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let center = |fb: &mut FrameBuffer, dy: u16, text: &str| {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            let style = CellStyle {
                fg: FLASH_WHITE,
                bg: Rgb::new(0, 0, 0),
                bold: true,
            };
            fb.put_str(x, start_y + frame_h / 2 + dy, text, style);
        };

        if frame.game_over {
            center(fb, 0, " GAME OVER ");
            center(fb, 1, " ENTER TO RESTART ");
        } else if frame.reward_pending {
            center(fb, 0, " LINE CLEAR! ");
            center(fb, 1, " ANY KEY TO CONTINUE ");
        } else if frame.paused {
            center(fb, 0, " PAUSED ");
        } else if !frame.running {
            center(fb, 0, " ENTER TO PLAY ");
        }
    }
}
