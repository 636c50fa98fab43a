//! TetrisView: maps a [`TetrisSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{ActiveSnapshot, TetrisSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb, Viewport};
use crate::types::{Color, PieceKind, PlayfieldState};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

/// Terminal renderer for the Tetris playfield.
pub struct TetrisView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for TetrisView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl TetrisView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &TetrisSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame_w = snap.width * self.cell_w + 2;
        let frame_h = snap.height + 2;
        let (start_x, start_y) = viewport.centre(frame_w, frame_h);

        fb.draw_border(start_x, start_y, frame_w, frame_h, CellStyle::fg(Rgb::new(200, 200, 200)));

        let empty = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim();
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(usize::from(x), usize::from(y)).flatten() {
                    Some(color) => self.paint(fb, start_x, start_y, x, y, '█', Self::block(color)),
                    None => self.paint(fb, start_x, start_y, x, y, '·', empty),
                }
            }
        }

        if let Some(ghost) = &snap.ghost {
            let style = CellStyle::fg(Rgb::new(140, 140, 140)).on(PLAY_BG).dim();
            self.paint_piece(fb, snap, start_x, start_y, ghost, '░', style);
        }
        if let Some(active) = &snap.active {
            let style = Self::block(active.kind.color());
            self.paint_piece(fb, snap, start_x, start_y, active, '█', style);
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        let banner = match snap.state {
            PlayfieldState::Paused => Some("PAUSED"),
            PlayfieldState::Lost => Some("GAME OVER"),
            PlayfieldState::Ready => Some("READY"),
            PlayfieldState::Running => None,
        };
        if let Some(text) = banner {
            let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
            fb.put_centered(start_x, frame_w, start_y + frame_h / 2, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &TetrisSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn block(color: Color) -> CellStyle {
        CellStyle::fg(color_rgb(color)).on(PLAY_BG).bold()
    }

    #[allow(clippy::too_many_arguments)]
    fn paint(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + x * self.cell_w;
        fb.fill_rect(px, start_y + 1 + y, self.cell_w, 1, ch, style);
    }

    // Blocks still in the buffer (y < 0) are not drawn.
    #[allow(clippy::too_many_arguments)]
    fn paint_piece(
        &self,
        fb: &mut FrameBuffer,
        snap: &TetrisSnapshot,
        start_x: u16,
        start_y: u16,
        piece: &ActiveSnapshot,
        ch: char,
        style: CellStyle,
    ) {
        for &(x, y) in &piece.blocks {
            if x >= 0 && y >= 0 && x < i32::from(snap.width) && y < i32::from(snap.height) {
                self.paint(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &TetrisSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let rows: [(&str, String); 6] = [
            ("SCORE", snap.score.to_string()),
            ("LEVEL", snap.level.to_string()),
            ("LINES", snap.lines.to_string()),
            ("NEXT", snap.next.map_or("-", piece_letter).to_string()),
            ("HOLD", snap.held.map_or("-", piece_letter).to_string()),
            ("SPEED", format!("{}ms", snap.drop_interval_ms)),
        ];
        let mut y = start_y;
        for (name, text) in rows {
            fb.put_str(panel_x, y, name, label);
            let style = if name == "HOLD" && !snap.can_hold {
                value.dim()
            } else {
                value
            };
            fb.put_str(panel_x, y + 1, &text, style);
            y += 3;
        }
    }
}
