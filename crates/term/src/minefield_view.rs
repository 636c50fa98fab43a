//! MinefieldView: maps a [`MinefieldSnapshot`] into a terminal framebuffer.

use crate::core::{CellView, MinefieldSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb, Viewport};
use crate::types::MinefieldState;

const HIDDEN_BG: Rgb = Rgb::new(70, 70, 85);
const OPEN_BG: Rgb = Rgb::new(25, 25, 30);
const CURSOR_BG: Rgb = Rgb::new(200, 200, 60);

/// Driver-side state that is not part of the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinefieldHud {
    /// `(row, col)` of the keyboard cursor.
    pub cursor: Option<(usize, usize)>,
    pub elapsed_secs: u64,
    pub paused: bool,
}

fn count_rgb(n: u8) -> Rgb {
    match n {
        1 => Rgb::new(90, 140, 255),
        2 => Rgb::new(90, 200, 90),
        3 => Rgb::new(240, 80, 80),
        4 => Rgb::new(150, 90, 230),
        5 => Rgb::new(200, 100, 40),
        6 => Rgb::new(60, 200, 200),
        7 => Rgb::new(230, 230, 230),
        _ => Rgb::new(150, 150, 150),
    }
}

/// Glyph and style for one cell, before any cursor highlight.
pub fn cell_glyph(view: CellView) -> (char, CellStyle) {
    match view {
        CellView::Hidden => ('■', CellStyle::fg(Rgb::new(150, 150, 165)).on(HIDDEN_BG)),
        CellView::Flagged => ('F', CellStyle::fg(Rgb::new(255, 90, 60)).on(HIDDEN_BG).bold()),
        CellView::Open(0) => ('·', CellStyle::fg(Rgb::new(80, 80, 90)).on(OPEN_BG)),
        CellView::Open(n) => (
            char::from(b'0' + n.min(8)),
            CellStyle::fg(count_rgb(n)).on(OPEN_BG).bold(),
        ),
        CellView::Mine => ('*', CellStyle::fg(Rgb::new(255, 60, 60)).on(OPEN_BG).bold()),
    }
}

pub struct MinefieldView {
    cell_w: u16,
}

impl Default for MinefieldView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl MinefieldView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn render_into(
        &self,
        snap: &MinefieldSnapshot,
        hud: MinefieldHud,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let cols = u16::try_from(snap.cols).unwrap_or(u16::MAX);
        let rows = u16::try_from(snap.rows).unwrap_or(u16::MAX);
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        // One header row above the frame.
        let frame_h = rows.saturating_add(2);
        let (start_x, origin_y) = viewport.centre(frame_w, frame_h + 1);
        let start_y = origin_y + 1;

        let header = format!(
            "MINES {:>3}  TIME {:>3}  {}",
            snap.remaining_mines,
            hud.elapsed_secs,
            status_label(snap.state, hud.paused)
        );
        fb.put_str(start_x, origin_y, &header, CellStyle::default().bold());
        fb.draw_border(start_x, start_y, frame_w, frame_h, CellStyle::fg(Rgb::new(200, 200, 200)));

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let Some(view) = snap.get(row, col) else {
                    continue;
                };
                let (ch, mut style) = cell_glyph(view);
                if hud.cursor == Some((row, col)) && !snap.state.is_finished() {
                    style = style.on(CURSOR_BG);
                }
                let px = start_x + 1 + col as u16 * self.cell_w;
                let py = start_y + 1 + row as u16;
                fb.put_char(px, py, ch, style);
                fb.fill_rect(px + 1, py, self.cell_w - 1, 1, ' ', style);
            }
        }

        let banner = match snap.state {
            MinefieldState::Won => Some("YOU WIN"),
            MinefieldState::Lost => Some("BOOM"),
            _ if hud.paused => Some("PAUSED"),
            _ => None,
        };
        if let Some(text) = banner {
            let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
            fb.put_centered(start_x, frame_w, start_y + frame_h / 2, text, style);
        }
    }

    pub fn render(&self, snap: &MinefieldSnapshot, hud: MinefieldHud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }
}

fn status_label(state: MinefieldState, paused: bool) -> &'static str {
    match state {
        _ if paused && !state.is_finished() => "paused",
        MinefieldState::NotStarted => "ready",
        MinefieldState::Playing => "playing",
        MinefieldState::Won => "won",
        MinefieldState::Lost => "lost",
    }
}
