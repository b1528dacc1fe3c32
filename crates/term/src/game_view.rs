//! GameView: maps a `GameState` into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.
//!
//! Layout, left to right: the framed 10x20 board, then a side panel with the
//! NEXT and HOLD preview boxes and the SCORE / LEVEL / HIGH SCORE numbers.
//! Settled cells are grey; the falling piece uses its palette color. Once the
//! game is over the board area shows a `GAME OVER` overlay instead of cells.

use crate::core::{GameState, PieceInstance};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Color, GRID_HEIGHT, GRID_WIDTH};

/// Side of a preview box in board cells (4x4 matrix plus a one-cell margin).
pub const PREVIEW_CELLS: u16 = 6;

const BLOCK: char = '█';

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SETTLED: Rgb = Rgb::new(128, 128, 128);

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

/// Screen position of the board frame's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOrigin {
    pub x: u16,
    pub y: u16,
}

/// Renders game states at a fixed cell scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    /// Board frame size in terminal cells, border included.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Where the board frame lands for this viewport (board and panel centered together).
    pub fn board_origin(&self, viewport: Viewport) -> BoardOrigin {
        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w + 2 + self.preview_w();
        BoardOrigin {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        }
    }

    /// Terminal position of the top-left glyph of board cell (x, y).
    pub fn cell_origin(&self, origin: BoardOrigin, x: u16, y: u16) -> (u16, u16) {
        (
            origin.x + 1 + x * self.cell_w,
            origin.y + 1 + y * self.cell_h,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let origin = self.board_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();
        let board_w = frame_w - 2;
        let board_h = frame_h - 2;

        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            board_w,
            board_h,
            Glyph::new(' ', Style::new(PLAY_BG, PLAY_BG)),
        );
        draw_border(fb, origin.x, origin.y, frame_w, frame_h, border_style());

        if state.game_over {
            draw_centered(
                fb,
                origin.x,
                origin.y + frame_h / 2,
                frame_w,
                "GAME OVER",
                Style::new(Rgb::new(255, 255, 255), PLAY_BG).bold(),
            );
        } else {
            self.draw_board(fb, origin, state);
        }

        self.draw_side_panel(fb, viewport, origin, state);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, origin: BoardOrigin, state: &GameState) {
        let settled = Style::new(SETTLED, PLAY_BG);
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                if state.board.is_occupied(x, y) {
                    self.fill_cell(fb, origin, x as u16, y as u16, settled);
                }
            }
        }

        let falling = Style::new(color_rgb(state.current.color), PLAY_BG).bold();
        for (x, y) in state.current.cells() {
            if state.board.is_out_of_bounds(x, y) {
                continue;
            }
            self.fill_cell(fb, origin, x as u16, y as u16, falling);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, origin: BoardOrigin, x: u16, y: u16, style: Style) {
        let (px, py) = self.cell_origin(origin, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, Glyph::new(BLOCK, style));
    }

    fn preview_w(&self) -> u16 {
        PREVIEW_CELLS * self.cell_w + 2
    }

    fn preview_h(&self) -> u16 {
        PREVIEW_CELLS * self.cell_h + 2
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        origin: BoardOrigin,
        state: &GameState,
    ) {
        let (frame_w, _) = self.frame_size();
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(self.preview_w()) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = origin.y;
        for (name, n) in [
            ("SCORE", state.score),
            ("LEVEL", state.level as u32),
            ("HIGH SCORE", state.highscore),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 11, y, n, value);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, Some(&state.next));
        y = y.saturating_add(self.preview_h() + 1);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, state.inventory.as_ref());
    }

    /// Terminal position of the NEXT and HOLD preview boxes (top-left corners).
    pub fn preview_origins(&self, viewport: Viewport) -> ((u16, u16), (u16, u16)) {
        let origin = self.board_origin(viewport);
        let (frame_w, _) = self.frame_size();
        let panel_x = origin.x + frame_w + 2;
        let next_y = origin.y + 5;
        let hold_y = next_y + self.preview_h() + 2;
        ((panel_x, next_y), (panel_x, hold_y))
    }

    /// Boxed preview; the piece matrix sits one cell in from the box edge.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: Option<&PieceInstance>) {
        let (w, h) = (self.preview_w(), self.preview_h());
        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, Glyph::new(' ', Style::new(PLAY_BG, PLAY_BG)));
        draw_border(fb, x, y, w, h, border_style());

        let Some(piece) = piece else {
            return;
        };
        let style = Style::new(color_rgb(piece.color), PLAY_BG).bold();
        for (i, j) in piece.shape().occupied() {
            let px = x + 1 + (i as u16 + 1) * self.cell_w;
            let py = y + 1 + (j as u16 + 1) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, Glyph::new(BLOCK, style));
        }
    }
}

/// Terminal color of a palette entry.
pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Black => Rgb::new(0, 0, 0),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Blue => Rgb::new(80, 120, 220),
    }
}

/// Color used for settled cells.
pub fn settled_rgb() -> Rgb {
    SETTLED
}

fn border_style() -> Style {
    Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0))
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str, style: Style) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x.saturating_add(w.saturating_sub(text_w) / 2), y, text, style);
}
