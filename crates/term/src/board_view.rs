//! Virtual LED board drawn in the terminal.
//!
//! Behaves like the multiplexed matrix it stands in for: a square stays lit
//! only for the refresh pass that addressed it. [`BoardDisplay::present`]
//! ends the pass, and the terminal is repainted only when the lit set changed.

use anyhow::Result;
use tracing::warn;

use crate::engine::hardware::on_board;
use crate::engine::BoardDisplay;
use crate::fb::{Canvas, Glyph, FG_BLUE, FG_DEFAULT, FG_DIM, FG_RED};
use crate::renderer::TerminalRenderer;
use crate::types::{Color, COLS, ROWS};

type Squares = [[Option<Color>; COLS]; ROWS];

const TITLE: &str = "Connect Four";
const CANVAS_WIDTH: u16 = 2 + 2 * COLS as u16;
const CANVAS_HEIGHT: u16 = 2 + ROWS as u16;

pub struct TerminalBoard {
    pass: Squares,
    shown: Option<Squares>,
    canvas: Canvas,
    renderer: Option<TerminalRenderer>,
    draw_failed: bool,
}

impl TerminalBoard {
    /// Take over the terminal's alternate screen.
    pub fn new() -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self::with_renderer(Some(renderer)))
    }

    /// A board that composes frames without drawing them.
    pub fn headless() -> Self {
        Self::with_renderer(None)
    }

    fn with_renderer(renderer: Option<TerminalRenderer>) -> Self {
        Self {
            pass: [[None; COLS]; ROWS],
            shown: None,
            canvas: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            renderer,
            draw_failed: false,
        }
    }

    /// Squares lit by the last completed pass.
    pub fn shown(&self) -> Option<&Squares> {
        self.shown.as_ref()
    }

    /// Last composed frame.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn compose(&mut self, squares: &Squares) {
        let c = &mut self.canvas;
        c.fill(Glyph::default());
        c.put_str(1, 0, TITLE, FG_DEFAULT);

        for (row, line) in squares.iter().enumerate() {
            let y = 1 + row as u16;
            c.put(0, y, Glyph::plain('|'));
            c.put(CANVAS_WIDTH - 1, y, Glyph::plain('|'));
            for (col, square) in line.iter().enumerate() {
                let glyph = match square {
                    Some(Color::Red) => Glyph::colored('O', FG_RED),
                    Some(Color::Blue) => Glyph::colored('O', FG_BLUE),
                    None => Glyph {
                        ch: '.',
                        fg: FG_DIM,
                        bold: false,
                    },
                };
                c.put(1 + 2 * col as u16, y, glyph);
            }
        }

        // Hardware columns run mirrored; label them with the number a player types.
        let y = CANVAS_HEIGHT - 1;
        for col in 0..COLS {
            let label = char::from_digit((COLS - col) as u32, 10).unwrap_or('?');
            c.put(1 + 2 * col as u16, y, Glyph::plain(label));
        }
    }

    fn show(&mut self, squares: Squares) {
        if self.shown == Some(squares) {
            return;
        }
        self.shown = Some(squares);
        self.compose(&squares);

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Err(e) = renderer.draw(&self.canvas) {
            if !self.draw_failed {
                warn!("terminal draw failed: {}", e);
                self.draw_failed = true;
            }
        }
    }
}

impl BoardDisplay for TerminalBoard {
    fn set_square(&mut self, row: usize, col: usize, color: Option<Color>) -> bool {
        if !on_board(row, col) {
            return false;
        }
        self.pass[row][col] = color;
        true
    }

    fn clear(&mut self) {
        self.pass = [[None; COLS]; ROWS];
        self.show(self.pass);
    }

    fn present(&mut self) {
        let squares = std::mem::replace(&mut self.pass, [[None; COLS]; ROWS]);
        self.show(squares);
    }
}

impl Drop for TerminalBoard {
    fn drop(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            let _ = renderer.leave();
        }
    }
}
