//! TerminalRenderer: draws a [`Canvas`] to stdout, repainting only what changed.
//!
//! The renderer uses the alternate screen but leaves raw mode off, since the
//! keyboard listener reads whole lines from stdin.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{Canvas, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<Canvas>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush()?;
        self.prev = None;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()
    }

    /// Draw `next`, diffing against the previous frame.
    pub fn draw(&mut self, next: &Canvas) -> Result<()> {
        self.buf.clear();
        encode_frame(self.prev.as_ref(), next, &mut self.buf)?;
        self.flush()?;
        match self.prev.as_mut() {
            Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
                prev.clone_from(next)
            }
            _ => self.prev = Some(next.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the commands turning `prev` into `next`.
///
/// Without a previous frame of the same size the whole screen is repainted.
pub fn encode_frame(prev: Option<&Canvas>, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen: Option<(Rgb, bool)> = None;

    match prev.filter(|p| p.width() == next.width() && p.height() == next.height()) {
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                print_span(next, y, 0, next.width(), &mut pen, out)?;
            }
        }
        Some(prev) => {
            for y in 0..next.height() {
                for (x, len) in changed_spans(prev, next, y) {
                    print_span(next, y, x, len, &mut pen, out)?;
                }
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// `(x, len)` spans of row `y` that differ between two same-sized canvases.
pub fn changed_spans(prev: &Canvas, next: &Canvas, y: u16) -> Vec<(u16, u16)> {
    let mut spans = Vec::new();
    let mut start: Option<u16> = None;
    for x in 0..next.width() {
        let differs = prev.get(x, y) != next.get(x, y);
        match (differs, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                spans.push((s, x - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, next.width() - s));
    }
    spans
}

fn print_span(
    canvas: &Canvas,
    y: u16,
    x: u16,
    len: u16,
    pen: &mut Option<(Rgb, bool)>,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for dx in 0..len {
        let glyph = canvas.get(x + dx, y).unwrap_or_default();
        set_pen(glyph, pen, out)?;
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn set_pen(glyph: Glyph, pen: &mut Option<(Rgb, bool)>, out: &mut Vec<u8>) -> Result<()> {
    if *pen == Some((glyph.fg, glyph.bold)) {
        return Ok(());
    }
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(Color::Rgb {
        r: glyph.fg.r,
        g: glyph.fg.g,
        b: glyph.fg.b,
    }))?;
    if glyph.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    *pen = Some((glyph.fg, glyph.bold));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::{FG_BLUE, FG_RED};

    #[test]
    fn spans_coalesce_adjacent_changes() {
        let prev = Canvas::new(6, 1);
        let mut next = Canvas::new(6, 1);
        for x in [1, 2, 3, 5] {
            next.put(x, 0, Glyph::colored('o', FG_RED));
        }
        assert_eq!(changed_spans(&prev, &next, 0), vec![(1, 3), (5, 1)]);
    }

    #[test]
    fn unchanged_frame_only_resets_style() {
        let canvas = Canvas::new(4, 2);
        let mut full = Vec::new();
        encode_frame(None, &canvas, &mut full).unwrap();

        let mut diff = Vec::new();
        encode_frame(Some(&canvas), &canvas, &mut diff).unwrap();
        assert!(diff.len() < full.len());

        let mut reset_only = Vec::new();
        reset_only.queue(ResetColor).unwrap();
        reset_only.queue(SetAttribute(Attribute::Reset)).unwrap();
        assert_eq!(diff, reset_only);
    }

    #[test]
    fn diff_prints_changed_glyph() {
        let prev = Canvas::new(3, 1);
        let mut next = prev.clone();
        next.put(2, 0, Glyph::colored('B', FG_BLUE));
        let mut out = Vec::new();
        encode_frame(Some(&prev), &next, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('B'));
    }
}
