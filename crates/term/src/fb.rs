//! Character canvas the virtual board is composed into before drawing.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const FG_DEFAULT: Rgb = Rgb::new(200, 200, 200);
pub const FG_DIM: Rgb = Rgb::new(90, 90, 90);
pub const FG_RED: Rgb = Rgb::new(230, 50, 50);
pub const FG_BLUE: Rgb = Rgb::new(60, 110, 240);

/// One terminal character and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bold: bool,
}

impl Glyph {
    pub const fn plain(ch: char) -> Self {
        Self {
            ch,
            fg: FG_DEFAULT,
            bold: false,
        }
    }

    pub const fn colored(ch: char, fg: Rgb) -> Self {
        Self { ch, fg, bold: true }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::plain(' ')
    }
}

/// Fixed-size grid of glyphs, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Write one glyph; out-of-bounds writes are dropped.
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write a string starting at `(x, y)`, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb) {
        for (dx, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else {
                break;
            };
            self.put(x.saturating_add(dx), y, Glyph { ch, fg, bold: false });
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Row `y` as text, for tests and logs.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_is_clipped() {
        let mut c = Canvas::new(3, 2);
        c.put(5, 0, Glyph::plain('x'));
        c.put_str(1, 1, "abcd", FG_DEFAULT);
        assert_eq!(c.row_text(0), "   ");
        assert_eq!(c.row_text(1), " ab");
        assert_eq!(c.get(3, 0), None);
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut c = Canvas::new(2, 2);
        c.fill(Glyph::colored('o', FG_RED));
        assert_eq!(c.get(1, 1), Some(Glyph::colored('o', FG_RED)));
    }
}
