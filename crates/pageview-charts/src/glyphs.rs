//! Built-in 5×7 bitmap glyphs for drawing chart text without a font.
//!
//! Only what chart labels need is covered: letters (case-folded), digits and
//! the punctuation used in titles, dates and grouped numbers.

/// Rows per glyph; every glyph sits on the same baseline.
pub(crate) const GLYPH_HEIGHT: i32 = 7;

/// Advance of a space or an unknown character, in glyph pixels.
const BLANK_ADVANCE: i32 = 3;

/// One bitmap character. Bit `width - 1` of each row is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph {
    pub width: u8,
    pub rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    const fn new(width: u8, rows: [u8; GLYPH_HEIGHT as usize]) -> Self {
        Self { width, rows }
    }

    /// Whether the pixel at `(col, row)` is set.
    pub fn is_set(&self, col: u8, row: usize) -> bool {
        col < self.width && self.rows[row] & (1 << (self.width - 1 - col)) != 0
    }
}

pub(crate) fn glyph(ch: char) -> Option<Glyph> {
    let g = match ch.to_ascii_uppercase() {
        'A' => Glyph::new(5, [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
        'B' => Glyph::new(5, [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
        'C' => Glyph::new(5, [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
        'D' => Glyph::new(5, [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
        'E' => Glyph::new(5, [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
        'F' => Glyph::new(5, [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
        'G' => Glyph::new(5, [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
        'H' => Glyph::new(5, [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
        'I' => Glyph::new(3, [0x7, 0x2, 0x2, 0x2, 0x2, 0x2, 0x7]),
        'J' => Glyph::new(5, [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
        'K' => Glyph::new(5, [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
        'L' => Glyph::new(5, [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
        'M' => Glyph::new(5, [0x11, 0x1B, 0x15, 0x11, 0x11, 0x11, 0x11]),
        'N' => Glyph::new(5, [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11]),
        'O' => Glyph::new(5, [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
        'P' => Glyph::new(5, [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
        'Q' => Glyph::new(5, [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
        'R' => Glyph::new(5, [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
        'S' => Glyph::new(5, [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
        'T' => Glyph::new(5, [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
        'U' => Glyph::new(5, [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
        'V' => Glyph::new(5, [0x11, 0x11, 0x11, 0x11, 0x0A, 0x0A, 0x04]),
        'W' => Glyph::new(5, [0x11, 0x11, 0x11, 0x11, 0x15, 0x1B, 0x11]),
        'X' => Glyph::new(5, [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
        'Y' => Glyph::new(5, [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04]),
        'Z' => Glyph::new(5, [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
        '0' => Glyph::new(5, [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
        '1' => Glyph::new(3, [0x2, 0x6, 0x2, 0x2, 0x2, 0x2, 0x7]),
        '2' => Glyph::new(5, [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
        '3' => Glyph::new(5, [0x1E, 0x01, 0x01, 0x06, 0x01, 0x01, 0x1E]),
        '4' => Glyph::new(5, [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
        '5' => Glyph::new(5, [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
        '6' => Glyph::new(5, [0x0E, 0x11, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
        '7' => Glyph::new(5, [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
        '8' => Glyph::new(5, [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
        '9' => Glyph::new(5, [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x11, 0x0E]),
        '-' => Glyph::new(3, [0x0, 0x0, 0x0, 0x7, 0x0, 0x0, 0x0]),
        '/' => Glyph::new(3, [0x1, 0x1, 0x2, 0x2, 0x4, 0x4, 0x4]),
        '(' => Glyph::new(3, [0x1, 0x2, 0x4, 0x4, 0x4, 0x2, 0x1]),
        ')' => Glyph::new(3, [0x4, 0x2, 0x1, 0x1, 0x1, 0x2, 0x4]),
        ':' => Glyph::new(1, [0x0, 0x1, 0x0, 0x0, 0x0, 0x1, 0x0]),
        '.' => Glyph::new(1, [0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x1]),
        ',' => Glyph::new(2, [0x0, 0x0, 0x0, 0x0, 0x0, 0x1, 0x2]),
        _ => return None,
    };
    Some(g)
}

/// Horizontal advance of `ch` in glyph pixels, including the gap after it.
pub(crate) fn advance(ch: char) -> i32 {
    glyph(ch).map_or(BLANK_ADVANCE, |g| i32::from(g.width) + 1)
}

/// Glyph pixel scale for a font of `size` pixels.
pub(crate) fn scale_for(size: f64) -> i32 {
    ((size / 10.0).round() as i32).max(1)
}

/// Pixel extent of `text` drawn at `scale`.
pub(crate) fn text_extent(text: &str, scale: i32) -> (u32, u32) {
    let advance: i32 = text.chars().map(advance).sum();
    // No trailing gap after the last character.
    let width = (advance - 1).max(0) * scale;
    (width as u32, (GLYPH_HEIGHT * scale) as u32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
