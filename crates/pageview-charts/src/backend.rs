//! Bitmap backend wrapper and font registration.
//!
//! Chart text is drawn with whatever TrueType font was registered for the
//! `sans-serif` family. When none is available, [`FontSafeBackend`] draws the
//! text with the built-in bitmap glyphs instead of failing the whole chart.

use std::panic;
use std::path::{Path, PathBuf};

use plotters::style::FontStyle;
use plotters_backend::{
    text_anchor, BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind,
};
use tracing::{debug, warn};

use crate::glyphs;
use crate::themes::FONT_FAMILY;

/// Locations tried for a sans-serif font when none is given explicitly.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// ── Font registration ─────────────────────────────────────────────────────────

/// Register a TrueType font as the `sans-serif` family.
///
/// Tries `explicit` first, then [`SYSTEM_FONT_CANDIDATES`]. Returns the path
/// that was registered, or `None` when no usable font was found; charts then
/// fall back to the built-in bitmap glyphs.
pub fn register_chart_font(explicit: Option<&Path>) -> Option<PathBuf> {
    let found = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| try_register_font(path));

    if found.is_none() {
        warn!("No chart font found; chart text uses the built-in bitmap glyphs");
    }
    found
}

/// Register the font at `path`, returning whether it was accepted.
///
/// The registry is left untouched when the file is missing or not a font.
pub fn try_register_font(path: &Path) -> bool {
    let Ok(bytes) = std::fs::read(path) else {
        debug!("Font not readable: {}", path.display());
        return false;
    };
    // The registry keeps a `'static` borrow; the font lives for the
    // remainder of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => {
            debug!("Registered chart font {}", path.display());
            true
        }
        Err(_) => {
            warn!("Not a usable TrueType font: {}", path.display());
            false
        }
    }
}

// ── FontSafeBackend ───────────────────────────────────────────────────────────

/// Forwards everything to `inner` except text, which is drawn with the
/// built-in bitmap glyphs when the font cannot be resolved.
pub struct FontSafeBackend<DB> {
    inner: DB,
}

impl<DB> FontSafeBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self { inner }
    }
}

impl<DB: DrawingBackend> DrawingBackend for FontSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.draw_text(text, style, pos)
        }));
        match result {
            Ok(Err(DrawingErrorKind::FontError(e))) => {
                debug!("Font unavailable for {:?} ({}); using bitmap glyphs", text, e);
                self.draw_text_fallback(text, style, pos)
            }
            Ok(other) => other,
            Err(_) => {
                debug!("Text rendering panicked; using bitmap glyphs for {:?}", text);
                self.draw_text_fallback(text, style, pos)
            }
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.estimate_text_size(text, style)
        }));
        match result {
            Ok(Ok(size)) => Ok(size),
            Ok(Err(DrawingErrorKind::DrawingError(e))) => Err(DrawingErrorKind::DrawingError(e)),
            _ => Ok(glyphs::text_extent(text, glyphs::scale_for(style.size()))),
        }
    }
}

impl<DB: DrawingBackend> FontSafeBackend<DB> {
    /// Draw `text` with the bitmap glyphs, honouring the style's anchor and
    /// rotation the same way the default backend text path does.
    fn draw_text_fallback<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let color = style.color();
        if color.alpha == 0.0 || text.trim().is_empty() {
            return Ok(());
        }

        let scale = glyphs::scale_for(style.size());
        let (width, height) = glyphs::text_extent(text, scale);
        let (width, height) = (width as i32, height as i32);
        let dx = match style.anchor().h_pos {
            text_anchor::HPos::Left => 0,
            text_anchor::HPos::Center => -width / 2,
            text_anchor::HPos::Right => -width,
        };
        let dy = match style.anchor().v_pos {
            text_anchor::VPos::Top => 0,
            text_anchor::VPos::Center => -height / 2,
            text_anchor::VPos::Bottom => -height,
        };
        let transform = style.transform();

        let mut cursor = 0;
        for ch in text.chars() {
            if let Some(glyph) = glyphs::glyph(ch) {
                for row in 0..glyphs::GLYPH_HEIGHT as usize {
                    for col in 0..glyph.width {
                        if !glyph.is_set(col, row) {
                            continue;
                        }
                        let x0 = dx + cursor + i32::from(col) * scale;
                        let y0 = dy + row as i32 * scale;
                        for sy in 0..scale {
                            for sx in 0..scale {
                                let (x, y) = transform.transform(x0 + sx, y0 + sy);
                                self.inner.draw_pixel((pos.0 + x, pos.1 + y), color)?;
                            }
                        }
                    }
                }
            }
            cursor += glyphs::advance(ch) * scale;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;
    use plotters::style::{FontDesc, FontFamily, FontTransform};
    use tempfile::TempDir;

    const W: u32 = 240;
    const H: u32 = 240;

    /// Family name nothing ever registers, so text always misses the font.
    fn unregistered_style(transform: FontTransform) -> TextStyle<'static> {
        TextStyle::from(FontDesc::new(
            FontFamily::Name("pageview-unregistered"),
            20.0,
            FontStyle::Normal,
        ))
        .color(&BLACK)
        .transform(transform)
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of dark pixels in an RGB buffer.
    fn dark_bbox(buf: &[u8]) -> Option<(u32, u32, u32, u32)> {
        let mut bbox: Option<(u32, u32, u32, u32)> = None;
        for (i, px) in buf.chunks(3).enumerate() {
            if px.iter().all(|c| *c < 100) {
                let (x, y) = (i as u32 % W, i as u32 / W);
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((a, b, c, d)) => (a.min(x), b.min(y), c.max(x), d.max(y)),
                });
            }
        }
        bbox
    }

    fn draw_unregistered(text: &str, transform: FontTransform, pos: BackendCoord) -> Vec<u8> {
        let mut buf = vec![255u8; (W * H * 3) as usize];
        {
            let mut backend = FontSafeBackend::new(BitMapBackend::with_buffer(&mut buf, (W, H)));
            backend
                .draw_text(text, &unregistered_style(transform), pos)
                .unwrap();
            backend.present().unwrap();
        }
        buf
    }

    // ── text fallback ─────────────────────────────────────────────────────────

    #[test]
    fn test_text_without_font_is_drawn() {
        let buf = draw_unregistered("Page Views", FontTransform::None, (10, 10));
        let (x0, y0, x1, y1) = dark_bbox(&buf).expect("text must leave pixels");

        let (w, h) = glyphs::text_extent("Page Views", glyphs::scale_for(20.0));
        assert_eq!((x0, y0), (10, 10));
        assert!(x1 - x0 + 1 <= w && y1 - y0 + 1 <= h);
    }

    #[test]
    fn test_rotated_text_without_font_runs_vertically() {
        let buf = draw_unregistered("Years", FontTransform::Rotate270, (120, 200));
        let (x0, y0, x1, y1) = dark_bbox(&buf).expect("text must leave pixels");
        assert!(y1 - y0 > x1 - x0, "rotated label should be taller than wide");
    }

    #[test]
    fn test_estimate_without_font_matches_glyphs() {
        let mut buf = vec![255u8; (W * H * 3) as usize];
        let backend = FontSafeBackend::new(BitMapBackend::with_buffer(&mut buf, (W, H)));
        let size = backend
            .estimate_text_size("2017", &unregistered_style(FontTransform::None))
            .unwrap();
        assert_eq!(size, glyphs::text_extent("2017", 2));
    }

    // ── font registration ─────────────────────────────────────────────────────

    #[test]
    fn test_try_register_rejects_non_font_file() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();
        assert!(!try_register_font(&bogus));
    }

    #[test]
    fn test_try_register_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(!try_register_font(&dir.path().join("absent.ttf")));
    }
}
