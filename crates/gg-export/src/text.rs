use std::fmt::Write as _;

use gg_core::frame::{CellColor, GlyphGrid};

/// Glyphs only, one line per row.
///
/// # Example
/// ```
/// use gg_core::config::GlyphMode;
/// use gg_core::frame::{CellColor, GlyphCell, GlyphGrid};
/// use gg_export::text::to_plain_text;
///
/// let cell = GlyphCell { glyph: '#', color: CellColor::White, brightness: 1.0 };
/// let grid = GlyphGrid::new(2, 2, vec![cell, GlyphCell::blank(), GlyphCell::blank(), cell], GlyphMode::Text, None).unwrap();
/// assert_eq!(to_plain_text(&grid), "# \n #");
/// ```
#[must_use]
pub fn to_plain_text(grid: &GlyphGrid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|cell| cell.glyph));
    }
    out
}

/// Glyphs with 24-bit ANSI foreground colors, for terminal display.
///
/// An escape is emitted only when the color changes; each row ends with a
/// reset so colors never leak past the line.
#[must_use]
pub fn to_ansi(grid: &GlyphGrid) -> String {
    let mut out = String::new();
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut current: Option<CellColor> = None;
        for cell in row {
            if cell.is_blank() {
                out.push(' ');
                continue;
            }
            if current != Some(cell.color) {
                if let Some(rgb) = cell.color.rgb() {
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b);
                }
                current = Some(cell.color);
            }
            out.push(cell.glyph);
        }
        if current.is_some() {
            out.push_str("\x1b[0m");
        }
    }
    out
}
