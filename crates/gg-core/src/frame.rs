use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::color::Rgb;
use crate::config::GlyphMode;
use crate::error::ConvertError;

/// Buffer de pixels décodés. RGB row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use gg_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    /// Wrap raw RGB bytes.
    ///
    /// # Errors
    /// `InvalidArgument` if `data.len() != width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ConvertError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ConvertError::invalid(format!(
                "buffer RGB de {} octets, {expected} attendus pour {width}×{height}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Filled with a single color.
    ///
    /// # Example
    /// ```
    /// use gg_core::{FrameBuffer, Rgb};
    /// let fb = FrameBuffer::filled(2, 2, Rgb::new(255, 0, 0));
    /// assert_eq!(fb.pixel(1, 1), Rgb::new(255, 0, 0));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let n = width as usize * height as usize;
        let mut data = Vec::with_capacity(n * 3);
        for _ in 0..n {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// True if either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Accès au pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Écrit le pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
    }

    /// Every pixel, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

/// Display color of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellColor {
    /// Below the brightness threshold.
    Transparent,
    /// Monochrome marker (also used when a color palette came out empty).
    White,
    /// Palette entry.
    Rgb(Rgb),
}

impl CellColor {
    /// CSS value: `transparent`, `#FFFFFF` or `rgb(r, g, b)`.
    #[must_use]
    pub fn to_css(self) -> String {
        match self {
            Self::Transparent => "transparent".into(),
            Self::White => "#FFFFFF".into(),
            Self::Rgb(c) => c.to_css(),
        }
    }

    /// Concrete RGB, if the cell is visible.
    #[must_use]
    pub fn rgb(self) -> Option<Rgb> {
        match self {
            Self::Transparent => None,
            Self::White => Some(Rgb::WHITE),
            Self::Rgb(c) => Some(c),
        }
    }
}

impl Serialize for CellColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Single cell of the output grid.
///
/// # Example
/// ```
/// use gg_core::frame::GlyphCell;
/// let cell = GlyphCell::blank();
/// assert_eq!(cell.glyph, ' ');
/// assert_eq!(cell.brightness, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphCell {
    /// Caractère à afficher.
    pub glyph: char,
    /// Couleur résolue.
    pub color: CellColor,
    /// Luminance source [0, 1], 0 pour une cellule vide.
    pub brightness: f32,
}

impl GlyphCell {
    /// Space, transparent, zero brightness.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            glyph: ' ',
            color: CellColor::Transparent,
            brightness: 0.0,
        }
    }

    /// True for cells suppressed by the brightness threshold.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.color == CellColor::Transparent
    }
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self::blank()
    }
}

/// Grille de sortie. Produite une fois par conversion, jamais modifiée ensuite.
///
/// Cells are stored flat, row-major, so rows cannot be ragged.
///
/// # Example
/// ```
/// use gg_core::frame::{GlyphCell, GlyphGrid};
/// use gg_core::config::GlyphMode;
/// let grid = GlyphGrid::new(2, 1, vec![GlyphCell::blank(); 2], GlyphMode::Text, None).unwrap();
/// assert_eq!(grid.rows().count(), 1);
/// assert_eq!(grid.get(1, 0).glyph, ' ');
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphGrid {
    cells: Vec<GlyphCell>,
    width: u32,
    height: u32,
    glyph_mode: GlyphMode,
    shape: Option<Arc<str>>,
}

impl GlyphGrid {
    /// Assemble a grid from row-major cells.
    ///
    /// # Errors
    /// `InternalInvariantViolation` if the cell count disagrees with the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        cells: Vec<GlyphCell>,
        glyph_mode: GlyphMode,
        shape: Option<Arc<str>>,
    ) -> Result<Self, ConvertError> {
        if cells.len() != width as usize * height as usize {
            return Err(ConvertError::invariant(format!(
                "{} cellules pour une grille {width}×{height}",
                cells.len()
            )));
        }
        Ok(Self {
            cells,
            width,
            height,
            glyph_mode,
            shape,
        })
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Glyph mode the grid was produced with.
    #[must_use]
    pub fn glyph_mode(&self) -> GlyphMode {
        self.glyph_mode
    }

    /// Shape markup threaded through from the request, untouched.
    #[must_use]
    pub fn shape_markup(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    /// Cell at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &GlyphCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[GlyphCell]> + '_ {
        // chunks_exact panics on 0; an empty-width grid has no cells anyway.
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}

impl Serialize for GlyphGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[GlyphCell]> = self.rows().collect();
        let mut s = serializer.serialize_struct("GlyphGrid", 4)?;
        s.serialize_field("width", &self.width)?;
        s.serialize_field("height", &self.height)?;
        s.serialize_field("glyph_mode", &self.glyph_mode)?;
        s.serialize_field("rows", &rows)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_length() {
        assert!(FrameBuffer::from_raw(2, 2, vec![0; 12]).is_ok());
        assert!(FrameBuffer::from_raw(2, 2, vec![0; 11]).is_err());
    }

    #[test]
    fn pixel_roundtrip() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set_pixel(2, 1, Rgb::new(1, 2, 3));
        assert_eq!(fb.pixel(2, 1), Rgb::new(1, 2, 3));
        assert_eq!(fb.pixels().count(), 6);
    }

    #[test]
    fn grid_rejects_wrong_cell_count() {
        let r = GlyphGrid::new(3, 3, vec![GlyphCell::blank(); 8], GlyphMode::Text, None);
        assert!(matches!(r, Err(ConvertError::InternalInvariantViolation(_))));
    }

    #[test]
    fn cell_color_css() {
        assert_eq!(CellColor::Transparent.to_css(), "transparent");
        assert_eq!(CellColor::White.to_css(), "#FFFFFF");
        assert_eq!(CellColor::Rgb(Rgb::new(1, 2, 3)).to_css(), "rgb(1, 2, 3)");
    }
}
