use gg_core::color::Rgb;
use gg_core::frame::GlyphCell;
use gg_core::traits::Raster;
use rayon::prelude::*;

use crate::color_map::ColorResolver;
use crate::glyph::GlyphPicker;

/// Cellule d'un pixel échantillonné.
///
/// Sous le seuil (`luminance × 100 < threshold`) la cellule est vide :
/// espace, transparente, luminance nulle. `glyph` n'est appelé que pour une
/// cellule visible.
///
/// # Example
/// ```
/// use gg_ascii::color_map::ColorResolver;
/// use gg_ascii::render::render_cell;
/// use gg_core::{CellColor, GlyphCell, Rgb};
///
/// let cell = render_cell(Rgb::new(3, 3, 3), 5.0, &ColorResolver::Monochrome, |_| '#');
/// assert_eq!(cell, GlyphCell::blank());
/// let cell = render_cell(Rgb::new(200, 200, 200), 5.0, &ColorResolver::Monochrome, |_| '#');
/// assert_eq!((cell.glyph, cell.color), ('#', CellColor::White));
/// ```
#[inline(always)]
pub fn render_cell(
    pixel: Rgb,
    threshold: f32,
    colors: &ColorResolver,
    glyph: impl FnOnce(f32) -> char,
) -> GlyphCell {
    let brightness = pixel.luminance();
    if brightness * 100.0 < threshold {
        return GlyphCell::blank();
    }
    GlyphCell {
        glyph: glyph(brightness),
        color: colors.resolve(pixel),
        brightness,
    }
}

/// Convert a resampled band into cells, row-major.
///
/// Rows run in parallel unless the picker is sequential: its shared counter
/// needs every visible cell in row-major order.
pub fn render_band<R: Raster + Sync>(
    band: &R,
    threshold: f32,
    picker: &mut GlyphPicker,
    colors: &ColorResolver,
) -> Vec<GlyphCell> {
    let (width, height) = band.dimensions();
    let w = width as usize;
    let mut cells = vec![GlyphCell::blank(); w * height as usize];
    if w == 0 {
        return cells;
    }

    if picker.is_sequential() {
        for (y, row) in cells.chunks_exact_mut(w).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let pixel = band.rgb_at(x as u32, y as u32);
                *cell = render_cell(pixel, threshold, colors, |b| picker.pick(b));
            }
        }
    } else {
        let picker = &*picker;
        cells
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let pixel = band.rgb_at(x as u32, y as u32);
                    *cell = render_cell(pixel, threshold, colors, |b| picker.by_brightness(b));
                }
            });
    }
    cells
}
