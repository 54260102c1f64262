use gg_core::color::Rgb;
use gg_core::error::ConvertError;
use gg_core::frame::FrameBuffer;
use gg_source::resize::Resampler;

/// Dimensions de l'aperçu : largeur fixe, hauteur selon l'aspect de l'image,
/// le tout borné par `max_side` (largeur, hauteur) en gardant l'aspect.
///
/// # Example
/// ```
/// use gg_ascii::preview::preview_size;
/// assert_eq!(preview_size(1000, 750, 500, (800, 600)), (500, 375));
/// assert_eq!(preview_size(10_000, 1, 500, (800, 600)), (500, 1));
/// // Image très haute : la hauteur est bornée, la largeur suit.
/// assert_eq!(preview_size(100, 10_000, 500, (800, 600)), (6, 600));
/// ```
#[must_use]
pub fn preview_size(
    image_width: u32,
    image_height: u32,
    preview_width: u32,
    max_side: (u32, u32),
) -> (u32, u32) {
    let max_w = f64::from(max_side.0.max(1));
    let max_h = f64::from(max_side.1.max(1));
    let aspect = f64::from(image_height) / f64::from(image_width.max(1));

    let mut width = f64::from(preview_width.max(1)).min(max_w);
    let mut height = (width * aspect).round().max(1.0);
    if height > max_h {
        height = max_h;
        width = (max_h / aspect).round().clamp(1.0, max_w);
    }
    (width as u32, height as u32)
}

/// Palette de la conversion, quantifiée depuis un aperçu sous-échantillonné.
///
/// Toute l'image est vue, à basse résolution : le coût ne dépend pas de la
/// taille de la grille demandée. `max_side` borne le canvas de l'aperçu.
///
/// # Errors
/// `EmptyImage` for a zero-dimension frame; any quantizer error is returned
/// as is.
///
/// # Example
/// ```
/// use gg_ascii::preview::build_palette;
/// use gg_core::{FrameBuffer, Rgb};
/// use gg_source::resize::Resampler;
///
/// let frame = FrameBuffer::filled(64, 64, Rgb::new(255, 0, 0));
/// let palette = build_palette(&frame, 8, 32, (800, 600), &mut Resampler::new()).unwrap();
/// assert_eq!(palette, vec![Rgb::new(252, 4, 4)]);
/// ```
pub fn build_palette(
    frame: &FrameBuffer,
    max_colors: u16,
    preview_width: u32,
    max_side: (u32, u32),
    resampler: &mut Resampler,
) -> Result<Vec<Rgb>, ConvertError> {
    if frame.is_empty() {
        return Err(ConvertError::EmptyImage {
            width: frame.width,
            height: frame.height,
        });
    }
    let (w, h) = preview_size(frame.width, frame.height, preview_width, max_side);
    let mut preview = FrameBuffer::new(w, h);
    resampler.resize_into(frame, &mut preview)?;

    let pixels: Vec<Rgb> = preview.pixels().collect();
    let palette = gg_quant::quantize(&pixels, usize::from(max_colors))?;
    log::debug!(
        "Palette bâtie sur un aperçu {w}×{h} : {} couleurs",
        palette.len()
    );
    Ok(palette.colors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_bounded_by_max_colors() {
        let mut frame = FrameBuffer::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                frame.set_pixel(x, y, Rgb::new((x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8));
            }
        }
        let palette = build_palette(&frame, 8, 50, (800, 600), &mut Resampler::new()).unwrap();
        assert!(!palette.is_empty());
        assert!(palette.len() <= 8);
    }

    #[test]
    fn out_of_range_palette_size_is_rejected() {
        let frame = FrameBuffer::filled(4, 4, Rgb::new(1, 2, 3));
        assert!(matches!(
            build_palette(&frame, 300, 10, (800, 600), &mut Resampler::new()),
            Err(ConvertError::InvalidArgument(_))
        ));
    }

    #[test]
    fn tall_image_preview_stays_within_the_canvas() {
        assert_eq!(preview_size(1, 10_000, 500, (5_000, 5_000)), (1, 5_000));
        assert_eq!(preview_size(10, 20_000, 500, (800, 600)), (1, 600));
        let (w, h) = preview_size(20_000, 10, 500, (800, 600));
        assert!(w <= 800 && h <= 600);
    }

    #[test]
    fn tall_frame_builds_a_bounded_palette() {
        let mut frame = FrameBuffer::new(1, 10_000);
        for y in 0..10_000 {
            frame.set_pixel(0, y, Rgb::new((y % 256) as u8, 40, 200));
        }
        let palette = build_palette(&frame, 16, 500, (800, 600), &mut Resampler::new()).unwrap();
        assert!(!palette.is_empty() && palette.len() <= 16);
    }
}
