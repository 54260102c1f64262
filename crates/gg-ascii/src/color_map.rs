use gg_core::color::{Rgb, nearest_color};
use gg_core::frame::CellColor;

/// Résolution de la couleur d'affichage d'une cellule visible.
///
/// # Example
/// ```
/// use gg_ascii::color_map::ColorResolver;
/// use gg_core::{CellColor, Rgb};
///
/// let mono = ColorResolver::Monochrome;
/// assert_eq!(mono.resolve(Rgb::new(255, 0, 0)), CellColor::White);
///
/// let palette = ColorResolver::Palette(vec![Rgb::new(0, 0, 0), Rgb::new(250, 0, 0)]);
/// assert_eq!(palette.resolve(Rgb::new(200, 30, 30)), CellColor::Rgb(Rgb::new(250, 0, 0)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorResolver {
    /// Every visible cell is full white.
    Monochrome,
    /// Nearest palette color, first minimum wins.
    Palette(Vec<Rgb>),
}

impl ColorResolver {
    /// Resolve the display color of a visible cell from its raw pixel.
    ///
    /// An empty palette falls back to white.
    #[inline(always)]
    #[must_use]
    pub fn resolve(&self, pixel: Rgb) -> CellColor {
        match self {
            Self::Monochrome => CellColor::White,
            Self::Palette(colors) => {
                nearest_color(colors, pixel).map_or(CellColor::White, CellColor::Rgb)
            }
        }
    }

    /// Number of palette colors, zero in monochrome mode.
    #[must_use]
    pub fn palette_len(&self) -> usize {
        match self {
            Self::Monochrome => 0,
            Self::Palette(colors) => colors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_falls_back_to_white() {
        let resolver = ColorResolver::Palette(Vec::new());
        assert_eq!(resolver.resolve(Rgb::new(10, 20, 30)), CellColor::White);
    }

    #[test]
    fn ties_keep_first_entry() {
        let resolver = ColorResolver::Palette(vec![Rgb::new(0, 0, 10), Rgb::new(0, 0, 30)]);
        assert_eq!(
            resolver.resolve(Rgb::new(0, 0, 20)),
            CellColor::Rgb(Rgb::new(0, 0, 10))
        );
    }

    #[test]
    fn nearest_is_brute_force_minimum() {
        let colors: Vec<Rgb> = (0..16u8).map(|i| Rgb::new(i * 16, 255 - i * 16, i * 3)).collect();
        let resolver = ColorResolver::Palette(colors.clone());
        for probe in [Rgb::new(0, 0, 0), Rgb::new(128, 128, 128), Rgb::new(255, 10, 40)] {
            let CellColor::Rgb(got) = resolver.resolve(probe) else {
                panic!("couleur attendue");
            };
            assert!(colors.iter().all(|&c| probe.distance_sq(c) >= probe.distance_sq(got)));
        }
    }
}
