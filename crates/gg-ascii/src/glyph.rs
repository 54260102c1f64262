use gg_core::charset::{GlyphRamp, sequence_enabled};
use gg_core::config::RenderOptions;

/// Choix du glyphe d'une cellule visible.
///
/// En mode séquentiel, un compteur propre à la conversion parcourt la rampe
/// cellule visible après cellule visible, sur toute la grille. Sinon le
/// glyphe dépend uniquement de la luminance.
///
/// # Example
/// ```
/// use gg_ascii::glyph::GlyphPicker;
/// use gg_core::charset::GlyphRamp;
///
/// let mut picker = GlyphPicker::new(GlyphRamp::new(".#").unwrap(), true);
/// assert_eq!(picker.pick(0.9), '.');
/// assert_eq!(picker.pick(0.9), '#');
/// assert_eq!(picker.pick(0.9), '.');
/// ```
#[derive(Clone, Debug)]
pub struct GlyphPicker {
    ramp: GlyphRamp,
    sequential: bool,
    counter: u64,
}

impl GlyphPicker {
    /// Picker over `ramp`, sequential or brightness-driven.
    #[must_use]
    pub fn new(ramp: GlyphRamp, sequential: bool) -> Self {
        Self {
            ramp,
            sequential,
            counter: 0,
        }
    }

    /// Picker configured from rendering options.
    #[must_use]
    pub fn for_options(options: &RenderOptions) -> Self {
        Self::new(GlyphRamp::for_options(options), sequence_enabled(options))
    }

    /// True when glyphs follow the shared counter; cells must then be visited row-major.
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        self.sequential
    }

    /// Glyph of the next visible cell.
    #[inline(always)]
    pub fn pick(&mut self, brightness: f32) -> char {
        if self.sequential {
            let ch = self.ramp.glyph_in_sequence(self.counter);
            self.counter += 1;
            ch
        } else {
            self.ramp.glyph_for_brightness(brightness)
        }
    }

    /// Brightness-driven glyph; does not touch the counter.
    #[inline(always)]
    #[must_use]
    pub fn by_brightness(&self, brightness: f32) -> char {
        self.ramp.glyph_for_brightness(brightness)
    }

    /// Visible cells seen so far in sequential mode.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_core::config::GlyphMode;

    #[test]
    fn brightness_mode_ignores_counter() {
        let mut picker = GlyphPicker::new(GlyphRamp::new(".#").unwrap(), false);
        assert_eq!(picker.pick(0.0), '#');
        assert_eq!(picker.pick(1.0), '.');
        assert_eq!(picker.counter(), 0);
    }

    #[test]
    fn options_disable_sequence_outside_text_mode() {
        let options = RenderOptions {
            force_sequence: true,
            glyph_mode: GlyphMode::Shape,
            ..RenderOptions::default()
        };
        assert!(!GlyphPicker::for_options(&options).is_sequential());
    }

    #[test]
    fn sequence_wraps_modulo_length() {
        let mut picker = GlyphPicker::new(GlyphRamp::new("abc").unwrap(), true);
        let picked: String = (0..7).map(|_| picker.pick(0.5)).collect();
        assert_eq!(picked, "abcabca");
        assert_eq!(picker.counter(), 7);
    }
}
