use crate::config::{GlyphMode, RenderOptions};
use crate::error::ConvertError;

/// 10 caractères : rampe par défaut, du plus dense au plus clair.
pub const DEFAULT_RAMP: &str = "@%#*+=-:. ";

/// 69 caractères : Paul Bourke, ordre dense→clair.
pub const FULL_RAMP: &str =
    r##"$@B%8&WM#*oahkbdpqwmZO0LQUJCXYzcvunxrjft\/|()1{}[]?-_+~<>i!lI;:,^"'. "##;

/// Ordered glyph sequence used to turn a brightness into a character.
///
/// The mapping reads the ramp in reverse: brightness `b` selects
/// `ramp[len - 1 - floor(b * (len - 1))]`, so the brightest pixel lands on
/// the first glyph of the configured ramp.
///
/// # Example
/// ```
/// use gg_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(".#").unwrap();
/// assert_eq!(ramp.glyph_for_brightness(0.0), '#');
/// assert_eq!(ramp.glyph_for_brightness(1.0), '.');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a string, one glyph per `char`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the string is empty.
    pub fn new(glyphs: &str) -> Result<Self, ConvertError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(ConvertError::invalid("la rampe de glyphes est vide"));
        }
        Ok(Self { glyphs })
    }

    /// Pick the ramp the options ask for: full ramp, custom, or default.
    ///
    /// # Example
    /// ```
    /// use gg_core::charset::{GlyphRamp, FULL_RAMP};
    /// use gg_core::config::RenderOptions;
    /// let options = RenderOptions { use_full_charset: true, ..RenderOptions::default() };
    /// assert_eq!(GlyphRamp::for_options(&options).len(), FULL_RAMP.chars().count());
    /// ```
    #[must_use]
    pub fn for_options(options: &RenderOptions) -> Self {
        let source = if options.use_full_charset {
            FULL_RAMP
        } else if options.charset.is_empty() {
            DEFAULT_RAMP
        } else {
            options.charset.as_str()
        };
        Self {
            glyphs: source.chars().collect(),
        }
    }

    /// Number of glyphs. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs in configured order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Map a brightness in [0, 1] to a glyph, reading the ramp in reverse.
    #[inline(always)]
    #[must_use]
    pub fn glyph_for_brightness(&self, brightness: f32) -> char {
        let last = self.glyphs.len() - 1;
        let index = ((brightness.clamp(0.0, 1.0) * last as f32).floor() as usize).min(last);
        self.glyphs[last - index]
    }

    /// Glyph for the `n`-th non-blank cell in sequential mode.
    #[inline(always)]
    #[must_use]
    pub fn glyph_in_sequence(&self, n: u64) -> char {
        self.glyphs[(n % self.glyphs.len() as u64) as usize]
    }
}

/// Sequential mode only applies to text glyphs and is ignored with the full ramp.
#[must_use]
pub fn sequence_enabled(options: &RenderOptions) -> bool {
    options.force_sequence && !options.use_full_charset && options.glyph_mode == GlyphMode::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_ramp_is_dense_to_light() {
        let chars: Vec<char> = FULL_RAMP.chars().collect();
        assert_eq!(chars.len(), 69);
        assert_eq!(chars[0], '$');
        assert_eq!(chars[chars.len() - 1], ' ');
    }

    #[test]
    fn brightness_mapping_is_reversed() {
        let ramp = GlyphRamp::new(DEFAULT_RAMP).unwrap();
        // Le pixel le plus lumineux prend le premier glyphe configuré.
        assert_eq!(ramp.glyph_for_brightness(1.0), '@');
        assert_eq!(ramp.glyph_for_brightness(0.0), ' ');
        assert_eq!(ramp.glyph_for_brightness(0.5), '=');
    }

    #[test]
    fn brightness_mapping_monotone() {
        let ramp = GlyphRamp::new(DEFAULT_RAMP).unwrap();
        let mut prev = ramp.len();
        for i in 0..=100u8 {
            let ch = ramp.glyph_for_brightness(f32::from(i) / 100.0);
            let idx = ramp.glyphs().iter().position(|&c| c == ch).unwrap();
            assert!(idx <= prev, "rampe non monotone à {i}");
            prev = idx;
        }
    }

    #[test]
    fn sequence_wraps() {
        let ramp = GlyphRamp::new("ab").unwrap();
        assert_eq!(ramp.glyph_in_sequence(0), 'a');
        assert_eq!(ramp.glyph_in_sequence(3), 'b');
    }

    #[test]
    fn empty_ramp_rejected() {
        assert!(matches!(GlyphRamp::new(""), Err(ConvertError::InvalidArgument(_))));
    }

    #[test]
    fn sequence_requires_text_mode_without_full_ramp() {
        let mut options = RenderOptions {
            force_sequence: true,
            ..RenderOptions::default()
        };
        assert!(sequence_enabled(&options));
        options.use_full_charset = true;
        assert!(!sequence_enabled(&options));
        options.use_full_charset = false;
        options.glyph_mode = GlyphMode::Shape;
        assert!(!sequence_enabled(&options));
    }
}
