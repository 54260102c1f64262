use serde::{Deserialize, Serialize};

/// Un pixel RGB 8 bits par canal. Pas d'alpha : la transparence est aplatie en amont.
///
/// # Example
/// ```
/// use gg_core::color::Rgb;
/// let red = Rgb::new(255, 0, 0);
/// assert_eq!(red.to_css(), "rgb(255, 0, 0)");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, the monochrome marker color.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its three channels.
    #[inline(always)]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Luminance BT.601 normalisée dans [0.0, 1.0].
    ///
    /// # Example
    /// ```
    /// use gg_core::color::Rgb;
    /// assert_eq!(Rgb::new(0, 0, 0).luminance(), 0.0);
    /// assert_eq!(Rgb::WHITE.luminance(), 1.0);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(self) -> f32 {
        // Poids entiers en millièmes : le blanc pur donne exactement 1.0.
        let weighted = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        weighted as f32 / 255_000.0
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Orders candidates exactly like the true Euclidean distance, without the sqrt.
    #[inline(always)]
    #[must_use]
    pub fn distance_sq(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }

    /// CSS functional notation, e.g. `rgb(12, 34, 56)`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Brute-force nearest color. Ties keep the first minimum encountered.
///
/// Returns `None` for an empty candidate list.
///
/// # Example
/// ```
/// use gg_core::color::{nearest_color, Rgb};
/// let palette = [Rgb::new(0, 0, 0), Rgb::new(250, 10, 10)];
/// assert_eq!(nearest_color(&palette, Rgb::new(255, 0, 0)), Some(Rgb::new(250, 10, 10)));
/// ```
#[must_use]
pub fn nearest_color(candidates: &[Rgb], target: Rgb) -> Option<Rgb> {
    let mut best: Option<(u32, Rgb)> = None;
    for &c in candidates {
        let d = target.distance_sq(c);
        match best {
            Some((bd, _)) if d >= bd => {}
            _ => best = Some((d, c)),
        }
    }
    best.map(|(_, c)| c)
}
