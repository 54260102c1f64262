use gg_core::Rgb;

/// Bits significatifs conservés par canal.
pub const SIGBITS: u32 = 5;
/// Décalage appliqué à chaque canal 8 bits.
pub const RSHIFT: u32 = 8 - SIGBITS;
/// Taille d'un pas de quantification en espace 8 bits.
pub const MULT: u32 = 1 << RSHIFT;
/// Nombre de buckets : 2^15.
pub const HISTO_SIZE: usize = 1 << (3 * SIGBITS);
/// Nombre de coordonnées par axe quantifié.
pub const AXIS_LEN: usize = 1 << SIGBITS;

/// Flat index of a quantized (5-bit per channel) color.
#[inline(always)]
#[must_use]
pub fn color_index(r: u8, g: u8, b: u8) -> usize {
    (usize::from(r) << (2 * SIGBITS)) | (usize::from(g) << SIGBITS) | usize::from(b)
}

/// Quantize one 8-bit channel to its 5-bit coordinate.
#[inline(always)]
#[must_use]
pub fn quantize_channel(c: u8) -> u8 {
    c >> RSHIFT
}

/// Inclusive per-axis ranges in quantized space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ranges {
    /// Red range.
    pub r: (u8, u8),
    /// Green range.
    pub g: (u8, u8),
    /// Blue range.
    pub b: (u8, u8),
}

impl Ranges {
    /// Whether the quantized form of `pixel` lies inside.
    #[inline(always)]
    #[must_use]
    pub fn contains(&self, pixel: Rgb) -> bool {
        let r = quantize_channel(pixel.r);
        let g = quantize_channel(pixel.g);
        let b = quantize_channel(pixel.b);
        (self.r.0..=self.r.1).contains(&r)
            && (self.g.0..=self.g.1).contains(&g)
            && (self.b.0..=self.b.1).contains(&b)
    }
}

/// Histogramme dense des couleurs quantifiées sur 15 bits.
///
/// Construit une fois par appel de quantification, immuable ensuite.
///
/// # Example
/// ```
/// use gg_core::Rgb;
/// use gg_quant::histogram::Histogram;
/// let h = Histogram::build(&[Rgb::new(255, 0, 0), Rgb::new(250, 1, 2)]);
/// assert_eq!(h.get(31, 0, 0), 2);
/// assert_eq!(h.total(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Histogram {
    counts: Box<[u32]>,
    bounds: Ranges,
    total: u64,
}

impl Histogram {
    /// Bucket every pixel and track the observed quantized bounds.
    ///
    /// An empty input yields an empty histogram whose bounds are `(0, 0)` on
    /// every axis; callers reject empty input before building.
    #[must_use]
    pub fn build(pixels: &[Rgb]) -> Self {
        let mut counts = vec![0u32; HISTO_SIZE].into_boxed_slice();
        let (mut rmin, mut rmax) = (u8::MAX, 0u8);
        let (mut gmin, mut gmax) = (u8::MAX, 0u8);
        let (mut bmin, mut bmax) = (u8::MAX, 0u8);

        for p in pixels {
            let r = quantize_channel(p.r);
            let g = quantize_channel(p.g);
            let b = quantize_channel(p.b);
            rmin = rmin.min(r);
            rmax = rmax.max(r);
            gmin = gmin.min(g);
            gmax = gmax.max(g);
            bmin = bmin.min(b);
            bmax = bmax.max(b);
            let slot = &mut counts[color_index(r, g, b)];
            *slot = slot.saturating_add(1);
        }

        let bounds = if pixels.is_empty() {
            Ranges {
                r: (0, 0),
                g: (0, 0),
                b: (0, 0),
            }
        } else {
            Ranges {
                r: (rmin, rmax),
                g: (gmin, gmax),
                b: (bmin, bmax),
            }
        };

        Self {
            counts,
            bounds,
            total: pixels.len() as u64,
        }
    }

    /// Count of the bucket at quantized coordinates.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, r: u8, g: u8, b: u8) -> u32 {
        self.counts[color_index(r, g, b)]
    }

    /// Bounding box of every observed color.
    #[must_use]
    pub fn bounds(&self) -> Ranges {
        self.bounds
    }

    /// Number of pixels bucketed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_layout_is_rgb_major() {
        assert_eq!(color_index(0, 0, 1), 1);
        assert_eq!(color_index(0, 1, 0), 32);
        assert_eq!(color_index(1, 0, 0), 1024);
        assert_eq!(color_index(31, 31, 31), HISTO_SIZE - 1);
    }

    #[test]
    fn bounds_track_quantized_extremes() {
        let h = Histogram::build(&[Rgb::new(8, 200, 7), Rgb::new(255, 16, 0)]);
        let b = h.bounds();
        assert_eq!(b.r, (1, 31));
        assert_eq!(b.g, (2, 25));
        assert_eq!(b.b, (0, 0));
    }

    #[test]
    fn ranges_contains_uses_shifted_channels() {
        let ranges = Ranges {
            r: (31, 31),
            g: (0, 0),
            b: (0, 0),
        };
        assert!(ranges.contains(Rgb::new(248, 7, 7)));
        assert!(!ranges.contains(Rgb::new(247, 0, 0)));
    }
}
