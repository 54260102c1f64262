use gg_core::Rgb;

use crate::histogram::{Histogram, MULT, Ranges};

/// One of the three color axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
}

/// Boîte de volume couleur en espace quantifié.
///
/// Immuable : `volume`, `count` et `average` sont calculés une seule fois à la
/// construction par [`VBox::summarize`]. Un découpage produit de nouvelles boîtes.
///
/// # Example
/// ```
/// use gg_core::Rgb;
/// use gg_quant::histogram::Histogram;
/// use gg_quant::vbox::VBox;
///
/// let histo = Histogram::build(&[Rgb::new(255, 0, 0); 4]);
/// let vbox = VBox::summarize(histo.bounds(), &histo);
/// assert_eq!(vbox.count(), 4);
/// assert_eq!(vbox.volume(), 1);
/// assert_eq!(vbox.average(), Rgb::new(252, 4, 4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VBox {
    ranges: Ranges,
    volume: u32,
    count: u64,
    average: Rgb,
}

impl VBox {
    /// Build a box over `ranges` and compute its derived attributes.
    ///
    /// The average is the population-weighted centroid of bucket centers,
    /// truncated; an empty box falls back to its geometric center.
    #[must_use]
    pub fn summarize(ranges: Ranges, histo: &Histogram) -> Self {
        let (r1, r2) = ranges.r;
        let (g1, g2) = ranges.g;
        let (b1, b2) = ranges.b;
        debug_assert!(r1 <= r2 && g1 <= g2 && b1 <= b2, "plage inversée");

        let volume =
            u32::from(r2 - r1 + 1) * u32::from(g2 - g1 + 1) * u32::from(b2 - b1 + 1);

        let mult = u64::from(MULT);
        let mut count = 0u64;
        // Sums of h * (2i + 1) * MULT, i.e. twice the bucket-center sums.
        let (mut rsum, mut gsum, mut bsum) = (0u64, 0u64, 0u64);
        for r in r1..=r2 {
            for g in g1..=g2 {
                for b in b1..=b2 {
                    let h = u64::from(histo.get(r, g, b));
                    if h == 0 {
                        continue;
                    }
                    count += h;
                    rsum += h * (2 * u64::from(r) + 1) * mult;
                    gsum += h * (2 * u64::from(g) + 1) * mult;
                    bsum += h * (2 * u64::from(b) + 1) * mult;
                }
            }
        }

        let average = if count > 0 {
            let denom = 2 * count;
            Rgb::new(
                (rsum / denom) as u8,
                (gsum / denom) as u8,
                (bsum / denom) as u8,
            )
        } else {
            let center = |lo: u8, hi: u8| ((MULT * (u32::from(lo) + u32::from(hi) + 1)) / 2) as u8;
            Rgb::new(center(r1, r2), center(g1, g2), center(b1, b2))
        };

        Self {
            ranges,
            volume,
            count,
            average,
        }
    }

    /// Inclusive quantized ranges.
    #[must_use]
    pub fn ranges(&self) -> Ranges {
        self.ranges
    }

    /// Number of histogram cells covered.
    #[must_use]
    pub fn volume(&self) -> u32 {
        self.volume
    }

    /// Number of pixels inside.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Representative color.
    #[must_use]
    pub fn average(&self) -> Rgb {
        self.average
    }

    /// More than one pixel spread over more than one bucket.
    #[must_use]
    pub fn is_splittable(&self) -> bool {
        self.count > 1 && self.volume > 1
    }

    /// Pass-1 priority key.
    #[must_use]
    pub fn count_volume(&self) -> u64 {
        self.count * u64::from(self.volume)
    }

    /// Exact containment of a pixel's quantized coordinates.
    #[must_use]
    pub fn contains(&self, pixel: Rgb) -> bool {
        self.ranges.contains(pixel)
    }

    /// Inclusive range along `axis`.
    #[must_use]
    pub fn range(&self, axis: Axis) -> (u8, u8) {
        match axis {
            Axis::R => self.ranges.r,
            Axis::G => self.ranges.g,
            Axis::B => self.ranges.b,
        }
    }

    /// Axis of greatest extent. Ties resolve red, then green, then blue.
    #[must_use]
    pub fn longest_axis(&self) -> Axis {
        let w = |(lo, hi): (u8, u8)| hi - lo + 1;
        let (rw, gw, bw) = (w(self.ranges.r), w(self.ranges.g), w(self.ranges.b));
        let max = rw.max(gw).max(bw);
        if max == rw {
            Axis::R
        } else if max == gw {
            Axis::G
        } else {
            Axis::B
        }
    }

    /// Ranges of this box with `axis` replaced by `[lo, hi]`.
    #[must_use]
    pub fn ranges_with(&self, axis: Axis, lo: u8, hi: u8) -> Ranges {
        let mut ranges = self.ranges;
        match axis {
            Axis::R => ranges.r = (lo, hi),
            Axis::G => ranges.g = (lo, hi),
            Axis::B => ranges.b = (lo, hi),
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(r: (u8, u8), g: (u8, u8), b: (u8, u8)) -> Ranges {
        Ranges { r, g, b }
    }

    #[test]
    fn empty_box_uses_geometric_center() {
        let histo = Histogram::build(&[Rgb::new(0, 0, 0)]);
        let vbox = VBox::summarize(ranges((10, 11), (0, 31), (4, 4)), &histo);
        assert_eq!(vbox.count(), 0);
        assert_eq!(vbox.volume(), 2 * 32);
        // 8 * (10 + 11 + 1) / 2 = 88 ; 8 * 32 / 2 = 128 ; 8 * 9 / 2 = 36
        assert_eq!(vbox.average(), Rgb::new(88, 128, 36));
    }

    #[test]
    fn average_is_weighted_and_truncated() {
        // Trois pixels au bucket r=0, un pixel au bucket r=1 (g, b nuls).
        let pixels = [
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(8, 0, 0),
        ];
        let histo = Histogram::build(&pixels);
        let vbox = VBox::summarize(histo.bounds(), &histo);
        // r: (3 * 4 + 1 * 12) / 4 = 6
        assert_eq!(vbox.average(), Rgb::new(6, 4, 4));
        assert_eq!(vbox.count(), 4);
        assert_eq!(vbox.count_volume(), 8);
    }

    #[test]
    fn longest_axis_prefers_red_on_tie() {
        let histo = Histogram::build(&[Rgb::new(0, 0, 0)]);
        let vbox = VBox::summarize(ranges((0, 3), (0, 3), (0, 1)), &histo);
        assert_eq!(vbox.longest_axis(), Axis::R);
        let vbox = VBox::summarize(ranges((0, 1), (0, 3), (0, 3)), &histo);
        assert_eq!(vbox.longest_axis(), Axis::G);
        let vbox = VBox::summarize(ranges((0, 1), (0, 1), (0, 3)), &histo);
        assert_eq!(vbox.longest_axis(), Axis::B);
    }

    #[test]
    fn summarize_is_order_independent() {
        let histo = Histogram::build(&[Rgb::new(40, 80, 120), Rgb::new(200, 10, 30)]);
        let a = VBox::summarize(histo.bounds(), &histo);
        let b = VBox::summarize(histo.bounds(), &histo);
        assert_eq!(a, b);
        assert!(a.contains(Rgb::new(40, 80, 120)));
    }
}
