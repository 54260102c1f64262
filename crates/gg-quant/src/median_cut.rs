use gg_core::ConvertError;

use crate::histogram::{AXIS_LEN, Histogram};
use crate::vbox::{Axis, VBox};

/// Outcome of one median-cut step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
    /// Two boxes partitioning the parent along its longest axis.
    Pair(VBox, VBox),
    /// The box cannot be split further (a single pixel or a single bucket).
    /// This is a normal outcome, not a failure.
    Terminal(VBox),
}

/// Population of each coordinate along `axis`, summed over the two other axes.
fn axis_population(histo: &Histogram, vbox: &VBox, axis: Axis) -> [u64; AXIS_LEN] {
    let mut pop = [0u64; AXIS_LEN];
    let (r1, r2) = vbox.range(Axis::R);
    let (g1, g2) = vbox.range(Axis::G);
    let (b1, b2) = vbox.range(Axis::B);
    for r in r1..=r2 {
        for g in g1..=g2 {
            for b in b1..=b2 {
                let coord = match axis {
                    Axis::R => r,
                    Axis::G => g,
                    Axis::B => b,
                };
                pop[usize::from(coord)] += u64::from(histo.get(r, g, b));
            }
        }
    }
    pop
}

/// Split `vbox` at the population median of its longest axis.
///
/// The cut is biased toward the larger side, then snapped forward onto a
/// populated coordinate and pulled back if that leaves the second half empty.
///
/// # Errors
/// `InternalInvariantViolation` if called on an empty box, or if no median
/// crossing exists on a populated box.
///
/// # Example
/// ```
/// use gg_core::Rgb;
/// use gg_quant::histogram::Histogram;
/// use gg_quant::median_cut::{median_cut, Split};
/// use gg_quant::vbox::VBox;
///
/// let histo = Histogram::build(&[Rgb::new(0, 0, 0), Rgb::new(255, 0, 0)]);
/// let vbox = VBox::summarize(histo.bounds(), &histo);
/// match median_cut(&histo, &vbox).unwrap() {
///     Split::Pair(a, b) => assert_eq!(a.count() + b.count(), 2),
///     Split::Terminal(_) => unreachable!(),
/// }
/// ```
pub fn median_cut(histo: &Histogram, vbox: &VBox) -> Result<Split, ConvertError> {
    if vbox.count() == 0 {
        return Err(ConvertError::invariant("découpage d'une boîte vide"));
    }
    if !vbox.is_splittable() {
        return Ok(Split::Terminal(*vbox));
    }

    let axis = vbox.longest_axis();
    let (d1, d2) = vbox.range(axis);
    let (lo, hi) = (usize::from(d1), usize::from(d2));

    let pop = axis_population(histo, vbox, axis);
    let mut partial = [0u64; AXIS_LEN];
    let mut total = 0u64;
    for i in lo..=hi {
        total += pop[i];
        partial[i] = total;
    }
    let lookahead = |i: usize| total - partial[i];

    let Some(median) = (lo..=hi).find(|&i| 2 * partial[i] > total) else {
        return Err(ConvertError::invariant(format!(
            "aucun point médian sur une boîte de {} pixels",
            vbox.count()
        )));
    };

    // Bias toward the larger side.
    let left = (median - lo) as i64;
    let right = (hi - median) as i64;
    let mut cut = if left <= right {
        (median as i64 + right / 2).min(hi as i64 - 1)
    } else {
        // Truncation toward zero of `median - 1 - left / 2`.
        ((2 * (median as i64 - 1) - left) / 2).max(lo as i64)
    } as usize;

    while partial[cut] == 0 {
        cut += 1;
    }
    while lookahead(cut) == 0 && cut > lo && partial[cut - 1] > 0 {
        cut -= 1;
    }
    // Both halves must keep a non-empty range.
    if cut >= hi {
        cut = hi - 1;
    }

    let first = vbox.ranges_with(axis, d1, cut as u8);
    let second = vbox.ranges_with(axis, cut as u8 + 1, d2);
    Ok(Split::Pair(
        VBox::summarize(first, histo),
        VBox::summarize(second, histo),
    ))
}
