//! Median-cut color quantizer for glyphgrid.
//!
//! Reduces a list of RGB samples to at most `k` representative colors by
//! recursively splitting boxes of a 5-bit-per-channel histogram.

pub mod histogram;
pub mod median_cut;
pub mod palette;
pub mod vbox;

use std::collections::VecDeque;

use gg_core::{ConvertError, Rgb};

use crate::histogram::Histogram;
use crate::median_cut::{Split, median_cut};
pub use crate::palette::Palette;
use crate::vbox::VBox;

/// Share of the target palette produced by the population-weighted first pass.
pub const FRACT_BY_POPULATION: f64 = 0.75;

/// Iteration cap of each splitting pass.
pub const MAX_ITERATIONS: usize = 1000;

/// Smallest and largest accepted palette size.
pub const PALETTE_RANGE: std::ops::RangeInclusive<usize> = 2..=256;

/// Quantize `pixels` down to at most `max_colors` colors.
///
/// Deterministic: the same pixel multiset and `max_colors` always produce the
/// same palette. Boxes left without population are not emitted, so the
/// palette may hold fewer colors than requested.
///
/// # Errors
/// `InvalidArgument` for an empty pixel list or `max_colors` outside [2, 256];
/// `InternalInvariantViolation` if a populated box fails to split.
///
/// # Example
/// ```
/// use gg_core::Rgb;
/// use gg_quant::quantize;
///
/// let pixels = vec![Rgb::new(255, 0, 0); 100];
/// let palette = quantize(&pixels, 8).unwrap();
/// assert_eq!(palette.colors(), vec![Rgb::new(252, 4, 4)]);
/// ```
pub fn quantize(pixels: &[Rgb], max_colors: usize) -> Result<Palette, ConvertError> {
    if pixels.is_empty() {
        return Err(ConvertError::invalid("aucun pixel à quantifier"));
    }
    if !PALETTE_RANGE.contains(&max_colors) {
        return Err(ConvertError::invalid(format!(
            "taille de palette hors de [2, 256] : {max_colors}"
        )));
    }

    let histo = Histogram::build(pixels);
    let mut queue = VecDeque::new();
    let mut done = Vec::new();
    settle(VBox::summarize(histo.bounds(), &histo), &mut queue, &mut done);

    // Passe 1 : priorité count × volume.
    let first_target = (FRACT_BY_POPULATION * max_colors as f64).ceil() as usize;
    queue.make_contiguous().sort_by_key(VBox::count_volume);
    split_boxes(&mut queue, &mut done, first_target, VBox::count_volume, &histo)?;

    // Passe 2 : priorité count.
    queue.make_contiguous().sort_by_key(VBox::count);
    split_boxes(&mut queue, &mut done, max_colors, VBox::count, &histo)?;

    let mut boxes: Vec<VBox> = queue.into();
    boxes.append(&mut done);
    if boxes.is_empty() {
        return Err(ConvertError::invariant(
            "aucune boîte peuplée après quantification",
        ));
    }
    log::debug!(
        "Palette : {} couleurs ({} demandées, {} pixels)",
        boxes.len(),
        max_colors,
        histo.total()
    );
    Ok(Palette::from_boxes(boxes))
}

/// Route a fresh box: splittable boxes wait in `queue`, terminal ones are
/// final, empty ones are dropped.
fn settle(vbox: VBox, queue: &mut VecDeque<VBox>, done: &mut Vec<VBox>) {
    if vbox.is_splittable() {
        queue.push_back(vbox);
    } else if vbox.count() > 0 {
        done.push(vbox);
    }
}

/// Split boxes from the front of `queue` until `queue` and `done` together
/// hold `target` boxes.
///
/// `queue` only holds splittable boxes, kept sorted ascending by `key`
/// (stable, so equal keys keep insertion order); the front box is always the
/// next one cut. Terminal children go to `done` and are never taken again.
/// The pass ends when nothing splittable is left, or after [`MAX_ITERATIONS`]
/// cuts.
fn split_boxes(
    queue: &mut VecDeque<VBox>,
    done: &mut Vec<VBox>,
    target: usize,
    key: fn(&VBox) -> u64,
    histo: &Histogram,
) -> Result<(), ConvertError> {
    for _ in 0..MAX_ITERATIONS {
        if queue.len() + done.len() >= target {
            return Ok(());
        }
        let Some(vbox) = queue.pop_front() else {
            log::trace!("Plus aucun découpage possible ({} boîtes)", done.len());
            return Ok(());
        };

        match median_cut(histo, &vbox)? {
            Split::Terminal(vbox) => done.push(vbox),
            Split::Pair(a, b) => {
                settle(a, queue, done);
                settle(b, queue, done);
                queue.make_contiguous().sort_by_key(key);
            }
        }
    }
    Ok(())
}
