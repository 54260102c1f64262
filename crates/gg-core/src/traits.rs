use crate::color::Rgb;
use crate::frame::FrameBuffer;

/// Reçoit la progression d'une conversion, une fois par bande terminée.
///
/// Implémenté pour toute closure `FnMut(f32)`.
///
/// # Example
/// ```
/// use gg_core::traits::ProgressSink;
///
/// let mut seen = Vec::new();
/// let mut sink = |p: f32| seen.push(p);
/// sink.report(50.0);
/// sink.report(100.0);
/// assert_eq!(seen, vec![50.0, 100.0]);
/// ```
pub trait ProgressSink {
    /// `percent` is in [0, 100] and never decreases within one request.
    fn report(&mut self, percent: f32);
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn report(&mut self, percent: f32) {
        self(percent);
    }
}

/// Discards every report.
///
/// # Example
/// ```
/// use gg_core::traits::{NoProgress, ProgressSink};
/// NoProgress.report(10.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: f32) {}
}

/// Lecture pixel par pixel d'une image décodée.
///
/// # Example
/// ```
/// use gg_core::traits::Raster;
/// use gg_core::{FrameBuffer, Rgb};
///
/// let fb = FrameBuffer::filled(3, 2, Rgb::new(9, 9, 9));
/// assert_eq!(fb.dimensions(), (3, 2));
/// assert_eq!(Raster::rgb_at(&fb, 2, 1), Rgb::new(9, 9, 9));
/// ```
pub trait Raster {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Pixel at (x, y). Callers stay within `dimensions()`.
    fn rgb_at(&self, x: u32, y: u32) -> Rgb;
}

impl Raster for FrameBuffer {
    #[inline(always)]
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline(always)]
    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        self.pixel(x, y)
    }
}
