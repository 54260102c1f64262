use gg_core::error::ConvertError;
use gg_core::frame::FrameBuffer;
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Rééchantillonneur réutilisable autour de `fast_image_resize` (bilinéaire).
///
/// Une instance par conversion : le resizer garde ses tampons internes
/// d'une bande à l'autre.
///
/// # Example
/// ```
/// use gg_core::FrameBuffer;
/// use gg_source::resize::Resampler;
///
/// let mut r = Resampler::new();
/// let src = FrameBuffer::new(100, 80);
/// let mut dst = FrameBuffer::new(10, 4);
/// r.resample_region(&src, 40.0, 40.0, &mut dst).unwrap();
/// ```
pub struct Resampler {
    inner: FirResizer,
}

impl Resampler {
    /// Create a resampler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
        }
    }

    /// Resize the whole of `src` into `dst`; `dst` dimensions decide the output size.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty source or destination.
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), ConvertError> {
        self.resample_region(src, 0.0, f64::from(src.height), dst)
    }

    /// Draw the full-width horizontal slice `[top, top + height)` of `src`
    /// into `dst`, stretched to its dimensions.
    ///
    /// `top` and `height` are in source pixels and may be fractional. The
    /// slice is clamped to the source bounds.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty source, destination or slice;
    /// `InternalInvariantViolation` if the resizer rejects the buffers.
    pub fn resample_region(
        &mut self,
        src: &FrameBuffer,
        top: f64,
        height: f64,
        dst: &mut FrameBuffer,
    ) -> Result<(), ConvertError> {
        if src.is_empty() {
            return Err(ConvertError::EmptyImage {
                width: src.width,
                height: src.height,
            });
        }
        if dst.is_empty() {
            return Err(ConvertError::invalid(format!(
                "destination vide : {}×{}",
                dst.width, dst.height
            )));
        }

        let src_h = f64::from(src.height);
        let top = top.clamp(0.0, src_h);
        let height = height.min(src_h - top);
        if height.is_nan() || height <= 0.0 {
            return Err(ConvertError::invalid(format!(
                "tranche source vide : top={top}, hauteur={height}"
            )));
        }

        let full = top <= 0.0 && height >= src_h;
        if full && src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        let src_image = ImageRef::new(src.width, src.height, &src.data, PixelType::U8x3)
            .map_err(|e| ConvertError::invariant(format!("source invalide : {e}")))?;
        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .map_err(|e| ConvertError::invariant(format!("destination invalide : {e}")))?;

        let options = ResizeOptions::new()
            .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear))
            .crop(0.0, top, f64::from(src.width), height);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ConvertError::invariant(format!("échec du redimensionnement : {e}")))
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot resize of a whole frame.
///
/// # Errors
/// Same as [`Resampler::resample_region`].
///
/// # Example
/// ```
/// use gg_core::FrameBuffer;
/// use gg_source::resize::resize_frame;
/// let dst = resize_frame(&FrameBuffer::new(100, 100), 50, 25).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 25));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer, ConvertError> {
    let mut dst = FrameBuffer::new(width, height);
    Resampler::new().resize_into(src, &mut dst)?;
    Ok(dst)
}
