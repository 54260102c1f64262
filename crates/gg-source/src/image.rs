use std::path::Path;

use gg_core::error::ConvertError;
use gg_core::frame::FrameBuffer;
use image::{DynamicImage, RgbaImage};

/// Décode une image depuis le disque (PNG, JPEG, BMP, GIF).
///
/// L'alpha est aplati sur fond noir : le cœur ne voit que du RGB.
///
/// # Errors
/// `DecodeFailure` if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use gg_source::image::load_image;
/// let frame = load_image("photo.png").unwrap();
/// assert!(frame.width > 0);
/// ```
pub fn load_image(path: impl AsRef<Path>) -> Result<FrameBuffer, ConvertError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| {
        ConvertError::DecodeFailure(format!("Impossible de charger {} : {e}", path.display()))
    })?;
    log::debug!(
        "Image chargée : {} ({}×{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(flatten(&img))
}

/// Same as [`load_image`], from an in-memory encoded buffer.
///
/// # Errors
/// `DecodeFailure` if the format is unknown or the data is corrupt.
pub fn decode_bytes(bytes: &[u8]) -> Result<FrameBuffer, ConvertError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ConvertError::DecodeFailure(e.to_string()))?;
    Ok(flatten(&img))
}

/// RGBA → RGB over black.
fn flatten(img: &DynamicImage) -> FrameBuffer {
    let rgba: RgbaImage = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let a = u16::from(a);
        for c in [r, g, b] {
            data.push((u16::from(c) * a / 255) as u8);
        }
    }
    FrameBuffer {
        data,
        width,
        height,
    }
}
