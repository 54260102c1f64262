use gg_core::config::{GlyphMode, PipelineLimits, RenderOptions};
use gg_core::error::ConvertError;

/// Géométrie d'une conversion : grille d'échantillonnage et grille de sortie.
///
/// La grille d'échantillonnage grandit géométriquement avec `scale`. La grille
/// de sortie en est la borne par la taille demandée, et c'est elle que chaque
/// bande rééchantillonne.
///
/// # Example
/// ```
/// use gg_ascii::sampling::SamplingGeometry;
/// use gg_core::config::{PipelineLimits, RenderOptions};
///
/// let options = RenderOptions { art_width: 100, art_height: 100, ..RenderOptions::default() };
/// let geo = SamplingGeometry::compute(&options, &PipelineLimits::default(), 400, 200).unwrap();
/// assert_eq!((geo.sampling_width, geo.sampling_height), (100, 25));
/// assert_eq!((geo.grid_width, geo.grid_height), (100, 25));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingGeometry {
    /// Computed sampling width.
    pub sampling_width: u32,
    /// Computed sampling height.
    pub sampling_height: u32,
    /// Output columns: `min(art_width, sampling_width)`.
    pub grid_width: u32,
    /// Output rows: `min(art_height, sampling_height)`.
    pub grid_height: u32,
}

impl SamplingGeometry {
    /// Compute the geometry for an `image_width × image_height` source.
    ///
    /// Art dimensions are bounded by `limits.max_art_dimension` first. Text
    /// mode derives the height from the image aspect and the cell aspect;
    /// shape mode scales both requested dimensions.
    ///
    /// # Errors
    /// `EmptyImage` if either image dimension is zero.
    pub fn compute(
        options: &RenderOptions,
        limits: &PipelineLimits,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, ConvertError> {
        if image_width == 0 || image_height == 0 {
            return Err(ConvertError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }

        let max = limits.max_art_dimension.max(1);
        let target_w = options.art_width.clamp(1, max);
        let target_h = options.art_height.clamp(1, max);
        let steps = f64::from(options.scale) - 1.0;

        let (sampling_width, sampling_height) = match options.glyph_mode {
            GlyphMode::Text => {
                let aspect = f64::from(image_height) / f64::from(image_width);
                let w = (f64::from(target_w) * f64::from(limits.text_growth).powf(steps)).round();
                let h = (w * aspect * f64::from(limits.text_cell_aspect)).round();
                (to_dimension(w), to_dimension(h))
            }
            GlyphMode::Shape => {
                let growth = f64::from(limits.shape_growth).powf(steps);
                (
                    to_dimension((f64::from(target_w) * growth).round()),
                    to_dimension((f64::from(target_h) * growth).round()),
                )
            }
        };

        let geometry = Self {
            sampling_width,
            sampling_height,
            grid_width: target_w.min(sampling_width),
            grid_height: target_h.min(sampling_height),
        };
        log::debug!(
            "Échantillonnage {}×{} pour une demande {}×{} → grille {}×{}",
            sampling_width,
            sampling_height,
            target_w,
            target_h,
            geometry.grid_width,
            geometry.grid_height
        );
        Ok(geometry)
    }

    /// Bands of at most `chunk_height` rows covering the output grid.
    ///
    /// # Example
    /// ```
    /// use gg_ascii::sampling::{Band, SamplingGeometry};
    /// let geo = SamplingGeometry { sampling_width: 4, sampling_height: 2500, grid_width: 4, grid_height: 2500 };
    /// let bands: Vec<Band> = geo.bands(1000).collect();
    /// assert_eq!(bands.len(), 3);
    /// assert_eq!(bands[2], Band { start: 2000, rows: 500 });
    /// ```
    pub fn bands(&self, chunk_height: u32) -> impl Iterator<Item = Band> + use<> {
        let total = self.grid_height;
        let chunk = chunk_height.max(1);
        (0..total.div_ceil(chunk)).map(move |i| {
            let start = i * chunk;
            Band {
                start,
                rows: chunk.min(total - start),
            }
        })
    }

    /// Number of bands for `chunk_height`.
    #[must_use]
    pub fn band_count(&self, chunk_height: u32) -> u32 {
        self.grid_height.div_ceil(chunk_height.max(1))
    }
}

/// Horizontal slice of the output grid, processed between two checkpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    /// First grid row.
    pub start: u32,
    /// Number of rows.
    pub rows: u32,
}

impl Band {
    /// Source rows `(top, height)` this band draws from, possibly fractional.
    ///
    /// # Example
    /// ```
    /// use gg_ascii::sampling::Band;
    /// let band = Band { start: 50, rows: 50 };
    /// assert_eq!(band.source_slice(100, 300), (150.0, 150.0));
    /// ```
    #[must_use]
    pub fn source_slice(&self, grid_height: u32, image_height: u32) -> (f64, f64) {
        let grid_h = f64::from(grid_height.max(1));
        let img_h = f64::from(image_height);
        (
            f64::from(self.start) / grid_h * img_h,
            f64::from(self.rows) / grid_h * img_h,
        )
    }

    /// Rows completed once this band is done.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.start + self.rows
    }
}

/// Rounded sampling dimension, at least one sample.
fn to_dimension(v: f64) -> u32 {
    if v.is_finite() {
        v.clamp(1.0, f64::from(u32::MAX)) as u32
    } else {
        1
    }
}
