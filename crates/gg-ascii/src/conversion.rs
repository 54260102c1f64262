use std::sync::Arc;

use gg_core::config::{ColorMode, GlyphMode, PipelineLimits, RenderOptions};
use gg_core::error::ConvertError;
use gg_core::frame::{FrameBuffer, GlyphCell, GlyphGrid};
use gg_core::traits::ProgressSink;
use gg_source::resize::Resampler;

use crate::color_map::ColorResolver;
use crate::glyph::GlyphPicker;
use crate::preview;
use crate::render::render_band;
use crate::sampling::SamplingGeometry;

/// Phase courante d'une conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing done yet.
    Idle,
    /// Options, limits and image are being checked.
    Validating,
    /// Color mode: the preview palette is next.
    BuildingPalette,
    /// Band `band` (0-based) of `bands` is next.
    Sampling {
        /// Next band.
        band: u32,
        /// Total bands.
        bands: u32,
    },
    /// Every band is done; [`Conversion::finish`] yields the grid.
    Complete,
    /// A step failed. Absorbing: partial rows are gone.
    Failed,
}

/// Outcome of one [`Conversion::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Inputs accepted, geometry computed.
    Validated,
    /// Palette ready, with this many colors.
    PaletteBuilt {
        /// Palette size.
        colors: usize,
    },
    /// One band done. Percent of grid rows completed, in (0, 100].
    Progress(f32),
    /// Nothing left to do.
    Complete,
}

/// Conversion image → grille de glyphes, exécutée pas à pas.
///
/// Chaque appel à [`step`](Self::step) avance d'une phase : validation,
/// palette (mode couleur), puis une bande de lignes par appel. L'appelant
/// reprend la main entre deux pas ; [`convert`] enchaîne tout.
///
/// Tout l'état (compteur séquentiel, palette, lignes produites) appartient à
/// la conversion : deux conversions concurrentes ne partagent rien.
///
/// # Example
/// ```
/// use gg_ascii::conversion::{Conversion, Phase, Step};
/// use gg_core::config::{ColorMode, PipelineLimits, RenderOptions};
/// use gg_core::{FrameBuffer, Rgb};
///
/// let frame = FrameBuffer::filled(40, 40, Rgb::new(200, 200, 200));
/// let options = RenderOptions {
///     color_mode: ColorMode::Monochrome,
///     art_width: 10,
///     art_height: 10,
///     ..RenderOptions::default()
/// };
/// let limits = PipelineLimits { chunk_height: 2, ..PipelineLimits::default() };
/// let mut conversion = Conversion::new(&frame, &options, &limits, None);
///
/// assert_eq!(conversion.step().unwrap(), Step::Validated);
/// assert_eq!(conversion.phase(), Phase::Sampling { band: 0, bands: 3 });
/// while conversion.step().unwrap() != Step::Complete {}
/// let grid = conversion.finish().unwrap();
/// assert_eq!((grid.width(), grid.height()), (10, 5));
/// ```
pub struct Conversion<'a> {
    frame: &'a FrameBuffer,
    options: RenderOptions,
    limits: PipelineLimits,
    shape: Option<Arc<str>>,
    phase: Phase,
    geometry: Option<SamplingGeometry>,
    picker: GlyphPicker,
    colors: ColorResolver,
    resampler: Resampler,
    band_buf: FrameBuffer,
    cells: Vec<GlyphCell>,
}

impl<'a> Conversion<'a> {
    /// Prepare a conversion. No work happens until the first [`step`](Self::step).
    ///
    /// `shape` is the opaque shape-glyph markup, required in shape mode.
    #[must_use]
    pub fn new(
        frame: &'a FrameBuffer,
        options: &RenderOptions,
        limits: &PipelineLimits,
        shape: Option<&str>,
    ) -> Self {
        Self {
            frame,
            options: options.clone(),
            limits: limits.clone(),
            shape: shape.map(Arc::from),
            phase: Phase::Idle,
            geometry: None,
            picker: GlyphPicker::for_options(options),
            colors: ColorResolver::Monochrome,
            resampler: Resampler::new(),
            band_buf: FrameBuffer::new(0, 0),
            cells: Vec::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Geometry, once validated.
    #[must_use]
    pub fn geometry(&self) -> Option<SamplingGeometry> {
        self.geometry
    }

    /// Advance by one phase or one band.
    ///
    /// # Errors
    /// Validation errors (`InvalidArgument`, `MissingInput`, `EmptyImage`),
    /// quantizer and resampler errors. Any error moves the conversion to
    /// [`Phase::Failed`] and discards every row produced so far; stepping a
    /// failed conversion is an `InvalidArgument`.
    pub fn step(&mut self) -> Result<Step, ConvertError> {
        let result = match self.phase {
            Phase::Idle => self.validate(),
            Phase::Validating => Err(ConvertError::invariant("validation interrompue")),
            Phase::BuildingPalette => self.build_palette(),
            Phase::Sampling { band, bands } => self.sample_band(band, bands),
            Phase::Complete => Ok(Step::Complete),
            Phase::Failed => Err(ConvertError::invalid("conversion déjà en échec")),
        };
        if let Err(e) = &result {
            if self.phase != Phase::Failed {
                log::warn!("Conversion abandonnée : {e}");
            }
            self.phase = Phase::Failed;
            self.cells = Vec::new();
        }
        result
    }

    /// Take the finished grid.
    ///
    /// # Errors
    /// `InvalidArgument` if the conversion has not reached [`Phase::Complete`].
    pub fn finish(self) -> Result<GlyphGrid, ConvertError> {
        if self.phase != Phase::Complete {
            return Err(ConvertError::invalid(format!(
                "conversion inachevée : {:?}",
                self.phase
            )));
        }
        let geometry = self.validated_geometry()?;
        let shape = match self.options.glyph_mode {
            GlyphMode::Shape => self.shape,
            GlyphMode::Text => None,
        };
        GlyphGrid::new(
            geometry.grid_width,
            geometry.grid_height,
            self.cells,
            self.options.glyph_mode,
            shape,
        )
    }

    fn validate(&mut self) -> Result<Step, ConvertError> {
        self.phase = Phase::Validating;
        self.options.validate(self.shape.as_deref())?;
        self.limits.validate()?;
        self.options.clamp_all(&self.limits);

        let geometry = SamplingGeometry::compute(
            &self.options,
            &self.limits,
            self.frame.width,
            self.frame.height,
        )?;
        self.geometry = Some(geometry);
        self.picker = GlyphPicker::for_options(&self.options);

        self.phase = match self.options.color_mode {
            ColorMode::Color => Phase::BuildingPalette,
            ColorMode::Monochrome => Phase::Sampling {
                band: 0,
                bands: geometry.band_count(self.limits.chunk_height),
            },
        };
        Ok(Step::Validated)
    }

    fn build_palette(&mut self) -> Result<Step, ConvertError> {
        let geometry = self.validated_geometry()?;
        let colors = preview::build_palette(
            self.frame,
            self.options.max_colors,
            self.limits.preview_width,
            (self.options.canvas_width, self.options.canvas_height),
            &mut self.resampler,
        )?;
        if colors.is_empty() {
            log::warn!("Palette vide, repli sur le blanc");
        }
        self.colors = ColorResolver::Palette(colors);
        let count = self.colors.palette_len();
        self.phase = Phase::Sampling {
            band: 0,
            bands: geometry.band_count(self.limits.chunk_height),
        };
        Ok(Step::PaletteBuilt { colors: count })
    }

    fn sample_band(&mut self, band: u32, bands: u32) -> Result<Step, ConvertError> {
        let geometry = self.validated_geometry()?;
        let Some(current) = geometry.bands(self.limits.chunk_height).nth(band as usize) else {
            return Err(ConvertError::invariant(format!(
                "bande {band} hors de la grille ({bands} bandes)"
            )));
        };

        if self.band_buf.width != geometry.grid_width || self.band_buf.height != current.rows {
            self.band_buf = FrameBuffer::new(geometry.grid_width, current.rows);
        }
        let (top, height) = current.source_slice(geometry.grid_height, self.frame.height);
        self.resampler
            .resample_region(self.frame, top, height, &mut self.band_buf)?;

        let rows = render_band(
            &self.band_buf,
            self.options.brightness_threshold,
            &mut self.picker,
            &self.colors,
        );
        self.cells.extend(rows);

        let percent = current.end() as f32 / geometry.grid_height as f32 * 100.0;
        log::info!("Bande {}/{bands} : {percent:.0}%", band + 1);

        self.phase = if band + 1 >= bands {
            Phase::Complete
        } else {
            Phase::Sampling {
                band: band + 1,
                bands,
            }
        };
        Ok(Step::Progress(percent))
    }

    fn validated_geometry(&self) -> Result<SamplingGeometry, ConvertError> {
        self.geometry
            .ok_or_else(|| ConvertError::invariant("géométrie absente après validation"))
    }
}

/// Convertit `frame` en grille de glyphes, d'une traite.
///
/// `on_progress` reçoit le pourcentage de lignes produites après chaque
/// bande ; la suite est croissante et finit à 100.
///
/// # Errors
/// See [`Conversion::step`]. No partial grid is returned on failure.
///
/// # Example
/// ```
/// use gg_ascii::convert;
/// use gg_core::config::{PipelineLimits, RenderOptions};
/// use gg_core::{CellColor, FrameBuffer, Rgb};
///
/// let frame = FrameBuffer::filled(10, 10, Rgb::new(255, 0, 0));
/// let options = RenderOptions { max_colors: 8, art_width: 10, art_height: 10, ..RenderOptions::default() };
/// let mut seen = Vec::new();
/// let grid = convert(&frame, &options, &PipelineLimits::default(), None, |p| seen.push(p)).unwrap();
/// assert_eq!(seen, vec![100.0]);
/// assert!(grid.cells().iter().all(|c| c.color == CellColor::Rgb(Rgb::new(252, 4, 4))));
/// ```
pub fn convert(
    frame: &FrameBuffer,
    options: &RenderOptions,
    limits: &PipelineLimits,
    shape: Option<&str>,
    mut on_progress: impl ProgressSink,
) -> Result<GlyphGrid, ConvertError> {
    let mut conversion = Conversion::new(frame, options, limits, shape);
    loop {
        match conversion.step()? {
            Step::Progress(percent) => on_progress.report(percent),
            Step::Complete => break,
            Step::Validated | Step::PaletteBuilt { .. } => {}
        }
    }
    conversion.finish()
}
