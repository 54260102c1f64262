use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::DEFAULT_RAMP;
use crate::error::ConvertError;

/// Options d'une conversion. Immuables pendant la conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gg_core::config::RenderOptions;
/// let options = RenderOptions::default();
/// assert_eq!(options.max_colors, 64);
/// assert!(options.validate(None).is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderOptions {
    // === Mode ===
    /// Couleur (palette quantifiée) ou monochrome.
    pub color_mode: ColorMode,
    /// Glyphes texte ou forme (markup SVG opaque).
    pub glyph_mode: GlyphMode,
    /// Rampe personnalisée. Vide = rampe par défaut.
    pub charset: String,
    /// Utiliser la rampe étendue de 69 caractères.
    pub use_full_charset: bool,
    /// Ignorer la luminance et parcourir la rampe glyphe par glyphe.
    pub force_sequence: bool,

    // === Couleur ===
    /// Taille maximale de la palette [8, 256].
    pub max_colors: u16,

    // === Dimensions ===
    /// Largeur demandée, en caractères.
    pub art_width: u32,
    /// Hauteur demandée, en caractères.
    pub art_height: u32,
    /// Largeur du canvas d'affichage, en pixels.
    pub canvas_width: u32,
    /// Hauteur du canvas d'affichage, en pixels.
    pub canvas_height: u32,
    /// Multiplicateur de détail [1.0, 6.0]. Croissance géométrique.
    pub scale: f32,

    // === Seuil ===
    /// Seuil de fond, en pourcent de luminance. En dessous : cellule vide.
    pub brightness_threshold: f32,
}

/// Color resolution mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorMode {
    /// Nearest palette color per cell.
    #[default]
    Color,
    /// Every non-blank cell is white.
    Monochrome,
}

/// Glyph rendering mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GlyphMode {
    /// Monospace text glyphs.
    #[default]
    Text,
    /// A caller-supplied shape (SVG markup) drawn per cell.
    Shape,
}

/// Background of exported documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Background {
    /// Pure black.
    #[default]
    Black,
    /// No background.
    Transparent,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Color,
            glyph_mode: GlyphMode::Text,
            charset: DEFAULT_RAMP.to_string(),
            use_full_charset: false,
            force_sequence: false,
            max_colors: 64,
            art_width: 120,
            art_height: 60,
            canvas_width: 800,
            canvas_height: 600,
            scale: 1.0,
            brightness_threshold: 5.0,
        }
    }
}

impl RenderOptions {
    /// Clamp every numeric field to its valid range.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self, limits: &PipelineLimits) {
        self.max_colors = self.max_colors.clamp(8, 256);
        self.art_width = self.art_width.clamp(1, limits.max_art_dimension.max(1));
        self.art_height = self.art_height.clamp(1, limits.max_art_dimension.max(1));
        self.canvas_width = self.canvas_width.clamp(1, limits.max_canvas_dimension.max(1));
        self.canvas_height = self.canvas_height.clamp(1, limits.max_canvas_dimension.max(1));
        self.brightness_threshold = self.brightness_threshold.clamp(0.0, 100.0);
        self.scale = self.scale.clamp(1.0, 6.0);
    }

    /// Reject malformed options before any work begins.
    ///
    /// `shape` is the optional shape-glyph markup supplied alongside.
    ///
    /// # Errors
    /// `InvalidArgument` for non-positive dimensions, a palette size outside
    /// [8, 256] or a non-finite scale/threshold; `MissingInput` for shape
    /// mode without markup.
    pub fn validate(&self, shape: Option<&str>) -> Result<(), ConvertError> {
        if self.art_width == 0 || self.art_height == 0 {
            return Err(ConvertError::invalid(format!(
                "dimensions demandées non positives : {}×{}",
                self.art_width, self.art_height
            )));
        }
        if !(8..=256).contains(&self.max_colors) {
            return Err(ConvertError::invalid(format!(
                "taille de palette hors de [8, 256] : {}",
                self.max_colors
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConvertError::invalid(format!("échelle invalide : {}", self.scale)));
        }
        if !self.brightness_threshold.is_finite() {
            return Err(ConvertError::invalid("seuil de luminance non fini"));
        }
        if self.glyph_mode == GlyphMode::Shape && shape.is_none_or(str::is_empty) {
            return Err(ConvertError::MissingInput(
                "le mode forme requiert un glyphe SVG".into(),
            ));
        }
        Ok(())
    }
}

/// Resource-tuning constants of the pipeline.
///
/// # Example
/// ```
/// use gg_core::config::PipelineLimits;
/// let limits = PipelineLimits::default();
/// assert_eq!(limits.chunk_height, 1000);
/// assert_eq!(limits.preview_width, 500);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PipelineLimits {
    /// Hauteur maximale d'une bande traitée entre deux points de reprise.
    pub chunk_height: u32,
    /// Largeur de l'aperçu sous-échantillonné servant à bâtir la palette.
    pub preview_width: u32,
    /// Borne par côté de la grille d'échantillonnage.
    pub max_art_dimension: u32,
    /// Borne par côté du canvas d'affichage.
    pub max_canvas_dimension: u32,
    /// Croissance par pas d'échelle, glyphes texte.
    pub text_growth: f32,
    /// Croissance par pas d'échelle, glyphes forme.
    pub shape_growth: f32,
    /// Rapport hauteur/largeur d'une cellule texte (police monospace).
    pub text_cell_aspect: f32,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            chunk_height: 1000,
            preview_width: 500,
            max_art_dimension: 10_000,
            max_canvas_dimension: 5_000,
            text_growth: 1.3,
            shape_growth: 1.2,
            text_cell_aspect: 0.5,
        }
    }
}

impl PipelineLimits {
    /// # Errors
    /// `InvalidArgument` if a bound is zero or a growth factor is not a positive finite number.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.chunk_height == 0 || self.preview_width == 0 {
            return Err(ConvertError::invalid(
                "chunk_height et preview_width doivent être positifs",
            ));
        }
        if self.max_art_dimension == 0 || self.max_canvas_dimension == 0 {
            return Err(ConvertError::invalid("bornes de dimensions nulles"));
        }
        for (name, v) in [
            ("text_growth", self.text_growth),
            ("shape_growth", self.shape_growth),
            ("text_cell_aspect", self.text_cell_aspect),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConvertError::invalid(format!("{name} invalide : {v}")));
            }
        }
        Ok(())
    }
}

/// Presentation settings consumed by exporters.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ExportOptions {
    /// Fond du document.
    pub background: Background,
    /// Police CSS du mode texte.
    pub font_family: String,
    /// Taille de police, en pixels.
    pub font_size: u32,
    /// Hauteur de ligne, en pixels.
    pub line_height: u32,
    /// Graisse CSS.
    pub font_weight: u32,
    /// Espacement entre caractères, en pixels.
    pub character_spacing: f32,
    /// Côté d'une cellule en mode forme, en pixels.
    pub cell_size: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            background: Background::Black,
            font_family: "monospace".into(),
            font_size: 12,
            line_height: 14,
            font_weight: 400,
            character_spacing: 0.0,
            cell_size: 20,
        }
    }
}

impl ExportOptions {
    /// Clamp typography to sane ranges.
    ///
    /// `font_family` loses every character that could close the CSS rule or
    /// the `<style>` element; an emptied family falls back to `monospace`.
    pub fn clamp_all(&mut self) {
        self.font_family.retain(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\\'));
        if self.font_family.trim().is_empty() {
            self.font_family = "monospace".into();
        }
        self.font_size = self.font_size.clamp(1, 200);
        self.line_height = self.line_height.clamp(1, 400);
        self.font_weight = self.font_weight.clamp(100, 900);
        self.character_spacing = self.character_spacing.clamp(-10.0, 50.0);
        self.cell_size = self.cell_size.clamp(1, 500);
    }
}

/// Full configuration: render options, pipeline limits, export settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Options de rendu.
    pub render: RenderOptions,
    /// Constantes de ressources.
    pub pipeline: PipelineLimits,
    /// Présentation.
    pub export: ExportOptions,
}

impl Config {
    /// Clamp all sections.
    pub fn clamp_all(&mut self) {
        self.render.clamp_all(&self.pipeline);
        self.export.clamp_all();
    }
}

/// Structure TOML intermédiaire, toutes sections optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    pipeline: Option<PipelineSection>,
    export: Option<ExportSection>,
}

/// Render section, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    color_mode: Option<ColorMode>,
    glyph_mode: Option<GlyphMode>,
    charset: Option<String>,
    use_full_charset: Option<bool>,
    force_sequence: Option<bool>,
    max_colors: Option<u16>,
    art_width: Option<u32>,
    art_height: Option<u32>,
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    scale: Option<f32>,
    brightness_threshold: Option<f32>,
}

#[derive(Deserialize)]
struct PipelineSection {
    chunk_height: Option<u32>,
    preview_width: Option<u32>,
    max_art_dimension: Option<u32>,
    max_canvas_dimension: Option<u32>,
    text_growth: Option<f32>,
    shape_growth: Option<f32>,
    text_cell_aspect: Option<f32>,
}

#[derive(Deserialize)]
struct ExportSection {
    background: Option<Background>,
    font_family: Option<String>,
    font_size: Option<u32>,
    line_height: Option<u32>,
    font_weight: Option<u32>,
    character_spacing: Option<f32>,
    cell_size: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;
    log::info!("Config chargée depuis {}", path.display());
    Ok(config)
}

/// Parse TOML text into a clamped [`Config`].
///
/// # Errors
/// Returns an error if the TOML is malformed.
///
/// # Example
/// ```
/// use gg_core::config::parse_config;
/// let config = parse_config("[render]\nmax_colors = 500\n").unwrap();
/// assert_eq!(config.render.max_colors, 256);
/// ```
pub fn parse_config(content: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = Config::default();

    // Pipeline first: the render clamp depends on its bounds.
    if let Some(p) = file.pipeline {
        let c = &mut config.pipeline;
        if let Some(v) = p.chunk_height {
            c.chunk_height = v.max(1);
        }
        if let Some(v) = p.preview_width {
            c.preview_width = v.max(1);
        }
        if let Some(v) = p.max_art_dimension {
            c.max_art_dimension = v.max(1);
        }
        if let Some(v) = p.max_canvas_dimension {
            c.max_canvas_dimension = v.max(1);
        }
        if let Some(v) = p.text_growth {
            c.text_growth = v;
        }
        if let Some(v) = p.shape_growth {
            c.shape_growth = v;
        }
        if let Some(v) = p.text_cell_aspect {
            c.text_cell_aspect = v;
        }
    }

    if let Some(r) = file.render {
        let c = &mut config.render;
        if let Some(v) = r.color_mode {
            c.color_mode = v;
        }
        if let Some(v) = r.glyph_mode {
            c.glyph_mode = v;
        }
        if let Some(v) = r.charset {
            c.charset = v;
        }
        if let Some(v) = r.use_full_charset {
            c.use_full_charset = v;
        }
        if let Some(v) = r.force_sequence {
            c.force_sequence = v;
        }
        if let Some(v) = r.max_colors {
            c.max_colors = v;
        }
        if let Some(v) = r.art_width {
            c.art_width = v;
        }
        if let Some(v) = r.art_height {
            c.art_height = v;
        }
        if let Some(v) = r.canvas_width {
            c.canvas_width = v;
        }
        if let Some(v) = r.canvas_height {
            c.canvas_height = v;
        }
        if let Some(v) = r.scale {
            c.scale = v;
        }
        if let Some(v) = r.brightness_threshold {
            c.brightness_threshold = v;
        }
    }

    if let Some(e) = file.export {
        let c = &mut config.export;
        if let Some(v) = e.background {
            c.background = v;
        }
        if let Some(v) = e.font_family {
            c.font_family = v;
        }
        if let Some(v) = e.font_size {
            c.font_size = v;
        }
        if let Some(v) = e.line_height {
            c.line_height = v;
        }
        if let Some(v) = e.font_weight {
            c.font_weight = v;
        }
        if let Some(v) = e.character_spacing {
            c.character_spacing = v;
        }
        if let Some(v) = e.cell_size {
            c.cell_size = v;
        }
    }

    config.clamp_all();
    Ok(config)
}
