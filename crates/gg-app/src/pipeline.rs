use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use gg_core::config::{ColorMode, Config, ExportOptions, GlyphMode};
use gg_core::frame::GlyphGrid;
use gg_export::{html, json, markup, text};

use crate::cli::{Cli, Format};

/// Load the config file, or fall back to defaults when it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    if cli.config.exists() {
        gg_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(Config::default())
    }
}

/// Appliquer les overrides CLI par-dessus la config, puis re-borner.
pub fn apply_overrides(cli: &Cli, config: &mut Config) {
    let render = &mut config.render;
    if let Some(w) = cli.width {
        render.art_width = w;
    }
    if let Some(h) = cli.height {
        render.art_height = h;
    }
    if cli.mono {
        render.color_mode = ColorMode::Monochrome;
    }
    if let Some(k) = cli.colors {
        render.max_colors = k;
    }
    if let Some(ref chars) = cli.chars {
        render.charset.clone_from(chars);
    }
    if cli.full_chars {
        render.use_full_charset = true;
    }
    if let Some(t) = cli.threshold {
        render.brightness_threshold = t;
    }
    if let Some(s) = cli.scale {
        render.scale = s;
    }
    if cli.sequence {
        render.force_sequence = true;
    }
    if cli.shape.is_some() {
        render.glyph_mode = GlyphMode::Shape;
    }
    config.clamp_all();
}

/// Read a shape glyph and recolor its paint attributes.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn load_shape(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire le glyphe {}", path.display()))?;
    Ok(markup::recolor_shape(&raw)?)
}

/// Export the grid in the requested format.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_output(grid: &GlyphGrid, format: Format, export: &ExportOptions) -> Result<String> {
    Ok(match format {
        Format::Text => text::to_plain_text(grid),
        Format::Ansi => text::to_ansi(grid),
        Format::Html => html::to_html(grid, export),
        Format::Json => json::to_json(grid).context("Sérialisation JSON")?,
    })
}

/// Write to `path`, or to stdout when absent.
///
/// # Errors
/// Returns an error if the destination cannot be written.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, content)
            .with_context(|| format!("Impossible d'écrire {}", p.display())),
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{content}").context("Écriture sur la sortie standard")
        }
    }
}

/// Full run: config, image, conversion, export.
///
/// # Errors
/// Any configuration, decoding, conversion or I/O failure.
pub fn run(cli: &Cli) -> Result<()> {
    let mut config = resolve_config(cli)?;
    apply_overrides(cli, &mut config);

    let shape = cli.shape.as_deref().map(load_shape).transpose()?;
    let frame = gg_source::image::load_image(&cli.image)?;
    log::info!(
        "Conversion de {} ({}×{})",
        cli.image.display(),
        frame.width,
        frame.height
    );

    let grid = gg_ascii::convert(
        &frame,
        &config.render,
        &config.pipeline,
        shape.as_deref(),
        |percent: f32| log::info!("Progression : {percent:.0}%"),
    )
    .with_context(|| format!("Échec de la conversion de {}", cli.image.display()))?;

    let content = render_output(&grid, cli.format, &config.export)?;
    write_output(cli.output.as_deref(), &content)
}
