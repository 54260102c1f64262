use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// glyphgrid : convertit une image en art de caractères colorés.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur demandée, en caractères.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur demandée, en caractères.
    #[arg(long)]
    pub height: Option<u32>,

    /// Monochrome : toutes les cellules visibles en blanc.
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Taille maximale de la palette [8, 256].
    #[arg(long)]
    pub colors: Option<u16>,

    /// Rampe de glyphes personnalisée, du plus dense au plus clair.
    #[arg(long)]
    pub chars: Option<String>,

    /// Rampe étendue de 69 caractères.
    #[arg(long, default_value_t = false)]
    pub full_chars: bool,

    /// Seuil de luminance en pourcent [0, 100].
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Multiplicateur de détail [1, 6].
    #[arg(long)]
    pub scale: Option<f32>,

    /// Parcourir la rampe glyphe par glyphe au lieu de suivre la luminance.
    #[arg(long, default_value_t = false)]
    pub sequence: bool,

    /// Glyphe de forme SVG ; active le mode forme.
    #[arg(long)]
    pub shape: Option<PathBuf>,

    /// Format de sortie.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Fichier de sortie. Défaut : sortie standard.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Glyphs only.
    Text,
    /// Glyphs with 24-bit terminal colors.
    Ansi,
    /// Standalone HTML document.
    Html,
    /// Grid as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["glyphgrid", "photo.png"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("photo.png"));
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.mono && !cli.sequence && !cli.full_chars);
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "glyphgrid", "a.jpg", "--width", "80", "--mono", "--colors", "16", "--chars", "#. ",
            "--format", "html", "-o", "out.html", "--shape", "star.svg",
        ])
        .unwrap();
        assert_eq!(cli.width, Some(80));
        assert!(cli.mono);
        assert_eq!(cli.colors, Some(16));
        assert_eq!(cli.chars.as_deref(), Some("#. "));
        assert_eq!(cli.format, Format::Html);
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert_eq!(cli.shape, Some(PathBuf::from("star.svg")));
    }

    #[test]
    fn image_is_required() {
        assert!(Cli::try_parse_from(["glyphgrid"]).is_err());
    }
}
