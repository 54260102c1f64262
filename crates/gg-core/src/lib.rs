//! Shared types, configuration and error taxonomy for glyphgrid.
//!
//! Every other crate of the workspace depends on this one: pixels and
//! rasters, glyph ramps, the character grid, options and the error enum.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::GlyphRamp;
pub use color::Rgb;
pub use config::{Config, ExportOptions, PipelineLimits, RenderOptions};
pub use error::ConvertError;
pub use frame::{CellColor, FrameBuffer, GlyphCell, GlyphGrid};

/// Re-exports pour accès par chemin sémantique.
pub mod grid {
    pub use crate::frame::{CellColor, GlyphCell, GlyphGrid};
}
