//! Moteur raster → glyphes de glyphgrid.
//!
//! Rééchantillonne une image par bandes, associe chaque pixel à un glyphe
//! selon sa luminance et à une couleur de palette, et produit une grille.

pub mod color_map;
pub mod conversion;
pub mod glyph;
pub mod preview;
pub mod render;
pub mod sampling;

pub use conversion::{Conversion, Phase, Step, convert};
