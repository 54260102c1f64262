//! Sources raster pour glyphgrid : décodage d'images et rééchantillonnage.

pub mod image;
pub mod resize;
