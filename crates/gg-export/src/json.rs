use gg_core::frame::GlyphGrid;

/// Sérialisation JSON de la grille : dimensions, mode, lignes de cellules.
///
/// Chaque cellule porte `glyph`, `color` (valeur CSS) et `brightness`.
///
/// # Errors
/// Propagates `serde_json` failures.
///
/// # Example
/// ```
/// use gg_core::config::GlyphMode;
/// use gg_core::frame::{GlyphCell, GlyphGrid};
/// use gg_export::json::to_json;
///
/// let grid = GlyphGrid::new(1, 1, vec![GlyphCell::blank()], GlyphMode::Text, None).unwrap();
/// let json = to_json(&grid).unwrap();
/// assert!(json.contains(r#""color":"transparent""#));
/// ```
pub fn to_json(grid: &GlyphGrid) -> serde_json::Result<String> {
    serde_json::to_string(grid)
}
