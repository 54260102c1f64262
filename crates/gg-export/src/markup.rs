use std::sync::OnceLock;

use gg_core::error::ConvertError;
use regex::Regex;

static PAINT_ATTR: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Réécrit chaque attribut `fill="…"` et `stroke="…"` en `currentColor`.
///
/// Le glyphe de forme hérite ainsi de la couleur CSS de sa cellule. Le reste
/// du markup est laissé tel quel.
///
/// # Errors
/// `InternalInvariantViolation` if the attribute pattern fails to compile.
///
/// # Example
/// ```
/// use gg_export::markup::recolor_shape;
/// let svg = r##"<svg><path fill="#f00" stroke="blue"/></svg>"##;
/// assert_eq!(
///     recolor_shape(svg).unwrap(),
///     r#"<svg><path fill="currentColor" stroke="currentColor"/></svg>"#
/// );
/// ```
pub fn recolor_shape(markup: &str) -> Result<String, ConvertError> {
    let pattern = PAINT_ATTR
        .get_or_init(|| Regex::new(r#"(fill|stroke)="[^"]*""#))
        .as_ref()
        .map_err(|e| ConvertError::invariant(format!("motif d'attribut invalide : {e}")))?;
    Ok(pattern
        .replace_all(markup, r#"${1}="currentColor""#)
        .into_owned())
}
