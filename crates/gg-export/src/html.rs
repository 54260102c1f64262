use std::fmt::Write as _;

use gg_core::config::{Background, ExportOptions, GlyphMode};
use gg_core::frame::{GlyphCell, GlyphGrid};

/// Document HTML autonome de la grille.
///
/// Mode texte : un `<div>` par ligne, un `<span>` coloré par glyphe, avec la
/// typographie de `export`. Mode forme : une grille flex de cellules carrées
/// de `export.cell_size` pixels, chaque cellule visible enveloppant le markup
/// de forme coloré et mis à l'échelle par sa luminance.
///
/// # Example
/// ```
/// use gg_core::config::{ExportOptions, GlyphMode};
/// use gg_core::frame::{CellColor, GlyphCell, GlyphGrid};
/// use gg_export::html::to_html;
///
/// let cell = GlyphCell { glyph: '<', color: CellColor::White, brightness: 1.0 };
/// let grid = GlyphGrid::new(1, 1, vec![cell], GlyphMode::Text, None).unwrap();
/// let html = to_html(&grid, &ExportOptions::default());
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains(r#"<span style="color: #FFFFFF;">&lt;</span>"#));
/// ```
#[must_use]
pub fn to_html(grid: &GlyphGrid, export: &ExportOptions) -> String {
    let mut export = export.clone();
    export.clamp_all();
    let export = &export;
    let background = match export.background {
        Background::Black => "#000",
        Background::Transparent => "transparent",
    };

    let (styles, body) = match (grid.glyph_mode(), grid.shape_markup()) {
        (GlyphMode::Shape, Some(shape)) => shape_document(grid, export, background, shape),
        (GlyphMode::Shape, None) => {
            log::warn!("Grille en mode forme sans markup : export texte");
            text_document(grid, export, background)
        }
        (GlyphMode::Text, _) => text_document(grid, export, background),
    };

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
         <title>glyphgrid</title><style>{styles}</style></head>{body}</html>"
    )
}

fn text_document(grid: &GlyphGrid, export: &ExportOptions, background: &str) -> (String, String) {
    let styles = format!(
        "body {{ background-color: {background}; margin: 0; }} \
         pre {{ font-family: {}; font-size: {}px; line-height: {}px; font-weight: {}; \
         letter-spacing: {}px; white-space: pre; margin: 0; }} \
         div {{ display: block; }}",
        export.font_family,
        export.font_size,
        export.line_height,
        export.font_weight,
        export.character_spacing
    );

    let mut body = String::from("<body><pre>");
    for row in grid.rows() {
        body.push_str("<div>");
        for cell in row {
            let _ = write!(
                body,
                "<span style=\"color: {};\">{}</span>",
                cell.color.to_css(),
                escape_glyph(cell.glyph)
            );
        }
        body.push_str("</div>");
    }
    body.push_str("</pre></body>");
    (styles, body)
}

fn shape_document(
    grid: &GlyphGrid,
    export: &ExportOptions,
    background: &str,
    shape: &str,
) -> (String, String) {
    let cell = export.cell_size;
    let grid_width = u64::from(grid.width()) * u64::from(cell);
    let styles = format!(
        "body {{ background-color: {background}; margin: 0; font-family: sans-serif; }} \
         .grid-container {{ display: flex; flex-wrap: wrap; width: {grid_width}px; }} \
         .grid-cell {{ width: {cell}px; height: {cell}px; display: flex; align-items: center; justify-content: center; }} \
         .shape-wrapper {{ width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; }} \
         .shape-wrapper svg {{ width: 100%; height: 100%; }}"
    );

    let mut body = String::from("<body><div class=\"grid-container\">");
    for cell in grid.cells() {
        push_shape_cell(&mut body, cell, shape);
    }
    body.push_str("</div></body>");
    (styles, body)
}

fn push_shape_cell(body: &mut String, cell: &GlyphCell, shape: &str) {
    if cell.glyph == ' ' {
        body.push_str("<div class=\"grid-cell\"></div>");
    } else {
        let _ = write!(
            body,
            "<div class=\"grid-cell\"><div class=\"shape-wrapper\" style=\"color: {}; transform: scale({});\">{shape}</div></div>",
            cell.color.to_css(),
            cell.brightness
        );
    }
}

/// `<`, `>` and `&` escaped; space becomes `&nbsp;`.
fn escape_glyph(glyph: char) -> String {
    match glyph {
        '<' => "&lt;".into(),
        '>' => "&gt;".into(),
        '&' => "&amp;".into(),
        ' ' => "&nbsp;".into(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use gg_core::Rgb;
    use gg_core::frame::CellColor;

    fn lit(glyph: char, brightness: f32) -> GlyphCell {
        GlyphCell {
            glyph,
            color: CellColor::Rgb(Rgb::new(10, 20, 30)),
            brightness,
        }
    }

    #[test]
    fn text_rows_become_divs() {
        let grid = GlyphGrid::new(
            2,
            2,
            vec![lit('&', 0.5), GlyphCell::blank(), lit('>', 0.5), lit('x', 0.5)],
            GlyphMode::Text,
            None,
        )
        .unwrap();
        let html = to_html(&grid, &ExportOptions::default());
        assert_eq!(html.matches("<div>").count(), 2);
        assert!(html.contains("&amp;</span>"));
        assert!(html.contains(r#"<span style="color: transparent;">&nbsp;</span>"#));
        assert!(html.contains("&gt;</span>"));
        assert!(html.contains("background-color: #000"));
        assert!(html.contains("font-family: monospace; font-size: 12px; line-height: 14px"));
    }

    #[test]
    fn shape_cells_wrap_markup() {
        let shape: Arc<str> = Arc::from(r#"<svg fill="currentColor"></svg>"#);
        let grid = GlyphGrid::new(
            3,
            1,
            vec![lit('#', 0.75), GlyphCell::blank(), lit('@', 1.0)],
            GlyphMode::Shape,
            Some(shape),
        )
        .unwrap();
        let export = ExportOptions {
            background: Background::Transparent,
            cell_size: 16,
            ..ExportOptions::default()
        };
        let html = to_html(&grid, &export);
        assert!(html.contains("width: 48px"));
        assert!(html.contains("background-color: transparent"));
        assert_eq!(html.matches(r#"<svg fill="currentColor"></svg>"#).count(), 2);
        assert!(html.contains("color: rgb(10, 20, 30); transform: scale(0.75);"));
        assert!(html.contains(r#"<div class="grid-cell"></div>"#));
    }

    #[test]
    fn shape_grid_without_markup_falls_back_to_text() {
        let grid = GlyphGrid::new(1, 1, vec![lit('#', 1.0)], GlyphMode::Shape, None).unwrap();
        let html = to_html(&grid, &ExportOptions::default());
        assert!(html.contains("<pre>"));
    }

    #[test]
    fn hostile_font_family_stays_inside_the_style_block() {
        let grid = GlyphGrid::new(1, 1, vec![lit('x', 1.0)], GlyphMode::Text, None).unwrap();
        let export = ExportOptions {
            font_family: "serif}</style><script>alert(1)</script>".into(),
            ..ExportOptions::default()
        };
        let html = to_html(&grid, &export);
        assert_eq!(html.matches("</style>").count(), 1);
        assert!(!html.contains("<script>"));
    }
}
