use std::path::Path;
use usvg::Tree;

/// Raster output is drawn at twice the SVG size so dense dot clouds stay legible
const PNG_SCALE: f32 = 2.0;

fn parse_tree(svg_content: &str) -> Result<Tree, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    Tree::from_str(svg_content, &options).map_err(|e| format!("Failed to parse plot SVG: {e}"))
}

pub fn write_png(svg_content: &str, path: &Path) -> Result<(), String> {
    let tree = parse_tree(svg_content)?;
    let size = tree.size().to_int_size().scale_by(PNG_SCALE).ok_or_else(|| {
        format!("Plot of size {:?} cannot be scaled for PNG output", tree.size())
    })?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| format!("Unable to allocate {}x{} image", size.width(), size.height()))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(PNG_SCALE, PNG_SCALE),
        &mut pixmap.as_mut(),
    );
    pixmap.save_png(path).map_err(|e| e.to_string())
}

pub fn write_pdf(svg_content: &str, path: &Path) -> Result<(), String> {
    let tree = parse_tree(svg_content)?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| format!("Failed to convert plot to PDF: {e:?}"))?;
    std::fs::write(path, pdf).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_svg_is_reported() {
        let err = parse_tree("<svg").unwrap_err();
        assert!(err.starts_with("Failed to parse plot SVG"));
    }

    #[test]
    fn png_is_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6"><rect width="10" height="6" fill="red"/></svg>"#;
        write_png(svg, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // IHDR width and height, big-endian
        assert_eq!(&bytes[16..24], &[0, 0, 0, 20, 0, 0, 0, 12]);
    }
}
