use crate::{render, svg, ScatterPlot};
use std::path::Path;

/// Renders `plot` to `path`; the image format follows the file extension
pub fn generate(plot: &ScatterPlot, path: &Path) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Failed to get extension from path: {path:?}"))?;
    let file_type = FileType::from_extension(extension)
        .ok_or_else(|| format!("Unsupported file extension: {extension:?}"))?;

    let svg_content = svg::generate_string(plot);
    match file_type {
        FileType::Svg => std::fs::write(path, svg_content)
            .map_err(|e| format!("Failed to write {}: {e}", path.display())),
        FileType::Png => render::write_png(&svg_content, path),
        FileType::Pdf => render::write_pdf(&svg_content, path),
    }
}

#[derive(Debug, PartialEq)]
enum FileType {
    Svg,
    Png,
    Pdf,
}

impl FileType {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "svg" => Some(FileType::Svg),
            "png" => Some(FileType::Png),
            "pdf" => Some(FileType::Pdf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Legend};

    fn empty_plot() -> ScatterPlot {
        ScatterPlot {
            title: "empty".to_string(),
            x_axis: Axis::new("x", 0.0, 10.0),
            y_axis: Axis::new("y", 0.0, 1.0),
            dots: Vec::new(),
            ref_lines: Vec::new(),
            markers: Vec::new(),
            legend: Legend {
                title: String::new(),
                labels: Vec::new(),
            },
        }
    }

    #[test]
    fn file_type_is_case_insensitive() {
        assert_eq!(FileType::from_extension("SVG"), Some(FileType::Svg));
        assert_eq!(FileType::from_extension("png"), Some(FileType::Png));
        assert_eq!(FileType::from_extension("Pdf"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("jpg"), None);
    }

    #[test]
    fn generate_writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        generate(&empty_plot(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn generate_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.jpg");
        assert!(generate(&empty_plot(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn generate_requires_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot");
        assert!(generate(&empty_plot(), &path).is_err());
    }
}
