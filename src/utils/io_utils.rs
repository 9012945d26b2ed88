use crate::utils::Result;
use std::{fs::File, io::BufWriter};

pub fn output_path(output_prefix: &str, output_suffix: &str) -> String {
    format!("{}.{}", output_prefix, output_suffix)
}

/// Opens `<prefix>.<suffix>` for buffered writing and hands it to `f`
pub fn create_writer<T, F>(output_prefix: &str, output_suffix: &str, f: F) -> Result<T>
where
    F: FnOnce(BufWriter<File>) -> Result<T>,
{
    let path = output_path(output_prefix, output_suffix);
    let file = File::create(&path).map_err(|e| format!("Failed to create {}: {}", path, e))?;
    log::debug!("Writing {}", path);
    f(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn output_path_joins_prefix_and_suffix() {
        assert_eq!(output_path("out/run1", "summary.tsv"), "out/run1.summary.tsv");
    }

    #[test]
    fn create_writer_writes_to_prefixed_path() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("sample").to_string_lossy().to_string();
        create_writer(&prefix, "txt", |mut writer| {
            writeln!(writer, "hello").map_err(|e| e.to_string())
        })
        .unwrap();
        let content = std::fs::read_to_string(format!("{}.txt", prefix)).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn create_writer_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("missing/sample").to_string_lossy().to_string();
        let result = create_writer(&prefix, "txt", |_| Ok(()));
        assert!(result.unwrap_err().starts_with("Failed to create"));
    }
}
