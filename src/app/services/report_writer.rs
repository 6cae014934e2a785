//! JSON summary document output
//!
//! Writes each finalized aggregation document to its own file. Key order is
//! whatever order the document was built in, indentation is two spaces, and
//! an empty document is written as `{}`.

use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::{Error, Result};

/// Writer for summary documents under a single output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write a document to `file_name` inside the output directory
    ///
    /// Creates the output directory if it does not exist and returns the path
    /// written to.
    pub fn write_document(&self, file_name: &str, document: &Value) -> Result<PathBuf> {
        if !self.output_dir.exists() {
            debug!("Creating output directory: {}", self.output_dir.display());
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                Error::io(
                    format!(
                        "Failed to create output directory {}",
                        self.output_dir.display()
                    ),
                    e,
                )
            })?;
        }

        let path = self.output_dir.join(file_name);
        let file = File::create(&path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)
            .map_err(|e| Error::serialization(format!("Failed to write {}", path.display()), e))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

        info!("Written output to: {}", path.display());
        Ok(path)
    }
}

/// Render a document as pretty-printed JSON text
pub fn render_document(document: &Value) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| Error::serialization("Failed to render document", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_preserves_key_order() {
        let document = json!({"zeta": 1, "alpha": {"b": 2, "a": 1.5}});
        let rendered = render_document(&document).unwrap();

        assert_eq!(
            rendered,
            "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": 2,\n    \"a\": 1.5\n  }\n}"
        );
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(render_document(&json!({})).unwrap(), "{}");
    }

    #[test]
    fn test_render_escapes_strings() {
        let document = json!({"/path \"quoted\"\t\\": 1});
        let rendered = render_document(&document).unwrap();
        assert!(rendered.contains(r#""/path \"quoted\"\t\\""#));
    }

    #[test]
    fn test_write_document_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested").join("out");
        let writer = ReportWriter::new(&output_dir);

        let path = writer
            .write_document("apm.json", &json!({"cpu": {"max": 1.0}}))
            .unwrap();

        assert_eq!(path, output_dir.join("apm.json"));
        let written = fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!({"cpu": {"max": 1.0}}));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_write_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp_dir.path());

        let path = writer.write_document("request.json", &json!({})).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{}\n");
    }
}
