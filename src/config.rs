//! Configuration management and validation.
//!
//! Provides the processing configuration: where summary documents go, what
//! they are called, and how much per-line diagnostic detail is retained.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::RecordKind;
use crate::constants::{
    DEFAULT_APM_FILE_NAME, DEFAULT_APPLICATION_FILE_NAME, DEFAULT_MAX_RETAINED_ERRORS,
    DEFAULT_OUTPUT_DIR, DEFAULT_REQUEST_FILE_NAME,
};
use crate::{Error, Result};

/// Output file names for the three summary documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFiles {
    /// APM metric summary
    pub apm: String,
    /// Application event summary
    pub application: String,
    /// HTTP request summary
    pub request: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            apm: DEFAULT_APM_FILE_NAME.to_string(),
            application: DEFAULT_APPLICATION_FILE_NAME.to_string(),
            request: DEFAULT_REQUEST_FILE_NAME.to_string(),
        }
    }
}

impl OutputFiles {
    /// File name for a record category
    pub fn for_kind(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Metric => &self.apm,
            RecordKind::Event => &self.application,
            RecordKind::Request => &self.request,
        }
    }
}

/// Global configuration for log processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Directory the summary documents are written to
    pub output_dir: PathBuf,

    /// Summary document file names
    pub output_files: OutputFiles,

    /// Maximum number of per-line error messages kept in processing statistics
    pub max_retained_errors: usize,

    /// Show a progress spinner while reading lines
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_files: OutputFiles::default(),
            max_retained_errors: DEFAULT_MAX_RETAINED_ERRORS,
            show_progress: false,
        }
    }
}

impl ProcessorConfig {
    /// Create configuration with a custom output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Create configuration with custom output file names
    pub fn with_output_files(mut self, output_files: OutputFiles) -> Self {
        self.output_files = output_files;
        self
    }

    /// Set how many per-line error messages are retained
    pub fn with_max_retained_errors(mut self, max_retained_errors: usize) -> Self {
        self.max_retained_errors = max_retained_errors;
        self
    }

    /// Enable the progress spinner
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Full path of the summary document for a record category
    pub fn output_path(&self, kind: RecordKind) -> PathBuf {
        self.output_dir.join(self.output_files.for_kind(kind))
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let files = &self.output_files;
        let names = [&files.apm, &files.application, &files.request];

        for name in names {
            if name.trim().is_empty() {
                return Err(Error::configuration("Output file names cannot be empty"));
            }
            if Path::new(name).components().count() != 1 {
                return Err(Error::configuration(format!(
                    "Output file name '{}' must not contain a directory",
                    name
                )));
            }
        }

        if files.apm == files.application
            || files.apm == files.request
            || files.application == files.request
        {
            return Err(Error::configuration(format!(
                "Output file names must be distinct: {}, {}, {}",
                files.apm, files.application, files.request
            )));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();

        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.output_files.apm, "apm.json");
        assert_eq!(config.output_files.application, "application.json");
        assert_eq!(config.output_files.request, "request.json");
        assert!(!config.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path_per_kind() {
        let config = ProcessorConfig::default().with_output_dir("/tmp/reports");

        assert_eq!(
            config.output_path(RecordKind::Metric),
            PathBuf::from("/tmp/reports/apm.json")
        );
        assert_eq!(
            config.output_path(RecordKind::Event),
            PathBuf::from("/tmp/reports/application.json")
        );
        assert_eq!(
            config.output_path(RecordKind::Request),
            PathBuf::from("/tmp/reports/request.json")
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let config = ProcessorConfig::default().with_output_files(OutputFiles {
            apm: "out.json".to_string(),
            application: "out.json".to_string(),
            request: "request.json".to_string(),
        });

        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nested_and_empty_names() {
        let nested = ProcessorConfig::default().with_output_files(OutputFiles {
            apm: "sub/apm.json".to_string(),
            ..OutputFiles::default()
        });
        assert!(nested.validate().is_err());

        let empty = ProcessorConfig::default().with_output_files(OutputFiles {
            request: " ".to_string(),
            ..OutputFiles::default()
        });
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_file_as_output_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ProcessorConfig::default().with_output_dir(file.path());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::default()
            .with_max_retained_errors(5)
            .with_progress();

        assert_eq!(config.max_retained_errors, 5);
        assert!(config.show_progress);
    }
}
