use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for labelpad operations.
#[derive(Debug, Error)]
pub enum LabelpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YOLO label line {line}: {message}")]
    YoloParse { line: usize, message: String },

    #[error("Failed to parse COCO JSON: {source}")]
    CocoJsonParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse Pascal VOC XML: {message}")]
    VocXmlParse { message: String },

    #[error("Class id {class_id} is out of range for class list with {class_count} class(es)")]
    UnknownClass { class_id: usize, class_count: usize },

    #[error("Class name '{0}' is not in the class list")]
    UnknownClassName(String),

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to write JSON report: {0}")]
    ReportWrite(#[source] serde_json::Error),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
