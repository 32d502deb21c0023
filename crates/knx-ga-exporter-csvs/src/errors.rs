use std::path::PathBuf;

use thiserror::Error;

pub type ExporterResult<T> = Result<T, ExporterError>;

/// Any failure of a conversion run.
#[derive(Error, Debug)]
pub enum ExporterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--{0} is required but not included")]
    Missing(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Unknown or unsupported output encoding: '{0}'")]
    UnknownEncoding(String),
}

/// A group address row that passed the pre-filter but misses a mandatory field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Incomplete KNX group address detected: {display} (missing: {})", .missing.join(", "))]
    Incomplete {
        display: String,
        missing: Vec<&'static str>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Sheet row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: RecordError,
    },
}

/// A character the selected output encoding cannot represent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "'{encoding}' codec can't encode character '{character}' (U+{code_point:04X}) in position {position}"
)]
pub struct EncodeError {
    pub encoding: &'static str,
    pub character: char,
    pub code_point: u32,
    pub position: usize,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(
        "Failed to encode the CSV row string: {row}\n\
         Some characters can most-likely not be represented in the selected encoding.\n\
         Please only use characters supported by the encoding.\n\
         CSV writer error details: {source}"
    )]
    Encoding {
        row: String,
        #[source]
        source: EncodeError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write output file '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("No such file or directory: '{}'", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to open workbook '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{name}' not found; available sheets: {}", .available.join(", "))]
    SheetNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Failed to read sheet '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: calamine::Error,
    },
}
