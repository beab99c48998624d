use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfFillError {
    #[error("pdftk not found: {0}")]
    ToolNotFound(String),

    #[error("file does not exist: '{}'", .0.display())]
    InputNotFound(PathBuf),

    #[error("destination PDF file already exists: '{}'", .0.display())]
    DestinationExists(PathBuf),

    #[error("pdftk error: {0}")]
    ToolExecutionFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PdfFillError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PdfFillError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a tool-not-found error.
    tool_not_found => ToolNotFound,
    /// Create a tool execution error from the tool's diagnostic text.
    tool_failed => ToolExecutionFailed,
    /// Create an invalid argument error.
    invalid_argument => InvalidArgument,
    /// Create an encoding error.
    encoding => EncodingError,
    /// Create a configuration error.
    config => ConfigError,
}

impl From<serde_yml::Error> for PdfFillError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdfFillError>;
