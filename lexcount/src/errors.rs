use std::path::PathBuf;

/// Result type used throughout the library.
///
/// Defaults the error type to [`LexcountError`].
pub type Result<T, E = LexcountError> = std::result::Result<T, E>;

/// Error type covering every failure the pipeline boundaries can report.
///
/// The aggregation and layout stages are total functions over validated
/// data and never return errors; everything here originates at an I/O or
/// model boundary.
#[derive(Debug, thiserror::Error)]
pub enum LexcountError {
    /// The input workbook does not exist.
    #[error("input file '{0}' does not exist")]
    InputNotFound(PathBuf),

    /// The requested sheet, the first sheet, and the 'data' fallback were
    /// all unavailable.
    #[error("{0}")]
    SheetResolution(String),

    /// The tagger model file is not installed.
    #[error(
        "tagger model '{name}' not found at '{path}'. \
         Download the model file and place it in the model directory, \
         or point the model directory at an existing model"
    )]
    ModelUnavailable { name: String, path: PathBuf },

    /// The tagger model file exists but could not be parsed.
    #[error("invalid tagger model: {0}")]
    InvalidModel(String),

    /// The spreadsheet library failed to read or write the workbook.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// The document library failed to write the output document.
    #[error("document error: {0}")]
    Document(String),

    /// Processing was stopped by the cooperative interrupt flag.
    #[error("processing interrupted")]
    Interrupted,

    /// Standard I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
