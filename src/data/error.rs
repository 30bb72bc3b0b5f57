use thiserror::Error;

// ---------------------------------------------------------------------------
// Typed errors for loading and user input
// ---------------------------------------------------------------------------

/// Errors raised while turning a source file into a [`WasteDataset`].
///
/// All of these are fatal for the file being loaded.
///
/// [`WasteDataset`]: super::model::WasteDataset
#[derive(Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: unparseable date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: {column} value '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {column} is not a string")]
    InvalidText { row: usize, column: &'static str },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: &'static str, data_type: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// Errors in values typed by the user (CLI arguments, text inputs).
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("unparseable date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
