/// Custom Result type for subsampling operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the crate, encompassing all possible error cases
/// that can occur while subsampling a read archive.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors raised while validating the run configuration
    ConfigError(#[from] ConfigError),
    /// Errors raised while opening the input archive
    ReadError(#[from] ReadError),
    /// Errors raised while deriving a selection key
    SelectError(#[from] SelectError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
}

/// Errors detected before any I/O takes place
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No fraction was provided to the config builder
    #[error("Missing fraction in config builder")]
    MissingFraction,

    /// The fraction lies outside of `(0, 1]`
    ///
    /// # Arguments
    /// * `f64` - The rejected fraction
    #[error("Fraction must be within (0, 1], got {0}")]
    InvalidFraction(f64),

    /// The mate number could not be parsed as `1` or `2`
    #[error("Invalid mate number: {0:?} (expected 1 or 2)")]
    InvalidMate(String),

    /// The input path is empty
    #[error("Missing input archive path")]
    MissingInput,

    /// The output path is empty
    #[error("Missing output path")]
    MissingOutput,
}

/// Errors that can occur while opening the input archive
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file being read is not a regular file (e.g., it might be a directory or special file)
    #[error("File is not regular: {0}")]
    IncompatibleFile(String),
}

/// Errors that can occur while deriving the selection key of an identifier
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The identifier has no digits left once the mate suffix and annotation are stripped
    ///
    /// # Arguments
    /// * `String` - The offending identifier
    #[error("Identifier has no digits to derive a selection key from: {0}")]
    DegenerateIdentifier(String),
}
