use std::path::{Path, PathBuf};

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading an action string and
/// finishing its last action.
///
/// Grammar and missing-file errors surface during parsing, before any
/// input is simulated. Image lookups and typed-file reads can only fail at
/// execution time; they abort the remaining queue (already-performed input
/// cannot be undone). Configuration errors are checked before parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed token: wrong field count, invalid keyword, non-numeric
    /// coordinate, negative duration.
    #[error("invalid format for action '{token}': {reason}")]
    Grammar { token: String, reason: String },

    /// A literal image or file path that does not exist, caught at parse
    /// time.
    #[error("file '{}' does not exist", path.display())]
    MissingFile { path: PathBuf },

    /// The template file exists but the image is not currently visible on
    /// screen.
    #[error("image '{}' not found on screen", path.display())]
    ImageNotFound { path: PathBuf },

    /// Reading a `TF`/`TYPEFILE` payload failed at execution time.
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Out-of-range command-line option, rejected before parsing.
    #[error("{0}")]
    Config(String),

    /// A key name the input driver cannot map on this platform.
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("failed to initialize input driver: {0}")]
    DriverInit(#[from] enigo::NewConError),

    #[error("input simulation failed: {0}")]
    Input(#[from] enigo::InputError),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("screen capture failed: {0}")]
    Capture(#[from] xcap::XCapError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Grammar error naming the offending token.
    pub fn grammar(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Grammar {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Missing-file error naming the resolved path.
    pub fn missing_file(path: impl AsRef<Path>) -> Self {
        Self::MissingFile {
            path: path.as_ref().to_path_buf(),
        }
    }
}
