use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the viewer and the batch plotter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// The table file is missing, unreadable or malformed.
    #[error("Failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A referenced sensor or index column does not exist in the table.
    #[error("Column '{0}' not found in the loaded table")]
    MissingColumn(String),

    /// The window start or length field does not hold a usable number.
    #[error("Invalid window {field}: '{text}'")]
    InvalidRange { field: &'static str, text: String },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
