//! Error types for the curvetab CLI

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Curve document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Invalid curve document {}", path.display())]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Refusing to overwrite {} (use --force)", .0.display())]
    OutputExists(PathBuf),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),
}
