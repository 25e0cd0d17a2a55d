use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors shared by every oxipack operation
#[derive(Error, Debug)]
pub enum OxipackError {
    /// Input path does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Structural parse failed and no fallback applied
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Formatter or minifier failure
    #[error("{stage} failed: {message}")]
    Transform { stage: &'static str, message: String, hint: Option<&'static str> },

    /// Bundler failure
    #[error("Bundling failed: {0}")]
    Bundle(String),

    /// External executable could not be located
    #[error("Required tool missing: {tool}")]
    ToolMissing { tool: &'static str, install_hint: &'static str },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OxipackError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Remediation hint for the user, if one is known
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Transform { hint, .. } => *hint,
            Self::ToolMissing { install_hint, .. } => Some(*install_hint),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, OxipackError>;
