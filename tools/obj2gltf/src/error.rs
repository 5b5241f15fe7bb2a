//! Conversion errors

use gltf_assembler::AssembleError;
use std::path::PathBuf;

/// Failure to ingest one geometry source
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path:?}: {source}")]
    Geometry {
        path: PathBuf,
        #[source]
        source: AssembleError,
    },
}

/// Failure of a whole conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source path is neither a mesh file nor a directory
    #[error("invalid source {0:?}: expected a mesh file or a folder")]
    InvalidSource(PathBuf),

    #[error("failed to load {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("failed to assemble {name:?}")]
    Assemble {
        name: String,
        #[source]
        source: AssembleError,
    },

    #[error("invalid configuration {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize glTF JSON: {0}")]
    Serialize(String),
}

impl ConvertError {
    /// The engine error behind this failure, if any
    pub fn assemble_error(&self) -> Option<&AssembleError> {
        match self {
            ConvertError::Assemble { source, .. } => Some(source),
            ConvertError::Load {
                source: LoadError::Geometry { source, .. },
                ..
            } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
