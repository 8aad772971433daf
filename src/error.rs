//! Error types

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("no .wav files found in: {0}")]
    NoWavFiles(PathBuf),

    #[error("failed to extract metadata from {file}: {source}")]
    MetadataExtraction { file: String, source: io::Error },

    #[error("failed to create document for {file}: {source}")]
    DocumentCreation { file: String, source: quick_xml::Error },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl IngestError {
    pub fn metadata(file: &Path, source: io::Error) -> Self {
        Self::MetadataExtraction {
            file: file.display().to_string(),
            source,
        }
    }

    pub fn document<S: Into<String>>(file: S, source: quick_xml::Error) -> Self {
        Self::DocumentCreation {
            file: file.into(),
            source,
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
