//! Errors produced by the preset store and catalog.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  /// No record file exists for the requested name.  Carries the name exactly as requested.
  #[error("Preset '{0}' not found")]
  NotFound(String),

  /// A write would overwrite a different record with the same slug.
  #[error("Preset '{0}' already exists")]
  AlreadyExists(String),

  /// The record submitted for writing failed validation.
  #[error("Invalid preset: {}", .0.join("; "))]
  Invalid(Vec<String>),

  /// The record file exists but does not contain a well-formed preset.
  #[error("failed to parse preset file {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// The record file or data directory could not be accessed.
  #[error("failed to access {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl CatalogError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    CatalogError::Io {
      path: path.into(),
      source,
    }
  }
}
