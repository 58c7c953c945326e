//! Directory of preset records, one pretty-printed JSON file per preset named after its slug.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{
  error::CatalogError,
  models::{Preset, PresetRecord},
  slug::slugify,
};

const RECORD_EXTENSION: &str = ".json";

#[derive(Clone, Debug)]
pub struct PresetStore {
  data_dir: PathBuf,
}

impl PresetStore {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    PresetStore {
      data_dir: data_dir.into(),
    }
  }

  pub fn data_dir(&self) -> &Path { &self.data_dir }

  /// Path of the record for a display name or slug.  Pure; the file may not exist.
  pub fn path_for(&self, name_or_slug: &str) -> PathBuf {
    self.file_path(&format!("{}{}", slugify(name_or_slug), RECORD_EXTENSION))
  }

  /// Path of a file name returned by `list_files`.
  pub fn file_path(&self, file_name: &str) -> PathBuf { self.data_dir.join(file_name) }

  /// Creates the data directory if it's missing.  Failures are logged and otherwise ignored; a
  /// missing directory just reads as an empty catalog.
  pub async fn ensure_dir(&self) {
    if let Err(err) = fs::create_dir_all(&self.data_dir).await {
      warn!(
        "Unable to create preset data directory {}: {}",
        self.data_dir.display(),
        err
      );
    }
  }

  /// `true` only if a regular file can be accessed at `path`.  Any error, including permission
  /// errors, counts as absent.
  pub async fn exists(&self, path: &Path) -> bool {
    fs::metadata(path)
      .await
      .map(|metadata| metadata.is_file())
      .unwrap_or(false)
  }

  /// Names of the `.json` entries directly inside the data directory, sorted by name so that
  /// listings don't depend on the order the filesystem happens to return entries in.
  ///
  /// An unreadable or missing directory yields an empty list.
  pub async fn list_files(&self) -> Vec<String> {
    let mut entries = match fs::read_dir(&self.data_dir).await {
      Ok(entries) => entries,
      Err(err) => {
        warn!(
          "Unable to read preset data directory {}: {}",
          self.data_dir.display(),
          err
        );
        return Vec::new();
      },
    };

    let mut file_names = Vec::new();
    loop {
      match entries.next_entry().await {
        Ok(Some(entry)) => {
          let file_name = match entry.file_name().into_string() {
            Ok(file_name) => file_name,
            Err(raw) => {
              warn!("Skipping preset file with non-UTF-8 name: {:?}", raw);
              continue;
            },
          };
          if file_name.ends_with(RECORD_EXTENSION) {
            file_names.push(file_name);
          }
        },
        Ok(None) => break,
        Err(err) => {
          warn!(
            "Error while listing preset data directory {}: {}",
            self.data_dir.display(),
            err
          );
          break;
        },
      }
    }

    file_names.sort_unstable();
    file_names
  }

  /// Loads a record.  Any well-formed JSON is accepted; only unreadable files and invalid JSON fail.
  pub async fn read(&self, path: &Path) -> Result<PresetRecord, CatalogError> {
    let raw = fs::read_to_string(path)
      .await
      .map_err(|err| CatalogError::io(path, err))?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
      path: path.to_owned(),
      source,
    })
  }

  /// Replaces the content of `path` with `preset` as JSON indented by two spaces.
  pub async fn write(&self, path: &Path, preset: &Preset) -> Result<(), CatalogError> {
    let serialized = serde_json::to_string_pretty(preset).map_err(|source| CatalogError::Parse {
      path: path.to_owned(),
      source,
    })?;
    fs::write(path, serialized)
      .await
      .map_err(|err| CatalogError::io(path, err))
  }

  pub async fn remove(&self, path: &Path) -> Result<(), CatalogError> {
    fs::remove_file(path)
      .await
      .map_err(|err| CatalogError::io(path, err))
  }
}
