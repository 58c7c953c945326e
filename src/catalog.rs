//! Filtered listing and name-based lookup over the preset store.
//!
//! Every call reads the data directory again; nothing is cached between calls.

use std::path::Path;

use itertools::{Either, Itertools};
use rocket::futures::future::join_all;

use crate::{
  conf::Conf,
  error::CatalogError,
  models::{Preset, PresetRecord},
  store::PresetStore,
};

/// Query-string filters for preset listings.  All of them are optional and combine with AND.
///
/// A key given more than once is read as its values joined with `,`, so `?q=kit&q=pad` searches
/// for `kit,pad` instead of dropping the filter.
#[derive(Clone, Debug, Default, FromForm)]
pub struct PresetFilters {
  /// Case-insensitive substring of the preset name.
  pub q: Vec<String>,
  /// Case-insensitive substring of the preset type.
  #[field(name = "type")]
  pub preset_type: Vec<String>,
  /// Only the exact value `"true"` turns the factory filter on.
  pub factory: Vec<String>,
}

fn joined(values: &[String]) -> Option<String> {
  if values.is_empty() {
    None
  } else {
    Some(values.join(","))
  }
}

impl PresetFilters {
  fn factory_only(&self) -> bool { joined(&self.factory).as_deref() == Some("true") }

  pub fn matches(&self, preset: &PresetRecord) -> bool {
    if let Some(q) = joined(&self.q) {
      if !contains_ignore_case(preset.name(), &q) {
        return false;
      }
    }

    if let Some(preset_type) = joined(&self.preset_type) {
      if !contains_ignore_case(preset.preset_type(), &preset_type) {
        return false;
      }
    }

    !self.factory_only() || preset.is_factory()
  }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A record that was left out of a listing because it couldn't be read.
#[derive(Debug)]
pub struct SkippedRecord {
  pub file_name: String,
  pub reason: String,
}

#[derive(Debug, Default)]
pub struct CatalogListing {
  /// Matching presets, ordered by file name.
  pub presets: Vec<PresetRecord>,
  pub skipped: Vec<SkippedRecord>,
}

#[derive(Clone, Debug)]
pub struct Catalog {
  store: PresetStore,
}

impl Catalog {
  pub fn new(store: PresetStore) -> Self { Catalog { store } }

  pub fn from_conf(conf: &Conf) -> Self { Catalog::new(PresetStore::new(&conf.data_dir)) }

  pub fn store(&self) -> &PresetStore { &self.store }

  /// Reads every record and returns the ones matching `filters`.
  ///
  /// Never fails.  Records that can't be read or parsed are logged and reported in `skipped`; an
  /// unreadable directory produces an empty listing.
  pub async fn list(&self, filters: &PresetFilters) -> CatalogListing {
    let file_names = self.store.list_files().await;

    let reads = file_names.into_iter().map(|file_name| async move {
      let path = self.store.file_path(&file_name);
      self
        .store
        .read(&path)
        .await
        .map_err(|err| SkippedRecord {
          file_name,
          reason: err.to_string(),
        })
    });

    let (presets, skipped): (Vec<PresetRecord>, Vec<SkippedRecord>) =
      join_all(reads).await.into_iter().partition_map(|res| match res {
        Ok(preset) => Either::Left(preset),
        Err(skipped) => Either::Right(skipped),
      });

    for SkippedRecord { file_name, reason } in &skipped {
      warn!("Could not read preset {}: {}", file_name, reason);
    }

    CatalogListing {
      presets: presets
        .into_iter()
        .filter(|preset| filters.matches(preset))
        .collect(),
      skipped,
    }
  }

  /// Looks up a single preset by display name or slug.
  pub async fn get_by_name(&self, name_or_slug: &str) -> Result<PresetRecord, CatalogError> {
    let path = self.store.path_for(name_or_slug);
    if !self.store.exists(&path).await {
      return Err(CatalogError::NotFound(name_or_slug.to_owned()));
    }

    self.store.read(&path).await
  }

  /// Stores a new preset under the slug of its name.  Refuses to overwrite an existing record.
  pub async fn create(&self, preset: Preset) -> Result<Preset, CatalogError> {
    preset.validate().map_err(CatalogError::Invalid)?;

    let path = self.store.path_for(&preset.name);
    if self.store.exists(&path).await {
      return Err(CatalogError::AlreadyExists(preset.slug()));
    }

    self.store.write(&path, &preset).await?;
    info!("Created preset {} at {}", preset.name, path.display());
    Ok(preset)
  }

  /// Replaces the record found at `name_or_slug`.  If the new name has a different slug, the record
  /// moves to the new file, as long as no other record already lives there.
  pub async fn replace(&self, name_or_slug: &str, preset: Preset) -> Result<Preset, CatalogError> {
    preset.validate().map_err(CatalogError::Invalid)?;

    let old_path = self.store.path_for(name_or_slug);
    if !self.store.exists(&old_path).await {
      return Err(CatalogError::NotFound(name_or_slug.to_owned()));
    }

    let new_path = self.store.path_for(&preset.name);
    let renamed = new_path != old_path;
    if renamed && self.store.exists(&new_path).await {
      return Err(CatalogError::AlreadyExists(preset.slug()));
    }

    if renamed {
      self.move_record(&old_path, &new_path, &preset).await?;
    } else {
      self.store.write(&new_path, &preset).await?;
    }
    Ok(preset)
  }

  /// Writes `preset` to `new_path` and removes `old_path`.  If the old file can't be removed the new
  /// one is removed again, so a failed rename never leaves the preset listed twice.
  async fn move_record(
    &self,
    old_path: &Path,
    new_path: &Path,
    preset: &Preset,
  ) -> Result<(), CatalogError> {
    self.store.write(new_path, preset).await?;

    if let Err(err) = self.store.remove(old_path).await {
      warn!(
        "Failed to remove {} while renaming it to {}: {}",
        old_path.display(),
        new_path.display(),
        err
      );
      if let Err(rollback_err) = self.store.remove(new_path).await {
        error!(
          "Failed to roll back rename; {} and {} both exist: {}",
          old_path.display(),
          new_path.display(),
          rollback_err
        );
      }
      return Err(err);
    }

    info!(
      "Renamed preset {} to {}",
      old_path.display(),
      new_path.display()
    );
    Ok(())
  }

  pub async fn delete(&self, name_or_slug: &str) -> Result<(), CatalogError> {
    let path = self.store.path_for(name_or_slug);
    if !self.store.exists(&path).await {
      return Err(CatalogError::NotFound(name_or_slug.to_owned()));
    }

    self.store.remove(&path).await?;
    info!("Deleted preset {}", path.display());
    Ok(())
  }
}
