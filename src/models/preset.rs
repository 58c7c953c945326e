use serde_json::{Map, Value};

use crate::slug::slugify;

/// A stored preset file exactly as it was read.
///
/// Records are authored by hand, so any well-formed JSON counts as a record: listings and lookups
/// return it untouched, and the accessors fall back to empty values when a field is missing or has
/// an unexpected type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetRecord(pub Value);

impl PresetRecord {
  fn str_field(&self, field: &str) -> &str { self.0.get(field).and_then(Value::as_str).unwrap_or("") }

  pub fn name(&self) -> &str { self.str_field("name") }

  pub fn preset_type(&self) -> &str { self.str_field("type") }

  /// Only a literal JSON `true` marks a built-in preset; truthy values like `1` or `"true"` don't.
  pub fn is_factory(&self) -> bool { self.0.get("factory") == Some(&Value::Bool(true)) }
}

/// A reference to a playable audio file, relative to the public presets directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
  pub name: String,
  pub url: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A preset submitted for writing.  Stricter than `PresetRecord`: the body must have the shape the
/// front end relies on before it is stored as `<slug>.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
  pub name: String,
  #[serde(
    rename = "type",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub preset_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub factory: Option<Value>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub samples: Vec<Sample>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Preset {
  pub fn new(name: impl Into<String>) -> Self {
    Preset {
      name: name.into(),
      preset_type: None,
      factory: None,
      samples: Vec::new(),
      extra: Map::new(),
    }
  }

  pub fn slug(&self) -> String { slugify(&self.name) }

  /// Checks the fields the catalog relies on before a record is written to disk.  Every problem is
  /// reported, not just the first.
  pub fn validate(&self) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if self.name.trim().is_empty() {
      problems.push(String::from("`name` must not be empty"));
    } else if self.slug().is_empty() {
      problems.push(format!(
        "`name` \"{}\" must contain at least one ASCII letter or digit",
        self.name
      ));
    }

    if let Some(factory) = &self.factory {
      if !factory.is_boolean() {
        problems.push(format!("`factory` must be a boolean, found {}", factory));
      }
    }

    for (ix, sample) in self.samples.iter().enumerate() {
      if sample.url.trim().is_empty() {
        problems.push(format!("`samples[{}].url` must not be empty", ix));
      }
    }

    if problems.is_empty() {
      Ok(())
    } else {
      Err(problems)
    }
  }
}
