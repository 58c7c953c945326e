pub mod preset;

pub use self::preset::{Preset, PresetRecord, Sample};

/// JSON body returned for every failed API request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub details: Vec<String>,
}

impl ErrorResponse {
  pub fn new(error: impl Into<String>) -> Self {
    ErrorResponse {
      error: error.into(),
      details: Vec::new(),
    }
  }
}

#[derive(Serialize)]
pub struct HealthStatus {
  pub ok: bool,
  pub now: chrono::DateTime<chrono::Utc>,
}
