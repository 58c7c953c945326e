use rocket::{
  http::Status,
  response::{self, status, Responder},
  serde::json::Json,
  Request,
};

use crate::{
  error::CatalogError,
  models::{ErrorResponse, HealthStatus},
};

pub mod presets;
pub use self::presets::*;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[get("/health")]
pub fn health() -> Json<HealthStatus> {
  Json(HealthStatus {
    ok: true,
    now: chrono::Utc::now(),
  })
}

impl<'r> Responder<'r, 'static> for CatalogError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    let message = self.to_string();
    let (status, body) = match self {
      CatalogError::NotFound(_) => (Status::NotFound, ErrorResponse::new(message)),
      CatalogError::AlreadyExists(_) => (Status::Conflict, ErrorResponse::new(message)),
      CatalogError::Invalid(details) => (
        Status::BadRequest,
        ErrorResponse {
          error: String::from("Invalid preset"),
          details,
        },
      ),
      CatalogError::Parse { .. } | CatalogError::Io { .. } => {
        error!("Error handling {} {}: {}", req.method(), req.uri(), message);
        (
          Status::InternalServerError,
          ErrorResponse::new(INTERNAL_SERVER_ERROR),
        )
      },
    };

    status::Custom(status, Json(body)).respond_to(req)
  }
}

/// Turns every error status that isn't answered by a route (unknown paths, malformed bodies,
/// panics) into the same JSON shape the API uses.  5xx never carry details.
#[catch(default)]
pub fn default_catcher(status: Status, req: &Request) -> status::Custom<Json<ErrorResponse>> {
  let message = if status.code >= 500 {
    error!("Unhandled error serving {} {}: {}", req.method(), req.uri(), status);
    INTERNAL_SERVER_ERROR
  } else {
    status.reason().unwrap_or("Error")
  };

  status::Custom(status, Json(ErrorResponse::new(message)))
}
