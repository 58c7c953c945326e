use rocket::{http::Status, response::status, serde::json::Json, State};

use crate::{
  catalog::{Catalog, PresetFilters},
  error::CatalogError,
  models::{Preset, PresetRecord},
};

#[get("/presets?<filters..>")]
pub async fn list_presets(
  catalog: &State<Catalog>,
  filters: PresetFilters,
) -> Json<Vec<PresetRecord>> {
  Json(catalog.list(&filters).await.presets)
}

#[get("/presets/<name>")]
pub async fn get_preset(
  catalog: &State<Catalog>,
  name: &str,
) -> Result<Json<PresetRecord>, CatalogError> {
  catalog.get_by_name(name).await.map(Json)
}

#[post("/presets", data = "<preset>")]
pub async fn create_preset(
  catalog: &State<Catalog>,
  preset: Json<Preset>,
) -> Result<status::Created<Json<Preset>>, CatalogError> {
  let created = catalog.create(preset.into_inner()).await?;
  let location = format!("/api/presets/{}", created.slug());
  Ok(status::Created::new(location).body(Json(created)))
}

#[put("/presets/<name>", data = "<preset>")]
pub async fn replace_preset(
  catalog: &State<Catalog>,
  name: &str,
  preset: Json<Preset>,
) -> Result<Json<Preset>, CatalogError> {
  catalog.replace(name, preset.into_inner()).await.map(Json)
}

#[delete("/presets/<name>")]
pub async fn delete_preset(catalog: &State<Catalog>, name: &str) -> Result<Status, CatalogError> {
  catalog.delete(name).await?;
  Ok(Status::NoContent)
}
