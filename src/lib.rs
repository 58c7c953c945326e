#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde_derive;

use rocket::{
  data::{Limits, ToByteUnit},
  fairing::AdHoc,
  fs::{FileServer, Options},
  Build, Rocket,
};
use rocket_async_compression::Compression;

pub mod catalog;
pub mod conf;
pub mod error;
pub mod models;
pub mod routes;
pub mod slug;
pub mod store;

use self::{catalog::Catalog, conf::Conf};

/// Maximum accepted size of a JSON request body.
const JSON_BODY_LIMIT_MIB: u64 = 2;

/// Assembles the server: preset API under `/api`, static files from the public directory at `/`.
pub fn build_rocket(conf: Conf) -> Rocket<Build> {
  let figment = rocket::Config::figment().merge(("port", conf.port)).merge((
    "limits",
    Limits::default().limit("json", JSON_BODY_LIMIT_MIB.mebibytes()),
  ));
  let catalog = Catalog::from_conf(&conf);
  let store = catalog.store().clone();

  rocket::custom(figment)
    .manage(catalog)
    .attach(AdHoc::on_ignite("Preset data directory", move |rocket| async move {
      store.ensure_dir().await;
      info!("Serving presets from {}", store.data_dir().display());
      rocket
    }))
    .attach(Compression::fairing())
    .mount(
      "/api",
      routes![
        routes::health,
        routes::list_presets,
        routes::get_preset,
        routes::create_preset,
        routes::replace_preset,
        routes::delete_preset,
      ],
    )
    .mount(
      "/",
      FileServer::new(&conf.public_dir, Options::Index | Options::Missing),
    )
    .register("/", catchers![routes::default_catcher])
}
