use preset_catalog::conf::Conf;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[rocket::main]
pub async fn main() -> Result<(), rocket::Error> {
  dotenv::dotenv().ok();
  let conf = Conf::default();

  preset_catalog::build_rocket(conf).launch().await?;
  Ok(())
}
