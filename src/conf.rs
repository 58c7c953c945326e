use std::path::PathBuf;

const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_PORT: u16 = 3000;

/// Startup configuration.  Resolved once in `main` and handed to `build_rocket`; nothing reads the
/// environment after that.
#[derive(Clone, Debug)]
pub struct Conf {
  /// Served as static files at `/`.
  pub public_dir: PathBuf,
  /// Holds one `<slug>.json` file per preset.
  pub data_dir: PathBuf,
  pub port: u16,
}

impl Conf {
  pub fn new(public_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
    Conf {
      public_dir: public_dir.into(),
      data_dir: data_dir.into(),
      port: DEFAULT_PORT,
    }
  }
}

impl Default for Conf {
  fn default() -> Self {
    let public_dir: PathBuf = dotenv::var("PUBLIC_DIR")
      .unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_owned())
      .into();
    let data_dir = dotenv::var("DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| public_dir.join("presets"));
    let port = dotenv::var("PORT")
      .map(|port| {
        port
          .parse()
          .expect("The `PORT` environment variable must be a valid port number!")
      })
      .unwrap_or(DEFAULT_PORT);

    Conf {
      public_dir,
      data_dir,
      port,
    }
  }
}
