use anyhow::Error;
use serde::{Deserialize, Serialize};
use stack_string::{StackString, format_sstr};
use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use centralconfig_common::{Latitude, Longitude, query::DEFAULT_API_ENDPOINT};

/// Configuration data
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConfigInner {
    /// weather/geo lookup endpoint (default `https://query.yahooapis.com/v1/public/yql`)
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: StackString,
    /// interface the ui host binds to
    #[serde(default = "default_host")]
    pub host: StackString,
    #[serde(default = "default_port")]
    pub port: u32,
    /// optional default latitude
    pub latitude: Option<Latitude>,
    /// optional default longitude
    pub longitude: Option<Longitude>,
    /// directory holding the wasm bundle served under `/ui/pkg`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            host: default_host(),
            port: default_port(),
            latitude: None,
            longitude: None,
            static_dir: default_static_dir(),
        }
    }
}

fn default_api_endpoint() -> StackString {
    DEFAULT_API_ENDPOINT.into()
}
fn default_host() -> StackString {
    "127.0.0.1".into()
}
fn default_port() -> u32 {
    1313
}
fn default_static_dir() -> PathBuf {
    Path::new("ui").join("pkg")
}

impl ConfigInner {
    /// Lines of a `config.env` holding the default values.
    #[must_use]
    pub fn to_env_lines(&self) -> StackString {
        let mut lines = vec![
            format_sstr!("API_ENDPOINT={}", self.api_endpoint),
            format_sstr!("HOST={}", self.host),
            format_sstr!("PORT={}", self.port),
            format_sstr!("STATIC_DIR={}", self.static_dir.display()),
        ];
        if let Some(lat) = self.latitude {
            lines.push(format_sstr!("LATITUDE={lat}"));
        }
        if let Some(lon) = self.longitude {
            lines.push(format_sstr!("LONGITUDE={lon}"));
        }
        lines.join("\n").into()
    }
}

/// Configuration struct
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Config(Arc<ConfigInner>);

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_inner(inner: ConfigInner) -> Self {
        Self(Arc::new(inner))
    }

    /// Pull in configuration data using `[dotenvy](https://crates.io/dotenvy)`.
    ///
    /// If a .env file exists in the current directory, pull in any ENV
    /// variables in it.
    ///
    /// Next, if `config_path` is given, or a config file exists in the current
    /// directory named config.env, or at
    /// `${HOME}/.config/centralconfig_rust/config.env`, set ENV variables using
    /// it.
    ///
    /// Config files should have lines of the following form:
    /// `API_ENDPOINT=https://example.com/yql`
    ///
    /// # Errors
    /// Return error if deserializing environment variables fails
    pub fn init_config(config_path: Option<&Path>) -> Result<Self, Error> {
        let fname = config_path.unwrap_or_else(|| Path::new("config.env"));
        let config_dir = dirs::config_dir().unwrap_or_else(|| "./".into());
        let default_fname = config_dir.join("centralconfig_rust").join("config.env");

        let env_file = if fname.exists() {
            fname
        } else {
            &default_fname
        };

        dotenvy::dotenv().ok();

        if env_file.exists() {
            dotenvy::from_path(env_file).ok();
        }

        let conf: ConfigInner = envy::from_env()?;

        Ok(Self(Arc::new(conf)))
    }

    /// Coordinates given on the command line, falling back to the configured ones.
    #[must_use]
    pub fn location(
        &self,
        latitude: Option<Latitude>,
        longitude: Option<Longitude>,
    ) -> Option<(Latitude, Longitude)> {
        Some((latitude.or(self.latitude)?, longitude.or(self.longitude)?))
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
