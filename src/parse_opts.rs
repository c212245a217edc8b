use anyhow::{Error, format_err};
use clap::{Parser, Subcommand};
use log::info;
use stack_string::{StackString, format_sstr};
use std::path::PathBuf;
use tokio::io::{AsyncWriteExt, stdout};

use centralconfig_common::{
    ConfigApiUtils, ConfigStore, Latitude, Longitude, non_wasm_utils::ReqwestFetcher,
};

use crate::{
    app::start_app,
    config::{Config, ConfigInner},
};

static COMMIT_ID: Option<&str> = option_env!("CENTRALCONFIG_COMMIT");

#[derive(Parser, Debug)]
#[clap(
    name = "centralconfig",
    about = "A simple REST service and UI for application configuration"
)]
pub struct ParseOpts {
    /// config file (default is ./config.env or $CONFIG_DIR/centralconfig_rust/config.env)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the config server
    Serve {
        /// port on which the server will listen
        #[clap(short, long)]
        port: Option<u32>,
        /// interface to which the server will bind
        #[clap(long)]
        bind: Option<StackString>,
    },
    /// Query config items for a location and print the resulting snapshot
    Fetch {
        #[clap(short = 'a', long, allow_hyphen_values = true)]
        latitude: Option<Latitude>,
        #[clap(short = 'o', long, allow_hyphen_values = true)]
        longitude: Option<Longitude>,
    },
    /// Shows the version information
    Version,
    /// Prints default server configuration
    Defaults {
        /// Print as json instead of config.env lines
        #[clap(short, long)]
        json: bool,
    },
}

#[must_use]
pub fn version_string() -> StackString {
    let version = env!("CARGO_PKG_VERSION");
    match COMMIT_ID {
        Some(commit) if !commit.is_empty() => {
            let short = commit.get(..7).unwrap_or(commit);
            format_sstr!("Centralconfig version {version} ({short})")
        }
        _ => format_sstr!("Centralconfig version {version}"),
    }
}

impl ParseOpts {
    /// # Errors
    /// Return error if config fails to load, the server fails or writing
    /// to stdout fails
    pub async fn process_args() -> Result<(), Error> {
        let opts = ParseOpts::parse();

        match opts.command {
            Command::Version => {
                let line = format_sstr!("{}\n", version_string());
                stdout().write_all(line.as_bytes()).await?;
            }
            Command::Defaults { json } => {
                let defaults = ConfigInner::default();
                let output = if json {
                    serde_json::to_string_pretty(&defaults)?.into()
                } else {
                    defaults.to_env_lines()
                };
                let line = format_sstr!("{output}\n");
                stdout().write_all(line.as_bytes()).await?;
            }
            Command::Serve { port, bind } => {
                let config = Config::init_config(opts.config.as_deref())?;
                let mut inner = ConfigInner::clone(&config);
                if let Some(port) = port {
                    inner.port = port;
                }
                if let Some(bind) = bind {
                    inner.host = bind;
                }
                start_app(Config::from_inner(inner)).await?;
            }
            Command::Fetch {
                latitude,
                longitude,
            } => {
                let config = Config::init_config(opts.config.as_deref())?;
                let (lat, lon) = config
                    .location(latitude, longitude)
                    .ok_or_else(|| format_err!("latitude and longitude are required"))?;
                info!("fetching config items for {lat},{lon}");

                let (store, dispatcher) = ConfigStore::new();
                let utils = ConfigApiUtils::new(ReqwestFetcher::default(), dispatcher)
                    .with_endpoint(&config.api_endpoint);
                let fetch = async move { utils.get_all_config_items(lat, lon).await };
                let (snapshot, ()) = tokio::join!(store.run(), fetch);

                stdout()
                    .write_all(&serde_json::to_vec_pretty(&*snapshot)?)
                    .await?;
                stdout().write_all(b"\n").await?;
            }
        }
        Ok(())
    }
}
