use log::{debug, error};
use serde_json::Value;
use stack_string::StackString;
use url::Url;

use crate::{
    coordinates::{Latitude, Longitude},
    errors::ConfigError as Error,
    query::{ConfigQuery, DEFAULT_API_ENDPOINT},
    snapshot::ConfigPayload,
};

pub static FETCH_FAILURE_MESSAGE: &str = "There was a problem getting config items.";

/// Issues a GET and returns the decoded json body.
#[allow(async_fn_in_trait)]
pub trait ConfigFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, Error>;
}

/// Receives payloads from successful fetches.
pub trait NotificationSink {
    fn deliver(&self, payload: ConfigPayload);
}

/// Channel for human readable failure reports.
pub trait Diagnostics {
    fn report(&self, message: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, message: &str) {
        error!("{message}");
    }
}

#[derive(Clone, Debug)]
pub struct ConfigApiUtils<F, S, D = LogDiagnostics> {
    fetcher: F,
    sink: S,
    diagnostics: D,
    endpoint: StackString,
}

impl<F, S> ConfigApiUtils<F, S>
where
    F: ConfigFetcher,
    S: NotificationSink,
{
    pub fn new(fetcher: F, sink: S) -> Self {
        Self {
            fetcher,
            sink,
            diagnostics: LogDiagnostics,
            endpoint: DEFAULT_API_ENDPOINT.into(),
        }
    }
}

impl<F, S, D> ConfigApiUtils<F, S, D>
where
    F: ConfigFetcher,
    S: NotificationSink,
    D: Diagnostics,
{
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_diagnostics<D2: Diagnostics>(self, diagnostics: D2) -> ConfigApiUtils<F, S, D2> {
        ConfigApiUtils {
            fetcher: self.fetcher,
            sink: self.sink,
            diagnostics,
            endpoint: self.endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Gets all configuration items for the given location.
    ///
    /// The payload goes to the notification sink. Any failure, including a
    /// malformed url or a body that is not json, ends in a single
    /// [`FETCH_FAILURE_MESSAGE`] on the diagnostic channel and nothing is
    /// returned to the caller.
    pub async fn get_all_config_items(&self, latitude: Latitude, longitude: Longitude) {
        match self.fetch(latitude, longitude).await {
            Ok(payload) => self.sink.deliver(payload),
            Err(e) => {
                debug!("config query for {latitude},{longitude} failed: {e}");
                self.diagnostics.report(FETCH_FAILURE_MESSAGE);
            }
        }
    }

    async fn fetch(&self, latitude: Latitude, longitude: Longitude) -> Result<ConfigPayload, Error> {
        let query = ConfigQuery::new(&self.endpoint, latitude, longitude)?;
        debug!("get {}", query.url());
        self.fetcher.fetch_json(query.url()).await.map(Into::into)
    }
}
