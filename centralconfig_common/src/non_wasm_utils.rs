use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::{api_utils::ConfigFetcher, errors::ConfigError as Error};

#[derive(Clone, Debug, Default)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ConfigFetcher for ReqwestFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, Error> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string().into()))?;
        let status = resp.status();
        debug!("{url} returned {status}");
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string().into()))?;
        serde_json::from_slice(&body).map_err(Into::into)
    }
}
