use url::Url;

use crate::{
    coordinates::{Latitude, Longitude},
    errors::ConfigError as Error,
};

pub static DEFAULT_API_ENDPOINT: &str = "https://query.yahooapis.com/v1/public/yql";

/// Response format selector sent with every query
pub static RESPONSE_FORMAT: &str = "json";

/// A single outbound GET for the weather/geo lookup of one coordinate pair.
///
/// The query text is interpolated as-is and the result parsed into a [`Url`],
/// so the request is always well-formed before it is issued. Parsing
/// percent-encodes spaces and quotes but leaves the `lat,lon` pair intact.
/// Parameters already on the endpoint (an api key, say) are kept ahead of
/// `q` and `format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigQuery {
    url: Url,
}

impl ConfigQuery {
    /// # Errors
    /// Returns error if `endpoint` does not parse as an absolute url
    pub fn new(endpoint: &str, latitude: Latitude, longitude: Longitude) -> Result<Self, Error> {
        let endpoint = endpoint.trim_end_matches(['?', '&']);
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{endpoint}{sep}q=select * from weather.forecast where woeid in (SELECT woeid FROM \
             geo.placefinder WHERE text=\"{latitude},{longitude}\" and \
             gflags=\"R\")&format={RESPONSE_FORMAT}"
        );
        let url = Url::parse(&url)?;
        Ok(Self { url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn into_url(self) -> Url {
        self.url
    }
}
