use log::debug;
use serde_json::Value;
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, RequestInit, Response, window};

use crate::{api_utils::ConfigFetcher, bootstrap::HostDocument, errors::ConfigError as Error};

fn js_error(e: JsValue) -> Error {
    let msg = format!("{e:?}");
    debug!("fetch error {msg}");
    Error::Transport(msg.into())
}

pub async fn js_fetch(url: &Url, method: &str) -> Result<JsValue, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(method);

    let window = window().ok_or_else(|| JsValue::from_str("No window"))?;
    let resp = JsFuture::from(window.fetch_with_str_and_init(url.as_str(), &opts)).await?;
    let resp: Response = resp.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_f64(f64::from(resp.status())));
    }
    JsFuture::from(resp.json()?).await
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsFetcher;

impl ConfigFetcher for JsFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, Error> {
        let json = js_fetch(url, "GET").await.map_err(js_error)?;
        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Decode(e.to_string().into()))
    }
}

/// The browser document of the current window.
#[derive(Clone, Debug)]
pub struct WebDocument(Document);

impl WebDocument {
    /// # Errors
    /// Returns error if there is no window or document
    pub fn current() -> Result<Self, JsValue> {
        window()
            .and_then(|w| w.document())
            .map(Self)
            .ok_or_else(|| JsValue::from_str("No document"))
    }
}

impl HostDocument for WebDocument {
    type Element = Element;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element> {
        self.0.get_element_by_id(id)
    }
}
