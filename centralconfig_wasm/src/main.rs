use dioxus::prelude::*;
use futures_util::StreamExt;
use log::{debug, error};
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

use centralconfig_common::{
    ConfigApiUtils, ConfigSnapshot, ConfigStore, Latitude, Longitude,
    bootstrap::{API_ENDPOINT_ATTRIBUTE, HostDocument, MOUNT_POINT_ID, Renderer, bootstrap},
    config_element::ConfigDashboard,
    debug_hooks::{DebugHookRegistry, FrameworkInfo},
    errors::ConfigError,
    store::SnapshotReceiver,
    wasm_utils::{JsFetcher, WebDocument},
};

static DEFAULT_LOCATION: (f64, f64) = (37.7749, -122.4194);

type SharedUpdates = Arc<Mutex<Option<SnapshotReceiver>>>;

struct DioxusWebRenderer {
    updates: SharedUpdates,
}

impl Renderer for DioxusWebRenderer {
    type Target = web_sys::Element;

    fn render(&self, target: Self::Target) -> Result<(), ConfigError> {
        LaunchBuilder::web()
            .with_cfg(dioxus::web::Config::new().rootelement(target))
            .with_context(self.updates.clone())
            .launch(App);
        Ok(())
    }

    fn framework_info(&self) -> FrameworkInfo {
        FrameworkInfo::new("dioxus", "0.6")
    }
}

#[component]
fn App() -> Element {
    let updates = use_context::<SharedUpdates>();
    let mut snapshot = use_signal(|| Arc::new(ConfigSnapshot::default()));

    use_future(move || {
        let updates = updates.clone();
        async move {
            let Some(mut recv) = updates.lock().take() else {
                return;
            };
            while let Some(s) = recv.next().await {
                debug!("snapshot version {}", s.version);
                snapshot.set(s);
            }
        }
    });

    rsx! {
        ConfigDashboard { snapshot: snapshot() }
    }
}

fn default_location() -> Option<(Latitude, Longitude)> {
    let (lat, lon) = DEFAULT_LOCATION;
    Some((lat.try_into().ok()?, lon.try_into().ok()?))
}

/// `lat` and `lon` from the page query string.
fn location_from_page() -> Option<(Latitude, Longitude)> {
    let href = window()?.location().href().ok()?;
    let url = Url::parse(&href).ok()?;
    let mut lat = None;
    let mut lon = None;
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "lat" => lat = v.parse().ok(),
            "lon" => lon = v.parse().ok(),
            _ => (),
        }
    }
    Some((lat?, lon?))
}

fn main() {
    // init debug tool for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());
    console_error_panic_hook::set_once();

    let (mut store, dispatcher) = ConfigStore::new();
    let updates: SharedUpdates = Arc::new(Mutex::new(Some(store.subscribe())));
    let hooks = DebugHookRegistry::new();

    let document = match WebDocument::current() {
        Ok(document) => document,
        Err(e) => {
            error!("no document {e:?}");
            return;
        }
    };
    let endpoint = document
        .get_element_by_id(MOUNT_POINT_ID)
        .and_then(|e| e.get_attribute(API_ENDPOINT_ATTRIBUTE))
        .filter(|e| !e.is_empty());
    if let Err(e) = bootstrap(&document, &DioxusWebRenderer { updates }, &hooks) {
        error!("{e}");
        return;
    }

    spawn_local(async move {
        store.run().await;
    });

    let Some((latitude, longitude)) = location_from_page().or_else(default_location) else {
        error!("no location to query");
        return;
    };
    let mut utils = ConfigApiUtils::new(JsFetcher, dispatcher);
    if let Some(endpoint) = endpoint {
        utils = utils.with_endpoint(&endpoint);
    }
    debug!("querying {}", utils.endpoint());
    spawn_local(async move {
        utils.get_all_config_items(latitude, longitude).await;
    });
}
