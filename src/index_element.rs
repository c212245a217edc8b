use dioxus::prelude::*;
use stack_string::{StackString, format_sstr};
use std::sync::Arc;

use centralconfig_common::{
    ConfigSnapshot, bootstrap::MOUNT_POINT_ID, config_element::ConfigDashboard,
};

static WASM_MODULE: &str = "/ui/pkg/centralconfig_wasm.js";

#[component]
fn IndexElement(snapshot: Arc<ConfigSnapshot>, endpoint: StackString) -> Element {
    let loader = format_sstr!("import init from '{WASM_MODULE}';\ninit();\n");
    rsx! {
        div { id: "{MOUNT_POINT_ID}", "data-api-endpoint": "{endpoint}",
            ConfigDashboard { snapshot: snapshot }
        }
        script { r#type: "module", dangerous_inner_html: "{loader}" }
    }
}

/// Full html page for `/ui/`, with the dashboard pre-rendered inside the
/// mount point the browser app takes over. `endpoint` is handed to the
/// browser app through the mount point's `data-api-endpoint` attribute.
#[must_use]
pub fn index_body(snapshot: Arc<ConfigSnapshot>, endpoint: &str) -> StackString {
    let endpoint: StackString = endpoint.into();
    let body = dioxus_ssr::render_element(rsx! {
        IndexElement { snapshot: snapshot, endpoint: endpoint }
    });
    format_sstr!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Central \
         Config</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
