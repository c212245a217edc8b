use dioxus::prelude::*;
use std::sync::Arc;
use time::macros::format_description;

use crate::snapshot::ConfigSnapshot;

#[component]
pub fn ConfigDashboard(snapshot: Arc<ConfigSnapshot>) -> Element {
    let items = snapshot.items();
    let updated = snapshot
        .updated
        .and_then(|dt| {
            dt.format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]Z"
            ))
            .ok()
        })
        .unwrap_or_else(|| "never".into());
    let count = items.len();
    let is_empty = items.is_empty();

    rsx! {
        div { class: "centralconfig-dashboard",
            h1 { "Central Config" }
            p { class: "updated", "Last updated {updated}" }
            if is_empty {
                p { class: "empty", "No config items loaded" }
            } else {
                p { class: "count", "{count} config items" }
                table { class: "config-items",
                    tbody {
                        for (name, value) in items.into_iter().map(|i| (i.name, i.value)) {
                            tr { key: "{name}",
                                td { class: "name", "{name}" }
                                td { class: "value", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
