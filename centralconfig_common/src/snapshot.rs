use derive_more::{Deref, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stack_string::{StackString, format_sstr};
use time::OffsetDateTime;

/// Parsed body of a successful config query
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, Deref, From, Into)]
pub struct ConfigPayload(Value);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigItem {
    pub name: StackString,
    pub value: StackString,
}

impl ConfigPayload {
    /// Flatten the payload into one item per leaf, named by its dotted path.
    #[must_use]
    pub fn items(&self) -> Vec<ConfigItem> {
        let mut items = Vec::new();
        flatten_value("", &self.0, &mut items);
        items.sort();
        items
    }
}

fn flatten_value(prefix: &str, value: &Value, items: &mut Vec<ConfigItem>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                flatten_value(&join_path(prefix, k), v, items);
            }
        }
        Value::Array(list) if !list.is_empty() => {
            for (idx, v) in list.iter().enumerate() {
                flatten_value(&join_path(prefix, &format_sstr!("{idx}")), v, items);
            }
        }
        Value::String(s) => items.push(ConfigItem {
            name: prefix.into(),
            value: s.as_str().into(),
        }),
        v => items.push(ConfigItem {
            name: prefix.into(),
            value: format_sstr!("{v}"),
        }),
    }
}

fn join_path(prefix: &str, key: &str) -> StackString {
    if prefix.is_empty() {
        key.into()
    } else {
        format_sstr!("{prefix}.{key}")
    }
}

/// Immutable view of the store state handed to subscribers
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ConfigSnapshot {
    pub version: u64,
    pub payload: Option<ConfigPayload>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated: Option<OffsetDateTime>,
}

impl ConfigSnapshot {
    #[must_use]
    pub fn items(&self) -> Vec<ConfigItem> {
        self.payload
            .as_ref()
            .map(ConfigPayload::items)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}
