#![allow(clippy::pedantic)]
#![allow(clippy::too_many_arguments)]

pub mod api_utils;
pub mod bootstrap;
pub mod config_element;
pub mod coordinates;
pub mod debug_hooks;
pub mod errors;
pub mod query;
pub mod snapshot;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod wasm_utils;

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm_utils;

pub use api_utils::{ConfigApiUtils, FETCH_FAILURE_MESSAGE};
pub use coordinates::{Latitude, Longitude};
pub use snapshot::{ConfigPayload, ConfigSnapshot};
pub use store::{ActionDispatcher, ConfigAction, ConfigStore};
