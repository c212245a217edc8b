use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use centralconfig_common::{
    ConfigApiUtils, ConfigSnapshot, ConfigStore, Latitude, Longitude,
    non_wasm_utils::ReqwestFetcher, query::ConfigQuery,
};

use crate::{app::AppState, errors::ServiceError as Error, index_element::index_body};

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ApiOptions {
    pub lat: Option<Latitude>,
    pub lon: Option<Longitude>,
}

pub async fn show_ui() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, "/ui/")])
}

pub async fn index(State(data): State<Arc<AppState>>) -> Html<String> {
    let body = index_body(
        Arc::new(ConfigSnapshot::default()),
        &data.config.api_endpoint,
    );
    Html(body.to_string())
}

/// Run the config query on the server and return the resulting snapshot.
pub async fn config_items(
    query: Query<ApiOptions>,
    State(data): State<Arc<AppState>>,
) -> Result<Json<ConfigSnapshot>, Error> {
    let Query(query) = query;
    let (lat, lon) = data.config.location(query.lat, query.lon).ok_or_else(|| {
        Error::BadRequest("\n\nERROR: You must specify both lat and lon".into())
    })?;
    // an endpoint that does not parse is a 500, not a null payload
    ConfigQuery::new(&data.config.api_endpoint, lat, lon)?;

    let (store, dispatcher) = ConfigStore::new();
    let utils = ConfigApiUtils::new(ReqwestFetcher::new(data.client.clone()), dispatcher)
        .with_endpoint(&data.config.api_endpoint);
    utils.get_all_config_items(lat, lon).await;
    drop(utils);

    let snapshot = store.run().await;
    Ok(Json(ConfigSnapshot::clone(&snapshot)))
}
