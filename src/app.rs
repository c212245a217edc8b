use anyhow::Error;
use axum::{Router, routing::get};
use log::info;
use reqwest::Client;
use stack_string::format_sstr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    config::Config,
    routes::{config_items, index, show_ui},
};

pub struct AppState {
    pub config: Config,
    pub client: Client,
}

#[must_use]
pub fn get_app_router(config: Config) -> Router {
    let static_dir = config.static_dir.clone();
    let app = Arc::new(AppState {
        config,
        client: Client::new(),
    });
    Router::new()
        .route("/", get(show_ui))
        .route("/ui", get(show_ui))
        .route("/ui/", get(index))
        .route("/api/config", get(config_items))
        .nest_service("/ui/pkg", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(app)
}

/// # Errors
/// Returns error if the listener cannot bind or the server fails
pub async fn start_app(config: Config) -> Result<(), Error> {
    let addr = format_sstr!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("serving ui on http://{}/ui/", listener.local_addr()?);
    axum::serve(listener, get_app_router(config).into_make_service()).await?;
    Ok(())
}
