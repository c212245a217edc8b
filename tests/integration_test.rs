use anyhow::Error;
use axum::{
    Router,
    extract::{RawQuery, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use parking_lot::Mutex;
use stack_string::{StackString, format_sstr};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use centralconfig_common::{
    ConfigApiUtils, ConfigStore, FETCH_FAILURE_MESSAGE, api_utils::Diagnostics,
    non_wasm_utils::ReqwestFetcher,
};
use centralconfig_rust::{
    app::get_app_router,
    config::{Config, ConfigInner},
};

static YQL_BODY: &str = r#"{"query": {"count": 1, "results": {"channel": {"title": "Yahoo! Weather - San Francisco, CA"}}}}"#;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: &'static str,
    queries: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            queries: Arc::default(),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

async fn yql(State(upstream): State<Upstream>, RawQuery(query): RawQuery) -> impl IntoResponse {
    upstream.queries.lock().push(query.unwrap_or_default());
    (
        upstream.status,
        [(CONTENT_TYPE, "application/json")],
        upstream.body,
    )
}

async fn serve(router: Router) -> Result<SocketAddr, Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(addr)
}

async fn spawn_upstream(upstream: &Upstream) -> Result<StackString, Error> {
    let router = Router::new()
        .route("/v1/public/yql", get(yql))
        .with_state(upstream.clone());
    let addr = serve(router).await?;
    Ok(format_sstr!("http://{addr}/v1/public/yql"))
}

#[derive(Clone, Default)]
struct RecordingDiagnostics(Arc<Mutex<Vec<String>>>);

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, message: &str) {
        self.0.lock().push(message.into());
    }
}

impl RecordingDiagnostics {
    fn messages(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[tokio::test]
async fn test_fetch_config_items_from_upstream() -> Result<(), Error> {
    let upstream = Upstream::new(StatusCode::OK, YQL_BODY);
    let endpoint = spawn_upstream(&upstream).await?;

    let (store, dispatcher) = ConfigStore::new();
    let diagnostics = RecordingDiagnostics::default();
    let utils = ConfigApiUtils::new(ReqwestFetcher::default(), dispatcher)
        .with_endpoint(&endpoint)
        .with_diagnostics(diagnostics.clone());
    utils
        .get_all_config_items("37.7749".parse()?, "-122.4194".parse()?)
        .await;
    drop(utils);

    let snapshot = store.run().await;
    assert_eq!(snapshot.version, 1);
    let items = snapshot.items();
    assert_eq!(items[0].name.as_str(), "query.count");
    assert_eq!(
        items[1].value.as_str(),
        "Yahoo! Weather - San Francisco, CA"
    );
    assert!(diagnostics.messages().is_empty());

    let queries = upstream.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].contains("37.7749,-122.4194"));
    assert!(queries[0].ends_with("format=json"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_failures_are_reported_once() -> Result<(), Error> {
    let server_error = Upstream::new(StatusCode::INTERNAL_SERVER_ERROR, "{}");
    let not_json = Upstream::new(StatusCode::OK, "<html>down for maintenance</html>");

    let closed = TcpListener::bind("127.0.0.1:0").await?.local_addr()?;
    let endpoints = vec![
        spawn_upstream(&server_error).await?,
        spawn_upstream(&not_json).await?,
        format_sstr!("http://{closed}/v1/public/yql"),
    ];

    for endpoint in endpoints {
        let (store, dispatcher) = ConfigStore::new();
        let diagnostics = RecordingDiagnostics::default();
        let utils = ConfigApiUtils::new(ReqwestFetcher::default(), dispatcher)
            .with_endpoint(&endpoint)
            .with_diagnostics(diagnostics.clone());
        utils
            .get_all_config_items("37.7749".parse()?, "-122.4194".parse()?)
            .await;
        drop(utils);

        let snapshot = store.run().await;
        assert!(snapshot.is_empty(), "{endpoint}");
        assert_eq!(diagnostics.messages(), vec![FETCH_FAILURE_MESSAGE.to_string()]);
    }
    assert_eq!(server_error.queries().len(), 1);
    assert_eq!(not_json.queries().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_ui_host_routes() -> Result<(), Error> {
    let upstream = Upstream::new(StatusCode::OK, YQL_BODY);
    let endpoint = spawn_upstream(&upstream).await?;
    let config = Config::from_inner(ConfigInner {
        api_endpoint: endpoint.clone(),
        ..ConfigInner::default()
    });
    let addr = serve(get_app_router(config)).await?;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let resp = client.get(format_sstr!("http://{addr}/").as_str()).send().await?;
    assert_eq!(resp.status().as_u16(), 301);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|l| l.to_str().ok()),
        Some("/ui/")
    );

    let resp = client.get(format_sstr!("http://{addr}/ui/").as_str()).send().await?;
    assert_eq!(resp.status().as_u16(), 200);
    let body = resp.text().await?;
    assert!(body.contains(r#"id="centralconfigapp""#));
    assert!(body.contains("No config items loaded"));
    assert!(body.contains(format_sstr!(r#"data-api-endpoint="{endpoint}""#).as_str()));

    let url = format_sstr!("http://{addr}/api/config?lat=37.7749&lon=-122.4194");
    let resp = client.get(url.as_str()).send().await?;
    assert_eq!(resp.status().as_u16(), 200);
    let snapshot: serde_json::Value = resp.json().await?;
    assert_eq!(snapshot["version"], 1);
    assert_eq!(snapshot["payload"]["query"]["count"], 1);
    assert!(upstream.queries()[0].contains("37.7749,-122.4194"));

    let resp = client
        .get(format_sstr!("http://{addr}/api/config?lat=37.7749").as_str())
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 400);

    let resp = client
        .get(format_sstr!("http://{addr}/api/config?lat=95&lon=0").as_str())
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 400);
    Ok(())
}

#[tokio::test]
async fn test_misconfigured_endpoint_is_server_error() -> Result<(), Error> {
    let config = Config::from_inner(ConfigInner {
        api_endpoint: "not a url".into(),
        ..ConfigInner::default()
    });
    let addr = serve(get_app_router(config)).await?;

    let url = format_sstr!("http://{addr}/api/config?lat=37.7749&lon=-122.4194");
    let resp = reqwest::get(url.as_str()).await?;
    assert_eq!(resp.status().as_u16(), 500);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], 500);
    Ok(())
}
