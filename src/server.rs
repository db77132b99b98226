use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_ROOT: &str = "dist";
const DEFAULT_STATIC_CACHE_SECONDS: u64 = 300;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const STATIC_CACHE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_MAX_LEN: usize = 128;

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub site_root: PathBuf,
    pub static_cache_seconds: u64,
    pub log_level: LogLevel,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset, unparsable or out of range values fall back to the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u64_with_bounds(lookup("PORT"), u64::from(DEFAULT_PORT), PORT_BOUNDS);

        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            site_root: parse_non_empty(lookup("SITE_ROOT"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT)),
            static_cache_seconds: parse_u64_with_bounds(
                lookup("STATIC_CACHE_SECONDS"),
                DEFAULT_STATIC_CACHE_SECONDS,
                STATIC_CACHE_SECONDS_BOUNDS,
            ),
            log_level: parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    log_event(
        &config,
        LogLevel::Info,
        "server_started",
        serde_json::json!({
            "address": bind_address.to_string(),
            "siteRoot": config.site_root.display().to_string(),
        }),
    );

    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Static files from the site root with every unknown path answered by
/// `index.html`, plus a health probe.
pub fn router(config: ServerConfig) -> Router {
    let index = config.site_root.join("index.html");
    let static_service = ServeDir::new(&config.site_root).fallback(ServeFile::new(index));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(Arc::new(config), track_request))
}

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
    service: &'static str,
    version: &'static str,
}

async fn healthz() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(HealthPayload {
            ok: true,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

async fn track_request(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = resolve_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            static_cache_control(config.static_cache_seconds),
        );
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    let level = if path == "/healthz" {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        &config,
        level,
        "http_request",
        serde_json::json!({
            "requestId": request_id,
            "method": method.as_str(),
            "path": path,
            "status": response.status().as_u16(),
            "durationMs": started.elapsed().as_millis() as u64,
        }),
    );

    response
}

fn static_cache_control(seconds: u64) -> HeaderValue {
    if seconds == 0 {
        return HeaderValue::from_static("no-cache");
    }
    HeaderValue::from_str(&format!("public, max-age={seconds}"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

fn parse_u64_with_bounds(raw: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    match parse_non_empty(raw)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= REQUEST_ID_MAX_LEN)
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }
    println!("{}", event_payload(now_unix_seconds(), level, event, fields));
}

fn event_payload(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::from(ts));
    payload.insert("level".to_string(), serde_json::Value::from(level.as_str()));
    payload.insert("event".to_string(), serde_json::Value::from(event));

    if let serde_json::Value::Object(extra) = fields {
        payload.extend(extra);
    }

    serde_json::Value::Object(payload)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn site_root_with_index(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("portfolio-site-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&root).expect("temp dir");
        std::fs::write(root.join("index.html"), "<div id=\"app\"></div>").expect("index written");
        root
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.site_root, PathBuf::from("dist"));
        assert_eq!(config.static_cache_seconds, 300);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn out_of_range_values_fall_back() {
        let config = config_from(&[
            ("PORT", "0"),
            ("STATIC_CACHE_SECONDS", "99999999999"),
            ("SITE_ROOT", "   "),
            ("LOG_LEVEL", "trace"),
        ]);

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn valid_values_are_used() {
        let config = config_from(&[
            ("PORT", " 3000 "),
            ("STATIC_CACHE_SECONDS", "0"),
            ("SITE_ROOT", "public"),
            ("LOG_LEVEL", "DEBUG"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.static_cache_seconds, 0);
        assert_eq!(config.site_root, PathBuf::from("public"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn request_id_is_echoed_or_generated() {
        let mut headers = HeaderMap::new();
        assert!(resolve_request_id(&headers).starts_with("req-"));

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let oversized = "x".repeat(REQUEST_ID_MAX_LEN + 1);
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&oversized).expect("ascii header"),
        );
        assert!(resolve_request_id(&headers).starts_with("req-"));
    }

    #[test]
    fn event_payload_merges_fields() {
        let payload = event_payload(
            42,
            LogLevel::Info,
            "http_request",
            serde_json::json!({ "status": 200 }),
        );

        assert_eq!(
            payload,
            serde_json::json!({
                "ts": 42,
                "level": "info",
                "event": "http_request",
                "status": 200,
            })
        );
    }

    #[test]
    fn cache_header_follows_configuration() {
        assert_eq!(static_cache_control(0), "no-cache");
        assert_eq!(static_cache_control(300), "public, max-age=300");
    }

    #[tokio::test]
    async fn healthz_reports_ok_and_echoes_request_id() {
        let app = router(ServerConfig::default());
        let request = axum::http::Request::builder()
            .uri("/healthz")
            .header(REQUEST_ID_HEADER, "req-abc-1")
            .body(Body::empty())
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router answers");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-abc-1");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(payload["ok"], true);
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let root = site_root_with_index("fallback");
        let app = router(ServerConfig {
            site_root: root.clone(),
            ..ServerConfig::default()
        });
        let request = axum::http::Request::builder()
            .uri("/projects/ecommerce")
            .body(Body::empty())
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router answers");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=300");
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body reads");
        assert_eq!(&body[..], b"<div id=\"app\"></div>");

        let _ = std::fs::remove_dir_all(root);
    }
}
