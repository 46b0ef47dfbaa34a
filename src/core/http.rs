//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::scheduler::LatestSignal;
use crate::metrics::Metrics;
use crate::models::signal::PublishedSignal;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub latest: watch::Receiver<LatestSignal>,
    /// Polling interval shown on the dashboard
    pub refresh_seconds: u64,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

impl AppState {
    fn latest_signal(&self) -> Option<Arc<PublishedSignal>> {
        self.latest.borrow().clone()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "strikewise-signal-engine",
        "has_signal": state.latest_signal().is_some(),
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Latest published decision; 503 until the first cycle completes
pub async fn latest_signal(
    State(state): State<AppState>,
) -> Result<Json<PublishedSignal>, StatusCode> {
    state
        .latest_signal()
        .map(|published| Json((*published).clone()))
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

/// Auto-refreshing HTML dashboard
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    Html(render_dashboard(
        state.latest_signal().as_deref(),
        state.refresh_seconds,
    ))
}

pub fn render_dashboard(published: Option<&PublishedSignal>, refresh_seconds: u64) -> String {
    let mut body = String::new();
    match published {
        Some(published) => {
            let color = published.record.signal.color();
            let _ = write!(
                body,
                "<h2 style='color:{color}'>Last updated: {}</h2>\n<h1 style='color:{color}'>{}</h1>\n<h3>Reasons</h3>\n<ul>\n",
                escape_html(&published.reported_time),
                escape_html(published.record.signal.label()),
            );
            for reason in &published.record.reasons {
                let _ = writeln!(body, "<li>{}</li>", escape_html(reason));
            }
            body.push_str("</ul>\n");
        }
        None => body.push_str("<h2>Waiting for the first signal cycle...</h2>\n"),
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n<meta http-equiv='refresh' content='{refresh_seconds}'>\n<title>Option Signal</title>\n</head>\n<body>\n<h1>OPTION SIGNAL</h1>\n{body}<p>Auto-refresh every {refresh_seconds} seconds</p>\n</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signal", get(latest_signal))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Dashboard available at http://0.0.0.0:{}/", port);
    axum::serve(listener, app).await?;

    Ok(())
}
