//! HTTP server
//!
//! Routes `/word`, `/save` and `/saved-words`; every other path is served
//! from the static directory. CORS and a per-request tracing span wrap the
//! whole router.

mod error;
mod routes;

pub use error::ApiError;

use crate::error::{Error, Result};
use crate::logging::generate_request_id;
use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use wordwise_core::{Dictionary, SavedWordStore};

/// Shared handles for request handlers
#[derive(Clone)]
pub struct AppState {
    pub dictionary: Arc<dyn Dictionary>,
    pub store: Arc<dyn SavedWordStore>,
}

impl AppState {
    pub fn new(dictionary: Arc<dyn Dictionary>, store: Arc<dyn SavedWordStore>) -> Self {
        Self { dictionary, store }
    }
}

/// Router-level settings
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

/// Build the application router
pub fn router(state: AppState, settings: &RouterSettings) -> Result<Router> {
    let api = Router::new()
        .route("/word", get(routes::get_word))
        .route("/save", get(routes::save_word))
        .route("/saved-words", get(routes::saved_words))
        .with_state(state);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %generate_request_id(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Ok(api
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(trace)
        .layer(cors_layer(&settings.allowed_origins)?))
}

/// CORS policy: listed origins, credentials allowed
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| Error::config(format!("Invalid allowed origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| Error::server(format!("Failed to read listener address: {}", e)))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
