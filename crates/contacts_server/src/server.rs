//! # HTTP Server
//!
//! Router assembly, request logging and the listener loop.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use contacts_core::db::DbError;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServerConfig;
use crate::routes::{contact_routes, health_routes};
use crate::state::AppState;

/// Startup failures; request-level failures never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to open database: {0}")]
    Database(#[from] DbError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Builds the full application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(contact_routes(state))
        .layer(middleware::from_fn(log_request))
        .layer(cors_layer(&config.cors_origins))
}

/// Permissive when no origins are configured, otherwise an allow-list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

/// Opens storage and serves requests until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::open(&config)?;
    let router = build_router(state, &config);

    let listener = bind_listener(&config).await?;
    info!(
        "event=server_start module=http status=ok addr={} database={}",
        listener.local_addr()?,
        config.database
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

/// Binds `host:port`; hostnames such as `localhost` are resolved.
pub async fn bind_listener(config: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind(config.socket_addr()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=shutdown_signal module=http status=error error={err}");
    }
}

#[cfg(test)]
mod tests {
    use super::bind_listener;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn bind_listener_resolves_hostname() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
            ..ServerConfig::in_memory()
        };

        let listener = bind_listener(&config).await.expect("bind localhost");
        let addr = listener.local_addr().expect("local addr");
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn bind_listener_accepts_ip_literal() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::in_memory()
        };

        let listener = bind_listener(&config).await.expect("bind 127.0.0.1");
        assert_eq!(
            listener.local_addr().expect("local addr").ip().to_string(),
            "127.0.0.1"
        );
    }
}
