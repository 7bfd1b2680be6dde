//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Wrap the router in the path rewrite layer, itself inside request ID
//!   assignment so rewrite events can name the request
//! - Forward normalized requests to the upstream gateway
//! - Serve until the shutdown signal fires

use axum::{
    Router, ServiceExt,
    body::Body,
    extract::State,
    http::{
        HeaderValue, Request, StatusCode, Uri, header,
        uri::{Authority, PathAndQuery, Scheme},
    },
    response::{IntoResponse, Response},
    routing::any,
};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Layer;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::X_REQUEST_ID;
use crate::http::middleware::{PathRewrite, PathRewriteLayer};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// Complete service handed to `axum::serve`.
pub type GatewayService = SetRequestId<PathRewrite<Router>, MakeRequestUuid>;

/// Error raised while building the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid upstream address `{address}`: {source}")]
    InvalidUpstream {
        address: String,
        source: axum::http::uri::InvalidUri,
    },

    #[error("upstream address `{0}` must not contain userinfo")]
    UpstreamUserInfo(String),
}

/// HTTP server fronting the upstream gateway.
pub struct HttpServer {
    app: GatewayService,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let upstream: Authority = config.upstream.address.trim().parse().map_err(|source| {
            ServerError::InvalidUpstream {
                address: config.upstream.address.clone(),
                source,
            }
        })?;
        if upstream.as_str().contains('@') {
            return Err(ServerError::UpstreamUserInfo(config.upstream.address.clone()));
        }

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState { client, upstream };
        let app = SetRequestIdLayer::x_request_id(MakeRequestUuid)
            .layer(PathRewriteLayer::new().layer(Self::build_router(&config, state)));

        Ok(Self { app, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added here run after route matching, so the path rewrite
    /// is applied around the finished router instead.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// The complete service: request ID, then path rewrite, then the router.
    pub fn app(&self) -> GatewayService {
        self.app.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        let app = ServiceExt::<Request<Body>>::into_make_service_with_connect_info::<SocketAddr>(
            self.app,
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Forward the request to the upstream gateway, keeping its path and query.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (mut parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    parts.uri = match Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(state.upstream.clone())
        .path_and_query(path_and_query)
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
        }
    };
    if let Ok(host) = HeaderValue::from_str(state.upstream.as_str()) {
        parts.headers.insert(header::HOST, host);
    }

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %parts.uri,
        "Forwarding request"
    );

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(&method, response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_upstream(&method, StatusCode::BAD_GATEWAY.as_u16(), start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_upstream() {
        let mut config = GatewayConfig::default();
        config.upstream.address = "http://bad host".into();
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::InvalidUpstream { .. })
        ));
    }

    #[test]
    fn test_rejects_upstream_userinfo() {
        let mut config = GatewayConfig::default();
        config.upstream.address = "user:secret@gateway:3000".into();
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::UpstreamUserInfo(address)) if address == "user:secret@gateway:3000"
        ));
    }

    #[tokio::test]
    async fn test_new_with_defaults() {
        let server = HttpServer::new(GatewayConfig::default()).unwrap();
        assert_eq!(server.config().upstream.address, "127.0.0.1:3000");
    }
}
