//! HTTP server setup and request forwarding.
//!
//! # Responsibilities
//! - Create the Axum router: `/health` locally, everything else pass-through
//! - Wire up middleware (request ID, trace, timeout)
//! - Forward requests to the child process unchanged
//! - Relay child responses verbatim
//! - Serve until the shutdown signal fires

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::child::{ChildPhase, ChildSupervisor};
use crate::config::BridgeConfig;
use crate::health::{probe, ChildHealth};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::{child_unreachable, json_error};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<ChildSupervisor>,
    pub client: Client<HttpConnector, Body>,
    pub child_authority: Authority,
    pub status_path: String,
    pub probe_timeout: Duration,
}

/// HTTP server for the bridge.
pub struct BridgeServer {
    router: Router,
}

impl BridgeServer {
    /// Create a new server fronting the given child supervisor.
    pub fn new(
        config: &BridgeConfig,
        supervisor: Arc<ChildSupervisor>,
    ) -> Result<Self, InvalidUri> {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let child_authority = Authority::from_str(&config.child.authority())?;

        let state = AppState {
            supervisor,
            client,
            child_authority,
            status_path: config.child.status_path.clone(),
            probe_timeout: Duration::from_secs(config.health.timeout_secs),
        };

        Ok(Self {
            router: Self::build_router(config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/", any(passthrough_handler))
            .route("/{*path}", any(passthrough_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server, accepting connections until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Pass-through handler.
///
/// Rewrites the URI to target the child and relays the response verbatim.
async fn passthrough_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Forwarding request"
    );

    let (mut parts, body) = request.into_parts();

    // Retarget the URI at the child, keeping path and query intact.
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.child_authority.clone());
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to rewrite URI");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) if e.is_connect() => {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Child connection failed"
            );
            child_unreachable()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Forwarding failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// Health handler.
///
/// Reports the child's state without touching the pass-through path.
async fn health_handler(State(state): State<AppState>) -> Response {
    if state.supervisor.phase() == ChildPhase::Starting {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "starting" })),
        )
            .into_response();
    }

    match probe(
        &state.client,
        &state.child_authority,
        &state.status_path,
        state.probe_timeout,
    )
    .await
    {
        ChildHealth::Healthy => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "child": "running" })),
        )
            .into_response(),
        ChildHealth::Unhealthy => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "child": "down" })),
        )
            .into_response(),
    }
}
