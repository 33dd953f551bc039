//! One-shot diagnostic probe of the child's status endpoint.

use std::time::Duration;

use axum::body::Body;
use axum::http::{uri::Authority, Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use tokio::time;

/// Result of a single child probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildHealth {
    Healthy,
    Unhealthy,
}

/// Issue one GET to the child's status endpoint.
///
/// Healthy iff the child answers 200 within the timeout.
pub async fn probe(
    client: &Client<HttpConnector, Body>,
    authority: &Authority,
    status_path: &str,
    timeout: Duration,
) -> ChildHealth {
    let uri_string = format!("http://{}{}", authority, status_path);

    let request = match Request::builder()
        .method("GET")
        .uri(uri_string)
        .header("user-agent", "app-bridge-health-check")
        .body(Body::empty())
    {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build health probe request");
            return ChildHealth::Unhealthy;
        }
    };

    match time::timeout(timeout, client.request(request)).await {
        Ok(Ok(response)) if response.status() == StatusCode::OK => ChildHealth::Healthy,
        Ok(Ok(response)) => {
            tracing::warn!(status = %response.status(), "Child status probe returned non-200");
            ChildHealth::Unhealthy
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Child status probe failed: connection error");
            ChildHealth::Unhealthy
        }
        Err(_) => {
            tracing::warn!("Child status probe failed: timeout");
            ChildHealth::Unhealthy
        }
    }
}
