//! Version prefix normalization middleware.
//!
//! Wraps the downstream service and rewrites `/chat/completions` to
//! `/v1/chat/completions` (or `/models/gemini-*` to `/v1beta/models/gemini-*`)
//! before it is routed. The query string is carried over unchanged.
//!
//! Classification runs on the percent-decoded path, so `/%63hat/completions`
//! is recognized. The marker is prepended to the path as received.
//!
//! Runs inside the request ID layer and outside the router's trace span;
//! rewrite events carry the `x-request-id` value as a field instead.

use std::task::{Context, Poll};

use axum::http::{Request, Uri, uri::PathAndQuery};
use percent_encoding::percent_decode_str;
use tower::{Layer, Service};

use crate::http::X_REQUEST_ID;
use crate::observability::metrics;
use crate::rewrite::{Classification, classify};

/// Layer that applies [`PathRewrite`] to a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRewriteLayer;

impl PathRewriteLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for PathRewriteLayer {
    type Service = PathRewrite<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PathRewrite { inner }
    }
}

/// Service that prepends a missing version marker to the request path.
#[derive(Debug, Clone)]
pub struct PathRewrite<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for PathRewrite<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let classification = rewrite_request(&mut req);
        metrics::record_classification(&classification);
        self.inner.call(req)
    }
}

/// Classify the decoded form of `uri`'s path.
pub fn classify_uri(uri: &Uri) -> Classification {
    classify(&percent_decode_str(uri.path()).decode_utf8_lossy())
}

/// Rewrite the URI of `req` in place if its path is missing a marker.
///
/// Returns the classification of the original path.
pub fn rewrite_request<B>(req: &mut Request<B>) -> Classification {
    let classification = classify_uri(req.uri());

    if let Classification::Unversioned { family, prefix } = classification {
        let request_id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        match with_marker(req.uri(), &classification) {
            Ok(uri) => {
                tracing::debug!(
                    request_id = %request_id,
                    from = %req.uri().path(),
                    to = %uri.path(),
                    family = %family,
                    matched_prefix = prefix,
                    "Rewrote request path"
                );
                *req.uri_mut() = uri;
            }
            Err(error) => {
                tracing::warn!(
                    request_id = %request_id,
                    path = %req.uri().path(),
                    family = %family,
                    error = %error,
                    "Failed to rebuild request URI, passing through unchanged"
                );
            }
        }
    }

    classification
}

/// Build a copy of `uri` with `classification` applied to its path.
fn with_marker(uri: &Uri, classification: &Classification) -> Result<Uri, axum::http::Error> {
    let path = classification.apply(uri.path());
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.into_owned(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
