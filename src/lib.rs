//! API path normalization front for a multi-provider AI gateway.
//!
//! Clients may call `/chat/completions` or `/v1/chat/completions`,
//! `/models/gemini-pro:generateContent` or
//! `/v1beta/models/gemini-pro:generateContent`. Every request passes through
//! the path rewrite layer once, which prepends the missing version marker
//! before the request is routed and forwarded.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!                     │ path rewrite │───▶│ axum router  │───▶│   forward    │───▶ Upstream
//!                     │    layer     │    │ id/trace/tmo │    │   handler    │     Gateway
//!                     └──────┬───────┘    └──────────────┘    └──────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │   rewrite    │  pure classifier + static prefix tables
//!                     └──────────────┘
//!
//!     Cross-cutting: config, observability (logging, metrics), lifecycle
//! ```

// Core
pub mod rewrite;

// Hosting pipeline
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use rewrite::{ApiFamily, Classification, classify, classify_and_rewrite};
