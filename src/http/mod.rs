//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → middleware/path_rewrite.rs (prepend missing /v1 or /v1beta)
//!     → server.rs (Axum router: request ID, trace, timeout)
//!     → forward handler (send to upstream gateway)
//!     → Send response to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{PathRewrite, PathRewriteLayer};
pub use server::{HttpServer, ServerError};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";
