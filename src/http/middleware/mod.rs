//! Request middleware applied ahead of routing.
//!
//! # Design Decisions
//! - Layers here wrap the whole `Router` so they run before route matching
//! - Middleware never short-circuits; it only adjusts the request

pub mod path_rewrite;

pub use path_rewrite::{PathRewrite, PathRewriteLayer};
