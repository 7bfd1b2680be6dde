//! Request path normalization.
//!
//! # Data Flow
//! ```text
//! Incoming path ("/chat/completions")
//!     → classifier.rs (already versioned? which family?)
//!     → tables.rs (ordered prefix scan: Gemini first, then OpenAI)
//!     → Return: unchanged path or "<marker>" + path
//! ```
//!
//! # Design Decisions
//! - Tables are compile-time constants, never mutated
//! - Literal prefix match, not path-segment match
//! - First match wins; Gemini table always consulted before OpenAI
//! - Total function: unrecognized paths pass through untouched

pub mod classifier;
pub mod tables;

pub use classifier::{ApiFamily, Classification, classify, classify_and_rewrite, is_versioned};
