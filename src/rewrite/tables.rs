//! Version markers and prefix tables.
//!
//! Order within each table is significant: entries are scanned top to bottom
//! and the scan stops at the first literal prefix match.

/// Marker for OpenAI-compatible endpoints.
pub const OPENAI_MARKER: &str = "/v1";

/// Marker for Gemini-native endpoints.
pub const GEMINI_MARKER: &str = "/v1beta";

/// Gemini-native model invocation paths, e.g. `/models/gemini-pro:generateContent`.
pub const GEMINI_PREFIXES: &[&str] = &[
    "/models/gemini",
    "/models/embedding",
    "/models/text",
];

/// OpenAI-compatible endpoint paths.
pub const OPENAI_PREFIXES: &[&str] = &[
    "/chat/completions",
    "/completions",
    "/embeddings",
    "/images/generations",
    "/images/edits",
    "/images/variations",
    "/audio/transcriptions",
    "/audio/translations",
    "/audio/speech",
    "/models",
    "/moderations",
    "/edits",
    "/rerank",
    "/messages",
    "/responses",
    "/realtime",
    "/files",
    "/fine-tunes",
    "/engines/",
];
