//! Path classification and prefix rewrite.
//!
//! # Responsibilities
//! - Detect paths that already carry `/v1/` or `/v1beta/`
//! - Match unversioned paths against the Gemini table, then the OpenAI table
//! - Prepend exactly one marker on match
//!
//! # Design Decisions
//! - Pure functions over `&str`, independent of any HTTP framework
//! - Borrow on pass-through, allocate once on rewrite

use std::borrow::Cow;

use crate::rewrite::tables::{GEMINI_MARKER, GEMINI_PREFIXES, OPENAI_MARKER, OPENAI_PREFIXES};

/// Provider wire-format family a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    /// Gemini-native endpoints, served under `/v1beta`.
    Gemini,
    /// OpenAI-compatible endpoints, served under `/v1`.
    OpenAi,
}

impl ApiFamily {
    /// Families in the order their tables are consulted.
    pub const PRECEDENCE: [ApiFamily; 2] = [ApiFamily::Gemini, ApiFamily::OpenAi];

    /// Version marker prepended to paths of this family.
    pub const fn marker(self) -> &'static str {
        match self {
            ApiFamily::Gemini => GEMINI_MARKER,
            ApiFamily::OpenAi => OPENAI_MARKER,
        }
    }

    /// Ordered prefix table for this family.
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            ApiFamily::Gemini => GEMINI_PREFIXES,
            ApiFamily::OpenAi => OPENAI_PREFIXES,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ApiFamily::Gemini => "gemini",
            ApiFamily::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of inspecting a single request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Path starts with `/v1/` or `/v1beta/`.
    AlreadyVersioned,
    /// Path lacks a marker and matched `prefix` in the table of `family`.
    Unversioned {
        family: ApiFamily,
        prefix: &'static str,
    },
    /// No marker and no table entry matched.
    Unrecognized,
}

impl Classification {
    /// Family whose marker should be prepended, if any.
    pub fn rewrite_family(&self) -> Option<ApiFamily> {
        match self {
            Classification::Unversioned { family, .. } => Some(*family),
            _ => None,
        }
    }

    /// Apply this classification to `path`: prepend the marker of the
    /// matched family, or return `path` unchanged.
    ///
    /// This is the only place a marker is prepended.
    pub fn apply<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match self.rewrite_family() {
            Some(family) => {
                let marker = family.marker();
                let mut rewritten = String::with_capacity(marker.len() + path.len());
                rewritten.push_str(marker);
                rewritten.push_str(path);
                Cow::Owned(rewritten)
            }
            None => Cow::Borrowed(path),
        }
    }

    /// Stable label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::AlreadyVersioned => "versioned",
            Classification::Unversioned { family, .. } => family.as_str(),
            Classification::Unrecognized => "passthrough",
        }
    }
}

/// Returns true if `path` starts with a recognized marker followed by `/`.
///
/// A bare `/v1` or `/v1beta` is not versioned.
pub fn is_versioned(path: &str) -> bool {
    [OPENAI_MARKER, GEMINI_MARKER].iter().any(|marker| {
        path.strip_prefix(marker)
            .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Classify `path` against the markers and prefix tables.
pub fn classify(path: &str) -> Classification {
    if is_versioned(path) {
        return Classification::AlreadyVersioned;
    }

    for family in ApiFamily::PRECEDENCE {
        if let Some(prefix) = family.prefixes().iter().copied().find(|p| path.starts_with(p)) {
            return Classification::Unversioned { family, prefix };
        }
    }

    Classification::Unrecognized
}

/// Return `path` with the version marker it is missing, or `path` unchanged.
///
/// Never fails. Applying it twice yields the same result as applying it once.
pub fn classify_and_rewrite(path: &str) -> Cow<'_, str> {
    classify(path).apply(path)
}
