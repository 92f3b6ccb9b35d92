//! Root namespace helpers
//!
//! A root namespace is one or more C++ identifiers joined with `::`
//! (`acme::demo`). The namespace also decides where the library sources live:
//! every segment becomes one directory level under `src/` (and `include/`).

use std::path::PathBuf;
use thiserror::Error;

/// Separator between namespace segments
pub const SEPARATOR: &str = "::";

/// Reasons a root namespace is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// Nothing was entered
    #[error("A root namespace is required")]
    Empty,

    /// The namespace ends with `::`
    #[error("A namespace must not end with '::'")]
    TrailingSeparator,

    /// A segment is not a valid identifier
    #[error("'{segment}' is not a valid identifier")]
    InvalidSegment {
        /// The offending segment (may be empty for `a::::b`)
        segment: String,
    },
}

/// Map a namespace to the relative directory holding its sources
///
/// `acme::demo::core` becomes `acme/demo/core`. The input is expected to have
/// passed [`validate_namespace`].
#[must_use]
pub fn path_for_namespace(ns: &str) -> PathBuf {
    ns.split(SEPARATOR).collect()
}

/// Check that `ns` is a well-formed root namespace
///
/// # Errors
///
/// Returns a [`NamespaceError`] describing the first problem found.
pub fn validate_namespace(ns: &str) -> Result<(), NamespaceError> {
    if ns.is_empty() {
        return Err(NamespaceError::Empty);
    }
    if ns.ends_with(SEPARATOR) {
        return Err(NamespaceError::TrailingSeparator);
    }

    match ns.split(SEPARATOR).find(|segment| !is_identifier(segment)) {
        Some(segment) => Err(NamespaceError::InvalidSegment {
            segment: segment.to_string(),
        }),
        None => Ok(()),
    }
}

/// Upper-cased namespace flattened into a single preprocessor token
///
/// `acme::demo` becomes `ACME_DEMO`.
#[must_use]
pub fn include_guard_stem(ns: &str) -> String {
    ns.split(SEPARATOR)
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
