//! Return-path validation for login redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! `returnTo` arrives from a URL query parameter and is attacker-controlled.
//! Every login URL and every post-login navigation target built from it goes
//! through [`sanitize_return_to`], which only ever yields same-origin paths.
//!
//! TRADE-OFFS
//! ==========
//! Validation is purely syntactic. A candidate is accepted byte-for-byte or
//! replaced by the fallback; it is never repaired, so a suspicious value can't
//! be massaged into something that only looks safe.

#[cfg(test)]
#[path = "return_path_test.rs"]
mod return_path_test;

use std::fmt;

/// Error returned when a string is not a safe same-origin return path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsafe return path: {0:?}")]
pub struct UnsafeReturnPath(pub String);

/// A same-origin path (plus optional query) that is safe to navigate to.
///
/// Always starts with exactly one `/` followed by at least one more character,
/// and never carries a scheme or network location. The only way to obtain one
/// is through validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReturnPath(String);

impl ReturnPath {
    /// Validate `candidate` as a return path.
    ///
    /// # Errors
    ///
    /// Returns [`UnsafeReturnPath`] when the candidate could navigate off-origin.
    pub fn parse(candidate: &str) -> Result<Self, UnsafeReturnPath> {
        if is_safe_return_path(candidate) {
            Ok(Self(candidate.to_owned()))
        } else {
            Err(UnsafeReturnPath(candidate.to_owned()))
        }
    }

    /// Construct from a compile-time constant known to be safe.
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(is_safe_return_path(path), "static return path must be safe: {path}");
        Self(path.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path portion without query string or fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.split(['?', '#']).next().unwrap_or_default()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ReturnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReturnPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReturnPath {
    type Error = UnsafeReturnPath;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_safe_return_path(&value) { Ok(Self(value)) } else { Err(UnsafeReturnPath(value)) }
    }
}

impl From<ReturnPath> for String {
    fn from(value: ReturnPath) -> Self {
        value.0
    }
}

/// Sanitize a client-supplied return path, falling back to `fallback`.
///
/// The candidate passes through unchanged (query string included) when it is
/// non-empty, carries no scheme marker before its first `/`, starts with exactly
/// one `/` that is not the whole candidate, and contains nothing a browser
/// would normalize into a network path.
/// Anything else, including an absent candidate, yields a clone of `fallback`.
#[must_use]
pub fn sanitize_return_to(candidate: Option<&str>, fallback: &ReturnPath) -> ReturnPath {
    match candidate {
        Some(value) if is_safe_return_path(value) => ReturnPath(value.to_owned()),
        _ => fallback.clone(),
    }
}

/// Collapse a possibly repeated query parameter to a single value.
///
/// Exactly one occurrence yields that value. No occurrence yields `None`, and so
/// does a repeated parameter: `?returnTo=/a&returnTo=//evil` is itself a sign of
/// tampering, so neither value is picked.
#[must_use]
pub fn as_single_param_value<S: AsRef<str>>(values: &[S]) -> Option<&str> {
    match values {
        [single] => Some(single.as_ref()),
        _ => None,
    }
}

/// Whether `candidate` is a same-origin path that cannot leave the origin.
#[must_use]
pub fn is_safe_return_path(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let head = candidate.split_once('/').map_or(candidate, |(head, _)| head);
    if head.contains(':') {
        return false;
    }

    let Some(rest) = candidate.strip_prefix('/') else {
        return false;
    };
    if rest.is_empty() || rest.starts_with('/') {
        return false;
    }

    // Browsers read `\` as `/` and strip tab/CR/LF, so `/\host` and `/\t/host`
    // both resolve to a network path.
    !candidate.chars().any(|c| c == '\\' || c.is_control())
}
