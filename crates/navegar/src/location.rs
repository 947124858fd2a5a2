//! URL Matching
//!
//! Patterns awaited navigations are matched against. Matching is plain
//! string work on purpose: awaited targets are either absolute URLs or
//! path literals, and keeping the comparison transparent makes timeout
//! messages trivially explainable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern a browser location can be matched against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Full URL, compared verbatim
    Exact(String),
    /// URL prefix
    Prefix(String),
    /// Substring anywhere in the URL
    Contains(String),
    /// Path component match; scheme, host, query and fragment are ignored
    Path(String),
    /// Matches every URL
    Any,
}

impl UrlPattern {
    /// Pattern for an awaited navigation target
    ///
    /// Absolute targets (`http://`/`https://`) must match the full URL;
    /// anything else is treated as a path.
    ///
    /// ```rust
    /// use navegar::UrlPattern;
    ///
    /// let pattern = UrlPattern::for_target("/welcome");
    /// assert!(pattern.matches("https://app.example.test/welcome?session=9"));
    /// assert!(!pattern.matches("https://app.example.test/register"));
    /// ```
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        if target.starts_with("http://") || target.starts_with("https://") {
            Self::Exact(target.to_string())
        } else {
            Self::Path(target.to_string())
        }
    }

    /// Check whether `url` matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(expected) => url == expected,
            Self::Prefix(prefix) => url.starts_with(prefix.as_str()),
            Self::Contains(fragment) => url.contains(fragment.as_str()),
            Self::Path(path) => path_of(url) == path,
            Self::Any => true,
        }
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(url) | Self::Path(url) => write!(f, "{url}"),
            Self::Prefix(prefix) => write!(f, "{prefix}*"),
            Self::Contains(fragment) => write!(f, "*{fragment}*"),
            Self::Any => write!(f, "*"),
        }
    }
}

/// Path component of `url`
///
/// The scheme and authority are stripped, query and fragment cut off; a
/// URL without a path yields `/`.
#[must_use]
pub fn path_of(url: &str) -> &str {
    let after_authority = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "/",
            }
        }
        None => url,
    };
    let end = after_authority
        .find(['?', '#'])
        .unwrap_or(after_authority.len());
    let path = &after_authority[..end];
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
