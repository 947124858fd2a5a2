//! Result and Error Types
//!
//! Unified error handling for navegar operations. Driver failures carry
//! exactly what the driver reported; nothing in this crate wraps or
//! retries them. Logging-sink failures never appear here: the logger
//! recovers those internally and keeps a drop count instead.

use thiserror::Error;

/// Result type for navegar operations
pub type NavegarResult<T> = Result<T, NavegarError>;

/// Errors surfaced by driver interaction and configuration
///
/// Every variant carries plain strings so errors stay comparable in
/// tests and cheap to clone into log records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavegarError {
    /// The browser session cannot be queried (closed or crashed)
    #[error("Driver unavailable: {message}")]
    DriverUnavailable {
        /// What the driver reported
        message: String,
    },

    /// Navigation to a URL failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The navigation target
        url: String,
        /// What the driver reported
        message: String,
    },

    /// An awaited location never matched within the timeout
    #[error("Location {target} not reached within {ms}ms")]
    NavigationTimeout {
        /// The awaited target (full URL or path)
        target: String,
        /// The timeout that elapsed, in milliseconds
        ms: u64,
    },

    /// Locate, fill or click failed against the driver
    #[error("Element {action} on {selector} failed: {message}")]
    ElementInteraction {
        /// The action that failed ("locate", "fill", "click")
        action: String,
        /// The selector involved
        selector: String,
        /// What the driver reported
        message: String,
    },

    /// Invalid configuration input
    #[error("Invalid configuration: {message}")]
    Config {
        /// What was wrong with the input
        message: String,
    },
}
