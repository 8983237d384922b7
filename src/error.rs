//! Error types for source operations.
//!
//! Internal fetch/parse functions return these; the public operations on
//! [`crate::FreeWebNovelSource`] never do. They convert every error into
//! the degraded value the host application expects (empty list, `None`,
//! or a placeholder fragment) and log the cause.

/// Error type for fetch and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// An expected HTML marker or container was absent.
    #[error("element not found: {0}")]
    ElementNotFound(&'static str),

    /// A chapter id without the `novel/slug` separator.
    #[error("invalid chapter id (expected 'novel-id/chapter-slug'): {0}")]
    InvalidChapterId(String),

    /// An extraction stage produced less text than the minimum threshold.
    #[error("extracted content too short ({0} chars)")]
    ContentTooShort(usize),

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
