//! Error types for the text location library.
//!
//! These errors stay inside the crate boundary for the most part: the
//! caller-facing [`TextLocator`](crate::api::TextLocator) collapses them into
//! empty results or `None` after logging them.

use std::path::PathBuf;

/// Result type alias for text location operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while driving the text engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The native text engine could not be resolved
    #[error("Text engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine refused to open a document
    #[error("Failed to open document: {}", .0.display())]
    DocumentOpen(PathBuf),

    /// The engine could not load a page
    #[error("Failed to load page {0}")]
    PageLoad(i32),

    /// The engine could not build the text layer of a page
    #[error("Failed to load text content for page {0}")]
    TextPageLoad(i32),

    /// The text layer of a page holds no characters
    #[error("Page {0} has no text")]
    EmptyTextPage(i32),

    /// Page reported a non-positive size
    #[error("Invalid page metrics: {width} x {height}")]
    InvalidPageMetrics {
        /// Reported page width
        width: f64,
        /// Reported page height
        height: f64,
    },

    /// Request rejected before touching the engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
