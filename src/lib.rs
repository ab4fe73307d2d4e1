//! # PDF Locate
//!
//! Text search and selection geometry for page-based document viewers.
//!
//! ## Core Features
//!
//! - **Search**: page-by-page search driven by the text engine's find
//!   iterator, capped at 200 hits, with preview excerpts and a highlight box
//!   per match
//! - **Selection**: turn an on-screen rectangle into the selected text in
//!   reading order plus one highlight box per visual line
//! - **Outline**: the document's bookmark tree, bounded against cyclic graphs
//! - **Geometry**: conversion between engine space (bottom-left origin, page
//!   units) and UI space (top-left origin, normalized to `[0, 1]`)
//!
//! ## Architecture
//!
//! The core never calls a PDF library directly. It drives a
//! [`TextEngine`](engine::TextEngine), wrapping every handle in a scope guard.
//! Two engines ship with the crate: [`MemoryEngine`](engine::MemoryEngine)
//! and, behind the `pdfium` feature, a PDFium binding whose availability is
//! resolved once per process and latched.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_locate::api::TextLocator;
//! use pdf_locate::engine::pdfium::{self, PdfiumConfig};
//! use pdf_locate::geometry::NormalizedRect;
//!
//! let capability = pdfium::bind(&PdfiumConfig::from_env());
//! let locator = TextLocator::new(&capability);
//!
//! for hit in locator.search_file("paper.pdf", "entropy") {
//!     println!("page {}: {}", hit.page_index, hit.preview);
//! }
//!
//! let selection = locator.select_text_file("paper.pdf", 0, &NormalizedRect::new(0.1, 0.1, 0.8, 0.2));
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Coordinate spaces and box aggregation
pub mod geometry;

// Line grouping for selection highlights
pub mod layout;

// Text engine seam, handle guards, engines
pub mod engine;

// Text search
pub mod search;

// Rectangle selection
pub mod selection;

// Document outline
pub mod outline;

// High-level API
pub mod api;

// Re-exports
pub use api::TextLocator;
pub use config::LocatorConfig;
pub use engine::{Capability, TextEngine};
pub use error::{Error, Result};
pub use geometry::{CharacterBox, EngineRect, NormalizedRect, PageMetrics};
pub use outline::OutlineNode;
pub use search::{SearchHit, SearchOptions};
pub use selection::TextSelection;

// Version info
/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
