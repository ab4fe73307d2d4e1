//! High-level text location API.
//!
//! This module provides the caller-facing surface for the three operations:
//! - Outline (bookmark tree) extraction
//! - Page-by-page text search with previews and highlight boxes
//! - Rectangle-to-text selection with one highlight box per line
//!
//! Each is available against an open document handle or a file path.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_locate::api::TextLocator;
//! use pdf_locate::engine::memory::{MemoryDocument, MemoryEngine, MemoryPage};
//! use pdf_locate::engine::Capability;
//! use pdf_locate::geometry::{EngineRect, NormalizedRect};
//!
//! let page = MemoryPage::new(612.0, 792.0)
//!     .with_line("Quarterly report", EngineRect::new(72.0, 232.0, 720.0, 706.0));
//! let mut engine = MemoryEngine::new();
//! engine.add_file("report.pdf", MemoryDocument::new(vec![page]));
//!
//! let capability = Capability::Available(engine);
//! let locator = TextLocator::new(&capability);
//!
//! let hits = locator.search_file("report.pdf", "report");
//! assert_eq!(hits[0].page_index, 0);
//!
//! let selection = locator
//!     .select_text_file("report.pdf", 0, &NormalizedRect::new(0.0, 0.0, 1.0, 0.5))
//!     .unwrap();
//! assert_eq!(selection.text, "Quarterly report");
//! ```

mod locator;

pub use locator::TextLocator;
