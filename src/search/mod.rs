//! Text search over a paged document.
//!
//! The engine's find iterator does the matching (exact substring, with its
//! own case and whole-word flags). This module drives it page by page,
//! supporting:
//! - A global hit cap (200 by default) with early termination
//! - Preview excerpts around every match
//! - A normalized highlight rectangle per match
//!
//! ## Example
//!
//! ```
//! use pdf_locate::engine::memory::{MemoryDocument, MemoryEngine, MemoryPage};
//! use pdf_locate::geometry::EngineRect;
//! use pdf_locate::search::{SearchOptions, TextSearcher};
//!
//! let mut engine = MemoryEngine::new();
//! let page = MemoryPage::new(612.0, 792.0)
//!     .with_line("the quick brown fox", EngineRect::new(72.0, 262.0, 720.0, 708.0));
//! let doc = engine.add_document(MemoryDocument::new(vec![page]));
//!
//! let hits = TextSearcher::search(&engine, &doc, 1, "brown", &SearchOptions::default());
//! for hit in &hits {
//!     println!("page {} #{}: {:?}", hit.page_index, hit.match_index, hit.preview);
//! }
//! assert_eq!(hits.len(), 1);
//! ```

mod text_search;

pub use text_search::{
    SearchHit, SearchOptions, TextSearcher, DEFAULT_MAX_HITS, DEFAULT_PREVIEW_LEAD,
    DEFAULT_PREVIEW_TAIL,
};

use crate::engine::TextEngine;

/// Search every page of an open document with [`TextSearcher::search`].
pub fn search_document<E: TextEngine>(
    engine: &E,
    document: &E::Document,
    page_count: i32,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchHit> {
    TextSearcher::search(engine, document, page_count, query, options)
}
