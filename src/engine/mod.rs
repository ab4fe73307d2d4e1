//! The seam between the search/selection core and a native text engine.
//!
//! The core never talks to a PDF library directly. It drives a [`TextEngine`],
//! a handle-level interface shaped after what native engines such as PDFium
//! expose: documents, pages, text pages, find iterators and bookmarks, each an
//! opaque handle that must be closed again.
//!
//! - [`guards`] wraps every handle in a scope guard that closes it on drop.
//! - [`capability`] models "the engine is usable or it is not", resolved once.
//! - [`memory`] is a complete in-memory engine for tests and embedding.
//! - `pdfium` (feature `pdfium`) binds the PDFium shared library.

pub mod capability;
pub mod guards;
pub mod memory;

#[cfg(feature = "pdfium")]
#[cfg_attr(docsrs, doc(cfg(feature = "pdfium")))]
pub mod pdfium;

pub use capability::{Capability, CapabilityLatch};
pub use guards::{DocumentGuard, PageGuard, SearchGuard, TextPageGuard};
pub use memory::MemoryEngine;

use crate::geometry::{CharacterBox, PageMetrics};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Matching flags handed to the engine's find iterator.
///
/// Their semantics belong to the engine; the core only forwards them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFlags {
    /// Case-sensitive matching
    pub match_case: bool,
    /// Match whole words only
    pub whole_word: bool,
}

impl SearchFlags {
    /// Bit flags in the layout PDFium's `FPDFText_FindStart` expects.
    pub fn to_bits(self) -> u32 {
        let mut flags = 0u32;
        if self.match_case {
            flags |= 0x0001;
        }
        if self.whole_word {
            flags |= 0x0002;
        }
        flags
    }
}

/// One match as reported by the engine: raw and unsanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Index of the first matched character
    pub start: i32,
    /// Number of matched characters
    pub count: i32,
}

/// Handle-level text engine operations.
///
/// Handles are associated types. Every `close_*` method receives the handle by
/// reference and must tolerate being the last call made with it; the guards
/// in [`guards`] guarantee it is called exactly once per acquired handle.
///
/// All methods take `&self`. Implementations are not required to be
/// thread-safe and handles must not be shared across threads.
pub trait TextEngine {
    /// Open document handle
    type Document;
    /// Loaded page handle
    type Page;
    /// Text layer of a loaded page
    type TextPage;
    /// Active find iteration
    type Search;
    /// Bookmark (outline entry) handle
    type Bookmark;

    /// Open a document from a file path.
    fn open_document(&self, path: &Path) -> Option<Self::Document>;

    /// Close a document opened with [`TextEngine::open_document`].
    fn close_document(&self, document: &Self::Document);

    /// Number of pages in the document as reported by the engine.
    fn page_count(&self, document: &Self::Document) -> i32;

    /// Load one page.
    fn load_page(&self, document: &Self::Document, index: i32) -> Option<Self::Page>;

    /// Release a loaded page.
    fn close_page(&self, page: &Self::Page);

    /// Page size in engine units.
    fn page_metrics(&self, page: &Self::Page) -> PageMetrics;

    /// Build the text layer of a loaded page.
    fn load_text_page(&self, page: &Self::Page) -> Option<Self::TextPage>;

    /// Release a text layer.
    fn close_text_page(&self, text_page: &Self::TextPage);

    /// Number of characters on the text layer.
    fn char_count(&self, text_page: &Self::TextPage) -> i32;

    /// Bounding box of one character, `None` when the lookup fails.
    fn char_box(&self, text_page: &Self::TextPage, index: i32) -> Option<CharacterBox>;

    /// Codepoint of one character, `None` when the lookup fails.
    fn char_at(&self, text_page: &Self::TextPage, index: i32) -> Option<char>;

    /// Text of `count` characters starting at `start`.
    fn text_range(&self, text_page: &Self::TextPage, start: i32, count: i32) -> Option<String>;

    /// Begin a find iteration over `query`.
    fn find_start(
        &self,
        text_page: &Self::TextPage,
        query: &str,
        flags: SearchFlags,
    ) -> Option<Self::Search>;

    /// Advance to the next match, `None` when the iteration is exhausted.
    fn find_next(&self, search: &mut Self::Search) -> Option<MatchSpan>;

    /// Close a find iteration.
    fn find_close(&self, search: &Self::Search);

    /// First child of `parent`, or the first top-level bookmark for `None`.
    fn first_child(
        &self,
        document: &Self::Document,
        parent: Option<&Self::Bookmark>,
    ) -> Option<Self::Bookmark>;

    /// Next sibling of a bookmark.
    fn next_sibling(
        &self,
        document: &Self::Document,
        bookmark: &Self::Bookmark,
    ) -> Option<Self::Bookmark>;

    /// Title of a bookmark; empty when it has none.
    fn bookmark_title(&self, bookmark: &Self::Bookmark) -> String;

    /// Zero-based destination page of a bookmark, `None` when absent.
    fn bookmark_page_index(&self, document: &Self::Document, bookmark: &Self::Bookmark)
        -> Option<i32>;
}
