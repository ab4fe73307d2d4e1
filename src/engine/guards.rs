//! Scope guards for engine handles.
//!
//! Every handle acquired from a [`TextEngine`] lives inside a guard that
//! closes it on drop, so early returns (invalid input, the hit cap, a failed
//! lookup) can never leak one. Guards borrow their parent guard:
//!
//! ```text
//! DocumentGuard ─▶ PageGuard ─▶ TextPageGuard ─▶ SearchGuard
//! ```
//!
//! which forces the release order find → text page → page → document.

use super::{MatchSpan, SearchFlags, TextEngine};
use crate::error::{Error, Result};
use crate::geometry::{CharacterBox, PageMetrics};
use std::marker::PhantomData;
use std::path::Path;

/// An open document, closed on drop.
pub struct DocumentGuard<'e, E: TextEngine> {
    engine: &'e E,
    document: E::Document,
}

impl<'e, E: TextEngine> DocumentGuard<'e, E> {
    /// Open a document from a file path.
    pub fn open(engine: &'e E, path: &Path) -> Result<Self> {
        match engine.open_document(path) {
            Some(document) => Ok(Self { engine, document }),
            None => Err(Error::DocumentOpen(path.to_path_buf())),
        }
    }

    /// The underlying document handle.
    pub fn document(&self) -> &E::Document {
        &self.document
    }

    /// Page count reported by the engine.
    pub fn page_count(&self) -> i32 {
        self.engine.page_count(&self.document)
    }
}

impl<E: TextEngine> Drop for DocumentGuard<'_, E> {
    fn drop(&mut self) {
        self.engine.close_document(&self.document);
    }
}

/// A loaded page, closed on drop.
pub struct PageGuard<'a, E: TextEngine> {
    engine: &'a E,
    page: E::Page,
    index: i32,
    _document: PhantomData<&'a E::Document>,
}

impl<'a, E: TextEngine> PageGuard<'a, E> {
    /// Load page `index` of `document`.
    pub fn load(engine: &'a E, document: &'a E::Document, index: i32) -> Result<Self> {
        match engine.load_page(document, index) {
            Some(page) => Ok(Self {
                engine,
                page,
                index,
                _document: PhantomData,
            }),
            None => Err(Error::PageLoad(index)),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Page size in engine units.
    pub fn metrics(&self) -> PageMetrics {
        self.engine.page_metrics(&self.page)
    }

    /// Page size, rejecting non-positive dimensions.
    pub fn valid_metrics(&self) -> Result<PageMetrics> {
        let metrics = self.metrics();
        if metrics.is_valid() {
            Ok(metrics)
        } else {
            Err(Error::InvalidPageMetrics {
                width: metrics.width,
                height: metrics.height,
            })
        }
    }

    /// The underlying page handle.
    pub fn page(&self) -> &E::Page {
        &self.page
    }
}

impl<E: TextEngine> Drop for PageGuard<'_, E> {
    fn drop(&mut self) {
        self.engine.close_page(&self.page);
    }
}

/// The text layer of a loaded page, closed on drop.
pub struct TextPageGuard<'p, E: TextEngine> {
    engine: &'p E,
    text_page: E::TextPage,
    page_index: i32,
}

impl<'p, E: TextEngine> TextPageGuard<'p, E> {
    /// Build the text layer of `page`. The guard cannot outlive the page.
    pub fn load(page: &'p PageGuard<'_, E>) -> Result<Self> {
        let engine: &'p E = page.engine;
        match engine.load_text_page(&page.page) {
            Some(text_page) => Ok(Self {
                engine,
                text_page,
                page_index: page.index,
            }),
            None => Err(Error::TextPageLoad(page.index)),
        }
    }

    /// Index of the page this text layer belongs to.
    pub fn page_index(&self) -> i32 {
        self.page_index
    }

    /// Number of characters on the page.
    pub fn char_count(&self) -> i32 {
        self.engine.char_count(&self.text_page)
    }

    /// Bounding box of one character.
    pub fn char_box(&self, index: i32) -> Option<CharacterBox> {
        self.engine.char_box(&self.text_page, index)
    }

    /// Codepoint of one character.
    pub fn char_at(&self, index: i32) -> Option<char> {
        self.engine.char_at(&self.text_page, index)
    }

    /// Text of a character range.
    pub fn text_range(&self, start: i32, count: i32) -> Option<String> {
        self.engine.text_range(&self.text_page, start, count)
    }

    /// Start a find iteration. The iteration cannot outlive this text layer.
    pub fn find(&self, query: &str, flags: SearchFlags) -> Option<SearchGuard<'_, E>> {
        self.engine
            .find_start(&self.text_page, query, flags)
            .map(|search| SearchGuard {
                engine: self.engine,
                search,
            })
    }

    /// The underlying text page handle.
    pub fn text_page(&self) -> &E::TextPage {
        &self.text_page
    }
}

impl<E: TextEngine> Drop for TextPageGuard<'_, E> {
    fn drop(&mut self) {
        self.engine.close_text_page(&self.text_page);
    }
}

/// An active find iteration, closed on drop.
///
/// Iterating yields the raw [`MatchSpan`]s in the engine's order.
pub struct SearchGuard<'t, E: TextEngine> {
    engine: &'t E,
    search: E::Search,
}

impl<E: TextEngine> Iterator for SearchGuard<'_, E> {
    type Item = MatchSpan;

    fn next(&mut self) -> Option<MatchSpan> {
        self.engine.find_next(&mut self.search)
    }
}

impl<E: TextEngine> Drop for SearchGuard<'_, E> {
    fn drop(&mut self) {
        self.engine.find_close(&self.search);
    }
}
