//! An in-memory [`TextEngine`].
//!
//! `MemoryEngine` holds fully materialized documents: pages with a size and a
//! list of characters, each with an optional box (a missing box behaves like
//! a failed engine lookup). It is used to exercise the search and selection
//! core without a native library, and it counts live handles so callers can
//! verify that every acquired handle was released.
//!
//! ```
//! use pdf_locate::engine::memory::{MemoryDocument, MemoryEngine, MemoryPage};
//! use pdf_locate::geometry::EngineRect;
//! use pdf_locate::search::{search_document, SearchOptions};
//!
//! let mut engine = MemoryEngine::new();
//! let page = MemoryPage::new(612.0, 792.0)
//!     .with_line("Hello world", EngineRect::new(72.0, 182.0, 720.0, 708.0));
//! let doc = engine.add_document(MemoryDocument::new(vec![page]));
//!
//! let hits = search_document(&engine, &doc, 1, "world", &SearchOptions::default());
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].preview, "Hello world");
//! assert!(engine.live_handles().is_zero());
//! ```

use super::{MatchSpan, SearchFlags, TextEngine};
use crate::geometry::{CharacterBox, EngineRect, PageMetrics};
use crate::outline::OutlineNode;
use regex::{Regex, RegexBuilder};
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One character on a [`MemoryPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryChar {
    /// The character itself
    pub ch: char,
    /// Its box in engine space; `None` makes box lookups fail
    pub bbox: Option<EngineRect>,
}

/// A page held in memory.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    /// Page width in engine units
    pub width: f64,
    /// Page height in engine units
    pub height: f64,
    /// Characters in document order
    pub chars: Vec<MemoryChar>,
    /// When false, loading the page fails
    pub loadable: bool,
    /// When false, building the text layer fails
    pub has_text_layer: bool,
    /// Raw match reports returned instead of real matching
    pub forced_matches: Option<Vec<MatchSpan>>,
}

impl MemoryPage {
    /// Create an empty page of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            chars: Vec::new(),
            loadable: true,
            has_text_layer: true,
            forced_matches: None,
        }
    }

    /// A page the engine refuses to load.
    pub fn unloadable() -> Self {
        Self {
            loadable: false,
            ..Self::new(612.0, 792.0)
        }
    }

    /// Append one character with a box.
    pub fn with_char(mut self, ch: char, bbox: EngineRect) -> Self {
        self.chars.push(MemoryChar {
            ch,
            bbox: Some(bbox),
        });
        self
    }

    /// Append one character whose box lookup fails.
    pub fn with_boxless_char(mut self, ch: char) -> Self {
        self.chars.push(MemoryChar { ch, bbox: None });
        self
    }

    /// Append a run of text laid out left to right inside `line`.
    ///
    /// Every character gets an equal share of the line's width and the line's
    /// full height.
    pub fn with_line(mut self, text: &str, line: EngineRect) -> Self {
        let count = text.chars().count();
        if count == 0 {
            return self;
        }
        let advance = line.width() / count as f64;
        for (i, ch) in text.chars().enumerate() {
            let left = line.left + advance * i as f64;
            self.chars.push(MemoryChar {
                ch,
                bbox: Some(EngineRect::new(left, left + advance, line.top, line.bottom)),
            });
        }
        self
    }

    /// Make the text layer fail to load.
    pub fn without_text_layer(mut self) -> Self {
        self.has_text_layer = false;
        self
    }

    /// Report these raw matches for any query.
    pub fn with_forced_matches(mut self, matches: Vec<MatchSpan>) -> Self {
        self.forced_matches = Some(matches);
        self
    }

    /// The page text in document order.
    pub fn text(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }
}

/// One node of a bookmark arena.
///
/// Links are indices into [`MemoryDocument::bookmarks`], so arbitrary graphs,
/// cycles included, can be expressed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryBookmark {
    /// Bookmark title
    pub title: String,
    /// Destination page, if any
    pub page_index: Option<i32>,
    /// Index of the first child
    pub first_child: Option<usize>,
    /// Index of the next sibling
    pub next_sibling: Option<usize>,
}

/// A document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    /// Pages in order
    pub pages: Vec<MemoryPage>,
    /// Bookmark arena
    pub bookmarks: Vec<MemoryBookmark>,
    /// Index of the first top-level bookmark
    pub first_bookmark: Option<usize>,
}

impl MemoryDocument {
    /// Create a document from its pages.
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Replace the bookmark arena with a flattened copy of `outline`.
    ///
    /// A negative `page_index` is stored as "no destination".
    pub fn with_outline(mut self, outline: &[OutlineNode]) -> Self {
        self.bookmarks.clear();
        self.first_bookmark = push_level(&mut self.bookmarks, outline);
        self
    }
}

fn push_level(arena: &mut Vec<MemoryBookmark>, nodes: &[OutlineNode]) -> Option<usize> {
    let mut first = None;
    let mut previous: Option<usize> = None;

    for node in nodes {
        let index = arena.len();
        arena.push(MemoryBookmark {
            title: node.title.clone(),
            page_index: (node.page_index >= 0).then_some(node.page_index),
            first_child: None,
            next_sibling: None,
        });
        arena[index].first_child = push_level(arena, &node.children);

        match previous {
            Some(prev) => arena[prev].next_sibling = Some(index),
            None => first = Some(index),
        }
        previous = Some(index);
    }

    first
}

/// Handle to a document inside a [`MemoryEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(usize);

/// Handle to a loaded page (or its text layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    document: usize,
    page: usize,
}

/// Handle to a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookmarkId {
    document: usize,
    index: usize,
}

/// An active find iteration over precomputed matches.
#[derive(Debug, Clone)]
pub struct MemorySearch {
    matches: Vec<MatchSpan>,
    cursor: usize,
}

/// Number of handles currently open on a [`MemoryEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveHandles {
    /// Documents opened by path
    pub documents: usize,
    /// Loaded pages
    pub pages: usize,
    /// Loaded text layers
    pub text_pages: usize,
    /// Active find iterations
    pub searches: usize,
}

impl LiveHandles {
    /// True when nothing is open.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory text engine.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    documents: Vec<MemoryDocument>,
    paths: HashMap<PathBuf, usize>,
    live: Cell<LiveHandles>,
}

impl MemoryEngine {
    /// Create an engine with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return an already-open handle to it.
    ///
    /// The handle is owned by the caller and is not counted as live.
    pub fn add_document(&mut self, document: MemoryDocument) -> DocumentId {
        self.documents.push(document);
        DocumentId(self.documents.len() - 1)
    }

    /// Add a document reachable through [`TextEngine::open_document`].
    pub fn add_file(&mut self, path: impl Into<PathBuf>, document: MemoryDocument) -> DocumentId {
        let id = self.add_document(document);
        self.paths.insert(path.into(), id.0);
        id
    }

    /// Handles currently open.
    pub fn live_handles(&self) -> LiveHandles {
        self.live.get()
    }

    fn update(&self, f: impl FnOnce(&mut LiveHandles)) {
        let mut live = self.live.get();
        f(&mut live);
        self.live.set(live);
    }

    fn page(&self, id: &PageId) -> Option<&MemoryPage> {
        self.documents.get(id.document)?.pages.get(id.page)
    }

    fn bookmark(&self, id: &BookmarkId) -> Option<&MemoryBookmark> {
        self.documents.get(id.document)?.bookmarks.get(id.index)
    }

    fn find_matches(page: &MemoryPage, query: &str, flags: SearchFlags) -> Option<Vec<MatchSpan>> {
        if let Some(forced) = &page.forced_matches {
            return Some(forced.clone());
        }

        let regex = match build_regex(query, flags) {
            Ok(regex) => regex,
            Err(e) => {
                log::debug!("Rejected find pattern {:?}: {}", query, e);
                return None;
            },
        };

        let text = page.text();
        let matches = regex
            .find_iter(&text)
            .map(|m| MatchSpan {
                start: text[..m.start()].chars().count() as i32,
                count: m.as_str().chars().count() as i32,
            })
            .collect();
        Some(matches)
    }
}

/// Build the literal matcher used by [`MemoryEngine`] find iterations.
fn build_regex(query: &str, flags: SearchFlags) -> Result<Regex, regex::Error> {
    let mut pattern = regex::escape(query);
    if flags.whole_word {
        pattern = format!(r"\b{}\b", pattern);
    }

    RegexBuilder::new(&pattern)
        .case_insensitive(!flags.match_case)
        .build()
}

fn index(value: i32) -> Option<usize> {
    usize::try_from(value).ok()
}

impl TextEngine for MemoryEngine {
    type Document = DocumentId;
    type Page = PageId;
    type TextPage = PageId;
    type Search = MemorySearch;
    type Bookmark = BookmarkId;

    fn open_document(&self, path: &Path) -> Option<DocumentId> {
        let id = *self.paths.get(path)?;
        self.update(|live| live.documents += 1);
        Some(DocumentId(id))
    }

    fn close_document(&self, _document: &DocumentId) {
        self.update(|live| live.documents = live.documents.saturating_sub(1));
    }

    fn page_count(&self, document: &DocumentId) -> i32 {
        self.documents
            .get(document.0)
            .map_or(0, |doc| doc.pages.len() as i32)
    }

    fn load_page(&self, document: &DocumentId, index_: i32) -> Option<PageId> {
        let page = index(index_)?;
        let doc = self.documents.get(document.0)?;
        if !doc.pages.get(page)?.loadable {
            return None;
        }
        self.update(|live| live.pages += 1);
        Some(PageId {
            document: document.0,
            page,
        })
    }

    fn close_page(&self, _page: &PageId) {
        self.update(|live| live.pages = live.pages.saturating_sub(1));
    }

    fn page_metrics(&self, page: &PageId) -> PageMetrics {
        self.page(page)
            .map_or(PageMetrics::new(0.0, 0.0), |p| PageMetrics::new(p.width, p.height))
    }

    fn load_text_page(&self, page: &PageId) -> Option<PageId> {
        if !self.page(page)?.has_text_layer {
            return None;
        }
        self.update(|live| live.text_pages += 1);
        Some(*page)
    }

    fn close_text_page(&self, _text_page: &PageId) {
        self.update(|live| live.text_pages = live.text_pages.saturating_sub(1));
    }

    fn char_count(&self, text_page: &PageId) -> i32 {
        self.page(text_page).map_or(0, |p| p.chars.len() as i32)
    }

    fn char_box(&self, text_page: &PageId, char_index: i32) -> Option<CharacterBox> {
        let c = self.page(text_page)?.chars.get(index(char_index)?)?;
        c.bbox
            .map(|r| CharacterBox::new(char_index, r.left, r.right, r.top, r.bottom))
    }

    fn char_at(&self, text_page: &PageId, char_index: i32) -> Option<char> {
        self.page(text_page)?
            .chars
            .get(index(char_index)?)
            .map(|c| c.ch)
    }

    fn text_range(&self, text_page: &PageId, start: i32, count: i32) -> Option<String> {
        let chars = &self.page(text_page)?.chars;
        let start = index(start)?;
        let count = index(count)?;
        if start > chars.len() {
            return None;
        }
        let end = start.saturating_add(count).min(chars.len());
        Some(chars[start..end].iter().map(|c| c.ch).collect())
    }

    fn find_start(&self, text_page: &PageId, query: &str, flags: SearchFlags) -> Option<MemorySearch> {
        if query.is_empty() {
            return None;
        }
        let matches = Self::find_matches(self.page(text_page)?, query, flags)?;
        self.update(|live| live.searches += 1);
        Some(MemorySearch { matches, cursor: 0 })
    }

    fn find_next(&self, search: &mut MemorySearch) -> Option<MatchSpan> {
        let next = search.matches.get(search.cursor).copied();
        if next.is_some() {
            search.cursor += 1;
        }
        next
    }

    fn find_close(&self, _search: &MemorySearch) {
        self.update(|live| live.searches = live.searches.saturating_sub(1));
    }

    fn first_child(&self, document: &DocumentId, parent: Option<&BookmarkId>) -> Option<BookmarkId> {
        let first = match parent {
            Some(parent) => self.bookmark(parent)?.first_child,
            None => self.documents.get(document.0)?.first_bookmark,
        };
        first.map(|index| BookmarkId {
            document: document.0,
            index,
        })
    }

    fn next_sibling(&self, document: &DocumentId, bookmark: &BookmarkId) -> Option<BookmarkId> {
        self.bookmark(bookmark)?.next_sibling.map(|index| BookmarkId {
            document: document.0,
            index,
        })
    }

    fn bookmark_title(&self, bookmark: &BookmarkId) -> String {
        self.bookmark(bookmark)
            .map(|b| b.title.clone())
            .unwrap_or_default()
    }

    fn bookmark_page_index(&self, _document: &DocumentId, bookmark: &BookmarkId) -> Option<i32> {
        self.bookmark(bookmark)?.page_index
    }
}
