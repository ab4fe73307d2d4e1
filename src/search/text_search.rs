//! Page-by-page text search with a global hit cap.
//!
//! Matching itself belongs to the engine's find iterator. This module walks
//! the pages in order, sanitizes each reported match, and turns it into a
//! [`SearchHit`] carrying a preview excerpt and a normalized highlight box.

use crate::engine::guards::{PageGuard, TextPageGuard};
use crate::engine::{MatchSpan, SearchFlags, TextEngine};
use crate::error::Result;
use crate::geometry::{aggregate, NormalizedRect, PageMetrics};
use serde::{Deserialize, Serialize};

/// Default cap on the number of hits returned by one search.
pub const DEFAULT_MAX_HITS: usize = 200;

/// Default number of characters shown before a match in its preview.
pub const DEFAULT_PREVIEW_LEAD: usize = 20;

/// Default number of characters added to the match length in its preview.
pub const DEFAULT_PREVIEW_TAIL: usize = 40;

/// A search match with position information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page (0-indexed) where the match was found
    pub page_index: usize,
    /// Ordinal of the match on its page, restarting at 0 on every page
    pub match_index: usize,
    /// Text excerpt around the match
    pub preview: String,
    /// Highlight box in UI space, `None` when no geometry was available
    pub rect: Option<NormalizedRect>,
}

/// Options for text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Case-sensitive search, forwarded to the engine
    pub match_case: bool,
    /// Match whole words only, forwarded to the engine
    pub whole_word: bool,
    /// Maximum number of hits across all pages (0 = default cap)
    pub max_hits: usize,
    /// Characters of context before the match start
    pub preview_lead: usize,
    /// Characters of context added to the match length
    pub preview_tail: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_case: false,
            whole_word: false,
            max_hits: DEFAULT_MAX_HITS,
            preview_lead: DEFAULT_PREVIEW_LEAD,
            preview_tail: DEFAULT_PREVIEW_TAIL,
        }
    }
}

impl SearchOptions {
    /// Create new default search options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable case-sensitive search.
    pub fn case_sensitive() -> Self {
        Self {
            match_case: true,
            ..Default::default()
        }
    }

    /// Set case sensitivity.
    pub fn with_match_case(mut self, value: bool) -> Self {
        self.match_case = value;
        self
    }

    /// Match whole words only.
    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    /// Limit the number of hits.
    pub fn with_max_hits(mut self, max: usize) -> Self {
        self.max_hits = max;
        self
    }

    /// Set the preview context window.
    pub fn with_preview_window(mut self, lead: usize, tail: usize) -> Self {
        self.preview_lead = lead;
        self.preview_tail = tail;
        self
    }

    /// Flags handed to the engine's find iterator.
    pub fn flags(&self) -> SearchFlags {
        SearchFlags {
            match_case: self.match_case,
            whole_word: self.whole_word,
        }
    }

    /// The hit cap in effect; zero falls back to [`DEFAULT_MAX_HITS`].
    pub fn effective_max_hits(&self) -> usize {
        if self.max_hits == 0 {
            DEFAULT_MAX_HITS
        } else {
            self.max_hits
        }
    }
}

/// Text searcher driving an engine's find iterator.
pub struct TextSearcher;

impl TextSearcher {
    /// Search every page of an open document.
    ///
    /// # Arguments
    ///
    /// * `engine` - The text engine owning `document`
    /// * `document` - An open document handle
    /// * `page_count` - Number of pages to scan, starting at page 0
    /// * `query` - Text to find; matching semantics belong to the engine
    /// * `options` - Search options
    ///
    /// # Returns
    ///
    /// Hits in document order (page ascending, then engine match order),
    /// at most [`SearchOptions::effective_max_hits`] of them. A non-positive
    /// `page_count` or an empty `query` yields an empty vector. Pages that
    /// fail to load are skipped.
    pub fn search<E: TextEngine>(
        engine: &E,
        document: &E::Document,
        page_count: i32,
        query: &str,
        options: &SearchOptions,
    ) -> Vec<SearchHit> {
        if page_count <= 0 || query.is_empty() {
            return Vec::new();
        }

        let max_hits = options.effective_max_hits();
        let mut hits = Vec::new();

        for page_index in 0..page_count {
            let remaining = max_hits - hits.len();
            match Self::search_page(engine, document, page_index, query, options, remaining) {
                Ok(page_hits) => hits.extend(page_hits),
                Err(e) => log::debug!("Skipping page {} during search: {}", page_index, e),
            }

            // Check hit limit
            if hits.len() >= max_hits {
                log::debug!("Search stopped at page {}: {} hits reached", page_index, max_hits);
                break;
            }
        }

        hits
    }

    /// Search one page, collecting at most `limit` hits.
    ///
    /// Page, text layer and find iteration are all released before this
    /// returns, whichever way it returns.
    pub fn search_page<E: TextEngine>(
        engine: &E,
        document: &E::Document,
        page_index: i32,
        query: &str,
        options: &SearchOptions,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let page = PageGuard::load(engine, document, page_index)?;
        let text = TextPageGuard::load(&page)?;

        let mut hits = Vec::new();
        if limit == 0 {
            return Ok(hits);
        }

        let Some(matches) = text.find(query, options.flags()) else {
            return Ok(hits);
        };

        let total_chars = text.char_count();
        let metrics = page.metrics();
        let mut match_index = 0;

        for span in matches {
            let Some((start, count)) = clamp_match(span, total_chars) else {
                log::debug!(
                    "Ignoring out-of-range match {:?} on page {} ({} chars)",
                    span,
                    page_index,
                    total_chars
                );
                continue;
            };

            hits.push(SearchHit {
                page_index: page_index as usize,
                match_index,
                preview: build_preview(&text, start, count, options),
                rect: match_rect(&text, &metrics, start, count),
            });
            match_index += 1;

            if hits.len() >= limit {
                break;
            }
        }

        Ok(hits)
    }
}

/// Sanitize a raw match against the page's character total.
///
/// Starts outside `[0, total)` are rejected. A non-positive count becomes 1,
/// and the range is shortened to stay on the page (never below 1).
pub(crate) fn clamp_match(span: MatchSpan, total_chars: i32) -> Option<(i32, i32)> {
    if span.start < 0 || span.start >= total_chars {
        return None;
    }
    let count = span.count.max(1).min(total_chars - span.start);
    Some((span.start, count))
}

/// Preview window: `lead` characters before the match, `count + tail` long.
fn build_preview<E: TextEngine>(
    text: &TextPageGuard<'_, E>,
    start: i32,
    count: i32,
    options: &SearchOptions,
) -> String {
    let total_chars = text.char_count();
    let (preview_start, preview_count) = preview_window(
        start,
        count,
        total_chars,
        options.preview_lead,
        options.preview_tail,
    );
    if preview_count <= 0 {
        return String::new();
    }
    text.text_range(preview_start, preview_count)
        .unwrap_or_default()
}

/// Compute `(window_start, window_len)` for a match preview.
pub(crate) fn preview_window(
    start: i32,
    count: i32,
    total_chars: i32,
    lead: usize,
    tail: usize,
) -> (i32, i32) {
    if total_chars <= 0 {
        return (0, 0);
    }
    let lead = i32::try_from(lead).unwrap_or(i32::MAX);
    let tail = i32::try_from(tail).unwrap_or(i32::MAX);

    let window_start = start.saturating_sub(lead).max(0);
    let window_len = (total_chars - window_start).min(count.saturating_add(tail));
    (window_start, window_len)
}

/// Highlight box of a character range, normalized to UI space.
fn match_rect<E: TextEngine>(
    text: &TextPageGuard<'_, E>,
    metrics: &PageMetrics,
    start: i32,
    count: i32,
) -> Option<NormalizedRect> {
    let bounds = aggregate((start..start + count).map(|i| text.char_box(i)))?;
    if !metrics.is_valid() {
        return None;
    }
    Some(NormalizedRect::from_engine(&bounds, metrics))
}
