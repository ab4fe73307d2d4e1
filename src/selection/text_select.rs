//! Resolve a rectangular gesture into selected text and highlight boxes.

use crate::engine::guards::{PageGuard, TextPageGuard};
use crate::engine::TextEngine;
use crate::error::{Error, Result};
use crate::geometry::{EngineRect, NormalizedRect};
use crate::layout::LineClusterer;
use serde::{Deserialize, Serialize};

/// Text under a selection gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSelection {
    /// Selected characters in document order
    pub text: String,
    /// One highlight rectangle per visual line, in UI space
    pub rects: Vec<NormalizedRect>,
}

impl TextSelection {
    /// True when nothing lies under the gesture.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.rects.is_empty()
    }
}

/// Select the text of page `page_index` covered by `rect`.
///
/// `rect` is in UI space. Characters intersecting it (touching edges count)
/// are grouped into visual lines using `tolerance` engine units.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for a negative page index or a rectangle
///   without area
/// - [`Error::PageLoad`] / [`Error::TextPageLoad`] when the engine refuses
///   the page
/// - [`Error::InvalidPageMetrics`] for a page with a non-positive size
/// - [`Error::EmptyTextPage`] when the page has no characters
///
/// A rectangle over a blank region is not an error: it yields an empty
/// [`TextSelection`].
pub fn select_text<E: TextEngine>(
    engine: &E,
    document: &E::Document,
    page_index: i32,
    rect: &NormalizedRect,
    tolerance: f64,
) -> Result<TextSelection> {
    if page_index < 0 {
        return Err(Error::InvalidInput(format!("negative page index {}", page_index)));
    }
    if !rect.has_area() {
        return Err(Error::InvalidInput(format!(
            "selection rectangle has no area ({} x {})",
            rect.w, rect.h
        )));
    }

    let page = PageGuard::load(engine, document, page_index)?;
    let metrics = page.valid_metrics()?;
    let text = TextPageGuard::load(&page)?;

    let char_count = text.char_count();
    if char_count <= 0 {
        return Err(Error::EmptyTextPage(page_index));
    }

    let query = EngineRect::from_normalized(rect, &metrics);
    let mut clusterer = LineClusterer::new(query, tolerance);
    let mut skipped = 0usize;

    for index in 0..char_count {
        let char_box = text.char_box(index);
        if char_box.is_none() {
            skipped += 1;
            continue;
        }
        clusterer.push(char_box, text.char_at(index));
    }

    if skipped > 0 {
        log::debug!(
            "Page {}: {} of {} character boxes unavailable",
            page_index,
            skipped,
            char_count
        );
    }

    let clustered = clusterer.finish();
    Ok(TextSelection {
        rects: clustered.rects(&metrics),
        text: clustered.text,
    })
}
