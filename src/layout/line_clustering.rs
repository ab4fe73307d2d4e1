//! Greedy line clustering for text selection.
//!
//! Characters that intersect a query rectangle are grouped into visual lines
//! in a single forward pass. A character joins the first existing line whose
//! top or bottom edge lies within the tolerance of its own; otherwise it opens
//! a new line. Lines are never re-evaluated against characters seen earlier,
//! so the result depends on document order, and the output lines come out in
//! creation order.
//!
//! Clustering only shapes the highlight rectangles. The selected text is
//! collected independently, in document order.

use crate::geometry::{CharacterBox, EngineRect, NormalizedRect, PageMetrics};

/// Vertical tolerance, in engine units, for two characters to share a line.
///
/// Tuned for typical body-text line heights in points.
pub const DEFAULT_LINE_TOLERANCE: f64 = 2.5;

/// The union bounding box of the characters assigned to one visual line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCluster {
    /// Bounds in engine space
    pub bounds: EngineRect,
    /// Number of characters folded in
    pub char_count: usize,
}

impl LineCluster {
    /// Start a line from one character.
    pub fn seeded(char_box: &CharacterBox) -> Self {
        Self {
            bounds: char_box.rect(),
            char_count: 1,
        }
    }

    /// Whether a character belongs on this line.
    ///
    /// Either edge matching within `tolerance` is enough.
    pub fn accepts(&self, char_box: &CharacterBox, tolerance: f64) -> bool {
        (self.bounds.top - char_box.top).abs() <= tolerance
            || (self.bounds.bottom - char_box.bottom).abs() <= tolerance
    }

    /// Fold a character into the line's bounds.
    pub fn absorb(&mut self, char_box: &CharacterBox) {
        self.bounds = self.bounds.union(&char_box.rect());
        self.char_count += 1;
    }

    /// The line's highlight rectangle in UI space.
    pub fn to_normalized(&self, metrics: &PageMetrics) -> NormalizedRect {
        NormalizedRect::from_engine(&self.bounds, metrics)
    }
}

/// Result of a clustering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusteredText {
    /// Lines in creation order
    pub lines: Vec<LineCluster>,
    /// Selected characters in document order
    pub text: String,
}

impl ClusteredText {
    /// Highlight rectangles, one per line, in creation order.
    pub fn rects(&self, metrics: &PageMetrics) -> Vec<NormalizedRect> {
        self.lines.iter().map(|line| line.to_normalized(metrics)).collect()
    }
}

/// Incremental line clusterer.
///
/// Feed characters in document order with [`LineClusterer::push`], then call
/// [`LineClusterer::finish`].
#[derive(Debug, Clone)]
pub struct LineClusterer {
    query: EngineRect,
    tolerance: f64,
    output: ClusteredText,
}

impl LineClusterer {
    /// Create a clusterer for characters intersecting `query`.
    pub fn new(query: EngineRect, tolerance: f64) -> Self {
        Self {
            query,
            tolerance,
            output: ClusteredText::default(),
        }
    }

    /// Offer one character.
    ///
    /// `char_box` is the result of the box lookup; a failed lookup skips the
    /// character entirely. `ch` is the codepoint lookup; when it fails the
    /// character still shapes the highlight but adds no text. Returns whether
    /// the character was selected.
    pub fn push(&mut self, char_box: Option<CharacterBox>, ch: Option<char>) -> bool {
        let Some(char_box) = char_box else {
            return false;
        };
        if !self.query.intersects(&char_box.rect()) {
            return false;
        }

        if let Some(ch) = ch.filter(|c| *c != '\0') {
            self.output.text.push(ch);
        }

        match self
            .output
            .lines
            .iter_mut()
            .find(|line| line.accepts(&char_box, self.tolerance))
        {
            Some(line) => line.absorb(&char_box),
            None => self.output.lines.push(LineCluster::seeded(&char_box)),
        }
        true
    }

    /// Lines found so far.
    pub fn lines(&self) -> &[LineCluster] {
        &self.output.lines
    }

    /// Finish the pass.
    pub fn finish(self) -> ClusteredText {
        self.output
    }
}

/// Cluster a sequence of `(box lookup, codepoint lookup)` pairs in one pass.
///
/// # Examples
///
/// ```
/// use pdf_locate::geometry::{CharacterBox, EngineRect};
/// use pdf_locate::layout::{cluster_lines, DEFAULT_LINE_TOLERANCE};
///
/// let chars = vec![
///     (Some(CharacterBox::new(0, 0.0, 5.0, 100.0, 90.0)), Some('a')),
///     (Some(CharacterBox::new(1, 5.0, 10.0, 101.0, 90.5)), Some('b')),
///     (Some(CharacterBox::new(2, 0.0, 5.0, 80.0, 70.0)), Some('c')),
/// ];
/// let query = EngineRect::new(0.0, 10.0, 110.0, 60.0);
/// let out = cluster_lines(chars, &query, DEFAULT_LINE_TOLERANCE);
///
/// assert_eq!(out.text, "abc");
/// assert_eq!(out.lines.len(), 2);
/// ```
pub fn cluster_lines<I>(chars: I, query: &EngineRect, tolerance: f64) -> ClusteredText
where
    I: IntoIterator<Item = (Option<CharacterBox>, Option<char>)>,
{
    let mut clusterer = LineClusterer::new(*query, tolerance);
    for (char_box, ch) in chars {
        clusterer.push(char_box, ch);
    }
    clusterer.finish()
}
