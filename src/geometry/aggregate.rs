//! Bounding box aggregation over character boxes.

use super::{CharacterBox, EngineRect};

/// Incrementally folds rectangles into their union.
///
/// The first rectangle seeds the accumulator; every later one widens it with
/// `left = min, right = max, top = max, bottom = min`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsAccumulator {
    bounds: Option<EngineRect>,
}

impl BoundsAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator seeded with one rectangle.
    pub fn seeded(rect: EngineRect) -> Self {
        Self { bounds: Some(rect) }
    }

    /// Fold a rectangle into the running bounds.
    pub fn add(&mut self, rect: &EngineRect) {
        self.bounds = Some(match self.bounds {
            Some(current) => current.union(rect),
            None => *rect,
        });
    }

    /// Fold a character box into the running bounds.
    pub fn add_box(&mut self, char_box: &CharacterBox) {
        self.add(&char_box.rect());
    }

    /// The bounds collected so far, if any rectangle was added.
    pub fn bounds(&self) -> Option<EngineRect> {
        self.bounds
    }

    /// True until the first rectangle is added.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Union a sequence of character box lookups into one rectangle.
///
/// Each item is the result of looking up one character's box; failed lookups
/// (`None`) are skipped. Returns `None` when the sequence is empty or every
/// lookup failed.
///
/// # Examples
///
/// ```
/// use pdf_locate::geometry::{aggregate, CharacterBox, EngineRect};
///
/// let boxes = vec![
///     Some(CharacterBox::new(0, 10.0, 15.0, 700.0, 690.0)),
///     None,
///     Some(CharacterBox::new(2, 15.0, 21.0, 702.0, 689.0)),
/// ];
/// assert_eq!(aggregate(boxes), Some(EngineRect::new(10.0, 21.0, 702.0, 689.0)));
/// assert_eq!(aggregate(vec![None, None]), None);
/// ```
pub fn aggregate<I>(boxes: I) -> Option<EngineRect>
where
    I: IntoIterator<Item = Option<CharacterBox>>,
{
    boxes
        .into_iter()
        .flatten()
        .fold(BoundsAccumulator::new(), |mut acc, char_box| {
            acc.add_box(&char_box);
            acc
        })
        .bounds()
}
