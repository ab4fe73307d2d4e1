//! Geometric primitives for search and selection.
//!
//! Two coordinate systems meet here:
//!
//! - **Engine space**: what the text engine reports. Origin at the bottom-left
//!   corner of the page, units are page-native (points for PDF), `top > bottom`.
//! - **UI space**: what a viewer draws. Origin at the top-left corner, y grows
//!   downward, every component normalized to `[0, 1]`.
//!
//! [`NormalizedRect::from_engine`] maps engine space to UI space and
//! [`EngineRect::from_normalized`] maps a UI gesture back into engine space.

pub mod aggregate;

pub use aggregate::{aggregate, BoundsAccumulator};

use serde::{Deserialize, Serialize};

/// Size of a page in engine units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

impl PageMetrics {
    /// Create page metrics from a width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A page is usable only when both dimensions are finite and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::PageMetrics;
    ///
    /// assert!(PageMetrics::new(612.0, 792.0).is_valid());
    /// assert!(!PageMetrics::new(0.0, 792.0).is_valid());
    /// assert!(!PageMetrics::new(612.0, f64::NAN).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangle in engine space (bottom-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineRect {
    /// Left edge x-coordinate
    pub left: f64,
    /// Right edge x-coordinate
    pub right: f64,
    /// Top edge y-coordinate (the larger y)
    pub top: f64,
    /// Bottom edge y-coordinate (the smaller y)
    pub bottom: f64,
}

impl EngineRect {
    /// Create a rectangle from its four edges.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Map a normalized UI-space rectangle back into engine space.
    ///
    /// This is the inverse of [`NormalizedRect::from_engine`] before clamping.
    /// The caller is responsible for checking that `metrics` is valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::{EngineRect, NormalizedRect, PageMetrics};
    ///
    /// let page = PageMetrics::new(200.0, 100.0);
    /// let rect = EngineRect::from_normalized(&NormalizedRect::new(0.5, 0.25, 0.25, 0.5), &page);
    /// assert_eq!(rect, EngineRect::new(100.0, 150.0, 75.0, 25.0));
    /// ```
    pub fn from_normalized(rect: &NormalizedRect, metrics: &PageMetrics) -> Self {
        let left = f64::from(rect.x) * metrics.width;
        let top = metrics.height - f64::from(rect.y) * metrics.height;
        let right = left + f64::from(rect.w) * metrics.width;
        let bottom = top - f64::from(rect.h) * metrics.height;
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Check whether two rectangles overlap.
    ///
    /// Touching edges count as overlapping: only a strict gap on one axis
    /// rejects the pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::EngineRect;
    ///
    /// let query = EngineRect::new(0.0, 10.0, 10.0, 0.0);
    /// let touching = EngineRect::new(10.0, 20.0, 10.0, 0.0);
    /// let apart = EngineRect::new(10.5, 20.0, 10.0, 0.0);
    ///
    /// assert!(query.intersects(&touching));
    /// assert!(!query.intersects(&apart));
    /// ```
    pub fn intersects(&self, other: &EngineRect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.top < other.bottom
            || self.bottom > other.top)
    }

    /// Compute the union of this rectangle with another.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::EngineRect;
    ///
    /// let a = EngineRect::new(0.0, 10.0, 50.0, 40.0);
    /// let b = EngineRect::new(5.0, 20.0, 45.0, 30.0);
    /// assert_eq!(a.union(&b), EngineRect::new(0.0, 20.0, 50.0, 30.0));
    /// ```
    pub fn union(&self, other: &EngineRect) -> EngineRect {
        EngineRect {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

/// Bounding box of a single character in engine space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBox {
    /// Character index on its page
    pub index: i32,
    /// Left edge
    pub left: f64,
    /// Right edge
    pub right: f64,
    /// Top edge
    pub top: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl CharacterBox {
    /// Create a character box from its index and edges.
    pub fn new(index: i32, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            index,
            left,
            right,
            top,
            bottom,
        }
    }

    /// The box as a plain engine-space rectangle.
    pub fn rect(&self) -> EngineRect {
        EngineRect::new(self.left, self.right, self.top, self.bottom)
    }
}

/// A rectangle in UI space: top-left origin, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    /// Left edge as a fraction of page width
    pub x: f32,
    /// Top edge as a fraction of page height, measured from the top
    pub y: f32,
    /// Width as a fraction of page width
    pub w: f32,
    /// Height as a fraction of page height
    pub h: f32,
}

impl NormalizedRect {
    /// Create a rectangle from raw components (no clamping).
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// The all-zero rectangle, signaling "no geometry".
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the all-zero rectangle.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// True when both width and height are strictly positive.
    pub fn has_area(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Convert an engine-space rectangle to UI space.
    ///
    /// Each component is clamped to `[0, 1]` independently, so boxes that
    /// poke outside the page are truncated rather than rescaled. Invalid page
    /// metrics produce [`NormalizedRect::empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::{EngineRect, NormalizedRect, PageMetrics};
    ///
    /// let page = PageMetrics::new(100.0, 200.0);
    /// let rect = NormalizedRect::from_engine(&EngineRect::new(10.0, 60.0, 180.0, 160.0), &page);
    /// assert_eq!(rect, NormalizedRect::new(0.1, 0.1, 0.5, 0.1));
    ///
    /// let broken = PageMetrics::new(0.0, 200.0);
    /// assert!(NormalizedRect::from_engine(&EngineRect::new(1.0, 2.0, 3.0, 1.0), &broken).is_empty());
    /// ```
    pub fn from_engine(rect: &EngineRect, metrics: &PageMetrics) -> Self {
        if !metrics.is_valid() {
            return Self::empty();
        }

        let x = rect.left / metrics.width;
        let y = (metrics.height - rect.top) / metrics.height;
        let w = (rect.right - rect.left) / metrics.width;
        let h = (rect.top - rect.bottom) / metrics.height;

        Self {
            x: clamp_unit(x as f32),
            y: clamp_unit(y as f32),
            w: clamp_unit(w as f32),
            h: clamp_unit(h as f32),
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
