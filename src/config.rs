//! Configuration for text location.

use crate::layout::DEFAULT_LINE_TOLERANCE;
use crate::outline::{OutlineLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use crate::search::SearchOptions;

/// Text location configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Options applied to every search.
    pub search: SearchOptions,

    /// Vertical tolerance, in engine units, for grouping selected characters
    /// into lines.
    pub line_tolerance: f64,

    /// Maximum outline nesting depth.
    pub outline_max_depth: usize,

    /// Maximum number of outline nodes.
    pub outline_max_nodes: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            search: SearchOptions::default(),
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            outline_max_depth: DEFAULT_MAX_DEPTH,
            outline_max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Set the search options.
    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    /// Set the line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the outline walk bounds.
    pub fn with_outline_limits(mut self, max_depth: usize, max_nodes: usize) -> Self {
        self.outline_max_depth = max_depth;
        self.outline_max_nodes = max_nodes;
        self
    }

    /// The outline bounds as [`OutlineLimits`].
    pub fn outline_limits(&self) -> OutlineLimits {
        OutlineLimits {
            max_depth: self.outline_max_depth,
            max_nodes: self.outline_max_nodes,
        }
    }
}
