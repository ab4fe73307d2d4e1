//! Layout analysis for text selection.
//!
//! - Greedy line clustering (characters → visual lines)

pub mod line_clustering;

// Re-export main types
pub use line_clustering::{
    cluster_lines, ClusteredText, LineCluster, LineClusterer, DEFAULT_LINE_TOLERANCE,
};
