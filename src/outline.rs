//! Document outline (bookmarks) support.
//!
//! Walks the engine's bookmark graph through first-child / next-sibling links
//! and builds an owned tree. Bookmark graphs in damaged files can be cyclic,
//! so the walk is bounded by a maximum depth and a maximum node count.

use crate::engine::TextEngine;
use serde::{Deserialize, Serialize};

/// Default maximum nesting depth of an outline.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of outline nodes collected.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// A single outline item (bookmark) in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// The title of this bookmark; empty when it has none
    pub title: String,

    /// Zero-based destination page, `-1` when the bookmark has no destination
    pub page_index: i32,

    /// Child bookmarks under this item
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(title: impl Into<String>, page_index: i32) -> Self {
        Self {
            title: title.into(),
            page_index,
            children: Vec::new(),
        }
    }

    /// Attach children.
    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// True when the bookmark points at a page.
    pub fn has_destination(&self) -> bool {
        self.page_index >= 0
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }
}

/// Bounds applied while walking a bookmark graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineLimits {
    /// Maximum nesting depth; level 1 is the top level
    pub max_depth: usize,
    /// Maximum number of nodes collected overall
    pub max_nodes: usize,
}

impl Default for OutlineLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Build the outline tree of an open document.
///
/// Returns the top-level items in order. A document without bookmarks yields
/// an empty vector.
///
/// # Example
///
/// ```
/// use pdf_locate::engine::memory::{MemoryDocument, MemoryEngine};
/// use pdf_locate::outline::{build_outline, OutlineLimits, OutlineNode};
///
/// let tree = vec![OutlineNode::new("Intro", 0).with_children(vec![OutlineNode::new("Scope", 1)])];
/// let mut engine = MemoryEngine::new();
/// let doc = engine.add_document(MemoryDocument::new(Vec::new()).with_outline(&tree));
///
/// assert_eq!(build_outline(&engine, &doc, OutlineLimits::default()), tree);
/// ```
pub fn build_outline<E: TextEngine>(
    engine: &E,
    document: &E::Document,
    limits: OutlineLimits,
) -> Vec<OutlineNode> {
    let mut walker = OutlineWalker {
        engine,
        document,
        limits,
        collected: 0,
        truncated: false,
    };
    let items = walker.children_of(None, 1);

    if walker.truncated {
        log::warn!(
            "Outline truncated after {} nodes (max depth {}, max nodes {})",
            walker.collected,
            limits.max_depth,
            limits.max_nodes
        );
    }

    items
}

struct OutlineWalker<'a, E: TextEngine> {
    engine: &'a E,
    document: &'a E::Document,
    limits: OutlineLimits,
    collected: usize,
    truncated: bool,
}

impl<E: TextEngine> OutlineWalker<'_, E> {
    fn children_of(&mut self, parent: Option<&E::Bookmark>, depth: usize) -> Vec<OutlineNode> {
        let mut items = Vec::new();
        if depth > self.limits.max_depth {
            if self.engine.first_child(self.document, parent).is_some() {
                self.truncated = true;
            }
            return items;
        }

        let mut current = self.engine.first_child(self.document, parent);
        while let Some(bookmark) = current {
            if self.collected >= self.limits.max_nodes {
                self.truncated = true;
                break;
            }
            self.collected += 1;

            let title = self.engine.bookmark_title(&bookmark);
            let page_index = self
                .engine
                .bookmark_page_index(self.document, &bookmark)
                .filter(|index| *index >= 0)
                .unwrap_or(-1);
            let children = self.children_of(Some(&bookmark), depth + 1);

            items.push(OutlineNode {
                title,
                page_index,
                children,
            });

            current = self.engine.next_sibling(self.document, &bookmark);
        }

        items
    }
}
