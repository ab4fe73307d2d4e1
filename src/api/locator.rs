//! Caller-facing text location operations.
//!
//! `TextLocator` exposes outline, search and selection against either an
//! already-open document handle or a file path. Failures never surface as
//! errors here: they are logged and collapse to an empty result or `None`.

use crate::config::LocatorConfig;
use crate::engine::guards::DocumentGuard;
use crate::engine::{Capability, TextEngine};
use crate::error::Result;
use crate::geometry::NormalizedRect;
use crate::outline::{build_outline, OutlineNode};
use crate::search::{SearchHit, TextSearcher};
use crate::selection::{select_text, TextSelection};
use std::path::Path;

/// Outline, search and selection over a text engine capability.
#[derive(Debug)]
pub struct TextLocator<'c, E: TextEngine> {
    capability: &'c Capability<E>,
    config: LocatorConfig,
}

impl<'c, E: TextEngine> TextLocator<'c, E> {
    /// Create a locator with default configuration.
    pub fn new(capability: &'c Capability<E>) -> Self {
        Self {
            capability,
            config: LocatorConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: LocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// True when the underlying engine can be driven.
    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Search an open document.
    ///
    /// Returns an empty vector when the engine is unavailable, `page_count`
    /// is not positive or `query` is empty.
    pub fn search(&self, document: &E::Document, page_count: i32, query: &str) -> Vec<SearchHit> {
        let Some(engine) = self.engine("search") else {
            return Vec::new();
        };
        TextSearcher::search(engine, document, page_count, query, &self.config.search)
    }

    /// Search a document file; the page count comes from the engine.
    pub fn search_file(&self, path: impl AsRef<Path>, query: &str) -> Vec<SearchHit> {
        let path = path.as_ref();
        self.with_file("search", path, |engine, document| {
            let page_count = engine.page_count(document);
            Ok(TextSearcher::search(engine, document, page_count, query, &self.config.search))
        })
        .unwrap_or_default()
    }

    /// Select the text under `rect` (UI space) on one page of an open document.
    ///
    /// `None` signals an invalid request or a structural failure; a gesture
    /// over a blank region yields an empty [`TextSelection`] instead.
    pub fn select_text(
        &self,
        document: &E::Document,
        page_index: i32,
        rect: &NormalizedRect,
    ) -> Option<TextSelection> {
        let engine = self.engine("select_text")?;
        select_text(engine, document, page_index, rect, self.config.line_tolerance)
            .map_err(|e| log::debug!("Selection on page {} failed: {}", page_index, e))
            .ok()
    }

    /// Select text on one page of a document file.
    pub fn select_text_file(
        &self,
        path: impl AsRef<Path>,
        page_index: i32,
        rect: &NormalizedRect,
    ) -> Option<TextSelection> {
        let path = path.as_ref();
        self.with_file("select_text", path, |engine, document| {
            select_text(engine, document, page_index, rect, self.config.line_tolerance)
        })
    }

    /// Outline tree of an open document.
    pub fn outline(&self, document: &E::Document) -> Vec<OutlineNode> {
        let Some(engine) = self.engine("outline") else {
            return Vec::new();
        };
        build_outline(engine, document, self.config.outline_limits())
    }

    /// Outline tree of a document file.
    pub fn outline_file(&self, path: impl AsRef<Path>) -> Vec<OutlineNode> {
        let path = path.as_ref();
        self.with_file("outline", path, |engine, document| {
            Ok(build_outline(engine, document, self.config.outline_limits()))
        })
        .unwrap_or_default()
    }

    fn engine(&self, operation: &str) -> Option<&'c E> {
        match self.capability.require() {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::debug!("Skipping {}: {}", operation, e);
                None
            },
        }
    }

    /// Open `path`, run `f` against it, and close it again.
    fn with_file<T, F>(&self, operation: &str, path: &Path, f: F) -> Option<T>
    where
        F: FnOnce(&E, &E::Document) -> Result<T>,
    {
        let engine = self.engine(operation)?;
        let result = DocumentGuard::open(engine, path).and_then(|guard| f(engine, guard.document()));
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("{} on {} failed: {}", operation, path.display(), e);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::memory::{MemoryDocument, MemoryEngine, MemoryPage};
    use crate::geometry::EngineRect;

    fn sample_engine() -> MemoryEngine {
        let page = MemoryPage::new(200.0, 100.0).with_line("alpha beta", EngineRect::new(0.0, 100.0, 80.0, 70.0));
        let document = MemoryDocument::new(vec![page]).with_outline(&[OutlineNode::new("Start", 0)]);
        let mut engine = MemoryEngine::new();
        engine.add_file("sample.pdf", document);
        engine
    }

    #[test]
    fn test_file_forms_release_document() {
        let capability = Capability::Available(sample_engine());
        let locator = TextLocator::new(&capability);

        assert_eq!(locator.search_file("sample.pdf", "beta").len(), 1);
        assert_eq!(locator.outline_file("sample.pdf").len(), 1);
        let sel = locator
            .select_text_file("sample.pdf", 0, &NormalizedRect::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(sel.text, "alpha beta");

        let engine = capability.engine().unwrap();
        assert!(engine.live_handles().is_zero());
    }

    #[test]
    fn test_missing_file() {
        let capability = Capability::Available(sample_engine());
        let locator = TextLocator::new(&capability);

        assert!(locator.search_file("nope.pdf", "beta").is_empty());
        assert!(locator.outline_file("nope.pdf").is_empty());
        assert!(locator
            .select_text_file("nope.pdf", 0, &NormalizedRect::new(0.0, 0.0, 1.0, 1.0))
            .is_none());
    }

    #[test]
    fn test_unavailable_engine() {
        let capability: Capability<MemoryEngine> = Capability::Unavailable("not bound".to_string());
        let locator = TextLocator::new(&capability);

        assert!(!locator.is_available());
        assert!(locator.search_file("sample.pdf", "beta").is_empty());
        assert!(locator.outline_file("sample.pdf").is_empty());
        assert!(locator
            .select_text_file("sample.pdf", 0, &NormalizedRect::new(0.0, 0.0, 1.0, 1.0))
            .is_none());
    }
}
