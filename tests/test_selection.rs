//! Tests for rectangle-to-text selection.

use pdf_locate::api::TextLocator;
use pdf_locate::engine::memory::{DocumentId, MemoryDocument, MemoryEngine, MemoryPage};
use pdf_locate::engine::Capability;
use pdf_locate::geometry::{EngineRect, NormalizedRect};
use pdf_locate::layout::DEFAULT_LINE_TOLERANCE;
use pdf_locate::selection::select_text;
use pdf_locate::{Error, LocatorConfig};

/// A 200 x 200 page with three lines of ten-unit glyphs.
fn paragraph() -> MemoryPage {
    MemoryPage::new(200.0, 200.0)
        .with_line("first", EngineRect::new(20.0, 70.0, 180.0, 170.0))
        .with_line("second", EngineRect::new(20.0, 80.0, 160.0, 150.0))
        .with_line("third", EngineRect::new(20.0, 70.0, 140.0, 130.0))
}

fn engine_with(pages: Vec<MemoryPage>) -> (MemoryEngine, DocumentId) {
    let mut engine = MemoryEngine::new();
    let doc = engine.add_document(MemoryDocument::new(pages));
    (engine, doc)
}

fn whole_page() -> NormalizedRect {
    NormalizedRect::new(0.0, 0.0, 1.0, 1.0)
}

mod resolve {
    use super::*;

    #[test]
    fn test_one_rect_per_line() {
        let (engine, doc) = engine_with(vec![paragraph()]);
        let sel = select_text(&engine, &doc, 0, &whole_page(), DEFAULT_LINE_TOLERANCE).unwrap();

        assert_eq!(sel.text, "firstsecondthird");
        assert_eq!(sel.rects.len(), 3);
        // Line 1: x 20..70 on a 200-wide page, top at 180
        assert!((sel.rects[0].x - 0.1).abs() < 1e-6);
        assert!((sel.rects[0].y - 0.1).abs() < 1e-6);
        assert!((sel.rects[0].w - 0.25).abs() < 1e-6);
        assert!((sel.rects[0].h - 0.05).abs() < 1e-6);
        assert!(engine.live_handles().is_zero());
    }

    #[test]
    fn test_partial_rect_selects_touched_chars() {
        let (engine, doc) = engine_with(vec![paragraph()]);
        // Engine x 25..50; glyphs starting at 50 touch the right edge
        let rect = NormalizedRect::new(0.125, 0.0, 0.125, 1.0);
        let sel = select_text(&engine, &doc, 0, &rect, DEFAULT_LINE_TOLERANCE).unwrap();

        assert_eq!(sel.text, "firssecothir");
        assert_eq!(sel.rects.len(), 3);
    }

    #[test]
    fn test_blank_area_is_empty_not_none() {
        let (engine, doc) = engine_with(vec![paragraph()]);
        let rect = NormalizedRect::new(0.6, 0.6, 0.3, 0.3);
        let sel = select_text(&engine, &doc, 0, &rect, DEFAULT_LINE_TOLERANCE).unwrap();

        assert!(sel.text.is_empty());
        assert!(sel.rects.is_empty());
    }

    #[test]
    fn test_text_follows_document_order_not_geometry() {
        // Stored bottom line first
        let page = MemoryPage::new(100.0, 100.0)
            .with_line("low", EngineRect::new(0.0, 30.0, 20.0, 10.0))
            .with_line("high", EngineRect::new(0.0, 40.0, 90.0, 80.0));
        let (engine, doc) = engine_with(vec![page]);

        let sel = select_text(&engine, &doc, 0, &whole_page(), DEFAULT_LINE_TOLERANCE).unwrap();
        assert_eq!(sel.text, "lowhigh");
        // Rects in cluster creation order: the low line first
        assert!(sel.rects[0].y > sel.rects[1].y);
    }

    #[test]
    fn test_superscript_joins_line_by_bottom_or_top() {
        let page = MemoryPage::new(100.0, 100.0)
            .with_char('x', EngineRect::new(0.0, 5.0, 60.0, 50.0))
            // Raised glyph sharing the top
            .with_char('2', EngineRect::new(5.0, 8.0, 61.0, 56.0))
            // Taller glyph sharing the baseline
            .with_char('X', EngineRect::new(8.0, 13.0, 66.0, 51.0));
        let (engine, doc) = engine_with(vec![page]);

        let sel = select_text(&engine, &doc, 0, &whole_page(), DEFAULT_LINE_TOLERANCE).unwrap();
        assert_eq!(sel.rects.len(), 1);
        assert_eq!(sel.text, "x2X");
    }

    #[test]
    fn test_unboxed_chars_are_skipped() {
        let page = MemoryPage::new(100.0, 100.0)
            .with_char('a', EngineRect::new(0.0, 5.0, 60.0, 50.0))
            .with_boxless_char('?')
            .with_char('b', EngineRect::new(5.0, 10.0, 60.0, 50.0));
        let (engine, doc) = engine_with(vec![page]);

        let sel = select_text(&engine, &doc, 0, &whole_page(), DEFAULT_LINE_TOLERANCE).unwrap();
        assert_eq!(sel.text, "ab");
    }
}

mod rejected {
    use super::*;

    #[test]
    fn test_zero_rect() {
        let (engine, doc) = engine_with(vec![paragraph()]);
        let result = select_text(&engine, &doc, 0, &NormalizedRect::new(0.0, 0.0, 0.0, 0.0), DEFAULT_LINE_TOLERANCE);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_zero_width_or_height() {
        let (engine, doc) = engine_with(vec![paragraph()]);
        for rect in [NormalizedRect::new(0.1, 0.1, 0.0, 0.5), NormalizedRect::new(0.1, 0.1, 0.5, 0.0)] {
            assert!(select_text(&engine, &doc, 0, &rect, DEFAULT_LINE_TOLERANCE).is_err());
        }
    }

    #[test]
    fn test_failed_text_layer() {
        let (engine, doc) = engine_with(vec![paragraph().without_text_layer()]);
        let result = select_text(&engine, &doc, 0, &whole_page(), DEFAULT_LINE_TOLERANCE);
        assert!(matches!(result, Err(Error::TextPageLoad(0))));
        assert!(engine.live_handles().is_zero());
    }
}

mod locator {
    use super::*;

    fn locator_engine() -> Capability<MemoryEngine> {
        let mut engine = MemoryEngine::new();
        engine.add_file("doc.pdf", MemoryDocument::new(vec![paragraph(), MemoryPage::new(200.0, 200.0)]));
        Capability::Available(engine)
    }

    #[test]
    fn test_zero_rect_returns_none() {
        let capability = locator_engine();
        let locator = TextLocator::new(&capability);
        assert!(locator
            .select_text_file("doc.pdf", 0, &NormalizedRect::new(0.0, 0.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_empty_page_returns_none() {
        let capability = locator_engine();
        let locator = TextLocator::new(&capability);
        assert!(locator.select_text_file("doc.pdf", 1, &whole_page()).is_none());
    }

    #[test]
    fn test_negative_page_returns_none() {
        let capability = locator_engine();
        let locator = TextLocator::new(&capability);
        assert!(locator.select_text_file("doc.pdf", -1, &whole_page()).is_none());
    }

    #[test]
    fn test_tolerance_from_config() {
        let capability = locator_engine();
        // Zero tolerance still merges glyphs on identical lines
        let locator = TextLocator::new(&capability).with_config(LocatorConfig::new().with_line_tolerance(0.0));
        let sel = locator.select_text_file("doc.pdf", 0, &whole_page()).unwrap();
        assert_eq!(sel.rects.len(), 3);
        assert!(capability.engine().unwrap().live_handles().is_zero());
    }

    #[test]
    fn test_handle_form() {
        let mut engine = MemoryEngine::new();
        let doc = engine.add_document(MemoryDocument::new(vec![paragraph()]));
        let capability = Capability::Available(engine);
        let locator = TextLocator::new(&capability);

        let sel = locator.select_text(&doc, 0, &whole_page()).unwrap();
        assert_eq!(sel.text, "firstsecondthird");
    }
}
