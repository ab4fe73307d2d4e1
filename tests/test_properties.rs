//! Property-based tests for geometry, search and selection.

use pdf_locate::engine::memory::{MemoryDocument, MemoryEngine, MemoryPage};
use pdf_locate::engine::MatchSpan;
use pdf_locate::geometry::{CharacterBox, EngineRect, NormalizedRect, PageMetrics};
use pdf_locate::layout::{cluster_lines, DEFAULT_LINE_TOLERANCE};
use pdf_locate::search::{search_document, SearchOptions, DEFAULT_MAX_HITS};
use pdf_locate::selection::select_text;
use proptest::prelude::*;

fn in_unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

fn page_text(len: usize) -> String {
    (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
}

fn arb_span() -> impl Strategy<Value = MatchSpan> {
    (-5i32..130, -3i32..12).prop_map(|(start, count)| MatchSpan { start, count })
}

fn arb_page() -> impl Strategy<Value = MemoryPage> {
    (0usize..120, prop::collection::vec(arb_span(), 0..150)).prop_map(|(len, spans)| {
        MemoryPage::new(612.0, 792.0)
            .with_line(&page_text(len), EngineRect::new(0.0, 600.0, 700.0, 690.0))
            .with_forced_matches(spans)
    })
}

/// A glyph box anywhere on a 200 x 200 page.
fn arb_glyph() -> impl Strategy<Value = (char, EngineRect)> {
    (prop::char::range('a', 'z'), 0.0f64..190.0, 0.0f64..190.0, 1.0f64..10.0, 1.0f64..10.0)
        .prop_map(|(ch, left, bottom, w, h)| (ch, EngineRect::new(left, left + w, bottom + h, bottom)))
}

proptest! {
    #[test]
    fn test_normalized_components_in_unit_range(
        left in -1.0e4f64..1.0e4,
        right in -1.0e4f64..1.0e4,
        top in -1.0e4f64..1.0e4,
        bottom in -1.0e4f64..1.0e4,
        width in 1.0f64..5000.0,
        height in 1.0f64..5000.0,
    ) {
        let rect = NormalizedRect::from_engine(&EngineRect::new(left, right, top, bottom), &PageMetrics::new(width, height));
        prop_assert!(in_unit(rect.x) && in_unit(rect.y) && in_unit(rect.w) && in_unit(rect.h), "{:?}", rect);
    }

    #[test]
    fn test_search_hits_bounded_and_ordered(pages in prop::collection::vec(arb_page(), 0..5)) {
        let page_count = pages.len() as i32;
        let mut engine = MemoryEngine::new();
        let doc = engine.add_document(MemoryDocument::new(pages));

        let hits = search_document(&engine, &doc, page_count, "q", &SearchOptions::default());

        prop_assert!(hits.len() <= DEFAULT_MAX_HITS);
        for pair in hits.windows(2) {
            let a = (pair[0].page_index, pair[0].match_index);
            let b = (pair[1].page_index, pair[1].match_index);
            prop_assert!(a < b, "{:?} should precede {:?}", a, b);
        }
        for hit in &hits {
            if let Some(rect) = hit.rect {
                prop_assert!(in_unit(rect.x) && in_unit(rect.y) && in_unit(rect.w) && in_unit(rect.h));
            }
        }
        prop_assert!(engine.live_handles().is_zero());
    }

    #[test]
    fn test_search_idempotent(pages in prop::collection::vec(arb_page(), 1..4)) {
        let page_count = pages.len() as i32;
        let mut engine = MemoryEngine::new();
        let doc = engine.add_document(MemoryDocument::new(pages));
        let options = SearchOptions::default();

        let first = search_document(&engine, &doc, page_count, "q", &options);
        let second = search_document(&engine, &doc, page_count, "q", &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_selection_text_in_document_order(
        glyphs in prop::collection::vec(arb_glyph(), 1..60),
        x in 0.0f32..0.9,
        y in 0.0f32..0.9,
        w in 0.05f32..0.5,
        h in 0.05f32..0.5,
    ) {
        let metrics = PageMetrics::new(200.0, 200.0);
        let query_ui = NormalizedRect::new(x, y, w, h);
        let query = EngineRect::from_normalized(&query_ui, &metrics);

        let expected: String = glyphs
            .iter()
            .filter(|(_, rect)| query.intersects(rect))
            .map(|(ch, _)| *ch)
            .collect();

        let page = glyphs
            .iter()
            .fold(MemoryPage::new(200.0, 200.0), |page, (ch, rect)| page.with_char(*ch, *rect));
        let mut engine = MemoryEngine::new();
        let doc = engine.add_document(MemoryDocument::new(vec![page]));

        let selection = select_text(&engine, &doc, 0, &query_ui, DEFAULT_LINE_TOLERANCE).unwrap();
        prop_assert_eq!(selection.text, expected.clone());
        prop_assert!(selection.rects.len() <= expected.chars().count());
        prop_assert!(engine.live_handles().is_zero());
    }

    #[test]
    fn test_close_tops_share_a_line(
        top in 20.0f64..180.0,
        delta in -2.4f64..2.4,
        h1 in 1.0f64..15.0,
        h2 in 1.0f64..15.0,
    ) {
        let a = CharacterBox::new(0, 0.0, 5.0, top, top - h1);
        let b = CharacterBox::new(1, 5.0, 10.0, top + delta, top + delta - h2);
        let everything = EngineRect::new(-1.0e3, 1.0e3, 1.0e3, -1.0e3);

        let out = cluster_lines(vec![(Some(a), Some('a')), (Some(b), Some('b'))], &everything, DEFAULT_LINE_TOLERANCE);
        prop_assert_eq!(out.lines.len(), 1);
    }

    #[test]
    fn test_distant_lines_stay_apart(
        top in 20.0f64..180.0,
        gap in 2.6f64..50.0,
        height in 1.0f64..10.0,
    ) {
        // Same height, so the bottoms are exactly as far apart as the tops
        let a = CharacterBox::new(0, 0.0, 5.0, top, top - height);
        let b = CharacterBox::new(1, 0.0, 5.0, top - gap, top - gap - height);
        let everything = EngineRect::new(-1.0e3, 1.0e3, 1.0e3, -1.0e3);

        let out = cluster_lines(vec![(Some(a), Some('a')), (Some(b), Some('b'))], &everything, DEFAULT_LINE_TOLERANCE);
        prop_assert_eq!(out.lines.len(), 2);
    }

    #[test]
    fn test_touching_query_edge_selects(left in 0.0f64..100.0, width in 1.0f64..20.0) {
        let query = EngineRect::new(left - 10.0, left, 100.0, 0.0);
        let glyph = CharacterBox::new(0, left, left + width, 50.0, 40.0);

        let out = cluster_lines(vec![(Some(glyph), Some('g'))], &query, DEFAULT_LINE_TOLERANCE);
        prop_assert_eq!(out.text, "g");
    }
}
