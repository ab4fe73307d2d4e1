//! Integration tests for outline handling.

use pdf_locate::api::TextLocator;
use pdf_locate::engine::memory::{MemoryBookmark, MemoryDocument, MemoryEngine};
use pdf_locate::engine::Capability;
use pdf_locate::outline::{build_outline, OutlineLimits, OutlineNode};
use pdf_locate::LocatorConfig;

fn book() -> Vec<OutlineNode> {
    vec![
        OutlineNode::new("Preface", 0),
        OutlineNode::new("Part I", 2).with_children(vec![
            OutlineNode::new("Chapter 1", 3).with_children(vec![OutlineNode::new("1.1 Scope", 4)]),
            OutlineNode::new("Chapter 2", 9),
        ]),
        OutlineNode::new("Untargeted note", -1),
    ]
}

#[test]
fn test_outline_round_trips_through_engine() {
    let mut engine = MemoryEngine::new();
    let doc = engine.add_document(MemoryDocument::default().with_outline(&book()));

    let outline = build_outline(&engine, &doc, OutlineLimits::default());
    assert_eq!(outline, book());
    assert_eq!(outline.iter().map(OutlineNode::node_count).sum::<usize>(), 6);
}

#[test]
fn test_outline_missing() {
    let mut engine = MemoryEngine::new();
    engine.add_file("plain.pdf", MemoryDocument::default());
    let capability = Capability::Available(engine);

    assert!(TextLocator::new(&capability).outline_file("plain.pdf").is_empty());
}

#[test]
fn test_untitled_bookmark() {
    let mut document = MemoryDocument::default();
    document.bookmarks.push(MemoryBookmark {
        title: String::new(),
        page_index: None,
        first_child: None,
        next_sibling: None,
    });
    document.first_bookmark = Some(0);

    let mut engine = MemoryEngine::new();
    let doc = engine.add_document(document);

    let outline = build_outline(&engine, &doc, OutlineLimits::default());
    assert_eq!(outline, vec![OutlineNode::new("", -1)]);
    assert!(!outline[0].has_destination());
}

#[test]
fn test_depth_limit_from_config() {
    let mut engine = MemoryEngine::new();
    engine.add_file("book.pdf", MemoryDocument::default().with_outline(&book()));
    let capability = Capability::Available(engine);

    let locator = TextLocator::new(&capability).with_config(LocatorConfig::new().with_outline_limits(2, 100));
    let outline = locator.outline_file("book.pdf");

    assert_eq!(outline.len(), 3);
    let chapter = &outline[1].children[0];
    assert_eq!(chapter.title, "Chapter 1");
    assert!(chapter.children.is_empty());
}

#[test]
fn test_node_limit_keeps_prefix() {
    let mut engine = MemoryEngine::new();
    let doc = engine.add_document(MemoryDocument::default().with_outline(&book()));

    let limits = OutlineLimits {
        max_depth: 64,
        max_nodes: 3,
    };
    let outline = build_outline(&engine, &doc, limits);

    // Preface, Part I, Chapter 1 in walk order
    assert_eq!(outline.len(), 2);
    assert_eq!(outline[1].children.len(), 1);
    assert!(outline[1].children[0].children.is_empty());
}

#[test]
fn test_cyclic_graph_terminates() {
    // Child points back at its parent
    let mut document = MemoryDocument::default();
    document.bookmarks.push(MemoryBookmark {
        title: "Parent".to_string(),
        page_index: Some(0),
        first_child: Some(1),
        next_sibling: None,
    });
    document.bookmarks.push(MemoryBookmark {
        title: "Child".to_string(),
        page_index: Some(1),
        first_child: Some(0),
        next_sibling: Some(0),
    });
    document.first_bookmark = Some(0);

    let mut engine = MemoryEngine::new();
    let doc = engine.add_document(document);

    let outline = build_outline(&engine, &doc, OutlineLimits::default());
    let total: usize = outline.iter().map(OutlineNode::node_count).sum();
    assert!(total <= 10_000);
    assert_eq!(outline[0].title, "Parent");
}

#[test]
fn test_outline_with_unavailable_engine() {
    let capability: Capability<MemoryEngine> = Capability::Unavailable("no library".to_string());
    assert!(TextLocator::new(&capability).outline_file("book.pdf").is_empty());
}

#[test]
fn test_outline_serializes() {
    let json = serde_json::to_value(OutlineNode::new("Intro", 0)).unwrap();
    assert_eq!(json["title"], "Intro");
    assert_eq!(json["page_index"], 0);
    assert!(json["children"].as_array().unwrap().is_empty());
}
