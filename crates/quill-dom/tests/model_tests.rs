//! Tests for the element model: serialized lengths, block construction, and
//! the document walk lifecycle.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use quill_dom::{
    Annotation, Attribute, AttributeList, Comment, Document, Element, EndTag, Tag, TagBlock,
    Text, Visitor,
};

fn attributes(pairs: &[(&str, Option<&str>)]) -> AttributeList {
    pairs
        .iter()
        .map(|(name, value)| match value {
            Some(value) => Attribute::with_value(*name, *value),
            None => Attribute::new(*name),
        })
        .collect()
}

fn assert_length_matches(element: &Element) {
    assert_eq!(
        element.length(),
        element.to_string().chars().count(),
        "length of {element}"
    );
}

// ========== length ==========

#[test]
fn test_length_of_every_kind() {
    let tag = Tag::new("img", attributes(&[("src", Some("\"a.png\"")), ("ismap", None)])).into_void();
    let body = vec![
        Element::text("caf\u{e9} "),
        Element::newline(),
        Element::comment("-- note --"),
        Annotation::new("unmatched-end-tag", "q").into(),
        tag.clone().into(),
    ];
    let block = TagBlock::enclosing(Tag::new("p", AttributeList::new()), body.clone().into());

    for element in body.iter().chain([&Element::end_tag("p"), &Element::block(block)]) {
        assert_length_matches(element);
    }
    assert_eq!(tag.to_string(), "<img src=\"a.png\" ismap/>");
}

#[quickcheck]
fn prop_text_length_counts_chars(text: String) -> bool {
    Text::new(text.clone()).length() == text.chars().count()
}

#[quickcheck]
fn prop_tag_length_matches_display(name: String, attrs: Vec<(String, Option<String>)>) -> TestResult {
    if name.is_empty() {
        return TestResult::discard();
    }
    let list: AttributeList = attrs
        .into_iter()
        .map(|(name, value)| Attribute { name, value })
        .collect();
    let tag = Tag::new(name, list);
    TestResult::from_bool(tag.length() == tag.to_string().chars().count())
}

// ========== blocks ==========

#[test]
fn test_block_names_compare_ignoring_case() {
    let block = TagBlock::new(
        Tag::new("DIV", AttributeList::new()),
        vec![Element::text("x")].into(),
        EndTag::new("div"),
    );
    assert_eq!(block.name(), "DIV");
    assert!(block.is("Div"));
    assert_eq!(block.to_string(), "<DIV>x</div>");
}

#[test]
#[should_panic(expected = "does not match")]
fn test_block_rejects_mismatched_end() {
    let _ = TagBlock::new(
        Tag::new("b", AttributeList::new()),
        Vec::new().into(),
        EndTag::new("i"),
    );
}

#[test]
fn test_block_text_skips_markup() {
    let inner = TagBlock::enclosing(
        Tag::new("b", AttributeList::new()),
        vec![Element::text("bold"), Element::comment("hidden")].into(),
    );
    let outer = TagBlock::enclosing(
        Tag::new("p", AttributeList::new()),
        vec![
            Element::text("plain "),
            Element::block(inner),
            Element::newline(),
            Element::text(" end"),
        ]
        .into(),
    );
    assert_eq!(outer.text(), "plain bold end");
}

#[test]
fn test_comment_keeps_source_form() {
    let comment = Comment::new("DOCTYPE html");
    assert_eq!(comment.to_string(), "<!DOCTYPE html>");
    assert_eq!(comment.length(), 15);
}

// ========== lifecycle ==========

/// Fails on the first text element and counts lifecycle calls.
#[derive(Default)]
struct Failing {
    started: usize,
    finished: usize,
    tags: usize,
}

impl Visitor for Failing {
    type Error = String;

    fn start(&mut self) {
        self.started += 1;
    }

    fn finish(&mut self) -> Result<(), String> {
        self.finished += 1;
        Ok(())
    }

    fn visit_tag(&mut self, _tag: &Tag) -> Result<(), String> {
        self.tags += 1;
        Ok(())
    }

    fn visit_text(&mut self, text: &Text) -> Result<(), String> {
        Err(format!("refused {}", text.text))
    }
}

#[test]
fn test_finish_runs_after_failed_walk() {
    let doc = Document::from(vec![
        Element::tag("a"),
        Element::text("stop"),
        Element::tag("never"),
    ]);
    let mut visitor = Failing::default();

    assert_eq!(doc.accept(&mut visitor), Err("refused stop".to_string()));
    assert_eq!(visitor.started, 1);
    assert_eq!(visitor.finished, 1);
    assert_eq!(visitor.tags, 1);
}

#[test]
fn test_empty_document_still_runs_lifecycle() {
    let mut visitor = Failing::default();
    assert_eq!(Document::default().accept(&mut visitor), Ok(()));
    assert_eq!((visitor.started, visitor.finished, visitor.tags), (1, 1, 0));
}
