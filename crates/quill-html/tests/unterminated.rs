//! Long runs of unterminated markup must lex in linear time.

use std::time::{Duration, Instant};

use quill_dom::Element;
use quill_html::parse;

const REPEAT: usize = 100_000;

/// Generous enough for a debug build; a rescan per `<` takes minutes here.
const LIMIT: Duration = Duration::from_secs(5);

fn assert_kept_as_text(source: &str) {
    let started = Instant::now();
    let doc = parse(source);
    let elapsed = started.elapsed();

    assert!(elapsed < LIMIT, "lexing took {elapsed:?}");
    assert!(matches!(doc.elements.as_slice(), [Element::Text(_)]));
    assert_eq!(doc.to_string(), source);
}

#[test]
fn test_unterminated_start_tags() {
    assert_kept_as_text(&"<a".repeat(REPEAT));
    assert_kept_as_text(&"<a x=\"".repeat(REPEAT));
}

#[test]
fn test_unterminated_declarations() {
    assert_kept_as_text(&"<!".repeat(REPEAT));
}

#[test]
fn test_unterminated_comments() {
    assert_kept_as_text(&"<!--".repeat(REPEAT));
    assert_kept_as_text(&"<!-- - >".repeat(REPEAT));
}

#[test]
fn test_many_script_blocks() {
    let source = "<script>x</script>".repeat(REPEAT / 10);
    let started = Instant::now();
    let doc = parse(&source);
    assert!(started.elapsed() < LIMIT);
    assert_eq!(doc.elements.len(), 3 * REPEAT / 10);
}
