//! Property tests for the lexer, Collector, and Scrubber.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use quill_dom::{Document, Element, ElementSequence};
use quill_html::{Collector, ScrubOptions, Scrubber, parse};

const NAMES: &[&str] = &["div", "SPAN", "b", "I", "Table", "td", "p", "br"];
const WORDS: &[&str] = &["hello", "  spaced", "tab\there", "x", "<3", "a > b", " "];
const VALUES: &[&str] = &["plain", "\"quoted\"", "'single'", "\"Mixed\"", "\"two words\"", "''"];

fn pick(g: &mut Gen, choices: &[&'static str]) -> &'static str {
    g.choose(choices).copied().unwrap_or_default()
}

fn start_tag(g: &mut Gen, name: &str) -> String {
    let mut tag = format!("<{name}");
    for _ in 0..usize::arbitrary(g) % 3 {
        tag.push(' ');
        tag.push_str(pick(g, &["class", "HREF", "Id", "checked"]));
        if bool::arbitrary(g) {
            tag.push('=');
            tag.push_str(pick(g, VALUES));
        }
    }
    tag.push('>');
    tag
}

/// Source text built only from constructs the lexer reproduces exactly.
#[derive(Debug, Clone)]
struct Source(String);

impl Arbitrary for Source {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut source = String::new();
        for _ in 0..g.size() {
            match u8::arbitrary(g) % 6 {
                0 => {
                    let name = pick(g, NAMES);
                    source.push_str(&start_tag(g, name));
                }
                1 => source.push_str(&format!("</{}>", pick(g, NAMES))),
                2 => source.push_str(&format!("<!{}>", pick(g, &["-- note --", "DOCTYPE html"]))),
                3 => source.push('\n'),
                _ => source.push_str(pick(g, WORDS)),
            }
        }
        Self(source)
    }
}

/// Properly nested source text and the number of blocks it should yield.
#[derive(Debug, Clone)]
struct Nested {
    source: String,
    pairs: usize,
}

const MATCHABLE: &[&str] = &["div", "SPAN", "b", "Table", "td", "em"];

fn nested(g: &mut Gen, depth: usize, source: &mut String) -> usize {
    let mut pairs = 0;
    for _ in 0..usize::arbitrary(g) % 4 {
        if depth > 0 && bool::arbitrary(g) {
            let name = pick(g, MATCHABLE);
            source.push_str(&start_tag(g, name));
            pairs += 1 + nested(g, depth - 1, source);
            source.push_str(&format!("</{}>", name.to_uppercase()));
        } else {
            source.push_str(pick(g, &["text", "\n", "<br>", "<p>"]));
        }
    }
    pairs
}

impl Arbitrary for Nested {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut source = String::new();
        let pairs = nested(g, 6, &mut source);
        Self { source, pairs }
    }
}

fn count(sequence: &ElementSequence, blocks: &mut usize, end_tags: &mut usize) {
    for element in sequence {
        match element {
            Element::Block(block) => {
                *blocks += 1;
                count(&block.body, blocks, end_tags);
            }
            Element::EndTag(_) => *end_tags += 1,
            _ => {}
        }
    }
}

fn collected(source: &str) -> Document {
    let mut doc = parse(source);
    doc.accept_mut(&mut Collector::new());
    doc
}

#[quickcheck]
fn prop_lexing_round_trips(source: Source) -> bool {
    parse(&source.0).to_string() == source.0
}

#[quickcheck]
fn prop_collecting_preserves_serialization(source: Source) -> bool {
    collected(&source.0).to_string() == source.0
}

#[quickcheck]
fn prop_collector_balance(input: Nested) -> bool {
    let doc = collected(&input.source);
    let (mut blocks, mut end_tags) = (0, 0);
    count(&doc.elements, &mut blocks, &mut end_tags);
    blocks == input.pairs && end_tags == 0
}

#[quickcheck]
fn prop_collector_leniency(input: Nested) -> bool {
    let source = format!("</stray>{}</stray>", input.source);
    let doc = collected(&source);
    let elements = doc.elements.as_slice();
    let stray = Element::end_tag("stray");
    elements.first() == Some(&stray) && elements.last() == Some(&stray)
}

#[quickcheck]
fn prop_scrubbing_is_idempotent(source: Source, bits: u8, collect: bool) -> bool {
    let options = ScrubOptions::from_bits_truncate(bits);
    let mut once = if collect { collected(&source.0) } else { parse(&source.0) };
    once.accept_mut(&mut Scrubber::new(options));
    let mut twice = once.clone();
    twice.accept_mut(&mut Scrubber::new(options));
    once == twice
}

#[test]
fn test_idempotence_for_every_flag_combination() {
    let mut g = Gen::new(40);
    for bits in 0..=ScrubOptions::all().bits() {
        let options = ScrubOptions::from_bits_truncate(bits);
        for _ in 0..10 {
            let mut once = collected(&Source::arbitrary(&mut g).0);
            once.accept_mut(&mut Scrubber::new(options));
            let mut twice = once.clone();
            twice.accept_mut(&mut Scrubber::new(options));
            assert_eq!(once, twice, "options {options:?}");
        }
    }
}

#[quickcheck]
fn prop_scrubbing_keeps_membership(source: Source) -> bool {
    let before = parse(&source.0);
    let mut after = before.clone();
    after.accept_mut(&mut Scrubber::new(ScrubOptions::all()));
    let kinds = |doc: &Document| doc.elements.iter().map(Element::kind).collect::<Vec<_>>();
    kinds(&before) == kinds(&after)
}
