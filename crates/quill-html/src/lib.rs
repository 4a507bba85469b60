//! HTML lexing, structuring, and normalization for the quill toolkit.
//!
//! # Scope
//!
//! This crate implements the stages that turn source text into a normalized
//! element tree:
//! - **Lexer** - source text to a flat [`ElementSequence`](quill_dom::ElementSequence)
//!   of tags, end tags, comments, text, and newlines. Lenient: it never fails.
//! - **Collector** - matches start and end tags into nested
//!   [`TagBlock`](quill_dom::TagBlock)s, leaving anything unmatched in place.
//! - **Scrubber** - normalizes tag/attribute case, attribute quoting, and
//!   leading whitespace in place.
//! - **Links** - extracts `href` targets of anchors.
//!
//! # Not Implemented
//!
//! - HTML5 tokenization rules (character references, foreign content)
//! - Tree-construction insertion modes; nesting is purely name matching

/// Tag-block structuring.
pub mod collector;
/// Source text to flat element sequence.
pub mod lexer;
/// Anchor target extraction.
pub mod links;
/// Case, quoting, and whitespace normalization.
pub mod scrubber;

pub use collector::{Collector, DEFAULT_MAX_DEPTH, NON_MATCHABLE, UNMATCHED_END_TAG};
pub use lexer::HtmlLexer;
pub use links::{LinkExtractor, extract_links};
pub use scrubber::{ScrubOptions, Scrubber};

use quill_dom::Document;

/// Lex `input` into a flat document.
///
/// ```
/// let doc = quill_html::parse("<b>bold</b>\n");
/// assert_eq!(doc.elements.len(), 4);
/// assert_eq!(doc.to_string(), "<b>bold</b>\n");
/// ```
#[must_use]
pub fn parse(input: &str) -> Document {
    let mut lexer = HtmlLexer::new(input.to_string());
    lexer.run();
    lexer.into_document()
}
