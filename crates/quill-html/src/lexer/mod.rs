//! Lenient HTML lexer.
//!
//! Turns source text into a flat sequence of [`Tag`](quill_dom::Tag),
//! [`EndTag`](quill_dom::EndTag), [`Comment`](quill_dom::Comment),
//! [`Text`](quill_dom::Text), and [`Newline`](quill_dom::Newline) elements.
//! The lexer never fails: anything that cannot be read as markup is kept as
//! text, so serializing the output reproduces the input for well-formed
//! documents.

/// Lexer state machine and entry points.
pub mod machine;
/// Input, emission, and raw-text helpers.
pub mod helpers;

pub use machine::{HtmlLexer, LexerState};
