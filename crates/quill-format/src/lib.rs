//! Output stages for the quill toolkit.
//!
//! # Scope
//!
//! - [`HtmlFormatter`] - pretty-prints a collected document within a right
//!   margin, trying to keep short blocks on one line and indenting
//!   structural blocks.
//! - [`Dumper`] - writes every element back out unchanged.
//! - [`DebugDumper`] - writes a labelled view of the element structure.
//! - [`Stripper`] - writes only a legacy allowlist of tags and attributes.
//!
//! All of them are [`Visitor`](quill_dom::Visitor)s over any
//! [`std::io::Write`] sink and report sink failures as [`FormatError`].

/// Plain and debug dumpers.
pub mod dumper;
/// Sink failures.
pub mod error;
/// The margin-aware formatter.
pub mod formatter;
/// Tentative single-line rendering of blocks.
pub mod renderer;
/// Allowlist-based stripping dumper.
pub mod stripper;
/// Column-tracking output.
pub mod writer;

pub use dumper::{DebugDumper, Dumper};
pub use error::{FormatError, Result};
pub use formatter::{FormatOptions, HtmlFormatter, INDENT_BLOCK, INLINE_TRY, NEWLINE_BEFORE};
pub use renderer::{BlockRenderer, TargetBlown};
pub use stripper::Stripper;
pub use writer::MarginWriter;

use quill_dom::{Document, Visitor};

/// Run `visitor` over `document` into an in-memory buffer and return what it
/// wrote.
///
/// `make` receives the buffer and returns the visitor; `into_inner` gets the
/// buffer back afterwards.
fn render_with<V>(
    document: &Document,
    make: impl FnOnce(Vec<u8>) -> V,
    into_inner: impl FnOnce(V) -> Vec<u8>,
) -> Result<String>
where
    V: Visitor<Error = FormatError>,
{
    let mut visitor = make(Vec::new());
    document.accept(&mut visitor)?;
    Ok(String::from_utf8_lossy(&into_inner(visitor)).into_owned())
}

/// Format `document` to a string.
///
/// ```
/// use quill_format::{FormatOptions, format_to_string};
///
/// let doc = quill_html::parse("<p>One</p><p>Two</p>");
/// let out = format_to_string(&doc, FormatOptions::default()).unwrap();
/// assert_eq!(out, "<p>One</p>\n\n<p>Two</p>\n\n");
/// ```
///
/// # Errors
///
/// Only sink failures are errors, and an in-memory sink does not fail.
pub fn format_to_string(document: &Document, options: FormatOptions) -> Result<String> {
    render_with(
        document,
        |buffer| HtmlFormatter::new(buffer, options),
        HtmlFormatter::into_inner,
    )
}

/// Dump `document` unchanged to a string.
///
/// # Errors
///
/// Only sink failures are errors, and an in-memory sink does not fail.
pub fn dump_to_string(document: &Document) -> Result<String> {
    render_with(document, Dumper::new, Dumper::into_inner)
}

/// Dump the labelled structure of `document` to a string.
///
/// # Errors
///
/// Only sink failures are errors, and an in-memory sink does not fail.
pub fn debug_to_string(document: &Document) -> Result<String> {
    render_with(document, DebugDumper::new, DebugDumper::into_inner)
}

/// Strip `document` to its allowlisted markup and return the result.
///
/// # Errors
///
/// Only sink failures are errors, and an in-memory sink does not fail.
pub fn strip_to_string(document: &Document) -> Result<String> {
    render_with(document, Stripper::new, Stripper::into_inner)
}
