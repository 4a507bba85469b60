//! A dumper that keeps only legacy HTML markup.
//!
//! Blocks and tags outside a fixed allowlist of HTML 1 and 4 tags are
//! unwrapped (their content is kept), styling attributes are dropped, and
//! comments, STYLE blocks, and blocks with nothing but spaces in them
//! disappear. The result is meant to be lexed, collected, and formatted
//! again.

use std::io::Write;

use quill_dom::{
    Annotation, Comment, EndTag, Newline, Tag, TagBlock, TagSet, Text, Visitor, walk_block,
};

use crate::error::{FormatError, Result};

/// Tags kept by the stripper: the legacy void tags plus the legacy block
/// tags.
pub const ALLOWED: TagSet = TagSet::new(&[
    // void
    "AREA", "BASE", "BASEFONT", "BR", "COL", "HR", "IMG", "INPUT", "ISINDEX", "LINK", "META",
    "PARAM", "NEXTID", "PLAINTEXT",
    // block
    "A", "ADDRESS", "B", "BLOCKQUOTE", "BODY", "CITE", "CODE", "DD", "DFN", "DIR", "DL", "DT", "EM",
    "H1", "H2", "H3", "H4", "H5", "H6", "HEAD", "HTML", "I", "KBD", "KEY", "LI", "LISTING", "MENU",
    "OL", "P", "PRE", "SAMP", "STRONG", "TITLE", "TABLE", "TR", "TH", "TD", "TT", "U", "UL", "VAR",
    "XMP",
]);

/// Attributes removed from every kept tag.
pub const STRIPPED_ATTRIBUTES: TagSet = TagSet::new(&["STYLE", "CLASS", "MSONORMAL"]);

/// Whether `text` is nothing but spaces and `&nbsp;` entities.
fn is_blank(text: &str) -> bool {
    let lower = text.to_lowercase();
    let mut rest = lower.as_str();
    loop {
        if let Some(tail) = rest.strip_prefix("&nbsp;") {
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(' ') {
            rest = tail;
        } else {
            return rest.is_empty();
        }
    }
}

/// Allowlist-based stripping dumper.
#[derive(Debug)]
pub struct Stripper<W: Write> {
    out: W,
}

impl<W: Write> Stripper<W> {
    /// A stripper writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the stripper, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for Stripper<W> {
    type Error = FormatError;

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn visit_block(&mut self, block: &TagBlock) -> Result<()> {
        if block.is("STYLE") || is_blank(&block.text()) {
            Ok(())
        } else if ALLOWED.contains(block.name()) {
            walk_block(self, block)
        } else {
            self.visit_sequence(&block.body)
        }
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<()> {
        if !ALLOWED.contains(&tag.name) {
            return Ok(());
        }

        write!(self.out, "<{}", tag.name)?;
        if !tag.is("HTML") {
            for attribute in &tag.attributes {
                if !STRIPPED_ATTRIBUTES.contains(&attribute.name) {
                    write!(self.out, " {attribute}")?;
                }
            }
        }
        if tag.void {
            self.out.write_all(b"/")?;
        }
        self.out.write_all(b">")?;
        Ok(())
    }

    fn visit_end_tag(&mut self, end: &EndTag) -> Result<()> {
        if ALLOWED.contains(&end.name) {
            write!(self.out, "{end}")?;
        }
        Ok(())
    }

    fn visit_comment(&mut self, _comment: &Comment) -> Result<()> {
        Ok(())
    }

    fn visit_text(&mut self, text: &Text) -> Result<()> {
        self.out.write_all(text.text.as_bytes())?;
        Ok(())
    }

    fn visit_newline(&mut self, _newline: Newline) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    fn visit_annotation(&mut self, annotation: &Annotation) -> Result<()> {
        write!(self.out, "{annotation}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quill_html::{Collector, parse};

    use super::*;
    use crate::strip_to_string;

    fn strip(input: &str) -> String {
        let mut doc = parse(input);
        doc.accept_mut(&mut Collector::new());
        strip_to_string(&doc).unwrap()
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank(" &NBSP; &nbsp;"));
        assert!(!is_blank("&nbsp;x"));
        assert!(!is_blank("\t"));
    }

    #[test]
    fn test_unknown_blocks_are_unwrapped() {
        assert_eq!(strip("<div><span>x</span></div>"), "x");
        assert_eq!(strip("<div><b>x</b></div>"), "<b>x</b>");
    }

    #[test]
    fn test_style_and_blank_blocks_are_dropped() {
        assert_eq!(strip("<style>b { }</style>a<b> &nbsp; </b>z"), "az");
    }

    #[test]
    fn test_styling_attributes_are_dropped() {
        assert_eq!(
            strip("<p class=x style='s' align=center>t"),
            "<p align=center>t"
        );
        assert_eq!(strip("<html lang=en></html>"), "");
        assert_eq!(strip("<html lang=en><b>x</b></html>"), "<html><b>x</b></html>");
    }

    #[test]
    fn test_unmatched_end_tags_outside_allowlist_are_omitted() {
        assert_eq!(strip("a</font>b</P>c</span>"), "ab</P>c");
    }

    #[test]
    fn test_comments_and_unknown_tags_are_omitted() {
        assert_eq!(strip("<!-- c -->a<font size=2>b<br/>\n"), "ab<br/>\n");
    }
}
