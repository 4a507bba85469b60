use std::io::Write;

use quill_dom::{Annotation, Comment, EndTag, Newline, Tag, TagBlock, Text, Visitor, walk_block};

use crate::error::{FormatError, Result};

/// Writes every element in its serialized form.
///
/// Dumping a document reproduces its text exactly.
#[derive(Debug)]
pub struct Dumper<W: Write> {
    out: W,
}

impl<W: Write> Dumper<W> {
    /// A dumper writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the dumper, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for Dumper<W> {
    type Error = FormatError;

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<()> {
        write!(self.out, "{tag}")?;
        Ok(())
    }

    fn visit_end_tag(&mut self, end: &EndTag) -> Result<()> {
        write!(self.out, "{end}")?;
        Ok(())
    }

    fn visit_comment(&mut self, comment: &Comment) -> Result<()> {
        write!(self.out, "{comment}")?;
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

/// Writes a labelled view of the element structure, for debugging the
/// lexer and the Collector.
///
/// Tags and end tags appear as `Tag(…)`, comments as `Comment(…)`, newlines
/// as `-NL-` at the end of a line, and every block is bracketed by
/// `<BLOCK>` and `</BLOCK>`.
#[derive(Debug)]
pub struct DebugDumper<W: Write> {
    out: W,
}

impl<W: Write> DebugDumper<W> {
    /// A debug dumper writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the dumper, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for DebugDumper<W> {
    type Error = FormatError;

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn visit_block(&mut self, block: &TagBlock) -> Result<()> {
        self.out.write_all(b"<BLOCK>")?;
        walk_block(self, block)?;
        self.out.write_all(b"</BLOCK>")?;
        Ok(())
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<()> {
        write!(self.out, "Tag({tag})")?;
        Ok(())
    }

    fn visit_end_tag(&mut self, end: &EndTag) -> Result<()> {
        write!(self.out, "Tag({end})")?;
        Ok(())
    }

    fn visit_comment(&mut self, comment: &Comment) -> Result<()> {
        write!(self.out, "Comment({comment})")?;
        Ok(())
    }

    fn visit_text(&mut self, text: &Text) -> Result<()> {
        self.out.write_all(text.text.as_bytes())?;
        Ok(())
    }

    fn visit_newline(&mut self, _newline: Newline) -> Result<()> {
        writeln!(self.out, "-NL-")?;
        Ok(())
    }

    fn visit_annotation(&mut self, annotation: &Annotation) -> Result<()> {
        write!(self.out, "{annotation}")?;
        Ok(())
    }
}
