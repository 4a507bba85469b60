//! The pretty-printer.
//!
//! Layout decisions are driven by four constant tag sets. A block whose tag
//! is in [`INLINE_TRY`] is first rendered tentatively on one line and kept
//! that way if it fits. Otherwise a block in [`INDENT_BLOCK`] gets its own
//! lines with an indented body, a [`PREFORMATTED`] block is written with its
//! layout untouched, and anything else flows inline. Tags in
//! [`NEWLINE_BEFORE`] start a new line, and their end tags are followed by a
//! blank line.

use std::io::Write;

use quill_dom::{
    Comment, ElementKind, EndTag, Newline, PREFORMATTED, Tag, TagBlock, TagSet, Text, Visitor,
    walk_block,
};
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};
use crate::renderer::BlockRenderer;
use crate::writer::MarginWriter;

/// Blocks laid out on their own lines with an indented body.
pub const INDENT_BLOCK: TagSet = TagSet::new(&[
    "TABLE", "TR", "TD", "TH", "FORM", "HTML", "HEAD", "BODY", "SELECT",
]);

/// Tags that start on a fresh line; their end tags add a blank line.
pub const NEWLINE_BEFORE: TagSet = TagSet::new(&["P", "H1", "H2", "H3", "H4", "H5", "H6", "BR"]);

/// Blocks that are kept on one line when they fit.
pub const INLINE_TRY: TagSet = TagSet::new(&["A", "TD", "TH", "TR", "I", "B", "EM", "FONT", "TT", "UL"]);

/// Formatter settings.
///
/// All fields are optional when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Wrap column. `usize::MAX` disables wrapping.
    pub right_margin: usize,
    /// Extra indentation per indented block. 0 keeps everything flush left.
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatOptions {
    /// Right margin 80, indent 2.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            right_margin: 80,
            indent: 2,
        }
    }

    /// Override the right margin.
    #[must_use]
    pub const fn with_right_margin(mut self, right_margin: usize) -> Self {
        self.right_margin = right_margin;
        self
    }

    /// Override the indent step.
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Margin-aware pretty-printer over any sink.
///
/// Expects a collected document; a flat one is formatted tag by tag.
#[derive(Debug)]
pub struct HtmlFormatter<W: Write> {
    out: MarginWriter<W>,
    options: FormatOptions,
    renderer: BlockRenderer,
    previous: Option<ElementKind>,
    in_preformatted: bool,
}

impl<W: Write> HtmlFormatter<W> {
    /// A formatter writing to `out`.
    #[must_use]
    pub const fn new(out: W, options: FormatOptions) -> Self {
        Self {
            out: MarginWriter::new(out, options.right_margin),
            options,
            renderer: BlockRenderer::new(options.right_margin),
            previous: None,
            in_preformatted: false,
        }
    }

    /// The settings in use.
    #[must_use]
    pub const fn options(&self) -> FormatOptions {
        self.options
    }

    /// The sink.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        self.out.get_ref()
    }

    /// Consume the formatter, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Lay out `block` on one line if it fits in what is left of the margins.
    fn try_single_line(&mut self, block: &TagBlock) -> Result<bool> {
        let available = self.out.right_margin().saturating_sub(self.out.left_margin());
        self.renderer.set_target_width(available);
        if !self.renderer.render(block) {
            return Ok(false);
        }
        self.out.print_wrapped(self.renderer.as_str())?;
        self.previous = Some(ElementKind::EndTag);
        Ok(true)
    }

    fn preformatted_block(&mut self, block: &TagBlock) -> Result<()> {
        let outer = core::mem::replace(&mut self.in_preformatted, true);
        self.visit_tag(&block.start)?;
        let margin = self.out.left_margin();
        self.out.set_left_margin(0);
        self.visit_sequence(&block.body)?;
        self.out.set_left_margin(margin);
        self.visit_end_tag(&block.end)?;
        self.in_preformatted = outer;
        Ok(())
    }

    fn indented_block(&mut self, block: &TagBlock) -> Result<()> {
        self.out.println_soft()?;
        self.visit_tag(&block.start)?;
        self.out.println_soft()?;
        let margin = self.out.left_margin();
        self.out
            .set_left_margin(margin.saturating_add(self.options.indent));
        self.visit_sequence(&block.body)?;
        self.out.set_left_margin(margin);
        self.out.println_soft()?;
        self.visit_end_tag(&block.end)?;
        self.out.println_soft()?;
        Ok(())
    }
}

impl<W: Write> Visitor for HtmlFormatter<W> {
    type Error = FormatError;

    fn start(&mut self) {
        self.previous = None;
        self.in_preformatted = false;
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn visit_block(&mut self, block: &TagBlock) -> Result<()> {
        if INLINE_TRY.contains(block.name()) && self.try_single_line(block)? {
            return Ok(());
        }

        if PREFORMATTED.contains(block.name()) {
            self.preformatted_block(block)
        } else if INDENT_BLOCK.contains(block.name()) {
            self.indented_block(block)
        } else {
            walk_block(self, block)
        }
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<()> {
        if NEWLINE_BEFORE.contains(&tag.name)
            || self.out.cur_position().saturating_add(tag.length()) > self.out.right_margin()
        {
            self.out.println_soft()?;
        }

        self.out.print("<")?;
        self.out.print(&tag.name)?;

        // The closing bracket rides with the last attribute so that it wraps
        // along with it.
        let close = if tag.void { "/>" } else { ">" };
        let hanging = tag.name.chars().count() + 1;
        let last = tag.attributes.len().saturating_sub(1);
        for (index, attribute) in tag.attributes.iter().enumerate() {
            let piece = if index == last {
                format!(" {attribute}{close}")
            } else {
                format!(" {attribute}")
            };
            self.out.print_wrapped_hanging(&piece, hanging)?;
        }
        if tag.attributes.is_empty() {
            self.out.print(close)?;
        }

        self.previous = Some(ElementKind::Tag);
        Ok(())
    }

    fn visit_end_tag(&mut self, end: &EndTag) -> Result<()> {
        self.out.print_wrapped(&end.to_string())?;
        if NEWLINE_BEFORE.contains(&end.name) {
            self.out.println_soft()?;
            self.out.println()?;
        }
        self.previous = Some(ElementKind::EndTag);
        Ok(())
    }

    fn visit_comment(&mut self, comment: &Comment) -> Result<()> {
        self.out.print_wrapped(&comment.to_string())?;
        self.previous = Some(ElementKind::Comment);
        Ok(())
    }

    fn visit_text(&mut self, text: &Text) -> Result<()> {
        if self.in_preformatted {
            self.out.print(&text.text)?;
        } else {
            for word in text.text.split_inclusive(' ') {
                self.out.print_wrapped(word)?;
            }
        }
        self.previous = Some(ElementKind::Text);
        Ok(())
    }

    fn visit_newline(&mut self, _newline: Newline) -> Result<()> {
        if self.in_preformatted {
            self.out.println()?;
        } else {
            match self.previous {
                Some(
                    ElementKind::Tag | ElementKind::EndTag | ElementKind::Comment | ElementKind::Newline,
                ) => self.out.println_soft()?,
                Some(ElementKind::Text) => self.out.print(" ")?,
                _ => {}
            }
        }
        self.previous = Some(ElementKind::Newline);
        Ok(())
    }
}
