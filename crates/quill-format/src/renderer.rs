//! Before committing to a multi-line layout, the formatter asks whether a
//! whole block fits on what is left of the line. [`BlockRenderer`] answers by
//! concatenating the block's serialized leaves until they run out or the
//! target width is reached.

use core::fmt;

use quill_dom::{Comment, EndTag, Newline, Tag, TagBlock, Text, Visitor};

/// The rendered block reached the target width; the walk stops early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBlown;

impl fmt::Display for TargetBlown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("block does not fit the target width")
    }
}

/// Tentative single-line renderer.
///
/// ```
/// use quill_dom::{AttributeList, Element, Tag, TagBlock};
/// use quill_format::BlockRenderer;
///
/// let block = TagBlock::enclosing(
///     Tag::new("b", AttributeList::new()),
///     [Element::text("bold")].into_iter().collect(),
/// );
/// let mut renderer = BlockRenderer::new(20);
/// assert!(renderer.render(&block));
/// assert_eq!(renderer.as_str(), "<b>bold</b>");
///
/// renderer.set_target_width(8);
/// assert!(!renderer.render(&block));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockRenderer {
    rendered: String,
    /// Length of `rendered` in characters.
    width: usize,
    target_width: usize,
    multi_line: bool,
    blown: bool,
}

impl BlockRenderer {
    /// A renderer that gives up at `target_width` characters.
    #[must_use]
    pub const fn new(target_width: usize) -> Self {
        Self {
            rendered: String::new(),
            width: 0,
            target_width,
            multi_line: false,
            blown: false,
        }
    }

    /// Change the width at which rendering gives up.
    pub const fn set_target_width(&mut self, target_width: usize) {
        self.target_width = target_width;
    }

    /// Render `block` from scratch. Returns `true` if it fits.
    pub fn render(&mut self, block: &TagBlock) -> bool {
        self.start();
        self.visit_block(block).is_ok()
    }

    /// The rendering so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Whether the last render reached the target width.
    #[must_use]
    pub const fn has_blown_target(&self) -> bool {
        self.blown
    }

    /// Whether the last render met a line break, which it replaced with a
    /// space.
    #[must_use]
    pub const fn is_multi_line(&self) -> bool {
        self.multi_line
    }

    fn append(&mut self, piece: &str) -> Result<(), TargetBlown> {
        let width = piece.chars().count();
        if self.width.saturating_add(width) >= self.target_width {
            self.blown = true;
            return Err(TargetBlown);
        }
        self.rendered.push_str(piece);
        self.width += width;
        Ok(())
    }
}

impl Visitor for BlockRenderer {
    type Error = TargetBlown;

    fn start(&mut self) {
        self.rendered.clear();
        self.width = 0;
        self.multi_line = false;
        self.blown = false;
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<(), TargetBlown> {
        self.append(&tag.to_string())
    }

    fn visit_end_tag(&mut self, end: &EndTag) -> Result<(), TargetBlown> {
        self.append(&end.to_string())
    }

    fn visit_comment(&mut self, comment: &Comment) -> Result<(), TargetBlown> {
        self.append(&comment.to_string())
    }

    fn visit_text(&mut self, text: &Text) -> Result<(), TargetBlown> {
        self.append(&text.text)
    }

    fn visit_newline(&mut self, _newline: Newline) -> Result<(), TargetBlown> {
        self.multi_line = true;
        self.rendered.push(' ');
        self.width += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quill_dom::{AttributeList, Element};

    use super::*;

    fn block(body: Vec<Element>) -> TagBlock {
        TagBlock::enclosing(Tag::new("a", AttributeList::new()), body.into())
    }

    #[test]
    fn test_fits_strictly_below_target() {
        // "<a>" + "xxxx" + "</a>" is 11 characters.
        let sample = block(vec![Element::text("xxxx")]);
        assert!(BlockRenderer::new(12).render(&sample));
        assert!(!BlockRenderer::new(11).render(&sample));
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        // "<a>" + three accented letters + "</a>" is 10 characters, 13 bytes.
        let sample = block(vec![Element::text("\u{e9}\u{e9}\u{e9}")]);
        let mut renderer = BlockRenderer::new(11);
        assert!(renderer.render(&sample));
        assert_eq!(renderer.as_str(), "<a>\u{e9}\u{e9}\u{e9}</a>");
        assert!(!BlockRenderer::new(10).render(&sample));
    }

    #[test]
    fn test_newline_becomes_space_and_marks_multi_line() {
        let mut renderer = BlockRenderer::new(80);
        assert!(renderer.render(&block(vec![
            Element::text("a"),
            Element::newline(),
            Element::text("b")
        ])));
        assert_eq!(renderer.as_str(), "<a>a b</a>");
        assert!(renderer.is_multi_line());
        assert!(!renderer.has_blown_target());
    }

    #[test]
    fn test_render_resets_state() {
        let mut renderer = BlockRenderer::new(5);
        assert!(!renderer.render(&block(vec![Element::text("long text")])));
        assert!(renderer.has_blown_target());
        renderer.set_target_width(80);
        assert!(renderer.render(&block(Vec::new())));
        assert_eq!(renderer.as_str(), "<a></a>");
        assert!(!renderer.is_multi_line());
    }

    #[test]
    fn test_zero_target_always_blows() {
        assert!(!BlockRenderer::new(0).render(&block(Vec::new())));
    }

    #[test]
    fn test_nested_blocks_render_flat() {
        let inner = TagBlock::enclosing(
            Tag::new("b", AttributeList::new()),
            [Element::text("x")].into_iter().collect(),
        );
        let mut renderer = BlockRenderer::new(80);
        assert!(renderer.render(&block(vec![Element::block(inner), Element::comment("c")])));
        assert_eq!(renderer.as_str(), "<a><b>x</b><!c></a>");
    }
}
