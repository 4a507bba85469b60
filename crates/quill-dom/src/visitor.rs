//! Every element kind has a `visit_*` hook with a no-op default. The two
//! composite kinds, [`TagBlock`] and [`ElementSequence`], default to a
//! structural walk: a block visits its start tag, then its body, then its end
//! tag; a sequence visits each member in order. A visitor that overrides a
//! composite hook can still call the matching `walk_*` function to get the
//! default behavior.
//!
//! [`start`](Visitor::start) and [`finish`](Visitor::finish) bracket a whole
//! document walk; use them to reset per-walk state and to flush output.
//! [`Document::accept`](crate::Document::accept) drives that lifecycle.

use crate::element::{Annotation, Comment, Element, EndTag, Newline, Tag, TagBlock, Text};
use crate::sequence::ElementSequence;

/// A read-only visitor.
///
/// Visitors that write output use their sink's error type for `Error`;
/// visitors that cannot fail use [`core::convert::Infallible`].
pub trait Visitor {
    /// Error produced by a failed visit.
    type Error;

    /// Called once before a document walk.
    fn start(&mut self) {}

    /// Called once after a document walk, even if the walk failed.
    ///
    /// # Errors
    ///
    /// Implementations report sink failures (for example a failed flush).
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a start tag.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_tag(&mut self, _tag: &Tag) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit an end tag.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_end_tag(&mut self, _end: &EndTag) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a comment.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_comment(&mut self, _comment: &Comment) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a text run.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_text(&mut self, _text: &Text) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a newline.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_newline(&mut self, _newline: Newline) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit an annotation.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_annotation(&mut self, _annotation: &Annotation) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a block. Defaults to [`walk_block`].
    ///
    /// # Errors
    ///
    /// Propagates the first error from the walk.
    fn visit_block(&mut self, block: &TagBlock) -> Result<(), Self::Error> {
        walk_block(self, block)
    }

    /// Visit a sequence. Defaults to [`walk_sequence`].
    ///
    /// # Errors
    ///
    /// Propagates the first error from the walk.
    fn visit_sequence(&mut self, sequence: &ElementSequence) -> Result<(), Self::Error> {
        walk_sequence(self, sequence)
    }

    /// Dispatch one element to its kind's hook. Defaults to [`walk_element`].
    ///
    /// # Errors
    ///
    /// Propagates the hook's error.
    fn visit_element(&mut self, element: &Element) -> Result<(), Self::Error> {
        walk_element(self, element)
    }
}

/// Dispatch `element` to the visitor hook for its kind.
///
/// # Errors
///
/// Propagates the hook's error.
pub fn walk_element<V: Visitor + ?Sized>(visitor: &mut V, element: &Element) -> Result<(), V::Error> {
    match element {
        Element::Tag(tag) => visitor.visit_tag(tag),
        Element::EndTag(end) => visitor.visit_end_tag(end),
        Element::Block(block) => visitor.visit_block(block),
        Element::Comment(comment) => visitor.visit_comment(comment),
        Element::Text(text) => visitor.visit_text(text),
        Element::Newline(newline) => visitor.visit_newline(*newline),
        Element::Annotation(annotation) => visitor.visit_annotation(annotation),
    }
}

/// Visit a block's start tag, then its body, then its end tag.
///
/// # Errors
///
/// Stops at and returns the first error.
pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &TagBlock) -> Result<(), V::Error> {
    visitor.visit_tag(&block.start)?;
    visitor.visit_sequence(&block.body)?;
    visitor.visit_end_tag(&block.end)
}

/// Visit each member of a sequence in order.
///
/// # Errors
///
/// Stops at and returns the first error.
pub fn walk_sequence<V: Visitor + ?Sized>(
    visitor: &mut V,
    sequence: &ElementSequence,
) -> Result<(), V::Error> {
    for element in sequence {
        visitor.visit_element(element)?;
    }
    Ok(())
}

/// A visitor that rewrites elements in place.
///
/// In-place rewriting cannot fail, so there is no error type.
pub trait VisitorMut {
    /// Called once before a document walk.
    fn start(&mut self) {}

    /// Called once after a document walk.
    fn finish(&mut self) {}

    /// Visit a start tag.
    fn visit_tag_mut(&mut self, _tag: &mut Tag) {}

    /// Visit an end tag.
    fn visit_end_tag_mut(&mut self, _end: &mut EndTag) {}

    /// Visit a comment.
    fn visit_comment_mut(&mut self, _comment: &mut Comment) {}

    /// Visit a text run.
    fn visit_text_mut(&mut self, _text: &mut Text) {}

    /// Visit a newline.
    fn visit_newline_mut(&mut self, _newline: &mut Newline) {}

    /// Visit an annotation.
    fn visit_annotation_mut(&mut self, _annotation: &mut Annotation) {}

    /// Visit a block. Defaults to [`walk_block_mut`].
    fn visit_block_mut(&mut self, block: &mut TagBlock) {
        walk_block_mut(self, block);
    }

    /// Visit a sequence. Defaults to [`walk_sequence_mut`].
    fn visit_sequence_mut(&mut self, sequence: &mut ElementSequence) {
        walk_sequence_mut(self, sequence);
    }

    /// Dispatch one element to its kind's hook. Defaults to
    /// [`walk_element_mut`].
    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }
}

/// Dispatch `element` to the rewriting hook for its kind.
pub fn walk_element_mut<V: VisitorMut + ?Sized>(visitor: &mut V, element: &mut Element) {
    match element {
        Element::Tag(tag) => visitor.visit_tag_mut(tag),
        Element::EndTag(end) => visitor.visit_end_tag_mut(end),
        Element::Block(block) => visitor.visit_block_mut(block),
        Element::Comment(comment) => visitor.visit_comment_mut(comment),
        Element::Text(text) => visitor.visit_text_mut(text),
        Element::Newline(newline) => visitor.visit_newline_mut(newline),
        Element::Annotation(annotation) => visitor.visit_annotation_mut(annotation),
    }
}

/// Rewrite a block's start tag, then its body, then its end tag.
pub fn walk_block_mut<V: VisitorMut + ?Sized>(visitor: &mut V, block: &mut TagBlock) {
    visitor.visit_tag_mut(&mut block.start);
    visitor.visit_sequence_mut(&mut block.body);
    visitor.visit_end_tag_mut(&mut block.end);
}

/// Rewrite each member of a sequence in order.
pub fn walk_sequence_mut<V: VisitorMut + ?Sized>(visitor: &mut V, sequence: &mut ElementSequence) {
    for element in sequence {
        visitor.visit_element_mut(element);
    }
}
