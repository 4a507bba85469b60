//! Element model and traversal contract for the quill HTML toolkit.
//!
//! # Design
//!
//! A document is a flat-or-nested [`ElementSequence`] of [`Element`]s. The
//! element kinds form a closed set: start [`Tag`], [`EndTag`], [`TagBlock`]
//! (a matched start/body/end run collapsed into one node), [`Comment`],
//! [`Text`], [`Newline`], and [`Annotation`].
//!
//! Processing stages are visitors:
//! - [`Visitor`] walks a document by shared reference and may fail (output
//!   sinks report their errors through it).
//! - [`VisitorMut`] walks by exclusive reference for in-place rewriting.
//!
//! Both provide a default structural walk for the two composite kinds
//! (blocks and sequences), so a visitor only overrides the kinds it cares
//! about.

/// Attributes and attribute lists.
pub mod attribute;
/// The element kinds.
pub mod element;
/// Ordered element containers and the document root.
pub mod sequence;
/// Case-insensitive constant tag-name sets.
pub mod tag_set;
/// The traversal contract.
pub mod visitor;

pub use attribute::{Attribute, AttributeList, dequote};
pub use element::{
    Annotation, Comment, Element, ElementKind, EndTag, NEWLINE, Newline, Tag, TagBlock, Text,
};
pub use sequence::{Document, ElementSequence};
pub use tag_set::{PREFORMATTED, TagSet};
pub use visitor::{
    Visitor, VisitorMut, walk_block, walk_block_mut, walk_element, walk_element_mut,
    walk_sequence, walk_sequence_mut,
};
