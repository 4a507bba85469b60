use core::fmt;

use crate::element::Element;
use crate::visitor::{Visitor, VisitorMut};

/// An ordered, mutable run of elements.
///
/// Restructuring stages take the whole contents out with
/// [`take`](Self::take), rebuild them, and put the result back with
/// [`replace`](Self::replace).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSequence {
    elements: Vec<Element>,
}

impl ElementSequence {
    /// An empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// An empty sequence with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Number of top-level elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the sequence has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Iterate in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Iterate mutably in order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Element> {
        self.elements.iter_mut()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// Move every element out, leaving the sequence empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<Element> {
        core::mem::take(&mut self.elements)
    }

    /// Replace the contents wholesale.
    pub fn replace(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Consume the sequence, yielding its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<Element> {
        self.elements
    }

    /// Serialized length in characters of every element, recursively.
    #[must_use]
    pub fn length(&self) -> usize {
        self.elements.iter().map(Element::length).sum()
    }
}

impl From<Vec<Element>> for ElementSequence {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl FromIterator<Element> for ElementSequence {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Element> for ElementSequence {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl IntoIterator for ElementSequence {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementSequence {
    type Item = &'a Element;
    type IntoIter = core::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a mut ElementSequence {
    type Item = &'a mut Element;
    type IntoIter = core::slice::IterMut<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter_mut()
    }
}

impl fmt::Display for ElementSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

/// A whole document: the top-level element sequence plus the entry points
/// that run a visitor's lifecycle around a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// The top-level elements.
    pub elements: ElementSequence,
}

impl Document {
    /// Wrap a sequence as a document.
    #[must_use]
    pub const fn new(elements: ElementSequence) -> Self {
        Self { elements }
    }

    /// Run `visitor` over the document: `start()`, the element walk, then
    /// `finish()`.
    ///
    /// `finish()` runs even if the walk failed, so sinks are always flushed.
    ///
    /// # Errors
    ///
    /// Returns the walk's error if it failed, otherwise the error from
    /// `finish()`, if any.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.start();
        let walked = visitor.visit_sequence(&self.elements);
        let finished = visitor.finish();
        walked.and(finished)
    }

    /// Run a rewriting visitor over the document: `start()`, the element
    /// walk, then `finish()`.
    pub fn accept_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) {
        visitor.start();
        visitor.visit_sequence_mut(&mut self.elements);
        visitor.finish();
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        self.elements.length()
    }
}

impl From<ElementSequence> for Document {
    fn from(elements: ElementSequence) -> Self {
        Self { elements }
    }
}

impl From<Vec<Element>> for Document {
    fn from(elements: Vec<Element>) -> Self {
        Self {
            elements: elements.into(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.elements, f)
    }
}
