//! Start and end tags in a flat sequence are paired into [`TagBlock`]s by
//! name. A start tag is only matched by the nearest enclosing unmatched start
//! tag of the same name; everything in between becomes the block's body, and
//! any start tags left open inside it stay in the body as plain tags. Nothing
//! is ever dropped, so the collected sequence serializes exactly like the
//! input.

use quill_common::warning::warn_once;
use quill_dom::{Annotation, Element, ElementSequence, TagBlock, TagSet, VisitorMut};

/// Tags that never open a block, however their end tags appear.
pub const NON_MATCHABLE: TagSet = TagSet::new(&[
    "AREA", "BASE", "BASEFONT", "BR", "COL", "HR", "IMG", "INPUT", "ISINDEX", "LINK", "META", "P",
    "PARAM",
]);

/// Default bound on block nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Annotation kind attached before an end tag that matched nothing.
pub const UNMATCHED_END_TAG: &str = "unmatched-end-tag";

/// A start tag still waiting for its end tag.
struct OpenTag {
    name: String,
    /// Position of the start tag in the output under construction.
    index: usize,
}

/// Groups matching start/end tag pairs into nested blocks.
///
/// ```
/// use quill_dom::{Element, ElementKind};
/// use quill_html::{Collector, parse};
///
/// let mut doc = parse("<b>bold <i>both</i></b>");
/// doc.accept_mut(&mut Collector::new());
/// assert_eq!(doc.elements.len(), 1);
/// assert_eq!(doc.elements.get(0).map(Element::kind), Some(ElementKind::Block));
/// assert_eq!(doc.to_string(), "<b>bold <i>both</i></b>");
/// ```
#[derive(Debug, Clone)]
pub struct Collector {
    max_depth: usize,
    annotate_unmatched: bool,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    /// A collector with the default depth bound and no annotations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            annotate_unmatched: false,
        }
    }

    /// Bound block nesting at `max_depth`. Start tags that would nest deeper
    /// are left as plain tags.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Insert an [`Annotation`] of kind [`UNMATCHED_END_TAG`] before every end
    /// tag that matches no open start tag.
    #[must_use]
    pub const fn with_unmatched_annotations(mut self) -> Self {
        self.annotate_unmatched = true;
        self
    }

    /// Collect a flat run of elements into blocks.
    ///
    /// Blocks already present are kept and their bodies collected in turn.
    #[must_use]
    pub fn collect(&self, elements: Vec<Element>) -> Vec<Element> {
        self.collect_at(elements, 0)
    }

    fn collect_at(&self, elements: Vec<Element>, depth: usize) -> Vec<Element> {
        let mut output: Vec<Element> = Vec::with_capacity(elements.len());
        let mut open: Vec<OpenTag> = Vec::new();

        for element in elements {
            match element {
                Element::Tag(tag) => {
                    if !tag.void && !NON_MATCHABLE.contains(&tag.name) {
                        if depth + open.len() < self.max_depth {
                            open.push(OpenTag {
                                name: tag.name.clone(),
                                index: output.len(),
                            });
                        } else {
                            warn_once("Collector", "nesting depth limit reached; tags left unmatched");
                        }
                    }
                    output.push(Element::Tag(tag));
                }
                Element::EndTag(end) => {
                    let Some(position) = open.iter().rposition(|o| end.is(&o.name)) else {
                        if self.annotate_unmatched {
                            output.push(Element::Annotation(Annotation::new(
                                UNMATCHED_END_TAG,
                                end.name.clone(),
                            )));
                        }
                        output.push(Element::EndTag(end));
                        continue;
                    };

                    let index = open[position].index;
                    // The match and everything opened after it are settled.
                    open.truncate(position);

                    let body = ElementSequence::from(output.split_off(index + 1));
                    match output.pop() {
                        Some(Element::Tag(start)) => {
                            output.push(Element::block(TagBlock::new(start, body, end)));
                        }
                        // Open entries always index a start tag; put things
                        // back unchanged if that ever fails to hold.
                        other => {
                            output.extend(other);
                            output.extend(body);
                            output.push(Element::EndTag(end));
                        }
                    }
                }
                Element::Block(mut block) => {
                    if depth < self.max_depth {
                        let body = block.body.take();
                        block.body.replace(self.collect_at(body, depth + 1));
                    } else {
                        warn_once("Collector", "nesting depth limit reached; tags left unmatched");
                    }
                    output.push(Element::Block(block));
                }
                other => output.push(other),
            }
        }

        output
    }
}

impl VisitorMut for Collector {
    fn visit_sequence_mut(&mut self, sequence: &mut ElementSequence) {
        let elements = sequence.take();
        sequence.replace(self.collect(elements));
    }
}
