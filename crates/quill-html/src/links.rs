use core::convert::Infallible;

use quill_dom::{Attribute, Document, Tag, Visitor};

/// Collects the `href` target of every anchor, in document order.
///
/// Every `HREF` attribute of every `A` tag counts, with one layer of quotes
/// removed; valueless `HREF` attributes are skipped.
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    links: Vec<String>,
}

impl LinkExtractor {
    /// An extractor with no links yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Links found so far.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Consume the extractor, yielding the links.
    #[must_use]
    pub fn into_links(self) -> Vec<String> {
        self.links
    }
}

impl Visitor for LinkExtractor {
    type Error = Infallible;

    fn start(&mut self) {
        self.links.clear();
    }

    fn visit_tag(&mut self, tag: &Tag) -> Result<(), Infallible> {
        if tag.is("A") {
            self.links.extend(
                tag.attributes
                    .iter()
                    .filter(|attribute| attribute.name.eq_ignore_ascii_case("HREF"))
                    .filter_map(Attribute::unquoted_value)
                    .map(str::to_string),
            );
        }
        Ok(())
    }
}

/// Every anchor target in `document`.
///
/// ```
/// let doc = quill_html::parse("<a href='r1'>ref1</a> <A HREF=\"r2\">ref2</A>");
/// assert_eq!(quill_html::extract_links(&doc), ["r1", "r2"]);
/// ```
#[must_use]
pub fn extract_links(document: &Document) -> Vec<String> {
    let mut extractor = LinkExtractor::new();
    match document.accept(&mut extractor) {
        Ok(()) => extractor.into_links(),
        Err(never) => match never {},
    }
}
