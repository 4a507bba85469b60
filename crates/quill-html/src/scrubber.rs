//! In-place normalization of a document.
//!
//! The scrubber rewrites tag names, attribute names, attribute quoting, and
//! leading whitespace of text. It never adds, removes, or reorders elements.

use bitflags::bitflags;
use quill_dom::{
    Annotation, Attribute, Comment, ElementKind, EndTag, Newline, PREFORMATTED, Tag, TagBlock, Text,
    VisitorMut, dequote, walk_block_mut,
};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Scrubbing options. Combine with `|`.
    ///
    /// When both the upper- and lowercase flag of a pair are set, uppercase
    /// wins. Serialized as flag names joined by `|`, for example
    /// `"TAGS_LOWERCASE | TRIM_SPACES"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ScrubOptions: u8 {
        /// Uppercase tag and end-tag names.
        const TAGS_UPPERCASE = 1;
        /// Lowercase tag and end-tag names.
        const TAGS_LOWERCASE = 1 << 1;
        /// Uppercase attribute names.
        const ATTRS_UPPERCASE = 1 << 2;
        /// Lowercase attribute names.
        const ATTRS_LOWERCASE = 1 << 3;
        /// Remove quotes around values that read the same without them.
        const STRIP_QUOTES = 1 << 4;
        /// Remove leading spaces and tabs from text that follows markup or a
        /// line break, outside preformatted blocks.
        const TRIM_SPACES = 1 << 5;
        /// Double-quote every attribute value.
        const QUOTE_ATTRS = 1 << 6;
    }
}

impl Default for ScrubOptions {
    fn default() -> Self {
        Self::TAGS_LOWERCASE | Self::ATTRS_LOWERCASE | Self::STRIP_QUOTES
    }
}

/// Normalizes case, quoting, and whitespace in place.
///
/// ```
/// use quill_html::{Scrubber, ScrubOptions, parse};
///
/// let mut doc = parse("<A HREF=\"top\">Up</A>");
/// doc.accept_mut(&mut Scrubber::new(ScrubOptions::default()));
/// assert_eq!(doc.to_string(), "<a href=top>Up</a>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    options: ScrubOptions,
    previous: Option<ElementKind>,
    in_preformatted: bool,
}

impl Scrubber {
    /// A scrubber applying `options`.
    #[must_use]
    pub const fn new(options: ScrubOptions) -> Self {
        Self {
            options,
            previous: None,
            in_preformatted: false,
        }
    }

    /// The options this scrubber applies.
    #[must_use]
    pub const fn options(&self) -> ScrubOptions {
        self.options
    }

    fn normalize_tag_name(&self, name: &mut String) {
        if self.options.contains(ScrubOptions::TAGS_UPPERCASE) {
            *name = name.to_uppercase();
        } else if self.options.contains(ScrubOptions::TAGS_LOWERCASE) {
            *name = name.to_lowercase();
        }
    }

    fn normalize_attribute(&self, attribute: &mut Attribute) {
        if self.options.contains(ScrubOptions::ATTRS_UPPERCASE) {
            attribute.name = attribute.name.to_uppercase();
        } else if self.options.contains(ScrubOptions::ATTRS_LOWERCASE) {
            attribute.name = attribute.name.to_lowercase();
        }

        let Some(value) = attribute.value.as_mut() else {
            return;
        };

        if self.options.contains(ScrubOptions::STRIP_QUOTES)
            && is_quoted(value)
            && safe_to_unquote(value)
        {
            *value = dequote(value).to_string();
        }

        if self.options.contains(ScrubOptions::QUOTE_ATTRS) && !is_quoted_with(value, '"') {
            let bare = if is_quoted_with(value, '\'') {
                dequote(value)
            } else {
                value.as_str()
            };
            *value = format!("\"{bare}\"");
        }
    }
}

fn is_quoted_with(value: &str, quote: char) -> bool {
    value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote)
}

fn is_quoted(value: &str) -> bool {
    is_quoted_with(value, '"') || is_quoted_with(value, '\'')
}

/// Whether a quoted value reads the same without its quotes: the interior is
/// non-empty identifier text that does not mix upper- and lowercase letters.
fn safe_to_unquote(quoted: &str) -> bool {
    let interior = dequote(quoted);
    let mut upper = false;
    let mut lower = false;
    for c in interior.chars() {
        if !(c.is_alphanumeric() || c == '_') {
            return false;
        }
        upper |= c.is_uppercase();
        lower |= c.is_lowercase();
    }
    !interior.is_empty() && !(upper && lower)
}

impl VisitorMut for Scrubber {
    fn start(&mut self) {
        self.previous = None;
        self.in_preformatted = false;
    }

    fn visit_tag_mut(&mut self, tag: &mut Tag) {
        self.normalize_tag_name(&mut tag.name);
        for attribute in &mut tag.attributes {
            self.normalize_attribute(attribute);
        }
        self.previous = Some(ElementKind::Tag);
    }

    fn visit_end_tag_mut(&mut self, end: &mut EndTag) {
        self.normalize_tag_name(&mut end.name);
        self.previous = Some(ElementKind::EndTag);
    }

    fn visit_comment_mut(&mut self, _comment: &mut Comment) {
        self.previous = Some(ElementKind::Comment);
    }

    fn visit_text_mut(&mut self, text: &mut Text) {
        let follows_markup = matches!(
            self.previous,
            Some(ElementKind::Newline | ElementKind::Tag | ElementKind::EndTag | ElementKind::Comment)
        );
        if self.options.contains(ScrubOptions::TRIM_SPACES) && !self.in_preformatted && follows_markup
        {
            let trimmed = text.text.trim_start_matches([' ', '\t']);
            if trimmed.len() != text.text.len() {
                text.text = trimmed.to_string();
            }
        }
        self.previous = Some(ElementKind::Text);
    }

    fn visit_newline_mut(&mut self, _newline: &mut Newline) {
        self.previous = Some(ElementKind::Newline);
    }

    fn visit_annotation_mut(&mut self, _annotation: &mut Annotation) {
        self.previous = Some(ElementKind::Annotation);
    }

    fn visit_block_mut(&mut self, block: &mut TagBlock) {
        if PREFORMATTED.contains(block.name()) {
            let outer = core::mem::replace(&mut self.in_preformatted, true);
            walk_block_mut(self, block);
            self.in_preformatted = outer;
        } else {
            walk_block_mut(self, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_dom::{AttributeList, Document, Element, ElementSequence};

    use super::*;
    use crate::parse;

    fn scrub(input: &str, options: ScrubOptions) -> String {
        let mut doc = parse(input);
        doc.accept_mut(&mut Scrubber::new(options));
        doc.to_string()
    }

    fn scrub_attribute(attribute: Attribute, options: ScrubOptions) -> Attribute {
        let tag = Tag::new("a", [attribute].into_iter().collect::<AttributeList>());
        let mut doc = Document::from(vec![Element::Tag(tag)]);
        doc.accept_mut(&mut Scrubber::new(options));
        match doc.elements.into_vec().remove(0) {
            Element::Tag(tag) => tag.attributes.iter().next().cloned().expect("one attribute"),
            other => panic!("expected a tag, got {other:?}"),
        }
    }

    #[test]
    fn test_default_options() {
        assert_eq!(
            ScrubOptions::default(),
            ScrubOptions::TAGS_LOWERCASE | ScrubOptions::ATTRS_LOWERCASE | ScrubOptions::STRIP_QUOTES
        );
    }

    #[test]
    fn test_case_flags() {
        assert_eq!(
            scrub("<Div Class=x></DIV>", ScrubOptions::TAGS_UPPERCASE),
            "<DIV Class=x></DIV>"
        );
        assert_eq!(
            scrub("<Div Class=x></DIV>", ScrubOptions::ATTRS_LOWERCASE | ScrubOptions::TAGS_LOWERCASE),
            "<div class=x></div>"
        );
        // Uppercase wins when both are requested.
        assert_eq!(
            scrub("<Div Class=x>", ScrubOptions::all()),
            "<DIV CLASS=\"x\">"
        );
    }

    #[test]
    fn test_quote_stripping_heuristic() {
        let strip = ScrubOptions::STRIP_QUOTES;
        let value = |raw: &str| scrub_attribute(Attribute::with_value("v", raw), strip).value;

        assert_eq!(value("\"unquoted\""), Some("unquoted".to_string()));
        assert_eq!(value("'UPPER_1'"), Some("UPPER_1".to_string()));
        assert_eq!(value("\"42\""), Some("42".to_string()));
        assert_eq!(value("\"MixedCase\""), Some("\"MixedCase\"".to_string()));
        assert_eq!(value("\"two words\""), Some("\"two words\"".to_string()));
        assert_eq!(value("\"a.html\""), Some("\"a.html\"".to_string()));
        assert_eq!(value("\"\""), Some("\"\"".to_string()));
        assert_eq!(value("\"open"), Some("\"open".to_string()));
        assert_eq!(value("bare"), Some("bare".to_string()));
    }

    #[test]
    fn test_force_double_quotes() {
        let quote = ScrubOptions::QUOTE_ATTRS;
        let value = |raw: &str| scrub_attribute(Attribute::with_value("v", raw), quote).value;

        assert_eq!(value("bare"), Some("\"bare\"".to_string()));
        assert_eq!(value("'single'"), Some("\"single\"".to_string()));
        assert_eq!(value("\"double\""), Some("\"double\"".to_string()));
        assert_eq!(value(""), Some("\"\"".to_string()));
        assert_eq!(scrub_attribute(Attribute::new("checked"), quote).value, None);
    }

    #[test]
    fn test_strip_then_quote() {
        let both = ScrubOptions::STRIP_QUOTES | ScrubOptions::QUOTE_ATTRS;
        let attribute = scrub_attribute(Attribute::with_value("class", "'x'"), both);
        assert_eq!(attribute.to_string(), "class=\"x\"");
    }

    #[test]
    fn test_trim_after_markup_only() {
        let trim = ScrubOptions::TRIM_SPACES;
        assert_eq!(scrub("<b> \t x</b>\n  y", trim), "<b>x</b>\ny");
        assert_eq!(scrub("  lead", trim), "  lead");
        assert_eq!(scrub("<!c>  z", trim), "<!c>z");
        assert_eq!(scrub("<b>x  </b>", trim), "<b>x  </b>");
    }

    #[test]
    fn test_no_trim_inside_preformatted_blocks() {
        let elements: ElementSequence = [
            Element::block(TagBlock::enclosing(
                Tag::new("PRE", AttributeList::new()),
                [Element::newline(), Element::text("   code")].into_iter().collect(),
            )),
            Element::newline(),
            Element::text("  after"),
        ]
        .into_iter()
        .collect();
        let mut doc = Document::new(elements);
        doc.accept_mut(&mut Scrubber::new(ScrubOptions::TRIM_SPACES));
        assert_eq!(doc.to_string(), "<PRE>\n   code</PRE>\nafter");
    }

    #[test]
    fn test_membership_is_unchanged() {
        let input = "<P>\n  a <!x> b\n</P>";
        let before = parse(input).elements.len();
        let mut doc = parse(input);
        doc.accept_mut(&mut Scrubber::new(ScrubOptions::all()));
        assert_eq!(doc.elements.len(), before);
    }

    #[test]
    fn test_options_serialize_as_flag_names() {
        let options = ScrubOptions::TAGS_LOWERCASE | ScrubOptions::TRIM_SPACES;
        let json = serde_json::to_string(&options).unwrap_or_default();
        assert_eq!(json, "\"TAGS_LOWERCASE | TRIM_SPACES\"");
        let parsed: ScrubOptions = serde_json::from_str(&json).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed, options);
    }
}
