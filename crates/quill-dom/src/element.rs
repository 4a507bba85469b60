use core::fmt;

use strum_macros::Display;

use crate::attribute::{Attribute, AttributeList};
use crate::sequence::ElementSequence;

/// The serialized form of a [`Newline`].
pub const NEWLINE: &str = "\n";

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// A start tag: `<name attr…>` or, when void, `<name attr…/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag name as written (or as normalized by a scrubber).
    pub name: String,
    /// Attributes in source order.
    pub attributes: AttributeList,
    /// Whether the tag was written self-closing; a void tag never opens a block.
    pub void: bool,
}

impl Tag {
    /// A non-void tag with the given attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: AttributeList) -> Self {
        Self {
            name: name.into(),
            attributes,
            void: false,
        }
    }

    /// Mark the tag as void (self-closing).
    #[must_use]
    pub const fn into_void(mut self) -> Self {
        self.void = true;
        self
    }

    /// Whether the tag has an attribute with the given name.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// The de-quoted value of the named attribute, if present and valued.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes.value(name)
    }

    /// Whether the tag name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        let attributes: usize = self.attributes.iter().map(|a| 1 + a.length()).sum();
        attributes + char_len(&self.name) + 2 + usize::from(self.void)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attribute in &self.attributes {
            write!(f, " {attribute}")?;
        }
        if self.void {
            f.write_str("/")?;
        }
        f.write_str(">")
    }
}

/// An end tag: `</name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndTag {
    /// The tag name as written.
    pub name: String,
}

impl EndTag {
    /// An end tag with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether the tag name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        3 + char_len(&self.name)
    }
}

impl fmt::Display for EndTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "</{}>", self.name)
    }
}

/// A start tag, the elements it encloses, and its matching end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    /// The opening tag.
    pub start: Tag,
    /// Everything between the opening and closing tag.
    pub body: ElementSequence,
    /// The closing tag.
    pub end: EndTag,
}

impl TagBlock {
    /// Build a block from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `start` and `end` name different tags (compared ignoring
    /// ASCII case).
    #[must_use]
    pub fn new(start: Tag, body: ElementSequence, end: EndTag) -> Self {
        assert!(
            start.is(&end.name),
            "TagBlock start <{}> does not match end </{}>",
            start.name,
            end.name
        );
        Self { start, body, end }
    }

    /// Build a block whose end tag is synthesized from the start tag's name.
    #[must_use]
    pub fn enclosing(start: Tag, body: ElementSequence) -> Self {
        let end = EndTag::new(start.name.clone());
        Self { start, body, end }
    }

    /// The block's tag name (taken from the start tag).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.start.name
    }

    /// Whether the block's tag name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.start.is(name)
    }

    /// Serialized length in characters: start + body + end.
    #[must_use]
    pub fn length(&self) -> usize {
        self.start.length() + self.body.length() + self.end.length()
    }

    /// The concatenated content of every [`Text`] element in the body,
    /// nested blocks included.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.body, &mut out);
        out
    }
}

fn collect_text(sequence: &ElementSequence, out: &mut String) {
    for element in sequence {
        match element {
            Element::Text(text) => out.push_str(&text.text),
            Element::Block(block) => collect_text(&block.body, out),
            _ => {}
        }
    }
}

impl fmt::Display for TagBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, self.body, self.end)
    }
}

/// A comment or markup declaration, stored without its `<!` and `>`
/// delimiters: `<!-- x -->` is stored as `-- x --`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The text between `<!` and `>`.
    pub comment: String,
}

impl Comment {
    /// A comment with the given inner text.
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        3 + char_len(&self.comment)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!{}>", self.comment)
    }
}

/// A run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// The raw text.
    pub text: String,
}

impl Text {
    /// A text run.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        char_len(&self.text)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A line break in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Newline;

impl Newline {
    /// Serialized length in characters.
    #[must_use]
    pub const fn length(self) -> usize {
        NEWLINE.len()
    }
}

impl fmt::Display for Newline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NEWLINE)
    }
}

/// A note attached to the document by a processing stage. Not part of the
/// source HTML; serialized as a comment so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// What kind of note this is (for example `unmatched-end-tag`).
    pub kind: String,
    /// Free-form note text.
    pub text: String,
}

impl Annotation {
    /// A new annotation.
    #[must_use]
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Serialized length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        14 + char_len(&self.kind) + char_len(&self.text)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!--NOTE({}) {}-->", self.kind, self.text)
    }
}

/// Discriminant of an [`Element`], used by stages that remember what they
/// saw last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElementKind {
    /// [`Tag`]
    Tag,
    /// [`EndTag`]
    EndTag,
    /// [`TagBlock`]
    Block,
    /// [`Comment`]
    Comment,
    /// [`Text`]
    Text,
    /// [`Newline`]
    Newline,
    /// [`Annotation`]
    Annotation,
}

/// One node of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A start tag.
    Tag(Tag),
    /// An end tag.
    EndTag(EndTag),
    /// A matched start/body/end run.
    Block(Box<TagBlock>),
    /// A comment or declaration.
    Comment(Comment),
    /// Character data.
    Text(Text),
    /// A source line break.
    Newline(Newline),
    /// A processing note.
    Annotation(Annotation),
}

impl Element {
    /// This element's kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Tag(_) => ElementKind::Tag,
            Self::EndTag(_) => ElementKind::EndTag,
            Self::Block(_) => ElementKind::Block,
            Self::Comment(_) => ElementKind::Comment,
            Self::Text(_) => ElementKind::Text,
            Self::Newline(_) => ElementKind::Newline,
            Self::Annotation(_) => ElementKind::Annotation,
        }
    }

    /// Serialized length in characters (recursive for blocks).
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Self::Tag(tag) => tag.length(),
            Self::EndTag(end) => end.length(),
            Self::Block(block) => block.length(),
            Self::Comment(comment) => comment.length(),
            Self::Text(text) => text.length(),
            Self::Newline(newline) => newline.length(),
            Self::Annotation(annotation) => annotation.length(),
        }
    }

    /// A start tag element without attributes.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(Tag::new(name, AttributeList::new()))
    }

    /// A start tag element with attributes.
    #[must_use]
    pub fn tag_with(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        Self::Tag(Tag::new(name, attributes.into_iter().collect()))
    }

    /// An end tag element.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag(EndTag::new(name))
    }

    /// A text element.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(Text::new(text))
    }

    /// A comment element.
    #[must_use]
    pub fn comment(comment: impl Into<String>) -> Self {
        Self::Comment(Comment::new(comment))
    }

    /// A newline element.
    #[must_use]
    pub const fn newline() -> Self {
        Self::Newline(Newline)
    }

    /// A block element.
    #[must_use]
    pub fn block(block: TagBlock) -> Self {
        Self::Block(Box::new(block))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => fmt::Display::fmt(tag, f),
            Self::EndTag(end) => fmt::Display::fmt(end, f),
            Self::Block(block) => fmt::Display::fmt(block, f),
            Self::Comment(comment) => fmt::Display::fmt(comment, f),
            Self::Text(text) => fmt::Display::fmt(text, f),
            Self::Newline(newline) => fmt::Display::fmt(newline, f),
            Self::Annotation(annotation) => fmt::Display::fmt(annotation, f),
        }
    }
}

impl From<Tag> for Element {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<EndTag> for Element {
    fn from(end: EndTag) -> Self {
        Self::EndTag(end)
    }
}

impl From<TagBlock> for Element {
    fn from(block: TagBlock) -> Self {
        Self::Block(Box::new(block))
    }
}

impl From<Comment> for Element {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Newline> for Element {
    fn from(newline: Newline) -> Self {
        Self::Newline(newline)
    }
}

impl From<Annotation> for Element {
    fn from(annotation: Annotation) -> Self {
        Self::Annotation(annotation)
    }
}
