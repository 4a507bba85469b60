use quill_common::warning::warn_once;
use quill_dom::{Attribute, AttributeList, Document, Element, ElementSequence, EndTag, Tag};
use strum_macros::Display;

use super::helpers::Terminator;

/// States of the start-tag state machine.
///
/// Data, comments, end tags, and raw text are scanned directly; only start
/// tags need a character-at-a-time machine because of attribute quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LexerState {
    /// Reading the tag name after `<`.
    TagName,
    /// Between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside a `"`-quoted value.
    AttributeValueDoubleQuoted,
    /// Inside a `'`-quoted value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted value.
    AttributeValueUnquoted,
    /// Just after a closing quote.
    AfterAttributeValueQuoted,
    /// After `/`, expecting `>`.
    SelfClosingStartTag,
}

/// The lexer.
///
/// ```
/// use quill_html::HtmlLexer;
///
/// let mut lexer = HtmlLexer::new("<p>hi</p>".to_string());
/// lexer.run();
/// assert_eq!(lexer.into_elements().len(), 3);
/// ```
pub struct HtmlLexer {
    /// The source text.
    pub(super) input: String,
    /// Byte offset of the next unread character.
    pub(super) current_pos: usize,
    /// Start-tag machine state.
    pub(super) state: LexerState,
    /// When set, the current character is processed again in the new state.
    pub(super) reconsume: bool,
    /// The character most recently consumed by the start-tag machine.
    pub(super) current_input_character: Option<char>,
    /// Text accumulated since the last emitted element.
    pub(super) pending_text: String,
    /// Name of the open SCRIPT or STYLE element whose content is raw text.
    pub(super) raw_text_element: Option<String>,
    /// Emitted elements.
    pub(super) elements: Vec<Element>,
    /// Next `>`, closing start tags and declarations.
    pub(super) close_bracket: Terminator,
    /// Next `-->`, closing comments.
    pub(super) close_comment: Terminator,
    /// Next `"`, closing double-quoted attribute values.
    pub(super) close_double_quote: Terminator,
    /// Next `'`, closing single-quoted attribute values.
    pub(super) close_single_quote: Terminator,
}

impl HtmlLexer {
    /// A lexer over `input`.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            input,
            current_pos: 0,
            state: LexerState::TagName,
            reconsume: false,
            current_input_character: None,
            pending_text: String::new(),
            raw_text_element: None,
            elements: Vec::new(),
            close_bracket: Terminator::new(">"),
            close_comment: Terminator::new("-->"),
            close_double_quote: Terminator::new("\""),
            close_single_quote: Terminator::new("'"),
        }
    }

    /// Lex the whole input.
    pub fn run(&mut self) {
        while self.current_pos < self.input.len() {
            if let Some(name) = self.raw_text_element.take() {
                let end = self.find_raw_text_end(&name);
                self.lex_data_until(end);
                continue;
            }

            let next_markup = self.input[self.current_pos..]
                .find('<')
                .map_or(self.input.len(), |offset| self.current_pos + offset);
            if next_markup > self.current_pos {
                self.lex_data_until(next_markup);
            } else {
                self.lex_markup();
            }
        }
        self.flush_text();
    }

    /// The emitted elements.
    #[must_use]
    pub fn into_elements(self) -> ElementSequence {
        self.elements.into()
    }

    /// The emitted elements as a document.
    #[must_use]
    pub fn into_document(self) -> Document {
        Document::from(self.elements)
    }

    /// Dispatch on the `<` at the current position.
    fn lex_markup(&mut self) {
        let start = self.current_pos;

        if self.next_few_characters_are("<!") {
            let body_start = start + 2;
            let close = if self.next_few_characters_are("<!--") {
                self.close_comment
                    .find(&self.input, body_start)
                    .map(|found| found + 2)
            } else {
                self.close_bracket.find(&self.input, body_start)
            };
            match close {
                Some(close) => {
                    let comment = self.input[body_start..close].to_string();
                    self.emit(Element::comment(comment));
                    self.current_pos = close + 1;
                }
                None => {
                    warn_once("Lexer", "unterminated comment kept as text");
                    self.lex_literal_less_than(start);
                }
            }
            return;
        }

        if self.next_few_characters_are("</") {
            if self.peek_codepoint(2).is_some_and(|c| c.is_ascii_alphabetic()) {
                if let Some(end) = self.lex_end_tag() {
                    self.emit(end.into());
                    return;
                }
                warn_once("Lexer", "malformed end tag kept as text");
            }
            self.lex_literal_less_than(start);
            return;
        }

        if self.peek_codepoint(1).is_some_and(|c| c.is_ascii_alphabetic()) {
            match self.lex_start_tag() {
                Some(tag) => {
                    if !tag.void && (tag.is("SCRIPT") || tag.is("STYLE")) {
                        self.raw_text_element = Some(tag.name.clone());
                    }
                    self.emit(tag.into());
                }
                None => {
                    warn_once("Lexer", "unterminated start tag kept as text");
                    self.lex_literal_less_than(start);
                }
            }
            return;
        }

        self.lex_literal_less_than(start);
    }

    /// `</name ws*>`. Returns `None`, with the position restored, for
    /// anything else.
    fn lex_end_tag(&mut self) -> Option<EndTag> {
        let start = self.current_pos;
        self.consume_string("</");

        let mut name = String::new();
        while let Some(c) = self.peek_codepoint(0) {
            if Self::is_whitespace_char(c) || c == '>' || c == '/' {
                break;
            }
            name.push(c);
            let _ = self.consume();
        }
        while self.peek_codepoint(0).is_some_and(Self::is_whitespace_char) {
            let _ = self.consume();
        }

        if self.consume() == Some('>') {
            Some(EndTag::new(name))
        } else {
            self.current_pos = start;
            None
        }
    }

    /// Run the start-tag state machine from the `<` at the current position.
    ///
    /// Returns `None`, with the position restored, if the input ends before
    /// the closing `>`. Input with no `>` or closing quote left is rejected
    /// without being walked.
    fn lex_start_tag(&mut self) -> Option<Tag> {
        let start = self.current_pos;
        self.consume_string("<");
        if self.close_bracket.find(&self.input, self.current_pos).is_none() {
            self.current_pos = start;
            return None;
        }

        let mut tag = Tag::new(String::new(), AttributeList::new());
        let mut attribute: Option<Attribute> = None;
        self.state = LexerState::TagName;
        self.reconsume = false;

        loop {
            let Some(c) = self.next_input_character() else {
                self.current_pos = start;
                return None;
            };

            match self.state {
                LexerState::TagName => match c {
                    c if Self::is_whitespace_char(c) => {
                        self.switch_to(LexerState::BeforeAttributeName);
                    }
                    '/' => self.switch_to(LexerState::SelfClosingStartTag),
                    '>' => break,
                    c => tag.name.push(c),
                },
                LexerState::BeforeAttributeName => match c {
                    c if Self::is_whitespace_char(c) => {}
                    '/' => self.switch_to(LexerState::SelfClosingStartTag),
                    '>' => break,
                    _ => {
                        attribute = Some(Attribute::new(String::new()));
                        self.reconsume_in(LexerState::AttributeName);
                    }
                },
                LexerState::AttributeName => match c {
                    c if Self::is_whitespace_char(c) => {
                        self.switch_to(LexerState::AfterAttributeName);
                    }
                    '/' | '>' => self.reconsume_in(LexerState::AfterAttributeName),
                    '=' if attribute.as_ref().is_some_and(|a| !a.name.is_empty()) => {
                        self.switch_to(LexerState::BeforeAttributeValue);
                    }
                    c => {
                        if let Some(attribute) = attribute.as_mut() {
                            attribute.name.push(c);
                        }
                    }
                },
                LexerState::AfterAttributeName => match c {
                    c if Self::is_whitespace_char(c) => {}
                    '/' => {
                        Self::finish_attribute(&mut tag, &mut attribute);
                        self.switch_to(LexerState::SelfClosingStartTag);
                    }
                    '=' => self.switch_to(LexerState::BeforeAttributeValue),
                    '>' => break,
                    _ => {
                        Self::finish_attribute(&mut tag, &mut attribute);
                        attribute = Some(Attribute::new(String::new()));
                        self.reconsume_in(LexerState::AttributeName);
                    }
                },
                LexerState::BeforeAttributeValue => match c {
                    c if Self::is_whitespace_char(c) => {}
                    '"' => {
                        if self.close_double_quote.find(&self.input, self.current_pos).is_none() {
                            self.current_pos = start;
                            return None;
                        }
                        Self::attribute_value(&mut attribute).push(c);
                        self.switch_to(LexerState::AttributeValueDoubleQuoted);
                    }
                    '\'' => {
                        if self.close_single_quote.find(&self.input, self.current_pos).is_none() {
                            self.current_pos = start;
                            return None;
                        }
                        Self::attribute_value(&mut attribute).push(c);
                        self.switch_to(LexerState::AttributeValueSingleQuoted);
                    }
                    '>' => {
                        let _ = Self::attribute_value(&mut attribute);
                        break;
                    }
                    _ => {
                        let _ = Self::attribute_value(&mut attribute);
                        self.reconsume_in(LexerState::AttributeValueUnquoted);
                    }
                },
                LexerState::AttributeValueDoubleQuoted => {
                    Self::attribute_value(&mut attribute).push(c);
                    if c == '"' {
                        self.switch_to(LexerState::AfterAttributeValueQuoted);
                    }
                }
                LexerState::AttributeValueSingleQuoted => {
                    Self::attribute_value(&mut attribute).push(c);
                    if c == '\'' {
                        self.switch_to(LexerState::AfterAttributeValueQuoted);
                    }
                }
                LexerState::AttributeValueUnquoted => match c {
                    c if Self::is_whitespace_char(c) => {
                        Self::finish_attribute(&mut tag, &mut attribute);
                        self.switch_to(LexerState::BeforeAttributeName);
                    }
                    '>' => break,
                    c => Self::attribute_value(&mut attribute).push(c),
                },
                LexerState::AfterAttributeValueQuoted => {
                    Self::finish_attribute(&mut tag, &mut attribute);
                    match c {
                        c if Self::is_whitespace_char(c) => {
                            self.switch_to(LexerState::BeforeAttributeName);
                        }
                        '/' => self.switch_to(LexerState::SelfClosingStartTag),
                        '>' => break,
                        _ => self.reconsume_in(LexerState::BeforeAttributeName),
                    }
                }
                LexerState::SelfClosingStartTag => match c {
                    '>' => {
                        tag.void = true;
                        break;
                    }
                    _ => self.reconsume_in(LexerState::BeforeAttributeName),
                },
            }
        }

        Self::finish_attribute(&mut tag, &mut attribute);
        Some(tag)
    }

    /// Move the attribute under construction, if any, onto the tag.
    fn finish_attribute(tag: &mut Tag, attribute: &mut Option<Attribute>) {
        if let Some(attribute) = attribute.take() {
            tag.attributes.push(attribute);
        }
    }

    /// The raw value of the attribute under construction, created empty on
    /// first use.
    fn attribute_value(attribute: &mut Option<Attribute>) -> &mut String {
        attribute
            .get_or_insert_with(|| Attribute::new(String::new()))
            .value
            .get_or_insert_with(String::new)
    }
}
