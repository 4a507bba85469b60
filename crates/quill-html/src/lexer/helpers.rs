//! Helper functions for the lexer:
//! - State transitions ("switch to", "reconsume in")
//! - Input handling (consume, peek, lookahead)
//! - Element emission and text accumulation
//! - Raw-text scanning for SCRIPT and STYLE content

use quill_dom::Element;

use super::machine::{HtmlLexer, LexerState};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HtmlLexer {
    /// Transition to a new state. The next character is consumed on the next
    /// iteration of the start-tag loop.
    pub(super) const fn switch_to(&mut self, new_state: LexerState) {
        self.state = new_state;
    }

    /// Transition to a new state without consuming: the current character is
    /// processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: LexerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// The character the start-tag machine should process next: the current
    /// one again after a reconsume, otherwise a freshly consumed one.
    pub(super) fn next_input_character(&mut self) -> Option<char> {
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }
        self.current_input_character
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HtmlLexer {
    /// Consume the next input character.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at the codepoint `offset` characters ahead without consuming.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Whether the input at the current position starts with `target`.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Advance past `target`, which the caller has already matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        // Only ever called with ASCII markup delimiters.
        self.current_pos += target.len();
    }

    /// Whitespace that separates tag names and attributes.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\r' | '\x0C')
    }
}

/// Memoized search for a delimiter that closes markup, such as `>` or `-->`.
///
/// Remembers where it last searched and what it found. A later search from
/// an offset at or after that point reuses the answer while the remembered
/// match still lies ahead, and a failed search answers every later one.
/// Input full of unterminated markup is therefore scanned once overall
/// rather than once per `<`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Terminator {
    needle: &'static str,
    searched_from: usize,
    found: Option<usize>,
}

impl Terminator {
    /// A terminator that has not searched yet.
    pub(super) const fn new(needle: &'static str) -> Self {
        Self {
            needle,
            searched_from: usize::MAX,
            found: None,
        }
    }

    /// Byte offset of the first `needle` in `input` at or after `from`.
    pub(super) fn find(&mut self, input: &str, from: usize) -> Option<usize> {
        let known = self.searched_from <= from && self.found.is_none_or(|found| found >= from);
        if !known {
            self.found = input[from..].find(self.needle).map(|offset| from + offset);
            self.searched_from = from;
        }
        self.found
    }
}

// =============================================================================
// Emission Helpers
// =============================================================================

impl HtmlLexer {
    /// Emit pending text, then `element`.
    pub(super) fn emit(&mut self, element: Element) {
        self.flush_text();
        self.elements.push(element);
    }

    /// Emit pending text as a single Text element, if there is any.
    pub(super) fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let text = core::mem::take(&mut self.pending_text);
            self.elements.push(Element::text(text));
        }
    }

    /// Treat the `<` at `start` as ordinary text.
    pub(super) fn lex_literal_less_than(&mut self, start: usize) {
        self.current_pos = start;
        self.pending_text.push('<');
        self.consume_string("<");
    }

    /// Accumulate text up to byte offset `end`, emitting one Newline element
    /// per line break. `\r\n` and a lone `\r` each count as one break.
    pub(super) fn lex_data_until(&mut self, end: usize) {
        while self.current_pos < end {
            match self.consume() {
                Some('\r') => {
                    if self.current_pos < end && self.peek_codepoint(0) == Some('\n') {
                        let _ = self.consume();
                    }
                    self.emit(Element::newline());
                }
                Some('\n') => self.emit(Element::newline()),
                Some(c) => self.pending_text.push(c),
                None => break,
            }
        }
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HtmlLexer {
    /// Byte offset of the end tag that closes the raw-text element `name`,
    /// or the end of input if there is none.
    ///
    /// A candidate `</name` only counts when followed by whitespace, `/`,
    /// `>`, or the end of input, so `</scripts` does not close `script`.
    pub(super) fn find_raw_text_end(&self, name: &str) -> usize {
        let rest = &self.input[self.current_pos..];
        let name = name.as_bytes();

        for (candidate, _) in rest.match_indices("</") {
            let name_start = candidate + 2;
            let Some(found) = rest.as_bytes().get(name_start..name_start + name.len()) else {
                break;
            };
            if !found.eq_ignore_ascii_case(name) {
                continue;
            }
            let delimited = rest.get(name_start + name.len()..).is_some_and(|tail| {
                tail.chars()
                    .next()
                    .is_none_or(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
            });
            if delimited {
                return self.current_pos + candidate;
            }
        }
        self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead() {
        let lexer = HtmlLexer::new("<!DocType".to_string());
        assert!(lexer.next_few_characters_are("<!"));
        assert!(!lexer.next_few_characters_are("<!doctype"));
        assert_eq!(lexer.peek_codepoint(2), Some('D'));
        assert_eq!(lexer.peek_codepoint(20), None);
    }

    #[test]
    fn test_raw_text_end_needs_a_delimiter() {
        let lexer = HtmlLexer::new("x</scripts></Script >".to_string());
        assert_eq!(lexer.find_raw_text_end("SCRIPT"), 11);

        let unclosed = HtmlLexer::new("x</scriptx".to_string());
        assert_eq!(unclosed.find_raw_text_end("script"), 10);

        let short = HtmlLexer::new("x</scr".to_string());
        assert_eq!(short.find_raw_text_end("script"), 6);
    }

    #[test]
    fn test_terminator_reuses_earlier_searches() {
        let input = "a>b>c";
        let mut close = Terminator::new(">");
        assert_eq!(close.find(input, 0), Some(1));
        assert_eq!(close.find(input, 1), Some(1));
        assert_eq!(close.find(input, 2), Some(3));
        assert_eq!(close.find(input, 4), None);
        assert_eq!(close.find(input, 5), None);

        let mut end = Terminator::new("-->");
        assert_eq!(end.find("<!-- x", 2), None);
        assert_eq!(end.find("<!-- x", 4), None);
    }
}
