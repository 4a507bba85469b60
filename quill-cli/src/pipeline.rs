//! The processing chains behind each command-line mode.

use anyhow::Result;
use quill_dom::Document;
use quill_format::{FormatOptions, debug_to_string, dump_to_string, format_to_string, strip_to_string};
use quill_html::{Collector, ScrubOptions, Scrubber, extract_links, parse};

/// What to do with each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Collect, scrub, and format with the given layout.
    Format(FormatOptions),
    /// Scrub, then dump without restructuring.
    Compress,
    /// Reduce to the legacy allowlist, then reformat.
    Strip,
    /// List anchor targets.
    Links,
    /// Show the collected structure.
    Debug,
}

/// Layout used when no formatting flag is given: effectively no wrapping and
/// no indentation.
pub const PLAIN_LAYOUT: FormatOptions = FormatOptions::new().with_right_margin(1024).with_indent(0);

/// Layout used to reformat stripped output.
pub const STRIPPED_LAYOUT: FormatOptions = FormatOptions::new().with_right_margin(60).with_indent(1);

fn collect(document: &mut Document) {
    document.accept_mut(&mut Collector::new());
}

fn scrub(document: &mut Document, options: ScrubOptions) {
    document.accept_mut(&mut Scrubber::new(options));
}

/// Run `mode` over `source`, scrubbing with `base` plus whatever the mode adds.
pub fn run(source: &str, mode: Mode, base: ScrubOptions) -> Result<String> {
    let mut document = parse(source);
    let output = match mode {
        Mode::Format(options) => {
            collect(&mut document);
            scrub(&mut document, base | ScrubOptions::TRIM_SPACES);
            format_to_string(&document, options)?
        }
        Mode::Compress => {
            scrub(&mut document, base | ScrubOptions::TRIM_SPACES);
            dump_to_string(&document)?
        }
        Mode::Strip => {
            scrub(
                &mut document,
                base | ScrubOptions::TRIM_SPACES | ScrubOptions::QUOTE_ATTRS,
            );
            collect(&mut document);
            let stripped = strip_to_string(&document)?;

            let mut document = parse(&stripped);
            collect(&mut document);
            format_to_string(&document, STRIPPED_LAYOUT)?
        }
        Mode::Links => extract_links(&document)
            .into_iter()
            .map(|link| link + "\n")
            .collect(),
        Mode::Debug => {
            collect(&mut document);
            debug_to_string(&document)?
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_default(source: &str, mode: Mode) -> String {
        run(source, mode, ScrubOptions::default()).unwrap()
    }

    #[test]
    fn test_plain_layout_normalizes_without_wrapping() {
        let out = run_default(
            "<P>  First   paragraph</P>\n<P CLASS=\"x\">Second</P>\n",
            Mode::Format(PLAIN_LAYOUT),
        );
        assert_eq!(out, "<p>First   paragraph</p>\n\n<p class=x>Second</p>\n\n");
    }

    #[test]
    fn test_format_indents_structure() {
        let out = run_default(
            "<TABLE><TR><TD>x</TD></TR></TABLE>",
            Mode::Format(FormatOptions::new()),
        );
        assert_eq!(out, "<table>\n  <tr><td>x</td></tr>\n</table>\n");
    }

    #[test]
    fn test_compress_keeps_flat_sequence() {
        let out = run_default("<B>bold\n   text</B>\n", Mode::Compress);
        assert_eq!(out, "<b>bold\ntext</b>\n");
    }

    #[test]
    fn test_links_one_per_line() {
        let out = run_default(
            "<a href=\"one.html\">1</a> <A HREF='two.html'>2</A> <a name=x>3</a>",
            Mode::Links,
        );
        assert_eq!(out, "one.html\ntwo.html\n");
    }

    #[test]
    fn test_debug_brackets_blocks() {
        let out = run_default("<b>x</b>", Mode::Debug);
        assert_eq!(out, "<BLOCK>Tag(<b>)xTag(</b>)</BLOCK>");
    }

    #[test]
    fn test_strip_drops_presentation() {
        let out = run_default(
            "<html><body><div class=\"c\"><font color=red>Hi</font></div></body></html>",
            Mode::Strip,
        );
        assert_eq!(out, "<html>\n <body>\n  Hi\n </body>\n</html>\n");
    }

    #[test]
    fn test_empty_input_gives_empty_output_in_every_mode() {
        let modes = [
            Mode::Format(PLAIN_LAYOUT),
            Mode::Compress,
            Mode::Strip,
            Mode::Links,
            Mode::Debug,
        ];
        for mode in modes {
            assert_eq!(run_default("", mode), "", "{mode:?}");
        }
    }

    #[test]
    fn test_base_flags_reach_the_scrubber() {
        let out = run("<b>x</b>", Mode::Compress, ScrubOptions::TAGS_UPPERCASE).unwrap();
        assert_eq!(out, "<B>x</B>");
    }
}
