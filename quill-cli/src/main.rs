//! Quill command-line interface
//!
//! Reformats, compresses, strips, or inspects HTML files.
//!
//! Usage:
//! - quill page.html               # Normalize without wrapping
//! - quill --format page.html      # Pretty-print within 80 columns
//! - quill --links < page.html     # List anchor targets

mod config;
mod pipeline;

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use quill_common::warning::clear_warnings;

use config::Config;
use pipeline::{Mode, PLAIN_LAYOUT};

/// Quill: lenient HTML formatter and scrubber
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Normalize case and quoting, keep the layout flat
    quill page.html

    # Pretty-print with a 100 column margin and 4 space indent
    quill --margin 100 --indent 4 page.html

    # Reduce to plain legacy markup
    quill --strip page.html

    # Read from stdin
    cat page.html | quill --links

CONFIG:
    { "format": { "right_margin": 100, "indent": 4 },
      "scrub": "TAGS_UPPERCASE | ATTRS_UPPERCASE | STRIP_QUOTES" }
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// HTML files to process (`-` or none reads stdin)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Pretty-print using the configured margin and indent
    #[arg(short, long, group = "mode")]
    format: bool,

    /// Indent per nested block (implies --format)
    #[arg(short, long, value_name = "N")]
    indent: Option<usize>,

    /// Right margin to wrap at
    #[arg(short, long, value_name = "N")]
    margin: Option<usize>,

    /// Normalize and trim without restructuring
    #[arg(short, long, group = "mode")]
    compress: bool,

    /// Keep only legacy HTML tags, then pretty-print the result
    #[arg(short, long, group = "mode")]
    strip: bool,

    /// Print every link target, one per line
    #[arg(short, long, group = "mode")]
    links: bool,

    /// Print the collected element structure
    #[arg(short, long, group = "mode")]
    debug: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn mode(&self, config: &Config) -> Mode {
        if self.compress {
            Mode::Compress
        } else if self.strip {
            Mode::Strip
        } else if self.links {
            Mode::Links
        } else if self.debug {
            Mode::Debug
        } else {
            let mut layout = if self.format || self.indent.is_some() {
                config.format
            } else {
                PLAIN_LAYOUT
            };
            if let Some(indent) = self.indent {
                layout.indent = indent;
            }
            if let Some(margin) = self.margin {
                layout.right_margin = margin;
            }
            Mode::Format(layout)
        }
    }

    fn inputs(&self) -> Vec<Input> {
        if self.files.is_empty() {
            return vec![Input::Stdin];
        }
        self.files
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Input::Stdin
                } else {
                    Input::File(path.clone())
                }
            })
            .collect()
    }
}

/// One source of HTML.
#[derive(Debug, Clone)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Read the whole input. Invalid UTF-8 is replaced rather than rejected.
    fn read(&self) -> Result<String> {
        let bytes = match self {
            Self::Stdin => {
                let mut bytes = Vec::new();
                let _ = io::stdin()
                    .lock()
                    .read_to_end(&mut bytes)
                    .context("failed to read stdin")?;
                bytes
            }
            Self::File(path) => {
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
            }
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn process(input: &Input, mode: Mode, config: &Config) -> Result<()> {
    let source = input.read()?;
    let output = pipeline::run(&source, mode, config.scrub)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write output")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mode = cli.mode(&config);

    let mut failed = false;
    for input in cli.inputs() {
        // Each input reports its own lexer and collector warnings.
        clear_warnings();
        if let Err(err) = process(&input, mode, &config) {
            failed = true;
            eprintln!("{} {input}: {err:#}", "error:".red().bold());
        }
    }

    if failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
