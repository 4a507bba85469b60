use std::io::{self, Write};

/// Wraps a sink with a left margin, a right margin, and column tracking.
///
/// Columns count characters. Column arithmetic saturates, so a right margin
/// of `usize::MAX` never wraps.
#[derive(Debug)]
pub struct MarginWriter<W: Write> {
    out: W,
    left_margin: usize,
    right_margin: usize,
    /// Characters on the current line, padding included.
    column: usize,
}

impl<W: Write> MarginWriter<W> {
    /// A writer at column 0 with no left margin.
    #[must_use]
    pub const fn new(out: W, right_margin: usize) -> Self {
        Self {
            out,
            left_margin: 0,
            right_margin,
            column: 0,
        }
    }

    /// The current left margin.
    #[must_use]
    pub const fn left_margin(&self) -> usize {
        self.left_margin
    }

    /// Set the left margin; it applies from the next line start.
    pub const fn set_left_margin(&mut self, left_margin: usize) {
        self.left_margin = left_margin;
    }

    /// The wrap column.
    #[must_use]
    pub const fn right_margin(&self) -> usize {
        self.right_margin
    }

    /// Set the wrap column.
    pub const fn set_right_margin(&mut self, right_margin: usize) {
        self.right_margin = right_margin;
    }

    /// The column the next character will land on: the left margin on an
    /// empty line, otherwise the current column.
    #[must_use]
    pub const fn cur_position(&self) -> usize {
        if self.column == 0 {
            self.left_margin
        } else {
            self.column
        }
    }

    /// Write `s`, padding to the left margin first if the line is empty.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn print(&mut self, s: &str) -> io::Result<()> {
        if self.column == 0 && self.left_margin > 0 {
            self.pad(self.left_margin)?;
        }
        self.out.write_all(s.as_bytes())?;
        self.column = match s.rfind('\n') {
            Some(index) => s[index + 1..].chars().count(),
            None => self.column.saturating_add(s.chars().count()),
        };
        Ok(())
    }

    /// Write `s`, breaking the line first if the line already has content
    /// past the left margin and `s` would cross the right margin.
    ///
    /// An over-long `s` on an empty line is written anyway, so wrapping
    /// always makes progress.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn print_wrapped(&mut self, s: &str) -> io::Result<()> {
        self.print_wrapped_hanging(s, 0)
    }

    /// Like [`print_wrapped`](Self::print_wrapped), but a continuation line
    /// starts `hanging` columns past the left margin.
    ///
    /// The hanging indent shrinks as needed so that an `s` which fits between
    /// the margins still fits on the continuation line.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn print_wrapped_hanging(&mut self, s: &str, hanging: usize) -> io::Result<()> {
        let width = s.chars().count();
        if self.column > self.left_margin && self.column.saturating_add(width) > self.right_margin {
            self.println()?;
            let room = self
                .right_margin
                .saturating_sub(self.left_margin.saturating_add(width));
            let hanging = hanging.min(room);
            if hanging > 0 {
                self.pad(self.left_margin.saturating_add(hanging))?;
            }
        }
        self.print(s)
    }

    /// End the current line.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn println(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.column = 0;
        Ok(())
    }

    /// End the current line only if it has content; repeated calls collapse.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn println_soft(&mut self) -> io::Result<()> {
        if self.column > 0 {
            self.println()?;
        }
        Ok(())
    }

    /// Flush the sink.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// The sink.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the writer, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write `width` spaces and move to that column.
    fn pad(&mut self, width: usize) -> io::Result<()> {
        write!(self.out, "{:width$}", "")?;
        self.column = width;
        Ok(())
    }
}
