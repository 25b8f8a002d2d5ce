//! Forward-only cursor over source text.

/// A cursor over the unconsumed tail of the source.
///
/// All consumption is forward; the parser never backtracks. Byte offsets are
/// only ever taken at ASCII delimiters, so slicing stays on character
/// boundaries.
pub(crate) struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { rest: source }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// The unconsumed remainder.
    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    /// Prefix test; a prefix longer than the remainder never matches.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest.starts_with(prefix)
    }

    /// Consume `n` bytes (clamped to the remainder).
    pub(crate) fn consume(&mut self, n: usize) {
        self.rest = &self.rest[n.min(self.rest.len())..];
    }

    /// Consume up to and including the next line terminator, returning the
    /// line without its terminator. A trailing `\r` is stripped.
    pub(crate) fn consume_line(&mut self) -> &'a str {
        let rest = self.rest;
        match rest.find('\n') {
            Some(i) => {
                self.rest = &rest[i + 1..];
                trim_cr(&rest[..i])
            }
            None => {
                self.rest = "";
                trim_cr(rest)
            }
        }
    }

    /// The current line without consuming it.
    pub(crate) fn peek_line(&self) -> &'a str {
        match self.rest.find('\n') {
            Some(i) => trim_cr(&self.rest[..i]),
            None => trim_cr(self.rest),
        }
    }

    /// The line after the current one, if any.
    pub(crate) fn peek_second_line(&self) -> Option<&'a str> {
        let after = &self.rest[self.rest.find('\n')? + 1..];
        match after.find('\n') {
            Some(i) => Some(trim_cr(&after[..i])),
            None if after.is_empty() => None,
            None => Some(trim_cr(after)),
        }
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
