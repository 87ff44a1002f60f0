//! Bounded lookahead over the input character stream.
//!
//! [`SourceStream`] is the lowest layer of the front end: a window of
//! pending characters pulled on demand from any [`Read`], with line and
//! column counters for diagnostics. Higher layers must check availability
//! or token matches before consuming; once characters are accepted there
//! is no backtracking.
//!
//! The script language is ASCII, so bytes map to characters one-to-one.
//! A read error from the underlying stream is treated as end of input;
//! `peek` and friends never block beyond a refill and never fail.

use std::collections::VecDeque;
use std::io::Read;

/// Bytes pulled from the reader per refill.
const REFILL_CHUNK: usize = 512;

/// A lookahead window over a character stream.
pub struct SourceStream<R: Read> {
    reader: R,
    window: VecDeque<char>,
    eof: bool,
    line: usize,
    column: usize,
}

impl<R: Read> SourceStream<R> {
    /// Wrap a reader. Positions start at line 1, column 0.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            window: VecDeque::new(),
            eof: false,
            line: 1,
            column: 0,
        }
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Characters accepted on the current line (0 directly after a newline).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Refill on demand, then report how many unconsumed characters are
    /// buffered. The result is less than `min` only when the reader is
    /// exhausted.
    pub fn ensure_available(&mut self, min: usize) -> usize {
        while self.window.len() < min && !self.eof {
            let mut chunk = [0u8; REFILL_CHUNK];
            match self.reader.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(n) => self.window.extend(chunk[..n].iter().map(|&b| b as char)),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => self.eof = true,
            }
        }
        self.window.len()
    }

    /// The next unconsumed character, if any.
    pub fn peek(&mut self) -> Option<char> {
        if self.ensure_available(1) < 1 {
            None
        } else {
            self.window.front().copied()
        }
    }

    /// Consume up to `n` available characters, updating line and column.
    /// Returns the number actually consumed.
    pub fn accept(&mut self, n: usize) -> usize {
        let n = n.min(self.ensure_available(n));
        for _ in 0..n {
            match self.window.pop_front() {
                Some('\n') => {
                    self.line += 1;
                    self.column = 0;
                }
                Some(_) => self.column += 1,
                None => break,
            }
        }
        n
    }

    /// Length of `literal` iff the upcoming unconsumed characters match it
    /// exactly, else 0. Never partially matches.
    pub fn token_available(&mut self, literal: &str) -> usize {
        let goal = literal.len();
        if self.ensure_available(goal) < goal {
            return 0;
        }
        if literal.chars().zip(self.window.iter()).all(|(a, &b)| a == b) {
            goal
        } else {
            0
        }
    }

    /// Accept `literal` iff it is next in the stream. Returns the number
    /// of characters accepted.
    pub fn accept_token(&mut self, literal: &str) -> usize {
        let len = self.token_available(literal);
        self.accept(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut stream = SourceStream::new("abc".as_bytes());
        assert_eq!(stream.peek(), Some('a'));
        assert_eq!(stream.peek(), Some('a'));
        assert_eq!(stream.accept(1), 1);
        assert_eq!(stream.peek(), Some('b'));
    }

    #[test]
    fn accept_tracks_lines_and_columns() {
        let mut stream = SourceStream::new("ab\ncd".as_bytes());
        assert_eq!((stream.line(), stream.column()), (1, 0));
        stream.accept(2);
        assert_eq!((stream.line(), stream.column()), (1, 2));
        stream.accept(1); // the newline
        assert_eq!((stream.line(), stream.column()), (2, 0));
        stream.accept(1);
        assert_eq!((stream.line(), stream.column()), (2, 1));
    }

    #[test]
    fn ensure_available_reports_short_only_at_end_of_stream() {
        let mut stream = SourceStream::new("xyz".as_bytes());
        assert_eq!(stream.ensure_available(2), 3);
        assert_eq!(stream.ensure_available(10), 3);
    }

    #[test]
    fn accept_consumes_at_most_what_is_available() {
        let mut stream = SourceStream::new("ab".as_bytes());
        assert_eq!(stream.accept(10), 2);
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.accept(1), 0);
    }

    #[test]
    fn token_available_never_partially_matches() {
        let mut stream = SourceStream::new("StartNod".as_bytes());
        assert_eq!(stream.token_available("StartNodes"), 0);
        assert_eq!(stream.token_available("Start"), 5);
        assert_eq!(stream.token_available("Nodes"), 0);
    }

    #[test]
    fn accept_token_consumes_the_exact_literal() {
        let mut stream = SourceStream::new("Connect(".as_bytes());
        assert_eq!(stream.accept_token("Connect"), 7);
        assert_eq!(stream.peek(), Some('('));
        assert_eq!(stream.accept_token("Connect"), 0);
    }

    #[test]
    fn refills_across_chunk_boundaries() {
        let text = "a".repeat(REFILL_CHUNK * 2 + 3);
        let mut stream = SourceStream::new(text.as_bytes());
        let mut consumed = 0;
        while stream.accept(1) == 1 {
            consumed += 1;
        }
        assert_eq!(consumed, REFILL_CHUNK * 2 + 3);
    }
}
