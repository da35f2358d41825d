use itertools::PeekingNext;

use crate::error_handling::Position;

/// Character source that keeps track of the current line and column.
/// `\r`, `\n` and `\r\n` all read as a single `\n`.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Cursor { text, offset: 0, position: Position::default() }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The text not consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        match self.rest().chars().next()? {
            '\r' => Some('\n'),
            c => Some(c),
        }
    }

    /// Consumes `count` characters.
    pub fn consume(&mut self, count: usize) {
        for _ in 0..count {
            if self.next().is_none() {
                break;
            }
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.offset += c.len_utf8();
        match c {
            '\r' => {
                if self.rest().starts_with('\n') {
                    self.offset += 1;
                }
                self.position.line += 1;
                self.position.column = 1;
                Some('\n')
            }
            '\n' => {
                self.position.line += 1;
                self.position.column = 1;
                Some('\n')
            }
            c => {
                self.position.column += 1;
                Some(c)
            }
        }
    }
}

impl PeekingNext for Cursor<'_> {
    fn peeking_next<F>(&mut self, accept: F) -> Option<char>
    where
        F: FnOnce(&char) -> bool,
    {
        let c = self.peek()?;
        if accept(&c) {
            self.next()
        } else {
            None
        }
    }
}
