//! A minimal character-walking cursor over the source text.
//!
//! Salt tokens carry no position metadata, so unlike a position-tracking
//! lexer cursor this one only needs a byte offset plus cheap lookahead.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, position: 0 }
    }

    /// The character at the cursor, or `None` at end of input.
    pub fn current_char(&self) -> Option<char> {
        self.char_at(0)
    }

    /// The character `offset` positions ahead of the cursor, or `None` if
    /// that is past the end of input.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.source[self.position..].chars().nth(offset)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.position += c.len_utf8();
        Some(c)
    }
}
