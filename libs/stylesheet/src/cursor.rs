//! # Character Cursor
//!
//! Peekable character cursor shared by the stylesheet parser and the value
//! scanner. Tracks position (byte, line, column) as it advances.
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::Cursor;
//!
//! let mut cursor = Cursor::new("16px");
//! assert_eq!(cursor.peek(), Some('1'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('6'));
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
///
/// ## Example
///
/// ```rust
/// use px2em_stylesheet::Cursor;
///
/// let mut cursor = Cursor::new("url(a.png)");
/// assert!(cursor.eat("url("));
/// assert_eq!(cursor.position().byte, 4);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current line (0-indexed).
    line: usize,
    /// Current column (0-indexed).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 0,
            column: 0,
        }
    }

    /// Get current position.
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.line, self.column)
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.byte
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.byte..]
    }

    /// Source text between two byte offsets.
    ///
    /// Offsets must come from this cursor's positions.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Character consumed just before the current position.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em_stylesheet::Cursor;
    ///
    /// let mut cursor = Cursor::new("a1");
    /// assert_eq!(cursor.prev(), None);
    /// cursor.advance();
    /// assert_eq!(cursor.prev(), Some('a'));
    /// ```
    pub fn prev(&self) -> Option<char> {
        self.source[..self.byte].chars().next_back()
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// True if the remainder begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at EOF
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.byte += c.len_utf8();

        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Consume `prefix` if the remainder begins with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if !self.starts_with(prefix) {
            return false;
        }
        for _ in prefix.chars() {
            self.advance();
        }
        true
    }

    /// Advance while predicate is true.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em_stylesheet::Cursor;
    ///
    /// let mut cursor = Cursor::new("  .a");
    /// cursor.advance_while(char::is_whitespace);
    /// assert_eq!(cursor.peek(), Some('.'));
    /// ```
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
