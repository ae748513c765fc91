//! # Source Span
//!
//! Positions and ranges in stylesheet source, used for error reporting.
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::Span;
//!
//! let span = px2em_stylesheet::parse("a {").unwrap_err().span;
//! assert_eq!(span.start.byte, 2);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A single point in the source (byte offset, 0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A half-open range `[start, end)` in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}
