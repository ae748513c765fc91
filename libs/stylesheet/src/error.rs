//! # Parse Errors
//!
//! Error types for the stylesheet parser.
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::{parse, ParseErrorKind};
//!
//! let error = parse(".a { color: red").unwrap_err();
//! assert_eq!(error.kind, ParseErrorKind::UnclosedBlock);
//! ```

use crate::span::Span;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {}, column {}", .span.start.line + 1, .span.start.column + 1)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A `{` without its closing `}`.
    #[error("unclosed block")]
    UnclosedBlock,

    /// A `}` with no block open.
    #[error("unexpected '}}'")]
    UnexpectedCloseBrace,

    /// A quoted string running to the end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A `/*` without `*/`.
    #[error("unterminated comment")]
    UnterminatedComment,

    /// A declaration without a `:` separator.
    #[error("missing ':' in declaration '{text}'")]
    MissingColon {
        /// The offending statement text.
        text: String,
    },

    /// An `@` not followed by a name.
    #[error("at-rule without a name")]
    MissingAtRuleName,
}

// =============================================================================
// TESTS
// =============================================================================
