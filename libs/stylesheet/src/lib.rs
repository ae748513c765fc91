//! # px2em Stylesheet
//!
//! A small, raws-preserving stylesheet model for the px2em converter.
//! It splits CSS into rules, at-rules, declarations and comments and can
//! write them back unchanged; selectors and values stay raw text.
//!
//! ## Architecture
//!
//! ```text
//! CSS Text → Parser (Cursor) → Stylesheet → px2em rewrite → stringify → CSS Text
//! ```
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::parse;
//!
//! let sheet = parse(".rule { font-size: 15px }").unwrap();
//! assert_eq!(sheet.to_css(), ".rule { font-size: 15px }");
//! ```

pub mod cursor;
pub mod error;
pub mod parser;
pub mod span;
pub mod stringify;
pub mod tree;

// Re-export public API
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use span::{Position, Span};
pub use stringify::stringify;
pub use tree::{
    AtRule, AtRuleRaws, BlockRaws, Comment, Declaration, DeclarationRaws, Node, Rule, Stylesheet,
};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse CSS text into a [`Stylesheet`].
///
/// ## Errors
///
/// Returns a [`ParseError`] for unclosed blocks, stray `}`, unterminated
/// strings or comments and declarations without a `:`.
///
/// ## Example
///
/// ```rust
/// let sheet = px2em_stylesheet::parse("a { b: c } d { e: f }").unwrap();
/// assert_eq!(sheet.nodes.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
    parser::Parser::new(source).parse()
}

// =============================================================================
// TESTS
// =============================================================================
