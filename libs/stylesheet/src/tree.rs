//! # Stylesheet Tree
//!
//! Node types for a parsed stylesheet. Every node keeps the raw whitespace
//! that surrounded it so untouched input stringifies byte-for-byte.
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::{parse, Node};
//!
//! let sheet = parse(".rule { font-size: 15px }").unwrap();
//! match &sheet.nodes[0] {
//!     Node::Rule(rule) => assert_eq!(rule.selector, ".rule"),
//!     other => panic!("expected rule, got {other:?}"),
//! }
//! ```

use crate::span::Span;
use serde::{Deserialize, Serialize};

// =============================================================================
// STYLESHEET
// =============================================================================

/// Root of a parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    /// Top-level nodes.
    pub nodes: Vec<Node>,
    /// Whitespace after the last node.
    pub after: String,
    /// Whether the last top-level statement was followed by `;`.
    pub semicolon: bool,
}

impl Stylesheet {
    /// Serialize back to CSS text.
    ///
    /// ## Example
    ///
    /// ```rust
    /// let css = "a { color: red; }\n";
    /// assert_eq!(px2em_stylesheet::parse(css).unwrap().to_css(), css);
    /// ```
    pub fn to_css(&self) -> String {
        crate::stringify::stringify(self)
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A node in a block or at the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// `selector { ... }`
    Rule(Rule),
    /// `@name params { ... }` or `@name params;`
    AtRule(AtRule),
    /// `prop: value`
    Declaration(Declaration),
    /// `/* text */`
    Comment(Comment),
}

impl Node {
    /// The declaration inside this node, if it is one.
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Mutable access to the declaration inside this node.
    pub fn as_declaration_mut(&mut self) -> Option<&mut Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Whether this node is written with a `;` separator when followed by a
    /// sibling.
    pub(crate) fn takes_semicolon(&self) -> bool {
        match self {
            Node::Declaration(_) => true,
            Node::AtRule(at_rule) => at_rule.nodes.is_none(),
            Node::Rule(_) | Node::Comment(_) => false,
        }
    }
}

// =============================================================================
// BLOCK RAWS
// =============================================================================

/// Whitespace and separators around a `{ ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRaws {
    /// Whitespace before the node.
    pub before: String,
    /// Whitespace between the selector/params and `{`.
    pub between: String,
    /// Whitespace between the last child and `}`.
    pub after: String,
    /// Whether the last child was followed by `;`.
    pub semicolon: bool,
}

// =============================================================================
// RULE
// =============================================================================

/// A qualified rule: selector plus a block of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Selector text as written (trailing whitespace moved to raws).
    pub selector: String,
    /// Children of the block.
    pub nodes: Vec<Node>,
    /// Surrounding whitespace.
    pub raws: BlockRaws,
    /// Source range.
    pub span: Span,
}

impl Rule {
    /// Iterate over the declarations of this rule, skipping other children.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(Node::as_declaration)
    }
}

// =============================================================================
// AT-RULE
// =============================================================================

/// Whitespace around an at-rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRuleRaws {
    /// Whitespace between the name and the params.
    pub after_name: String,
    /// Block whitespace; `between` also holds the space before a bodiless `;`.
    pub block: BlockRaws,
}

/// An at-rule such as `@media` or `@import`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    /// Prelude text (for `@media`, the condition).
    pub params: String,
    /// Children, or `None` for statement at-rules like `@import`.
    pub nodes: Option<Vec<Node>>,
    /// Surrounding whitespace.
    pub raws: AtRuleRaws,
    /// Source range.
    pub span: Span,
}

impl AtRule {
    /// Case-insensitive name check.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em_stylesheet::{parse, Node};
    ///
    /// let sheet = parse("@MEDIA print { }").unwrap();
    /// let Node::AtRule(at_rule) = &sheet.nodes[0] else { unreachable!() };
    /// assert!(at_rule.is_named("media"));
    /// ```
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

// =============================================================================
// DECLARATION
// =============================================================================

/// Whitespace around a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRaws {
    /// Whitespace before the property.
    pub before: String,
    /// Everything between property and value, colon included.
    pub between: String,
    /// Whitespace after the value (before `;` or `}`).
    pub after: String,
}

/// A `prop: value` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Property name.
    pub prop: String,
    /// Raw value, `!important` included.
    pub value: String,
    /// Surrounding whitespace.
    pub raws: DeclarationRaws,
    /// Source range.
    pub span: Span,
}

impl Declaration {
    /// Build a declaration with `": "` between property and value.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em_stylesheet::Declaration;
    ///
    /// let decl = Declaration::new("margin", "0");
    /// assert_eq!(decl.raws.between, ": ");
    /// ```
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            raws: DeclarationRaws {
                before: String::new(),
                between: ": ".to_string(),
                after: String::new(),
            },
            span: Span::default(),
        }
    }

    /// Copy of this declaration (raws included) carrying a different value.
    pub fn clone_with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }
}

// =============================================================================
// COMMENT
// =============================================================================

/// A `/* ... */` comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Text between the delimiters.
    pub text: String,
    /// Whitespace before the comment.
    pub before: String,
    /// Source range.
    pub span: Span,
}

// =============================================================================
// TESTS
// =============================================================================
