//! # Stylesheet Parser
//!
//! Splits CSS text into rules, at-rules, declarations and comments while
//! capturing the whitespace around each of them. Selectors, values and
//! at-rule preludes are kept as raw text.
//!
//! ## Example
//!
//! ```rust
//! use px2em_stylesheet::parser::Parser;
//!
//! let sheet = Parser::new("h1 { margin: 0 }").parse().unwrap();
//! assert_eq!(sheet.nodes.len(), 1);
//! ```

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::span::{Position, Span};
use crate::tree::{
    AtRule, AtRuleRaws, BlockRaws, Comment, Declaration, DeclarationRaws, Node, Rule, Stylesheet,
};

// =============================================================================
// STATEMENT TERMINATORS
// =============================================================================

/// What ended a scanned statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// `{` (consumed).
    Open,
    /// `;` (consumed).
    Semicolon,
    /// `}` (left for the block loop).
    Close,
    /// End of input.
    Eof,
}

/// Raw statement text split from its trailing whitespace.
struct Statement<'a> {
    text: &'a str,
    trailing: &'a str,
    start: Position,
    end: Position,
    terminator: Terminator,
}

/// Parsed block contents.
struct Block {
    nodes: Vec<Node>,
    after: String,
    semicolon: bool,
}

// =============================================================================
// PARSER
// =============================================================================

/// Stylesheet parser.
pub struct Parser<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Whitespace handed back by a statement that ended at `}` or EOF.
    carry: String,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            carry: String::new(),
        }
    }

    /// Parse the entire source.
    ///
    /// ## Errors
    ///
    /// Unclosed blocks, stray `}`, unterminated strings or comments and
    /// declarations without `:`.
    pub fn parse(mut self) -> Result<Stylesheet, ParseError> {
        let block = self.parse_nodes(None)?;
        Ok(Stylesheet {
            nodes: block.nodes,
            after: block.after,
            semicolon: block.semicolon,
        })
    }

    // =========================================================================
    // BLOCKS
    // =========================================================================

    /// Parse nodes until the `}` matching `open`, or EOF at the root.
    fn parse_nodes(&mut self, open: Option<Position>) -> Result<Block, ParseError> {
        let mut nodes = Vec::new();
        let mut semicolon = false;

        loop {
            let before = self.whitespace();

            match self.cursor.peek() {
                None => {
                    if let Some(open) = open {
                        return Err(self.error_at(ParseErrorKind::UnclosedBlock, open));
                    }
                    return Ok(Block {
                        nodes,
                        after: before,
                        semicolon,
                    });
                }
                Some('}') => {
                    if open.is_none() {
                        let here = self.cursor.position();
                        return Err(self.error_at(ParseErrorKind::UnexpectedCloseBrace, here));
                    }
                    self.cursor.advance();
                    return Ok(Block {
                        nodes,
                        after: before,
                        semicolon,
                    });
                }
                Some('/') if self.cursor.starts_with("/*") => {
                    nodes.push(Node::Comment(self.parse_comment(before)?));
                    semicolon = false;
                }
                Some('@') => {
                    let (node, ended_with_semicolon) = self.parse_at_rule(before)?;
                    nodes.push(node);
                    semicolon = ended_with_semicolon;
                }
                Some(_) => {
                    let (node, ended_with_semicolon) = self.parse_statement(before)?;
                    nodes.push(node);
                    semicolon = ended_with_semicolon;
                }
            }
        }
    }

    /// Collect whitespace and stray `;` in front of the next node.
    fn whitespace(&mut self) -> String {
        let start = self.cursor.offset();
        self.cursor
            .advance_while(|c| c.is_whitespace() || c == ';');
        let mut raw = std::mem::take(&mut self.carry);
        raw.push_str(self.cursor.slice(start, self.cursor.offset()));
        raw
    }

    // =========================================================================
    // NODES
    // =========================================================================

    fn parse_comment(&mut self, before: String) -> Result<Comment, ParseError> {
        let start = self.cursor.position();
        self.cursor.eat("/*");
        let text_start = self.cursor.offset();
        loop {
            if self.cursor.starts_with("*/") {
                let text = self.cursor.slice(text_start, self.cursor.offset()).to_string();
                self.cursor.eat("*/");
                return Ok(Comment {
                    text,
                    before,
                    span: Span::new(start, self.cursor.position()),
                });
            }
            if self.cursor.advance().is_none() {
                return Err(self.error_at(ParseErrorKind::UnterminatedComment, start));
            }
        }
    }

    fn parse_at_rule(&mut self, before: String) -> Result<(Node, bool), ParseError> {
        let start = self.cursor.position();
        self.cursor.advance(); // @

        let name_start = self.cursor.offset();
        self.cursor
            .advance_while(|c| c.is_alphanumeric() || c == '-' || c == '_');
        let name = self.cursor.slice(name_start, self.cursor.offset()).to_string();
        if name.is_empty() {
            return Err(self.error_at(ParseErrorKind::MissingAtRuleName, start));
        }

        let after_name_start = self.cursor.offset();
        self.cursor.advance_while(char::is_whitespace);
        let after_name = self
            .cursor
            .slice(after_name_start, self.cursor.offset())
            .to_string();

        let statement = self.scan_statement()?;
        let params = statement.text.to_string();
        let mut raws = AtRuleRaws {
            after_name,
            block: BlockRaws {
                before,
                ..BlockRaws::default()
            },
        };

        let (nodes, ended_with_semicolon) = match statement.terminator {
            Terminator::Open => {
                raws.block.between = statement.trailing.to_string();
                let block = self.parse_nodes(Some(statement.end))?;
                raws.block.after = block.after;
                raws.block.semicolon = block.semicolon;
                (Some(block.nodes), false)
            }
            Terminator::Semicolon => {
                raws.block.between = statement.trailing.to_string();
                (None, true)
            }
            Terminator::Close | Terminator::Eof => {
                self.carry = statement.trailing.to_string();
                (None, false)
            }
        };

        let at_rule = AtRule {
            name,
            params,
            nodes,
            raws,
            span: Span::new(start, self.cursor.position()),
        };
        Ok((Node::AtRule(at_rule), ended_with_semicolon))
    }

    /// A rule (statement ends with `{`) or a declaration.
    fn parse_statement(&mut self, before: String) -> Result<(Node, bool), ParseError> {
        let statement = self.scan_statement()?;

        if statement.terminator == Terminator::Open {
            let mut raws = BlockRaws {
                before,
                between: statement.trailing.to_string(),
                ..BlockRaws::default()
            };
            let block = self.parse_nodes(Some(statement.end))?;
            raws.after = block.after;
            raws.semicolon = block.semicolon;
            let rule = Rule {
                selector: statement.text.to_string(),
                nodes: block.nodes,
                raws,
                span: Span::new(statement.start, self.cursor.position()),
            };
            return Ok((Node::Rule(rule), false));
        }

        let Some(colon) = statement.text.find(':') else {
            return Err(ParseError::new(
                ParseErrorKind::MissingColon {
                    text: statement.text.to_string(),
                },
                Span::new(statement.start, statement.end),
            ));
        };

        let prop = statement.text[..colon].trim_end();
        let rest = &statement.text[colon + 1..];
        let value = rest.trim_start();
        let between = &statement.text[prop.len()..statement.text.len() - value.len()];

        let ended_with_semicolon = statement.terminator == Terminator::Semicolon;
        let after = if ended_with_semicolon {
            statement.trailing.to_string()
        } else {
            self.carry = statement.trailing.to_string();
            String::new()
        };

        let decl = Declaration {
            prop: prop.to_string(),
            value: value.to_string(),
            raws: DeclarationRaws {
                before,
                between: between.to_string(),
                after,
            },
            span: Span::new(statement.start, statement.end),
        };
        Ok((Node::Declaration(decl), ended_with_semicolon))
    }

    // =========================================================================
    // STATEMENT SCANNING
    // =========================================================================

    /// Advance to the next top-level `{`, `;`, `}` or EOF.
    ///
    /// Quoted strings, comments and parenthesised groups never terminate a
    /// statement.
    fn scan_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        let start = self.cursor.position();
        let mut depth = 0usize;

        let (end, terminator) = loop {
            let here = self.cursor.position();
            let Some(c) = self.cursor.peek() else {
                break (here, Terminator::Eof);
            };
            match c {
                '"' | '\'' => self.skip_string(c)?,
                '/' if self.cursor.starts_with("/*") => {
                    self.parse_comment(String::new())?;
                }
                '(' => {
                    depth += 1;
                    self.cursor.advance();
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    self.cursor.advance();
                }
                '{' if depth == 0 => {
                    self.cursor.advance();
                    break (here, Terminator::Open);
                }
                ';' if depth == 0 => {
                    self.cursor.advance();
                    break (here, Terminator::Semicolon);
                }
                '}' if depth == 0 => break (here, Terminator::Close),
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        };

        let raw = self.cursor.slice(start.byte, end.byte);
        let text = raw.trim_end();
        Ok(Statement {
            text,
            trailing: &raw[text.len()..],
            start,
            end,
            terminator,
        })
    }

    fn skip_string(&mut self, quote: char) -> Result<(), ParseError> {
        let start = self.cursor.position();
        self.cursor.advance(); // Opening quote
        loop {
            match self.cursor.advance() {
                None => return Err(self.error_at(ParseErrorKind::UnterminatedString, start)),
                Some('\\') => {
                    self.cursor.advance(); // Escaped char
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn error_at(&self, kind: ParseErrorKind, start: Position) -> ParseError {
        ParseError::new(kind, Span::new(start, self.cursor.position()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Stylesheet {
        Parser::new(source).parse().expect("valid stylesheet")
    }

    fn first_rule(sheet: &Stylesheet) -> &Rule {
        match &sheet.nodes[0] {
            Node::Rule(rule) => rule,
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rule_with_declaration() {
        let sheet = parse(".rule { font-size: 15px }");
        let rule = first_rule(&sheet);
        assert_eq!(rule.selector, ".rule");
        assert_eq!(rule.raws.between, " ");
        assert_eq!(rule.raws.after, " ");
        assert!(!rule.raws.semicolon);

        let decl = rule.declarations().next().expect("one declaration");
        assert_eq!(decl.prop, "font-size");
        assert_eq!(decl.value, "15px");
        assert_eq!(decl.raws.before, " ");
        assert_eq!(decl.raws.between, ": ");
        assert_eq!(decl.raws.after, "");
    }

    #[test]
    fn test_parse_trailing_semicolon() {
        let sheet = parse("a { color: red; }");
        assert!(first_rule(&sheet).raws.semicolon);
    }

    #[test]
    fn test_parse_quoted_semicolon() {
        let sheet = parse(".a { content: 'a;b'; }");
        let decl = first_rule(&sheet).declarations().next().cloned();
        assert_eq!(decl.map(|d| d.value), Some("'a;b'".to_string()));
    }

    #[test]
    fn test_parse_url_with_semicolon() {
        let sheet = parse(".a { background: url(data:image/png;base64,xyz) }");
        let decl = first_rule(&sheet).declarations().next().cloned();
        assert_eq!(
            decl.map(|d| d.value),
            Some("url(data:image/png;base64,xyz)".to_string())
        );
    }

    #[test]
    fn test_parse_media_at_rule() {
        let sheet = parse("@media (min-width: 500px) { .rule { font-size: 16px } }");
        let Node::AtRule(at_rule) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(at_rule.name, "media");
        assert_eq!(at_rule.params, "(min-width: 500px)");
        assert_eq!(at_rule.nodes.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_parse_statement_at_rule() {
        let sheet = parse("@import 'a.css';\n.a { margin: 0 }");
        let Node::AtRule(at_rule) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert!(at_rule.nodes.is_none());
        assert_eq!(at_rule.params, "'a.css'");
        assert_eq!(sheet.nodes.len(), 2);
    }

    #[test]
    fn test_parse_comment() {
        let sheet = parse("/* head */ a { b: c }");
        assert!(matches!(&sheet.nodes[0], Node::Comment(c) if c.text == " head "));
    }

    #[test]
    fn test_unclosed_block() {
        let err = Parser::new("a { b: c").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBlock);
        assert_eq!(err.span.start.byte, 2);
    }

    #[test]
    fn test_stray_close_brace() {
        let err = Parser::new("a { b: c } }").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCloseBrace);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Parser::new("a { content: 'x }").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Parser::new("a { /* x }").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_missing_colon() {
        let err = Parser::new("a { color red }").parse().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::MissingColon { .. }));
    }
}
