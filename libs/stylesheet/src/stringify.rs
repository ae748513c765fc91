//! # Stringifier
//!
//! Writes a [`Stylesheet`] back to CSS text using the raws captured by the
//! parser. Nodes created programmatically fall back to whatever raws they
//! were given.

use crate::tree::{AtRule, BlockRaws, Comment, Declaration, Node, Rule, Stylesheet};

/// Serialize a stylesheet.
///
/// ## Example
///
/// ```rust
/// use px2em_stylesheet::{parse, stringify};
///
/// let css = "@media print { .a { margin: 0 } }";
/// assert_eq!(stringify(&parse(css).unwrap()), css);
/// ```
pub fn stringify(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &sheet.nodes, sheet.semicolon);
    out.push_str(&sheet.after);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], semicolon: bool) {
    let last = nodes.len().saturating_sub(1);
    for (index, node) in nodes.iter().enumerate() {
        write_node(out, node);
        if node.takes_semicolon() && (index != last || semicolon) {
            out.push(';');
        }
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Rule(rule) => write_rule(out, rule),
        Node::AtRule(at_rule) => write_at_rule(out, at_rule),
        Node::Declaration(decl) => write_declaration(out, decl),
        Node::Comment(comment) => write_comment(out, comment),
    }
}

fn write_block(out: &mut String, nodes: &[Node], raws: &BlockRaws) {
    out.push_str(&raws.between);
    out.push('{');
    write_nodes(out, nodes, raws.semicolon);
    out.push_str(&raws.after);
    out.push('}');
}

fn write_rule(out: &mut String, rule: &Rule) {
    out.push_str(&rule.raws.before);
    out.push_str(&rule.selector);
    write_block(out, &rule.nodes, &rule.raws);
}

fn write_at_rule(out: &mut String, at_rule: &AtRule) {
    out.push_str(&at_rule.raws.block.before);
    out.push('@');
    out.push_str(&at_rule.name);
    out.push_str(&at_rule.raws.after_name);
    out.push_str(&at_rule.params);
    match &at_rule.nodes {
        Some(nodes) => write_block(out, nodes, &at_rule.raws.block),
        None => out.push_str(&at_rule.raws.block.between),
    }
}

fn write_declaration(out: &mut String, decl: &Declaration) {
    out.push_str(&decl.raws.before);
    out.push_str(&decl.prop);
    out.push_str(&decl.raws.between);
    out.push_str(&decl.value);
    out.push_str(&decl.raws.after);
}

fn write_comment(out: &mut String, comment: &Comment) {
    out.push_str(&comment.before);
    out.push_str("/*");
    out.push_str(&comment.text);
    out.push_str("*/");
}

// =============================================================================
// TESTS
// =============================================================================
