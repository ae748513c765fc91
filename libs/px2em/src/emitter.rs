//! # Declaration Emitter
//!
//! Applies a [`Decision`] to the declaration list of a block: replace the
//! value in place, or insert a converted fallback right after the original.
//!
//! ## Example
//!
//! ```rust
//! use px2em::emitter::{apply, Decision, Emission};
//! use px2em_stylesheet::{Declaration, Node};
//!
//! let mut nodes = vec![Node::Declaration(Declaration::new("font-size", "15px"))];
//! let emission = apply(&mut nodes, 0, Decision::AppendFallback("0.15em".to_string()));
//! assert_eq!(emission, Emission::FallbackInserted);
//! assert_eq!(nodes.len(), 2);
//! ```

use px2em_stylesheet::Node;

/// What to do with one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave it as it is.
    Keep,
    /// Overwrite its value.
    Replace(String),
    /// Keep it and insert a copy with this value after it.
    AppendFallback(String),
}

/// What [`apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Nothing changed.
    Unchanged,
    /// The value was overwritten.
    Replaced,
    /// A fallback was inserted at `index + 1`.
    FallbackInserted,
    /// The block already holds the converted declaration.
    Duplicate,
}

/// Apply `decision` to the declaration at `nodes[index]`.
///
/// Nothing is emitted when a declaration with the same property and the
/// converted value already exists in the block, so repeated runs are
/// idempotent. Non-declaration nodes are left alone.
pub fn apply(nodes: &mut Vec<Node>, index: usize, decision: Decision) -> Emission {
    let value = match &decision {
        Decision::Keep => return Emission::Unchanged,
        Decision::Replace(value) | Decision::AppendFallback(value) => value,
    };

    let Some(prop) = nodes
        .get(index)
        .and_then(Node::as_declaration)
        .map(|decl| decl.prop.clone())
    else {
        return Emission::Unchanged;
    };

    let exists = nodes
        .iter()
        .filter_map(Node::as_declaration)
        .any(|decl| decl.prop == prop && decl.value == *value);
    if exists {
        return Emission::Duplicate;
    }

    match decision {
        Decision::Keep => Emission::Unchanged,
        Decision::Replace(value) => {
            if let Some(decl) = nodes.get_mut(index).and_then(Node::as_declaration_mut) {
                decl.value = value;
            }
            Emission::Replaced
        }
        Decision::AppendFallback(value) => {
            let fallback = nodes
                .get(index)
                .and_then(Node::as_declaration)
                .map(|decl| decl.clone_with_value(value));
            match fallback {
                Some(fallback) => {
                    nodes.insert(index + 1, Node::Declaration(fallback));
                    Emission::FallbackInserted
                }
                None => Emission::Unchanged,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
