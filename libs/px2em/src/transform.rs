//! # Stylesheet Transform
//!
//! Walks a parsed [`Stylesheet`] and applies [`Px2Em::decide`] to every
//! declaration, tracking the enclosing selector and `@media` context.
//!
//! ## Example
//!
//! ```rust
//! use px2em::{Options, Px2Em};
//!
//! let css = Px2Em::new(Options::default())
//!     .process(".rule { font-size: 15px }", None)
//!     .unwrap();
//! assert_eq!(css, ".rule { font-size: 0.15em }");
//! ```

use px2em_stylesheet::{Node, ParseError, Stylesheet};
use serde::Serialize;

use crate::emitter::{apply, Decision, Emission};
use crate::engine::{DeclarationContext, Px2Em};

/// Counts of what one transform did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Declarations rewritten in place.
    pub replaced: usize,
    /// Fallback declarations inserted.
    pub fallbacks: usize,
    /// Conversions dropped because the block already held them.
    pub skipped_duplicates: usize,
    /// `@media` preludes rewritten.
    pub media_rewritten: usize,
    /// True when the whole file was excluded.
    pub excluded: bool,
}

impl Px2Em {
    /// Rewrite `sheet` in place. `from` is the source path used for file
    /// exclusion.
    pub fn transform(&self, sheet: &mut Stylesheet, from: Option<&str>) -> Report {
        let mut report = Report::default();
        if self.is_excluded(from) {
            tracing::debug!(path = from, "stylesheet excluded");
            report.excluded = true;
            return report;
        }

        self.walk(&mut sheet.nodes, None, false, &mut report);

        tracing::debug!(
            path = from,
            replaced = report.replaced,
            fallbacks = report.fallbacks,
            duplicates = report.skipped_duplicates,
            media = report.media_rewritten,
            "transformed stylesheet"
        );
        report
    }

    /// Parse, transform and print `css`.
    ///
    /// ## Errors
    ///
    /// Returns the [`ParseError`] if `css` cannot be parsed. Excluded files
    /// are returned verbatim without parsing.
    pub fn process(&self, css: &str, from: Option<&str>) -> Result<String, ParseError> {
        self.process_with_report(css, from).map(|(css, _)| css)
    }

    /// [`Px2Em::process`], also returning the [`Report`].
    ///
    /// ## Errors
    ///
    /// See [`Px2Em::process`].
    pub fn process_with_report(
        &self,
        css: &str,
        from: Option<&str>,
    ) -> Result<(String, Report), ParseError> {
        if self.is_excluded(from) {
            tracing::debug!(path = from, "stylesheet excluded");
            let report = Report {
                excluded: true,
                ..Report::default()
            };
            return Ok((css.to_string(), report));
        }

        let mut sheet = px2em_stylesheet::parse(css)?;
        let report = self.transform(&mut sheet, from);
        Ok((sheet.to_css(), report))
    }

    fn walk(
        &self,
        nodes: &mut Vec<Node>,
        selector: Option<&str>,
        in_media: bool,
        report: &mut Report,
    ) {
        let mut index = 0;
        while index < nodes.len() {
            let decision = match &mut nodes[index] {
                Node::Rule(rule) => {
                    self.walk(&mut rule.nodes, Some(rule.selector.as_str()), in_media, report);
                    None
                }
                Node::AtRule(at_rule) => {
                    let is_media = at_rule.is_named("media");
                    if is_media {
                        if let Some(params) = self.rewrite_media_params(&at_rule.params) {
                            at_rule.params = params;
                            report.media_rewritten += 1;
                        }
                    }
                    if let Some(children) = &mut at_rule.nodes {
                        self.walk(children, None, in_media || is_media, report);
                    }
                    None
                }
                Node::Declaration(decl) => Some(self.decide(&DeclarationContext {
                    prop: &decl.prop,
                    value: &decl.value,
                    selector,
                    in_media,
                })),
                Node::Comment(_) => None,
            };

            if let Some(decision) = decision.filter(|d| *d != Decision::Keep) {
                match apply(nodes, index, decision) {
                    Emission::Replaced => report.replaced += 1,
                    Emission::FallbackInserted => {
                        report.fallbacks += 1;
                        index += 1; // Step over the fallback
                    }
                    Emission::Duplicate => report.skipped_duplicates += 1,
                    Emission::Unchanged => {}
                }
            }
            index += 1;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
