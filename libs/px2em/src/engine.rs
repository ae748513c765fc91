//! # Engine
//!
//! [`Px2Em`] holds options resolved once: the unit table, the filters and
//! the emission mode. It rewrites single values and decides what happens
//! to each declaration; [`crate::transform`] walks whole stylesheets.

use config::constants::TARGET_UNIT;

use crate::emitter::Decision;
use crate::error::ConfigError;
use crate::filters::{is_file_excluded, is_prop_eligible, is_selector_blacklisted};
use crate::options::Options;
use crate::scanner::Scanner;
use crate::units::{format_number, to_fixed, UnitTable};

// =============================================================================
// DECLARATION CONTEXT
// =============================================================================

/// One declaration as seen by [`Px2Em::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationContext<'a> {
    /// Property name.
    pub prop: &'a str,
    /// Raw value text.
    pub value: &'a str,
    /// Selector of the enclosing rule; `None` directly inside an at-rule or
    /// at the root.
    pub selector: Option<&'a str>,
    /// True when an enclosing at-rule is `@media`.
    pub in_media: bool,
}

// =============================================================================
// PX2EM
// =============================================================================

/// Configured converter.
///
/// ## Example
///
/// ```rust
/// use px2em::{Options, Px2Em};
///
/// let px2em = Px2Em::new(Options::default());
/// assert_eq!(px2em.rewrite_value("0 0 20px 20px"), "0 0 0.2em 0.2em");
/// ```
#[derive(Debug, Clone)]
pub struct Px2Em {
    options: Options,
    units: UnitTable,
}

impl Px2Em {
    /// Resolve `options`, falling back to the default root value (with a
    /// warning) if the `px` divisor is unusable.
    pub fn new(options: Options) -> Self {
        let units = UnitTable::resolve_lenient(&options.root_value);
        Self { options, units }
    }

    /// Resolve `options`, rejecting an unusable `px` divisor.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidRootValue`] when the divisor is zero, negative
    /// or not finite.
    pub fn try_new(options: Options) -> Result<Self, ConfigError> {
        let units = UnitTable::resolve(&options.root_value)?;
        Ok(Self { options, units })
    }

    /// Options this converter was built from.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolved unit table.
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Rewrite every convertible token in `value`.
    ///
    /// Ignored tokens lose their marker and keep their unit. Tokens below
    /// `min_pixel_value` are copied unchanged. Everything else becomes
    /// `value / divisor` rounded to `unit_precision` digits, with a bare `0`
    /// for results that round to zero.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em::{Options, Px2Em};
    ///
    /// let px2em = Px2Em::new(Options {
    ///     ignore_identifier: Some("00".to_string()),
    ///     ..Options::default()
    /// });
    /// assert_eq!(px2em.rewrite_value("0 0 00.5px 16px"), "0 0 .5px 0.16em");
    /// assert_eq!(px2em.rewrite_value("url(16px.png) 0.0001px"), "url(16px.png) 0");
    /// ```
    pub fn rewrite_value(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut copied = 0;

        let scanner = Scanner::new(value, &self.units, self.options.ignore_identifier.as_deref());
        for found in scanner {
            out.push_str(&value[copied..found.span.start]);
            copied = found.span.end;

            let original = &value[found.span.clone()];
            if found.ignored {
                out.push_str(found.token(value));
            } else if found.value.abs() < self.options.min_pixel_value {
                out.push_str(original);
            } else if let Some(converted) = self.convert(found.value, found.divisor) {
                tracing::trace!(from = original, to = %converted, "converted length");
                out.push_str(&converted);
            } else {
                tracing::debug!(token = original, "quotient is not finite; left unconverted");
                out.push_str(original);
            }
        }

        out.push_str(&value[copied..]);
        out
    }

    /// `None` when the quotient is not a finite number.
    fn convert(&self, value: f64, divisor: f64) -> Option<String> {
        let fixed = to_fixed(value / divisor, self.options.unit_precision);
        if !fixed.is_finite() {
            return None;
        }
        if fixed == 0.0 {
            Some(format_number(fixed))
        } else {
            Some(format!("{}{TARGET_UNIT}", format_number(fixed)))
        }
    }

    /// Decide what to do with one declaration.
    ///
    /// Blacklisted selectors, ineligible properties and values that would
    /// not change are kept. Otherwise the converted value either replaces
    /// the original or is appended as a fallback, per `replace`.
    pub fn decide(&self, ctx: &DeclarationContext<'_>) -> Decision {
        if let Some(selector) = ctx.selector {
            if is_selector_blacklisted(selector, &self.options.selector_black_list) {
                tracing::debug!(selector, prop = ctx.prop, "selector blacklisted");
                return Decision::Keep;
            }
        }

        if !is_prop_eligible(
            ctx.prop,
            &self.options.prop_white_list,
            &self.options.prop_black_list,
        ) {
            tracing::debug!(prop = ctx.prop, "property not eligible");
            return Decision::Keep;
        }

        // Cheap reject before scanning
        if !self.units.units().any(|unit| ctx.value.contains(unit)) {
            return Decision::Keep;
        }

        let rewritten = self.rewrite_value(ctx.value);
        if rewritten == ctx.value {
            return Decision::Keep;
        }

        tracing::trace!(
            prop = ctx.prop,
            from = ctx.value,
            to = %rewritten,
            in_media = ctx.in_media,
            "rewrote declaration"
        );
        if self.options.replace {
            Decision::Replace(rewritten)
        } else {
            Decision::AppendFallback(rewritten)
        }
    }

    /// True if the stylesheet at `path` must pass through untouched.
    pub fn is_excluded(&self, path: Option<&str>) -> bool {
        is_file_excluded(path, self.options.exclude.as_ref())
    }

    /// Rewrite an `@media` prelude. `None` when `media_query` is off or
    /// nothing changes.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em::{Options, Px2Em};
    ///
    /// let px2em = Px2Em::new(Options { media_query: true, ..Options::default() });
    /// assert_eq!(
    ///     px2em.rewrite_media_params("(min-width: 500px)").as_deref(),
    ///     Some("(min-width: 5em)")
    /// );
    /// assert_eq!(px2em.rewrite_media_params("print"), None);
    /// ```
    pub fn rewrite_media_params(&self, params: &str) -> Option<String> {
        if !self.options.media_query {
            return None;
        }
        let rewritten = self.rewrite_value(params);
        (rewritten != params).then_some(rewritten)
    }
}

impl Default for Px2Em {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{RootValue, SelectorMatcher};
    use std::collections::BTreeMap;
    use tracing_test::traced_test;

    fn ctx<'a>(prop: &'a str, value: &'a str) -> DeclarationContext<'a> {
        DeclarationContext {
            prop,
            value,
            selector: Some(".rule"),
            in_media: false,
        }
    }

    // =========================================================================
    // rewrite_value
    // =========================================================================

    #[test]
    fn test_default_root_value() {
        let px2em = Px2Em::default();
        assert_eq!(px2em.rewrite_value("15px"), "0.15em");
        assert_eq!(px2em.rewrite_value("-0.2px"), "-0.002em");
    }

    #[test]
    fn test_custom_root_value() {
        let px2em = Px2Em::new(Options {
            root_value: RootValue::Uniform(10.0),
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("15px"), "1.5em");
    }

    #[test]
    fn test_precision() {
        let px2em = Px2Em::new(Options {
            root_value: RootValue::Uniform(16.0),
            unit_precision: 2,
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("15px"), "0.94em");
    }

    #[test]
    fn test_zero_result_has_no_unit() {
        let px2em = Px2Em::new(Options {
            unit_precision: 1,
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("1px solid"), "0 solid");
    }

    #[test]
    fn test_min_pixel_value_is_absolute() {
        let px2em = Px2Em::new(Options {
            min_pixel_value: 2.0,
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("1px -1px 2px"), "1px -1px 0.02em");
    }

    #[test]
    fn test_ignored_token_skips_min_value_check() {
        let px2em = Px2Em::new(Options {
            min_pixel_value: 50.0,
            ignore_identifier: Some("00".to_string()),
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("001px 2px"), "1px 2px");
    }

    #[test]
    fn test_sign_before_ignore_marker_is_kept() {
        let px2em = Px2Em::new(Options {
            ignore_identifier: Some("00".to_string()),
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("-00.5px +001px"), "-.5px +1px");
        assert_eq!(px2em.rewrite_value("-16px -0016px"), "-0.16em -16px");
    }

    #[traced_test]
    #[test]
    fn test_non_finite_quotient_is_left_alone() {
        let huge = format!("1{}px", "0".repeat(400));
        let px2em = Px2Em::default();
        assert_eq!(px2em.rewrite_value(&format!("{huge} 10px")), format!("{huge} 0.1em"));
        assert!(logs_contain("not finite"));

        let mut map = BTreeMap::new();
        map.insert("px".to_string(), 100.0);
        map.insert("rpx".to_string(), 0.0);
        let px2em = Px2Em::new(Options {
            root_value: RootValue::PerUnit(map),
            ..Options::default()
        });
        assert_eq!(px2em.rewrite_value("16rpx 0rpx"), "16rpx 0rpx");
    }

    #[test]
    fn test_untouched_text_is_copied() {
        let px2em = Px2Em::default();
        let value = "calc(100% - 'a 16px' - 20em) url(16px.png)";
        assert_eq!(px2em.rewrite_value(value), value);
    }

    // =========================================================================
    // decide
    // =========================================================================

    #[test]
    fn test_decide_replace_and_fallback() {
        let px2em = Px2Em::default();
        assert_eq!(
            px2em.decide(&ctx("font-size", "15px")),
            Decision::Replace("0.15em".to_string())
        );

        let px2em = Px2Em::new(Options {
            replace: false,
            ..Options::default()
        });
        assert_eq!(
            px2em.decide(&ctx("font-size", "15px")),
            Decision::AppendFallback("0.15em".to_string())
        );
    }

    #[test]
    fn test_decide_keeps_unchanged_values() {
        let px2em = Px2Em::default();
        assert_eq!(px2em.decide(&ctx("color", "red")), Decision::Keep);
        assert_eq!(px2em.decide(&ctx("content", "'16px'")), Decision::Keep);
    }

    #[traced_test]
    #[test]
    fn test_decide_honors_selector_blacklist() {
        let px2em = Px2Em::new(Options {
            selector_black_list: vec![SelectorMatcher::text(".rule")],
            ..Options::default()
        });
        assert_eq!(px2em.decide(&ctx("margin", "4px")), Decision::Keep);
        assert!(logs_contain("selector blacklisted"));

        let no_selector = DeclarationContext {
            selector: None,
            ..ctx("margin", "4px")
        };
        assert_eq!(
            px2em.decide(&no_selector),
            Decision::Replace("0.04em".to_string())
        );
    }

    #[test]
    fn test_decide_honors_prop_lists() {
        let px2em = Px2Em::new(Options {
            prop_white_list: vec!["margin".to_string()],
            ..Options::default()
        });
        assert_eq!(px2em.decide(&ctx("padding", "4px")), Decision::Keep);
        assert_ne!(px2em.decide(&ctx("margin", "4px")), Decision::Keep);
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_try_new_rejects_zero_root() {
        let options = Options {
            root_value: RootValue::Uniform(0.0),
            ..Options::default()
        };
        assert!(Px2Em::try_new(options.clone()).is_err());
        assert_eq!(Px2Em::new(options).rewrite_value("10px"), "0.1em");
    }

    #[test]
    fn test_media_params_need_opt_in() {
        let px2em = Px2Em::default();
        assert_eq!(px2em.rewrite_media_params("(min-width: 500px)"), None);
    }
}
