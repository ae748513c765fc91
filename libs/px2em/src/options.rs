//! # Options
//!
//! User-facing configuration for the converter. Dynamic option shapes
//! (number or per-unit map, string or pattern or predicate) are tagged
//! variants that [`crate::Px2Em::new`] resolves once.
//!
//! ## Example
//!
//! ```rust
//! use px2em::{Options, RootValue};
//!
//! let options = Options::from_json(r#"{ "rootValue": { "px": 50, "rpx": 100 }, "replace": false }"#)
//!     .unwrap();
//! assert!(matches!(options.root_value, RootValue::PerUnit(_)));
//! assert!(!options.replace);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use config::constants::{
    DEFAULT_MEDIA_QUERY, DEFAULT_MIN_PIXEL_VALUE, DEFAULT_REPLACE, DEFAULT_ROOT_VALUE,
    DEFAULT_UNIT_PRECISION,
};
use regex::{Regex, RegexBuilder};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ConfigError;

// =============================================================================
// ROOT VALUE
// =============================================================================

/// How many source units make one `em`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RootValue {
    /// One divisor for every source unit.
    Uniform(f64),
    /// A divisor per unit, e.g. `{ "px": 50, "rpx": 100 }`.
    PerUnit(BTreeMap<String, f64>),
}

impl Default for RootValue {
    fn default() -> Self {
        RootValue::Uniform(DEFAULT_ROOT_VALUE)
    }
}

// =============================================================================
// PATTERN LITERALS
// =============================================================================

/// Compile a `/body/flags` literal. Returns `None` for plain strings.
///
/// Flags `i`, `m`, `s` map to the regex options of the same meaning; `g`,
/// `u` and `y` are accepted and ignored.
fn pattern_literal(raw: &str) -> Option<Result<Regex, ConfigError>> {
    let body = raw.strip_prefix('/')?;
    let close = body.rfind('/')?;
    let (pattern, flags) = (&body[..close], &body[close + 1..]);
    if pattern.is_empty() || !flags.chars().all(|f| "gimsuy".contains(f)) {
        return None;
    }

    let compiled = RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        });
    Some(compiled)
}

// =============================================================================
// SELECTOR MATCHER
// =============================================================================

/// One `selectorBlackList` entry.
///
/// Plain strings match by substring; patterns match anywhere unless
/// anchored.
///
/// ## Example
///
/// ```rust
/// use px2em::SelectorMatcher;
///
/// let text = SelectorMatcher::text("body$");
/// assert!(text.matches(".class-body$"));
/// assert!(!text.matches("body"));
///
/// let pattern = SelectorMatcher::pattern("^body$").unwrap();
/// assert!(pattern.matches("body"));
/// assert!(!pattern.matches(".class-body"));
/// ```
#[derive(Debug, Clone)]
pub enum SelectorMatcher {
    /// Substring containment.
    Text(String),
    /// Regular expression search.
    Pattern(Regex),
}

impl SelectorMatcher {
    /// Plain substring matcher.
    pub fn text(text: impl Into<String>) -> Self {
        SelectorMatcher::Text(text.into())
    }

    /// Regular expression matcher.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidPattern`] if `pattern` does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(SelectorMatcher::Pattern)
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Parse the JSON form: `/body/flags` is a pattern, anything else text.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidPattern`] for a pattern literal that does not
    /// compile.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match pattern_literal(raw) {
            Some(compiled) => compiled.map(SelectorMatcher::Pattern),
            None => Ok(SelectorMatcher::text(raw)),
        }
    }

    /// Whether `selector` is excluded by this entry.
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            SelectorMatcher::Text(text) => selector.contains(text.as_str()),
            SelectorMatcher::Pattern(pattern) => pattern.is_match(selector),
        }
    }
}

impl<'de> Deserialize<'de> for SelectorMatcher {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SelectorMatcher::parse(&raw).map_err(D::Error::custom)
    }
}

// =============================================================================
// EXCLUDE
// =============================================================================

/// Shared predicate over a stylesheet's source path.
pub type PathPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Matcher for whole files that must pass through untouched.
///
/// ## Example
///
/// ```rust
/// use px2em::Exclude;
///
/// let exclude = Exclude::parse("/(node_modules)/").unwrap();
/// assert!(exclude.matches("node_modules/third.css"));
/// assert!(!exclude.matches("lib/own.css"));
///
/// let exclude = Exclude::predicate(|path| path.ends_with(".min.css"));
/// assert!(exclude.matches("dist/app.min.css"));
/// ```
#[derive(Clone)]
pub enum Exclude {
    /// Substring containment.
    Text(String),
    /// Regular expression search.
    Pattern(Regex),
    /// Caller-supplied test.
    Predicate(PathPredicate),
}

impl Exclude {
    /// Wrap a closure as a predicate matcher.
    pub fn predicate(test: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Exclude::Predicate(Arc::new(test))
    }

    /// Parse the JSON form: `/body/flags` is a pattern, anything else text.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidPattern`] for a pattern literal that does not
    /// compile.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match pattern_literal(raw) {
            Some(compiled) => compiled.map(Exclude::Pattern),
            None => Ok(Exclude::Text(raw.to_string())),
        }
    }

    /// Whether the file at `path` is excluded.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Exclude::Text(text) => path.contains(text.as_str()),
            Exclude::Pattern(pattern) => pattern.is_match(path),
            Exclude::Predicate(test) => test(path),
        }
    }
}

impl fmt::Debug for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclude::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Exclude::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Exclude::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Exclude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Exclude::parse(&raw).map_err(D::Error::custom)
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Converter options. Every field has a default; see [`Options::default`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Divisor(s) for source units.
    pub root_value: RootValue,
    /// Fractional digits kept after conversion.
    pub unit_precision: u32,
    /// Selectors whose blocks are left alone.
    pub selector_black_list: Vec<SelectorMatcher>,
    /// Properties eligible for conversion (exact names); empty means all.
    pub prop_white_list: Vec<String>,
    /// Property substrings that are never converted.
    pub prop_black_list: Vec<String>,
    /// Replace in place (`true`) or append a converted fallback (`false`).
    pub replace: bool,
    /// Also rewrite `@media` preludes.
    pub media_query: bool,
    /// Tokens with an absolute value below this are left alone.
    pub min_pixel_value: f64,
    /// Files that pass through untouched.
    pub exclude: Option<Exclude>,
    /// Marker that opts the following number out of conversion.
    pub ignore_identifier: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_value: RootValue::default(),
            unit_precision: DEFAULT_UNIT_PRECISION,
            selector_black_list: Vec::new(),
            prop_white_list: Vec::new(),
            prop_black_list: Vec::new(),
            replace: DEFAULT_REPLACE,
            media_query: DEFAULT_MEDIA_QUERY,
            min_pixel_value: DEFAULT_MIN_PIXEL_VALUE,
            exclude: None,
            ignore_identifier: None,
        }
    }
}

impl Options {
    /// Decode options from JSON text.
    ///
    /// ## Errors
    ///
    /// Only malformed JSON is an error. Field-level problems fall back to
    /// defaults; see [`Options::from_json_value`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json_value(&value))
    }

    /// Decode options key by key.
    ///
    /// Unknown keys are ignored. A key whose value has the wrong shape keeps
    /// its default and logs a warning. `null` clears optional fields.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em::Options;
    /// use serde_json::json;
    ///
    /// let options = Options::from_json_value(&json!({
    ///     "unitPrecision": "two",
    ///     "minPixelValue": 2,
    ///     "somethingElse": true,
    /// }));
    /// assert_eq!(options.unit_precision, 5);
    /// assert_eq!(options.min_pixel_value, 2.0);
    /// ```
    pub fn from_json_value(value: &Value) -> Self {
        let mut options = Self::default();
        let Some(fields) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!(%value, "options must be an object; using defaults");
            }
            return options;
        };

        for (key, raw) in fields {
            match key.as_str() {
                "rootValue" => assign(&mut options.root_value, key, raw),
                "unitPrecision" => assign(&mut options.unit_precision, key, raw),
                "selectorBlackList" => assign(&mut options.selector_black_list, key, raw),
                "propWhiteList" => assign(&mut options.prop_white_list, key, raw),
                "propBlackList" => assign(&mut options.prop_black_list, key, raw),
                "replace" => assign(&mut options.replace, key, raw),
                "mediaQuery" => assign(&mut options.media_query, key, raw),
                "minPixelValue" => assign(&mut options.min_pixel_value, key, raw),
                "exclude" => assign(&mut options.exclude, key, raw),
                "ignoreIdentifier" => assign(&mut options.ignore_identifier, key, raw),
                _ => tracing::debug!(key = %key, "ignoring unknown option"),
            }
        }

        options
    }
}

/// Overwrite `slot` if `raw` decodes as `T`; keep the default otherwise.
fn assign<T: DeserializeOwned>(slot: &mut T, key: &str, raw: &Value) {
    match T::deserialize(raw) {
        Ok(value) => *slot = value,
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "invalid option value; keeping default");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.root_value, RootValue::Uniform(100.0));
        assert_eq!(options.unit_precision, 5);
        assert!(options.replace);
        assert!(!options.media_query);
        assert!(options.prop_white_list.is_empty());
        assert!(options.exclude.is_none());
    }

    #[test]
    fn test_root_value_shapes() {
        let options = Options::from_json_value(&json!({ "rootValue": 10 }));
        assert_eq!(options.root_value, RootValue::Uniform(10.0));

        let options = Options::from_json_value(&json!({ "rootValue": { "px": 50, "rpx": 100 } }));
        let RootValue::PerUnit(map) = options.root_value else {
            panic!("expected per-unit root value");
        };
        assert_eq!(map.get("rpx"), Some(&100.0));
    }

    #[test]
    fn test_selector_matchers_from_json() {
        let options = Options::from_json_value(&json!({
            "selectorBlackList": [".rule2", "/^body$/"]
        }));
        assert!(matches!(options.selector_black_list[0], SelectorMatcher::Text(_)));
        assert!(matches!(options.selector_black_list[1], SelectorMatcher::Pattern(_)));
    }

    #[test]
    fn test_pattern_flags() {
        let matcher = SelectorMatcher::parse("/^BODY$/i").expect("valid pattern");
        assert!(matcher.matches("body"));
    }

    #[test]
    fn test_slash_text_is_not_a_pattern() {
        // Unknown flags keep the literal text
        let matcher = SelectorMatcher::parse("/a/b").expect("plain text");
        assert!(matches!(matcher, SelectorMatcher::Text(_)));
        let matcher = SelectorMatcher::parse("/").expect("plain text");
        assert!(matches!(matcher, SelectorMatcher::Text(_)));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = SelectorMatcher::parse("/(/").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_exclude_from_json() {
        let options = Options::from_json_value(&json!({ "exclude": "/(node_modules)/" }));
        let exclude = options.exclude.expect("exclude set");
        assert!(exclude.matches("node_modules/third.css"));

        let options = Options::from_json_value(&json!({ "exclude": "vendor" }));
        assert!(matches!(options.exclude, Some(Exclude::Text(_))));
    }

    #[test]
    fn test_null_clears_optional() {
        let options = Options::from_json_value(&json!({ "ignoreIdentifier": null }));
        assert!(options.ignore_identifier.is_none());
    }

    #[traced_test]
    #[test]
    fn test_bad_field_keeps_default() {
        let options = Options::from_json_value(&json!({ "replace": "no", "unitPrecision": -1 }));
        assert!(options.replace);
        assert_eq!(options.unit_precision, 5);
        assert!(logs_contain("invalid option value"));
    }

    #[traced_test]
    #[test]
    fn test_non_object_uses_defaults() {
        let options = Options::from_json_value(&json!([1, 2]));
        assert_eq!(options.unit_precision, 5);
        assert!(logs_contain("options must be an object"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Options::from_json("{ rootValue: 1 }").is_err());
    }

    #[test]
    fn test_exclude_debug_hides_closure() {
        let exclude = Exclude::predicate(|_| true);
        assert_eq!(format!("{exclude:?}"), "Predicate(..)");
    }
}
