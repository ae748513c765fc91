//! WASM-facing entry points for the px2em converter.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests interact with the internal helper
//! `transform_internal` to avoid depending on a JS host.
//!
//! ```
//! let (css, _) = px2em_wasm::transform_internal(".a { margin: 10px }", "", None).unwrap();
//! assert_eq!(css, ".a { margin: 0.1em }");
//! ```

use config::constants::DEFAULT_ROOT_VALUE;
use px2em::{ConfigError, Options, Px2Em, Report};
use px2em_stylesheet::ParseError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod diagnostics;

pub use diagnostics::{check, Diagnostic, DiagnosticList};

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "px2em-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the root value used when none is configured.
///
/// # Examples
/// ```
/// assert_eq!(px2em_wasm::default_root_value(), 100.0);
/// ```
#[wasm_bindgen]
pub fn default_root_value() -> f64 {
    DEFAULT_ROOT_VALUE
}

/// Errors surfaced by [`transform_internal`].
#[derive(Debug, Error)]
pub enum TransformError {
    /// The options JSON was malformed.
    #[error(transparent)]
    Options(#[from] ConfigError),
    /// The stylesheet could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Converts `px`/`rpx` lengths in `css` to `em`.
///
/// `options_json` uses the camelCase option names (`rootValue`,
/// `unitPrecision`, ...); an empty string means defaults. `from` is the
/// stylesheet path checked against `exclude`.
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// for malformed options or unparsable CSS.
///
/// # Examples
/// ```no_run
/// // In JavaScript: transform(".a { margin: 10px }", '{"rootValue": 10}');
/// ```
#[wasm_bindgen]
pub fn transform(css: &str, options_json: &str, from: Option<String>) -> Result<String, JsValue> {
    transform_internal(css, options_json, from.as_deref())
        .map(|(css, _)| css)
        .map_err(|err| Diagnostic::from(&err).into_js_error())
}

/// Result of [`transform_with_report`].
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const result = transform_with_report(css, "{}");
/// // console.log(result.css(), result.replaced());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct TransformResult {
    css: String,
    report: Report,
}

#[wasm_bindgen]
impl TransformResult {
    /// Returns the converted stylesheet.
    pub fn css(&self) -> String {
        self.css.clone()
    }

    /// Returns the number of declarations rewritten in place.
    pub fn replaced(&self) -> usize {
        self.report.replaced
    }

    /// Returns the number of fallback declarations inserted.
    pub fn fallbacks(&self) -> usize {
        self.report.fallbacks
    }

    /// Returns the number of conversions skipped as duplicates.
    pub fn skipped_duplicates(&self) -> usize {
        self.report.skipped_duplicates
    }

    /// Returns the number of `@media` preludes rewritten.
    pub fn media_rewritten(&self) -> usize {
        self.report.media_rewritten
    }

    /// Returns true if the file matched `exclude` and was left untouched.
    pub fn excluded(&self) -> bool {
        self.report.excluded
    }
}

/// Same as [`transform`], also returning what was changed.
///
/// # Errors
/// See [`transform`].
#[wasm_bindgen]
pub fn transform_with_report(
    css: &str,
    options_json: &str,
    from: Option<String>,
) -> Result<TransformResult, JsValue> {
    transform_internal(css, options_json, from.as_deref())
        .map(|(css, report)| TransformResult { css, report })
        .map_err(|err| Diagnostic::from(&err).into_js_error())
}

/// Host-only helper behind [`transform`] that exposes Rust error types.
///
/// # Examples
/// ```
/// let (css, report) =
///     px2em_wasm::transform_internal(".a { margin: 10px }", r#"{"replace": false}"#, None).unwrap();
/// assert_eq!(css, ".a { margin: 10px; margin: 0.1em }");
/// assert_eq!(report.fallbacks, 1);
/// ```
pub fn transform_internal(
    css: &str,
    options_json: &str,
    from: Option<&str>,
) -> Result<(String, Report), TransformError> {
    let options = if options_json.trim().is_empty() {
        Options::default()
    } else {
        Options::from_json(options_json)?
    };
    Ok(Px2Em::new(options).process_with_report(css, from)?)
}
