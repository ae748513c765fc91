/// WASM-compatible diagnostic types.
///
/// This module provides JavaScript-compatible wrappers for parse and
/// options errors.

use px2em_stylesheet::ParseError;
use wasm_bindgen::prelude::*;

use crate::TransformError;

/// A diagnostic message for JavaScript.
///
/// Positions are byte offsets into the stylesheet; `line` and `column`
/// are 1-based and zero when the error has no source location.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const diag = check(".a {").get(0);
/// // console.log(diag.message(), diag.line(), diag.column());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    start: usize,
    end: usize,
    line: usize,
    column: usize,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Returns the start position in the source.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end position in the source.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the 1-based line of the start position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column of the start position.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Diagnostic {
    /// Wraps the message in a JavaScript `Error`.
    pub(crate) fn into_js_error(self) -> JsValue {
        JsError::new(&self.message).into()
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Self {
            message: err.to_string(),
            start: err.span.start.byte,
            end: err.span.end.byte,
            line: err.span.start.line + 1,
            column: err.span.start.column + 1,
        }
    }
}

impl From<&TransformError> for Diagnostic {
    fn from(err: &TransformError) -> Self {
        match err {
            TransformError::Parse(parse) => parse.into(),
            TransformError::Options(_) => Self {
                message: err.to_string(),
                start: 0,
                end: 0,
                line: 0,
                column: 0,
            },
        }
    }
}

/// A collection of diagnostics.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

#[wasm_bindgen]
impl DiagnosticList {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns a diagnostic by index.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.diagnostics.get(index).cloned()
    }
}

impl DiagnosticList {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Parses `css` without converting it and reports any syntax error.
///
/// # Examples
/// ```
/// assert!(px2em_wasm::check(".a { margin: 1px }").is_empty());
/// assert_eq!(px2em_wasm::check(".a {").len(), 1);
/// ```
#[wasm_bindgen]
pub fn check(css: &str) -> DiagnosticList {
    match px2em_stylesheet::parse(css) {
        Ok(_) => DiagnosticList::default(),
        Err(err) => DiagnosticList::new(vec![Diagnostic::from(&err)]),
    }
}
