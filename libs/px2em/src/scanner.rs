//! # Value Scanner
//!
//! Finite-state scan over a CSS value that yields every `<number><unit>`
//! token outside quoted strings and `url(...)` arguments.
//!
//! ## States
//!
//! ```text
//! Normal ──'──▶ SingleQuote ──'──▶ Normal
//! Normal ──"──▶ DoubleQuote ──"──▶ Normal
//! Normal ─url(─▶ Url ──)──▶ Normal
//! ```
//!
//! Tokens are only recognized in `Normal`.
//!
//! ## Example
//!
//! ```rust
//! use px2em::{RootValue, Scanner, UnitTable};
//!
//! let units = UnitTable::resolve_lenient(&RootValue::default());
//! let found: Vec<_> = Scanner::new("1px 'x 2px' url(3px.png) 4rpx", &units, None)
//!     .map(|m| m.literal)
//!     .collect();
//! assert_eq!(found, vec!["1", "4"]);
//! ```

use std::ops::Range;

use px2em_stylesheet::Cursor;

use crate::units::UnitTable;

// =============================================================================
// STATE
// =============================================================================

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any string or `url(`; tokens are recognized here.
    Normal,
    /// Inside `'...'`.
    SingleQuote,
    /// Inside `"..."`.
    DoubleQuote,
    /// Inside `url(...)`; `quote` is set while inside a quoted argument.
    Url {
        /// Open quote character within the argument, if any.
        quote: Option<char>,
    },
}

// =============================================================================
// MATCH
// =============================================================================

/// One `<number><unit>` token found by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'v> {
    /// Bytes to replace in the value, ignore marker included.
    pub span: Range<usize>,
    /// Bytes of the numeric literal (sign included).
    pub number: Range<usize>,
    /// Numeric literal text as written, e.g. `-.5`.
    pub literal: &'v str,
    /// Parsed value of the literal.
    pub value: f64,
    /// Matched unit suffix.
    pub unit: &'v str,
    /// Divisor for [`Match::unit`].
    pub divisor: f64,
    /// True when the ignore marker opted this token out.
    pub ignored: bool,
}

impl<'v> Match<'v> {
    /// Number and unit as written, without any ignore marker.
    pub fn token<'s>(&self, source: &'s str) -> &'s str {
        &source[self.number.start..self.span.end]
    }
}

// =============================================================================
// SCANNER
// =============================================================================

/// Iterator over the convertible tokens of a value.
pub struct Scanner<'v, 't> {
    source: &'v str,
    cursor: Cursor<'v>,
    state: ScanState,
    units: &'t UnitTable,
    ignore_identifier: Option<&'t str>,
}

impl<'v, 't> Scanner<'v, 't> {
    /// Scan `source` for tokens in the units of `units`.
    ///
    /// An empty ignore identifier is treated as unset.
    pub fn new(source: &'v str, units: &'t UnitTable, ignore_identifier: Option<&'t str>) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            state: ScanState::Normal,
            units,
            ignore_identifier: ignore_identifier.filter(|marker| !marker.is_empty()),
        }
    }

    /// Current state; `Normal` once the whole value has been consumed
    /// unless a quote or `url(` was left open.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Advance over one character (or construct) in the current state.
    ///
    /// Returns a match when a token starts at the current position.
    fn step(&mut self) -> Option<Match<'v>> {
        match self.state {
            ScanState::Normal => self.step_normal(),
            ScanState::SingleQuote => {
                self.step_quoted('\'');
                None
            }
            ScanState::DoubleQuote => {
                self.step_quoted('"');
                None
            }
            ScanState::Url { quote } => {
                self.step_url(quote);
                None
            }
        }
    }

    fn step_normal(&mut self) -> Option<Match<'v>> {
        let at_boundary = self.cursor.prev().map_or(true, |c| !continues_token(c));

        if at_boundary {
            if let Some(found) = self.match_token() {
                while self.cursor.offset() < found.span.end {
                    self.cursor.advance();
                }
                return Some(found);
            }
            if self.cursor.eat("url(") {
                self.state = ScanState::Url { quote: None };
                return None;
            }
        }

        match self.cursor.advance() {
            Some('\'') => self.state = ScanState::SingleQuote,
            Some('"') => self.state = ScanState::DoubleQuote,
            Some('\\') => {
                self.cursor.advance(); // Escaped char
            }
            _ => {}
        }
        None
    }

    fn step_quoted(&mut self, quote: char) {
        match self.cursor.advance() {
            Some('\\') => {
                self.cursor.advance(); // Escaped char
            }
            Some(c) if c == quote => self.state = ScanState::Normal,
            _ => {}
        }
    }

    fn step_url(&mut self, quote: Option<char>) {
        match (self.cursor.advance(), quote) {
            (Some('\\'), _) => {
                self.cursor.advance(); // Escaped char
            }
            (Some(c), Some(open)) if c == open => self.state = ScanState::Url { quote: None },
            (Some(c @ ('\'' | '"')), None) => self.state = ScanState::Url { quote: Some(c) },
            (Some(')'), None) => self.state = ScanState::Normal,
            _ => {}
        }
    }

    /// Try to read `[sign][marker]<number><unit>` at the cursor.
    ///
    /// A sign in front of the marker stays outside the match span, so it is
    /// copied through with the surrounding text.
    fn match_token(&self) -> Option<Match<'v>> {
        let start = self.cursor.offset();

        if let Some(marker) = self.ignore_identifier {
            let rest = self.cursor.rest();
            let sign = usize::from(matches!(rest.chars().next(), Some('+' | '-')));
            if rest[sign..].starts_with(marker) {
                let marker_start = start + sign;
                let found = self.match_number(marker_start, marker_start + marker.len(), true);
                if found.is_some() {
                    return found;
                }
            }
        }

        self.match_number(start, start, false)
    }

    /// Read `<number><unit>` at byte `number_start`.
    fn match_number(&self, span_start: usize, number_start: usize, ignored: bool) -> Option<Match<'v>> {
        let source = self.source;
        let bytes = source.as_bytes();
        let mut end = number_start;

        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        let mut digits = end - int_start;
        if bytes.get(end) == Some(&b'.') {
            end += 1;
            let frac_start = end;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
            digits += end - frac_start;
        }
        if digits == 0 {
            return None;
        }

        let literal = &source[number_start..end];
        let (unit, divisor) = self.units.match_prefix(&source[end..])?;
        let unit_end = end + unit.len();
        if source[unit_end..].chars().next().is_some_and(continues_token) {
            return None;
        }

        let value = literal.parse::<f64>().ok()?;
        Some(Match {
            span: span_start..unit_end,
            number: number_start..end,
            literal,
            value,
            unit: &source[end..unit_end],
            divisor,
            ignored,
        })
    }
}

impl<'v, 't> Iterator for Scanner<'v, 't> {
    type Item = Match<'v>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.cursor.is_eof() {
            if let Some(found) = self.step() {
                return Some(found);
            }
        }
        None
    }
}

/// Characters that make the following character part of the same word.
fn continues_token(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '#' | '\\')
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RootValue;
    use std::collections::BTreeMap;

    fn units() -> UnitTable {
        UnitTable::resolve_lenient(&RootValue::default())
    }

    fn literals(value: &str) -> Vec<String> {
        let units = units();
        Scanner::new(value, &units, None)
            .map(|m| format!("{}{}", m.literal, m.unit))
            .collect()
    }

    #[test]
    fn test_finds_plain_tokens() {
        assert_eq!(literals("0 0 20px 20px"), vec!["20px", "20px"]);
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(literals("0.5em .5px -0.2px -.2em 5.px"), vec![".5px", "-0.2px", "5.px"]);
    }

    #[test]
    fn test_unit_must_end_the_token() {
        assert!(literals("16pixels 16px-x 16px_").is_empty());
        assert_eq!(literals("16px,2px)"), vec!["16px", "2px"]);
    }

    #[test]
    fn test_number_must_start_a_token() {
        assert!(literals("a16px --16px #16px h1.5px").is_empty());
    }

    #[test]
    fn test_skips_quotes() {
        assert!(literals("'16px' \"16px\"").is_empty());
        assert_eq!(literals("'it\\'s 1px' 2px"), vec!["2px"]);
    }

    #[test]
    fn test_skips_url_arguments() {
        assert!(literals("url(16px.jpg)").is_empty());
        assert_eq!(literals("url(\"a)1px\") 3px"), vec!["3px"]);
    }

    #[test]
    fn test_em_is_never_matched() {
        assert!(literals("1em 2rem 3pt 50%").is_empty());
    }

    #[test]
    fn test_rpx_preferred_over_px() {
        let mut map = BTreeMap::new();
        map.insert("px".to_string(), 50.0);
        map.insert("rpx".to_string(), 100.0);
        let units = UnitTable::resolve_lenient(&RootValue::PerUnit(map));
        let found: Vec<_> = Scanner::new("20rpx 32px", &units, None)
            .map(|m| (m.unit, m.divisor))
            .collect();
        assert_eq!(found, vec![("rpx", 100.0), ("px", 50.0)]);
    }

    #[test]
    fn test_ignore_marker_inside_literal() {
        let units = units();
        let found: Vec<_> = Scanner::new("00.5px 001px 32px", &units, Some("00")).collect();
        assert_eq!(found.len(), 3);
        assert!(found[0].ignored);
        assert_eq!(found[0].token("00.5px 001px 32px"), ".5px");
        assert!(found[1].ignored);
        assert_eq!(found[1].literal, "1");
        assert!(!found[2].ignored);
    }

    #[test]
    fn test_ignore_marker_before_literal() {
        let units = units();
        let source = "ig16px 16px";
        let found: Vec<_> = Scanner::new(source, &units, Some("ig")).collect();
        assert_eq!(found[0].span, 0..6);
        assert_eq!(found[0].token(source), "16px");
        assert!(found[0].ignored);
        assert!(!found[1].ignored);
    }

    #[test]
    fn test_ignore_marker_after_sign() {
        let units = units();
        let source = "-00.5px +001px";
        let found: Vec<_> = Scanner::new(source, &units, Some("00")).collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.ignored));
        assert_eq!(found[0].span, 1..7);
        assert_eq!(found[0].token(source), ".5px");
        assert_eq!(found[1].span, 9..14);
        assert_eq!(found[1].token(source), "1px");
    }

    #[test]
    fn test_state_after_unterminated_quote() {
        let units = units();
        let mut scanner = Scanner::new("'16px", &units, None);
        assert!(scanner.next().is_none());
        assert_eq!(scanner.state(), ScanState::SingleQuote);
    }

    #[test]
    fn test_spans_are_utf8_safe() {
        let units = units();
        let source = "«é» 2px";
        let found: Vec<_> = Scanner::new(source, &units, None).collect();
        assert_eq!(&source[found[0].span.clone()], "2px");
    }
}
