//! # Unit Table
//!
//! Source unit → divisor lookup built once from [`RootValue`], plus the
//! rounding and printing rules for converted numbers.
//!
//! ## Example
//!
//! ```rust
//! use px2em::{RootValue, UnitTable};
//!
//! let table = UnitTable::resolve(&RootValue::Uniform(16.0)).unwrap();
//! assert_eq!(table.divisor("px"), Some(16.0));
//! assert_eq!(table.divisor("rpx"), Some(16.0));
//! assert_eq!(table.divisor("em"), None);
//! ```

use config::constants::{DEFAULT_ROOT_VALUE, DEFAULT_SOURCE_UNIT, MAX_UNIT_PRECISION, SOURCE_UNITS};

use crate::error::ConfigError;
use crate::options::RootValue;

// =============================================================================
// UNIT TABLE
// =============================================================================

/// Recognized source units and their divisors.
///
/// Entries are kept longest-unit-first so suffix matching prefers `rpx`
/// over a shorter unit that happens to be its tail.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    entries: Vec<(String, f64)>,
}

impl UnitTable {
    /// Build the table, rejecting an unusable divisor for the default unit.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidRootValue`] when the `px` divisor is zero,
    /// negative or not finite.
    pub fn resolve(root_value: &RootValue) -> Result<Self, ConfigError> {
        let entries = Self::raw_entries(root_value);
        let default_divisor = Self::default_divisor(&entries);
        if !is_usable_divisor(default_divisor) {
            return Err(ConfigError::InvalidRootValue {
                unit: DEFAULT_SOURCE_UNIT.to_string(),
                value: default_divisor,
            });
        }
        Ok(Self::from_entries(entries))
    }

    /// Build the table, replacing an unusable default divisor with
    /// [`DEFAULT_ROOT_VALUE`].
    pub fn resolve_lenient(root_value: &RootValue) -> Self {
        let mut entries = Self::raw_entries(root_value);
        let default_divisor = Self::default_divisor(&entries);
        if !is_usable_divisor(default_divisor) {
            tracing::warn!(
                value = default_divisor,
                fallback = DEFAULT_ROOT_VALUE,
                "root value must be positive; using default"
            );
            // A uniform value feeds every unit, so replace all of them.
            let uniform = matches!(root_value, RootValue::Uniform(_));
            for (unit, divisor) in &mut entries {
                if uniform || unit == DEFAULT_SOURCE_UNIT {
                    *divisor = DEFAULT_ROOT_VALUE;
                }
            }
        }
        Self::from_entries(entries)
    }

    /// Divisor for `unit`, if it is recognized.
    pub fn divisor(&self, unit: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == unit)
            .map(|(_, divisor)| *divisor)
    }

    /// Longest recognized unit that `rest` starts with.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use px2em::{RootValue, UnitTable};
    ///
    /// let table = UnitTable::resolve_lenient(&RootValue::default());
    /// assert_eq!(table.match_prefix("rpx solid"), Some(("rpx", 100.0)));
    /// assert_eq!(table.match_prefix("pt"), None);
    /// ```
    pub fn match_prefix(&self, rest: &str) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .find(|(unit, _)| rest.starts_with(unit.as_str()))
            .map(|(unit, divisor)| (unit.as_str(), *divisor))
    }

    /// Recognized unit names, longest first.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(unit, _)| unit.as_str())
    }

    fn raw_entries(root_value: &RootValue) -> Vec<(String, f64)> {
        match root_value {
            RootValue::Uniform(divisor) => SOURCE_UNITS
                .iter()
                .map(|unit| ((*unit).to_string(), *divisor))
                .collect(),
            RootValue::PerUnit(map) => {
                let mut entries: Vec<(String, f64)> = map
                    .iter()
                    .filter(|(unit, _)| {
                        let usable = is_unit_name(unit);
                        if !usable {
                            tracing::warn!(unit = %unit, "ignoring root value for invalid unit name");
                        }
                        usable
                    })
                    .map(|(unit, divisor)| (unit.clone(), *divisor))
                    .collect();
                if !map.contains_key(DEFAULT_SOURCE_UNIT) {
                    entries.push((DEFAULT_SOURCE_UNIT.to_string(), DEFAULT_ROOT_VALUE));
                }
                entries
            }
        }
    }

    fn default_divisor(entries: &[(String, f64)]) -> f64 {
        entries
            .iter()
            .find(|(unit, _)| unit == DEFAULT_SOURCE_UNIT)
            .map_or(DEFAULT_ROOT_VALUE, |(_, divisor)| *divisor)
    }

    fn from_entries(mut entries: Vec<(String, f64)>) -> Self {
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { entries }
    }
}

fn is_usable_divisor(divisor: f64) -> bool {
    divisor.is_finite() && divisor > 0.0
}

/// Unit names are non-empty runs of ASCII letters.
fn is_unit_name(unit: &str) -> bool {
    !unit.is_empty() && unit.chars().all(|c| c.is_ascii_alphabetic())
}

// =============================================================================
// ROUNDING
// =============================================================================

/// Round `value` to at most `precision` fractional digits.
///
/// The value is first truncated (toward negative infinity) to one extra
/// digit, then rounded half-up, so `0.9375` at precision 2 becomes `0.94`.
///
/// ## Example
///
/// ```rust
/// use px2em::units::to_fixed;
///
/// assert_eq!(to_fixed(15.0 / 16.0, 2), 0.94);
/// assert_eq!(to_fixed(0.123456789, 5), 0.12346);
/// ```
pub fn to_fixed(value: f64, precision: u32) -> f64 {
    let precision = precision.min(MAX_UNIT_PRECISION);
    let multiplier = 10f64.powi(precision as i32 + 1);
    let whole = (value * multiplier).floor();
    ((whole / 10.0) + 0.5).floor() * 10.0 / multiplier
}

/// Print a converted number in shortest form; zero prints as `0` with the
/// sign dropped.
///
/// ## Example
///
/// ```rust
/// use px2em::units::format_number;
///
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tracing_test::traced_test;

    fn per_unit(entries: &[(&str, f64)]) -> RootValue {
        RootValue::PerUnit(
            entries
                .iter()
                .map(|(unit, divisor)| ((*unit).to_string(), *divisor))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_uniform_maps_every_source_unit() {
        let table = UnitTable::resolve(&RootValue::Uniform(10.0)).expect("valid");
        assert_eq!(table.divisor("px"), Some(10.0));
        assert_eq!(table.divisor("rpx"), Some(10.0));
    }

    #[test]
    fn test_per_unit_divisors() {
        let table = UnitTable::resolve(&per_unit(&[("px", 50.0), ("rpx", 100.0)])).expect("valid");
        assert_eq!(table.divisor("px"), Some(50.0));
        assert_eq!(table.divisor("rpx"), Some(100.0));
    }

    #[test]
    fn test_per_unit_without_px_gets_default() {
        let table = UnitTable::resolve(&per_unit(&[("rpx", 200.0)])).expect("valid");
        assert_eq!(table.divisor("px"), Some(DEFAULT_ROOT_VALUE));
    }

    #[test]
    fn test_longest_unit_first() {
        let table = UnitTable::resolve(&per_unit(&[("px", 1.0), ("rpx", 2.0)])).expect("valid");
        assert_eq!(table.units().collect::<Vec<_>>(), vec!["rpx", "px"]);
    }

    #[test]
    fn test_strict_rejects_zero_root() {
        let err = UnitTable::resolve(&RootValue::Uniform(0.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRootValue { value, .. } if value == 0.0));
        assert!(UnitTable::resolve(&per_unit(&[("px", -1.0)])).is_err());
        assert!(UnitTable::resolve(&RootValue::Uniform(f64::NAN)).is_err());
    }

    #[traced_test]
    #[test]
    fn test_lenient_falls_back() {
        let table = UnitTable::resolve_lenient(&RootValue::Uniform(-4.0));
        assert_eq!(table.divisor("px"), Some(DEFAULT_ROOT_VALUE));
        assert_eq!(table.divisor("rpx"), Some(DEFAULT_ROOT_VALUE));
        assert!(logs_contain("root value must be positive"));
    }

    #[test]
    fn test_lenient_keeps_other_per_unit_entries() {
        let table = UnitTable::resolve_lenient(&per_unit(&[("px", 0.0), ("rpx", 50.0)]));
        assert_eq!(table.divisor("px"), Some(DEFAULT_ROOT_VALUE));
        assert_eq!(table.divisor("rpx"), Some(50.0));
    }

    #[test]
    fn test_invalid_unit_names_are_dropped() {
        let table = UnitTable::resolve_lenient(&per_unit(&[("", 1.0), ("p x", 1.0)]));
        assert_eq!(table.units().collect::<Vec<_>>(), vec!["px"]);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(15.0 / 100.0, 5), 0.15);
        assert_eq!(to_fixed(15.0 / 16.0, 2), 0.94);
        assert_eq!(to_fixed(-0.2 / 100.0, 5), -0.002);
        assert_eq!(to_fixed(1.0 / 3.0, 0), 0.0);
        assert_eq!(to_fixed(2.0 / 3.0, 0), 1.0);
    }

    #[test]
    fn test_to_fixed_clamps_precision() {
        assert_eq!(to_fixed(0.25, 400), to_fixed(0.25, MAX_UNIT_PRECISION));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.15), "0.15");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.002), "-0.002");
        assert_eq!(format_number(0.0), "0");
    }
}
