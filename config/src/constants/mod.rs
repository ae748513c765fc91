//! # Configuration Constants
//!
//! Defaults for the px → em conversion rules. Each public item documents its
//! purpose and carries a minimal usage example so downstream crates can stay
//! declarative and avoid scattering literals.
//!
//! ## Categories
//!
//! - **Scale**: Root value and the units it applies to
//! - **Precision**: Rounding of converted numbers
//! - **Behaviour**: Replace/fallback and media-query switches

// =============================================================================
// SCALE CONSTANTS
// =============================================================================

/// Default divisor: how many source units equal `1em`.
///
/// Applies to `px` and, unless configured otherwise, `rpx`.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_ROOT_VALUE;
/// assert_eq!(32.0 / DEFAULT_ROOT_VALUE, 0.32);
/// ```
pub const DEFAULT_ROOT_VALUE: f64 = 100.0;

/// Unit that must always resolve to a divisor.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SOURCE_UNIT, SOURCE_UNITS};
/// assert!(SOURCE_UNITS.contains(&DEFAULT_SOURCE_UNIT));
/// ```
pub const DEFAULT_SOURCE_UNIT: &str = "px";

/// Units a single numeric root value is applied to.
///
/// # Examples
/// ```
/// use config::constants::SOURCE_UNITS;
/// assert_eq!(SOURCE_UNITS, &["px", "rpx"]);
/// ```
pub const SOURCE_UNITS: &[&str] = &["px", "rpx"];

/// Unit every converted value is written in.
///
/// # Examples
/// ```
/// use config::constants::TARGET_UNIT;
/// assert_eq!(TARGET_UNIT, "em");
/// ```
pub const TARGET_UNIT: &str = "em";

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default number of fractional digits kept after conversion.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_UNIT_PRECISION;
/// assert_eq!(DEFAULT_UNIT_PRECISION, 5);
/// ```
pub const DEFAULT_UNIT_PRECISION: u32 = 5;

/// Upper bound on precision. `f64` carries roughly 15 significant decimal
/// digits, so larger requests are clamped.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_UNIT_PRECISION, MAX_UNIT_PRECISION};
/// assert!(DEFAULT_UNIT_PRECISION <= MAX_UNIT_PRECISION);
/// ```
pub const MAX_UNIT_PRECISION: u32 = 15;

/// Default minimum absolute value a token must have to be converted.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_PIXEL_VALUE;
/// assert_eq!(DEFAULT_MIN_PIXEL_VALUE, 0.0);
/// ```
pub const DEFAULT_MIN_PIXEL_VALUE: f64 = 0.0;

// =============================================================================
// BEHAVIOUR CONSTANTS
// =============================================================================

/// Whether converted values replace the original declaration value.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_REPLACE;
/// assert!(DEFAULT_REPLACE);
/// ```
pub const DEFAULT_REPLACE: bool = true;

/// Whether `@media` preludes are rewritten.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MEDIA_QUERY;
/// assert!(!DEFAULT_MEDIA_QUERY);
/// ```
pub const DEFAULT_MEDIA_QUERY: bool = false;
