//! # px2em
//!
//! Converts `px` (and `rpx`) lengths in CSS declaration values into `em`,
//! the way a PostCSS px-to-rem style plugin does.
//!
//! ## Architecture
//!
//! ```text
//! Options → Px2Em::new → UnitTable + filters
//!                            │
//! Stylesheet ── walk ──▶ decide(declaration) ──▶ emitter::apply
//!                            │
//!                       rewrite_value ◀── Scanner (FSM over the value)
//! ```
//!
//! - [`options`]: user configuration, decoded permissively from JSON
//! - [`units`]: divisors, rounding and number printing
//! - [`scanner`]: finds `<number><unit>` tokens outside strings and `url()`
//! - [`filters`]: selector, property and file exclusion
//! - [`emitter`]: replace in place or insert fallbacks, with a duplicate guard
//!
//! ## Example
//!
//! ```rust
//! use px2em::{Options, Px2Em};
//!
//! let options = Options::from_json(r#"{ "replace": false }"#).unwrap();
//! let css = Px2Em::new(options)
//!     .process(".rule { font-size: 15px }", None)
//!     .unwrap();
//! assert_eq!(css, ".rule { font-size: 15px; font-size: 0.15em }");
//! ```

pub mod emitter;
pub mod engine;
pub mod error;
pub mod filters;
pub mod options;
pub mod scanner;
pub mod transform;
pub mod units;

// Re-export public API
pub use emitter::{Decision, Emission};
pub use engine::{DeclarationContext, Px2Em};
pub use error::ConfigError;
pub use options::{Exclude, Options, PathPredicate, RootValue, SelectorMatcher};
pub use scanner::{Match, ScanState, Scanner};
pub use transform::Report;
pub use units::UnitTable;

pub use px2em_stylesheet::ParseError;

