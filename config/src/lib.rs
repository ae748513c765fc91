//! # Config Crate
//!
//! Centralized default values for the px2em pipeline.
//! Every tunable the converter exposes has its default defined here so the
//! engine, the stylesheet host and the WASM bindings agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_ROOT_VALUE, DEFAULT_UNIT_PRECISION, TARGET_UNIT};
//!
//! // 15px with the default root value
//! let converted = 15.0 / DEFAULT_ROOT_VALUE;
//! assert_eq!(format!("{converted}{TARGET_UNIT}"), "0.15em");
//! assert_eq!(DEFAULT_UNIT_PRECISION, 5);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All defaults defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Dependency-Free**: Plain constants only

pub mod constants;
