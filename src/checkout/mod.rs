//! Checkout enumeration module.
//!
//! This module contains the checkout engine and the value types it works on.
//!
//! # Overview
//!
//! A checkout finishes a leg: one to three darts whose scores add up to the
//! remaining score exactly, with the last dart allowed by the out-rule.
//!
//! | mode         | legal finishing throws                          |
//! |--------------|-------------------------------------------------|
//! | single_out   | any throw                                       |
//! | double_out   | doubles, including the inner bull               |
//! | master_out   | doubles or triples, including the inner bull    |
//!
//! The search space is small: 62 legal throws per dart and at most three
//! darts, so every call runs the full search synchronously.
//!
//! # Usage
//!
//! ```
//! use darts_checkout_solver::checkout::{enumerate, GameMode};
//!
//! let paths = enumerate(40, GameMode::DoubleOut);
//! assert_eq!(paths[0].method(), "D20");
//! assert!(paths.iter().any(|p| p.method() == "S20 D10"));
//! ```
//!
//! # Ordering
//!
//! Paths are grouped by dart count (1, 2, 3). Within a group they are sorted
//! lexicographically by throw, where a throw ranks by descending score and
//! ties go to the higher multiplier (T2 before D3 before S6).

pub mod cache;
pub mod config;
pub mod dart;
pub mod engine;
pub mod mode;
pub mod path;

// Re-export main types for convenient access
pub use cache::{CheckoutCache, CheckoutTable, TableRow};
pub use config::{CheckoutConfig, ConfigError};
pub use dart::{DartThrow, Multiplier, ParseDartError, Segment, ALL_THROWS};
pub use engine::{
    enumerate, enumerate_with_darts, is_checkout, min_darts, search, SearchResult, SearchStats,
    MAX_CHECKOUT,
};
pub use mode::{GameMode, ParseModeError};
pub use path::{CheckoutPath, PathError, MAX_DARTS};
