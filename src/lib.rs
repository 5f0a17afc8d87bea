//! # Darts Checkout Solver
//!
//! Enumerates every legal way to finish a darts leg: given a remaining score
//! and an out-rule, list each sequence of up to three darts that brings the
//! score to exactly zero with a legal finishing dart.
//!
//! ## Features
//!
//! - **Exhaustive Engine**: Depth-bounded search over the 62 legal throws
//! - **Three Out-Rules**: Single out, double out and master out
//! - **Deterministic Order**: Grouped by dart count, canonical order within a group
//! - **Memoization**: Thread-safe cache and a parallel full-range table
//! - **Presentation Helpers**: Bucketed, truncated reports with uniform-path flags
//!
//! ## Quick Start
//!
//! ```
//! use darts_checkout_solver::checkout::{enumerate, GameMode};
//!
//! let paths = enumerate(100, GameMode::MasterOut);
//! assert!(paths.iter().any(|p| p.method() == "T20 D20"));
//! ```
//!
//! ## Modules
//!
//! - [`checkout`]: Throws, out-rules, paths and the search engine
//! - [`input`]: Keypad digit buffer and score bounds
//! - [`report`]: Grouped display output
//! - [`advice`]: Stale-reply guard for the external advice service
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   (score, mode)   ┌──────────────────────┐
//! │ Input surface│ ────────────────▶ │   Checkout Engine    │
//! │  ScoreInput  │                   │  enumerate / search  │
//! └──────────────┘                   └──────────┬───────────┘
//!        │                                      │ Vec<CheckoutPath>
//!        │ (score, mode)                        ▼
//!        ▼                           ┌──────────────────────┐
//! ┌──────────────┐                   │   CheckoutReport     │
//! │  AdviceGate  │                   │ buckets, caps, flags │
//! └──────────────┘                   └──────────────────────┘
//! ```

#![warn(missing_docs)]

/// Checkout enumeration module.
///
/// This is the core module containing the search engine.
pub mod checkout;

/// Keypad input surface.
pub mod input;

/// Presentation grouping and export.
pub mod report;

/// Advice request bookkeeping.
pub mod advice;

// Re-export commonly used types at crate root for convenience
pub use checkout::{enumerate, CheckoutConfig, CheckoutPath, DartThrow, GameMode};
pub use input::{InputError, ScoreInput};
pub use report::CheckoutReport;
