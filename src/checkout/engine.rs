//! Depth-bounded checkout search.
//!
//! The engine enumerates every ordered sequence of one to three throws that
//! brings a remaining score to exactly zero, with the last dart satisfying the
//! out-rule. The search walks depth 1, then 2, then 3, and at each depth
//! visits the throw alphabet in canonical order, so paths come out grouped by
//! dart count and sorted lexicographically without a separate sort.
//!
//! # Pruning
//!
//! After any non-final dart the running remainder must be at least 2:
//! - a remainder `<= 0` overshoots the score
//! - a remainder of exactly 1 is a bust and can never be finished
//!
//! Both are dropped silently and only show up in [`SearchStats`].
//!
//! # Example
//!
//! ```
//! use darts_checkout_solver::checkout::{enumerate, GameMode};
//!
//! let paths = enumerate(170, GameMode::DoubleOut);
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].method(), "T20 T20 DBULL");
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::dart::{throws_scoring, DartThrow, ALL_THROWS};
use super::mode::GameMode;
use super::path::{CheckoutPath, MAX_DARTS};

/// Highest score that can be checked out (T20, T20, DBULL).
pub const MAX_CHECKOUT: u32 = 170;

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Non-final partial sequences that survived pruning and were extended.
    pub prefixes_explored: u64,
    /// Branches dropped because a non-final dart left exactly 1.
    pub bust_prunes: u64,
    /// Branches dropped because a non-final dart reached or passed zero.
    pub overshoot_prunes: u64,
    /// Emitted paths indexed by dart count minus one.
    pub paths_by_darts: [usize; MAX_DARTS],
}

impl SearchStats {
    /// Total number of emitted paths.
    pub fn total_paths(&self) -> usize {
        self.paths_by_darts.iter().sum()
    }
}

/// Paths plus the statistics of the search that produced them.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Paths in canonical order.
    pub paths: Vec<CheckoutPath>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Enumerate every checkout of `remaining` under `mode` with up to three darts.
///
/// Total over all inputs: 0, 1 and anything above [`MAX_CHECKOUT`] return an
/// empty vector. Repeated calls return identical results in identical order.
pub fn enumerate(remaining: u32, mode: GameMode) -> Vec<CheckoutPath> {
    search(remaining, mode, MAX_DARTS).paths
}

/// Like [`enumerate`], limited to `max_darts` darts left in the visit.
///
/// `max_darts` above 3 is clamped to 3; 0 returns an empty vector.
pub fn enumerate_with_darts(remaining: u32, mode: GameMode, max_darts: usize) -> Vec<CheckoutPath> {
    search(remaining, mode, max_darts).paths
}

/// Run the search and keep its statistics.
pub fn search(remaining: u32, mode: GameMode, max_darts: usize) -> SearchResult {
    let mut result = SearchResult::default();
    let max_darts = max_darts.min(MAX_DARTS);

    if remaining <= 1 || remaining > MAX_CHECKOUT {
        trace!(remaining, %mode, "score outside checkout range");
        return result;
    }

    let mut prefix = [ALL_THROWS[0]; MAX_DARTS];
    for depth in 1..=max_darts {
        let before = result.paths.len();
        walk(&mut prefix, 0, depth, remaining, mode, &mut result);
        result.stats.paths_by_darts[depth - 1] = result.paths.len() - before;
    }

    trace!(
        remaining,
        %mode,
        max_darts,
        paths = result.paths.len(),
        prefixes = result.stats.prefixes_explored,
        "enumerated checkouts"
    );
    result
}

/// Extend `prefix[..len]` until it holds `depth` darts.
fn walk(
    prefix: &mut [DartThrow; MAX_DARTS],
    len: usize,
    depth: usize,
    remaining: u32,
    mode: GameMode,
    result: &mut SearchResult,
) {
    if len + 1 == depth {
        for finish in throws_scoring(remaining).filter(|d| mode.accepts_finish(d)) {
            prefix[len] = *finish;
            result.paths.push(CheckoutPath::from_slice(&prefix[..depth]));
        }
        return;
    }

    for dart in ALL_THROWS.iter() {
        let score = dart.score();
        if score >= remaining {
            result.stats.overshoot_prunes += 1;
            continue;
        }
        let left = remaining - score;
        if left == 1 {
            result.stats.bust_prunes += 1;
            continue;
        }
        result.stats.prefixes_explored += 1;
        prefix[len] = *dart;
        walk(prefix, len + 1, depth, left, mode, result);
    }
}

/// Whether `remaining` has at least one checkout under `mode`.
pub fn is_checkout(remaining: u32, mode: GameMode) -> bool {
    min_darts(remaining, mode).is_some()
}

/// Fewest darts needed to check out `remaining`, if it can be done at all.
pub fn min_darts(remaining: u32, mode: GameMode) -> Option<usize> {
    search(remaining, mode, MAX_DARTS)
        .stats
        .paths_by_darts
        .iter()
        .position(|&n| n > 0)
        .map(|i| i + 1)
}
