//! Memoized checkout results.
//!
//! This module provides:
//! - `CheckoutCache`: thread-safe memo keyed by score, mode and darts left
//! - `CheckoutTable`: every score in the input range for one mode, built in parallel
//!
//! Both return exactly what [`enumerate_with_darts`] returns for the same key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::CheckoutConfig;
use super::engine::{enumerate_with_darts, search, MAX_CHECKOUT};
use super::mode::GameMode;
use super::path::{CheckoutPath, MAX_DARTS};

type CacheKey = (u32, GameMode, usize);

/// Thread-safe memo of engine results.
///
/// Reads take a shared lock; a miss computes outside the lock and then
/// inserts under the write lock. Two threads missing on the same key both
/// compute, and the first insert wins; both results are identical anyway.
#[derive(Debug, Default)]
pub struct CheckoutCache {
    entries: RwLock<FxHashMap<CacheKey, Arc<[CheckoutPath]>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CheckoutCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the paths for a key, computing and storing them on a miss.
    pub fn get_or_compute(&self, remaining: u32, mode: GameMode, max_darts: usize) -> Arc<[CheckoutPath]> {
        let key = (remaining, mode, max_darts.min(MAX_DARTS));

        if let Some(paths) = self.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(paths);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed: Arc<[CheckoutPath]> = enumerate_with_darts(key.0, key.1, key.2).into();

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(entries.entry(key).or_insert(computed))
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that ran the engine.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, FxHashMap<CacheKey, Arc<[CheckoutPath]>>> {
        // A poisoned lock still holds valid, immutable results
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Summary of one score in a [`CheckoutTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Remaining score.
    pub score: u32,
    /// Number of one-dart paths.
    pub one_dart: usize,
    /// Number of two-dart paths.
    pub two_dart: usize,
    /// Number of three-dart paths.
    pub three_dart: usize,
    /// Fewest darts that finish, if any.
    pub min_darts: Option<usize>,
}

impl TableRow {
    /// Total paths for this score.
    pub fn total(&self) -> usize {
        self.one_dart + self.two_dart + self.three_dart
    }
}

/// Every checkout for every score from 1 to the configured maximum.
#[derive(Debug, Clone)]
pub struct CheckoutTable {
    mode: GameMode,
    max_darts: usize,
    /// paths[score - 1]
    paths: Vec<Vec<CheckoutPath>>,
    rows: Vec<TableRow>,
}

impl CheckoutTable {
    /// Build the table for `mode` using all available cores.
    pub fn build(mode: GameMode, config: &CheckoutConfig) -> Self {
        Self::build_with_progress(mode, config, || {})
    }

    /// Build the table, calling `on_score` once per finished score.
    ///
    /// The callback runs on rayon worker threads in no particular order.
    pub fn build_with_progress<F>(mode: GameMode, config: &CheckoutConfig, on_score: F) -> Self
    where
        F: Fn() + Sync,
    {
        let max_darts = config.max_darts;
        let results: Vec<(Vec<CheckoutPath>, TableRow)> = (1..=config.max_score)
            .into_par_iter()
            .map(|score| {
                let result = search(score, mode, max_darts);
                let by_darts = result.stats.paths_by_darts;
                let row = TableRow {
                    score,
                    one_dart: by_darts[0],
                    two_dart: by_darts[1],
                    three_dart: by_darts[2],
                    min_darts: by_darts.iter().position(|&n| n > 0).map(|i| i + 1),
                };
                on_score();
                (result.paths, row)
            })
            .collect();

        let (paths, rows): (Vec<_>, Vec<_>) = results.into_iter().unzip();
        debug!(%mode, scores = rows.len(), max_darts, "built checkout table");

        Self { mode, max_darts, paths, rows }
    }

    /// The mode this table was built for.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Dart limit the table was built with.
    pub fn max_darts(&self) -> usize {
        self.max_darts
    }

    /// Paths for `score`; empty when outside the table.
    pub fn paths(&self, score: u32) -> &[CheckoutPath] {
        score
            .checked_sub(1)
            .and_then(|i| self.paths.get(i as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// One summary row per score, ascending.
    pub fn summary(&self) -> &[TableRow] {
        &self.rows
    }

    /// Scores from 2 to 170 with no checkout.
    pub fn bogey_numbers(&self) -> Vec<u32> {
        self.rows
            .iter()
            .filter(|r| (2..=MAX_CHECKOUT).contains(&r.score) && r.min_darts.is_none())
            .map(|r| r.score)
            .collect()
    }
}
