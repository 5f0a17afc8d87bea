//! Report formatting for checkout results.
//!
//! Groups engine output into one bucket per dart count, truncates long
//! buckets for display and flags uniform paths (every dart scoring the same).
//! Everything here is a pure function of the engine's output.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutConfig, CheckoutPath, GameMode, MAX_DARTS};

/// One path as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathView {
    /// Display label, e.g. "T20 T20 DBULL".
    pub method: String,
    /// Dart labels in throw order.
    pub darts: Vec<String>,
    /// Every dart scores the same.
    pub uniform: bool,
}

impl From<&CheckoutPath> for PathView {
    fn from(path: &CheckoutPath) -> Self {
        Self {
            method: path.method(),
            darts: path.darts().iter().map(|d| d.label()).collect(),
            uniform: path.is_uniform(),
        }
    }
}

/// All paths using the same number of darts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DartBucket {
    /// Dart count shared by every path in the bucket.
    pub darts: usize,
    /// Paths in the bucket before truncation.
    pub total: usize,
    /// Paths kept for display, in engine order.
    pub shown: Vec<PathView>,
    /// Paths cut by the display cap.
    pub hidden: usize,
}

impl DartBucket {
    /// Whether the bucket has no paths at all.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Grouped, display-ready checkout result for one score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReport {
    /// Remaining score.
    pub score: u32,
    /// Out-rule used.
    pub mode: GameMode,
    /// Buckets for 1, 2 and 3 darts, in that order.
    pub buckets: Vec<DartBucket>,
}

impl CheckoutReport {
    /// Group `paths` into buckets and apply the display caps from `config`.
    pub fn new(score: u32, mode: GameMode, paths: &[CheckoutPath], config: &CheckoutConfig) -> Self {
        let buckets = (1..=MAX_DARTS)
            .map(|darts| {
                let group: Vec<&CheckoutPath> = paths.iter().filter(|p| p.total_darts() == darts).collect();
                let cap = config.display_cap(darts).unwrap_or(group.len());
                let shown: Vec<PathView> = group.iter().take(cap).map(|p| PathView::from(*p)).collect();
                DartBucket {
                    darts,
                    total: group.len(),
                    hidden: group.len() - shown.len(),
                    shown,
                }
            })
            .collect();

        Self { score, mode, buckets }
    }

    /// Bucket for `darts` darts.
    pub fn bucket(&self, darts: usize) -> Option<&DartBucket> {
        self.buckets.iter().find(|b| b.darts == darts)
    }

    /// Total paths across all buckets, before truncation.
    pub fn total_paths(&self) -> usize {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Whether there is no checkout at all.
    pub fn is_empty(&self) -> bool {
        self.total_paths() == 0
    }

    /// Plain-text rendering; uniform paths are marked with `*`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} ({}) ===", self.score, self.mode.display_name());

        if self.is_empty() {
            let _ = writeln!(out, "No checkout.");
            return out;
        }

        for bucket in self.buckets.iter().filter(|b| !b.is_empty()) {
            let noun = if bucket.darts == 1 { "dart" } else { "darts" };
            let _ = writeln!(out, "\n{} {} ({} paths)", bucket.darts, noun, bucket.total);
            for view in &bucket.shown {
                let mark = if view.uniform { " *" } else { "" };
                let _ = writeln!(out, "  {}{}", view.method, mark);
            }
            if bucket.hidden > 0 {
                let _ = writeln!(out, "  ... and {} more", bucket.hidden);
            }
        }
        out
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty JSON to `path`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::enumerate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buckets_follow_dart_count() {
        let config = CheckoutConfig::default();
        let paths = enumerate(40, GameMode::DoubleOut);
        let report = CheckoutReport::new(40, GameMode::DoubleOut, &paths, &config);

        assert_eq!(report.buckets.len(), 3);
        assert_eq!(report.total_paths(), paths.len());
        let one = report.bucket(1).unwrap();
        assert_eq!(one.total, 1);
        assert_eq!(one.shown[0].method, "D20");
        assert!(one.shown[0].uniform);
    }

    #[test]
    fn test_truncation() {
        let config = CheckoutConfig::default();
        let paths = enumerate(100, GameMode::DoubleOut);
        let report = CheckoutReport::new(100, GameMode::DoubleOut, &paths, &config);

        let three = report.bucket(3).unwrap();
        assert!(three.total > 50);
        assert_eq!(three.shown.len(), 50);
        assert_eq!(three.hidden, three.total - 50);

        let two = report.bucket(2).unwrap();
        assert!(two.shown.len() <= 20);
        assert_eq!(two.shown.len() + two.hidden, two.total);
    }

    #[test]
    fn test_uniform_flags() {
        let config = CheckoutConfig::default();
        let paths = enumerate(120, GameMode::MasterOut);
        let report = CheckoutReport::new(120, GameMode::MasterOut, &paths, &config);
        let two = report.bucket(2).unwrap();
        let t20s = two.shown.iter().find(|v| v.method == "T20 T20").unwrap();
        assert!(t20s.uniform);
        assert!(two.shown.iter().filter(|v| v.method != "T20 T20").all(|v| !v.uniform));
    }

    #[test]
    fn test_render_text() {
        let config = CheckoutConfig::default();
        let paths = enumerate(170, GameMode::DoubleOut);
        let report = CheckoutReport::new(170, GameMode::DoubleOut, &paths, &config);
        assert_eq!(
            report.render_text(),
            "=== 170 (Double Out) ===\n\n3 darts (1 paths)\n  T20 T20 DBULL\n"
        );

        let empty = CheckoutReport::new(169, GameMode::DoubleOut, &[], &config);
        assert!(empty.is_empty());
        assert_eq!(empty.render_text(), "=== 169 (Double Out) ===\nNo checkout.\n");
    }

    #[test]
    fn test_save_json() {
        let config = CheckoutConfig::default();
        let paths = enumerate(50, GameMode::DoubleOut);
        let report = CheckoutReport::new(50, GameMode::DoubleOut, &paths, &config);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        report.save_json(&file).unwrap();

        let back: CheckoutReport = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(back, report);
    }
}
