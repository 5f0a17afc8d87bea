//! Checkout paths.
//!
//! A `CheckoutPath` is one finishing sequence of one to three darts, in throw
//! order. Paths are value objects: the engine builds them fresh on every call
//! and callers own the result.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dart::DartThrow;
use super::mode::GameMode;

/// Maximum darts in one visit.
pub const MAX_DARTS: usize = 3;

/// One candidate finishing sequence.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "PathRecord", try_from = "PathRecord")]
pub struct CheckoutPath {
    darts: Vec<DartThrow>,
}

impl CheckoutPath {
    /// Create a path from throws in throw order.
    ///
    /// Returns `None` unless there are 1 to 3 darts. No scoring rule is
    /// checked here; see [`CheckoutPath::validate`].
    pub fn new(darts: Vec<DartThrow>) -> Option<Self> {
        if darts.is_empty() || darts.len() > MAX_DARTS {
            return None;
        }
        Some(Self { darts })
    }

    /// Build a path the engine already knows to be well formed.
    pub(crate) fn from_slice(darts: &[DartThrow]) -> Self {
        debug_assert!(!darts.is_empty() && darts.len() <= MAX_DARTS);
        Self { darts: darts.to_vec() }
    }

    /// The throws, first dart first.
    #[inline]
    pub fn darts(&self) -> &[DartThrow] {
        &self.darts
    }

    /// Number of darts (1, 2 or 3).
    #[inline]
    pub fn total_darts(&self) -> usize {
        self.darts.len()
    }

    /// The finishing dart.
    pub fn last(&self) -> &DartThrow {
        // new() and from_slice() guarantee at least one dart
        &self.darts[self.darts.len() - 1]
    }

    /// Sum of all dart scores.
    pub fn total_score(&self) -> u32 {
        self.darts.iter().map(|d| d.score()).sum()
    }

    /// Display label: dart labels joined by spaces, e.g. "T20 T20 DBULL".
    pub fn method(&self) -> String {
        self.darts
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when every dart scores the same, whatever segment produced it.
    pub fn is_uniform(&self) -> bool {
        let first = self.darts[0].score();
        self.darts.iter().all(|d| d.score() == first)
    }

    /// Build a path from `darts` and check it as a checkout of `score`.
    ///
    /// A wrong dart count is reported as [`PathError::DartCount`].
    pub fn check(darts: Vec<DartThrow>, score: u32, mode: GameMode) -> Result<Self, PathError> {
        let count = darts.len();
        let path = Self::new(darts).ok_or(PathError::DartCount(count))?;
        path.validate(score, mode)?;
        Ok(path)
    }

    /// Check this path as a checkout of `score` under `mode`.
    pub fn validate(&self, score: u32, mode: GameMode) -> Result<(), PathError> {
        let total = self.total_score();
        if total != score {
            return Err(PathError::WrongTotal { expected: score, actual: total });
        }

        let mut remaining = score;
        for (i, dart) in self.darts[..self.darts.len() - 1].iter().enumerate() {
            remaining -= dart.score();
            if remaining <= 1 {
                return Err(PathError::Bust { dart: i + 1, remaining });
            }
        }

        let last = self.last();
        if !mode.accepts_finish(last) {
            return Err(PathError::IllegalFinish { dart: *last, mode });
        }
        Ok(())
    }
}

impl Ord for CheckoutPath {
    /// Fewer darts first, then lexicographic by the canonical throw order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.darts
            .len()
            .cmp(&other.darts.len())
            .then_with(|| self.darts.cmp(&other.darts))
    }
}

impl PartialOrd for CheckoutPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CheckoutPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.method())
    }
}

impl fmt::Debug for CheckoutPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Why a proposed sequence is not a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A path needs 1 to 3 darts.
    #[error("a checkout needs 1 to {max} darts, got {0}", max = MAX_DARTS)]
    DartCount(usize),
    /// The darts do not add up to the remaining score.
    #[error("darts total {actual}, expected {expected}")]
    WrongTotal {
        /// Remaining score.
        expected: u32,
        /// Sum of the darts.
        actual: u32,
    },
    /// A non-final dart left a remainder that cannot be finished.
    #[error("bust after dart {dart}: {remaining} remaining")]
    Bust {
        /// 1-based dart number.
        dart: usize,
        /// Remainder after that dart.
        remaining: u32,
    },
    /// The last dart is not allowed to finish under the mode.
    #[error("{dart} cannot finish under {mode}")]
    IllegalFinish {
        /// The finishing dart.
        dart: DartThrow,
        /// The active out-rule.
        mode: GameMode,
    },
    /// A serialized summary field disagrees with the darts it describes.
    #[error("record field {field} does not match its darts")]
    Inconsistent {
        /// Name of the mismatching field.
        field: &'static str,
    },
}

/// Wire form of a path.
#[derive(Serialize, Deserialize)]
struct PathRecord {
    darts: Vec<DartThrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_darts: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total: Option<u32>,
}

impl From<CheckoutPath> for PathRecord {
    fn from(path: CheckoutPath) -> Self {
        Self {
            total_darts: Some(path.total_darts()),
            method: Some(path.method()),
            total: Some(path.total_score()),
            darts: path.darts,
        }
    }
}

impl TryFrom<PathRecord> for CheckoutPath {
    type Error = PathError;

    fn try_from(record: PathRecord) -> Result<Self, Self::Error> {
        let count = record.darts.len();
        let path = CheckoutPath::new(record.darts).ok_or(PathError::DartCount(count))?;

        // summary fields are optional on input but must agree when present
        if record.total_darts.is_some_and(|n| n != path.total_darts()) {
            return Err(PathError::Inconsistent { field: "total_darts" });
        }
        if record.method.as_deref().is_some_and(|m| m != path.method()) {
            return Err(PathError::Inconsistent { field: "method" });
        }
        if record.total.is_some_and(|t| t != path.total_score()) {
            return Err(PathError::Inconsistent { field: "total" });
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(labels: &[&str]) -> CheckoutPath {
        CheckoutPath::new(labels.iter().map(|l| l.parse().unwrap()).collect()).unwrap()
    }

    #[test]
    fn test_path_basics() {
        let p = path(&["T20", "T20", "DBULL"]);
        assert_eq!(p.total_darts(), 3);
        assert_eq!(p.total_score(), 170);
        assert_eq!(p.method(), "T20 T20 DBULL");
        assert_eq!(p.last().label(), "DBULL");
    }

    #[test]
    fn test_dart_count_bounds() {
        assert!(CheckoutPath::new(vec![]).is_none());
        let four: Vec<DartThrow> = ["S1", "S1", "S1", "S1"].iter().map(|l| l.parse().unwrap()).collect();
        assert!(CheckoutPath::new(four).is_none());
    }

    #[test]
    fn test_uniform_compares_scores() {
        assert!(path(&["D10", "D10"]).is_uniform());
        assert!(path(&["S20", "D10"]).is_uniform());
        assert!(path(&["DBULL"]).is_uniform());
        assert!(!path(&["T20", "D20"]).is_uniform());
    }

    #[test]
    fn test_validate() {
        assert_eq!(path(&["T20", "T20", "DBULL"]).validate(170, GameMode::DoubleOut), Ok(()));
        assert_eq!(
            path(&["BULL", "BULL"]).validate(50, GameMode::DoubleOut),
            Err(PathError::IllegalFinish { dart: DartThrow::outer_bull(), mode: GameMode::DoubleOut })
        );
        assert_eq!(
            path(&["S20", "D10"]).validate(41, GameMode::DoubleOut),
            Err(PathError::WrongTotal { expected: 41, actual: 40 })
        );
        assert_eq!(
            path(&["S2", "S1"]).validate(3, GameMode::SingleOut),
            Err(PathError::Bust { dart: 1, remaining: 1 })
        );
        assert_eq!(path(&["T20", "D20"]).validate(100, GameMode::MasterOut), Ok(()));
    }

    #[test]
    fn test_ordering() {
        let mut paths = vec![
            path(&["S20", "D10"]),
            path(&["T20", "S1", "D1"]),
            path(&["D20"]),
            path(&["T4", "D14"]),
        ];
        paths.sort();
        let methods: Vec<String> = paths.iter().map(|p| p.method()).collect();
        assert_eq!(methods, vec!["D20", "S20 D10", "T4 D14", "T20 S1 D1"]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(path(&["S20", "D10"])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "darts": ["S20", "D10"], "total_darts": 2, "method": "S20 D10", "total": 40 })
        );
        let back: CheckoutPath = serde_json::from_str(r#"{"darts":["D20"]}"#).unwrap();
        assert_eq!(back, path(&["D20"]));
        assert!(serde_json::from_str::<CheckoutPath>(r#"{"darts":[]}"#).is_err());
    }

    #[test]
    fn test_serde_rejects_inconsistent_summary() {
        let ok = r#"{"darts":["S20","D10"],"total_darts":2,"method":"S20 D10","total":40}"#;
        assert_eq!(serde_json::from_str::<CheckoutPath>(ok).unwrap(), path(&["S20", "D10"]));

        for bad in [
            r#"{"darts":["D20"],"total":99}"#,
            r#"{"darts":["D20"],"total_darts":2}"#,
            r#"{"darts":["D20"],"method":"D10"}"#,
        ] {
            assert!(serde_json::from_str::<CheckoutPath>(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_dart_count_message() {
        assert_eq!(PathError::DartCount(4).to_string(), "a checkout needs 1 to 3 darts, got 4");
    }

    #[test]
    fn test_check_sequence() {
        let darts = |labels: &[&str]| -> Vec<DartThrow> { labels.iter().map(|l| l.parse().unwrap()).collect() };

        assert_eq!(
            CheckoutPath::check(darts(&["T20", "T20", "DBULL"]), 170, GameMode::DoubleOut),
            Ok(path(&["T20", "T20", "DBULL"]))
        );
        assert_eq!(
            CheckoutPath::check(darts(&["S1", "S1", "S1", "S1"]), 4, GameMode::SingleOut),
            Err(PathError::DartCount(4))
        );
        assert_eq!(CheckoutPath::check(vec![], 40, GameMode::DoubleOut), Err(PathError::DartCount(0)));
        assert_eq!(
            CheckoutPath::check(darts(&["S20", "S20"]), 40, GameMode::DoubleOut),
            Err(PathError::IllegalFinish { dart: "S20".parse().unwrap(), mode: GameMode::DoubleOut })
        );
    }
}
