//! Dart throw representation.
//!
//! This module provides the fundamental scoring types used by the checkout engine:
//! - `Segment`: A numbered wedge (1-20) or the bull
//! - `Multiplier`: Single, double or triple ring
//! - `DartThrow`: One scored dart, always one of the 62 legal throws
//! - `ALL_THROWS`: The full throw alphabet in canonical order

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of legal throws on a standard board.
pub const NUM_THROWS: usize = 62;

/// Score of the outer bull.
pub const OUTER_BULL: u32 = 25;

/// Score of the inner (double) bull.
pub const INNER_BULL: u32 = 50;

/// A scoring region of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A numbered wedge, 1-20.
    Number(u8),
    /// The bull (outer 25 or inner 50).
    Bull,
}

/// Ring multiplier of a throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Multiplier {
    /// Single ring (x1). Also the outer bull.
    Single = 1,
    /// Double ring (x2). Also the inner bull.
    Double = 2,
    /// Triple ring (x3). Numbered segments only.
    Triple = 3,
}

impl Multiplier {
    /// Numeric factor (1, 2 or 3).
    #[inline]
    pub fn factor(&self) -> u32 {
        *self as u32
    }

    /// Label prefix used for numbered segments.
    pub fn prefix(&self) -> char {
        match self {
            Multiplier::Single => 'S',
            Multiplier::Double => 'D',
            Multiplier::Triple => 'T',
        }
    }
}

/// One scored dart strike.
///
/// Only legal combinations can be constructed: numbers 1-20 at any multiplier,
/// and the bull as single (25) or double (50). There is no triple bull.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DartThrow {
    segment: Segment,
    multiplier: Multiplier,
}

impl DartThrow {
    /// Create a throw, returning `None` for combinations not on the board.
    pub fn new(segment: Segment, multiplier: Multiplier) -> Option<Self> {
        match (segment, multiplier) {
            (Segment::Number(n), _) if (1..=20).contains(&n) => Some(Self { segment, multiplier }),
            (Segment::Bull, Multiplier::Single | Multiplier::Double) => {
                Some(Self { segment, multiplier })
            }
            _ => None,
        }
    }

    /// Single ring of a numbered segment.
    pub fn single(n: u8) -> Option<Self> {
        Self::new(Segment::Number(n), Multiplier::Single)
    }

    /// Double ring of a numbered segment.
    pub fn double(n: u8) -> Option<Self> {
        Self::new(Segment::Number(n), Multiplier::Double)
    }

    /// Triple ring of a numbered segment.
    pub fn triple(n: u8) -> Option<Self> {
        Self::new(Segment::Number(n), Multiplier::Triple)
    }

    /// Outer bull (25).
    pub const fn outer_bull() -> Self {
        Self { segment: Segment::Bull, multiplier: Multiplier::Single }
    }

    /// Inner bull (50), which counts as a double.
    pub const fn inner_bull() -> Self {
        Self { segment: Segment::Bull, multiplier: Multiplier::Double }
    }

    /// The segment struck.
    #[inline]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// The ring multiplier.
    #[inline]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Points scored by this throw.
    #[inline]
    pub fn score(&self) -> u32 {
        match self.segment {
            Segment::Number(n) => n as u32 * self.multiplier.factor(),
            Segment::Bull => OUTER_BULL * self.multiplier.factor(),
        }
    }

    /// Whether this throw lands in a double ring (including the inner bull).
    #[inline]
    pub fn is_double(&self) -> bool {
        self.multiplier == Multiplier::Double
    }

    /// Whether this throw lands in a triple ring.
    #[inline]
    pub fn is_triple(&self) -> bool {
        self.multiplier == Multiplier::Triple
    }

    /// Whether this throw hits either bull.
    #[inline]
    pub fn is_bull(&self) -> bool {
        self.segment == Segment::Bull
    }

    /// Canonical short label: "T20", "D16", "S5", "BULL", "DBULL".
    pub fn label(&self) -> String {
        match self.segment {
            Segment::Number(n) => format!("{}{}", self.multiplier.prefix(), n),
            Segment::Bull if self.is_double() => "DBULL".to_string(),
            Segment::Bull => "BULL".to_string(),
        }
    }
}

impl Ord for DartThrow {
    /// Canonical order: higher score first, then higher multiplier first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score()
            .cmp(&self.score())
            .then_with(|| other.multiplier.cmp(&self.multiplier))
    }
}

impl PartialOrd for DartThrow {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DartThrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl fmt::Debug for DartThrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Error returned when a label does not name a legal throw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid dart label {0:?} (expected e.g. T20, D16, S5, BULL, DBULL)")]
pub struct ParseDartError(pub String);

impl FromStr for DartThrow {
    type Err = ParseDartError;

    /// Parse a dart from its canonical label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let err = || ParseDartError(s.to_string());

        match upper.as_str() {
            "BULL" => return Ok(Self::outer_bull()),
            "DBULL" => return Ok(Self::inner_bull()),
            _ => {}
        }

        let mut chars = upper.chars();
        let multiplier = match chars.next().ok_or_else(err)? {
            'S' => Multiplier::Single,
            'D' => Multiplier::Double,
            'T' => Multiplier::Triple,
            _ => return Err(err()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let n: u8 = digits.parse().map_err(|_| err())?;
        Self::new(Segment::Number(n), multiplier).ok_or_else(err)
    }
}

impl Serialize for DartThrow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for DartThrow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

const fn num(n: u8, multiplier: Multiplier) -> DartThrow {
    DartThrow { segment: Segment::Number(n), multiplier }
}

/// Every legal throw, sorted by the canonical order
/// (descending score, ties broken by higher multiplier).
pub static ALL_THROWS: [DartThrow; NUM_THROWS] = {
    use Multiplier::{Double as D, Single as S, Triple as T};
    [
        num(20, T), num(19, T), num(18, T), num(17, T), DartThrow::inner_bull(), num(16, T),
        num(15, T), num(14, T), num(20, D), num(13, T), num(19, D), num(12, T),
        num(18, D), num(17, D), num(11, T), num(16, D), num(10, T), num(15, D),
        num(14, D), num(9, T), num(13, D), DartThrow::outer_bull(), num(8, T), num(12, D),
        num(11, D), num(7, T), num(10, D), num(20, S), num(19, S), num(6, T),
        num(9, D), num(18, S), num(17, S), num(8, D), num(16, S), num(5, T),
        num(15, S), num(7, D), num(14, S), num(13, S), num(4, T), num(6, D),
        num(12, S), num(11, S), num(5, D), num(10, S), num(3, T), num(9, S),
        num(4, D), num(8, S), num(7, S), num(2, T), num(3, D), num(6, S),
        num(5, S), num(2, D), num(4, S), num(1, T), num(3, S), num(1, D),
        num(2, S), num(1, S),
    ]
};

/// All throws scoring exactly `score`, in canonical order.
pub fn throws_scoring(score: u32) -> impl Iterator<Item = &'static DartThrow> {
    ALL_THROWS.iter().filter(move |t| t.score() == score)
}

/// Whether any single throw scores exactly `score`.
pub fn is_legal_score(score: u32) -> bool {
    throws_scoring(score).next().is_some()
}
