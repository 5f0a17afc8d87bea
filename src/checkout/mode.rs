//! Out-rules for finishing a leg.
//!
//! This module defines the game modes that decide which throw may be the
//! final, zero-producing dart of a checkout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dart::DartThrow;

/// The out-rule selected for a calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Any throw may finish.
    SingleOut,
    /// The last dart must be a double (inner bull included).
    #[default]
    DoubleOut,
    /// The last dart must be a double or a triple (inner bull included).
    MasterOut,
}

impl GameMode {
    /// Every mode, in display order.
    pub const ALL: [GameMode; 3] = [GameMode::SingleOut, GameMode::DoubleOut, GameMode::MasterOut];

    /// Check whether `dart` is allowed as the last dart of a checkout.
    ///
    /// Non-final darts are never constrained.
    #[inline]
    pub fn accepts_finish(&self, dart: &DartThrow) -> bool {
        match self {
            GameMode::SingleOut => true,
            GameMode::DoubleOut => dart.is_double(),
            GameMode::MasterOut => dart.is_double() || dart.is_triple(),
        }
    }

    /// Snake-case name, e.g. `double_out`.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::SingleOut => "single_out",
            GameMode::DoubleOut => "double_out",
            GameMode::MasterOut => "master_out",
        }
    }

    /// Human-readable name, e.g. `Double Out`.
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::SingleOut => "Single Out",
            GameMode::DoubleOut => "Double Out",
            GameMode::MasterOut => "Master Out",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode {0:?} (expected single_out, double_out or master_out)")]
pub struct ParseModeError(pub String);

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_out" | "single" => Ok(GameMode::SingleOut),
            "double_out" | "double" => Ok(GameMode::DoubleOut),
            "master_out" | "master" => Ok(GameMode::MasterOut),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dart(label: &str) -> DartThrow {
        label.parse().unwrap()
    }

    #[test]
    fn test_single_out_accepts_everything() {
        for label in ["S1", "D20", "T20", "BULL", "DBULL"] {
            assert!(GameMode::SingleOut.accepts_finish(&dart(label)), "{}", label);
        }
    }

    #[test]
    fn test_double_out_finishes() {
        assert!(GameMode::DoubleOut.accepts_finish(&dart("D16")));
        assert!(GameMode::DoubleOut.accepts_finish(&dart("DBULL")));
        assert!(!GameMode::DoubleOut.accepts_finish(&dart("BULL")));
        assert!(!GameMode::DoubleOut.accepts_finish(&dart("T20")));
        assert!(!GameMode::DoubleOut.accepts_finish(&dart("S20")));
    }

    #[test]
    fn test_master_out_finishes() {
        assert!(GameMode::MasterOut.accepts_finish(&dart("D16")));
        assert!(GameMode::MasterOut.accepts_finish(&dart("T20")));
        assert!(GameMode::MasterOut.accepts_finish(&dart("DBULL")));
        assert!(!GameMode::MasterOut.accepts_finish(&dart("BULL")));
        assert!(!GameMode::MasterOut.accepts_finish(&dart("S5")));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("double_out".parse::<GameMode>(), Ok(GameMode::DoubleOut));
        assert_eq!("Master-Out".parse::<GameMode>(), Ok(GameMode::MasterOut));
        assert_eq!("single".parse::<GameMode>(), Ok(GameMode::SingleOut));
        assert!("triple_out".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&GameMode::MasterOut).unwrap(), "\"master_out\"");
        let mode: GameMode = serde_json::from_str("\"single_out\"").unwrap();
        assert_eq!(mode, GameMode::SingleOut);
        for mode in GameMode::ALL {
            assert_eq!(mode.to_string(), mode.name());
        }
    }
}
