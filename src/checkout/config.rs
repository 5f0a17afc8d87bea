//! Configuration for the checkout solver.
//!
//! This module provides the settings shared by the input surface, the
//! table builder and the report layer: input bounds, the dart limit and the
//! display caps for long buckets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::mode::GameMode;
use super::path::MAX_DARTS;

/// Configuration for the checkout solver.
///
/// # Example
/// ```
/// use darts_checkout_solver::checkout::CheckoutConfig;
///
/// let config = CheckoutConfig::default();
/// assert_eq!(config.max_score, 240);
/// assert_eq!(config.display_cap(2), Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Out-rule used when none is given.
    pub mode: GameMode,

    /// Highest score the input surface accepts.
    ///
    /// Scores above 170 are accepted and simply have no checkout.
    pub max_score: u32,

    /// Maximum number of digits the keypad accepts.
    pub max_digits: usize,

    /// Darts left in the visit (1-3).
    pub max_darts: usize,

    /// Two-dart paths shown before the rest are summarized as a count.
    pub two_dart_display_cap: usize,

    /// Three-dart paths shown before the rest are summarized as a count.
    pub three_dart_display_cap: usize,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::DoubleOut,
            max_score: 240,
            max_digits: 3,
            max_darts: MAX_DARTS,
            two_dart_display_cap: 20,
            three_dart_display_cap: 50,
        }
    }
}

impl CheckoutConfig {
    /// Create a new CheckoutConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the default mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: set the highest accepted score.
    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    /// Builder method: set darts left in the visit.
    pub fn with_max_darts(mut self, max_darts: usize) -> Self {
        self.max_darts = max_darts;
        self
    }

    /// Builder method: set both display caps.
    pub fn with_display_caps(mut self, two_dart: usize, three_dart: usize) -> Self {
        self.two_dart_display_cap = two_dart;
        self.three_dart_display_cap = three_dart;
        self
    }

    /// How many paths with `darts` darts to show; `None` means all of them.
    pub fn display_cap(&self, darts: usize) -> Option<usize> {
        match darts {
            2 => Some(self.two_dart_display_cap),
            3 => Some(self.three_dart_display_cap),
            _ => None,
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_digits == 0 || self.max_digits > 9 {
            return Err(ConfigError::InvalidMaxDigits(self.max_digits));
        }

        let digit_limit = 10u64.pow(self.max_digits as u32) - 1;
        if self.max_score == 0 || u64::from(self.max_score) > digit_limit {
            return Err(ConfigError::InvalidMaxScore {
                max_score: self.max_score,
                max_digits: self.max_digits,
            });
        }

        if self.max_darts == 0 || self.max_darts > MAX_DARTS {
            return Err(ConfigError::InvalidMaxDarts(self.max_darts));
        }

        if self.two_dart_display_cap == 0 {
            return Err(ConfigError::InvalidDisplayCap(2));
        }
        if self.three_dart_display_cap == 0 {
            return Err(ConfigError::InvalidDisplayCap(3));
        }

        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for this struct.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The score bound is zero or has more digits than the keypad allows.
    #[error("max score {max_score} must be between 1 and the largest {max_digits}-digit number")]
    InvalidMaxScore {
        /// Configured maximum score.
        max_score: u32,
        /// Configured digit limit.
        max_digits: usize,
    },
    /// Digit limit out of range [1, 9].
    #[error("max digits {0} is out of range [1, 9]")]
    InvalidMaxDigits(usize),
    /// Dart limit out of range [1, 3].
    #[error("max darts {0} is out of range [1, 3]")]
    InvalidMaxDarts(usize),
    /// A display cap of zero would hide every path.
    #[error("display cap for {0}-dart paths must be at least 1")]
    InvalidDisplayCap(usize),
}
