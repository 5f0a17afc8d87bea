//! Keypad input surface.
//!
//! Collects digits one key at a time and turns them into a bounded score for
//! the engine. All range checking happens here; the engine itself accepts any
//! `u32`.

use thiserror::Error;

use crate::checkout::CheckoutConfig;

/// Errors from keypad or text input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A key other than 0-9 was pressed.
    #[error("{0:?} is not a digit")]
    NotADigit(char),
    /// The buffer already holds the maximum number of digits.
    #[error("scores have at most {max} digits")]
    TooManyDigits {
        /// Digit limit.
        max: usize,
    },
    /// A score cannot start with 0.
    #[error("a score cannot start with 0")]
    LeadingZero,
    /// Nothing was entered.
    #[error("no score entered")]
    Empty,
    /// Zero is not a remaining score.
    #[error("score must be positive")]
    Zero,
    /// Above the accepted range.
    #[error("score {score} is above the maximum of {max}")]
    AboveMaximum {
        /// Entered score.
        score: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// Digit buffer behind the numeric keypad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreInput {
    buffer: String,
    max_digits: usize,
    max_score: u32,
}

impl Default for ScoreInput {
    fn default() -> Self {
        Self::new(&CheckoutConfig::default())
    }
}

impl ScoreInput {
    /// Create an empty buffer bounded by `config`.
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            buffer: String::with_capacity(config.max_digits),
            max_digits: config.max_digits,
            max_score: config.max_score,
        }
    }

    /// Append one digit.
    pub fn push_digit(&mut self, key: char) -> Result<(), InputError> {
        if !key.is_ascii_digit() {
            return Err(InputError::NotADigit(key));
        }
        if self.buffer.len() >= self.max_digits {
            return Err(InputError::TooManyDigits { max: self.max_digits });
        }
        if self.buffer.is_empty() && key == '0' {
            return Err(InputError::LeadingZero);
        }
        self.buffer.push(key);
        Ok(())
    }

    /// Remove the last digit, if any.
    pub fn delete(&mut self) {
        self.buffer.pop();
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// The digits entered so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Whether no digit has been entered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The entered score, `None` while the buffer is empty.
    pub fn score(&self) -> Result<Option<u32>, InputError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }
        check_score(&self.buffer, self.max_score).map(Some)
    }
}

/// Parse a typed score, e.g. a command-line argument.
pub fn parse_score(text: &str, config: &CheckoutConfig) -> Result<u32, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_digit()) {
        return Err(InputError::NotADigit(bad));
    }
    if text.len() > config.max_digits {
        return Err(InputError::TooManyDigits { max: config.max_digits });
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(InputError::LeadingZero);
    }
    check_score(text, config.max_score)
}

fn check_score(digits: &str, max: u32) -> Result<u32, InputError> {
    // digits are ASCII 0-9 and bounded in length, so this only fails on overflow
    let score: u32 = digits.parse().map_err(|_| InputError::AboveMaximum { score: u32::MAX, max })?;
    match score {
        0 => Err(InputError::Zero),
        s if s > max => Err(InputError::AboveMaximum { score: s, max }),
        s => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> ScoreInput {
        let mut input = ScoreInput::default();
        for key in keys.chars() {
            input.push_digit(key).unwrap();
        }
        input
    }

    #[test]
    fn test_keypad_entry() {
        let mut input = typed("170");
        assert_eq!(input.as_str(), "170");
        assert_eq!(input.score(), Ok(Some(170)));

        input.delete();
        assert_eq!(input.score(), Ok(Some(17)));

        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.score(), Ok(None));

        // delete on empty is a no-op
        input.delete();
        assert!(input.is_empty());
    }

    #[test]
    fn test_keypad_limits() {
        let mut input = typed("123");
        assert_eq!(input.push_digit('4'), Err(InputError::TooManyDigits { max: 3 }));
        assert_eq!(input.as_str(), "123");

        let mut input = ScoreInput::default();
        assert_eq!(input.push_digit('0'), Err(InputError::LeadingZero));
        assert_eq!(input.push_digit('x'), Err(InputError::NotADigit('x')));
        assert!(input.is_empty());
    }

    #[test]
    fn test_keypad_above_maximum() {
        assert_eq!(typed("240").score(), Ok(Some(240)));
        assert_eq!(typed("241").score(), Err(InputError::AboveMaximum { score: 241, max: 240 }));
        // no finish above 170, but still a valid entry
        assert_eq!(typed("171").score(), Ok(Some(171)));
    }

    #[test]
    fn test_parse_score() {
        let config = CheckoutConfig::default();
        assert_eq!(parse_score(" 99 ", &config), Ok(99));
        assert_eq!(parse_score("", &config), Err(InputError::Empty));
        assert_eq!(parse_score("0", &config), Err(InputError::Zero));
        assert_eq!(parse_score("-5", &config), Err(InputError::NotADigit('-')));
        assert_eq!(parse_score("12.5", &config), Err(InputError::NotADigit('.')));
        assert_eq!(parse_score("1000", &config), Err(InputError::TooManyDigits { max: 3 }));
        assert_eq!(parse_score("300", &config), Err(InputError::AboveMaximum { score: 300, max: 240 }));
    }

    #[test]
    fn test_parse_score_rejects_leading_zero() {
        let config = CheckoutConfig::default();
        assert_eq!(parse_score("050", &config), Err(InputError::LeadingZero));
        assert_eq!(parse_score("007", &config), Err(InputError::LeadingZero));
        assert_eq!(parse_score("00", &config), Err(InputError::LeadingZero));
        assert_eq!(parse_score("50", &config), Ok(50));
    }
}
