//! Parser policy configuration.
//!
//! The itinerary print formats drifted over time and several incompatible
//! tie-break heuristics exist for the same fields. Rather than forking the
//! parser per variant, every divergent rule is a named knob on a single
//! [`ParserPolicy`] value that threads through the classifiers and the
//! day/date assigner.

use serde::{Deserialize, Serialize};

/// Alignment policy for partial day-code lists (fewer than 7 codes found)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayAlignment {
    /// Pad on the left so the last code lands on Sunday
    ///
    /// Partial listings in the calibration data most often drop leading
    /// weekdays, so trailing days are assumed present.
    RightAlign,

    /// Assign codes strictly in encounter order starting at Monday
    LeftAlign,
}

/// Configurable heuristics for the line tokenizer and field assembler
///
/// The defaults reproduce the most conservative observed variant. Alternate
/// variants are reachable through the `with_*` builders; mixing policies
/// within one document is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserPolicy {
    /// How partial day-code lists map onto the seven weekday slots
    pub day_alignment: DayAlignment,

    /// Contiguous frequency-or-date tokens required after a candidate
    /// frequency code before committing to a section boundary
    ///
    /// 2 is the conservative variant; 1 is the looser variant.
    pub freq_lookahead: usize,

    /// Accept the widened equipment-code range (any single digit 0-9 and
    /// any 1-2 digit value up to 14) instead of 0-8 plus 10-14
    pub widened_codes: bool,

    /// Minimum digits for a token to classify as a clock time
    ///
    /// 1 accepts bare "5" as 00:05; some variants require at least 2.
    pub min_time_digits: usize,
}

impl Default for ParserPolicy {
    fn default() -> Self {
        Self {
            day_alignment: DayAlignment::RightAlign,
            freq_lookahead: 2,
            widened_codes: false,
            min_time_digits: 1,
        }
    }
}

impl ParserPolicy {
    /// Create a policy with the conservative defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day-code alignment policy
    pub fn with_day_alignment(mut self, alignment: DayAlignment) -> Self {
        self.day_alignment = alignment;
        self
    }

    /// Set the boundary frequency lookahead threshold
    pub fn with_freq_lookahead(mut self, lookahead: usize) -> Self {
        self.freq_lookahead = lookahead;
        self
    }

    /// Accept the widened equipment-code range
    pub fn with_widened_codes(mut self) -> Self {
        self.widened_codes = true;
        self
    }

    /// Set the minimum digit count for clock-time tokens
    pub fn with_min_time_digits(mut self, digits: usize) -> Self {
        self.min_time_digits = digits;
        self
    }

    /// Validate the policy values for consistency
    pub fn validate(&self) -> crate::Result<()> {
        if self.freq_lookahead == 0 {
            return Err(crate::Error::configuration(
                "Frequency lookahead must be at least 1".to_string(),
            ));
        }

        if self.min_time_digits == 0 || self.min_time_digits > crate::constants::MAX_TIME_DIGITS {
            return Err(crate::Error::configuration(format!(
                "Minimum time digits must be between 1 and {}",
                crate::constants::MAX_TIME_DIGITS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_conservative() {
        let policy = ParserPolicy::default();
        assert_eq!(policy.day_alignment, DayAlignment::RightAlign);
        assert_eq!(policy.freq_lookahead, 2);
        assert!(!policy.widened_codes);
        assert_eq!(policy.min_time_digits, 1);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_builder_variants() {
        let policy = ParserPolicy::new()
            .with_day_alignment(DayAlignment::LeftAlign)
            .with_freq_lookahead(1)
            .with_widened_codes()
            .with_min_time_digits(2);

        assert_eq!(policy.day_alignment, DayAlignment::LeftAlign);
        assert_eq!(policy.freq_lookahead, 1);
        assert!(policy.widened_codes);
        assert_eq!(policy.min_time_digits, 2);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_invalid_policies_rejected() {
        assert!(ParserPolicy::new().with_freq_lookahead(0).validate().is_err());
        assert!(ParserPolicy::new().with_min_time_digits(0).validate().is_err());
        assert!(ParserPolicy::new().with_min_time_digits(5).validate().is_err());
    }
}
