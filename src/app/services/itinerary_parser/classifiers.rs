//! Token classification predicates
//!
//! Pure, total functions over string tokens. Both parsing paths (line tokens
//! and table rows) share these predicates so the two produce a consistent
//! schema. None of them allocate or touch state beyond the policy value.

use crate::config::ParserPolicy;
use crate::constants::{
    MAX_CLOCK_VALUE, MAX_SINGLE_DIGIT_CODE, MAX_TIME_DIGITS, MAX_TWO_DIGIT_CODE,
    MIN_TWO_DIGIT_CODE,
};

/// Check whether a token is a three-letter airport code
pub fn is_airport(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_uppercase())
}

/// Check whether a token is a clock time
///
/// Accepts 1-4 decimal digits with numeric value at most 23:59; a bare "5"
/// means 00:05. The minimum digit count is a policy knob.
pub fn is_time(token: &str, policy: &ParserPolicy) -> bool {
    if token.len() < policy.min_time_digits || token.len() > MAX_TIME_DIGITS {
        return false;
    }
    match parse_digits(token) {
        Some(value) => value <= MAX_CLOCK_VALUE,
        None => false,
    }
}

/// Check whether a token is a six-digit validity date
///
/// Positions 3-4 are the month (1-12) and positions 5-6 the day (1-31);
/// anything failing either bound is rejected.
pub fn is_date(token: &str) -> bool {
    if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let month: u32 = token[2..4].parse().unwrap_or(0);
    let day: u32 = token[4..6].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Check whether a token is an equipment/frequency code
///
/// These small integers double as day-of-operation markers: presence in a
/// weekday slot means the flight operates that day. The conservative range
/// is a single digit 0-8 or a two-digit 10-14; the widened variant accepts
/// any single digit and any 1-2 digit value up to 14.
pub fn is_frequency_code(token: &str, policy: &ParserPolicy) -> bool {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let value: u32 = match token.parse() {
        Ok(v) => v,
        Err(_) => return false,
    };

    if policy.widened_codes {
        return value <= MAX_TWO_DIGIT_CODE;
    }

    match token.len() {
        1 => value <= MAX_SINGLE_DIGIT_CODE,
        2 => (MIN_TWO_DIGIT_CODE..=MAX_TWO_DIGIT_CODE).contains(&value),
        _ => false,
    }
}

/// Split a `digits(1-4)+LETTERS(3)` token into its numeric and alphabetic
/// parts, when the numeric part is a valid clock value
///
/// Some extractors concatenate a time and the following airport code with no
/// separating space ("1030MEX", "5MAD"). Returns `None` for any other shape.
pub fn split_time_airport(token: &str) -> Option<(&str, &str)> {
    let (digits, letters) = split_digits_letters(token)?;
    if digits.len() > MAX_TIME_DIGITS {
        return None;
    }
    let value = parse_digits(digits)?;
    if value <= MAX_CLOCK_VALUE {
        Some((digits, letters))
    } else {
        None
    }
}

/// Split any `digits+LETTERS(3)` token regardless of the numeric value
///
/// Used for fused flight-number/origin cells ("1MEX" with an arbitrarily
/// long flight number).
pub fn split_digits_letters(token: &str) -> Option<(&str, &str)> {
    if token.len() < 4 {
        return None;
    }
    let split_at = token.len() - 3;
    let (digits, letters) = token.split_at(split_at);
    if !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && letters.bytes().all(|b| b.is_ascii_uppercase())
    {
        Some((digits, letters))
    } else {
        None
    }
}

fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
