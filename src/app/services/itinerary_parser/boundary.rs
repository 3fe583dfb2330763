//! Section boundary detection
//!
//! A flight line has a route region (airports and clock times) followed by a
//! day-code/date region, with no fixed delimiter between them. The only
//! reliable signal across layouts is the token mix itself: equipment codes
//! and dates never occur before the route is established.

use super::classifiers::{is_airport, is_date, is_frequency_code, split_digits_letters};
use crate::config::ParserPolicy;

/// Find the index of the first token belonging to the day/date region
///
/// Scans forward from `start_idx` (immediately after the flight-number
/// token) counting airports, where a concatenated digits+airport token
/// counts as one airport even when its digits are not a valid clock value -
/// the segment assembler drops such tokens, which is what lets a trailing
/// airport drift past the boundary and need rescuing.
/// A candidate frequency code is only considered once at
/// least 2 airports have been seen; this keeps a short clock time like "5"
/// from being mistaken for a day code before the route exists. The candidate
/// commits when at least `policy.freq_lookahead` frequency tokens follow in
/// the contiguous frequency-or-date run, or immediately when it sits at the
/// scan start. The first date token after 2 airports ends the region
/// unconditionally. With no boundary condition, the region runs to the end
/// of the token stream.
pub fn find_section_boundary(tokens: &[&str], start_idx: usize, policy: &ParserPolicy) -> usize {
    let mut airport_count = 0;

    for i in start_idx..tokens.len() {
        let token = tokens[i];

        if is_airport(token) || split_digits_letters(token).is_some_and(|(d, _)| d.len() <= 4) {
            airport_count += 1;
        }

        if is_frequency_code(token, policy) && airport_count >= 2 {
            if i > start_idx {
                let mut freq_count = 0;
                let mut lookahead = i;
                while lookahead < tokens.len()
                    && (is_frequency_code(tokens[lookahead], policy) || is_date(tokens[lookahead]))
                {
                    if is_frequency_code(tokens[lookahead], policy) {
                        freq_count += 1;
                    }
                    lookahead += 1;
                }
                if freq_count >= policy.freq_lookahead {
                    return i;
                }
            } else {
                return i;
            }
        }

        if is_date(token) && airport_count >= 2 {
            return i;
        }
    }

    tokens.len()
}
