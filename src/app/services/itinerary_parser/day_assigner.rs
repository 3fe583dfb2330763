//! Day-code and validity-date assignment
//!
//! Maps the trailing region of a flight line onto the seven weekday slots
//! and the two validity dates. Two strategies exist, tried in order of
//! preference: column-position lookup (when the document header was
//! calibrated) and token counting with alignment.

use super::classifiers::{is_date, is_frequency_code};
use crate::app::models::{ColumnPositions, FlightRecord};
use crate::config::{DayAlignment, ParserPolicy};
use crate::constants::{DAY_SLOT_COUNT, MAX_TWO_DIGIT_CODE, MIN_TWO_DIGIT_CODE};

/// Assign day codes and validity dates from the trailing token region
///
/// `trailing_tokens` are the tokens after the section boundary; `line` is
/// the raw line, needed for position-based lookup. Date tokens (up to two)
/// land on `fechaInicio` then `fechaFin` in encounter order, independent of
/// the day-code count.
pub fn assign_days_and_dates(
    record: &mut FlightRecord,
    trailing_tokens: &[&str],
    line: &str,
    positions: Option<&ColumnPositions>,
    policy: &ParserPolicy,
) {
    let dates: Vec<&str> = trailing_tokens
        .iter()
        .copied()
        .filter(|t| is_date(t))
        .collect();

    // Day-code candidates sit in the (up to) 7 tokens before the first
    // date, or at the tail of the line when no date is printed.
    let day_window = match trailing_tokens.iter().position(|t| is_date(t)) {
        Some(first_date) => {
            let start = first_date.saturating_sub(DAY_SLOT_COUNT);
            &trailing_tokens[start..first_date]
        }
        None if trailing_tokens.len() >= DAY_SLOT_COUNT => {
            &trailing_tokens[trailing_tokens.len() - DAY_SLOT_COUNT..]
        }
        None => trailing_tokens,
    };

    let codes: Vec<&str> = day_window
        .iter()
        .copied()
        .filter(|t| is_frequency_code(t, policy))
        .collect();

    match positions {
        Some(pos) => {
            if !assign_by_position(record, line, pos, codes.len()) {
                // A discarded position result always falls back right-aligned;
                // the alignment policy only governs the pure token path.
                assign_by_count(record, &codes, DayAlignment::RightAlign);
            }
        }
        None => assign_by_count(record, &codes, policy.day_alignment),
    }

    if let Some(date) = dates.first() {
        record.fecha_inicio = (*date).to_string();
    }
    if let Some(date) = dates.get(1) {
        record.fecha_fin = (*date).to_string();
    }
}

/// Assign codes to weekday slots by token count
///
/// Exactly 7 codes map left-to-right onto Mon..Sun. Fewer codes follow the
/// policy alignment: right-aligned (pad on the left, trailing days assumed
/// present) or strict encounter order from Monday.
fn assign_by_count(record: &mut FlightRecord, codes: &[&str], alignment: DayAlignment) {
    if codes.is_empty() {
        return;
    }

    let start = if codes.len() >= DAY_SLOT_COUNT {
        0
    } else {
        match alignment {
            DayAlignment::RightAlign => DAY_SLOT_COUNT - codes.len(),
            DayAlignment::LeftAlign => 0,
        }
    };

    for (i, code) in codes.iter().take(DAY_SLOT_COUNT).enumerate() {
        record.set_day_code(start + i, *code);
    }
}

/// Assign codes by inspecting the line at each calibrated column offset
///
/// For each of the 7 offsets the characters at offset-1/offset/offset+1 are
/// checked for a lone digit (not adjacent to another digit), or a leading
/// `1` followed by a digit forming a 10-14 two-digit code. Returns false -
/// discarding any findings - when the count differs from the token-derived
/// count by more than 1, in which case the caller falls back to
/// right-aligned token assignment.
fn assign_by_position(
    record: &mut FlightRecord,
    line: &str,
    positions: &ColumnPositions,
    expected_count: usize,
) -> bool {
    let bytes = line.as_bytes();
    let mut found: Vec<(usize, String)> = Vec::new();

    for day_idx in 0..DAY_SLOT_COUNT {
        let Some(day_pos) = positions.offset(day_idx) else {
            continue;
        };

        for offset in [0i64, -1, 1] {
            let pos = day_pos as i64 + offset;
            if pos < 0 || pos as usize >= bytes.len() {
                continue;
            }
            let pos = pos as usize;
            let ch = bytes[pos];
            if !ch.is_ascii_digit() {
                continue;
            }

            let prev_is_digit = pos > 0 && bytes[pos - 1].is_ascii_digit();
            let next_is_digit = pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit();

            if ch == b'1' && next_is_digit && !prev_is_digit {
                let two_digit = 10 + (bytes[pos + 1] - b'0') as u32;
                if (MIN_TWO_DIGIT_CODE..=MAX_TWO_DIGIT_CODE).contains(&two_digit) {
                    found.push((day_idx, two_digit.to_string()));
                    break;
                }
            } else if !prev_is_digit && !next_is_digit {
                found.push((day_idx, (ch as char).to_string()));
                break;
            }
        }
    }

    // Tolerate one extraction discrepancy between the two views of the line
    if found.len().abs_diff(expected_count) > 1 {
        return false;
    }

    for (day_idx, code) in found {
        record.set_day_code(day_idx, code);
    }
    true
}
