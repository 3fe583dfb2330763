//! Day-column calibration
//!
//! Itinerary pages carry a header row with the seven Spanish weekday
//! initials ("L M M J V S D" - Monday/Tuesday and Wednesday share letters in
//! this locale). Recording the character offset of each initial lets the
//! day/date assigner disambiguate code placement by column position when
//! token counts alone are ambiguous.

use regex::Regex;

use crate::app::models::ColumnPositions;
use crate::constants::DAY_SLOT_COUNT;

/// The seven weekday initials in header order
const DAY_LETTERS: [char; DAY_SLOT_COUNT] = ['L', 'M', 'M', 'J', 'V', 'S', 'D'];

/// Locates the day-letter header and records its column offsets
#[derive(Debug)]
pub struct ColumnCalibrator {
    header_pattern: Regex,
}

impl Default for ColumnCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnCalibrator {
    pub fn new() -> Self {
        Self {
            // Day letters separated by runs of spaces, as printed in headers
            header_pattern: Regex::new(r"\bL\s+M\s+M\s+J\s+V\s+S\s+D\b")
                .expect("day header pattern is valid"),
        }
    }

    /// Scan document lines for the day-letter header
    ///
    /// Succeeds only when exactly seven non-negative offsets are found in
    /// one line; otherwise calibration stays unset for the whole document.
    /// The search start advances past each match to avoid re-matching the
    /// repeated letters.
    pub fn calibrate(&self, lines: &[&str]) -> Option<ColumnPositions> {
        lines
            .iter()
            .find(|line| self.header_pattern.is_match(line))
            .and_then(|line| self.letter_offsets(line))
    }

    fn letter_offsets(&self, line: &str) -> Option<ColumnPositions> {
        let mut offsets = [0usize; DAY_SLOT_COUNT];
        let mut search_start = 0;

        for (slot, day) in DAY_LETTERS.iter().enumerate() {
            let pos = line[search_start..].find(*day)? + search_start;
            offsets[slot] = pos;
            search_start = pos + 1;
        }

        Some(ColumnPositions::new(offsets))
    }
}
