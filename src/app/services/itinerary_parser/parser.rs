//! Core itinerary parser implementation
//!
//! Per-document orchestration: calibrate the day columns once, filter out
//! non-flight lines, and run each candidate line through the boundary
//! detector, segment assembler and day/date assigner. A line that fails any
//! precondition yields no record and never affects sibling lines.

use regex::Regex;
use tracing::{debug, info};

use super::boundary::find_section_boundary;
use super::calibration::ColumnCalibrator;
use super::classifiers::split_digits_letters;
use super::day_assigner::assign_days_and_dates;
use super::segments::{
    apply_segments, assemble_segments, rescue_trailing_airport, trace_single_segment,
};
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{ColumnPositions, FlightRecord};
use crate::config::ParserPolicy;
use crate::constants::{
    MIN_LINE_TOKENS, SKIP_PATTERNS, STATUS_ACTIVE, STATUS_CANCELLED, STATUS_PLACEHOLDER,
};

/// Line-oriented parser for itinerary document text
///
/// Stateless across documents: calibration is computed per call and threaded
/// into the per-line parse, so independent documents can be parsed from
/// separate threads with shared `ItineraryParser` values.
#[derive(Debug)]
pub struct ItineraryParser {
    policy: ParserPolicy,
    flight_line: Regex,
    separator_line: Regex,
    page_number: Regex,
    calibrator: ColumnCalibrator,
}

impl ItineraryParser {
    /// Create a new parser with the given heuristic policy
    pub fn new(policy: ParserPolicy) -> Self {
        Self {
            policy,
            // Matches both spaced ("1 MEX 10") and fused ("1MEX 10MAD")
            // extractor output
            flight_line: Regex::new(r"^\s*[AC\-]?\s*\d+\s*[A-Z]{3}\s+\d+")
                .expect("flight line pattern is valid"),
            separator_line: Regex::new(r"^[\s\-]+$").expect("separator pattern is valid"),
            page_number: Regex::new(r"^\s*\d{1,3}\s*$").expect("page number pattern is valid"),
            calibrator: ColumnCalibrator::new(),
        }
    }

    /// Parse a whole document of newline-separated text
    ///
    /// Day columns are calibrated once up front; each flight-shaped line is
    /// then parsed independently. Lines failing a precondition are silent
    /// skips, so a document with zero parseable lines is an empty outcome,
    /// not an error.
    pub fn parse_text(&self, text: &str) -> ParseOutcome {
        let lines: Vec<&str> = text.lines().collect();
        let positions = self.calibrator.calibrate(&lines);
        if positions.is_some() {
            debug!("day columns calibrated from document header");
        }

        let mut stats = ParseStats::new();
        let mut flights = Vec::new();

        for line in &lines {
            stats.lines_scanned += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || self.separator_line.is_match(trimmed) {
                continue;
            }
            if SKIP_PATTERNS.iter().any(|p| trimmed.contains(p)) {
                continue;
            }
            if self.page_number.is_match(trimmed) {
                continue;
            }
            if !self.flight_line.is_match(trimmed) {
                continue;
            }

            stats.lines_attempted += 1;
            // Parse the raw line: position-based day lookup needs the
            // original character offsets
            match self.parse_line_calibrated(line, positions.as_ref(), &mut stats) {
                Some(record) => {
                    flights.push(record);
                    stats.records_parsed += 1;
                }
                None => stats.lines_skipped += 1,
            }
        }

        info!(
            records = stats.records_parsed,
            attempted = stats.lines_attempted,
            scanned = stats.lines_scanned,
            "document parsed"
        );

        ParseOutcome { flights, stats }
    }

    /// Parse a single line without column calibration
    pub fn parse_line(&self, line: &str) -> Option<FlightRecord> {
        self.parse_line_calibrated(line, None, &mut ParseStats::new())
    }

    /// Parse a single line into a flight record
    ///
    /// Returns `None` for any line failing a precondition: too few tokens,
    /// unrecognized status/flight-number shape, or no recoverable airport.
    fn parse_line_calibrated(
        &self,
        line: &str,
        positions: Option<&ColumnPositions>,
        stats: &mut ParseStats,
    ) -> Option<FlightRecord> {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() < MIN_LINE_TOKENS {
            return None;
        }

        let mut record = FlightRecord::new();
        let mut idx = 0;

        // Status marker, when present
        if [STATUS_ACTIVE, STATUS_CANCELLED, STATUS_PLACEHOLDER].contains(&tokens[idx]) {
            if tokens[idx] != STATUS_PLACEHOLDER {
                record.status = tokens[idx].to_string();
            }
            idx += 1;
        }
        if idx >= tokens.len() {
            return None;
        }

        // Flight number: a plain digit run, or one still fused with the
        // origin airport (digit run too long for the time pre-split)
        let token = tokens[idx];
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            record.vuelo = token.to_string();
            idx += 1;
        } else if let Some((digits, letters)) = split_digits_letters(token) {
            record.vuelo = digits.to_string();
            tokens[idx] = digits;
            tokens.insert(idx + 1, letters);
            idx += 1;
        } else {
            return None;
        }
        if idx >= tokens.len() {
            return None;
        }

        // Route segments up to the section boundary. The boundary scan sees
        // the raw tokens (a fused time+airport stays one token there); the
        // assembler expands fused tokens only within the route region.
        let boundary = find_section_boundary(&tokens, idx, &self.policy);
        let segments = assemble_segments(&tokens[idx..boundary], &self.policy);
        apply_segments(&mut record, &segments);

        if segments.len() == 1 && !record.vuelo.is_empty() {
            trace_single_segment(&record, line, boundary);
        }

        if segments.len() == 1 && !record.origen.is_empty() {
            rescue_trailing_airport(&mut record, &tokens[boundary..], &self.policy);
            if !record.escala1.is_empty() {
                stats.trailing_rescues += 1;
            }
        }

        // Day codes and validity dates from the trailing region
        assign_days_and_dates(&mut record, &tokens[boundary..], line, positions, &self.policy);

        if record.is_acceptable() { Some(record) } else { None }
    }

    /// The heuristic policy this parser was built with
    pub fn policy(&self) -> &ParserPolicy {
        &self.policy
    }
}

impl Default for ItineraryParser {
    fn default() -> Self {
        Self::new(ParserPolicy::default())
    }
}
