//! Line-oriented itinerary parser
//!
//! This module recovers the fixed flight-record schema from lines of text
//! extracted out of airline itinerary documents. The line layouts vary by
//! extractor and by airline print format; the parser relies on token
//! classification and a small set of calibrated heuristics rather than on
//! fixed delimiters.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Per-document orchestration and line filtering
//! - [`classifiers`] - Pure token predicates (airport, time, date, code)
//! - [`boundary`] - Locates the segment/day-code section boundary
//! - [`segments`] - Groups route tokens into airport/time segments
//! - [`day_assigner`] - Maps code tokens onto weekday slots and dates
//! - [`calibration`] - Day-column offsets from the document header
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use itinerary_processor::ParserPolicy;
//! use itinerary_processor::app::services::itinerary_parser::ItineraryParser;
//!
//! let parser = ItineraryParser::new(ParserPolicy::default());
//! let outcome = parser.parse_text("1 MEX 1030 JFK 1530 1 2 3 010126 150226");
//!
//! assert_eq!(outcome.flights.len(), 1);
//! assert_eq!(outcome.flights[0].origen, "MEX");
//! ```

pub mod boundary;
pub mod calibration;
pub mod classifiers;
pub mod day_assigner;
pub mod parser;
pub mod segments;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::ItineraryParser;
pub use stats::{ParseOutcome, ParseStats};
