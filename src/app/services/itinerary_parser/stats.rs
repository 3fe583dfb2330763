//! Parsing statistics and result structures for itinerary processing
//!
//! Per-line failures are silent skips by design, so these counters are the
//! only visibility into how much of a document actually parsed.

use crate::app::models::FlightRecord;

/// Parsing result with flight records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Successfully parsed flight records, in line order
    pub flights: Vec<FlightRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total lines scanned in the document
    pub lines_scanned: usize,

    /// Lines that looked like flight lines and were attempted
    pub lines_attempted: usize,

    /// Flight records successfully recovered
    pub records_parsed: usize,

    /// Attempted lines that yielded no record
    pub lines_skipped: usize,

    /// Lines whose destination was rescued from the day-code region
    pub trailing_rescues: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the success rate over attempted lines as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_attempted == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.lines_attempted as f64) * 100.0
        }
    }
}
