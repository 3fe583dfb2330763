//! Segment assembly
//!
//! Walks the route region of a line and groups its tokens into ordered
//! (airport, times) segments, then maps up to four segments onto the fixed
//! origin/escala1/escala2/destino schema slots.

use tracing::debug;

use super::classifiers::{is_airport, is_time, split_time_airport};
use crate::app::models::FlightRecord;
use crate::config::ParserPolicy;

/// One airport visited plus the clock times recorded immediately after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub airport: String,
    pub times: Vec<String>,
}

/// Group route tokens into ordered airport/time segments
///
/// Concatenated time+airport tokens are split first, then each airport
/// token opens a segment which greedily consumes the following time tokens
/// until a non-time token appears. Tokens that are neither are dropped.
pub fn assemble_segments(flight_tokens: &[&str], policy: &ParserPolicy) -> Vec<Segment> {
    let mut expanded: Vec<&str> = Vec::with_capacity(flight_tokens.len());
    for token in flight_tokens {
        match split_time_airport(token) {
            Some((time_part, airport_part)) => {
                expanded.push(time_part);
                expanded.push(airport_part);
            }
            None => expanded.push(token),
        }
    }

    let mut segments = Vec::new();
    let mut idx = 0;
    while idx < expanded.len() {
        let token = expanded[idx];
        if is_airport(token) {
            let mut segment = Segment {
                airport: token.to_string(),
                times: Vec::new(),
            };
            idx += 1;
            while idx < expanded.len() && is_time(expanded[idx], policy) {
                segment.times.push(expanded[idx].to_string());
                idx += 1;
            }
            segments.push(segment);
        } else {
            idx += 1;
        }
    }

    segments
}

/// Map ordered segments onto the fixed schema slots
///
/// Segment 0 is always the origin. With fewer than four segments the last
/// stop found stays an escala; `destino` is only populated by a fourth
/// segment, since a short route is an origin-to-stop pair rather than a
/// confirmed final destination.
pub fn apply_segments(record: &mut FlightRecord, segments: &[Segment]) {
    if let Some(seg) = segments.first() {
        record.origen = seg.airport.clone();
        if let Some(time) = seg.times.first() {
            record.salida1 = time.clone();
        }
    }

    if let Some(seg) = segments.get(1) {
        record.escala1 = seg.airport.clone();
        if let Some(time) = seg.times.first() {
            record.llegada1 = time.clone();
        }
        if let Some(time) = seg.times.get(1) {
            record.salida2 = time.clone();
        }
    }

    if let Some(seg) = segments.get(2) {
        record.escala2 = seg.airport.clone();
        if let Some(time) = seg.times.first() {
            record.llegada2 = time.clone();
        }
        if let Some(time) = seg.times.get(1) {
            record.salida3 = time.clone();
        }
    }

    if let Some(seg) = segments.get(3) {
        record.destino = seg.airport.clone();
        if let Some(time) = seg.times.first() {
            record.llegada3 = time.clone();
        }
    }
}

/// Rescue a destination that bled into the day-code region
///
/// Some layouts let the final airport drift past the section boundary. When
/// only one segment was recovered, the first airport among the trailing
/// tokens becomes `escala1`, with the time token immediately preceding it
/// (if any) as its arrival.
pub fn rescue_trailing_airport(
    record: &mut FlightRecord,
    trailing_tokens: &[&str],
    policy: &ParserPolicy,
) {
    for (i, token) in trailing_tokens.iter().enumerate() {
        if is_airport(token) {
            record.escala1 = (*token).to_string();
            if i > 0 && is_time(trailing_tokens[i - 1], policy) {
                record.llegada1 = trailing_tokens[i - 1].to_string();
            }
            return;
        }
    }
}

/// Emit the diagnostic event for single-segment under-parses
///
/// Operational signal only; it never alters control flow or output. The
/// subscriber decides whether anything is recorded.
pub fn trace_single_segment(record: &FlightRecord, line: &str, boundary: usize) {
    debug!(
        vuelo = %record.vuelo,
        boundary,
        line = %line.chars().take(100).collect::<String>(),
        "flight line produced only one segment"
    );
}
