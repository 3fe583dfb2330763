//! Data models for itinerary processing
//!
//! This module contains the core data structures for representing normalized
//! flight records, document-level metadata, column calibration state and the
//! response object emitted at the output boundary.
//!
//! All record fields are strings with the empty string meaning absent or
//! unknown, matching the wire schema the itinerary consumers expect.

use crate::constants::DAY_SLOT_COUNT;
use serde::{Deserialize, Serialize};

// =============================================================================
// Flight Record
// =============================================================================

/// One normalized flight leg recovered from a single line or table row
///
/// A record is fully populated within one line/row parse; there is no
/// cross-line state. Segment order is fixed: `origen` is always segment 0,
/// `escala1`/`escala2` are intermediate stops, and `destino` is populated
/// only when four segments are recovered. A two-segment flight is an
/// origin-to-stop pair, never a confirmed final destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Schedule status: "A" (active), "C" (cancelled) or empty
    pub status: String,

    /// Flight number, digits only
    pub vuelo: String,

    /// Origin airport, three uppercase letters
    pub origen: String,

    /// First intermediate stop (or last recovered stop when fewer than
    /// four segments are found)
    pub escala1: String,

    /// Second intermediate stop
    pub escala2: String,

    /// Final destination, only set when four segments are recovered
    pub destino: String,

    /// Departure from origin
    pub salida1: String,

    /// Arrival at the first stop
    pub llegada1: String,

    /// Departure from the first stop
    pub salida2: String,

    /// Arrival at the second stop
    pub llegada2: String,

    /// Departure from the second stop
    pub salida3: String,

    /// Arrival at the destination
    pub llegada3: String,

    /// Monday equipment code (empty = does not operate)
    pub lun: String,
    /// Tuesday equipment code
    pub mar: String,
    /// Wednesday equipment code
    pub mie: String,
    /// Thursday equipment code
    pub jue: String,
    /// Friday equipment code
    pub vie: String,
    /// Saturday equipment code
    pub sab: String,
    /// Sunday equipment code
    pub dom: String,

    /// Validity range start, six digits (MMDDYY shaped)
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: String,

    /// Validity range end, six digits
    #[serde(rename = "fechaFin")]
    pub fecha_fin: String,
}

impl FlightRecord {
    /// Create an empty record (all fields absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the output acceptance invariant: a flight number plus at
    /// least one recovered airport segment
    pub fn is_acceptable(&self) -> bool {
        !self.vuelo.is_empty() && !self.origen.is_empty()
    }

    /// Set the weekday slot at `index` (0 = Monday .. 6 = Sunday)
    pub fn set_day_code(&mut self, index: usize, code: impl Into<String>) {
        let slot = match index {
            0 => &mut self.lun,
            1 => &mut self.mar,
            2 => &mut self.mie,
            3 => &mut self.jue,
            4 => &mut self.vie,
            5 => &mut self.sab,
            6 => &mut self.dom,
            _ => return,
        };
        *slot = code.into();
    }

    /// Get the weekday slot at `index` (0 = Monday .. 6 = Sunday)
    pub fn day_code(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.lun),
            1 => Some(&self.mar),
            2 => Some(&self.mie),
            3 => Some(&self.jue),
            4 => Some(&self.vie),
            5 => Some(&self.sab),
            6 => Some(&self.dom),
            _ => None,
        }
    }

    /// Count the weekdays this flight operates
    pub fn operating_day_count(&self) -> usize {
        (0..DAY_SLOT_COUNT)
            .filter(|&i| self.day_code(i).is_some_and(|c| !c.is_empty()))
            .count()
    }
}

// =============================================================================
// Document Metadata
// =============================================================================

/// Document-level issue code and validity window
///
/// Computed once per document by the metadata extractor, independent of
/// per-line parsing. Dates use `DD-MMM-YYYY` with Spanish month
/// abbreviations; empty string means the pattern was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Issue code in MM/YY form (e.g. "02/26")
    #[serde(rename = "codigoEmision")]
    pub codigo_emision: String,

    /// Issue date
    #[serde(rename = "fechaEmision")]
    pub fecha_emision: String,

    /// Validity window start
    #[serde(rename = "vigenciaInicio")]
    pub vigencia_inicio: String,

    /// Validity window end
    #[serde(rename = "vigenciaFin")]
    pub vigencia_fin: String,
}

impl DocumentMetadata {
    /// Check whether any field was extracted
    pub fn is_empty(&self) -> bool {
        self.codigo_emision.is_empty()
            && self.fecha_emision.is_empty()
            && self.vigencia_inicio.is_empty()
            && self.vigencia_fin.is_empty()
    }
}

// =============================================================================
// Column Calibration
// =============================================================================

/// Character offsets of the seven day-letter header columns
///
/// Set at most once per document by the column calibrator and read-only
/// afterward. Absent unless a header row matching the day-letter pattern
/// was found, in which case exactly seven non-negative offsets are held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPositions {
    offsets: [usize; DAY_SLOT_COUNT],
}

impl ColumnPositions {
    /// Build from exactly seven offsets
    pub fn new(offsets: [usize; DAY_SLOT_COUNT]) -> Self {
        Self { offsets }
    }

    /// Offset of the weekday column at `index` (0 = Monday .. 6 = Sunday)
    pub fn offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// All seven offsets in weekday order
    pub fn offsets(&self) -> &[usize; DAY_SLOT_COUNT] {
        &self.offsets
    }
}

// =============================================================================
// Response Object
// =============================================================================

/// Result object emitted at the output boundary
///
/// On internal failure the processor produces `success=false` with an error
/// description and an empty flight list; nothing raises past this boundary.
/// A document with zero parseable lines is a success with `total=0`.
///
/// The two shapes serialize differently: a failure body carries only
/// `success`/`error`/`total`/`flights`, while a success body always includes
/// `source`, `textLength` and the `metadata` block (empty or not).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Whether the document was processed
    pub success: bool,

    /// Number of flight records recovered
    pub total: usize,

    /// Recovered records in line/row order
    pub flights: Vec<FlightRecord>,

    /// Detected input shape (compression prefix + content-kind tag),
    /// absent on failure
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    /// Length of the extracted document text, absent on failure
    #[serde(rename = "textLength", default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,

    /// Document-level metadata, absent on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,

    /// Error description, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResponse {
    /// Build a success response from recovered flights
    pub fn success(
        flights: Vec<FlightRecord>,
        source: impl Into<String>,
        text_length: usize,
        metadata: DocumentMetadata,
    ) -> Self {
        Self {
            success: true,
            total: flights.len(),
            flights,
            source: source.into(),
            text_length: Some(text_length),
            metadata: Some(metadata),
            error: None,
        }
    }

    /// Build a failure response carrying the error description
    pub fn failure(error: &crate::Error) -> Self {
        Self {
            success: false,
            total: 0,
            flights: Vec::new(),
            source: String::new(),
            text_length: None,
            metadata: None,
            error: Some(error.to_string()),
        }
    }
}
