//! Application constants for the itinerary processor
//!
//! This module contains the fixed vocabulary of the itinerary print formats:
//! schema field names, token classification bounds, section skip patterns,
//! payload magic bytes and Spanish month abbreviations.

// =============================================================================
// Flight Record Schema
// =============================================================================

/// Weekday field names in schema order (Monday through Sunday)
pub const DAY_FIELDS: &[&str] = &["lun", "mar", "mie", "jue", "vie", "sab", "dom"];

/// Number of weekday slots in a flight record
pub const DAY_SLOT_COUNT: usize = 7;

/// Status markers accepted at the start of a flight line
pub const STATUS_ACTIVE: &str = "A";
pub const STATUS_CANCELLED: &str = "C";

/// Placeholder marker consumed but never recorded as a status
pub const STATUS_PLACEHOLDER: &str = "-";

// =============================================================================
// Token Classification Bounds
// =============================================================================

/// Maximum numeric value of a clock-time token (HHMM shaped, 23:59)
pub const MAX_CLOCK_VALUE: u32 = 2359;

/// Maximum digits in a clock-time token
pub const MAX_TIME_DIGITS: usize = 4;

/// Highest single-digit equipment code in the conservative range (0-8)
pub const MAX_SINGLE_DIGIT_CODE: u32 = 8;

/// Highest two-digit equipment code (codes 10-14)
pub const MAX_TWO_DIGIT_CODE: u32 = 14;

/// Lowest two-digit equipment code
pub const MIN_TWO_DIGIT_CODE: u32 = 10;

// =============================================================================
// Line Filtering
// =============================================================================

/// Substrings marking non-flight lines (headers, footers, legends)
pub const SKIP_PATTERNS: &[&str] = &[
    "S VLO",
    "EFECTIVIDAD",
    "ITINERARIOS",
    "Emisión",
    "EMISIÓN",
    "UTC",
    "Notas:",
    "información",
];

/// Minimum tokens for a line to be considered a flight line
pub const MIN_LINE_TOKENS: usize = 4;

// =============================================================================
// Table Rows
// =============================================================================

/// Minimum cells for a table row to be considered a flight row
pub const MIN_ROW_CELLS: usize = 10;

/// Minimum matching cells (of 7) to accept a window as the day-code block
pub const MIN_DAY_WINDOW_MATCHES: usize = 5;

/// Cell values ignored in the day-code block of a table row
pub const EMPTY_DAY_CELLS: &[&str] = &["", "-1", "-"];

// =============================================================================
// Metadata Extraction
// =============================================================================

/// Header-style metadata is only searched within this many characters
pub const HEADER_SEARCH_WINDOW: usize = 3000;

/// Spanish month names with their fixed three-letter abbreviations
pub const SPANISH_MONTHS: &[(&str, &str)] = &[
    ("enero", "ENE"),
    ("febrero", "FEB"),
    ("marzo", "MAR"),
    ("abril", "ABR"),
    ("mayo", "MAY"),
    ("junio", "JUN"),
    ("julio", "JUL"),
    ("agosto", "AGO"),
    ("septiembre", "SEP"),
    ("octubre", "OCT"),
    ("noviembre", "NOV"),
    ("diciembre", "DIC"),
];

// =============================================================================
// Payload Magic Bytes
// =============================================================================

/// PDF file signature
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// ZIP local file header signature
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// gzip member signature
pub const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Deflate compression method nibble in a zlib CMF byte
pub const ZLIB_DEFLATE_METHOD: u8 = 8;

/// Content types signalling headerless raw deflate payloads
pub const RAW_DEFLATE_CONTENT_TYPES: &[&str] = &["application/zlib", "application/deflate"];

// =============================================================================
// Source Tags
// =============================================================================

/// Content-kind tags reported in the response `source` field
pub mod source_tags {
    pub const TEXT: &str = "text";
    pub const JSON: &str = "json";
    pub const ZIP: &str = "zip";
    pub const PDF: &str = "pdf";
    pub const TABLE: &str = "table";

    /// Compression prefixes concatenated ahead of the content kind
    pub const GZIP_PREFIX: &str = "gzip+";
    pub const ZLIB_PREFIX: &str = "zlib+";
    pub const DEFLATE_PREFIX: &str = "deflate+";
}

/// Get the fixed three-letter abbreviation for a Spanish month name
///
/// Unrecognized months fall back to their own first three letters, uppercased.
pub fn spanish_month_abbreviation(month: &str) -> String {
    let lower = month.to_lowercase();
    for (name, abbr) in SPANISH_MONTHS {
        if *name == lower {
            return (*abbr).to_string();
        }
    }
    month.chars().take(3).collect::<String>().to_uppercase()
}
