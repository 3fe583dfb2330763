//! Test fixtures shared across the itinerary parser test modules

use crate::config::ParserPolicy;

// Test modules
mod boundary_tests;

/// The conservative default policy used throughout the tests
pub fn default_policy() -> ParserPolicy {
    ParserPolicy::default()
}

/// A document fragment with a day-letter header and two flight lines
pub fn create_test_document() -> String {
    [
        "ITINERARIOS DE VUELO",
        "S VLO ORIGEN          DESTINO         L  M  M  J  V  S  D",
        "A 12 MEX 1030 JFK 1530 1 2 3 4 5 6 7 010126 150226",
        "C 407 GDL 615 TIJ 745 3 3 3 120126 280226",
        "Emisión 02/26 Del 26 de enero 2026 al 22 de febrero 2026",
    ]
    .join("\n")
}
