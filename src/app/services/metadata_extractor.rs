//! Document-level metadata extraction
//!
//! Issue code and validity window appear in one of two mutually exclusive
//! layouts: a labelled header block (`EMISION:`, `VIGENCIA:`, `FECHA:`) near
//! the top of the document, or a footer sentence repeated on every page
//! (`Emision 02/26 Del 26 de enero 2026 al 22 de febrero 2026`). The footer
//! is only consulted when the header produced no issue code. Runs once per
//! document, independent of per-line parsing.

use regex::Regex;
use tracing::debug;

use crate::app::models::DocumentMetadata;
use crate::constants::{HEADER_SEARCH_WINDOW, spanish_month_abbreviation};

/// Extracts issue code and validity window from document text
#[derive(Debug)]
pub struct MetadataExtractor {
    digit_split: Regex,
    header_emision: Regex,
    header_vigencia: Regex,
    header_fecha: Regex,
    footer: Regex,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    pub fn new() -> Self {
        let date = r"\d{1,2}-[A-Za-zÁ-Úá-ú]{3}-\d{4}";
        Self {
            // Text extractors sometimes insert spaces inside numbers
            // ("202 6" for "2026"); undo that before pattern matching
            digit_split: Regex::new(r"(\d)\s+(\d)").expect("digit split pattern is valid"),
            header_emision: Regex::new(r"(?i)EMISI[OÓ]N:?\s*(\d{2}/\d{2})")
                .expect("header emision pattern is valid"),
            header_vigencia: Regex::new(&format!(r"(?i)VIGENCIA:?\s*({date})\s*al\s*({date})"))
                .expect("header vigencia pattern is valid"),
            header_fecha: Regex::new(&format!(r"(?i)FECHA:?\s*({date})"))
                .expect("header fecha pattern is valid"),
            footer: Regex::new(
                r"(?i)Emisi[oó]n\s+(\d{2}/\d{2})\s+Del\s+(\d{1,2})\s+de\s+(\p{L}+)\s+(\d{4})\s+al\s+(\d{1,2})\s+de\s+(\p{L}+)\s+(\d{4})",
            )
            .expect("footer pattern is valid"),
        }
    }

    /// Extract metadata from the full document text
    ///
    /// Fields that neither layout provides stay empty; an absent footer and
    /// header is not an error.
    pub fn extract(&self, text: &str) -> DocumentMetadata {
        let clean = self.digit_split.replace_all(text, "${1}${2}");
        let mut metadata = DocumentMetadata::default();

        self.extract_header(&clean, &mut metadata);
        if metadata.codigo_emision.is_empty() {
            self.extract_footer(&clean, &mut metadata);
        }

        if metadata.is_empty() {
            debug!("no metadata patterns found in document");
        }
        metadata
    }

    /// Labelled header block, searched near the top of the document only
    fn extract_header(&self, text: &str, metadata: &mut DocumentMetadata) {
        let zone = &text[..floor_char_boundary(text, HEADER_SEARCH_WINDOW)];

        if let Some(captures) = self.header_emision.captures(zone) {
            metadata.codigo_emision = captures[1].to_string();
        }
        if let Some(captures) = self.header_vigencia.captures(zone) {
            metadata.vigencia_inicio = captures[1].to_uppercase();
            metadata.vigencia_fin = captures[2].to_uppercase();
        }
        if let Some(captures) = self.header_fecha.captures(zone) {
            metadata.fecha_emision = captures[1].to_uppercase();
        }
    }

    /// Footer sentence with spelled-out Spanish month names
    fn extract_footer(&self, text: &str, metadata: &mut DocumentMetadata) {
        let Some(captures) = self.footer.captures(text) else {
            return;
        };

        metadata.codigo_emision = captures[1].to_string();
        metadata.vigencia_inicio = format_footer_date(&captures[2], &captures[3], &captures[4]);
        metadata.vigencia_fin = format_footer_date(&captures[5], &captures[6], &captures[7]);
        // The footer carries no separate issue date
        metadata.fecha_emision = metadata.vigencia_inicio.clone();
    }
}

fn format_footer_date(day: &str, month: &str, year: &str) -> String {
    format!("{day}-{}-{year}", spanish_month_abbreviation(month))
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}
