//! Document processing orchestration
//!
//! Output boundary of the pipeline: raw payload in, `ParseResponse` out.
//! Internal failures are converted into `success=false` responses here;
//! nothing panics or errors past this module.

use tracing::{info, warn};

use super::format_dispatcher::dispatch;
use super::itinerary_parser::ItineraryParser;
use super::metadata_extractor::MetadataExtractor;
use super::table_parser::TableRowParser;
use crate::app::models::{DocumentMetadata, ParseResponse};
use crate::config::ParserPolicy;
use crate::constants::source_tags;

/// Runs payloads through dispatch, metadata extraction and parsing
#[derive(Debug)]
pub struct DocumentProcessor {
    parser: ItineraryParser,
    table_parser: TableRowParser,
    metadata_extractor: MetadataExtractor,
}

impl DocumentProcessor {
    /// Create a processor with the given parsing policy
    pub fn new(policy: ParserPolicy) -> Self {
        Self {
            parser: ItineraryParser::new(policy),
            table_parser: TableRowParser::new(),
            metadata_extractor: MetadataExtractor::new(),
        }
    }

    /// Process a raw document payload into a response
    ///
    /// A document with zero parseable lines is a success with `total=0`;
    /// only payload-level failures (bad compression, broken archive,
    /// unsupported format) produce `success=false`.
    pub fn process_document(&self, body: &[u8], content_type: &str) -> ParseResponse {
        let dispatched = match dispatch(body, content_type) {
            Ok(dispatched) => dispatched,
            Err(error) => {
                warn!(%error, "document could not be dispatched");
                return ParseResponse::failure(&error);
            }
        };

        let metadata = self.metadata_extractor.extract(&dispatched.text);
        let outcome = self.parser.parse_text(&dispatched.text);
        info!(
            source = %dispatched.source,
            flights = outcome.flights.len(),
            "document processed"
        );

        ParseResponse::success(
            outcome.flights,
            dispatched.source,
            dispatched.text.chars().count(),
            metadata,
        )
    }

    /// Process pre-extracted table rows into a response
    ///
    /// Rows carry no document text, so the metadata block stays empty.
    pub fn process_rows(&self, rows: &[Vec<Option<String>>]) -> ParseResponse {
        let flights = self.table_parser.parse_rows(rows);
        info!(flights = flights.len(), "table rows processed");

        ParseResponse::success(flights, source_tags::TABLE, 0, DocumentMetadata::default())
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(ParserPolicy::default())
    }
}
