//! Payload format dispatch
//!
//! Input boundary of the processing pipeline: classifies a raw byte payload,
//! undoes any compression layer, and produces plain document text plus a
//! `source` tag describing what was detected (compression prefix and content
//! kind, e.g. `gzip+zip`).
//!
//! Detection order follows the upstream protocol: compression first (gzip
//! and zlib by magic bytes, raw deflate by declared content type), then JSON
//! `{"text": ...}` payloads for uncompressed requests, then the container
//! formats, then plain text as the fallback.

mod archive;
mod decompress;
mod sniff;

use std::borrow::Cow;

use tracing::debug;

use crate::constants::source_tags;
use crate::{Error, Result};

/// Plain text extracted from a payload, with its detected source tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedText {
    pub text: String,
    pub source: String,
}

/// Classify a payload and extract its document text
///
/// PDF payloads are detected but not rendered; they produce an
/// `UnsupportedFormat` error telling the caller to supply extracted text or
/// table rows instead.
pub fn dispatch(body: &[u8], content_type: &str) -> Result<DispatchedText> {
    let (data, prefix): (Cow<'_, [u8]>, &str) = if sniff::is_gzip(body) {
        (Cow::Owned(decompress::gunzip(body)?), source_tags::GZIP_PREFIX)
    } else if sniff::is_zlib(body) {
        (
            Cow::Owned(decompress::inflate_zlib(body)?),
            source_tags::ZLIB_PREFIX,
        )
    } else if sniff::is_raw_deflate(content_type) {
        (
            Cow::Owned(decompress::inflate_raw(body)?),
            source_tags::DEFLATE_PREFIX,
        )
    } else {
        (Cow::Borrowed(body), "")
    };

    if prefix.is_empty() && content_type.contains("application/json") {
        let payload: serde_json::Value = serde_json::from_slice(&data)?;
        let text = payload
            .get("text")
            .and_then(|value| value.as_str())
            .unwrap_or("")
            .to_string();
        debug!(source = source_tags::JSON, "payload dispatched");
        return Ok(DispatchedText {
            text,
            source: source_tags::JSON.to_string(),
        });
    }

    if sniff::is_pdf(&data) {
        return Err(Error::unsupported_format(
            format!("{prefix}{}", source_tags::PDF),
            "PDF rendering is not supported; supply extracted text or table rows",
        ));
    }

    let dispatched = if sniff::is_zip(&data) {
        DispatchedText {
            text: archive::extract_zip_text(&data)?,
            source: format!("{prefix}{}", source_tags::ZIP),
        }
    } else {
        DispatchedText {
            text: String::from_utf8_lossy(&data).into_owned(),
            source: format!("{prefix}{}", source_tags::TEXT),
        }
    };

    debug!(source = %dispatched.source, bytes = body.len(), "payload dispatched");
    Ok(dispatched)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::{GzEncoder, ZlibEncoder};

    use super::*;

    const LINE: &str = "A 12 MEX 1030 JFK 1530 1 2 3 010126";

    #[test]
    fn test_plain_text_passthrough() {
        let dispatched = dispatch(LINE.as_bytes(), "text/plain").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "text");
    }

    #[test]
    fn test_gzip_payload_carries_prefix() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(LINE.as_bytes()).unwrap();
        let body = encoder.finish().unwrap();

        let dispatched = dispatch(&body, "application/octet-stream").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "gzip+text");
    }

    #[test]
    fn test_zlib_payload_carries_prefix() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(LINE.as_bytes()).unwrap();
        let body = encoder.finish().unwrap();

        let dispatched = dispatch(&body, "").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "zlib+text");
    }

    #[test]
    fn test_raw_deflate_by_content_type() {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(LINE.as_bytes()).unwrap();
        let body = encoder.finish().unwrap();

        let dispatched = dispatch(&body, "application/zlib").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "deflate+text");
    }

    #[test]
    fn test_json_text_field() {
        let body = serde_json::json!({ "text": LINE }).to_string();
        let dispatched = dispatch(body.as_bytes(), "application/json").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "json");
    }

    #[test]
    fn test_json_without_text_field_is_empty() {
        let dispatched = dispatch(br#"{"other": 1}"#, "application/json").unwrap();
        assert_eq!(dispatched.text, "");
    }

    #[test]
    fn test_compressed_json_is_treated_as_text() {
        // The declared JSON type only applies to uncompressed payloads
        let body = serde_json::json!({ "text": LINE }).to_string();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(body.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let dispatched = dispatch(&compressed, "application/json").unwrap();
        assert_eq!(dispatched.source, "gzip+text");
        assert!(dispatched.text.contains("MEX"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(dispatch(b"not json", "application/json").is_err());
    }

    #[test]
    fn test_pdf_is_rejected() {
        let err = dispatch(b"%PDF-1.7 ...", "application/pdf").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFormat { ref detected, .. } if detected == "pdf"
        ));
    }

    #[test]
    fn test_zip_payload() {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("page1.txt", options).unwrap();
        writer.write_all(LINE.as_bytes()).unwrap();
        let body = writer.finish().unwrap().into_inner();

        let dispatched = dispatch(&body, "application/octet-stream").unwrap();
        assert_eq!(dispatched.text, LINE);
        assert_eq!(dispatched.source, "zip");
    }
}
