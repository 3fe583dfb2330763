//! Payload decompression
//!
//! Thin wrappers over the `flate2` readers, mapping failures onto the
//! crate's decompression error with the format name attached.

use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

use crate::{Error, Result};

pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| Error::decompression("gzip", "payload could not be decompressed", e))?;
    Ok(out)
}

pub fn inflate_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| Error::decompression("zlib", "payload could not be decompressed", e))?;
    Ok(out)
}

/// Inflate a headerless deflate stream (iOS Compression framework output)
pub fn inflate_raw(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| Error::decompression("deflate", "payload could not be decompressed", e))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};

    use super::*;

    #[test]
    fn test_gzip_round_trip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"itinerary text").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(gunzip(&compressed).unwrap(), b"itinerary text");
    }

    #[test]
    fn test_zlib_round_trip() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"itinerary text").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(inflate_zlib(&compressed).unwrap(), b"itinerary text");
    }

    #[test]
    fn test_raw_deflate_round_trip() {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"itinerary text").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(inflate_raw(&compressed).unwrap(), b"itinerary text");
    }

    #[test]
    fn test_corrupt_gzip_reports_format() {
        let err = gunzip(&[0x1f, 0x8b, 0xff, 0xff]).unwrap_err();
        assert!(err.to_string().contains("gzip"));
    }
}
