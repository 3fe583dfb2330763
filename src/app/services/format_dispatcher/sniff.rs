//! Payload format sniffing
//!
//! Classification is byte-based wherever a magic number exists. Raw deflate
//! has no header at all, so it is the one format detected from the declared
//! content type instead.

use crate::constants::{
    GZIP_MAGIC, PDF_MAGIC, RAW_DEFLATE_CONTENT_TYPES, ZIP_MAGIC, ZLIB_DEFLATE_METHOD,
};

pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

pub fn is_zip(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(GZIP_MAGIC)
}

/// Check for a zlib stream header
///
/// The CMF byte must declare the deflate method and the CMF/FLG pair must
/// pass the header checksum (`(CMF*256 + FLG) % 31 == 0`).
pub fn is_zlib(data: &[u8]) -> bool {
    let [cmf, flg, ..] = data else {
        return false;
    };
    cmf & 0x0f == ZLIB_DEFLATE_METHOD && (u32::from(*cmf) * 256 + u32::from(*flg)) % 31 == 0
}

/// Check whether the declared content type signals headerless raw deflate
pub fn is_raw_deflate(content_type: &str) -> bool {
    RAW_DEFLATE_CONTENT_TYPES
        .iter()
        .any(|ct| content_type.contains(ct))
}
