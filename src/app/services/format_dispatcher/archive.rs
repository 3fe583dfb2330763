//! ZIP text extraction
//!
//! Itinerary archives hold one `.txt` file per page, named with a page
//! number somewhere in the file name. Members are concatenated in page
//! order, so multi-page documents keep their line sequence.

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::{Error, Result};

/// Extract and concatenate the `.txt` members of a ZIP payload
///
/// Members sort by the first number embedded in their name (name-order for
/// ties); non-text members are ignored. Content is decoded as lossy UTF-8
/// and joined with newlines.
pub fn extract_zip_text(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut members: Vec<(u64, String)> = archive
        .file_names()
        .filter(|name| name.ends_with(".txt"))
        .map(|name| (first_embedded_number(name), name.to_string()))
        .collect();
    members.sort();
    debug!(members = members.len(), "extracting ZIP text members");

    let mut parts = Vec::with_capacity(members.len());
    for (_, name) in &members {
        let mut file = archive.by_name(name)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::io(format!("ZIP member '{name}' could not be read"), e))?;
        parts.push(String::from_utf8_lossy(&content).into_owned());
    }

    Ok(parts.join("\n"))
}

/// First run of digits in a member name, or 0 when there is none
fn first_embedded_number(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
