//! File type detection.
//!
//! Sniffs PDF documents and ICC profiles from their leading bytes. The file
//! extension is never consulted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Media type of PDF documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type of ICC color profiles.
pub const ICC_MEDIA_TYPE: &str = "application/vnd.iccprofile";

/// Number of leading bytes inspected.
const SNIFF_LEN: usize = 1024;

/// PDF header marker, accepted anywhere in the sniffed window.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// ICC profile file signature.
const ICC_MAGIC: &[u8] = b"acsp";
const ICC_MAGIC_OFFSET: usize = 36;

/// Outcome of sniffing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileKind {
    /// Content sniffs as `application/pdf`.
    pub is_pdf: bool,
    /// Content sniffs as `application/vnd.iccprofile`.
    pub is_icc: bool,
}

/// Classifies a file by content.
///
/// Missing or unreadable files are neither PDF nor ICC.
pub fn classify<P: AsRef<Path>>(path: P) -> FileKind {
    let mime = media_type(path);
    FileKind {
        is_pdf: mime == Some(PDF_MEDIA_TYPE),
        is_icc: mime == Some(ICC_MEDIA_TYPE),
    }
}

/// Returns true if the file's content is a PDF document.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    classify(path).is_pdf
}

/// Returns true if the file's content is an ICC profile.
pub fn is_icc<P: AsRef<Path>>(path: P) -> bool {
    classify(path).is_icc
}

/// Sniffs the media type of a file.
///
/// Returns `None` for files that cannot be opened or match no known type.
pub fn media_type<P: AsRef<Path>>(path: P) -> Option<&'static str> {
    let path = path.as_ref();
    if !path.is_file() {
        return None;
    }
    let header = read_header(path).ok()?;
    media_type_of(&header)
}

/// Sniffs the media type of an in-memory header.
pub fn media_type_of(bytes: &[u8]) -> Option<&'static str> {
    // ICC first: a profile can carry arbitrary text in its tags, but only a
    // profile has the signature at a fixed offset.
    if bytes.len() >= ICC_MAGIC_OFFSET + ICC_MAGIC.len()
        && &bytes[ICC_MAGIC_OFFSET..ICC_MAGIC_OFFSET + ICC_MAGIC.len()] == ICC_MAGIC
    {
        return Some(ICC_MEDIA_TYPE);
    }

    let window = &bytes[..bytes.len().min(SNIFF_LEN)];
    if window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        return Some(PDF_MEDIA_TYPE);
    }

    None
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}
