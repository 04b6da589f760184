//! Content fingerprints.
//!
//! A fingerprint is the lowercase hex SHA-256 of a file's bytes. It names
//! cache entries, so byte-identical documents always share one.

use crate::{CoreError, CoreResult, detect};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

/// Computes the fingerprint of a PDF document.
///
/// Fails with [`CoreError::NotPdf`] if the file does not sniff as a PDF.
pub fn fingerprint<P: AsRef<Path>>(path: P) -> CoreResult<String> {
    let path = path.as_ref();
    if !detect::is_pdf(path) {
        return Err(CoreError::NotPdf(path.to_path_buf()));
    }

    let hex = fingerprint_reader(File::open(path)?)?;
    trace!(path = %path.display(), fingerprint = %hex, "fingerprint");
    Ok(hex)
}

/// SHA-256 of everything `reader` yields, hex encoded.
pub fn fingerprint_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of an in-memory buffer, hex encoded.
pub fn fingerprint_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
