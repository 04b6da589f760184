//! Golden digests for cache entry names.
//!
//! Entry names are visible on disk and stay stable across releases.

use cyan_core::{fingerprint, fingerprint_bytes};
use cyan_job::{CacheKey, TemplateCache};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const DOCUMENT: &[u8] = b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";
const DOCUMENT_SHA256: &str = "ee2d14b09b1f174f566d039e4d1c5d6e250feb812d9aa4ca2e595550a2548461";
const DOCUMENT_PROFILE_SHA256: &str =
    "976848441270bb6f2c295e656cbacd5252263697ec2464cd877064f7b32e942e";

#[test]
fn document_fingerprint() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    fs::write(&pdf, DOCUMENT).unwrap();

    assert_eq!(fingerprint(&pdf).unwrap(), DOCUMENT_SHA256);
    assert_eq!(fingerprint_bytes(DOCUMENT), DOCUMENT_SHA256);
}

#[test]
fn entry_names() {
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    fs::write(&pdf, DOCUMENT).unwrap();
    let profile = Path::new("/icc/press.icc");

    let cache = TemplateCache::new(dir.path());
    assert_eq!(
        cache.entry_path(&pdf, profile).unwrap(),
        dir.path().join(format!("{DOCUMENT_SHA256}.ps"))
    );

    #[cfg(unix)]
    {
        let cache = cache.with_key(CacheKey::DocumentAndProfile);
        assert_eq!(
            cache.entry_path(&pdf, profile).unwrap(),
            dir.path().join(format!("{DOCUMENT_PROFILE_SHA256}.ps"))
        );
    }
}
