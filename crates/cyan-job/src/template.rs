//! Patched PDF/X definition templates.
//!
//! Ghostscript's `PDFX_def.ps` declares the output intent profile in a single
//! `/ICCProfile (...) def` statement. Every conversion writes a copy with that
//! statement pointing at the requested output profile into a cache directory,
//! named after the source document's fingerprint.

use crate::{JobError, JobResult, ToolLocator};
use cyan_core::{CoreError, detect, fingerprint, fingerprint_bytes};
use regex::bytes::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info, trace, warn};

/// Subdirectory of the cache location owned by this application.
pub const CACHE_SUBDIR: &str = "cyanpdf";

static ICC_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/ICCProfile \([^)]*\) def").expect("static regex")
});

/// How cache entries are named.
///
/// [`CacheKey::Document`] keys on the source PDF alone: converting the same
/// document with another output profile rewrites the same entry.
/// [`CacheKey::DocumentAndProfile`] gives each (document, profile) pair its
/// own entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheKey {
    /// `sha256(pdf)`.
    #[default]
    Document,
    /// `sha256(sha256(pdf) || 0x00 || absolute profile path)`.
    DocumentAndProfile,
}

impl CacheKey {
    /// Stable name used in settings and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CacheKey::Document => "document",
            CacheKey::DocumentAndProfile => "document-profile",
        }
    }
}

impl FromStr for CacheKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "pdf" => Ok(CacheKey::Document),
            "document-profile" | "pdf-profile" => Ok(CacheKey::DocumentAndProfile),
            _ => Err(format!(
                "unknown cache key '{s}'. Options: document, document-profile"
            )),
        }
    }
}

/// Platform cache directory for patched templates.
///
/// `<user cache dir>/cyanpdf`, or `<temp dir>/cyanpdf` when the platform has
/// no cache location.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_SUBDIR)
}

/// Directory of patched templates.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
    key: CacheKey,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(default_cache_dir())
    }
}

impl TemplateCache {
    /// Cache rooted at `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            key: CacheKey::default(),
        }
    }

    /// Sets the entry naming scheme.
    pub fn with_key(mut self, key: CacheKey) -> Self {
        self.key = key;
        self
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entry naming scheme.
    pub fn key(&self) -> CacheKey {
        self.key
    }

    /// Path of the entry for `pdf` converted with `profile`.
    pub fn entry_path(&self, pdf: &Path, profile: &Path) -> JobResult<PathBuf> {
        let digest = fingerprint(pdf).map_err(|e| match e {
            CoreError::Io(io) => JobError::Io(io),
            _ => JobError::NotPdf(pdf.to_path_buf()),
        })?;
        let name = match self.key {
            CacheKey::Document => digest,
            CacheKey::DocumentAndProfile => {
                let profile = std::path::absolute(profile)?;
                let mut material = digest.into_bytes();
                material.push(0);
                material.extend_from_slice(profile.as_os_str().as_encoded_bytes());
                fingerprint_bytes(&material)
            }
        };
        Ok(self.dir.join(format!("{name}.ps")))
    }

    /// Writes the PDF/X template patched for `profile` and returns its path.
    ///
    /// The entry is rewritten on every call, so a repeated request with the
    /// same inputs yields identical bytes at the same path.
    pub fn patched_template(
        &self,
        tool: &dyn ToolLocator,
        pdf: &Path,
        profile: &Path,
    ) -> JobResult<PathBuf> {
        trace!(pdf = %pdf.display(), profile = %profile.display(), "patched_template");

        if !detect::is_pdf(pdf) {
            return Err(JobError::NotPdf(pdf.to_path_buf()));
        }
        if !detect::is_icc(profile) {
            return Err(JobError::NotIcc {
                role: crate::ProfileRole::Output,
                path: profile.to_path_buf(),
            });
        }
        let exe = tool.executable().ok_or(JobError::ToolNotFound)?;
        let version = tool
            .version()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| JobError::ToolVersionUnavailable(exe.clone()))?;

        let template = locate_template(tool, &version)?;
        let content = fs::read(&template)?;
        if content.is_empty() {
            return Err(JobError::TemplateEmpty(template));
        }
        debug!(template = %template.display(), version = %version, "using PDF/X template");

        let profile_abs = std::path::absolute(profile)?;
        let patched = patch_template(&content, &profile_abs)
            .ok_or_else(|| JobError::TemplateDeclarationMissing(template.clone()))?;

        fs::create_dir_all(&self.dir).map_err(|source| JobError::CacheIo {
            path: self.dir.clone(),
            source,
        })?;
        let entry = self.entry_path(pdf, profile)?;
        fs::write(&entry, &patched).map_err(|source| JobError::CacheIo {
            path: entry.clone(),
            source,
        })?;

        info!(entry = %entry.display(), profile = %profile_abs.display(), "wrote patched template");
        Ok(entry)
    }
}

fn locate_template(tool: &dyn ToolLocator, version: &str) -> JobResult<PathBuf> {
    let candidates = tool.template_candidates(version);
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(JobError::TemplateNotFound(
        candidates.into_iter().next().unwrap_or_default(),
    ))
}

/// Rewrites the `/ICCProfile (...) def` statement of a template.
///
/// Returns `None` if the template declares no profile. Everything outside the
/// statement is passed through byte for byte.
pub fn patch_template(content: &[u8], profile: &Path) -> Option<Vec<u8>> {
    let count = ICC_DECLARATION.find_iter(content).count();
    match count {
        0 => return None,
        1 => {}
        n => warn!(declarations = n, "template declares several profiles, patching all"),
    }

    let mut replacement = b"/ICCProfile (".to_vec();
    replacement.extend(escape_ps_string(profile.as_os_str().as_encoded_bytes()));
    replacement.extend_from_slice(b") def");

    Some(
        ICC_DECLARATION
            .replace_all(content, NoExpand(&replacement))
            .into_owned(),
    )
}

/// Escapes bytes for a PostScript literal string.
fn escape_ps_string(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        if matches!(b, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}
