//! Installed profile discovery.
//!
//! Walks the platform's ICC directories, classifies every profile found and
//! picks sensible defaults per color space.

use crate::{IccError, IccResult, classify};
use cyan_core::ColorSpace;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Preferred default profiles by description, most preferred first.
const PREFERRED_RGB: &[&str] = &["Adobe RGB (1998)", "sRGB", "Artifex PS RGB Profile"];
const PREFERRED_CMYK: &[&str] = &[
    "ISO Coated v2 (ECI)",
    "U.S. Web Coated (SWOP) v2",
    "Artifex PS CMYK Profile",
];
const PREFERRED_GRAY: &[&str] = &["Gray", "Artifex PS Gray Profile"];

/// File name patterns scanned under every root.
const PATTERNS: &[&str] = &["**/*.icc", "**/*.icm"];

/// A classified profile on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Profile path.
    pub path: PathBuf,
    /// Description, or the path when the profile has none.
    pub description: String,
    /// Classified data color space.
    pub color_space: ColorSpace,
}

/// Profiles found under a set of search roots.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    entries: Vec<CatalogEntry>,
}

impl ProfileCatalog {
    /// Scans the platform's standard profile directories.
    pub fn system() -> IccResult<Self> {
        Self::scan(&search_roots())
    }

    /// Scans `roots` recursively for `.icc` / `.icm` files.
    ///
    /// Missing roots are skipped. Files that are not ICC profiles, or whose
    /// color space is unknown, are left out.
    pub fn scan<P: AsRef<Path>>(roots: &[P]) -> IccResult<Self> {
        let mut files = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if !root.is_dir() {
                trace!(root = %root.display(), "skipping missing profile root");
                continue;
            }
            collect_files(root, &mut files)?;
        }
        files.sort();
        files.dedup();
        debug!(files = files.len(), "classifying profile candidates");

        let entries: Vec<CatalogEntry> = files
            .par_iter()
            .filter_map(|path| {
                let color_space = classify::color_space_of(path);
                if color_space == ColorSpace::Unknown {
                    trace!(path = %path.display(), "unusable profile");
                    return None;
                }
                Some(CatalogEntry {
                    path: path.clone(),
                    description: classify::describe(path),
                    color_space,
                })
            })
            .collect();

        Ok(Self { entries })
    }

    /// Builds a catalog from already classified entries.
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self { entries }
    }

    /// All entries, sorted by path.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries of one color space.
    pub fn of_space(&self, space: ColorSpace) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.color_space == space)
    }

    /// Entries usable as conversion output (CMYK, then GRAY).
    pub fn outputs(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.of_space(ColorSpace::Cmyk)
            .chain(self.of_space(ColorSpace::Gray))
    }

    /// Picks the default profile for `space`.
    ///
    /// The first well-known description wins; otherwise the first entry of
    /// that space.
    pub fn preferred(&self, space: ColorSpace) -> Option<&CatalogEntry> {
        let names: &[&str] = match space {
            ColorSpace::Rgb => PREFERRED_RGB,
            ColorSpace::Cmyk => PREFERRED_CMYK,
            ColorSpace::Gray => PREFERRED_GRAY,
            ColorSpace::Unknown => return None,
        };
        names
            .iter()
            .find_map(|name| self.of_space(space).find(|e| e.description == *name))
            .or_else(|| self.of_space(space).next())
    }

    /// Default output profile: the preferred CMYK profile, else gray.
    pub fn preferred_output(&self) -> Option<&CatalogEntry> {
        self.preferred(ColorSpace::Cmyk)
            .or_else(|| self.preferred(ColorSpace::Gray))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no profile was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collect_files(root: &Path, out: &mut Vec<PathBuf>) -> IccResult<()> {
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    let base = glob::Pattern::escape(&root.to_string_lossy());
    for pattern in PATTERNS {
        let pattern = format!("{base}/{pattern}");
        let paths = glob::glob_with(&pattern, options)
            .map_err(|e| IccError::Scan(format!("{pattern}: {e}")))?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => out.push(path),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "unreadable profile entry"),
            }
        }
    }
    Ok(())
}

/// Standard ICC profile directories for the current platform.
///
/// Always includes `~/.color/icc`.
pub fn search_roots() -> Vec<PathBuf> {
    let mut roots = platform_roots();
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".color").join("icc"));
    }
    roots
}

#[cfg(windows)]
fn platform_roots() -> Vec<PathBuf> {
    let system_root = std::env::var_os("SystemRoot")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("C:\\WINDOWS"));
    vec![system_root.join("System32").join("spool").join("drivers").join("color")]
}

#[cfg(target_os = "macos")]
fn platform_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/Library/ColorSync/Profiles")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Library").join("ColorSync").join("Profiles"));
    }
    roots
}

#[cfg(not(any(windows, target_os = "macos")))]
fn platform_roots() -> Vec<PathBuf> {
    let mut data_dirs: Vec<PathBuf> = dirs::data_dir().into_iter().collect();
    let system = std::env::var_os("XDG_DATA_DIRS")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".into());
    data_dirs.extend(std::env::split_paths(&system));
    data_dirs.dedup();
    data_dirs
        .into_iter()
        .map(|d| d.join("color").join("icc"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::fs;
    use tempfile::tempdir;

    fn entry(path: &str, description: &str, color_space: ColorSpace) -> CatalogEntry {
        CatalogEntry {
            path: PathBuf::from(path),
            description: description.to_string(),
            color_space,
        }
    }

    #[test]
    fn scan_classifies_and_filters() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("vendor").join("eci");
        fs::create_dir_all(&nested).unwrap();

        fixtures::write_srgb(&dir.path().join("sRGB.icc")).unwrap();
        fixtures::write_gray(&dir.path().join("gray.ICM")).unwrap();
        fixtures::write_cmyk(&nested.join("coated.icc")).unwrap();
        fixtures::write_header_only(&dir.path().join("lab.icc"), b"Lab ").unwrap();
        fs::write(dir.path().join("readme.icc"), b"not a profile").unwrap();
        fixtures::write_cmyk(&dir.path().join("ignored.txt")).unwrap();

        let catalog = ProfileCatalog::scan(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.of_space(ColorSpace::Rgb).count(), 1);
        assert_eq!(catalog.of_space(ColorSpace::Gray).count(), 1);
        let cmyk: Vec<_> = catalog.of_space(ColorSpace::Cmyk).collect();
        assert_eq!(cmyk.len(), 1);
        assert!(cmyk[0].path.ends_with("vendor/eci/coated.icc"));
        assert_eq!(catalog.outputs().count(), 2);
    }

    #[test]
    fn scan_skips_missing_roots() {
        let dir = tempdir().unwrap();
        let catalog = ProfileCatalog::scan(&[dir.path().join("nowhere")]).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn preferred_by_description() {
        let catalog = ProfileCatalog::from_entries(vec![
            entry("/p/a.icc", "Some Monitor", ColorSpace::Rgb),
            entry("/p/b.icc", "sRGB", ColorSpace::Rgb),
            entry("/p/c.icc", "Adobe RGB (1998)", ColorSpace::Rgb),
            entry("/p/d.icc", "Artifex PS CMYK Profile", ColorSpace::Cmyk),
            entry("/p/e.icc", "ISO Coated v2 (ECI)", ColorSpace::Cmyk),
            entry("/p/f.icc", "Dot Gain 20%", ColorSpace::Gray),
        ]);

        assert_eq!(catalog.preferred(ColorSpace::Rgb).unwrap().description, "Adobe RGB (1998)");
        assert_eq!(
            catalog.preferred(ColorSpace::Cmyk).unwrap().description,
            "ISO Coated v2 (ECI)"
        );
        // No well-known gray profile: first gray entry.
        assert_eq!(catalog.preferred(ColorSpace::Gray).unwrap().description, "Dot Gain 20%");
        assert_eq!(
            catalog.preferred_output().unwrap().description,
            "ISO Coated v2 (ECI)"
        );
        assert!(catalog.preferred(ColorSpace::Unknown).is_none());
    }

    #[test]
    fn preferred_output_falls_back_to_gray() {
        let catalog = ProfileCatalog::from_entries(vec![entry(
            "/p/g.icc",
            "Gray",
            ColorSpace::Gray,
        )]);
        assert_eq!(catalog.preferred_output().unwrap().color_space, ColorSpace::Gray);
    }

    #[test]
    fn roots_include_home_color_dir() {
        if let Some(home) = dirs::home_dir() {
            assert!(search_roots().contains(&home.join(".color").join("icc")));
        }
    }
}
