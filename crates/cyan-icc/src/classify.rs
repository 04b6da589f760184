//! Path-level profile classification.
//!
//! These functions never fail: a path that is not an ICC profile is
//! [`ColorSpace::Unknown`] and has an empty description.

use crate::Profile;
use cyan_core::{ColorSpace, detect};
use std::path::Path;
use tracing::{debug, trace};

/// Returns the color space of the profile at `path`.
///
/// Files that do not sniff as ICC are not opened. A profile lcms2 refuses
/// to open is [`ColorSpace::Unknown`].
pub fn color_space_of<P: AsRef<Path>>(path: P) -> ColorSpace {
    let path = path.as_ref();
    if !detect::is_icc(path) {
        trace!(path = %path.display(), "not an ICC profile");
        return ColorSpace::Unknown;
    }

    match Profile::from_file(path) {
        Ok(profile) => profile.color_space(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "profile open failed");
            ColorSpace::Unknown
        }
    }
}

/// Returns a human-readable name for the profile at `path`.
///
/// Empty if the file is not an ICC profile. A profile without a usable
/// description is named by its path.
pub fn describe<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if !detect::is_icc(path) {
        return String::new();
    }

    let description = Profile::from_file(path)
        .map(|p| p.description())
        .unwrap_or_default();
    if description.is_empty() {
        path.display().to_string()
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_print_relevant_signatures() {
        let dir = tempdir().unwrap();
        let rgb = fixtures::write_srgb(&dir.path().join("srgb.icc")).unwrap();
        let gray = fixtures::write_gray(&dir.path().join("gray.icc")).unwrap();
        let cmyk = fixtures::write_cmyk(&dir.path().join("cmyk.icc")).unwrap();

        assert_eq!(color_space_of(&rgb), ColorSpace::Rgb);
        assert_eq!(color_space_of(&gray), ColorSpace::Gray);
        assert_eq!(color_space_of(&cmyk), ColorSpace::Cmyk);
    }

    #[test]
    fn other_signatures_are_unknown() {
        let dir = tempdir().unwrap();
        let lab = fixtures::write_header_only(&dir.path().join("lab.icc"), b"Lab ").unwrap();
        let xyz = fixtures::write_header_only(&dir.path().join("xyz.icc"), b"XYZ ").unwrap();
        let ink = fixtures::write_header_only(&dir.path().join("6clr.icc"), b"6CLR").unwrap();

        assert_eq!(color_space_of(&lab), ColorSpace::Unknown);
        assert_eq!(color_space_of(&xyz), ColorSpace::Unknown);
        assert_eq!(color_space_of(&ink), ColorSpace::Unknown);
    }

    #[test]
    fn non_icc_input_is_unknown() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("srgb.icc");
        fs::write(&text, b"not a profile at all").unwrap();

        assert_eq!(color_space_of(&text), ColorSpace::Unknown);
        assert_eq!(color_space_of(dir.path().join("missing.icc")), ColorSpace::Unknown);
        assert_eq!(describe(&text), "");
    }

    #[test]
    fn corrupt_profile_is_unknown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.icc");
        // Sniffs as ICC, but the tag count is missing.
        let mut bytes = fixtures::header_bytes(b"CMYK");
        bytes.truncate(100);
        fs::write(&path, &bytes).unwrap();

        assert!(detect::is_icc(&path));
        assert_eq!(color_space_of(&path), ColorSpace::Unknown);
        assert_eq!(describe(&path), path.display().to_string());
    }

    #[test]
    fn description_from_profile() {
        let dir = tempdir().unwrap();
        let rgb = fixtures::write_srgb(&dir.path().join("srgb.icc")).unwrap();
        let name = describe(&rgb);
        assert!(!name.is_empty());
        assert_ne!(name, rgb.display().to_string());
    }

    #[test]
    fn description_falls_back_to_path() {
        let dir = tempdir().unwrap();
        let cmyk = fixtures::write_cmyk(&dir.path().join("press.icc")).unwrap();
        assert_eq!(describe(&cmyk), cmyk.display().to_string());
    }
}
