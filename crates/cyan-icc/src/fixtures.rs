//! Profile writers for tests.
//!
//! RGB and gray profiles come from lcms2's built-ins. lcms2 cannot synthesize
//! a CMYK output profile without measurement data, so CMYK (and any other
//! signature) is written as a bare 132-byte header with an empty tag table.
//! lcms2 opens those fine and reports the header's color space.

use crate::{IccResult, Profile};
use std::fs;
use std::path::{Path, PathBuf};

/// Size of the ICC header plus an empty tag count.
const HEADER_ONLY_LEN: u32 = 132;

/// Writes the built-in sRGB profile to `path`.
pub fn write_srgb(path: &Path) -> IccResult<PathBuf> {
    write_profile(path, &Profile::srgb())
}

/// Writes a gamma 2.2 gray profile to `path`.
pub fn write_gray(path: &Path) -> IccResult<PathBuf> {
    write_profile(path, &Profile::gray(2.2)?)
}

/// Writes a header-only CMYK output profile to `path`.
pub fn write_cmyk(path: &Path) -> IccResult<PathBuf> {
    write_header_only(path, b"CMYK")
}

/// Writes a header-only profile declaring `space` as data color space.
pub fn write_header_only(path: &Path, space: &[u8; 4]) -> IccResult<PathBuf> {
    fs::write(path, header_bytes(space))?;
    Ok(path.to_path_buf())
}

/// Builds a v4.2 output-class profile header followed by a zero tag count.
pub fn header_bytes(space: &[u8; 4]) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_ONLY_LEN as usize];
    bytes[0..4].copy_from_slice(&HEADER_ONLY_LEN.to_be_bytes());
    bytes[8..12].copy_from_slice(&[0x04, 0x20, 0x00, 0x00]);
    bytes[12..16].copy_from_slice(b"prtr");
    bytes[16..20].copy_from_slice(space);
    bytes[20..24].copy_from_slice(b"Lab ");
    bytes[36..40].copy_from_slice(b"acsp");
    // D50 illuminant, s15Fixed16
    bytes[68..72].copy_from_slice(&0x0000_F6D6u32.to_be_bytes());
    bytes[72..76].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    bytes[76..80].copy_from_slice(&0x0000_D32Du32.to_be_bytes());
    bytes
}

fn write_profile(path: &Path, profile: &Profile) -> IccResult<PathBuf> {
    fs::write(path, profile.to_icc()?)?;
    Ok(path.to_path_buf())
}
