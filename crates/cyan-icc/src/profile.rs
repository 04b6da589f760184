//! ICC profile wrapper.

use crate::{IccError, IccResult};
use cyan_core::ColorSpace;
use lcms2::{ColorSpaceSignature, InfoType, Locale, Profile as LcmsProfile};
use std::path::Path;

/// Locale used for profile descriptions.
const DESCRIPTION_LOCALE: &str = "en_US";

/// An open ICC color profile.
///
/// Wraps an lcms2 handle. The handle is closed when the value is dropped, so
/// a profile opened for inspection never outlives the call that opened it.
///
/// # Example
///
/// ```rust,no_run
/// use cyan_icc::Profile;
/// use std::path::Path;
///
/// let profile = Profile::from_file(Path::new("ISOcoated_v2_eci.icc")).unwrap();
/// println!("{} ({})", profile.description(), profile.color_space());
/// ```
pub struct Profile {
    /// Internal lcms2 profile handle.
    pub(crate) inner: LcmsProfile,
}

impl Profile {
    /// Loads a profile from an ICC file, read-only.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid data.
    pub fn from_file(path: &Path) -> IccResult<Self> {
        let inner = LcmsProfile::new_file(path)
            .map_err(|e| IccError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self { inner })
    }

    /// Creates a profile from raw ICC data.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner = LcmsProfile::new_icc(data)
            .map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates the built-in sRGB profile.
    pub fn srgb() -> Self {
        Self {
            inner: LcmsProfile::new_srgb(),
        }
    }

    /// Creates a D50 grayscale profile with the specified gamma.
    pub fn gray(gamma: f64) -> IccResult<Self> {
        let curve = lcms2::ToneCurve::new(gamma);
        let inner = LcmsProfile::new_gray(&lcms2::CIExyY::d50(), &curve)
            .map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Returns the data color space declared in the profile header.
    pub fn color_space(&self) -> ColorSpace {
        match self.inner.color_space() {
            ColorSpaceSignature::RgbData => ColorSpace::Rgb,
            ColorSpaceSignature::CmykData => ColorSpace::Cmyk,
            ColorSpaceSignature::GrayData => ColorSpace::Gray,
            _ => ColorSpace::Unknown,
        }
    }

    /// Returns the profile description.
    ///
    /// Prefers the `en_US` entry and falls back to the locale-neutral one.
    /// Empty when the profile carries no description at all.
    pub fn description(&self) -> String {
        self.info(InfoType::Description)
    }

    /// Returns the profile manufacturer.
    pub fn manufacturer(&self) -> String {
        self.info(InfoType::Manufacturer)
    }

    /// Returns the profile copyright.
    pub fn copyright(&self) -> String {
        self.info(InfoType::Copyright)
    }

    /// Exports the profile as ICC data.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner
            .icc()
            .map_err(|e| IccError::WriteFailed(e.to_string()))
    }

    fn info(&self, kind: InfoType) -> String {
        self.inner
            .info(kind, Locale::new(DESCRIPTION_LOCALE))
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.inner.info(kind, Locale::none()))
            .map(|s| s.trim_end_matches('\0').trim().to_string())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .finish()
    }
}
