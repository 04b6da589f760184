//! Color space and rendering intent vocabulary.
//!
//! [`ColorSpace`] is what an ICC profile's header declares as its data color
//! space, reduced to the three signatures that matter for print preparation.
//! [`RenderIntent`] carries the small integer code Ghostscript expects in
//! `-dRenderIntent`.

use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Data color space of an ICC profile.
///
/// Derived solely from the profile's embedded signature, never from the file
/// name. Everything other than RGB, CMYK and GRAY (Lab, XYZ, multi-ink, ...)
/// is [`ColorSpace::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Three-channel RGB data (`'RGB '`).
    Rgb,
    /// Four-channel CMYK data (`'CMYK'`).
    Cmyk,
    /// Single-channel gray data (`'GRAY'`).
    Gray,
    /// Any other signature, or no profile at all.
    #[default]
    Unknown,
}

impl ColorSpace {
    /// All classifiable spaces, in display order.
    pub const KNOWN: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::Cmyk, ColorSpace::Gray];

    /// Returns the upper-case name Ghostscript uses for this space.
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::Gray => "GRAY",
            ColorSpace::Unknown => "N/A",
        }
    }

    /// Returns true for the spaces a PDF can be converted into (CMYK, GRAY).
    pub fn is_print_target(self) -> bool {
        matches!(self, ColorSpace::Cmyk | ColorSpace::Gray)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "cmyk" => Ok(ColorSpace::Cmyk),
            "gray" | "grey" => Ok(ColorSpace::Gray),
            _ => Err(CoreError::Parse(format!(
                "unknown color space '{s}'. Options: rgb, cmyk, gray"
            ))),
        }
    }
}

/// Rendering intent for the conversion.
///
/// Determines how out-of-gamut colors are mapped into the destination.
/// The discriminant is the code passed to `-dRenderIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RenderIntent {
    /// Compresses the whole source gamut into the destination.
    Perceptual = 0,

    /// Clips out-of-gamut colors, maps media white to media white.
    #[default]
    RelativeColorimetric = 1,

    /// Preserves saturation at the expense of hue accuracy.
    Saturation = 2,

    /// Clips out-of-gamut colors without white point adaptation.
    AbsoluteColorimetric = 3,
}

impl RenderIntent {
    /// All intents, ordered by code.
    pub const ALL: [RenderIntent; 4] = [
        RenderIntent::Perceptual,
        RenderIntent::RelativeColorimetric,
        RenderIntent::Saturation,
        RenderIntent::AbsoluteColorimetric,
    ];

    /// Numeric code understood by Ghostscript (0-3).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RenderIntent::Perceptual => "Perceptual",
            RenderIntent::RelativeColorimetric => "Relative Colorimetric",
            RenderIntent::Saturation => "Saturation",
            RenderIntent::AbsoluteColorimetric => "Absolute Colorimetric",
        }
    }
}

impl TryFrom<u8> for RenderIntent {
    type Error = CoreError;

    fn try_from(code: u8) -> CoreResult<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| CoreError::Parse(format!("render intent code {code} out of range 0-3")))
    }
}

impl fmt::Display for RenderIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RenderIntent {
    type Err = CoreError;

    /// Accepts the numeric code or a name such as `relative-colorimetric`.
    fn from_str(s: &str) -> CoreResult<Self> {
        if let Ok(code) = s.parse::<u8>() {
            return Self::try_from(code);
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "perceptual" => Ok(RenderIntent::Perceptual),
            "relative-colorimetric" | "relative" | "colorimetric" => {
                Ok(RenderIntent::RelativeColorimetric)
            }
            "saturation" => Ok(RenderIntent::Saturation),
            "absolute-colorimetric" | "absolute" => Ok(RenderIntent::AbsoluteColorimetric),
            _ => Err(CoreError::Parse(format!(
                "unknown render intent '{s}'. Options: 0-3, perceptual, relative-colorimetric, saturation, absolute-colorimetric"
            ))),
        }
    }
}
