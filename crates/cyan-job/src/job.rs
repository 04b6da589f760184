//! Conversion jobs and their Ghostscript argument vectors.

use crate::{JobError, JobResult, ProfileRole, TemplateCache, ToolLocator};
use cyan_core::{ColorSpace, RenderIntent, detect};
use cyan_icc::color_space_of;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Fallback profiles for untagged content in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultProfiles {
    /// Profile assumed for untagged RGB content.
    pub rgb: PathBuf,
    /// Profile assumed for untagged gray content.
    pub gray: PathBuf,
    /// Profile assumed for untagged CMYK content.
    pub cmyk: PathBuf,
}

/// A single PDF to PDF/X conversion request.
///
/// Built fresh per request. [`JobBuilder::build_args`] only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Source PDF.
    pub input: PathBuf,
    /// Destination PDF.
    pub output: PathBuf,
    /// Output intent profile (CMYK or GRAY).
    pub output_profile: PathBuf,
    /// Profiles for untagged source content.
    pub defaults: DefaultProfiles,
    /// Color space of the converted document. Anything but CMYK converts
    /// to gray.
    pub target: ColorSpace,
    /// Gamut mapping intent.
    pub intent: RenderIntent,
    /// Map source black to destination black.
    pub black_point: bool,
}

impl ConversionJob {
    /// Creates a CMYK job with relative colorimetric intent and black point
    /// preservation.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        output_profile: impl Into<PathBuf>,
        defaults: DefaultProfiles,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            output_profile: output_profile.into(),
            defaults,
            target: ColorSpace::Cmyk,
            intent: RenderIntent::default(),
            black_point: true,
        }
    }

    /// Sets the target color space.
    pub fn with_target(mut self, target: ColorSpace) -> Self {
        self.target = target;
        self
    }

    /// Sets the rendering intent.
    pub fn with_intent(mut self, intent: RenderIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Enables or disables black point preservation.
    pub fn with_black_point(mut self, black_point: bool) -> Self {
        self.black_point = black_point;
        self
    }

    fn profiles(&self) -> [(ProfileRole, &Path); 4] {
        [
            (ProfileRole::Rgb, self.defaults.rgb.as_path()),
            (ProfileRole::Gray, self.defaults.gray.as_path()),
            (ProfileRole::Cmyk, self.defaults.cmyk.as_path()),
            (ProfileRole::Output, self.output_profile.as_path()),
        ]
    }
}

/// Validates jobs and turns them into Ghostscript command lines.
pub struct JobBuilder {
    cache: TemplateCache,
    tool: Box<dyn ToolLocator>,
}

impl JobBuilder {
    /// Creates a builder writing templates to `cache` for the Ghostscript
    /// found by `tool`.
    pub fn new(cache: TemplateCache, tool: impl ToolLocator + 'static) -> Self {
        Self {
            cache,
            tool: Box::new(tool),
        }
    }

    /// Template cache in use.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Ghostscript locator in use.
    pub fn tool(&self) -> &dyn ToolLocator {
        self.tool.as_ref()
    }

    /// Validates `job` and returns the full argument vector.
    ///
    /// Checks run in a fixed order and the first failure is returned; no
    /// partial vector is ever produced. The patched template is written
    /// first, so a cache entry may exist even when a later check fails.
    pub fn build_args(&self, job: &ConversionJob) -> JobResult<Vec<OsString>> {
        trace!(input = %job.input.display(), output = %job.output.display(), "build_args");

        let template = self
            .cache
            .patched_template(self.tool(), &job.input, &job.output_profile)?;

        for (role, path) in job.profiles() {
            if !detect::is_icc(path) {
                return Err(JobError::NotIcc {
                    role,
                    path: path.to_path_buf(),
                });
            }
        }
        if !detect::is_pdf(&job.input) {
            return Err(JobError::NotPdf(job.input.clone()));
        }

        for (role, path) in job.profiles() {
            let expected = match role {
                ProfileRole::Rgb => ColorSpace::Rgb,
                ProfileRole::Gray => ColorSpace::Gray,
                ProfileRole::Cmyk => ColorSpace::Cmyk,
                ProfileRole::Output => job.target,
            };
            let actual = color_space_of(path);
            if actual != expected {
                return Err(JobError::ColorSpaceMismatch {
                    role,
                    expected,
                    actual,
                });
            }
        }
        let cs = match job.target {
            ColorSpace::Cmyk => "CMYK",
            _ => "GRAY",
        };
        debug!(space = cs, intent = job.intent.code(), black_point = job.black_point, "job validated");

        let mut args: Vec<OsString> = [
            "-dPDFX",
            "-dBATCH",
            "-dNOPAUSE",
            "-dNOSAFER",
            "-sDEVICE=pdfwrite",
            "-dOverrideICC=true",
            "-dEncodeColorImages=true",
            "-dEmbedAllFonts=true",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(format!("-sProcessColorModel=Device{cs}").into());
        args.push(format!("-sColorConversionStrategy={cs}").into());
        args.push(format!("-sColorConversionStrategyForImages={cs}").into());
        args.push(format!("-dRenderIntent={}", job.intent.code()).into());
        args.push(format!("-dPreserveBlack={}", job.black_point).into());
        args.push(param("-sDefaultRGBProfile=", &job.defaults.rgb));
        args.push(param("-sDefaultGrayProfile=", &job.defaults.gray));
        args.push(param("-sDefaultCMYKProfile=", &job.defaults.cmyk));
        args.push(param("-sOutputICCProfile=", &job.output_profile));
        args.push(param("-sOutputFile=", &job.output));
        args.push(template.into_os_string());
        args.push(job.input.clone().into_os_string());

        Ok(args)
    }
}

fn param(name: &str, value: impl AsRef<OsStr>) -> OsString {
    let mut arg = OsString::from(name);
    arg.push(value);
    arg
}
