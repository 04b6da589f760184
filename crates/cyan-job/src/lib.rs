//! # cyan-job
//!
//! Turns a PDF plus a set of ICC profiles into a validated Ghostscript
//! `pdfwrite` command line producing PDF/X, and runs it.
//!
//! # Pipeline
//!
//! ```text
//! ConversionJob ──► TemplateCache ──► validation ──► Vec<OsString> ──► run_conversion
//!                  (PDFX_def.ps      (is_icc, is_pdf,                   (Ghostscript)
//!                   patched per       color space
//!                   output profile)   cross-check)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cyan_job::{ConversionJob, DefaultProfiles, JobBuilder, TemplateCache, UnixGhostscript, run_conversion};
//!
//! let defaults = DefaultProfiles {
//!     rgb: "/icc/AdobeRGB1998.icc".into(),
//!     gray: "/icc/Gray.icc".into(),
//!     cmyk: "/icc/ISOcoated_v2_eci.icc".into(),
//! };
//! let job = ConversionJob::new("in.pdf", "out.pdf", "/icc/ISOcoated_v2_eci.icc", defaults);
//!
//! let builder = JobBuilder::new(TemplateCache::default(), UnixGhostscript);
//! let args = builder.build_args(&job)?;
//! run_conversion(builder.tool(), &args)?;
//! # Ok::<(), cyan_job::JobError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod job;
pub mod run;
pub mod template;
pub mod tool;

pub use error::{JobError, JobResult, ProfileRole};
pub use job::{ConversionJob, DefaultProfiles, JobBuilder};
pub use run::{ConversionOutcome, run_conversion};
pub use template::{CacheKey, TemplateCache, default_cache_dir, patch_template};
pub use tool::{
    PinnedTool, TEMPLATE_NAME, ToolLocator, UnixGhostscript, WindowsGhostscript, query_version,
    system_locator,
};

pub use cyan_core::{ColorSpace, RenderIntent};
