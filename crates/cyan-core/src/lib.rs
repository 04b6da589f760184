//! # cyan-core
//!
//! Core types shared by every Cyan PDF crate.
//!
//! - [`ColorSpace`] - color space of an ICC profile (RGB / CMYK / GRAY / unknown)
//! - [`RenderIntent`] - gamut mapping intent, encoded the way Ghostscript expects it
//! - [`detect`] - content sniffing: "is this a PDF?", "is this an ICC profile?"
//! - [`fingerprint`] - SHA-256 content fingerprints used as cache keys
//!
//! ## Crate Structure
//!
//! ```text
//! cyan-core (this crate)
//!    ^
//!    |
//!    +-- cyan-icc (profile classification, catalog)
//!    +-- cyan-job (template cache, job builder, process runner)
//!    +-- cyan-cli (cyanpdf binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod detect;
pub mod error;
pub mod fingerprint;

pub use colorspace::{ColorSpace, RenderIntent};
pub use detect::{FileKind, ICC_MEDIA_TYPE, PDF_MEDIA_TYPE, classify, is_icc, is_pdf, media_type};
pub use error::{CoreError, CoreResult};
pub use fingerprint::{fingerprint, fingerprint_bytes, fingerprint_reader};
