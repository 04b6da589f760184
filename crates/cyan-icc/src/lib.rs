//! # cyan-icc
//!
//! ICC profile inspection for print preparation, built on Little CMS 2.
//!
//! # Features
//!
//! - Classify a profile file as RGB, CMYK, GRAY or unknown
//! - Read the human-readable description, with a path fallback
//! - Discover installed profiles in the platform's ICC directories
//! - Pick well-known defaults (Adobe RGB, ISO Coated v2, ...)
//!
//! # Example
//!
//! ```rust,no_run
//! use cyan_icc::{ColorSpace, ProfileCatalog, color_space_of, describe};
//!
//! let space = color_space_of("/usr/share/color/icc/ISOcoated_v2_eci.icc");
//! assert_eq!(space, ColorSpace::Cmyk);
//!
//! let catalog = ProfileCatalog::system().unwrap();
//! for entry in catalog.outputs() {
//!     println!("{} [{}]", entry.description, entry.color_space);
//! }
//! # let _ = describe("x.icc");
//! ```
//!
//! # Resource Handling
//!
//! Profiles are opened read-only and closed before every function returns,
//! on success and on failure alike.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
mod classify;
mod error;
mod profile;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use catalog::{CatalogEntry, ProfileCatalog, search_roots};
pub use classify::{color_space_of, describe};
pub use cyan_core::ColorSpace;
pub use error::{IccError, IccResult};
pub use profile::Profile;
