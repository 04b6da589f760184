//! File inspection command.
//!
//! Reports what the content sniffers, the profile classifier and the
//! fingerprinter make of each file.

use crate::InfoArgs;
use anyhow::{Context, Result};
use cyan_core::{ICC_MEDIA_TYPE, PDF_MEDIA_TYPE, detect, fingerprint};
use cyan_icc::{Profile, color_space_of, describe};
use std::path::Path;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_info(path, verbose)?;
    }
    Ok(())
}

fn print_info(path: &Path, verbose: u8) -> Result<()> {
    println!("{}", path.display());
    match detect::media_type(path) {
        Some(PDF_MEDIA_TYPE) => {
            println!("  Type:        {PDF_MEDIA_TYPE}");
            let digest = fingerprint(path)
                .with_context(|| format!("Failed to fingerprint {}", path.display()))?;
            println!("  Fingerprint: {digest}");
        }
        Some(ICC_MEDIA_TYPE) => {
            println!("  Type:        {ICC_MEDIA_TYPE}");
            println!("  Color space: {}", color_space_of(path));
            println!("  Description: {}", describe(path));
            if verbose > 0 {
                if let Ok(profile) = Profile::from_file(path) {
                    println!("  Manufacturer: {}", profile.manufacturer());
                    println!("  Copyright:   {}", profile.copyright());
                }
            }
        }
        Some(other) => println!("  Type:        {other}"),
        None if path.is_file() => println!("  Type:        unknown"),
        None => println!("  Not a file"),
    }
    Ok(())
}
