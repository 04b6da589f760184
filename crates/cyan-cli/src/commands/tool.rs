//! Ghostscript status command.

use crate::ToolArgs;
use crate::settings::Settings;
use anyhow::{Result, bail};
use std::path::Path;

/// Runs the tool command.
///
/// With `-v` the settings file location is printed first.
pub fn run(args: ToolArgs, settings: &Settings, settings_path: &Path, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Settings:    {}", settings_path.display());
    }
    let tool = super::locator(&args, settings);

    let Some(exe) = tool.executable() else {
        println!("Executable:  not found");
        bail!("Ghostscript not found, install it or pass --gs");
    };
    println!("Executable:  {}", exe.display());
    if let Some(dir) = tool.install_dir() {
        println!("Install dir: {}", dir.display());
    }

    let Some(version) = tool.version() else {
        println!("Version:     unavailable");
        bail!("Unable to read the Ghostscript version, pass --gs-version");
    };
    println!("Version:     {version}");

    let candidates = tool.template_candidates(&version);
    match candidates.iter().find(|p| p.is_file()) {
        Some(template) => println!("Template:    {}", template.display()),
        None => {
            println!("Template:    missing");
            if verbose > 0 {
                for candidate in &candidates {
                    println!("  looked at  {}", candidate.display());
                }
            }
            bail!("PDF/X template not found for Ghostscript {version}");
        }
    }
    Ok(())
}
