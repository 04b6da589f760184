//! CLI command implementations

pub mod convert;
pub mod info;
pub mod profiles;
pub mod tool;

use crate::ToolArgs;
use crate::settings::Settings;
use cyan_job::{PinnedTool, ToolLocator, system_locator};
use std::path::PathBuf;
use tracing::debug;

/// Picks the Ghostscript to use.
///
/// An explicit `--gs` wins over the pinned executable in settings, which wins
/// over platform discovery. `--gs-version` pins the version of whichever
/// executable is chosen.
pub fn locator(args: &ToolArgs, settings: &Settings) -> Box<dyn ToolLocator> {
    let pinned: Option<PathBuf> = args.gs.clone().or_else(|| settings.ghostscript.clone());
    let exe = match (pinned, &args.gs_version) {
        (Some(exe), _) => exe,
        (None, Some(_)) => match system_locator().executable() {
            Some(exe) => exe,
            None => return system_locator(),
        },
        (None, None) => return system_locator(),
    };
    debug!(exe = %exe.display(), version = ?args.gs_version, "using pinned Ghostscript");
    let tool = PinnedTool::new(exe);
    match &args.gs_version {
        Some(version) => Box::new(tool.with_version(version.clone())),
        None => Box::new(tool),
    }
}
