//! PDF to PDF/X conversion command.
//!
//! Profiles not given as flags come from the saved settings, then from the
//! preferred installed profiles. The output profile's color space decides
//! whether the document is converted to CMYK or gray.

use crate::ConvertArgs;
use crate::settings::Settings;
use anyhow::{Context, Result, bail};
use cyan_core::{ColorSpace, RenderIntent};
use cyan_icc::{ProfileCatalog, color_space_of};
use cyan_job::{
    CacheKey, ConversionJob, DefaultProfiles, JobBuilder, TemplateCache, default_cache_dir,
    run_conversion,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Profiles chosen for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub defaults: DefaultProfiles,
    pub output: PathBuf,
}

/// Runs the convert command.
pub fn run(args: ConvertArgs, settings: &mut Settings, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert");

    let selection = select_profiles(&args, settings, || {
        ProfileCatalog::system().context("Failed to scan installed profiles")
    })?;
    let target = color_space_of(&selection.output);
    if !target.is_print_target() {
        bail!(
            "Output profile {} is {target}, expected a CMYK or GRAY profile",
            selection.output.display()
        );
    }
    let intent = match args.intent {
        Some(intent) => intent,
        None => settings
            .intent
            .and_then(|code| RenderIntent::try_from(code).ok())
            .unwrap_or_default(),
    };
    let black_point = args.black_point.or(settings.black_point).unwrap_or(true);
    let cache_key = match args.cache_key {
        Some(key) => key,
        None => settings
            .cache_key
            .as_deref()
            .and_then(|name| name.parse::<CacheKey>().ok())
            .unwrap_or_default(),
    };
    let cache_dir = args.cache_dir.clone().unwrap_or_else(default_cache_dir);

    let job = ConversionJob::new(
        &args.input,
        &args.output,
        &selection.output,
        selection.defaults.clone(),
    )
    .with_target(target)
    .with_intent(intent)
    .with_black_point(black_point);
    debug!(?job, cache = %cache_dir.display(), key = cache_key.name(), "conversion job");

    let tool = super::locator(&args.tool, settings);
    let builder = JobBuilder::new(TemplateCache::new(cache_dir).with_key(cache_key), tool);
    let gs_args = builder
        .build_args(&job)
        .with_context(|| format!("Cannot convert {}", args.input.display()))?;

    if args.dry_run {
        for arg in &gs_args {
            println!("{}", arg.to_string_lossy());
        }
    } else {
        if verbose > 0 {
            println!(
                "Converting {} -> {} ({target}, {intent})",
                args.input.display(),
                args.output.display()
            );
        }
        let outcome = run_conversion(builder.tool(), &gs_args)
            .with_context(|| format!("Failed to convert {}", args.input.display()))?;
        if verbose > 1 {
            print!("{}", outcome.output);
        }
        info!(output = %args.output.display(), "done");
        println!("Done.");
    }

    remember(settings, &args, &selection, intent, black_point);
    Ok(())
}

/// Resolves every profile: flag, then settings, then installed defaults.
///
/// `scan` is only called when something is still missing.
pub fn select_profiles(
    args: &ConvertArgs,
    settings: &Settings,
    scan: impl FnOnce() -> Result<ProfileCatalog>,
) -> Result<Selection> {
    let rgb = args.rgb.clone().or_else(|| settings.rgb_profile.clone());
    let gray = args.gray.clone().or_else(|| settings.gray_profile.clone());
    let cmyk = args.cmyk.clone().or_else(|| settings.cmyk_profile.clone());
    let output = args.profile.clone().or_else(|| settings.output_profile.clone());

    let missing = rgb.is_none() || gray.is_none() || cmyk.is_none() || output.is_none();
    let catalog = if missing { Some(scan()?) } else { None };
    let installed = |space: ColorSpace| {
        catalog
            .as_ref()
            .and_then(|c| c.preferred(space))
            .map(|e| e.path.clone())
    };

    let defaults = DefaultProfiles {
        rgb: rgb
            .or_else(|| installed(ColorSpace::Rgb))
            .context("No RGB profile given and none installed (use --rgb)")?,
        gray: gray
            .or_else(|| installed(ColorSpace::Gray))
            .context("No gray profile given and none installed (use --gray)")?,
        cmyk: cmyk
            .or_else(|| installed(ColorSpace::Cmyk))
            .context("No CMYK profile given and none installed (use --cmyk)")?,
    };
    let output = output
        .or_else(|| {
            catalog
                .as_ref()
                .and_then(|c| c.preferred_output())
                .map(|e| e.path.clone())
        })
        .context("No output profile given and none installed (use --profile)")?;

    Ok(Selection { defaults, output })
}

fn remember(
    settings: &mut Settings,
    args: &ConvertArgs,
    selection: &Selection,
    intent: RenderIntent,
    black_point: bool,
) {
    settings.last_open_dir = parent_dir(&args.input);
    settings.last_save_dir = parent_dir(&args.output);
    settings.rgb_profile = Some(selection.defaults.rgb.clone());
    settings.gray_profile = Some(selection.defaults.gray.clone());
    settings.cmyk_profile = Some(selection.defaults.cmyk.clone());
    settings.output_profile = Some(selection.output.clone());
    settings.intent = Some(intent.code());
    settings.black_point = Some(black_point);
    if let Some(key) = args.cache_key {
        settings.cache_key = Some(key.name().to_string());
    }
    if let Some(gs) = &args.tool.gs {
        settings.ghostscript = Some(gs.clone());
    }
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    std::path::absolute(path)
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}
