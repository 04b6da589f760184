//! cyanpdf - convert RGB PDF documents to CMYK or grayscale PDF/X
//!
//! Drives Ghostscript's pdfwrite device with a patched PDF/X template and a
//! set of ICC profiles.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cyan_core::RenderIntent;
use cyan_job::CacheKey;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

use settings::{RonSettingsStore, SettingsStore};

#[derive(Parser)]
#[command(name = "cyanpdf")]
#[command(author, version, about = "Convert PDF documents to CMYK or grayscale PDF/X")]
#[command(long_about = "
Converts PDF documents to CMYK or grayscale PDF/X using Ghostscript and ICC
color profiles. Profiles not given on the command line are taken from the
saved settings, then from the profiles installed on this system.

Examples:
  cyanpdf convert in.pdf -o out.pdf                      # Defaults from settings/system
  cyanpdf convert in.pdf -o out.pdf --profile ISOcoated_v2_eci.icc --intent perceptual
  cyanpdf convert in.pdf -o out.pdf --dry-run            # Print Ghostscript arguments
  cyanpdf profiles --space output                        # List output profiles
  cyanpdf info in.pdf press.icc                          # Inspect files
  cyanpdf tool                                           # Show Ghostscript status
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (default: <config dir>/cyanpdf/settings.ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to CMYK or grayscale PDF/X
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// List installed ICC profiles
    #[command(visible_alias = "p")]
    Profiles(ProfilesArgs),

    /// Show file type, color space and fingerprint
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Show Ghostscript installation status
    Tool(ToolArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Input PDF
    input: PathBuf,

    /// Output PDF
    #[arg(short, long)]
    output: PathBuf,

    /// Default profile for untagged RGB content
    #[arg(long)]
    rgb: Option<PathBuf>,

    /// Default profile for untagged gray content
    #[arg(long)]
    gray: Option<PathBuf>,

    /// Default profile for untagged CMYK content
    #[arg(long)]
    cmyk: Option<PathBuf>,

    /// Output intent profile (CMYK or gray)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Render intent: 0-3, perceptual, relative-colorimetric, saturation, absolute-colorimetric
    #[arg(long)]
    intent: Option<RenderIntent>,

    /// Black point compensation
    #[arg(long)]
    black_point: Option<bool>,

    #[command(flatten)]
    tool: ToolArgs,

    /// Cache entry naming: document, document-profile
    #[arg(long)]
    cache_key: Option<CacheKey>,

    /// Directory for patched PDF/X templates
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Print the Ghostscript arguments instead of running it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ProfilesArgs {
    /// Only list one kind: rgb, cmyk, gray, output
    #[arg(short, long)]
    space: Option<String>,

    /// Directories to scan instead of the system profile directories
    #[arg(long = "root")]
    roots: Vec<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Files to inspect
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args, Clone, Default)]
struct ToolArgs {
    /// Ghostscript executable
    #[arg(long)]
    gs: Option<PathBuf>,

    /// Ghostscript version, skips running `gs --version`
    #[arg(long)]
    gs_version: Option<String>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = cli
        .config
        .map(RonSettingsStore::new)
        .unwrap_or_else(RonSettingsStore::platform);
    let mut settings = store.load();
    let before = settings.clone();

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, &mut settings, cli.verbose)?,
        Commands::Profiles(args) => commands::profiles::run(args, cli.verbose)?,
        Commands::Info(args) => commands::info::run(args, cli.verbose)?,
        Commands::Tool(args) => commands::tool::run(args, &settings, store.path(), cli.verbose)?,
    }

    if settings != before {
        store.save(&settings)?;
    }
    Ok(())
}
