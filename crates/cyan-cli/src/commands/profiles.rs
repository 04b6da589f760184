//! Installed profile listing.

use crate::ProfilesArgs;
use anyhow::{Context, Result, bail};
use cyan_core::ColorSpace;
use cyan_icc::{CatalogEntry, ProfileCatalog, search_roots};

/// Which entries to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    All,
    Space(ColorSpace),
    Output,
}

fn parse_filter(value: Option<&str>) -> Result<Filter> {
    let Some(value) = value else {
        return Ok(Filter::All);
    };
    if value.eq_ignore_ascii_case("output") {
        return Ok(Filter::Output);
    }
    match value.parse::<ColorSpace>() {
        Ok(space) if space != ColorSpace::Unknown => Ok(Filter::Space(space)),
        _ => bail!("Unknown profile kind '{value}'. Options: rgb, cmyk, gray, output"),
    }
}

/// Runs the profiles command.
pub fn run(args: ProfilesArgs, verbose: u8) -> Result<()> {
    let filter = parse_filter(args.space.as_deref())?;
    let roots = if args.roots.is_empty() {
        search_roots()
    } else {
        args.roots
    };
    if verbose > 0 {
        for root in &roots {
            println!("Scanning {}", root.display());
        }
    }

    let catalog = ProfileCatalog::scan(&roots).context("Failed to scan profiles")?;
    let entries: Vec<&CatalogEntry> = match filter {
        Filter::All => catalog.entries().iter().collect(),
        Filter::Space(space) => catalog.of_space(space).collect(),
        Filter::Output => catalog.outputs().collect(),
    };
    if entries.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    let preferred: Vec<_> = ColorSpace::KNOWN
        .iter()
        .filter_map(|&space| catalog.preferred(space).map(|e| e.path.as_path()))
        .collect();
    let width = entries.iter().map(|e| e.description.len()).max().unwrap_or(0);
    for entry in entries {
        let mark = if preferred.contains(&entry.path.as_path()) { '*' } else { ' ' };
        println!(
            "{mark} {:<width$}  {:<4}  {}",
            entry.description,
            entry.color_space.name(),
            entry.path.display()
        );
    }
    Ok(())
}
