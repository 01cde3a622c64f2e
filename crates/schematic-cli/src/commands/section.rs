use miette::Result;

use schematic_core::config::load_config;
use schematic_core::resolve::resolve_section;
use schematic_core::transform::{transform_file, SectionReport};

use super::render_sections;

pub fn run(file: String, dry_run: bool, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;
    config.ensure_paths()?;

    let path = resolve_section(&config, &file)?;
    let outcome = transform_file(&config, &path, dry_run)?;

    render_sections(
        &[SectionReport {
            path,
            result: Ok(outcome),
        }],
        verbose,
    );

    Ok(())
}
