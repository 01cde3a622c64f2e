use miette::Result;

use schematic_core::config::load_config;
use schematic_core::settings::build_settings;

use super::render_settings;

pub fn run(dry_run: bool, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;
    config.ensure_paths()?;

    let outcome = build_settings(&config, dry_run)?;
    let target = config.paths.config.join("settings_schema.json");
    render_settings(&Ok(outcome), &target, verbose);

    Ok(())
}
