use console::style;
use miette::Result;

use schematic_core::config::load_config;
use schematic_core::transform::SectionOutcome;
use schematic_core::{build, BuildOptions};

use super::{render_localization, render_locales, render_sections, render_settings};

pub fn run(files: Vec<String>, dry_run: bool, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;

    let report = build(&config, BuildOptions { files, dry_run })?;

    let settings_target = config.paths.config.join("settings_schema.json");
    render_settings(&report.settings, &settings_target, verbose);
    render_locales(&report.locales, verbose);
    render_localization(&report.localization, &config.localization.file, verbose);
    render_sections(&report.sections, verbose);

    if !report.is_success() {
        println!(
            "\n{} Build finished with errors",
            style("✗").red().bold()
        );
        std::process::exit(1);
    }

    if verbose {
        let updated = report
            .sections
            .iter()
            .filter(|r| matches!(r.result, Ok(SectionOutcome::Updated)))
            .count();
        println!(
            "\n{} Build complete: {updated} section(s) updated",
            style("✓").green().bold()
        );
    }

    Ok(())
}
