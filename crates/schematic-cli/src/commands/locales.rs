use console::style;
use miette::Result;

use schematic_core::config::load_config;
use schematic_core::locales::{build_locales, write_localization};

use super::{render_localization, render_locales};

pub fn run(dry_run: bool, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;
    config.ensure_paths()?;

    let reports = build_locales(&config, dry_run)?;
    render_locales(&reports, verbose);

    let localization = write_localization(&config, dry_run)?;
    render_localization(&Ok(localization), &config.localization.file, verbose);

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        println!(
            "\n{} {failed} locale definition(s) failed",
            style("✗").red().bold()
        );
        std::process::exit(1);
    }

    Ok(())
}
