use console::style;
use miette::Result;

use schematic_core::config::load_config;
use schematic_core::scaffold::scaffold;

pub fn run(name: String, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;

    let report = scaffold(&config, &name)?;

    for path in &report.skipped {
        println!(
            "{} file exists, skipped: {}",
            style("⚠").yellow(),
            path.display()
        );
    }

    if verbose {
        for path in &report.created {
            println!(
                "{} created {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}
