use console::style;
use miette::Result;

use schematic_core::check::check_theme;
use schematic_core::config::load_config;

pub fn run(quiet: bool) -> Result<()> {
    let config = load_config()?;
    let verbose = config.verbose && !quiet;

    if verbose {
        println!(
            "{} {}",
            style("Checking theme at").bold(),
            style(config.paths.sections.display()).cyan()
        );
    }

    let report = check_theme(&config);

    if !report.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &report.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &report.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!(
            "\n{} Theme has {} error(s)",
            style("✗").red().bold(),
            report.errors.len()
        );
        std::process::exit(1);
    }

    if verbose {
        println!("\n{} Theme is valid!", style("✓").green().bold());
    }
    Ok(())
}
