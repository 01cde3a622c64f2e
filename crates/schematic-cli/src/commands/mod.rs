pub mod build;
pub mod check;
pub mod locales;
pub mod scaffold;
pub mod section;
pub mod settings;

use std::path::Path;

use console::style;

use schematic_core::artifact::WriteOutcome;
use schematic_core::error::Result as CoreResult;
use schematic_core::locales::{LocaleReport, LocalizationOutcome};
use schematic_core::settings::SettingsOutcome;
use schematic_core::transform::{SectionOutcome, SectionReport};

fn render_write(label: &str, outcome: &WriteOutcome, verbose: bool) {
    match outcome {
        WriteOutcome::Written => {
            if verbose {
                println!("{} {}", style("✓").green(), style(label).cyan());
            }
        }
        WriteOutcome::Unchanged => {
            if verbose {
                println!("{} {label} (unchanged)", style("·").dim());
            }
        }
        WriteOutcome::WouldWrite(diff) => {
            println!("{} {label} would change:", style("→").cyan());
            print!("{diff}");
        }
    }
}

pub(crate) fn render_settings(result: &CoreResult<SettingsOutcome>, target: &Path, verbose: bool) {
    match result {
        Ok(SettingsOutcome::MissingSource) => {
            if verbose {
                println!("{} settings: nothing to do", style("·").dim());
            }
        }
        Ok(SettingsOutcome::Artifact(outcome)) => {
            render_write(&target.display().to_string(), outcome, verbose);
        }
        Err(err) => println!("  {} settings: {err}", style("✗").red()),
    }
}

pub(crate) fn render_locales(reports: &[LocaleReport], verbose: bool) {
    for report in reports {
        match &report.result {
            Ok(outcome) => render_write(&report.target.display().to_string(), outcome, verbose),
            Err(err) => println!("  {} {}: {err}", style("✗").red(), report.source.display()),
        }
    }
}

pub(crate) fn render_localization(
    result: &CoreResult<LocalizationOutcome>,
    file: &Path,
    verbose: bool,
) {
    match result {
        Ok(LocalizationOutcome::Updated) => {
            if verbose {
                println!("{} {}", style("✓").green(), style(file.display()).cyan());
            }
        }
        Ok(LocalizationOutcome::Unchanged) => {
            if verbose {
                println!("{} {} (unchanged)", style("·").dim(), file.display());
            }
        }
        Ok(LocalizationOutcome::MissingFile) => {
            if verbose {
                println!(
                    "{} localization: no snippet at {}",
                    style("·").dim(),
                    file.display()
                );
            }
        }
        Ok(LocalizationOutcome::NoMarker) => {
            if verbose {
                println!(
                    "{} localization: no schematicLocalization marker in {}",
                    style("·").dim(),
                    file.display()
                );
            }
        }
        Ok(LocalizationOutcome::WouldUpdate(diff)) => {
            println!("{} {} would change:", style("→").cyan(), file.display());
            print!("{diff}");
        }
        Err(err) => println!("  {} localization: {err}", style("✗").red()),
    }
}

pub(crate) fn render_sections(reports: &[SectionReport], verbose: bool) {
    for report in reports {
        let path = report.path.display();
        match &report.result {
            Ok(SectionOutcome::Updated) => {
                if verbose {
                    println!("{} {}", style("✓").green(), style(path).cyan());
                }
            }
            Ok(SectionOutcome::Unchanged) => {
                if verbose {
                    println!("{} {path} (unchanged)", style("·").dim());
                }
            }
            Ok(SectionOutcome::NoDirective) => {
                if verbose {
                    println!("{} {path} (no directive)", style("·").dim());
                }
            }
            Ok(SectionOutcome::NotAFile) => {}
            Ok(SectionOutcome::WouldUpdate(diff)) => {
                println!("{} {path} would change:", style("→").cyan());
                print!("{diff}");
            }
            Err(err) => println!("  {} {path}: {err}", style("✗").red()),
        }
    }
}
