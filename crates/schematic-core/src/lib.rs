pub mod artifact;
pub mod check;
pub mod codegen;
pub mod config;
pub mod definition;
pub mod diff;
pub mod directive;
pub mod error;
pub mod locales;
pub mod resolve;
pub mod scaffold;
pub mod settings;
pub mod splice;
pub mod transform;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::locales::{LocaleReport, LocalizationOutcome};
use crate::settings::SettingsOutcome;
use crate::transform::SectionReport;

/// Options for a full `build` run.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Explicit section references to process instead of scanning the
    /// sections directory.
    pub files: Vec<String>,
    /// Compute diffs instead of writing.
    pub dry_run: bool,
}

/// Everything a full run did, one settled result per artifact.
#[derive(Debug)]
pub struct BuildReport {
    pub settings: Result<SettingsOutcome>,
    pub locales: Vec<LocaleReport>,
    pub localization: Result<LocalizationOutcome>,
    pub sections: Vec<SectionReport>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.settings.is_ok()
            && self.localization.is_ok()
            && self.locales.iter().all(|r| r.result.is_ok())
            && self.sections.iter().all(|r| r.result.is_ok())
    }
}

/// Main entry point: run the whole pipeline over a theme.
pub fn build(config: &Config, options: BuildOptions) -> Result<BuildReport> {
    // 1. Required directories, checked once up front
    config.ensure_paths()?;

    // 2. Settings artifact
    let settings = settings::build_settings(config, options.dry_run);

    // 3. Locale artifacts, then the localization snippet
    let locale_reports = locales::build_locales(config, options.dry_run)?;
    let localization = locales::write_localization(config, options.dry_run);

    // 4. Section templates, scanned or taken from the explicit list
    let sections = if options.files.is_empty() {
        let paths = transform::scan_sections(config)?;
        transform::transform_all(config, &paths, options.dry_run)
    } else {
        options
            .files
            .iter()
            .map(|reference| resolve_and_transform(config, reference, options.dry_run))
            .collect()
    };

    Ok(BuildReport {
        settings,
        locales: locale_reports,
        localization,
        sections,
    })
}

fn resolve_and_transform(config: &Config, reference: &str, dry_run: bool) -> SectionReport {
    match resolve::resolve_section(config, reference) {
        Ok(path) => {
            let result = transform::transform_file(config, &path, dry_run);
            SectionReport { path, result }
        }
        Err(err) => SectionReport {
            path: PathBuf::from(reference),
            result: Err(err),
        },
    }
}
