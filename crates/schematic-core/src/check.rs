//! Non-mutating validation of a theme against its schema definitions.

use crate::config::Config;
use crate::definition::compile_definition;
use crate::directive::find_directive;
use crate::locales;
use crate::transform;

#[derive(Debug, Default)]
pub struct CheckReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the theme without touching any file: paths, directives, schema
/// definitions, locale sources, and the localization snippet. Everything
/// found is collected into one report.
pub fn check_theme(config: &Config) -> CheckReport {
    let mut report = CheckReport::default();

    if let Err(err) = config.ensure_paths() {
        report.errors.push(err.to_string());
        return report;
    }

    check_sections(config, &mut report);
    check_settings(config, &mut report);
    check_locales(config, &mut report);
    check_localization(config, &mut report);

    report
}

fn check_sections(config: &Config, report: &mut CheckReport) {
    let sections = match transform::scan_sections(config) {
        Ok(sections) => sections,
        Err(err) => {
            report.errors.push(err.to_string());
            return;
        }
    };

    for path in sections {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                report.errors.push(format!("{}: {err}", path.display()));
                continue;
            }
        };

        let directive = match find_directive(&text, &path) {
            Ok(Some(directive)) => directive,
            Ok(None) => continue,
            Err(err) => {
                report.errors.push(err.to_string());
                continue;
            }
        };

        let base = transform::base_name(&path);
        let (name, _options) = transform::settle_import(config, &directive, &base);

        if let Err(err) = compile_definition(&config.paths.schema.join(format!("{name}.json"))) {
            report.errors.push(format!("{}: {err}", path.display()));
        }
    }
}

fn check_settings(config: &Config, report: &mut CheckReport) {
    let source = config.paths.schema.join("settings_schema.json");
    if !source.exists() {
        return;
    }
    if let Err(err) = compile_definition(&source) {
        report.errors.push(err.to_string());
    }
}

fn check_locales(config: &Config, report: &mut CheckReport) {
    let sources = match locales::locale_sources(config) {
        Ok(sources) => sources,
        Err(err) => {
            report.errors.push(err.to_string());
            return;
        }
    };

    for source in sources {
        if let Err(err) = compile_definition(&source) {
            report.errors.push(err.to_string());
        }
    }
}

fn check_localization(config: &Config, report: &mut CheckReport) {
    let file = &config.localization.file;
    if !file.exists() {
        report
            .warnings
            .push(format!("Localization snippet missing: {}", file.display()));
        return;
    }

    match std::fs::read_to_string(file) {
        Ok(text) => {
            if !locales::has_marker(&text) {
                report.warnings.push(format!(
                    "No schematicLocalization marker in {}",
                    file.display()
                ));
            }
        }
        Err(err) => report.errors.push(format!("{}: {err}", file.display())),
    }

    match locales::default_locale(config) {
        Ok(Some(_)) => {}
        Ok(None) => report.warnings.push(format!(
            "No default locale under {}, the localization expression will be empty",
            config.paths.locales.display()
        )),
        Err(err) => report.errors.push(err.to_string()),
    }
}
