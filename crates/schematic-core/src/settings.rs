//! The settings artifact: the theme-level settings dictionary compiled from
//! the schema directory into the theme config directory.

use crate::artifact::{write_if_changed, WriteOutcome};
use crate::config::Config;
use crate::definition::{compile_definition, to_pretty_json};
use crate::error::Result;

#[derive(Debug)]
pub enum SettingsOutcome {
    /// No `settings_schema.json` under the schema directory.
    MissingSource,
    Artifact(WriteOutcome),
}

/// Compile `<schema>/settings_schema.json` into
/// `<config>/settings_schema.json`, same loader and migration as section
/// schemas.
pub fn build_settings(config: &Config, dry_run: bool) -> Result<SettingsOutcome> {
    let source = config.paths.schema.join("settings_schema.json");
    if !source.exists() {
        return Ok(SettingsOutcome::MissingSource);
    }

    let definition = compile_definition(&source)?;
    let rendered = to_pretty_json(&definition)?;
    let target = config.paths.config.join("settings_schema.json");

    write_if_changed(&target, &rendered, dry_run).map(SettingsOutcome::Artifact)
}
