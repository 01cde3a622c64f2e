//! Locale artifact compilation and the generated localization snippet.

use std::path::PathBuf;

use regex_lite::{Captures, Regex};
use serde_json::{Map, Value};

use crate::artifact::{write_if_changed, WriteOutcome};
use crate::config::Config;
use crate::definition::{compile_definition, to_pretty_json};
use crate::diff::unified_diff;
use crate::error::{Result, SchematicError};

/// Marker comment anchoring the generated expression in the snippet.
/// Unlike the schema directive, it takes no name or options.
const MARKER: &str =
    r"\{%-?\s*comment\s*-?%\}\s*schematicLocalization\s*\{%-?\s*endcomment\s*-?%\}";

/// Flatten a locale dictionary into dotted key-paths, depth-first in
/// authored key order. Objects recurse; arrays and every other value are
/// leaves.
pub fn flatten_key_paths(map: &Map<String, Value>) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(map, "", &mut paths);
    paths
}

fn collect_paths(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(inner) => collect_paths(inner, &path, out),
            _ => out.push(path),
        }
    }
}

/// Render the localization expression: one translation lookup line per
/// key-path, comma-terminated on all but the last, substituted for the
/// `%%json%%` placeholder.
pub fn render_locale_expression(expression: &str, paths: &[String]) -> String {
    let mut body = String::new();
    for (i, path) in paths.iter().enumerate() {
        let delim = if i == paths.len() - 1 { "" } else { "," };
        body.push_str(&format!(
            "  \"{path}\": {{{{ '{path}' | t | json }}}}{delim}\n"
        ));
    }

    expression.replacen("%%json%%", &format!("{{\n{body}}}"), 1)
}

/// Regex for the previously generated region: the marker comment plus the
/// expression with its placeholder widened to any braced body. The text
/// after the placeholder is the delimiter that stops the match, which is
/// why the configured expression must carry one.
fn region_pattern(expression: &str) -> String {
    let escaped = regex_lite::escape(expression).replacen("%%json%%", r"\{.*?\}", 1);
    format!(r"(?is){MARKER}\s*?{escaped}")
}

/// Whether the text carries the localization marker comment.
pub(crate) fn has_marker(text: &str) -> bool {
    Regex::new(&format!("(?i){MARKER}"))
        .expect("valid regex")
        .is_match(text)
}

#[derive(Debug)]
pub enum LocalizationOutcome {
    /// The configured snippet file does not exist.
    MissingFile,
    /// The snippet exists but carries no schematicLocalization marker.
    NoMarker,
    Updated,
    Unchanged,
    /// Dry run: the unified diff a real run would apply.
    WouldUpdate(String),
}

/// Regenerate the localization expression inside the configured snippet.
///
/// When the marker plus a previously generated expression are present the
/// whole region is replaced; when only the marker is present the expression
/// is inserted after it. The author's comment text is captured and
/// re-emitted verbatim, so stylistic trim dashes and casing survive.
pub fn write_localization(config: &Config, dry_run: bool) -> Result<LocalizationOutcome> {
    let file = &config.localization.file;
    if !file.exists() {
        return Ok(LocalizationOutcome::MissingFile);
    }

    let contents = std::fs::read_to_string(file).map_err(|e| SchematicError::Io {
        context: format!("reading {}", file.display()),
        source: e,
    })?;

    let marker = Regex::new(&format!("(?i){MARKER}")).expect("valid regex");
    let Some(comment) = marker.find(&contents) else {
        return Ok(LocalizationOutcome::NoMarker);
    };
    // Re-emitted as matched, so the author's styling survives.
    let comment = comment.as_str().to_string();

    let paths = match default_locale(config)? {
        Some(locale) => flatten_key_paths(&locale),
        None => Vec::new(),
    };

    let expression = render_locale_expression(&config.localization.expression, &paths);
    let replacement = format!("{comment}\n{expression}");
    let region =
        Regex::new(&region_pattern(&config.localization.expression)).expect("valid regex");

    let new_contents = if region.is_match(&contents) {
        region
            .replace(&contents, |_: &Captures| replacement.as_str())
            .into_owned()
    } else {
        marker
            .replace(&contents, |_: &Captures| replacement.as_str())
            .into_owned()
    };

    if new_contents == contents {
        return Ok(LocalizationOutcome::Unchanged);
    }

    if dry_run {
        return Ok(LocalizationOutcome::WouldUpdate(unified_diff(
            &contents,
            &new_contents,
            file,
        )));
    }

    std::fs::write(file, &new_contents).map_err(|e| SchematicError::Io {
        context: format!("writing {}", file.display()),
        source: e,
    })?;

    Ok(LocalizationOutcome::Updated)
}

/// The default locale feeding the flattener: the first file, sorted by
/// name, in the locales directory whose name ends with `default.json`.
pub(crate) fn default_locale(config: &Config) -> Result<Option<Map<String, Value>>> {
    let dir = &config.paths.locales;

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| SchematicError::Io {
            context: format!("reading {}", dir.display()),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("default.json"))
        })
        .collect();
    candidates.sort();

    let Some(path) = candidates.into_iter().next() else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(&path).map_err(|e| SchematicError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| SchematicError::LocaleParse {
            path: path.clone(),
            source: e,
        })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

/// Report for one compiled locale definition.
#[derive(Debug)]
pub struct LocaleReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub result: Result<WriteOutcome>,
}

/// The locale definition sources: sorted `.json` files under
/// `<schema>/locales/`, or nothing when that directory is absent.
pub(crate) fn locale_sources(config: &Config) -> Result<Vec<PathBuf>> {
    let source_dir = config.paths.schema.join("locales");
    if !source_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut sources: Vec<PathBuf> = std::fs::read_dir(&source_dir)
        .map_err(|e| SchematicError::Io {
            context: format!("reading {}", source_dir.display()),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    sources.sort();
    Ok(sources)
}

/// Compile every `.json` definition under `<schema>/locales/` into the
/// theme locales directory, same loader and migration as section schemas.
/// Per-file failures are collected; siblings continue. A missing source
/// directory means there is nothing to do.
pub fn build_locales(config: &Config, dry_run: bool) -> Result<Vec<LocaleReport>> {
    let sources = locale_sources(config)?;

    let mut reports = Vec::new();
    for source in sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = config.paths.locales.join(name);

        let result = compile_definition(&source)
            .and_then(|definition| to_pretty_json(&definition))
            .and_then(|rendered| write_if_changed(&target, &rendered, dry_run));

        reports.push(LocaleReport {
            source,
            target,
            result,
        });
    }

    Ok(reports)
}
