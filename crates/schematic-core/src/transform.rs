//! The per-template pipeline: directive gate, schema compilation, block
//! splice, and the optional invocation rewrite.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::codegen::write_code;
use crate::config::Config;
use crate::definition::{compile_definition, to_pretty_json};
use crate::diff::unified_diff;
use crate::directive::{find_directive, Directive};
use crate::error::{Result, SchematicError};
use crate::splice::splice_block;

/// Run one template's text through the pipeline. `Ok(None)` means the
/// template carries no directive and is left alone.
pub fn transform_text(config: &Config, path: &Path, text: &str) -> Result<Option<String>> {
    let Some(directive) = find_directive(text, path)? else {
        return Ok(None);
    };

    let base = base_name(path);
    let (name, options) = settle_import(config, &directive, &base);

    let definition = compile_definition(&config.paths.schema.join(format!("{name}.json")))?;
    let rendered = to_pretty_json(&definition)?;

    let mut new_text = splice_block(text, "schema", "endschema", &rendered);

    if options.iter().any(|opt| opt == "writeCode") {
        // Splicing shifts offsets, so re-anchor on the new text. A directive
        // that sat inside the schema region is gone now and the rewrite is
        // skipped.
        if let Some(directive) = find_directive(&new_text, path)? {
            new_text = write_code(&new_text, &directive, &name, &definition);
        }
    }

    Ok(Some(new_text))
}

/// Settle the parsed name and options against the schema directory: a
/// token that names no definition is really the options string, and the
/// name falls back to the template's own base filename.
pub(crate) fn settle_import(
    config: &Config,
    directive: &Directive,
    base: &str,
) -> (String, Vec<String>) {
    match &directive.name {
        Some(name) => {
            if config.paths.schema.join(format!("{name}.json")).exists() {
                (name.clone(), directive.options.clone())
            } else {
                (base.to_string(), vec![name.clone()])
            }
        }
        None => (base.to_string(), directive.options.clone()),
    }
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug)]
pub enum SectionOutcome {
    Updated,
    Unchanged,
    /// No directive in the template.
    NoDirective,
    /// The resolved path is not a regular file.
    NotAFile,
    /// Dry run: the unified diff a real run would apply.
    WouldUpdate(String),
}

#[derive(Debug)]
pub struct SectionReport {
    pub path: PathBuf,
    pub result: Result<SectionOutcome>,
}

/// Read, transform, and write back one template. Unchanged output skips the
/// write, so mtimes only move when content does.
pub fn transform_file(config: &Config, path: &Path, dry_run: bool) -> Result<SectionOutcome> {
    if !path.is_file() {
        return Ok(SectionOutcome::NotAFile);
    }

    let text = std::fs::read_to_string(path).map_err(|e| SchematicError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    let Some(new_text) = transform_text(config, path, &text)? else {
        return Ok(SectionOutcome::NoDirective);
    };

    if new_text == text {
        return Ok(SectionOutcome::Unchanged);
    }

    if dry_run {
        return Ok(SectionOutcome::WouldUpdate(unified_diff(
            &text, &new_text, path,
        )));
    }

    std::fs::write(path, &new_text).map_err(|e| SchematicError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;

    Ok(SectionOutcome::Updated)
}

/// Transform a batch of templates. Results are settled one per file; a
/// failure never stops the siblings.
pub fn transform_all(config: &Config, paths: &[PathBuf], dry_run: bool) -> Vec<SectionReport> {
    paths
        .iter()
        .map(|path| SectionReport {
            path: path.clone(),
            result: transform_file(config, path, dry_run),
        })
        .collect()
}

/// The templates eligible for a batch run: `.liquid` files directly under
/// the sections directory, sorted, minus excluded globs and binary files.
pub fn scan_sections(config: &Config) -> Result<Vec<PathBuf>> {
    let exclude_set = build_glob_set(&config.files.exclude)?;

    let entries = std::fs::read_dir(&config.paths.sections).map_err(|e| SchematicError::Io {
        context: format!("reading {}", config.paths.sections.display()),
        source: e,
    })?;

    let mut sections = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SchematicError::Io {
            context: format!("reading {}", config.paths.sections.display()),
            source: e,
        })?;
        let path = entry.path();

        if !path.is_file() || !path.extension().is_some_and(|ext| ext == "liquid") {
            continue;
        }
        if exclude_set.is_match(entry.file_name()) {
            continue;
        }
        if is_binary_file(&path) {
            continue;
        }

        sections.push(path);
    }
    sections.sort();

    Ok(sections)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| SchematicError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| SchematicError::GlobPattern {
        pattern: "<combined>".into(),
        source: e,
    })
}

/// Detect binary files using content_inspector (BOM-aware, null-byte
/// scanning). Reads only the first 8KB.
fn is_binary_file(path: &Path) -> bool {
    use std::io::Read;

    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };

    let mut buf = [0u8; 8192];
    let Ok(n) = file.take(8192).read(&mut buf) else {
        return false;
    };

    !content_inspector::inspect(&buf[..n]).is_text()
}
