use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, SchematicError};

/// Resolve a section reference to a template path.
///
/// Fallback chain, in order: the reference taken as a path from the current
/// context; a schema-definition path back-resolved to its template in the
/// sections directory; the bare reference retried relative to the sections
/// directory. A step failing is not an error until all three are exhausted.
pub fn resolve_section(config: &Config, reference: &str) -> Result<PathBuf> {
    let direct = Path::new(reference);

    if direct.exists() {
        match backresolve_definition(config, direct) {
            Some(template) if template.exists() => return Ok(template),
            // a definition whose template is missing falls through to the
            // sections-directory retry
            Some(_) => {}
            None => return Ok(direct.to_path_buf()),
        }
    }

    // Path::join replaces the sections base outright for an absolute argument
    if direct.is_relative() {
        let in_sections = config.paths.sections.join(reference);
        if in_sections.exists() {
            return Ok(in_sections);
        }
    }

    Err(SchematicError::SectionNotFound {
        reference: reference.to_string(),
    })
}

/// When `path` points inside the schema directory, swap it to the matching
/// template path under the sections directory (same base name, `.liquid`
/// extension).
fn backresolve_definition(config: &Config, path: &Path) -> Option<PathBuf> {
    let canonical = path.canonicalize().ok()?;
    let schema_dir = config.paths.schema.canonicalize().ok()?;

    if !canonical.starts_with(&schema_dir) {
        return None;
    }

    let file_name = canonical.file_name()?;
    Some(
        config
            .paths
            .sections
            .join(file_name)
            .with_extension("liquid"),
    )
}
