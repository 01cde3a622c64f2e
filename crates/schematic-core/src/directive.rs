use std::ops::Range;
use std::path::Path;

use regex_lite::Regex;

use crate::error::{Result, SchematicError};

/// The directive comment marking a template for schema injection:
/// `{%- comment -%} schematic <name?> <options...> {%- endcomment -%}`.
/// Trim dashes are optional and matching is case-insensitive. The options
/// and the closing tag must sit on the same line.
const DIRECTIVE: &str = r#"(?i)\{%-?\s*comment\s*-?%\}\s*(schematic)\b\s*['"]?([^'"\s{]+)?['"]?\s*(.*?)\{%-?\s*endcomment\s*-?%\}"#;

/// Cheap probe distinguishing "no directive at all" from "directive present
/// but unparseable". The word boundary keeps `schematicLocalization` (the
/// locale snippet marker) from tripping it.
const PROBE: &str = r"(?i)\{%-?\s*comment\s*-?%\}\s*schematic\b";

/// A parsed schematic directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Import name for the schema definition, when the comment carries one.
    pub name: Option<String>,
    /// Option tokens following the name (e.g. `writeCode`).
    pub options: Vec<String>,
    /// Byte span of the whole comment within the template.
    pub span: Range<usize>,
    /// Offset just past the `schematic` keyword. Generated invocation code
    /// re-anchors here so the rest of the comment survives a rewrite.
    pub keyword_end: usize,
}

/// Find the first schematic directive in a template.
///
/// Returns `Ok(None)` when the template carries no directive at all, and
/// `Err(MalformedDirective)` when an opener is present but the comment does
/// not parse. `path` is used for error context only.
pub fn find_directive(text: &str, path: &Path) -> Result<Option<Directive>> {
    let probe = Regex::new(PROBE).expect("valid regex");
    if !probe.is_match(text) {
        return Ok(None);
    }

    let directive = Regex::new(DIRECTIVE).expect("valid regex");
    let caps = directive
        .captures(text)
        .ok_or_else(|| SchematicError::MalformedDirective {
            path: path.to_path_buf(),
        })?;

    let whole = caps.get(0).expect("group 0 is the whole match");
    let keyword = caps.get(1).expect("keyword group is not optional");

    let name = caps.get(2).map(|m| m.as_str().to_string());
    let options = caps
        .get(3)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    Ok(Some(Directive {
        name,
        options,
        span: whole.start()..whole.end(),
        keyword_end: keyword.end(),
    }))
}
