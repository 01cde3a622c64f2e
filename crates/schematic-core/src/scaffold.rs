//! Boilerplate for a new section: template, snippet, and schema definition
//! created in one pass.

use std::path::PathBuf;

use regex_lite::Regex;

use crate::config::Config;
use crate::error::{Result, SchematicError};

const SECTION_BOILERPLATE: &str = "{%- comment -%} schematic writeCode {%- endcomment -%}\n";

const SCHEMA_BOILERPLATE: &str = r#"{
  "name": "Boilerplate",
  "tag": "section",
  "presets": [
    {
      "name": "Boilerplate"
    }
  ],
  "enabled_on": {
    "templates": ["*"],
    "groups": ["*"]
  },
  "settings": [],
  "blocks": [
    {
      "type": "@app"
    }
  ]
}
"#;

fn snippet_boilerplate(name: &str) -> String {
    format!("{{%- liquid\n\n\n\n-%}}\n<div class=\"{name}\">\n</div>\n")
}

/// Strip extension spellings and anything outside `[a-z0-9_-]` from a
/// requested scaffold name.
pub fn sanitize_name(name: &str) -> String {
    let pattern = Regex::new(r"\.json|\.liquid|[^a-z0-9_-]").expect("valid regex");
    pattern.replace_all(name, "").into_owned()
}

#[derive(Debug)]
pub struct ScaffoldReport {
    /// The sanitized name the files were created under.
    pub name: String,
    pub created: Vec<PathBuf>,
    /// Paths left alone because a file was already there.
    pub skipped: Vec<PathBuf>,
}

/// Create the three boilerplate files for a new section: the template
/// (carrying a `writeCode` directive), a snippet skeleton, and a minimal
/// schema definition. Existing files are never overwritten.
pub fn scaffold(config: &Config, name: &str) -> Result<ScaffoldReport> {
    let requested = name;
    let name = sanitize_name(requested);
    if name.is_empty() {
        return Err(SchematicError::EmptyScaffoldName {
            name: requested.to_string(),
        });
    }

    let files = [
        (
            config.paths.sections.join(format!("{name}.liquid")),
            SECTION_BOILERPLATE.to_string(),
        ),
        (
            config.paths.snippets.join(format!("{name}.liquid")),
            snippet_boilerplate(&name),
        ),
        (
            config.paths.schema.join(format!("{name}.json")),
            SCHEMA_BOILERPLATE.to_string(),
        ),
    ];

    let mut report = ScaffoldReport {
        name: name.clone(),
        created: Vec::new(),
        skipped: Vec::new(),
    };

    for (path, content) in files {
        if path.exists() {
            report.skipped.push(path);
            continue;
        }

        std::fs::write(&path, content).map_err(|e| SchematicError::Io {
            context: format!("writing {}", path.display()),
            source: e,
        })?;
        report.created.push(path);
    }

    Ok(report)
}
