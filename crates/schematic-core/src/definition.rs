use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, SchematicError};

/// A schema definition: the top-level object of a definition file, with
/// key order as authored (serde_json's preserve_order feature).
pub type Definition = Map<String, Value>;

/// Load a definition file without applying migrations.
///
/// The root must be a JSON object; an array or scalar root is an error.
pub fn load_definition(path: &Path) -> Result<Definition> {
    let content = std::fs::read_to_string(path).map_err(|e| SchematicError::DefinitionRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| SchematicError::DefinitionParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SchematicError::DefinitionNotObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Move a legacy top-level `templates` key into `enabled_on.templates`.
///
/// `enabled_on` keeps its position when the key already exists and is
/// appended at the tail otherwise; every other key keeps its authored
/// order. No values are lost.
pub fn migrate_enabled_on(definition: &mut Definition) {
    let Some(templates) = definition.get("templates").cloned() else {
        return;
    };

    let mut enabled_on = Map::new();
    enabled_on.insert("templates".to_string(), templates);
    definition.insert("enabled_on".to_string(), Value::Object(enabled_on));

    // must be a shift: swap_remove would scramble the authored key order
    definition.shift_remove("templates");
}

/// Load a definition and apply the legacy migration. This is the one place
/// the migration runs, once per load.
pub fn compile_definition(path: &Path) -> Result<Definition> {
    let mut definition = load_definition(path)?;
    migrate_enabled_on(&mut definition);
    Ok(definition)
}

/// Render a definition as 2-space-indented JSON in authored key order.
pub fn to_pretty_json(definition: &Definition) -> Result<String> {
    serde_json::to_string_pretty(definition).map_err(|e| SchematicError::Io {
        context: "serializing schema definition".to_string(),
        source: std::io::Error::other(e),
    })
}
