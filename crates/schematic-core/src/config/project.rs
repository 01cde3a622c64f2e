use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Project-level config deserialized from schematic.toml.
///
/// Every field is optional in the file; omitted values fall back to the
/// stock Shopify theme layout.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub localization: LocalizationConfig,

    #[serde(default)]
    pub files: FilesConfig,

    /// Per-file progress output. Resolved against the user config when unset.
    pub verbose: Option<bool>,
}

/// Theme directories the pipeline reads and writes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_config_dir")]
    pub config: PathBuf,

    #[serde(default = "default_sections_dir")]
    pub sections: PathBuf,

    #[serde(default = "default_snippets_dir")]
    pub snippets: PathBuf,

    #[serde(default = "default_locales_dir")]
    pub locales: PathBuf,

    /// Source directory holding the JSON schema definitions.
    #[serde(default = "default_schema_dir")]
    pub schema: PathBuf,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("./config")
}

fn default_sections_dir() -> PathBuf {
    PathBuf::from("./sections")
}

fn default_snippets_dir() -> PathBuf {
    PathBuf::from("./snippets")
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from("./locales")
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./src/schema")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config: default_config_dir(),
            sections: default_sections_dir(),
            snippets: default_snippets_dir(),
            locales: default_locales_dir(),
            schema: default_schema_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalizationConfig {
    /// Snippet carrying the `schematicLocalization` marker comment.
    #[serde(default = "default_localization_file")]
    pub file: PathBuf,

    /// Expression template the flattened locale replaces `%%json%%` in.
    /// The text after the placeholder is what delimits the generated
    /// region on the next run, so it must not be empty.
    #[serde(default = "default_localization_expression")]
    pub expression: String,
}

fn default_localization_file() -> PathBuf {
    PathBuf::from("./snippets/p-app-localization.liquid")
}

fn default_localization_expression() -> String {
    "window.app.copy = %%json%%;".to_string()
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            file: default_localization_file(),
            expression: default_localization_expression(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FilesConfig {
    /// Glob patterns for section files to skip during the scan.
    #[serde(default)]
    pub exclude: Vec<String>,
}
