use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SchematicError {
    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the TOML syntax in your schematic.toml file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing theme directories: {}", missing.join(", "))]
    #[diagnostic(help(
        "Run from the theme root, or point the [paths] section of schematic.toml at the right directories"
    ))]
    MissingPaths { missing: Vec<String> },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed schematic directive in {path}")]
    #[diagnostic(help(
        "The directive comment must close with {{% endcomment %}} on the same line as its options"
    ))]
    MalformedDirective { path: PathBuf },

    #[error("Section not found: {reference}")]
    #[diagnostic(help(
        "The reference must be a section file, a schema definition, or a name under the sections directory"
    ))]
    SectionNotFound { reference: String },

    #[error("Schema definition not readable: {path}")]
    #[diagnostic(help("Every section using schematic needs a definition in the schema directory"))]
    DefinitionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema definition is not valid JSON: {path}")]
    #[diagnostic(help("Check the JSON syntax of the schema definition"))]
    DefinitionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema definition root must be a JSON object: {path}")]
    DefinitionNotObject { path: PathBuf },

    #[error("Locale file is not valid JSON: {path}")]
    LocaleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Nothing left of scaffold name after sanitizing: {name}")]
    #[diagnostic(help("Scaffold names may use lowercase letters, digits, hyphens and underscores"))]
    EmptyScaffoldName { name: String },
}

pub type Result<T> = std::result::Result<T, SchematicError>;
