pub mod project;
pub mod user;

use std::path::{Path, PathBuf};

use crate::error::{Result, SchematicError};

pub use project::{FilesConfig, LocalizationConfig, PathsConfig, ProjectConfig};
pub use user::{load_user_config, UserConfig};

/// Fully resolved runtime configuration.
///
/// Precedence, lowest to highest: built-in defaults, user config, project
/// schematic.toml, environment variables, CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    pub localization: LocalizationConfig,
    pub files: FilesConfig,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            localization: LocalizationConfig::default(),
            files: FilesConfig::default(),
            verbose: true,
        }
    }
}

impl Config {
    /// Stock theme layout with every path joined onto `root` instead of
    /// the current directory.
    pub fn rooted(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            paths: PathsConfig {
                config: root.join("config"),
                sections: root.join("sections"),
                snippets: root.join("snippets"),
                locales: root.join("locales"),
                schema: root.join("src/schema"),
            },
            localization: LocalizationConfig {
                file: root.join("snippets/p-app-localization.liquid"),
                expression: defaults.localization.expression,
            },
            files: defaults.files,
            verbose: defaults.verbose,
        }
    }

    /// All five theme directories must exist before a run. Collects every
    /// missing one into a single error instead of failing on the first.
    pub fn ensure_paths(&self) -> Result<()> {
        let mut missing = Vec::new();

        for (name, path) in [
            ("config", &self.paths.config),
            ("sections", &self.paths.sections),
            ("snippets", &self.paths.snippets),
            ("locales", &self.paths.locales),
            ("schema", &self.paths.schema),
        ] {
            if !path.is_dir() {
                missing.push(format!("{name}:{}", path.display()));
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchematicError::MissingPaths { missing })
        }
    }
}

/// Load the layered configuration for the current directory.
pub fn load_config() -> Result<Config> {
    load_config_from(Path::new("."))
}

/// Load the layered configuration, reading schematic.toml from `dir`.
pub fn load_config_from(dir: &Path) -> Result<Config> {
    let project = load_project_config(&dir.join("schematic.toml"))?;
    let user = load_user_config()?;

    let verbose = project
        .verbose
        .or(user.and_then(|u| u.verbose))
        .unwrap_or(true);

    let mut config = Config {
        paths: project.paths,
        localization: project.localization,
        files: project.files,
        verbose,
    };

    apply_env(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

/// Parse a schematic.toml file. A missing file yields the defaults.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| SchematicError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| SchematicError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Environment overrides, applied only for variables that are set.
fn apply_env(config: &mut Config, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("SCHEMATIC_VERBOSE") {
        config.verbose = matches!(v.trim(), "1" | "true");
    }

    for (name, slot) in [
        ("SCHEMATIC_PATH_CONFIG", &mut config.paths.config),
        ("SCHEMATIC_PATH_SECTIONS", &mut config.paths.sections),
        ("SCHEMATIC_PATH_SNIPPETS", &mut config.paths.snippets),
        ("SCHEMATIC_PATH_LOCALES", &mut config.paths.locales),
        ("SCHEMATIC_PATH_SCHEMA", &mut config.paths.schema),
    ] {
        if let Some(v) = get(name) {
            *slot = PathBuf::from(v.trim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    // ── Layering ────────────────────────────────────────────────────────

    #[test]
    fn defaults_are_verbose() {
        let config = Config::default();
        assert!(config.verbose);
        assert_eq!(config.paths.sections, PathBuf::from("./sections"));
    }

    #[test]
    fn rooted_joins_every_path() {
        let config = Config::rooted(Path::new("/theme"));
        assert_eq!(config.paths.config, PathBuf::from("/theme/config"));
        assert_eq!(config.paths.schema, PathBuf::from("/theme/src/schema"));
        assert_eq!(
            config.localization.file,
            PathBuf::from("/theme/snippets/p-app-localization.liquid")
        );
    }

    #[test]
    fn missing_project_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let project = load_project_config(&dir.path().join("schematic.toml")).unwrap();
        assert_eq!(project.paths.sections, PathBuf::from("./sections"));
    }

    #[test]
    fn unparseable_project_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schematic.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();
        let result = load_project_config(&path);
        assert!(matches!(
            result,
            Err(SchematicError::ConfigParse { .. })
        ));
    }

    // ── Environment overrides ───────────────────────────────────────────

    #[test]
    fn env_paths_override_when_set() {
        let mut config = Config::default();
        apply_env(
            &mut config,
            env_from(&[("SCHEMATIC_PATH_SCHEMA", " ./defs ")]),
        );
        assert_eq!(config.paths.schema, PathBuf::from("./defs"));
        assert_eq!(config.paths.sections, PathBuf::from("./sections"));
    }

    #[test]
    fn env_verbose_accepts_truthy_values_only() {
        let mut config = Config::default();
        apply_env(&mut config, env_from(&[("SCHEMATIC_VERBOSE", "0")]));
        assert!(!config.verbose);

        apply_env(&mut config, env_from(&[("SCHEMATIC_VERBOSE", "true")]));
        assert!(config.verbose);

        apply_env(&mut config, env_from(&[("SCHEMATIC_VERBOSE", "yes")]));
        assert!(!config.verbose);
    }

    #[test]
    fn env_unset_leaves_config_alone() {
        let mut config = Config::default();
        config.verbose = false;
        apply_env(&mut config, env_from(&[]));
        assert!(!config.verbose);
        assert_eq!(config.paths.locales, PathBuf::from("./locales"));
    }

    // ── Path precheck ───────────────────────────────────────────────────

    #[test]
    fn ensure_paths_collects_every_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sections")).unwrap();
        std::fs::create_dir_all(dir.path().join("snippets")).unwrap();

        let config = Config::rooted(dir.path());
        let err = config.ensure_paths().unwrap_err();
        match err {
            SchematicError::MissingPaths { missing } => {
                assert_eq!(missing.len(), 3);
                assert!(missing[0].starts_with("config:"));
                assert!(missing[1].starts_with("locales:"));
                assert!(missing[2].starts_with("schema:"));
            }
            other => panic!("expected MissingPaths, got {other:?}"),
        }
    }

    #[test]
    fn ensure_paths_passes_on_complete_theme() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["config", "sections", "snippets", "locales", "src/schema"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        let config = Config::rooted(dir.path());
        assert!(config.ensure_paths().is_ok());
    }
}
