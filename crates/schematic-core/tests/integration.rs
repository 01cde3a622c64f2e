use std::path::{Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use schematic_core::artifact::WriteOutcome;
use schematic_core::check::check_theme;
use schematic_core::config::Config;
use schematic_core::error::{Result, SchematicError};
use schematic_core::locales::LocalizationOutcome;
use schematic_core::scaffold::scaffold;
use schematic_core::settings::SettingsOutcome;
use schematic_core::transform::SectionOutcome;
use schematic_core::{build, BuildOptions, BuildReport};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

fn copy_tree(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Copy the fixture theme into a fresh tempdir and root a config at it.
fn sandbox() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    copy_tree(&fixture_path("theme"), dir.path());
    let config = Config::rooted(dir.path());
    (dir, config)
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

fn section_result<'a>(report: &'a BuildReport, file_name: &str) -> &'a Result<SectionOutcome> {
    let section = report
        .sections
        .iter()
        .find(|r| r.path.file_name().and_then(|n| n.to_str()) == Some(file_name))
        .unwrap_or_else(|| panic!("no section report for {file_name}"));
    &section.result
}

/// Every file under `root` with its content, sorted by relative path.
fn tree_snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, std::fs::read(entry.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

const HERO_AFTER: &str = r#"{%- comment -%} schematic {%- endcomment -%}
<section class="hero">
  <h1>{{ section.settings.heading }}</h1>
</section>

{% schema %}
{
  "name": "Hero",
  "settings": [
    {
      "type": "text",
      "id": "heading",
      "label": "Heading"
    }
  ],
  "enabled_on": {
    "templates": [
      "index",
      "product"
    ]
  }
}
{% endschema %}"#;

const FEATURE_AFTER: &str = r#"{%-

  render 'feature'
    title: section.settings.title
    link: section.settings.link
    blocks: section.blocks

-%}
{%- comment -%} schematic feature writeCode {%- endcomment -%}
<section class="feature">
  {% render 'feature-card' %}
</section>

{% schema %}
{
  "name": "Feature",
  "tag": "section",
  "settings": [
    {
      "type": "text",
      "id": "title",
      "label": "Title"
    },
    {
      "type": "header",
      "content": "Layout"
    },
    {
      "type": "url",
      "id": "link",
      "label": "Link"
    }
  ],
  "blocks": [
    {
      "type": "@app"
    }
  ]
}
{% endschema %}"#;

const SNIPPET_AFTER: &str = r#"<script>
  {%- comment -%} schematicLocalization {%- endcomment -%}
window.app.copy = {
  "general.title": {{ 'general.title' | t | json }},
  "general.close": {{ 'general.close' | t | json }},
  "cart.checkout": {{ 'cart.checkout' | t | json }}
};
</script>
"#;

#[test]
fn test_full_build_transforms_the_theme() {
    let (dir, config) = sandbox();

    let report = build(&config, BuildOptions::default()).unwrap();
    assert!(report.is_success(), "build should succeed: {report:?}");

    // Check the schema block was appended with the legacy key migrated
    assert_eq!(read(dir.path(), "sections/hero.liquid"), HERO_AFTER);

    // Check the writeCode rewrite plus the appended schema block
    assert_eq!(read(dir.path(), "sections/feature.liquid"), FEATURE_AFTER);

    // Check a directiveless template was left byte for byte alone
    assert_eq!(
        read(dir.path(), "sections/plain.liquid"),
        "<div class=\"plain\">\n  Static markup only.\n</div>\n"
    );

    // Check the settings artifact was compiled into the config directory
    assert_eq!(
        read(dir.path(), "config/settings_schema.json"),
        "{\n  \"name\": \"theme_info\",\n  \"theme_name\": \"Fixture Theme\",\n  \"theme_version\": \"1.0.0\",\n  \"theme_author\": \"Fixture\"\n}"
    );

    // Check the stale locale artifact was replaced by the compiled source
    assert_eq!(
        read(dir.path(), "locales/en.default.json"),
        "{\n  \"general\": {\n    \"title\": \"Site title\",\n    \"close\": \"Close\"\n  },\n  \"cart\": {\n    \"checkout\": \"Check out\"\n  }\n}"
    );

    // Check the localization expression landed after the marker comment
    assert_eq!(
        read(dir.path(), "snippets/p-app-localization.liquid"),
        SNIPPET_AFTER
    );
}

#[test]
fn test_first_build_report_outcomes() {
    let (_dir, config) = sandbox();

    let report = build(&config, BuildOptions::default()).unwrap();

    assert!(matches!(
        report.settings,
        Ok(SettingsOutcome::Artifact(WriteOutcome::Written))
    ));
    assert_eq!(report.locales.len(), 1);
    assert!(matches!(report.locales[0].result, Ok(WriteOutcome::Written)));
    assert!(matches!(report.localization, Ok(LocalizationOutcome::Updated)));

    assert_eq!(report.sections.len(), 3);
    assert!(matches!(
        section_result(&report, "hero.liquid"),
        Ok(SectionOutcome::Updated)
    ));
    assert!(matches!(
        section_result(&report, "feature.liquid"),
        Ok(SectionOutcome::Updated)
    ));
    assert!(matches!(
        section_result(&report, "plain.liquid"),
        Ok(SectionOutcome::NoDirective)
    ));
}

#[test]
fn test_second_build_is_idempotent() {
    let (dir, config) = sandbox();

    build(&config, BuildOptions::default()).unwrap();
    let after_first = tree_snapshot(dir.path());

    let report = build(&config, BuildOptions::default()).unwrap();
    assert!(report.is_success());

    // Check nothing was rewritten
    assert_eq!(tree_snapshot(dir.path()), after_first);
    assert!(matches!(
        report.settings,
        Ok(SettingsOutcome::Artifact(WriteOutcome::Unchanged))
    ));
    assert!(matches!(report.locales[0].result, Ok(WriteOutcome::Unchanged)));
    assert!(matches!(
        report.localization,
        Ok(LocalizationOutcome::Unchanged)
    ));
    assert!(matches!(
        section_result(&report, "hero.liquid"),
        Ok(SectionOutcome::Unchanged)
    ));
    assert!(matches!(
        section_result(&report, "feature.liquid"),
        Ok(SectionOutcome::Unchanged)
    ));
}

#[test]
fn test_unchanged_files_keep_their_mtime() {
    let (dir, config) = sandbox();
    build(&config, BuildOptions::default()).unwrap();

    let hero = dir.path().join("sections/hero.liquid");
    let settings = dir.path().join("config/settings_schema.json");
    let stamp = FileTime::from_unix_time(946_684_800, 0);
    filetime::set_file_mtime(&hero, stamp).unwrap();
    filetime::set_file_mtime(&settings, stamp).unwrap();

    build(&config, BuildOptions::default()).unwrap();

    for path in [&hero, &settings] {
        let meta = std::fs::metadata(path).unwrap();
        assert_eq!(
            FileTime::from_last_modification_time(&meta),
            stamp,
            "{} should not have been rewritten",
            path.display()
        );
    }
}

#[test]
fn test_dry_run_leaves_the_tree_untouched() {
    let (dir, config) = sandbox();
    let before = tree_snapshot(dir.path());

    let report = build(
        &config,
        BuildOptions {
            files: Vec::new(),
            dry_run: true,
        },
    )
    .unwrap();

    assert_eq!(tree_snapshot(dir.path()), before);

    // Check the report still describes every pending change as a diff
    assert!(matches!(
        report.settings,
        Ok(SettingsOutcome::Artifact(WriteOutcome::WouldWrite(_)))
    ));
    assert!(matches!(
        report.locales[0].result,
        Ok(WriteOutcome::WouldWrite(_))
    ));
    assert!(matches!(
        report.localization,
        Ok(LocalizationOutcome::WouldUpdate(_))
    ));
    match section_result(&report, "hero.liquid") {
        Ok(SectionOutcome::WouldUpdate(diff)) => {
            assert!(diff.contains("+{% schema %}"));
        }
        other => panic!("expected WouldUpdate for hero.liquid, got {other:?}"),
    }
}

#[test]
fn test_explicit_file_list_limits_the_run() {
    let (dir, config) = sandbox();

    let report = build(
        &config,
        BuildOptions {
            files: vec!["feature.liquid".to_string()],
            dry_run: false,
        },
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(report.sections.len(), 1);
    assert_eq!(read(dir.path(), "sections/feature.liquid"), FEATURE_AFTER);

    // Check the unlisted section was not touched
    assert!(!read(dir.path(), "sections/hero.liquid").contains("{% schema %}"));
}

#[test]
fn test_definition_path_reference_back_resolves() {
    let (dir, config) = sandbox();
    let reference = dir.path().join("src/schema/feature.json");

    let report = build(
        &config,
        BuildOptions {
            files: vec![reference.to_string_lossy().into_owned()],
            dry_run: false,
        },
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.sections[0].path.file_name().and_then(|n| n.to_str()),
        Some("feature.liquid")
    );
    assert_eq!(read(dir.path(), "sections/feature.liquid"), FEATURE_AFTER);
}

#[test]
fn test_unknown_reference_is_a_settled_failure() {
    let (dir, config) = sandbox();

    let report = build(
        &config,
        BuildOptions {
            files: vec!["ghost.liquid".to_string()],
            dry_run: false,
        },
    )
    .unwrap();

    assert!(!report.is_success());
    assert!(matches!(
        report.sections[0].result,
        Err(SchematicError::SectionNotFound { .. })
    ));

    // Check the rest of the pipeline still ran
    assert!(dir.path().join("config/settings_schema.json").exists());
}

#[test]
fn test_unresolvable_name_falls_back_to_the_filename() {
    let (dir, config) = sandbox();
    std::fs::write(
        dir.path().join("sections/hero.liquid"),
        "{%- comment -%} schematic missing {%- endcomment -%}\n<div></div>\n",
    )
    .unwrap();

    let report = build(
        &config,
        BuildOptions {
            files: vec!["hero.liquid".to_string()],
            dry_run: false,
        },
    )
    .unwrap();

    assert!(report.is_success());
    let hero = read(dir.path(), "sections/hero.liquid");

    // The token named no definition, so hero.json was used and the token
    // became an option instead of triggering a rewrite.
    assert!(hero.contains("\"name\": \"Hero\""));
    assert!(!hero.contains("render 'hero'"));
}

#[test]
fn test_missing_definition_fails_only_that_section() {
    let (dir, config) = sandbox();
    std::fs::remove_file(dir.path().join("src/schema/feature.json")).unwrap();

    let report = build(&config, BuildOptions::default()).unwrap();

    assert!(!report.is_success());
    assert!(matches!(
        section_result(&report, "feature.liquid"),
        Err(SchematicError::DefinitionRead { .. })
    ));
    assert!(matches!(
        section_result(&report, "hero.liquid"),
        Ok(SectionOutcome::Updated)
    ));
    assert_eq!(read(dir.path(), "sections/hero.liquid"), HERO_AFTER);
}

#[test]
fn test_missing_optional_sources_are_not_errors() {
    let (dir, config) = sandbox();
    std::fs::remove_file(dir.path().join("src/schema/settings_schema.json")).unwrap();
    std::fs::remove_dir_all(dir.path().join("src/schema/locales")).unwrap();
    std::fs::remove_file(dir.path().join("snippets/p-app-localization.liquid")).unwrap();

    let report = build(&config, BuildOptions::default()).unwrap();

    assert!(report.is_success());
    assert!(matches!(report.settings, Ok(SettingsOutcome::MissingSource)));
    assert!(report.locales.is_empty());
    assert!(matches!(
        report.localization,
        Ok(LocalizationOutcome::MissingFile)
    ));
}

#[test]
fn test_missing_required_directory_fails_the_build() {
    let (dir, config) = sandbox();
    std::fs::remove_dir_all(dir.path().join("locales")).unwrap();

    let result = build(&config, BuildOptions::default());
    assert!(matches!(result, Err(SchematicError::MissingPaths { .. })));
}

#[test]
fn test_check_passes_on_the_fixture_theme() {
    let (_dir, config) = sandbox();

    let report = check_theme(&config);
    assert!(report.is_clean(), "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
}

#[test]
fn test_check_reports_missing_definition_without_mutating() {
    let (dir, config) = sandbox();
    std::fs::remove_file(dir.path().join("src/schema/feature.json")).unwrap();
    let before = tree_snapshot(dir.path());

    let report = check_theme(&config);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("feature.liquid"));
    assert_eq!(tree_snapshot(dir.path()), before);
}

#[test]
fn test_check_warns_on_a_missing_marker() {
    let (dir, config) = sandbox();
    std::fs::write(
        dir.path().join("snippets/p-app-localization.liquid"),
        "<script>no marker</script>\n",
    )
    .unwrap();

    let report = check_theme(&config);
    assert!(report.is_clean());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("No schematicLocalization marker")));
}

#[test]
fn test_scaffolded_section_builds_cleanly() {
    let (dir, config) = sandbox();

    let report = scaffold(&config, "promo").unwrap();
    assert_eq!(report.name, "promo");
    assert_eq!(report.created.len(), 3);
    assert!(report.skipped.is_empty());

    let build_report = build(&config, BuildOptions::default()).unwrap();
    assert!(build_report.is_success());

    // Check the boilerplate directive drove a full writeCode transform
    let promo = read(dir.path(), "sections/promo.liquid");
    assert!(promo.starts_with("{%-\n\n  render 'promo'\n"));
    assert!(promo.contains("    blocks: section.blocks\n"));
    assert!(promo.contains("{% schema %}"));
    assert!(promo.contains("\"name\": \"Boilerplate\""));
}
