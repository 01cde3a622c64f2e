use std::path::Path;

use crate::diff::unified_diff;
use crate::error::{Result, SchematicError};

/// Result of writing one generated artifact.
#[derive(Debug)]
pub enum WriteOutcome {
    /// Content changed and was written.
    Written,
    /// Target already held identical content; the write was skipped and
    /// its mtime left alone.
    Unchanged,
    /// Dry run: the unified diff a real run would apply.
    WouldWrite(String),
}

/// Write `content` to `path` unless the file already holds exactly that
/// content. In a dry run nothing is written and the diff is returned.
pub fn write_if_changed(path: &Path, content: &str, dry_run: bool) -> Result<WriteOutcome> {
    let current = match std::fs::read_to_string(path) {
        Ok(existing) => Some(existing),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(SchematicError::Io {
                context: format!("reading {}", path.display()),
                source: e,
            })
        }
    };

    if current.as_deref() == Some(content) {
        return Ok(WriteOutcome::Unchanged);
    }

    if dry_run {
        let old = current.unwrap_or_default();
        return Ok(WriteOutcome::WouldWrite(unified_diff(&old, content, path)));
    }

    std::fs::write(path, content).map_err(|e| SchematicError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;

    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let outcome = write_if_changed(&path, "{}", false).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "{}").unwrap();

        let outcome = write_if_changed(&path, "{}", false).unwrap();
        assert!(matches!(outcome, WriteOutcome::Unchanged));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let outcome = write_if_changed(&path, "{}", true).unwrap();
        assert!(matches!(outcome, WriteOutcome::WouldWrite(_)));
        assert!(!path.exists());
    }

    #[test]
    fn dry_run_diff_shows_the_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old\n").unwrap();

        match write_if_changed(&path, "new\n", true).unwrap() {
            WriteOutcome::WouldWrite(diff) => {
                assert!(diff.contains("-old"));
                assert!(diff.contains("+new"));
            }
            other => panic!("expected WouldWrite, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }
}
