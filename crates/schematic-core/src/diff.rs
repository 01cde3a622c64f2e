use std::path::Path;

/// Unified diff between two versions of a file, for dry-run reporting.
pub fn unified_diff(old: &str, new: &str, path: &Path) -> String {
    use similar::TextDiff;

    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!(
        "--- a/{}\n+++ b/{}\n",
        path.display(),
        path.display()
    ));

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        output.push_str(&format!("{hunk}"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_carries_both_sides() {
        let diff = unified_diff("a\nb\n", "a\nc\n", Path::new("sections/hero.liquid"));
        assert!(diff.starts_with("--- a/sections/hero.liquid\n+++ b/sections/hero.liquid\n"));
        assert!(diff.contains("-b"));
        assert!(diff.contains("+c"));
    }

    #[test]
    fn identical_content_has_no_hunks() {
        let diff = unified_diff("same\n", "same\n", Path::new("x"));
        assert_eq!(diff, "--- a/x\n+++ b/x\n");
    }
}
