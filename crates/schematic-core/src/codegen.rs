use serde_json::Value;

use crate::definition::Definition;
use crate::directive::Directive;

/// Render the `{%- render %}` invocation block for a section: one binding
/// line per settings entry with a non-empty string `id`, plus a single
/// `blocks: section.blocks` line when the definition carries a non-null
/// `blocks` key. Blocks are never enumerated individually.
///
/// The last line re-opens the directive comment so the rewrite in
/// [`write_code`] leaves the directive's own text intact.
pub fn render_invocation(name: &str, definition: &Definition) -> String {
    let mut lines = Vec::new();

    if let Some(settings) = definition.get("settings").and_then(Value::as_array) {
        for setting in settings {
            if let Some(id) = setting.get("id").and_then(Value::as_str) {
                if !id.is_empty() {
                    lines.push(format!("{id}: section.settings.{id}"));
                }
            }
        }
    }

    if definition.get("blocks").is_some_and(|blocks| !blocks.is_null()) {
        lines.push("blocks: section.blocks".to_string());
    }

    let mut rendered = String::new();
    for line in &lines {
        rendered.push_str("    ");
        rendered.push_str(line);
        rendered.push('\n');
    }

    format!("{{%-\n\n  render '{name}'\n{rendered}\n-%}}\n{{%- comment -%}} schematic")
}

/// Rewrite everything from the start of the template through the directive's
/// `schematic` keyword with the generated invocation block.
///
/// Destructive and position-dependent: content above the directive is gone.
/// The directive's name, options and closing tag survive verbatim after the
/// re-opened comment, so the next run re-anchors on them.
pub fn write_code(text: &str, directive: &Directive, name: &str, definition: &Definition) -> String {
    let invocation = render_invocation(name, definition);

    let mut out = String::with_capacity(invocation.len() + text.len() - directive.keyword_end);
    out.push_str(&invocation);
    out.push_str(&text[directive.keyword_end..]);
    out
}
