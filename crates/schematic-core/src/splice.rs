//! Span-based replace-or-append of `{% tag %}`-delimited blocks.

use std::ops::Range;

/// Match one `{% word %}` tag at `start`. Trim dashes are optional, inner
/// whitespace is free-form and the word compares ASCII-case-insensitively.
/// Returns the offset just past the closing `%}`.
fn match_tag_at(bytes: &[u8], start: usize, word: &[u8]) -> Option<usize> {
    let mut i = start;
    if bytes.len() < i + 2 || &bytes[i..i + 2] != b"{%" {
        return None;
    }
    i += 2;

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }

    for &w in word {
        if !bytes.get(i).is_some_and(|b| b.eq_ignore_ascii_case(&w)) {
            return None;
        }
        i += 1;
    }

    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }

    if bytes.len() >= i + 2 && &bytes[i..i + 2] == b"%}" {
        Some(i + 2)
    } else {
        None
    }
}

/// First `{% word %}` tag starting at or after `from`.
pub fn find_tag_from(text: &str, word: &str, from: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let word = word.as_bytes();

    let mut pos = from;
    while pos + 1 < bytes.len() {
        if bytes[pos] == b'{' {
            if let Some(end) = match_tag_at(bytes, pos, word) {
                return Some(pos..end);
            }
        }
        pos += 1;
    }
    None
}

/// First `{% word %}` tag in the text.
pub fn find_tag(text: &str, word: &str) -> Option<Range<usize>> {
    find_tag_from(text, word, 0)
}

/// Last `{% word %}` tag starting at or after `from`.
fn rfind_tag_from(text: &str, word: &str, from: usize) -> Option<Range<usize>> {
    let mut last = None;
    let mut pos = from;
    while let Some(range) = find_tag_from(text, word, pos) {
        pos = range.end;
        last = Some(range);
    }
    last
}

/// Canonical block form: `{% open %}` and `{% close %}` around the content.
pub fn render_block(open_word: &str, close_word: &str, content: &str) -> String {
    format!("{{% {open_word} %}}\n{content}\n{{% {close_word} %}}")
}

/// Replace the region from the first open tag through the last close tag
/// after it with the canonical block, or append the block at end of text
/// when no such region exists.
///
/// Every byte outside the region is untouched. A region spanning duplicated
/// blocks collapses into a single canonical one, which also makes the
/// operation idempotent.
pub fn splice_block(text: &str, open_word: &str, close_word: &str, content: &str) -> String {
    let block = render_block(open_word, close_word, content);

    let region = find_tag(text, open_word).and_then(|open| {
        rfind_tag_from(text, close_word, open.end).map(|close| open.start..close.end)
    });

    match region {
        Some(region) => {
            let mut out = String::with_capacity(text.len() + block.len());
            out.push_str(&text[..region.start]);
            out.push_str(&block);
            out.push_str(&text[region.end..]);
            out
        }
        None => format!("{text}\n{block}"),
    }
}
