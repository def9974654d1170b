//! Markdown helpers for note content: task checkboxes, HTML rendering, and
//! export file names.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Options, Parser, html};

/// One `- [ ]` / `- [x]` line in a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Zero-based line index in the content.
    pub line: usize,
    pub checked: bool,
    /// Text after the checkbox.
    pub text: String,
}

/// Locate a task checkbox on `line`: byte offset of the state character and
/// whether it is checked.
fn task_marker(line: &str) -> Option<(usize, bool)> {
    let indent = line.len() - line.trim_start().len();
    let rest = line[indent..].as_bytes();
    if rest.len() < 5 || !matches!(rest[0], b'-' | b'*' | b'+') || rest[1] != b' ' || rest[2] != b'[' || rest[4] != b']'
    {
        return None;
    }
    let checked = match rest[3] {
        b' ' => false,
        b'x' | b'X' => true,
        _ => return None,
    };
    if rest.len() > 5 && !rest[5].is_ascii_whitespace() {
        return None;
    }
    Some((indent + 3, checked))
}

/// Every task line in `content`.
#[must_use]
pub fn task_items(content: &str) -> Vec<TaskItem> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(line, text)| {
            let (pos, checked) = task_marker(text)?;
            Some(TaskItem { line, checked, text: text[pos + 2..].trim().to_owned() })
        })
        .collect()
}

/// Set the checkbox on `line` to `checked`, leaving every other byte alone.
///
/// Returns `None` when the line does not exist or holds no checkbox.
#[must_use]
pub fn toggle_task(content: &str, line: usize, checked: bool) -> Option<String> {
    let mut offset = 0;
    for (index, text) in content.split('\n').enumerate() {
        if index == line {
            let (pos, current) = task_marker(text)?;
            if current == checked {
                return Some(content.to_owned());
            }
            let at = offset + pos;
            let mut out = content.to_owned();
            out.replace_range(at..=at, if checked { "x" } else { " " });
            return Some(out);
        }
        offset += text.len() + 1;
    }
    None
}

/// Render note content to HTML (tables, task lists, strikethrough enabled).
#[must_use]
pub fn render_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

const MAX_SLUG_LEN: usize = 48;

/// PNG file name for an exported note, derived from its first non-empty line.
#[must_use]
pub fn export_file_name(content: &str) -> String {
    let title = content
        .lines()
        .map(|l| l.trim().trim_start_matches('#').trim())
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let mut slug = String::new();
    for c in title.chars() {
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() { "note.png".to_owned() } else { format!("{slug}.png") }
}
