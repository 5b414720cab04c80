//! Literal rendering for output values and plain-text layout helpers.
//!
//! Output values are rendered in the configuration language's own syntax so
//! that a value printed after apply can be pasted back into a configuration:
//! quoted strings, bare numbers and booleans, `[...]` lists and `{...}` maps.

use crate::types::OutputValue;
use serde_json::Value;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

const INDENT: usize = 2;

/// Render every output as a `name = literal` line, ordered by name.
///
/// Sensitive values are rendered as-is; any redaction happens upstream.
pub fn format_output_values(outputs: &BTreeMap<String, OutputValue>) -> String {
    let mut out = String::new();
    for (name, output) in outputs {
        out.push_str(name);
        out.push_str(" = ");
        out.push_str(&format_value(&output.value, 0));
        out.push('\n');
    }
    out
}

/// Render a single value as a literal, nesting composite values by `indent`.
pub fn format_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if is_multiline(s) => format_heredoc(s, indent),
        Value::String(s) => quote_string(s),
        Value::Array(items) => format_list(items, indent),
        Value::Object(map) => {
            let entries: BTreeMap<&String, &Value> = map.iter().collect();
            format_map(&entries, indent)
        }
    }
}

fn format_list(items: &[Value], indent: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let pad = " ".repeat(indent + INDENT);
    let mut out = String::from("[\n");
    for item in items {
        out.push_str(&pad);
        out.push_str(&format_value(item, indent + INDENT));
        out.push_str(",\n");
    }
    out.push_str(&" ".repeat(indent));
    out.push(']');
    out
}

fn format_map(entries: &BTreeMap<&String, &Value>, indent: usize) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }

    let keys: Vec<String> = entries.keys().map(|k| quote_string(k)).collect();
    let key_width = keys.iter().map(|k| k.width()).max().unwrap_or(0);

    let pad = " ".repeat(indent + INDENT);
    let mut out = String::from("{\n");
    for (key, value) in keys.iter().zip(entries.values()) {
        out.push_str(&pad);
        out.push_str(key);
        out.push_str(&" ".repeat(key_width - key.width()));
        out.push_str(" = ");
        out.push_str(&format_value(value, indent + INDENT));
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

/// Strings with a line break before their final character read better as a
/// heredoc. A lone trailing newline stays in a quoted string.
fn is_multiline(s: &str) -> bool {
    s.strip_suffix('\n').unwrap_or(s).contains('\n')
}

/// Heredoc bodies always end in a newline, so a string without one is wrapped
/// in `chomp(...)` to keep the rendering exact.
fn format_heredoc(s: &str, indent: usize) -> String {
    match s.strip_suffix('\n') {
        Some(body) => heredoc(body, indent),
        None => format!("chomp({}\n{})", heredoc(s, indent), " ".repeat(indent)),
    }
}

fn heredoc(body: &str, indent: usize) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let marker = heredoc_marker(&lines);

    let mut out = format!("<<{}\n", marker);
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push_str(&marker);
    out
}

/// `EOT`, or `EOT1`, `EOT2`, ... when a body line would close the heredoc early
fn heredoc_marker(lines: &[&str]) -> String {
    let mut marker = "EOT".to_string();
    let mut n = 0;
    while lines.iter().any(|line| line.trim() == marker) {
        n += 1;
        marker = format!("EOT{}", n);
    }
    marker
}

/// Quote a string, escaping characters that would not survive a round trip
/// through the configuration parser (including template sequences).
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Word-wrap `text` to at most `width` display columns per line.
///
/// Existing line breaks are kept; a single word wider than `width` is left on
/// its own line rather than split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
