//! Block-style YAML writer for document trees.
//!
//! Output is deterministic: mapping order is preserved, nested collections are
//! indented two spaces under their parent and long scalars are never folded.

use crate::core::document::{Mapping, Node, Scalar};
use serde_yaml::Value;

const INDENT: usize = 2;
const FLOW_INDICATORS: &str = ",[]{}#&*!|>'\"%@`";

/// Serialize `node` as block-style YAML text ending in a newline.
pub fn to_yaml_string(node: &Node) -> String {
    let mut out = String::new();
    match node {
        Node::Mapping(map) if !map.is_empty() => write_mapping(&mut out, map, 0, false),
        Node::Sequence(items) if !items.is_empty() => write_sequence(&mut out, items, 0, false),
        other => {
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
    out
}

/// `inline_first` means the caller already wrote the line prefix (`- `).
fn write_mapping(out: &mut String, map: &Mapping, indent: usize, inline_first: bool) {
    for (position, (key, value)) in map.iter().enumerate() {
        if position > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str(&string_text(key));
        out.push(':');
        write_value(out, value, indent);
    }
}

fn write_sequence(out: &mut String, items: &[Node], indent: usize, inline_first: bool) {
    for (position, item) in items.iter().enumerate() {
        if position > 0 || !inline_first {
            pad(out, indent);
        }
        out.push('-');
        match item {
            Node::Mapping(map) if !map.is_empty() => {
                out.push(' ');
                write_mapping(out, map, indent + INDENT, true);
            }
            Node::Sequence(inner) if !inner.is_empty() => {
                out.push(' ');
                write_sequence(out, inner, indent + INDENT, true);
            }
            other => write_value(out, other, indent),
        }
    }
}

/// Write the value that follows `key:` on a line indented by `indent`.
fn write_value(out: &mut String, value: &Node, indent: usize) {
    match value {
        Node::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            write_mapping(out, map, indent + INDENT, false);
        }
        Node::Sequence(items) if !items.is_empty() => {
            out.push('\n');
            write_sequence(out, items, indent + INDENT, false);
        }
        Node::Scalar(Scalar::Literal(text)) => write_literal(out, text, indent + INDENT),
        other => {
            out.push(' ');
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
}

fn write_literal(out: &mut String, text: &str, indent: usize) {
    out.push_str(" |-\n");
    for line in text.lines() {
        if !line.is_empty() {
            pad(out, indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn inline_text(node: &Node) -> String {
    match node {
        Node::Mapping(_) => "{}".to_string(),
        Node::Sequence(_) => "[]".to_string(),
        Node::Scalar(Scalar::Null) => "null".to_string(),
        Node::Scalar(Scalar::Bool(flag)) => flag.to_string(),
        Node::Scalar(Scalar::Number(number)) => number.to_string(),
        Node::Scalar(Scalar::String(text)) | Node::Scalar(Scalar::Literal(text)) => {
            string_text(text)
        }
    }
}

/// Plain text when a YAML reader would get the same string back, double-quoted otherwise.
pub(crate) fn string_text(text: &str) -> String {
    if is_plain_safe(text) {
        text.to_string()
    } else {
        serde_json::Value::from(text).to_string()
    }
}

fn is_plain_safe(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if FLOW_INDICATORS.contains(first) || text.trim() != text {
        return false;
    }
    if text.chars().any(char::is_control) {
        return false;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(text), Ok(Value::String(parsed)) if parsed == text)
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}
