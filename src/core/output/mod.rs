//! Final shaping of an upgraded document into text.

pub mod emitter;

use crate::core::document::{Node, Scalar};
use regex::Regex;
use std::sync::OnceLock;

pub use emitter::to_yaml_string;

/// Root keys in the order they are written. Anything else follows, in its
/// original order.
pub const ROOT_KEY_ORDER: [&str; 13] = [
    "class",
    "cwlVersion",
    "doc",
    "requirements",
    "hints",
    "inputs",
    "steps",
    "expression",
    "outputs",
    "baseCommand",
    "arguments",
    "stdin",
    "stdout",
];

/// Multi-line strings at least this many characters long become literal blocks.
pub const LITERAL_MIN_CHARS: usize = 72;

const OMAP_TAG: &str = "!!omap";

/// Order, mark and serialize an upgraded document.
pub fn assemble(doc: Node) -> String {
    let mut doc = order_root_keys(doc);
    wrap_long_strings(&mut doc);
    tidy_serialized(&to_yaml_string(&doc))
}

pub fn order_root_keys(doc: Node) -> Node {
    let Node::Mapping(mut map) = doc else {
        return doc;
    };
    map.sort_by(|left, _, right, _| root_rank(left).cmp(&root_rank(right)));
    Node::Mapping(map)
}

fn root_rank(key: &str) -> usize {
    ROOT_KEY_ORDER
        .iter()
        .position(|known| *known == key)
        .unwrap_or(ROOT_KEY_ORDER.len())
}

/// Normalize line endings of every multi-line string and mark the long ones
/// as literal blocks.
pub fn wrap_long_strings(node: &mut Node) {
    match node {
        Node::Mapping(map) => map.values_mut().for_each(wrap_long_strings),
        Node::Sequence(items) => items.iter_mut().for_each(wrap_long_strings),
        Node::Scalar(scalar) => {
            if let Scalar::String(text) = scalar {
                if text.contains(['\n', '\r']) {
                    *scalar = wrap_text(text);
                }
            }
        }
    }
}

fn wrap_text(text: &str) -> Scalar {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string();
    let printable = !normalized
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\t');
    if printable && normalized.chars().count() >= LITERAL_MIN_CHARS {
        Scalar::Literal(normalized)
    } else {
        Scalar::String(normalized)
    }
}

fn literal_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"(?:^|[:-])\s*\|[-+0-9]*$").expect("valid literal header pattern"))
}

/// `!!omap` sitting as a tag: after a key or a sequence marker, ending the line.
fn omap_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(^\s*-|:) !!omap$").expect("valid omap tag pattern"))
}

/// Text cleanup after serialization: blank lines go away, `!!omap` tags are
/// dropped and, for documents written as an ordered-map sequence, the
/// column-zero sequence markers are removed. Literal block bodies pass
/// through untouched.
pub fn tidy_serialized(text: &str) -> String {
    let strip_markers = text
        .lines()
        .any(|line| line.trim_end() == OMAP_TAG || line.starts_with(&format!("{OMAP_TAG} ")));
    let mut out = String::with_capacity(text.len());
    let mut literal_owner: Option<usize> = None;

    for line in text.lines() {
        let indent = line.len() - line.trim_start().len();
        if let Some(owner) = literal_owner {
            if line.trim().is_empty() || indent > owner {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            literal_owner = None;
        }
        if line.trim().is_empty() || line.trim() == OMAP_TAG {
            continue;
        }

        let mut cleaned = omap_tag().replace(line, "$1").into_owned();
        if strip_markers && indent == 0 {
            if let Some(rest) = cleaned.strip_prefix("- ") {
                cleaned = rest.to_string();
            }
        }
        if literal_header().is_match(&cleaned) {
            literal_owner = Some(cleaned.len() - cleaned.trim_start().len());
        }
        out.push_str(&cleaned);
        out.push('\n');
    }

    // Trailing blank lines of a final literal block carry no content.
    let kept = out.trim_end_matches('\n').len();
    out.truncate(kept);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
