//! Helpers for draft-3 qualified identifiers such as `#step1.output`.

const FRAGMENT_MARKER: char = '#';

/// Last dot-delimited segment of an identifier, without the fragment marker.
pub fn local_name(id: &str) -> &str {
    let bare = strip_marker(id);
    bare.rsplit('.').next().unwrap_or(bare)
}

/// Slash-separated reference form of an identifier: `#tool.out` becomes `tool/out`.
pub fn as_reference(id: &str) -> String {
    strip_marker(id).replace('.', "/")
}

fn strip_marker(id: &str) -> &str {
    id.strip_prefix(FRAGMENT_MARKER).unwrap_or(id)
}

/// Scatter targets keep only the segment after the last dot.
pub fn scatter_name(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}
