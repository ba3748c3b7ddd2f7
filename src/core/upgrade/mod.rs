//! draft-3 to v1.0 document rewrites.

use crate::core::document::{Mapping, Node};

mod command_line_tool;
mod error;
pub mod identifiers;
mod pipeline;
pub mod type_syntax;
pub mod workflow;

pub use command_line_tool::CommandLineToolUpgrade;
pub use error::UpgradeError;
pub use pipeline::upgrade_document;
pub use workflow::{Context, WorkflowUpgrade};

/// `cwlVersion` stamped on every upgraded document.
pub const TARGET_VERSION: &str = "v1.0";

/// Pure rewrite of one loaded document.
pub trait DocumentTransform {
    fn name(&self) -> &'static str;
    fn transform(&self, doc: Node) -> Result<Node, UpgradeError>;
}

/// Rename `from` to `to` keeping the entry's position. An existing `to` entry
/// keeps its own position and takes the moved value.
pub(crate) fn rename_key(map: &mut Mapping, from: &str, to: &str) {
    let Some((index, _, value)) = map.shift_remove_full(from) else {
        return;
    };
    if map.contains_key(to) {
        map.insert(to.to_string(), value);
    } else {
        map.shift_insert(index, to.to_string(), value);
    }
}

/// Remove `key` when it holds a string and return that string.
pub(crate) fn take_string(map: &mut Mapping, key: &str) -> Option<String> {
    let text = map.get(key).and_then(Node::as_str)?.to_string();
    map.shift_remove(key);
    Some(text)
}
