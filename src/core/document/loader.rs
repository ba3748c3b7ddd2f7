use crate::core::document::Node;
use crate::core::upgrade::UpgradeError;
use serde_yaml::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load a document from a file on disk.
pub fn load_path(path: &Path) -> Result<Node, UpgradeError> {
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| UpgradeError::Read {
        origin: origin.clone(),
        source,
    })?;
    parse(&text, &origin)
}

/// Load a document from an already-open reader such as stdin.
pub fn load_reader<R: Read>(mut reader: R, origin: &str) -> Result<Node, UpgradeError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| UpgradeError::Read {
            origin: origin.to_string(),
            source,
        })?;
    parse(&text, origin)
}

/// Load a document held in memory.
pub fn load_str(text: &str) -> Result<Node, UpgradeError> {
    parse(text, "<string>")
}

fn parse(text: &str, origin: &str) -> Result<Node, UpgradeError> {
    let value: Value = serde_yaml::from_str(text).map_err(|source| UpgradeError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    if value.is_null() {
        return Err(UpgradeError::EmptyDocument {
            origin: origin.to_string(),
        });
    }
    Ok(Node::from(value))
}
