use crate::core::document::{Mapping, Node};
use crate::core::upgrade::identifiers::local_name;
use crate::core::upgrade::type_syntax::normalize_field_type;
use crate::core::upgrade::{
    rename_key, take_string, DocumentTransform, UpgradeError, TARGET_VERSION,
};
use std::mem;

/// Single-pass rewrite for leaf process documents (`CommandLineTool`,
/// `ExpressionTool`): field lists become id-keyed mappings and
/// hint/requirement lists become class-keyed mappings.
pub struct CommandLineToolUpgrade;

impl DocumentTransform for CommandLineToolUpgrade {
    fn name(&self) -> &'static str {
        "CommandLineToolUpgrade"
    }

    fn transform(&self, doc: Node) -> Result<Node, UpgradeError> {
        let Node::Mapping(mut doc) = doc else {
            return Err(UpgradeError::MissingClass);
        };
        rename_key(&mut doc, "description", "doc");

        for block in ["inputs", "outputs"] {
            if let Some(fields) = doc.get_mut(block) {
                *fields = key_fields(block, mem::take(fields))?;
            }
        }
        for block in ["hints", "requirements"] {
            if let Some(entries) = doc.get_mut(block) {
                *entries = key_by_class(block, mem::take(entries))?;
            }
        }

        doc.insert("cwlVersion".to_string(), Node::from(TARGET_VERSION));
        Ok(Node::Mapping(doc))
    }
}

fn key_fields(block: &str, fields: Node) -> Result<Node, UpgradeError> {
    let Node::Sequence(items) = fields else {
        return Ok(fields);
    };
    let mut keyed = Mapping::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Node::Mapping(mut field) = item else {
            return Err(UpgradeError::unexpected_shape(block, index, "a mapping"));
        };
        let id = take_string(&mut field, "id")
            .ok_or_else(|| UpgradeError::missing_field(block, index, "id"))?;
        if let Some(ty) = field.get_mut("type") {
            *ty = normalize_field_type(mem::take(ty));
        }
        rename_key(&mut field, "description", "doc");
        keyed.insert(local_name(&id).to_string(), Node::Mapping(field));
    }
    Ok(Node::Mapping(keyed))
}

fn key_by_class(block: &str, entries: Node) -> Result<Node, UpgradeError> {
    let Node::Sequence(items) = entries else {
        return Ok(entries);
    };
    let mut keyed = Mapping::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Node::Mapping(mut entry) = item else {
            return Err(UpgradeError::unexpected_shape(block, index, "a mapping"));
        };
        let class = take_string(&mut entry, "class")
            .ok_or_else(|| UpgradeError::missing_field(block, index, "class"))?;
        keyed.insert(class, Node::Mapping(entry));
    }
    Ok(Node::Mapping(keyed))
}
