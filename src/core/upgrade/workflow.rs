//! Recursive rewrite for `Workflow` documents.
//!
//! The same key means different things depending on where it sits: `inputs`
//! under a step is the step's wiring (`in`), while `inputs` at the root is the
//! workflow's own parameter list. Every rewrite therefore receives the
//! [`Context`] of the node it is visiting, passed by value.

use crate::core::document::{Mapping, Node, Scalar};
use crate::core::upgrade::identifiers::{as_reference, local_name, scatter_name};
use crate::core::upgrade::type_syntax::{
    normalize_members, normalize_type, optional_member, optional_of,
};
use crate::core::upgrade::{upgrade_document, DocumentTransform, UpgradeError, TARGET_VERSION};

/// Syntactic position of the node being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    Default,
    /// A type specification.
    Type,
    /// The body of a workflow step.
    Steps,
    /// A step's input wiring.
    InStep,
    /// A step's declared outputs.
    OutStep,
    /// The workflow's own outputs.
    Outputs,
}

pub struct WorkflowUpgrade;

impl DocumentTransform for WorkflowUpgrade {
    fn name(&self) -> &'static str {
        "WorkflowUpgrade"
    }

    fn transform(&self, doc: Node) -> Result<Node, UpgradeError> {
        let mut upgraded = transform(doc, Context::Default)?;
        if let Some(root) = upgraded.as_mapping_mut() {
            root.entry("cwlVersion".to_string())
                .or_insert_with(|| Node::from(TARGET_VERSION));
        }
        Ok(upgraded)
    }
}

/// Rewrite `node` as seen from `ctx`.
pub fn transform(node: Node, ctx: Context) -> Result<Node, UpgradeError> {
    if ctx == Context::Type {
        return normalize_members(node, &mut |part| rewrite(part, Context::Type));
    }
    rewrite(node, ctx)
}

fn rewrite(node: Node, ctx: Context) -> Result<Node, UpgradeError> {
    match node {
        Node::Sequence(items) => transform_sequence(items, ctx),
        Node::Mapping(map) => transform_mapping(map, ctx).map(Node::Mapping),
        Node::Scalar(Scalar::String(text)) => Ok(Node::string(text.trim_end())),
        scalar => Ok(scalar),
    }
}

/// Outcome of rewriting one list element.
enum Entry {
    /// An element that carried an `id`, now addressed by its local name.
    Keyed(String, Node),
    Item(Node),
}

fn transform_sequence(items: Vec<Node>, ctx: Context) -> Result<Node, UpgradeError> {
    if items.iter().any(Node::is_null_marker) {
        if let Some(member) = optional_member(&items) {
            if let Some(shorthand) = optional_of(&transform(member.clone(), ctx)?) {
                return Ok(shorthand);
            }
        }
        return items
            .into_iter()
            .map(|item| transform(item, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Sequence);
    }

    let mut rewritten = Vec::with_capacity(items.len());
    for item in items {
        rewritten.push(match rewrite_element(item, ctx)? {
            Entry::Keyed(name, value) => Node::Mapping(Mapping::from([(name, value)])),
            Entry::Item(node) => node,
        });
    }
    Ok(Node::Sequence(rewritten))
}

fn rewrite_element(item: Node, ctx: Context) -> Result<Entry, UpgradeError> {
    let Node::Mapping(mut element) = item else {
        return transform(item, ctx).map(Entry::Item);
    };
    let name = element
        .get("id")
        .and_then(Node::as_str)
        .map(|id| local_name(id).to_string());
    let Some(name) = name else {
        return transform(Node::Mapping(element), ctx).map(Entry::Item);
    };

    match ctx {
        Context::InStep if element.contains_key("source") => step_input(name, element),
        Context::Outputs if element.contains_key("source") => workflow_output(name, element),
        Context::OutStep => Ok(Entry::Item(Node::string(name))),
        _ => {
            element.shift_remove("id");
            let value = transform_mapping(element, ctx)?;
            Ok(Entry::Keyed(name, Node::Mapping(value)))
        }
    }
}

/// `{id, source}` collapses to `name: source`; anything else keeps the long form.
fn step_input(name: String, mut element: Mapping) -> Result<Entry, UpgradeError> {
    element.shift_remove("id");
    let shorthand = element.len() == 1
        && !element.contains_key("valueFrom")
        && !element.contains_key("secondaryFiles");
    if shorthand {
        let source = element.shift_remove("source").unwrap_or_default();
        return Ok(Entry::Keyed(name, rewrite_source(source)));
    }
    let value = transform_mapping(element, Context::InStep)?;
    Ok(Entry::Keyed(name, Node::Mapping(value)))
}

fn workflow_output(name: String, mut element: Mapping) -> Result<Entry, UpgradeError> {
    element.shift_remove("id");
    let source = element.shift_remove("source").unwrap_or_default();
    let mut value = transform_mapping(element, Context::Outputs)?;
    value.insert("outputSource".to_string(), rewrite_source(source));
    Ok(Entry::Keyed(name, Node::Mapping(value)))
}

/// Rewrite a list of id-carrying objects into one mapping keyed by local name.
/// Values that are already mappings are rewritten entry by entry.
fn keyed_entries(block: &str, node: Node, ctx: Context) -> Result<Node, UpgradeError> {
    match node {
        Node::Sequence(items) => {
            let mut keyed = Mapping::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match rewrite_element(item, ctx)? {
                    Entry::Keyed(name, value) => {
                        keyed.insert(name, value);
                    }
                    Entry::Item(Node::Mapping(single)) if single.len() == 1 => keyed.extend(single),
                    Entry::Item(_) => return Err(UpgradeError::missing_field(block, index, "id")),
                }
            }
            Ok(Node::Mapping(keyed))
        }
        Node::Mapping(map) => {
            let mut keyed = Mapping::with_capacity(map.len());
            for (name, value) in map {
                keyed.insert(name, transform(value, ctx)?);
            }
            Ok(Node::Mapping(keyed))
        }
        Node::Scalar(_) => Err(UpgradeError::unexpected_shape(
            block,
            0,
            "a list or a mapping",
        )),
    }
}

fn transform_mapping(map: Mapping, ctx: Context) -> Result<Mapping, UpgradeError> {
    let mut out = Mapping::with_capacity(map.len());
    for (key, value) in map {
        match key.as_str() {
            "cwlVersion" => {
                out.insert(key, Node::from(TARGET_VERSION));
            }
            "run" => {
                out.insert(key, unwrap_run(value)?);
            }
            "description" => {
                out.insert("doc".to_string(), collapse_description(value));
            }
            "steps" => {
                out.insert(key, keyed_entries("steps", value, Context::Steps)?);
            }
            "source" if ctx == Context::InStep => {
                out.insert(key, rewrite_source(value));
            }
            _ if ctx == Context::Steps => match key.as_str() {
                "outputs" => {
                    out.insert("out".to_string(), transform(value, Context::OutStep)?);
                }
                "inputs" => {
                    out.insert("in".to_string(), keyed_entries("in", value, Context::InStep)?);
                }
                "scatter" => {
                    out.insert(key, scatter_targets(value));
                }
                _ => {
                    out.insert(key, transform(value, ctx)?);
                }
            },
            "outputs" => {
                out.insert(key, keyed_entries("outputs", value, Context::Outputs)?);
            }
            "inputs" => {
                out.insert(key, keyed_entries("inputs", value, ctx)?);
            }
            "type" => {
                out.insert(key, transform_type(value)?);
            }
            _ => {
                out.insert(key, transform(value, ctx)?);
            }
        }
    }
    Ok(out)
}

fn transform_type(value: Node) -> Result<Node, UpgradeError> {
    normalize_type(value, &mut |part| rewrite(part, Context::Type))
}

/// `run` holds either a path, an `import`-style single-entry mapping whose
/// value is the path, or an inline process that is upgraded on its own.
fn unwrap_run(value: Node) -> Result<Node, UpgradeError> {
    match value {
        Node::Mapping(map) if map.contains_key("class") => upgrade_document(Node::Mapping(map)),
        Node::Mapping(map) if map.len() == 1 => {
            Ok(map.into_iter().next().map(|(_, inner)| inner).unwrap_or_default())
        }
        other => Ok(other),
    }
}

fn collapse_description(value: Node) -> Node {
    match value.as_str() {
        Some(text) => Node::string(text.replace('\n', " ").trim_end()),
        None => value,
    }
}

fn rewrite_source(source: Node) -> Node {
    match source {
        Node::Scalar(Scalar::String(id)) => Node::string(as_reference(&id)),
        Node::Sequence(ids) => Node::Sequence(ids.into_iter().map(rewrite_source).collect()),
        other => other,
    }
}

fn scatter_targets(value: Node) -> Node {
    match value {
        Node::Scalar(Scalar::String(id)) => Node::string(scatter_name(&id)),
        Node::Sequence(ids) => Node::Sequence(ids.into_iter().map(scatter_targets).collect()),
        other => other,
    }
}
