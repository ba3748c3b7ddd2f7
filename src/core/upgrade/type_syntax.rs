//! Type specification shorthand: `[null, T]` becomes `T?`, `{type: array, items: T}` becomes `T[]`.

use crate::core::document::{Mapping, Node};

const OPTIONAL_SUFFIX: &str = "?";
const ARRAY_SUFFIX: &str = "[]";

/// Normalize a type specification, keeping the original when the shorthand
/// would carry a nested optional such as `string?[]`.
///
/// `rest` rewrites everything the shorthand does not cover: records, enums,
/// wrappers whose items stay structured, unions without `null` and scalars.
pub fn normalize_type<F, E>(spec: Node, rest: &mut F) -> Result<Node, E>
where
    F: FnMut(Node) -> Result<Node, E>,
{
    let normalized = normalize_members(spec.clone(), rest)?;
    if has_nested_optional(&normalized) {
        tracing::debug!(
            shorthand = normalized.as_str().unwrap_or_default(),
            "nested optional type kept in its original form"
        );
        return Ok(spec);
    }
    Ok(normalized)
}

/// Shorthand rewrite without the nested-optional guard, used for union
/// members and array items.
pub(crate) fn normalize_members<F, E>(spec: Node, rest: &mut F) -> Result<Node, E>
where
    F: FnMut(Node) -> Result<Node, E>,
{
    match spec {
        Node::Mapping(map) => {
            if let Some(items) = bare_array_items(&map) {
                let items = normalize_members(items.clone(), &mut *rest)?;
                if let Some(shorthand) = array_of(&items) {
                    return Ok(shorthand);
                }
            }
            rest(Node::Mapping(map))
        }
        Node::Sequence(members) if members.iter().any(Node::is_null_marker) => {
            normalize_union(members, rest)
        }
        other => rest(other),
    }
}

fn normalize_union<F, E>(members: Vec<Node>, rest: &mut F) -> Result<Node, E>
where
    F: FnMut(Node) -> Result<Node, E>,
{
    if let Some(member) = optional_member(&members) {
        if let Some(shorthand) = optional_of(&normalize_members(member.clone(), &mut *rest)?) {
            return Ok(shorthand);
        }
    } else {
        tracing::debug!(
            members = members.len(),
            "no optional shorthand for multi-member type union"
        );
    }

    let mut rewritten = Vec::with_capacity(members.len());
    for member in members {
        rewritten.push(normalize_members(member, &mut *rest)?);
    }
    Ok(Node::Sequence(rewritten))
}

/// Type rewrite applied to tool input/output fields: only name pairs with
/// `null` and array wrappers are converted.
pub fn normalize_field_type(spec: Node) -> Node {
    match spec {
        Node::Sequence(members) => match optional_member(&members) {
            Some(member) if member.is_plain_name() => {
                with_suffix(member, OPTIONAL_SUFFIX).unwrap_or(Node::Sequence(members))
            }
            _ => Node::Sequence(members),
        },
        Node::Mapping(map) => {
            let shorthand = bare_array_items(&map)
                .and_then(|items| with_suffix(&array_branch(items.clone()), ARRAY_SUFFIX));
            shorthand.unwrap_or(Node::Mapping(map))
        }
        other => other,
    }
}

fn array_branch(spec: Node) -> Node {
    match spec {
        Node::Mapping(map) => {
            let shorthand = bare_array_items(&map)
                .and_then(|items| with_suffix(&array_branch(items.clone()), ARRAY_SUFFIX));
            shorthand.unwrap_or(Node::Mapping(map))
        }
        other => other,
    }
}

/// Items of a `{type: array, items: T}` wrapper that carries no other keys.
fn bare_array_items(map: &Mapping) -> Option<&Node> {
    let is_array = map.get("type").and_then(Node::as_str) == Some("array");
    let bare = map.keys().all(|key| key == "type" || key == "items");
    if is_array && bare {
        map.get("items")
    } else {
        None
    }
}

/// The non-null member of a two-member union containing `null`.
pub(crate) fn optional_member(members: &[Node]) -> Option<&Node> {
    match members {
        [first, second] if first.is_null_marker() && !second.is_null_marker() => Some(second),
        [first, second] if second.is_null_marker() && !first.is_null_marker() => Some(first),
        _ => None,
    }
}

pub(crate) fn optional_of(node: &Node) -> Option<Node> {
    with_suffix(node, OPTIONAL_SUFFIX)
}

fn array_of(node: &Node) -> Option<Node> {
    with_suffix(node, ARRAY_SUFFIX)
}

/// A shorthand where `?` lands mid-expression, such as `string?[]`.
fn has_nested_optional(node: &Node) -> bool {
    node.as_str().is_some_and(|text| {
        text.strip_suffix('?')
            .unwrap_or(text)
            .contains('?')
    })
}

fn with_suffix(node: &Node, suffix: &str) -> Option<Node> {
    node.as_str()
        .map(|name| Node::string(format!("{}{}", name, suffix)))
}
