//! Parameter extraction.
//!
//! Literal values are moved out of an expression tree into a parameter buffer
//! and replaced by `?` placeholders, in the order the drivers visit them. The
//! functions here are stateless; [`ExportParameterVisitor`] walks a tree and
//! calls them for every node kind that carries literals.
//!
//! A literal's own value is what gets exported, except when its parent is the
//! head of a merged list (see [`merge_equality_chains`]): then the values of the
//! merged siblings travel along in one [`ParamValue::Group`].

mod merge;
mod visitor;

use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::ast::{Literal, Node, NodeId, SqlTree};

pub use merge::merge_equality_chains;
pub use visitor::{create_export_parameter_visitor, ExportParameterVisitor, ExportVisitorKind};

/// A value taken out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    /// The values of a merged comparison chain, head first.
    Group(Vec<ParamValue>),
}

impl fmt::Display for ParamValue {
    /// Writes the value as an inline SQL literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => f.write_str(if *value { "TRUE" } else { "FALSE" }),
            Self::Int(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Bytes(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Group(values) => {
                f.write_str("(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// The value `id` would export, or `None` when it does not qualify.
///
/// Character, boolean, integer, number and hex literals qualify; hex literals
/// export their decoded bytes and are skipped when the digits do not decode.
#[must_use]
pub fn exported_value(tree: &SqlTree, id: NodeId) -> Option<ParamValue> {
    let Node::Literal(literal) = tree.node(id) else {
        return None;
    };
    match literal {
        Literal::Null => None,
        Literal::Boolean(value) => Some(ParamValue::Bool(*value)),
        Literal::Integer(value) => Some(ParamValue::Int(*value)),
        Literal::Number(value) => Some(ParamValue::Decimal(*value)),
        Literal::Char(value) => Some(ParamValue::Text(value.clone())),
        Literal::Hex(_) => literal.to_bytes().map(ParamValue::Bytes),
    }
}

/// The value `expr` exports in place: its own value, or a [`ParamValue::Group`]
/// led by it when its parent heads a merged list.
fn value_in_place(tree: &SqlTree, expr: NodeId) -> Option<ParamValue> {
    let value = exported_value(tree, expr)?;
    let merged = merged_values(tree, expr);
    if merged.is_empty() {
        return Some(value);
    }
    let mut group = Vec::with_capacity(merged.len() + 1);
    group.push(value);
    group.extend(merged);
    Some(ParamValue::Group(group))
}

/// Values of the right operands of the merged entries of `expr`'s parent. An
/// entry heading its own merged list contributes a nested group.
fn merged_values(tree: &SqlTree, expr: NodeId) -> Vec<ParamValue> {
    let Some(merged) = tree
        .parent(expr)
        .and_then(|parent| tree.node(parent).as_binary())
        .and_then(|binary| binary.merged_list())
    else {
        return vec![];
    };
    merged
        .iter()
        .filter_map(|&entry| tree.node(entry).as_binary())
        .filter_map(|sibling| value_in_place(tree, sibling.right()))
        .collect()
}

/// Exports the value of `expr` to `buffer` and returns the placeholder that
/// should take its place.
///
/// Returns `expr` itself when it does not qualify. The placeholder is a fresh
/// detached node; writing it back is up to the caller.
pub fn export_parameter(tree: &mut SqlTree, buffer: &mut Vec<ParamValue>, expr: NodeId) -> NodeId {
    let Some(value) = value_in_place(tree, expr) else {
        return expr;
    };
    trace!(node = %expr, value = %value, "Exported parameter");
    buffer.push(value);
    tree.placeholder()
}

/// Exports `child` and writes the placeholder back into `owner`.
pub(crate) fn export_child(
    tree: &mut SqlTree,
    buffer: &mut Vec<ParamValue>,
    owner: NodeId,
    child: NodeId,
) {
    let exported = export_parameter(tree, buffer, child);
    if exported != child {
        tree.replace(owner, child, exported);
    }
}

/// The children of `id` in rendering order, each paired with whether the
/// drivers export it.
///
/// The operands of a comparison between two literals (`1 = 1`, `NULL = NULL`)
/// are never exported, nor are the tested expressions of `BETWEEN` and `IN`.
pub(crate) fn export_slots(tree: &SqlTree, id: NodeId) -> Vec<(NodeId, bool)> {
    match tree.node(id) {
        Node::Binary(binary) => {
            let (left, right) = (binary.left(), binary.right());
            let constant = binary.op.is_relational()
                && tree.node(left).is_literal()
                && tree.node(right).is_literal();
            vec![(left, !constant), (right, !constant)]
        }
        Node::Between(between) => vec![
            (between.test(), false),
            (between.begin(), true),
            (between.end(), true),
        ],
        Node::InList(list) => core::iter::once((list.expr(), false))
            .chain(list.targets().iter().map(|&target| (target, true)))
            .collect(),
        node => node
            .sequence()
            .map(|elements| elements.iter().map(|&element| (element, true)).collect())
            .unwrap_or_default(),
    }
}

fn export_slots_of(tree: &mut SqlTree, buffer: &mut Vec<ParamValue>, id: NodeId) {
    for (child, export) in export_slots(tree, id) {
        if export {
            export_child(tree, buffer, id, child);
        }
    }
}

/// Exports the operands of a binary expression, left then right.
///
/// A comparison between two literals (`1 = 1`, `NULL = NULL`) is left as is.
pub fn export_binary(tree: &mut SqlTree, buffer: &mut Vec<ParamValue>, id: NodeId) {
    if tree.node(id).as_binary().is_some() {
        export_slots_of(tree, buffer, id);
    }
}

/// Exports the bounds of a `BETWEEN`, begin then end.
pub fn export_between(tree: &mut SqlTree, buffer: &mut Vec<ParamValue>, id: NodeId) {
    if matches!(tree.node(id), Node::Between(_)) {
        export_slots_of(tree, buffer, id);
    }
}

/// Exports every element of `owner`'s ordered sequence: the arguments of a
/// call or the targets of an `IN` list.
///
/// Always returns `false`, so a visitor can return it to prune the walk.
pub fn export_all(tree: &mut SqlTree, buffer: &mut Vec<ParamValue>, owner: NodeId) -> bool {
    if tree.node(owner).sequence().is_some() {
        export_slots_of(tree, buffer, owner);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use pretty_assertions::assert_eq;

    fn eq(tree: &mut SqlTree, column: &str, value: i64) -> NodeId {
        let left = tree.column(column);
        let right = tree.integer(value);
        tree.binary(left, BinaryOp::Eq, right).unwrap()
    }

    #[test]
    fn test_export_parameter_literal() {
        let mut tree = SqlTree::new();
        let literal = tree.string("x");
        let mut buffer = vec![];
        let placeholder = export_parameter(&mut tree, &mut buffer, literal);
        assert_ne!(placeholder, literal);
        assert!(matches!(tree.node(placeholder), Node::Placeholder(p) if p.name.is_none()));
        assert!(tree.parent(placeholder).is_none());
        assert_eq!(buffer, vec![ParamValue::from("x")]);
    }

    #[test]
    fn test_export_parameter_skips_non_literals() {
        let mut tree = SqlTree::new();
        let null = tree.null();
        let column = tree.column("a");
        let placeholder = tree.placeholder();
        let mut buffer = vec![];
        for id in [null, column, placeholder] {
            assert_eq!(export_parameter(&mut tree, &mut buffer, id), id);
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_hex_exports_bytes() {
        let mut tree = SqlTree::new();
        let hex = tree.hex(&[0xCA, 0xFE]);
        let mut buffer = vec![];
        export_parameter(&mut tree, &mut buffer, hex);
        assert_eq!(buffer, vec![ParamValue::Bytes(vec![0xCA, 0xFE])]);
    }

    #[test]
    fn test_export_binary_keeps_constant_comparison() {
        let mut tree = SqlTree::new();
        let one = tree.integer(1);
        let other = tree.integer(1);
        let cmp = tree.binary(one, BinaryOp::Eq, other).unwrap();
        let mut buffer = vec![];
        export_binary(&mut tree, &mut buffer, cmp);
        assert!(buffer.is_empty());
        assert_eq!(tree.expr(cmp).to_string(), "1 = 1");
    }

    #[test]
    fn test_export_binary_arithmetic_between_literals() {
        let mut tree = SqlTree::new();
        let one = tree.integer(1);
        let two = tree.integer(2);
        let sum = tree.binary(one, BinaryOp::Add, two).unwrap();
        let mut buffer = vec![];
        export_binary(&mut tree, &mut buffer, sum);
        assert_eq!(buffer, vec![ParamValue::Int(1), ParamValue::Int(2)]);
        assert_eq!(tree.expr(sum).to_string(), "? + ?");
    }

    #[test]
    fn test_export_binary_writes_back_with_parent() {
        let mut tree = SqlTree::new();
        let cmp = eq(&mut tree, "a", 5);
        let mut buffer = vec![];
        export_binary(&mut tree, &mut buffer, cmp);
        let right = tree.node(cmp).as_binary().unwrap().right();
        assert_eq!(tree.parent(right), Some(cmp));
        assert_eq!(tree.expr(cmp).to_string(), "a = ?");
        tree.verify_links(cmp).unwrap();
    }

    #[test]
    fn test_merged_list_groups_values() {
        let mut tree = SqlTree::new();
        let head = eq(&mut tree, "a", 5);
        let sibling = eq(&mut tree, "a", 6);
        tree.set_merged_list(head, Some(vec![sibling])).unwrap();
        let mut buffer = vec![];
        export_binary(&mut tree, &mut buffer, head);
        assert_eq!(
            buffer,
            vec![ParamValue::Group(vec![ParamValue::Int(5), ParamValue::Int(6)])]
        );
        // The sibling itself is not rewritten.
        assert_eq!(tree.expr(sibling).to_string(), "a = 6");
    }

    #[test]
    fn test_nested_merged_list_groups_recursively() {
        let mut tree = SqlTree::new();
        let head = eq(&mut tree, "a", 5);
        let sibling = eq(&mut tree, "a", 6);
        let inner = eq(&mut tree, "a", 7);
        tree.set_merged_list(sibling, Some(vec![inner])).unwrap();
        tree.set_merged_list(head, Some(vec![sibling])).unwrap();
        let mut buffer = vec![];
        export_binary(&mut tree, &mut buffer, head);
        assert_eq!(
            buffer,
            vec![ParamValue::Group(vec![
                ParamValue::Int(5),
                ParamValue::Group(vec![ParamValue::Int(6), ParamValue::Int(7)]),
            ])]
        );
    }

    #[test]
    fn test_export_slots_order() {
        let mut tree = SqlTree::new();
        let test = tree.integer(0);
        let begin = tree.integer(1);
        let end = tree.column("hi");
        let between = tree.between(test, false, begin, end).unwrap();
        assert_eq!(
            export_slots(&tree, between),
            vec![(test, false), (begin, true), (end, true)]
        );
        let one = tree.integer(1);
        let two = tree.integer(2);
        let cmp = tree.binary(one, BinaryOp::Lt, two).unwrap();
        assert_eq!(export_slots(&tree, cmp), vec![(one, false), (two, false)]);
    }

    #[test]
    fn test_export_between_order() {
        let mut tree = SqlTree::new();
        let test = tree.column("x");
        let begin = tree.integer(1);
        let end = tree.integer(10);
        let between = tree.between(test, false, begin, end).unwrap();
        let mut buffer = vec![];
        export_between(&mut tree, &mut buffer, between);
        assert_eq!(buffer, vec![ParamValue::Int(1), ParamValue::Int(10)]);
        assert_eq!(tree.expr(between).to_string(), "x BETWEEN ? AND ?");
    }

    #[test]
    fn test_export_all_returns_false() {
        let mut tree = SqlTree::new();
        let expr = tree.column("id");
        let one = tree.integer(1);
        let name = tree.column("other");
        let two = tree.string("b");
        let list = tree.in_list(expr, false, vec![one, name, two]).unwrap();
        let mut buffer = vec![];
        assert!(!export_all(&mut tree, &mut buffer, list));
        assert_eq!(buffer, vec![ParamValue::Int(1), ParamValue::from("b")]);
        assert_eq!(tree.expr(list).to_string(), "id IN (?, other, ?)");
    }

    #[test]
    fn test_display_inline_literal() {
        let group = ParamValue::Group(vec![
            ParamValue::from("it's"),
            ParamValue::Bytes(vec![0x0A]),
            ParamValue::Bool(false),
        ]);
        assert_eq!(group.to_string(), "('it''s', X'0A', FALSE)");
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![
            ParamValue::Int(5),
            ParamValue::from("x"),
            ParamValue::Group(vec![ParamValue::Bool(true)]),
        ];
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"[5,"x",[true]]"#
        );
    }
}
