//! Tests for literal extraction: ordering, write-back, merged lists and
//! the cases that must be left alone.

mod common;
use common::*;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sqlfold_core::ast::{BinaryOp, Node, SqlTree};
use sqlfold_core::export::{
    export_all, export_between, export_binary, export_parameter, merge_equality_chains,
};
use sqlfold_core::{create_export_parameter_visitor, ParamValue};

// ===================================================================
// Ordering
// ===================================================================

#[test]
fn where_values_in_order() {
    let (sql, parameters) = export("SELECT * FROM t WHERE a = 'x' AND b = 5", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE a = ? AND b = ?");
    assert_eq!(parameters, vec![ParamValue::from("x"), ParamValue::Int(5)]);
}

#[test]
fn literal_on_the_left() {
    let (sql, parameters) = export("SELECT * FROM t WHERE 10 < a", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE ? < a");
    assert_eq!(parameters, vec![ParamValue::Int(10)]);
}

#[test]
fn between_bounds() {
    let (sql, parameters) = export("SELECT * FROM t WHERE x BETWEEN 1 AND 10", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE x BETWEEN ? AND ?");
    assert_eq!(parameters, vec![ParamValue::Int(1), ParamValue::Int(10)]);
}

#[test]
fn in_list_targets() {
    let (sql, parameters) = export(
        "SELECT * FROM t WHERE status NOT IN ('a', 'b', other)",
        "postgresql",
    );
    assert_eq!(sql, "SELECT * FROM t WHERE status NOT IN (?, ?, other)");
    assert_eq!(parameters, vec![ParamValue::from("a"), ParamValue::from("b")]);
}

#[test]
fn mixed_literal_kinds() {
    let (sql, parameters) = export(
        "SELECT * FROM t WHERE a = -3 AND b = 1.25 AND c = TRUE AND d = X'CAFE'",
        "mysql",
    );
    assert_eq!(sql, "SELECT * FROM t WHERE a = ? AND b = ? AND c = ? AND d = ?");
    assert_eq!(
        parameters,
        vec![
            ParamValue::Int(-3),
            ParamValue::Decimal(Decimal::new(125, 2)),
            ParamValue::Bool(true),
            ParamValue::Bytes(vec![0xCA, 0xFE]),
        ]
    );
}

#[test]
fn nested_arithmetic() {
    let (sql, parameters) = export("SELECT * FROM t WHERE a + 1 > b * 2", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE a + ? > b * ?");
    assert_eq!(parameters, vec![ParamValue::Int(1), ParamValue::Int(2)]);
}

#[test]
fn literal_nested_left_of_comparison() {
    let (sql, parameters) = export("SELECT id FROM t WHERE a + 1 = 2", "mysql");
    assert_eq!(sql, "SELECT id FROM t WHERE a + ? = ?");
    assert_eq!(parameters, vec![ParamValue::Int(1), ParamValue::Int(2)]);
}

#[test]
fn literal_nested_in_between_bound() {
    let (sql, parameters) = export("SELECT id FROM t WHERE x BETWEEN 1 + 2 AND 3", "mysql");
    assert_eq!(sql, "SELECT id FROM t WHERE x BETWEEN ? + ? AND ?");
    assert_eq!(
        parameters,
        vec![ParamValue::Int(1), ParamValue::Int(2), ParamValue::Int(3)]
    );
}

#[test]
fn literal_nested_in_function_argument() {
    let (sql, parameters) = export(
        "SELECT id FROM t WHERE lower('a' || 'b') = 'c' AND f(1, g(2), 3) > 0",
        "mysql",
    );
    assert_eq!(
        sql,
        "SELECT id FROM t WHERE lower(? || ?) = ? AND f(?, g(?), ?) > ?"
    );
    assert_eq!(
        bind_inline(&sql, &parameters),
        "SELECT id FROM t WHERE lower('a' || 'b') = 'c' AND f(1, g(2), 3) > 0"
    );
}

#[test]
fn parameters_bind_back_to_original() {
    for sql in [
        "SELECT * FROM t WHERE (a + 1) * 2 = b - 3 AND c IN (4, d + 5, 6)",
        "SELECT * FROM t WHERE x NOT BETWEEN abs(-1) AND 2 * 3 OR y LIKE 'p%'",
        "SELECT * FROM t WHERE SUM(x * 3) > 1 AND 1 = 1 AND z = X'0A'",
    ] {
        let (rendered, parameters) = export(sql, "sqlite");
        assert_eq!(bind_inline(&rendered, &parameters), render(&parse(sql)), "{sql}");
    }
}

#[test]
fn having_left_verbatim() {
    let (sql, parameters) = export(
        "SELECT dept FROM emp GROUP BY dept HAVING SUM(salary) > 100",
        "mysql",
    );
    // GROUP BY, including its HAVING, is left verbatim.
    assert_eq!(sql, "SELECT dept FROM emp GROUP BY dept HAVING SUM(salary) > 100");
    assert!(parameters.is_empty());
}

// ===================================================================
// Left alone
// ===================================================================

#[test]
fn constant_comparison_preserved() {
    let (sql, parameters) = export("SELECT * FROM t WHERE 1 = 1 AND a = 2", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE 1 = 1 AND a = ?");
    assert_eq!(parameters, vec![ParamValue::Int(2)]);
}

#[test]
fn null_comparison_preserved() {
    let (sql, parameters) = export("SELECT * FROM t WHERE NULL = 1 OR a = NULL", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE NULL = 1 OR a = NULL");
    assert!(parameters.is_empty());
}

#[test]
fn placeholders_never_extracted() {
    let (sql, parameters) = export("SELECT * FROM t WHERE a = ? AND b = :name", "mysql");
    assert_eq!(sql, "SELECT * FROM t WHERE a = ? AND b = :name");
    assert!(parameters.is_empty());
}

#[test]
fn select_list_group_and_order_untouched() {
    let (sql, parameters) = export(
        "SELECT a + 1, 'x' AS tag FROM t GROUP BY a + 1 ORDER BY a + 2 LIMIT 5",
        "mysql",
    );
    assert_eq!(
        sql,
        "SELECT a + 1, 'x' AS tag FROM t GROUP BY a + 1 ORDER BY a + 2 LIMIT 5"
    );
    assert!(parameters.is_empty());
}

#[test]
fn idempotent_second_pass() {
    let mut tree = parse("SELECT * FROM t WHERE a = 'x' AND b IN (1, 2)");
    let mut first = String::new();
    let mut visitor = create_export_parameter_visitor(&mut first, "mysql");
    visitor.export(&mut tree).unwrap();
    assert_eq!(visitor.parameters().len(), 3);

    let mut second = String::new();
    let mut visitor = create_export_parameter_visitor(&mut second, "mysql");
    visitor.export(&mut tree).unwrap();
    assert!(visitor.parameters().is_empty());
    assert_eq!(first, second);
}

// ===================================================================
// Merged lists
// ===================================================================

#[test]
fn merged_list_grouping() {
    let mut tree = SqlTree::new();
    let a = tree.column("a");
    let five = tree.integer(5);
    let head = tree.binary(a, BinaryOp::Eq, five).unwrap();
    let a2 = tree.column("a");
    let six = tree.integer(6);
    let sibling = tree.binary(a2, BinaryOp::Eq, six).unwrap();
    tree.set_merged_list(head, Some(vec![sibling])).unwrap();

    let mut buffer = vec![];
    export_binary(&mut tree, &mut buffer, head);
    assert_eq!(
        buffer,
        vec![ParamValue::Group(vec![ParamValue::Int(5), ParamValue::Int(6)])]
    );
    assert_eq!(tree.expr(head).to_string(), "a = ?");
    assert_eq!(tree.parent(sibling), Some(head));
}

#[test]
fn merged_list_without_literal_siblings() {
    let mut tree = SqlTree::new();
    let a = tree.column("a");
    let five = tree.integer(5);
    let head = tree.binary(a, BinaryOp::Eq, five).unwrap();
    let a2 = tree.column("a");
    let b = tree.column("b");
    let sibling = tree.binary(a2, BinaryOp::Eq, b).unwrap();
    tree.set_merged_list(head, Some(vec![sibling])).unwrap();

    let mut buffer = vec![];
    export_binary(&mut tree, &mut buffer, head);
    assert_eq!(buffer, vec![ParamValue::Int(5)]);
}

#[test]
fn merge_pass_then_export() {
    let (sql, parameters) = {
        let mut tree = parse("SELECT * FROM t WHERE k = 'a' OR k = 'b' OR k = 'c'");
        let top = root(&tree);
        assert_eq!(merge_equality_chains(&mut tree, top), 1);
        let mut out = String::new();
        let mut visitor = create_export_parameter_visitor(&mut out, "mysql");
        visitor.export(&mut tree).unwrap();
        let parameters = visitor.into_parameters();
        (out, parameters)
    };
    assert_eq!(sql, "SELECT * FROM t WHERE k = ?");
    assert_eq!(
        parameters,
        vec![ParamValue::Group(vec![
            ParamValue::from("a"),
            ParamValue::from("b"),
            ParamValue::from("c"),
        ])]
    );
}

// ===================================================================
// Drivers
// ===================================================================

#[test]
fn export_parameter_returns_detached_placeholder() {
    let mut tree = SqlTree::new();
    let literal = tree.boolean(false);
    let mut buffer = vec![];
    let placeholder = export_parameter(&mut tree, &mut buffer, literal);
    assert!(matches!(tree.node(placeholder), Node::Placeholder(_)));
    assert!(tree.parent(placeholder).is_none());
    assert_eq!(buffer, vec![ParamValue::Bool(false)]);
}

#[test]
fn export_between_writes_back() {
    let mut tree = SqlTree::new();
    let test = tree.column("x");
    let begin = tree.string("a");
    let end = tree.column("y");
    let between = tree.between(test, true, begin, end).unwrap();
    let mut buffer = vec![];
    export_between(&mut tree, &mut buffer, between);
    assert_eq!(tree.expr(between).to_string(), "x NOT BETWEEN ? AND y");
    assert!(tree.parent(begin).is_none());
}

#[test]
fn export_all_function_arguments() {
    let mut tree = SqlTree::new();
    let name = tree.column("name");
    let from = tree.integer(1);
    let len = tree.integer(3);
    let call = tree.function("substr", vec![name, from, len]).unwrap();
    let mut buffer = vec![];
    assert!(!export_all(&mut tree, &mut buffer, call));
    assert_eq!(tree.expr(call).to_string(), "substr(name, ?, ?)");
    assert_eq!(buffer, vec![ParamValue::Int(1), ParamValue::Int(3)]);
}

#[test]
fn placeholder_count_matches_parameters() {
    for sql in [
        "SELECT * FROM t WHERE a = 1 AND (b = 'x' OR c IN (1, 2, 3))",
        "SELECT * FROM t WHERE lower(a) LIKE lower('%x%') AND d BETWEEN 1 AND 2",
        "SELECT * FROM t WHERE NOT a = 1 AND b <> 2.5",
    ] {
        let (rendered, parameters) = export(sql, "mysql");
        assert_eq!(rendered.matches('?').count(), parameters.len(), "{sql}");
    }
}
