#![allow(dead_code)]

use sqlfold_core::ast::{Node, NodeId, SelectStatement, SqlTree};
use sqlfold_core::{create_export_parameter_visitor, ParamValue, ParseError, Parser};

pub fn parse(sql: &str) -> SqlTree {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_expr(sql: &str) -> SqlTree {
    Parser::new(sql)
        .parse_expr()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn root(tree: &SqlTree) -> NodeId {
    tree.root().expect("tree has a root")
}

pub fn select(tree: &SqlTree) -> &SelectStatement {
    match tree.node(root(tree)) {
        Node::Select(select) => select,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn where_clause(tree: &SqlTree) -> NodeId {
    select(tree).where_clause().expect("statement has a WHERE clause")
}

pub fn render(tree: &SqlTree) -> String {
    tree.expr(root(tree)).to_string()
}

/// Verifies that rendering produces a fixed point: the rendered text parses
/// back to a tree that renders the same way.
pub fn round_trip(sql: &str) {
    let rendered1 = render(&parse(sql));
    let rendered2 = render(&parse(&rendered1));
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

/// Parses `sql` and runs the export visitor for `db_type` over it.
pub fn export(sql: &str, db_type: &str) -> (String, Vec<ParamValue>) {
    let mut tree = parse(sql);
    let mut out = String::new();
    let mut visitor = create_export_parameter_visitor(&mut out, db_type);
    visitor
        .export(&mut tree)
        .unwrap_or_else(|e| panic!("Failed to export: {sql}\nError: {e:?}"));
    let parameters = visitor.into_parameters();
    tree.verify_links(root(&tree))
        .unwrap_or_else(|e| panic!("Broken links after export: {sql}\nError: {e}"));
    (out, parameters)
}

/// Writes each parameter over its `?`, left to right. `sql` must hold no `?`
/// inside quoted text.
pub fn bind_inline(sql: &str, parameters: &[ParamValue]) -> String {
    let mut values = parameters.iter();
    let mut bound = String::with_capacity(sql.len());
    for c in sql.chars() {
        if c == '?' {
            if let Some(value) = values.next() {
                bound.push_str(&value.to_string());
                continue;
            }
        }
        bound.push(c);
    }
    assert!(values.next().is_none(), "More parameters than placeholders in: {sql}");
    bound
}
