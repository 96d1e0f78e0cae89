//! Renders a tree back to SQL text.

use core::fmt;

use super::Visitor;
use crate::ast::{Literal, Node, NodeId, SqlTree, UnaryOp};
use crate::dialect::{Dialect, LimitStyle};
use crate::lexer::is_plain_identifier;
use crate::parser::{infix_left_bp, NOT_BP, PREDICATE_BP, PREFIX_BP};

/// Writes the SQL text of the visited subtree to a sink.
///
/// Every `visit_*` renders the node with its children and returns `false`, so
/// accepting one node renders the whole subtree once. Parentheses are added
/// where the tree shape would otherwise re-parse differently. The first write
/// error stops all further output and is returned by [`OutputVisitor::finish`].
pub struct OutputVisitor<'a, W: fmt::Write + ?Sized> {
    out: &'a mut W,
    dialect: &'a dyn Dialect,
    result: fmt::Result,
}

impl<'a, W: fmt::Write + ?Sized> OutputVisitor<'a, W> {
    pub fn new(out: &'a mut W, dialect: &'a dyn Dialect) -> Self {
        Self {
            out,
            dialect,
            result: Ok(()),
        }
    }

    /// Returns the first write error, if any.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink.
    pub fn finish(self) -> fmt::Result {
        self.result
    }

    fn write(&mut self, text: &str) {
        if self.result.is_ok() {
            self.result = self.out.write_str(text);
        }
    }

    fn render(&mut self, tree: &SqlTree, id: NodeId) {
        tree.accept(id, self);
    }

    fn render_list(&mut self, tree: &SqlTree, ids: &[NodeId]) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.render(tree, id);
        }
    }

    /// Renders an operand followed by an operator binding at `bp`.
    fn render_left(&mut self, tree: &SqlTree, id: NodeId, bp: u8) {
        let wrap = trailing_bp(tree, id).is_some_and(|open| open <= bp);
        self.render_wrapped(tree, id, wrap);
    }

    /// Renders an operand parsed with minimum binding power `min_bp`.
    fn render_right(&mut self, tree: &SqlTree, id: NodeId, min_bp: u8) {
        let wrap = leading_bp(tree.node(id)).is_some_and(|bp| bp < min_bp);
        self.render_wrapped(tree, id, wrap);
    }

    fn render_wrapped(&mut self, tree: &SqlTree, id: NodeId, wrap: bool) {
        if wrap {
            self.write("(");
        }
        self.render(tree, id);
        if wrap {
            self.write(")");
        }
    }

    fn render_name(&mut self, name: &str) {
        if is_plain_identifier(name) {
            self.write(name);
        } else {
            let quoted = self.dialect.quote_identifier(name);
            self.write(&quoted);
        }
    }

    fn render_qualified(&mut self, table: Option<&str>, name: &str) {
        if let Some(table) = table {
            self.render_name(table);
            self.write(".");
        }
        self.render_name(name);
    }

    fn render_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Null => self.write("NULL"),
            Literal::Boolean(value) => self.write(self.dialect.boolean_literal(*value)),
            Literal::Integer(value) => self.write(&value.to_string()),
            Literal::Number(value) => self.write(&value.to_string()),
            Literal::Char(value) => {
                let escaped = value.replace('\'', self.dialect.string_escape());
                self.write("'");
                self.write(&escaped);
                self.write("'");
            }
            Literal::Hex(digits) => {
                let text = self.dialect.hex_literal(digits);
                self.write(&text);
            }
        }
    }
}

/// The binding power of the first operator at the top of the expression, for
/// expressions that start with an operand.
fn leading_bp(node: &Node) -> Option<u8> {
    match node {
        Node::Binary(binary) => Some(infix_left_bp(binary.op)),
        Node::Between(_) | Node::InList(_) | Node::IsNull(_) => Some(PREDICATE_BP),
        _ => None,
    }
}

/// The smallest binding power an operator written right after the expression
/// needs to be absorbed by it. `None` when the expression is closed.
fn trailing_bp(tree: &SqlTree, id: NodeId) -> Option<u8> {
    let (own, tail) = match tree.node(id) {
        Node::Binary(binary) => (infix_left_bp(binary.op) + 1, Some(binary.right())),
        Node::Between(between) => (PREDICATE_BP + 1, Some(between.end())),
        Node::Unary(unary) if unary.op == UnaryOp::Not => (NOT_BP, Some(unary.operand())),
        Node::Unary(unary) => (PREFIX_BP, Some(unary.operand())),
        _ => return None,
    };
    let nested = tail.and_then(|tail| trailing_bp(tree, tail));
    Some(nested.map_or(own, |nested| nested.min(own)))
}

fn starts_with_minus(tree: &SqlTree, id: NodeId) -> bool {
    match tree.node(id) {
        Node::Unary(unary) => unary.op == UnaryOp::Neg,
        Node::Literal(Literal::Integer(value)) => *value < 0,
        Node::Literal(Literal::Number(value)) => value.is_sign_negative() && !value.is_zero(),
        _ => false,
    }
}

impl<W: fmt::Write + ?Sized> Visitor for OutputVisitor<'_, W> {
    fn visit_column(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Column(column) = tree.node(id) {
            self.render_qualified(column.table.as_deref(), &column.name);
        }
        false
    }

    fn visit_wildcard(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Wildcard(wildcard) = tree.node(id) {
            if let Some(table) = wildcard.table.as_deref() {
                self.render_name(table);
                self.write(".");
            }
            self.write("*");
        }
        false
    }

    fn visit_literal(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Literal(literal) = tree.node(id) {
            self.render_literal(literal);
        }
        false
    }

    fn visit_placeholder(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Placeholder(placeholder) = tree.node(id) {
            match placeholder.name.as_deref() {
                Some(name) => {
                    self.write(":");
                    self.write(name);
                }
                None => self.write(self.dialect.parameter_placeholder()),
            }
        }
        false
    }

    fn visit_binary(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Binary(binary) = tree.node(id) else {
            return false;
        };
        let bp = infix_left_bp(binary.op);
        self.render_left(tree, binary.left(), bp);
        self.write(" ");
        self.write(binary.op.as_str());
        self.write(" ");
        self.render_right(tree, binary.right(), bp + 1);
        false
    }

    fn visit_unary(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Unary(unary) = tree.node(id) else {
            return false;
        };
        let operand = unary.operand();
        match unary.op {
            UnaryOp::Not => {
                self.write("NOT ");
                self.render_right(tree, operand, NOT_BP);
            }
            UnaryOp::Neg | UnaryOp::BitNot => {
                self.write(unary.op.as_str());
                let wrap = leading_bp(tree.node(operand)).is_some()
                    || (unary.op == UnaryOp::Neg && starts_with_minus(tree, operand));
                self.render_wrapped(tree, operand, wrap);
            }
        }
        false
    }

    fn visit_paren(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Paren(paren) = tree.node(id) {
            self.write("(");
            self.render(tree, paren.inner());
            self.write(")");
        }
        false
    }

    fn visit_between(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Between(between) = tree.node(id) else {
            return false;
        };
        self.render_left(tree, between.test(), PREDICATE_BP);
        self.write(if between.negated {
            " NOT BETWEEN "
        } else {
            " BETWEEN "
        });
        self.render_right(tree, between.begin(), PREDICATE_BP + 1);
        self.write(" AND ");
        self.render_right(tree, between.end(), PREDICATE_BP + 1);
        false
    }

    fn visit_in_list(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::InList(list) = tree.node(id) else {
            return false;
        };
        self.render_left(tree, list.expr(), PREDICATE_BP);
        self.write(if list.negated { " NOT IN (" } else { " IN (" });
        self.render_list(tree, list.targets());
        self.write(")");
        false
    }

    fn visit_is_null(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::IsNull(test) = tree.node(id) else {
            return false;
        };
        self.render_left(tree, test.expr(), PREDICATE_BP);
        self.write(if test.negated {
            " IS NOT NULL"
        } else {
            " IS NULL"
        });
        false
    }

    fn visit_cast(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Cast(cast) = tree.node(id) {
            self.write("CAST(");
            self.render(tree, cast.expr());
            self.write(" AS ");
            self.write(&cast.data_type.to_string());
            self.write(")");
        }
        false
    }

    fn visit_function(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Function(call) = tree.node(id) {
            self.write(&call.name);
            self.write("(");
            self.render_list(tree, call.arguments());
            self.write(")");
        }
        false
    }

    fn visit_aggregate(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Aggregate(call) = tree.node(id) else {
            return false;
        };
        self.write(call.method_name());
        self.write("(");
        if let Some(option) = call.option() {
            self.write(option.as_str());
            self.write(" ");
        }
        self.render_list(tree, call.arguments());
        self.write(")");
        if call.is_ignore_nulls() {
            self.write(" IGNORE NULLS");
        }
        if let Some(within_group) = call.within_group() {
            self.write(" WITHIN GROUP (");
            self.render(tree, within_group);
            self.write(")");
        }
        if let Some(keep) = call.keep() {
            self.write(" ");
            self.render(tree, keep);
        }
        if let Some(over) = call.over() {
            self.write(" ");
            self.render(tree, over);
        }
        false
    }

    fn visit_keep(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Keep(keep) = tree.node(id) {
            self.write("KEEP (DENSE_RANK ");
            self.write(keep.position.as_str());
            self.write(" ");
            self.render(tree, keep.order_by());
            self.write(")");
        }
        false
    }

    fn visit_over(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Over(over) = tree.node(id) else {
            return false;
        };
        self.write("OVER (");
        if !over.partition_by().is_empty() {
            self.write("PARTITION BY ");
            self.render_list(tree, over.partition_by());
            if over.order_by().is_some() {
                self.write(" ");
            }
        }
        if let Some(order_by) = over.order_by() {
            self.render(tree, order_by);
        }
        self.write(")");
        false
    }

    fn visit_order_by(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::OrderBy(order_by) = tree.node(id) {
            self.write("ORDER BY ");
            self.render_list(tree, order_by.items());
        }
        false
    }

    fn visit_order_by_item(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::OrderByItem(item) = tree.node(id) {
            self.render(tree, item.expr());
            if let Some(direction) = item.direction {
                self.write(" ");
                self.write(direction.as_str());
            }
        }
        false
    }

    fn visit_select(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        let Node::Select(select) = tree.node(id) else {
            return false;
        };
        self.write("SELECT ");
        if select.distinct {
            self.write("DISTINCT ");
        }
        self.render_list(tree, select.columns());
        if let Some(from) = select.from() {
            self.write(" FROM ");
            self.render(tree, from);
        }
        if let Some(where_clause) = select.where_clause() {
            self.write(" WHERE ");
            self.render(tree, where_clause);
        }
        if let Some(group_by) = select.group_by() {
            self.write(" ");
            self.render(tree, group_by);
        }
        if let Some(order_by) = select.order_by() {
            self.write(" ");
            self.render(tree, order_by);
        }
        if let Some(limit) = select.limit() {
            match self.dialect.limit_style() {
                LimitStyle::Limit => {
                    self.write(" LIMIT ");
                    self.render(tree, limit);
                }
                LimitStyle::FetchFirst => {
                    self.write(" FETCH FIRST ");
                    self.render(tree, limit);
                    self.write(" ROWS ONLY");
                }
                LimitStyle::OffsetFetch => {
                    self.write(" OFFSET 0 ROWS FETCH NEXT ");
                    self.render(tree, limit);
                    self.write(" ROWS ONLY");
                }
            }
        }
        false
    }

    fn visit_select_column(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::SelectColumn(column) = tree.node(id) {
            self.render(tree, column.expr());
            if let Some(alias) = column.alias.as_deref() {
                self.write(" AS ");
                self.render_name(alias);
            }
        }
        false
    }

    fn visit_table(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::Table(table) = tree.node(id) {
            self.render_name(&table.name);
            if let Some(alias) = table.alias.as_deref() {
                self.write(" ");
                self.render_name(alias);
            }
        }
        false
    }

    fn visit_group_by(&mut self, tree: &SqlTree, id: NodeId) -> bool {
        if let Node::GroupBy(group_by) = tree.node(id) {
            self.write("GROUP BY ");
            self.render_list(tree, group_by.items());
            if let Some(having) = group_by.having() {
                self.write(" HAVING ");
                self.render(tree, having);
            }
        }
        false
    }
}
