//! Best-effort result types of expressions.

use super::node::{Literal, Node};
use super::operator::{BinaryOp, UnaryOp};
use super::types::DataType;
use super::{NodeId, SqlTree};
use crate::fingerprint::constants::{COUNT, GROUP_CONCAT, ROW_NUMBER, WM_CONCAT};

impl SqlTree {
    /// Infers the result type of an expression, `None` when unknown.
    ///
    /// Aggregates yield `BIGINT` for `COUNT` and `ROW_NUMBER`, then the type of
    /// their first argument, then `VARCHAR` for the string aggregates
    /// `WM_CONCAT` and `GROUP_CONCAT`.
    #[must_use]
    pub fn compute_data_type(&self, id: NodeId) -> Option<DataType> {
        match self.node(id) {
            Node::Aggregate(call) => {
                let hash = call.method_name_hash64();
                if hash == COUNT || hash == ROW_NUMBER {
                    return Some(DataType::Bigint);
                }
                if let Some(first) = call.arguments().first() {
                    if let Some(data_type) = self.compute_data_type(*first) {
                        return Some(data_type);
                    }
                }
                if hash == WM_CONCAT || hash == GROUP_CONCAT {
                    return Some(DataType::Varchar(None));
                }
                None
            }
            Node::Literal(literal) => literal_type(literal),
            Node::Cast(cast) => Some(cast.data_type.clone()),
            Node::Paren(paren) => self.compute_data_type(paren.inner()),
            Node::Binary(binary) => match binary.op {
                op if op.is_relational() || op.is_logical() => Some(DataType::Boolean),
                BinaryOp::Concat => Some(DataType::Varchar(None)),
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                    self.compute_data_type(binary.left())
                        .or_else(|| self.compute_data_type(binary.right()))
                }
                _ => None,
            },
            Node::Between(_) | Node::InList(_) | Node::IsNull(_) => Some(DataType::Boolean),
            Node::Unary(unary) => match unary.op {
                UnaryOp::Not => Some(DataType::Boolean),
                UnaryOp::Neg => self.compute_data_type(unary.operand()),
                UnaryOp::BitNot => None,
            },
            _ => None,
        }
    }
}

const fn literal_type(literal: &Literal) -> Option<DataType> {
    match literal {
        Literal::Null => None,
        Literal::Boolean(_) => Some(DataType::Boolean),
        Literal::Integer(_) => Some(DataType::Bigint),
        Literal::Number(_) => Some(DataType::Decimal {
            precision: None,
            scale: None,
        }),
        Literal::Char(_) => Some(DataType::Varchar(None)),
        Literal::Hex(_) => Some(DataType::Blob),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_is_bigint_whatever_the_argument() {
        let mut tree = SqlTree::new();
        let call = tree.aggregate("count");
        let arg = tree.string("x");
        tree.add_argument(call, Some(arg)).unwrap();
        assert_eq!(tree.compute_data_type(call), Some(DataType::Bigint));
    }

    #[test]
    fn test_first_argument_wins_over_string_aggregate() {
        let mut tree = SqlTree::new();
        let call = tree.aggregate("group_concat");
        let arg = tree.integer(1);
        tree.add_argument(call, Some(arg)).unwrap();
        assert_eq!(tree.compute_data_type(call), Some(DataType::Bigint));
    }

    #[test]
    fn test_string_aggregate_fallback() {
        let mut tree = SqlTree::new();
        let call = tree.aggregate("WM_CONCAT");
        let arg = tree.column("name");
        tree.add_argument(call, Some(arg)).unwrap();
        assert_eq!(tree.compute_data_type(call), Some(DataType::Varchar(None)));
    }

    #[test]
    fn test_unknown_aggregate() {
        let mut tree = SqlTree::new();
        let call = tree.aggregate("max");
        let arg = tree.column("price");
        tree.add_argument(call, Some(arg)).unwrap();
        assert_eq!(tree.compute_data_type(call), None);
    }

    #[test]
    fn test_arithmetic_falls_back_to_right() {
        let mut tree = SqlTree::new();
        let left = tree.column("price");
        let right = tree.number(rust_decimal::Decimal::new(15, 1));
        let product = tree.binary(left, BinaryOp::Mul, right).unwrap();
        assert_eq!(
            tree.compute_data_type(product),
            Some(DataType::Decimal {
                precision: None,
                scale: None
            })
        );
    }

    #[test]
    fn test_predicates_are_boolean() {
        let mut tree = SqlTree::new();
        let left = tree.column("a");
        let right = tree.null();
        let eq = tree.binary(left, BinaryOp::Eq, right).unwrap();
        assert_eq!(tree.compute_data_type(eq), Some(DataType::Boolean));
        assert_eq!(tree.compute_data_type(right), None);
    }
}
