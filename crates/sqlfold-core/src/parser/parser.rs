//! SQL Parser implementation.

use super::error::ParseError;
use super::pratt::{infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op};
use crate::ast::{
    AggregateExpr, AggregateOption, BinaryOp, CastExpr, DataType, GroupByClause, IsNullExpr,
    KeepClause, KeepPosition, Literal, Node, NodeId, OrderByClause, OrderByItem, OrderDirection,
    OverClause, ParenExpr, Placeholder, SelectColumn, SelectStatement, SqlTree, TableRef,
    UnaryExpr, UnaryOp, Wildcard,
};
use crate::fingerprint::{hash64, is_aggregate};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Words that end a FROM item even though they are not keywords.
const CLAUSE_WORDS: &[&str] = &["FETCH", "OFFSET"];

/// SQL parser.
///
/// The parser owns the tree it builds; [`Parser::parse_statement`] and
/// [`Parser::parse_expr`] consume it and return the tree with its root set.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    tree: SqlTree,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            tree: SqlTree::new(),
        }
    }

    /// Parses one `SELECT` statement, optionally followed by a semicolon.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid syntax or trailing input.
    pub fn parse_statement(mut self) -> Result<SqlTree, ParseError> {
        let select = self.parse_select_statement()?;
        self.finish(select)
    }

    /// Parses a standalone expression.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid syntax or trailing input.
    pub fn parse_expr(mut self) -> Result<SqlTree, ParseError> {
        let expr = self.parse_expression(0)?;
        self.finish(expr)
    }

    fn finish(mut self, root: NodeId) -> Result<SqlTree, ParseError> {
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.check(&TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }
        self.tree.set_root(root)?;
        Ok(self.tree)
    }

    // Statements.

    fn parse_select_statement(&mut self) -> Result<NodeId, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };

        let columns = self.parse_select_columns()?;

        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_table_ref()?)
        } else {
            None
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_expression_list()?;
            let having = if self.eat_keyword(Keyword::Having) {
                Some(self.parse_expression(0)?)
            } else {
                None
            };
            Some(self.insert(Node::GroupBy(GroupByClause::new(items, having)))?)
        } else {
            None
        };

        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_order_by_list()?)
        } else {
            None
        };

        let limit = self.parse_limit()?;

        let select = SelectStatement::new(columns)
            .with_distinct(distinct)
            .with_from(from)
            .with_where(where_clause)
            .with_group_by(group_by)
            .with_order_by(order_by)
            .with_limit(limit);
        self.insert(Node::Select(select))
    }

    fn parse_select_columns(&mut self) -> Result<Vec<NodeId>, ParseError> {
        let mut columns = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let alias = self.parse_optional_alias()?;
            columns.push(self.insert(Node::SelectColumn(SelectColumn::new(expr, alias)))?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(columns)
    }

    fn parse_table_ref(&mut self) -> Result<NodeId, ParseError> {
        let name = self.expect_name()?;
        let alias = self.parse_optional_alias()?;
        self.insert(Node::Table(TableRef { name, alias }))
    }

    /// Parses `AS name` or a bare alias name.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_name().map(Some);
        }
        let alias = match &self.current.kind {
            TokenKind::Identifier(name) if !is_clause_word(name) => name.clone(),
            TokenKind::QuotedIdentifier(name) => name.clone(),
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(alias))
    }

    /// Parses the items of an `ORDER BY` whose keywords were consumed.
    fn parse_order_by_list(&mut self) -> Result<NodeId, ParseError> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.eat_keyword(Keyword::Asc) {
                Some(OrderDirection::Asc)
            } else if self.eat_keyword(Keyword::Desc) {
                Some(OrderDirection::Desc)
            } else {
                None
            };
            items.push(self.insert(Node::OrderByItem(OrderByItem::new(expr, direction)))?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.insert(Node::OrderBy(OrderByClause::new(items)))
    }

    /// Parses a row limit in any of the styles the renderer writes:
    /// `LIMIT n`, `FETCH FIRST n ROWS ONLY` or
    /// `OFFSET 0 ROWS FETCH NEXT n ROWS ONLY`.
    fn parse_limit(&mut self) -> Result<Option<NodeId>, ParseError> {
        if self.eat_keyword(Keyword::Limit) {
            return self.parse_expression(0).map(Some);
        }
        if self.check_word("OFFSET") {
            let offset = self.current.span;
            self.advance();
            if !matches!(self.current.kind, TokenKind::Integer(0)) {
                return Err(ParseError::new(
                    "Only OFFSET 0 is supported",
                    offset.to(self.current.span),
                ));
            }
            self.advance();
            self.expect_rows()?;
            if !self.check_word("FETCH") {
                return Err(self.unexpected("FETCH"));
            }
        }
        if !self.check_word("FETCH") {
            return Ok(None);
        }
        self.advance();
        if !self.eat_keyword(Keyword::First) {
            self.expect_word("NEXT")?;
        }
        let limit = self.parse_expression(0)?;
        self.expect_rows()?;
        self.expect_word("ONLY")?;
        Ok(Some(limit))
    }

    fn expect_rows(&mut self) -> Result<(), ParseError> {
        if self.check_word("ROW") {
            self.advance();
            Ok(())
        } else {
            self.expect_word("ROWS")
        }
    }

    // Expressions.

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<NodeId, ParseError> {
        let mut left = self.parse_prefix()?;

        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            left = if self.eat_keyword(Keyword::Is) {
                let negated = self.eat_keyword(Keyword::Not);
                self.expect_keyword(Keyword::Null)?;
                self.insert(Node::IsNull(IsNullExpr::new(left, negated)))?
            } else if self.eat_keyword(Keyword::Not) {
                self.parse_predicate(left, true, r_bp)?
            } else if self.check_keyword(Keyword::In)
                || self.check_keyword(Keyword::Between)
                || self.check_keyword(Keyword::Like)
            {
                self.parse_predicate(left, false, r_bp)?
            } else if let Some(op) = token_to_binary_op(&self.current.kind) {
                self.advance();
                let right = self.parse_expression(r_bp)?;
                self.tree.binary(left, op, right)?
            } else {
                break;
            };
        }

        Ok(left)
    }

    /// Parses `[NOT] LIKE`, `[NOT] IN` or `[NOT] BETWEEN` after its left operand.
    fn parse_predicate(
        &mut self,
        left: NodeId,
        negated: bool,
        r_bp: u8,
    ) -> Result<NodeId, ParseError> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let targets = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(self.tree.in_list(left, negated, targets)?)
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let begin = self.parse_expression(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let end = self.parse_expression(r_bp)?;
                Ok(self.tree.between(left, negated, begin, end)?)
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.advance();
                let right = self.parse_expression(r_bp)?;
                let op = if negated {
                    BinaryOp::NotLike
                } else {
                    BinaryOp::Like
                };
                Ok(self.tree.binary(left, op, right)?)
            }
            _ => Err(self.unexpected("LIKE, IN or BETWEEN")),
        }
    }

    /// Parses a prefix expression (unary operators or primary).
    fn parse_prefix(&mut self) -> Result<NodeId, ParseError> {
        let (Some(op), Some(bp)) = (
            token_to_unary_op(&self.current.kind),
            prefix_binding_power(&self.current.kind),
        ) else {
            return self.parse_primary();
        };
        self.advance();

        // A minus sign directly before a number is part of the literal.
        if op == UnaryOp::Neg {
            let negative = match self.current.kind {
                TokenKind::Integer(value) => Some(Literal::Integer(-value)),
                TokenKind::Decimal(value) => Some(Literal::Number(-value)),
                _ => None,
            };
            if let Some(literal) = negative {
                self.advance();
                return Ok(self.tree.literal(literal));
            }
        }

        let operand = self.parse_expression(bp)?;
        self.insert(Node::Unary(UnaryExpr::new(op, operand)))
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let span = self.current.span;
        let kind = self.current.kind.clone();
        match kind {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(self.tree.integer(value))
            }
            TokenKind::Decimal(value) => {
                self.advance();
                Ok(self.tree.number(value))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(self.tree.string(value))
            }
            TokenKind::Hex(digits) => {
                self.advance();
                Ok(self.tree.literal(Literal::Hex(digits)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(self.tree.null())
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(self.tree.boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(self.tree.boolean(false))
            }
            TokenKind::Question => {
                self.advance();
                Ok(self.tree.placeholder())
            }
            TokenKind::NamedParameter(name) => {
                self.advance();
                self.insert(Node::Placeholder(Placeholder { name: Some(name) }))
            }
            TokenKind::Star => {
                self.advance();
                Ok(self.tree.wildcard())
            }
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen)?;
                self.insert(Node::Paren(ParenExpr::new(inner)))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    if is_aggregate(hash64(&name)) {
                        self.parse_aggregate_call(name)
                    } else {
                        self.parse_function_call(name)
                    }
                } else {
                    self.parse_column_ref(name)
                }
            }
            TokenKind::QuotedIdentifier(name) => {
                self.advance();
                self.parse_column_ref(name)
            }
            TokenKind::Error(message) => Err(ParseError::new(message, span)),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses `name`, `table.name` or `table.*` after the first name.
    fn parse_column_ref(&mut self, first: String) -> Result<NodeId, ParseError> {
        if !self.check(&TokenKind::Dot) {
            return Ok(self.tree.column(first));
        }
        self.advance();
        if self.check(&TokenKind::Star) {
            self.advance();
            return self.insert(Node::Wildcard(Wildcard { table: Some(first) }));
        }
        let name = self.expect_name()?;
        Ok(self.tree.qualified_column(first, name))
    }

    /// Parses the argument list of a plain function call.
    fn parse_function_call(&mut self, name: String) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let arguments = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(self.tree.function(name, arguments)?)
    }

    /// Parses an aggregate or window call with its trailing clauses, in the
    /// order `IGNORE NULLS`, `WITHIN GROUP`, `KEEP`, `OVER`.
    fn parse_aggregate_call(&mut self, name: String) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let option = if self.eat_keyword(Keyword::Distinct) {
            Some(AggregateOption::Distinct)
        } else if self.eat_keyword(Keyword::All) {
            Some(AggregateOption::All)
        } else {
            None
        };
        let arguments = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        // Oracle also accepts IGNORE NULLS inside the parentheses.
        let inner_ignore_nulls = self.parse_ignore_nulls()?;
        self.expect(&TokenKind::RightParen)?;
        let ignore_nulls = self.parse_ignore_nulls()? || inner_ignore_nulls;

        let within_group = if self.eat_keyword(Keyword::Within) {
            self.expect_keyword(Keyword::Group)?;
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Order)?;
            self.expect_keyword(Keyword::By)?;
            let order_by = self.parse_order_by_list()?;
            self.expect(&TokenKind::RightParen)?;
            Some(order_by)
        } else {
            None
        };
        let keep = if self.check_keyword(Keyword::Keep) {
            Some(self.parse_keep_clause()?)
        } else {
            None
        };
        let over = if self.check_keyword(Keyword::Over) {
            Some(self.parse_over_clause()?)
        } else {
            None
        };

        let call = AggregateExpr::new(name)
            .with_option(option)
            .with_arguments(arguments)
            .with_ignore_nulls(ignore_nulls)
            .with_within_group(within_group)
            .with_keep(keep)
            .with_over(over);
        self.insert(Node::Aggregate(call))
    }

    fn parse_ignore_nulls(&mut self) -> Result<bool, ParseError> {
        if !self.eat_keyword(Keyword::Ignore) {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Nulls)?;
        Ok(true)
    }

    /// Parses `KEEP (DENSE_RANK FIRST|LAST ORDER BY ...)`.
    fn parse_keep_clause(&mut self) -> Result<NodeId, ParseError> {
        self.expect_keyword(Keyword::Keep)?;
        self.expect(&TokenKind::LeftParen)?;
        self.expect_word("DENSE_RANK")?;
        let position = if self.eat_keyword(Keyword::First) {
            KeepPosition::First
        } else if self.eat_keyword(Keyword::Last) {
            KeepPosition::Last
        } else {
            return Err(self.unexpected("FIRST or LAST"));
        };
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let order_by = self.parse_order_by_list()?;
        self.expect(&TokenKind::RightParen)?;
        self.insert(Node::Keep(KeepClause::new(position, order_by)))
    }

    /// Parses `OVER ([PARTITION BY ...] [ORDER BY ...])`.
    fn parse_over_clause(&mut self) -> Result<NodeId, ParseError> {
        self.expect_keyword(Keyword::Over)?;
        self.expect(&TokenKind::LeftParen)?;
        let partition_by = if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };
        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_order_by_list()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        self.insert(Node::Over(OverClause::new(partition_by, order_by)))
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<NodeId, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        self.insert(Node::Cast(CastExpr::new(expr, data_type)))
    }

    /// Parses a data type.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let name = self.expect_name()?;
        if name.eq_ignore_ascii_case("DOUBLE") && self.check_word("PRECISION") {
            self.advance();
        }
        let data_type = match DataType::from_name(&name) {
            DataType::Decimal { .. } => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            DataType::Char(_) => DataType::Char(self.parse_optional_length()?),
            DataType::Varchar(_) => DataType::Varchar(self.parse_optional_length()?),
            other => other,
        };
        Ok(data_type)
    }

    fn parse_optional_precision_scale(
        &mut self,
    ) -> Result<(Option<u16>, Option<u16>), ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.advance();
        let precision = self.parse_unsigned()?;
        let scale = if self.check(&TokenKind::Comma) {
            self.advance();
            Some(self.parse_unsigned()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();
        let length = self.parse_unsigned()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    fn parse_unsigned<T: TryFrom<i64>>(&mut self) -> Result<T, ParseError> {
        let TokenKind::Integer(value) = self.current.kind else {
            return Err(self.unexpected("integer"));
        };
        let converted = T::try_from(value)
            .map_err(|_| ParseError::new(format!("Size {value} is out of range"), self.current.span))?;
        self.advance();
        Ok(converted)
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<NodeId>, ParseError> {
        let mut exprs = vec![self.parse_expression(0)?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            exprs.push(self.parse_expression(0)?);
        }
        Ok(exprs)
    }

    // Helper methods.

    fn insert(&mut self, node: Node) -> Result<NodeId, ParseError> {
        Ok(self.tree.insert(node)?)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is an identifier spelling `word`.
    fn check_word(&self, word: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    /// Consumes the current token if it is the given keyword.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.check_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    /// Expects and returns a plain or quoted identifier.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
    }
}

fn is_clause_word(name: &str) -> bool {
    CLAUSE_WORDS.iter().any(|word| name.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprRef;

    fn parse(sql: &str) -> Result<SqlTree, ParseError> {
        Parser::new(sql).parse_statement()
    }

    fn parse_expr(sql: &str) -> SqlTree {
        Parser::new(sql).parse_expr().unwrap()
    }

    fn root(tree: &SqlTree) -> NodeId {
        tree.root().unwrap()
    }

    fn rendered(tree: &SqlTree) -> String {
        tree.expr(root(tree)).to_string()
    }

    #[test]
    fn test_simple_select() {
        let tree = parse("SELECT id, name FROM users").unwrap();
        let Node::Select(select) = tree.node(root(&tree)) else {
            panic!("Expected SELECT");
        };
        assert_eq!(select.columns().len(), 2);
        let from = select.from().unwrap();
        let Node::Table(table) = tree.node(from) else {
            panic!("Expected table");
        };
        assert_eq!(table.name, "users");
        assert!(table.alias.is_none());
    }

    #[test]
    fn test_select_with_where() {
        let tree = parse("SELECT * FROM users WHERE id = 1").unwrap();
        let Node::Select(select) = tree.node(root(&tree)) else {
            panic!("Expected SELECT");
        };
        let where_clause = select.where_clause().unwrap();
        let binary = tree.node(where_clause).as_binary().unwrap();
        assert_eq!(binary.op, BinaryOp::Eq);
        assert_eq!(
            tree.node(binary.right()).as_literal(),
            Some(&Literal::Integer(1))
        );
    }

    #[test]
    fn test_full_select_round_trip() {
        let sql = "SELECT DISTINCT u.id, count(*) AS n FROM users u WHERE u.age >= 18 \
                   GROUP BY u.id HAVING count(*) > 1 ORDER BY n DESC, u.id LIMIT 10";
        let tree = parse(sql).unwrap();
        assert_eq!(
            rendered(&tree),
            "SELECT DISTINCT u.id, count(*) AS n FROM users u WHERE u.age >= 18 \
             GROUP BY u.id HAVING count(*) > 1 ORDER BY n DESC, u.id LIMIT 10"
        );
        tree.verify_links(root(&tree)).unwrap();
    }

    #[test]
    fn test_operator_precedence() {
        let tree = parse_expr("1 + 2 * 3");
        let binary = tree.node(root(&tree)).as_binary().unwrap();
        assert_eq!(binary.op, BinaryOp::Add);
        assert_eq!(tree.node(binary.right()).as_binary().unwrap().op, BinaryOp::Mul);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let tree = parse_expr("a = 1 OR b = 2 AND c = 3");
        let binary = tree.node(root(&tree)).as_binary().unwrap();
        assert_eq!(binary.op, BinaryOp::Or);
        assert_eq!(tree.node(binary.right()).as_binary().unwrap().op, BinaryOp::And);
    }

    #[test]
    fn test_not_takes_comparison() {
        let tree = parse_expr("NOT a = 1 AND b");
        let binary = tree.node(root(&tree)).as_binary().unwrap();
        assert_eq!(binary.op, BinaryOp::And);
        assert!(matches!(tree.node(binary.left()), Node::Unary(u) if u.op == UnaryOp::Not));
    }

    #[test]
    fn test_negative_number_is_literal() {
        let tree = parse_expr("-5");
        assert_eq!(
            tree.node(root(&tree)).as_literal(),
            Some(&Literal::Integer(-5))
        );
        let tree = parse_expr("-a");
        assert!(matches!(tree.node(root(&tree)), Node::Unary(u) if u.op == UnaryOp::Neg));
    }

    #[test]
    fn test_predicates() {
        let tree = parse_expr("a NOT BETWEEN 1 AND 10 AND b IS NOT NULL AND c NOT IN (1, 2) AND d NOT LIKE 'x%'");
        assert_eq!(
            rendered(&tree),
            "a NOT BETWEEN 1 AND 10 AND b IS NOT NULL AND c NOT IN (1, 2) AND d NOT LIKE 'x%'"
        );
    }

    #[test]
    fn test_between_bounds_stop_at_and() {
        let tree = parse_expr("x BETWEEN 1 AND 10 AND y = 2");
        let binary = tree.node(root(&tree)).as_binary().unwrap();
        assert_eq!(binary.op, BinaryOp::And);
        assert!(matches!(tree.node(binary.left()), Node::Between(b) if !b.negated));
    }

    #[test]
    fn test_placeholders() {
        let tree = parse_expr("a = ? AND b = :name");
        assert_eq!(rendered(&tree), "a = ? AND b = :name");
    }

    #[test]
    fn test_hex_and_strings() {
        let tree = parse_expr("a = X'0aff' OR b = 'it''s'");
        assert_eq!(rendered(&tree), "a = X'0AFF' OR b = 'it''s'");
    }

    #[test]
    fn test_parenthesized_expression() {
        let tree = parse_expr("(a + 1) * 2");
        let binary = tree.node(root(&tree)).as_binary().unwrap();
        assert!(matches!(tree.node(binary.left()), Node::Paren(_)));
        assert_eq!(rendered(&tree), "(a + 1) * 2");
    }

    #[test]
    fn test_cast_expression() {
        let tree = parse_expr("CAST(price AS DECIMAL(10, 2))");
        let Node::Cast(cast) = tree.node(root(&tree)) else {
            panic!("Expected CAST");
        };
        assert_eq!(
            cast.data_type,
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
        );
        let tree = parse_expr("CAST(name AS varchar(20))");
        assert_eq!(rendered(&tree), "CAST(name AS VARCHAR(20))");
    }

    #[test]
    fn test_aggregate_detection() {
        let tree = parse_expr("SUM(DISTINCT amount)");
        let call = tree.node(root(&tree)).as_aggregate().unwrap();
        assert_eq!(call.method_name(), "SUM");
        assert_eq!(call.option(), Some(AggregateOption::Distinct));

        let tree = parse_expr("lower(name)");
        assert!(matches!(tree.node(root(&tree)), Node::Function(f) if f.name == "lower"));
    }

    #[test]
    fn test_window_clauses() {
        let sql = "LISTAGG(name, ',') WITHIN GROUP (ORDER BY name) OVER (PARTITION BY dept)";
        assert_eq!(rendered(&parse_expr(sql)), sql);

        let sql = "MAX(salary) KEEP (DENSE_RANK LAST ORDER BY hired) OVER (PARTITION BY dept ORDER BY id DESC)";
        let tree = parse_expr(sql);
        let call = tree.node(root(&tree)).as_aggregate().unwrap();
        assert!(call.keep().is_some());
        assert!(call.over().is_some());
        assert_eq!(rendered(&tree), sql);
    }

    #[test]
    fn test_ignore_nulls_inside_parentheses() {
        let tree = parse_expr("FIRST_VALUE(x IGNORE NULLS) OVER (ORDER BY t)");
        let call = tree.node(root(&tree)).as_aggregate().unwrap();
        assert!(call.is_ignore_nulls());
        assert_eq!(rendered(&tree), "FIRST_VALUE(x) IGNORE NULLS OVER (ORDER BY t)");
    }

    #[test]
    fn test_fetch_first_limit() {
        let tree = parse("SELECT a FROM t FETCH FIRST 5 ROWS ONLY").unwrap();
        let reparsed = parse("SELECT a FROM t OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY").unwrap();
        assert_eq!(tree.expr(root(&tree)), reparsed.expr(root(&reparsed)));
        assert_eq!(rendered(&tree), "SELECT a FROM t LIMIT 5");
    }

    #[test]
    fn test_nonzero_offset_spans_clause() {
        let sql = "SELECT a FROM t OFFSET 5 ROWS FETCH NEXT 1 ROWS ONLY";
        let err = parse(sql).unwrap_err();
        assert_eq!(err.message, "Only OFFSET 0 is supported");
        assert_eq!(err.span, crate::lexer::Span::new(16, 24));
        assert_eq!(&sql[err.span.start..err.span.end], "OFFSET 5");
    }

    #[test]
    fn test_quoted_names() {
        let tree = parse("SELECT \"order\" AS \"my col\" FROM `group`").unwrap();
        assert_eq!(
            rendered(&tree),
            "SELECT \"order\" AS \"my col\" FROM \"group\""
        );
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse("SELECT 1;").is_ok());
    }

    #[test]
    fn test_trailing_input_is_error() {
        let err = parse("SELECT 1 FROM t t2 t3").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("end of input"));
    }

    #[test]
    fn test_not_without_predicate_is_error() {
        let err = Parser::new("a NOT = 1").parse_expr().unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("LIKE, IN or BETWEEN"));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(parse("SELECT 'abc").is_err());
    }

    #[test]
    fn test_structural_equality_ignores_spacing() {
        let a = parse_expr("a=1 AND b<>2");
        let b = parse_expr("a = 1  AND  b != 2");
        assert_eq!(
            ExprRef::new(&a, root(&a)),
            ExprRef::new(&b, root(&b))
        );
    }
}
