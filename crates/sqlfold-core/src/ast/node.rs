//! Node variants.
//!
//! Nodes refer to their children by [`NodeId`]. Child ids are private and only
//! reachable through accessors, so every relink goes through [`SqlTree`], which
//! keeps the parent back-references consistent.
//!
//! [`SqlTree`]: super::SqlTree

use core::cell::OnceCell;

use rust_decimal::Decimal;

use super::operator::{AggregateOption, BinaryOp, KeepPosition, OrderDirection, UnaryOp};
use super::types::DataType;
use super::NodeId;
use crate::fingerprint::hash64;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// NULL literal.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Integer literal.
    Integer(i64),
    /// Exact decimal literal.
    Number(Decimal),
    /// Character string literal.
    Char(String),
    /// Hex string literal, stored as upper-case hex digits.
    Hex(String),
}

impl Literal {
    /// Creates a hex literal from raw bytes.
    #[must_use]
    pub fn hex(bytes: &[u8]) -> Self {
        Self::Hex(bytes.iter().map(|byte| format!("{byte:02X}")).collect())
    }

    /// Returns true if the literal carries a value that parameter extraction
    /// moves out of the tree. `NULL` does not qualify.
    #[must_use]
    pub const fn is_extractable(&self) -> bool {
        !matches!(self, Self::Null)
    }

    /// Decodes the bytes of a hex literal.
    ///
    /// Returns `None` for other literals and for malformed digit strings.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Hex(digits) => decode_hex(digits),
            _ => None,
        }
    }
}

fn decode_hex(digits: &str) -> Option<Vec<u8>> {
    if digits.len() % 2 != 0 {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| digits.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

/// A column reference (optionally qualified with table name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Table name or alias (optional).
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

/// Wildcard (`*` or `t.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    /// Table qualifier (optional).
    pub table: Option<String>,
}

/// A bind-variable reference: `?` or `:name`.
///
/// Parameter extraction substitutes an unnamed placeholder for every literal it
/// moves out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholder {
    /// The parameter name, `None` for `?`.
    pub name: Option<String>,
}

/// A binary expression.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    left: NodeId,
    /// Operator.
    pub op: BinaryOp,
    right: NodeId,
    merged_list: Option<Vec<NodeId>>,
}

impl BinaryExpr {
    #[must_use]
    pub const fn new(left: NodeId, op: BinaryOp, right: NodeId) -> Self {
        Self {
            left,
            op,
            right,
            merged_list: None,
        }
    }

    /// Records sibling comparisons that were folded into this one.
    #[must_use]
    pub fn with_merged_list(mut self, merged: Vec<NodeId>) -> Self {
        self.merged_list = Some(merged);
        self
    }

    #[must_use]
    pub const fn left(&self) -> NodeId {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> NodeId {
        self.right
    }

    /// The folded sibling comparisons, if this node heads a merged chain.
    #[must_use]
    pub fn merged_list(&self) -> Option<&[NodeId]> {
        self.merged_list.as_deref()
    }
}

/// A unary expression.
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    /// Operator.
    pub op: UnaryOp,
    operand: NodeId,
}

impl UnaryExpr {
    #[must_use]
    pub const fn new(op: UnaryOp, operand: NodeId) -> Self {
        Self { op, operand }
    }

    #[must_use]
    pub const fn operand(&self) -> NodeId {
        self.operand
    }
}

/// Parenthesized expression.
#[derive(Debug, Clone)]
pub struct ParenExpr {
    inner: NodeId,
}

impl ParenExpr {
    #[must_use]
    pub const fn new(inner: NodeId) -> Self {
        Self { inner }
    }

    #[must_use]
    pub const fn inner(&self) -> NodeId {
        self.inner
    }
}

/// `test [NOT] BETWEEN begin AND end`.
#[derive(Debug, Clone)]
pub struct BetweenExpr {
    test: NodeId,
    /// Whether this is NOT BETWEEN.
    pub negated: bool,
    begin: NodeId,
    end: NodeId,
}

impl BetweenExpr {
    #[must_use]
    pub const fn new(test: NodeId, negated: bool, begin: NodeId, end: NodeId) -> Self {
        Self {
            test,
            negated,
            begin,
            end,
        }
    }

    #[must_use]
    pub const fn test(&self) -> NodeId {
        self.test
    }

    #[must_use]
    pub const fn begin(&self) -> NodeId {
        self.begin
    }

    #[must_use]
    pub const fn end(&self) -> NodeId {
        self.end
    }
}

/// `expr [NOT] IN (targets...)`.
#[derive(Debug, Clone)]
pub struct InListExpr {
    expr: NodeId,
    /// Whether this is NOT IN.
    pub negated: bool,
    targets: Vec<NodeId>,
}

impl InListExpr {
    #[must_use]
    pub const fn new(expr: NodeId, negated: bool, targets: Vec<NodeId>) -> Self {
        Self {
            expr,
            negated,
            targets,
        }
    }

    #[must_use]
    pub const fn expr(&self) -> NodeId {
        self.expr
    }

    #[must_use]
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }
}

/// `expr IS [NOT] NULL`.
#[derive(Debug, Clone)]
pub struct IsNullExpr {
    expr: NodeId,
    /// Whether this is IS NOT NULL.
    pub negated: bool,
}

impl IsNullExpr {
    #[must_use]
    pub const fn new(expr: NodeId, negated: bool) -> Self {
        Self { expr, negated }
    }

    #[must_use]
    pub const fn expr(&self) -> NodeId {
        self.expr
    }
}

/// `CAST(expr AS data_type)`.
#[derive(Debug, Clone)]
pub struct CastExpr {
    expr: NodeId,
    /// Target type.
    pub data_type: DataType,
}

impl CastExpr {
    #[must_use]
    pub const fn new(expr: NodeId, data_type: DataType) -> Self {
        Self { expr, data_type }
    }

    #[must_use]
    pub const fn expr(&self) -> NodeId {
        self.expr
    }
}

/// A plain (non-aggregate) function call.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    arguments: Vec<NodeId>,
}

impl FunctionCall {
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Vec<NodeId>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    #[must_use]
    pub fn arguments(&self) -> &[NodeId] {
        &self.arguments
    }
}

/// An aggregate or window function call.
///
/// Children are visited in the order arguments, KEEP, OVER, WITHIN GROUP.
#[derive(Debug, Clone)]
pub struct AggregateExpr {
    method_name: String,
    method_name_hash: OnceCell<u64>,
    option: Option<AggregateOption>,
    arguments: Vec<NodeId>,
    keep: Option<NodeId>,
    over: Option<NodeId>,
    within_group: Option<NodeId>,
    ignore_nulls: bool,
}

impl AggregateExpr {
    #[must_use]
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            method_name_hash: OnceCell::new(),
            option: None,
            arguments: Vec::new(),
            keep: None,
            over: None,
            within_group: None,
            ignore_nulls: false,
        }
    }

    #[must_use]
    pub const fn with_option(mut self, option: Option<AggregateOption>) -> Self {
        self.option = option;
        self
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<NodeId>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub const fn with_keep(mut self, keep: Option<NodeId>) -> Self {
        self.keep = keep;
        self
    }

    #[must_use]
    pub const fn with_over(mut self, over: Option<NodeId>) -> Self {
        self.over = over;
        self
    }

    #[must_use]
    pub const fn with_within_group(mut self, within_group: Option<NodeId>) -> Self {
        self.within_group = within_group;
        self
    }

    #[must_use]
    pub const fn with_ignore_nulls(mut self, ignore_nulls: bool) -> Self {
        self.ignore_nulls = ignore_nulls;
        self
    }

    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Fingerprint of the method name, computed on first use.
    #[must_use]
    pub fn method_name_hash64(&self) -> u64 {
        *self
            .method_name_hash
            .get_or_init(|| hash64(&self.method_name))
    }

    #[must_use]
    pub const fn option(&self) -> Option<AggregateOption> {
        self.option
    }

    #[must_use]
    pub fn arguments(&self) -> &[NodeId] {
        &self.arguments
    }

    #[must_use]
    pub const fn keep(&self) -> Option<NodeId> {
        self.keep
    }

    #[must_use]
    pub const fn over(&self) -> Option<NodeId> {
        self.over
    }

    #[must_use]
    pub const fn within_group(&self) -> Option<NodeId> {
        self.within_group
    }

    #[must_use]
    pub const fn is_ignore_nulls(&self) -> bool {
        self.ignore_nulls
    }

    pub(crate) fn set_method_name(&mut self, method_name: String) {
        self.method_name = method_name;
        self.method_name_hash = OnceCell::new();
    }

    pub(crate) fn set_option(&mut self, option: Option<AggregateOption>) {
        self.option = option;
    }

    pub(crate) fn set_ignore_nulls(&mut self, ignore_nulls: bool) {
        self.ignore_nulls = ignore_nulls;
    }
}

/// `KEEP (DENSE_RANK FIRST|LAST ORDER BY ...)`.
#[derive(Debug, Clone)]
pub struct KeepClause {
    pub position: KeepPosition,
    order_by: NodeId,
}

impl KeepClause {
    #[must_use]
    pub const fn new(position: KeepPosition, order_by: NodeId) -> Self {
        Self { position, order_by }
    }

    #[must_use]
    pub const fn order_by(&self) -> NodeId {
        self.order_by
    }
}

/// `OVER ([PARTITION BY ...] [ORDER BY ...])`.
#[derive(Debug, Clone)]
pub struct OverClause {
    partition_by: Vec<NodeId>,
    order_by: Option<NodeId>,
}

impl OverClause {
    #[must_use]
    pub const fn new(partition_by: Vec<NodeId>, order_by: Option<NodeId>) -> Self {
        Self {
            partition_by,
            order_by,
        }
    }

    #[must_use]
    pub fn partition_by(&self) -> &[NodeId] {
        &self.partition_by
    }

    #[must_use]
    pub const fn order_by(&self) -> Option<NodeId> {
        self.order_by
    }
}

/// `ORDER BY item, ...`.
#[derive(Debug, Clone)]
pub struct OrderByClause {
    items: Vec<NodeId>,
}

impl OrderByClause {
    #[must_use]
    pub const fn new(items: Vec<NodeId>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }
}

/// One sort key.
#[derive(Debug, Clone)]
pub struct OrderByItem {
    expr: NodeId,
    /// Explicit direction, `None` when omitted.
    pub direction: Option<OrderDirection>,
}

impl OrderByItem {
    #[must_use]
    pub const fn new(expr: NodeId, direction: Option<OrderDirection>) -> Self {
        Self { expr, direction }
    }

    #[must_use]
    pub const fn expr(&self) -> NodeId {
        self.expr
    }
}

/// A SELECT statement.
#[derive(Debug, Clone)]
pub struct SelectStatement {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    columns: Vec<NodeId>,
    from: Option<NodeId>,
    where_clause: Option<NodeId>,
    group_by: Option<NodeId>,
    order_by: Option<NodeId>,
    limit: Option<NodeId>,
}

impl SelectStatement {
    #[must_use]
    pub const fn new(columns: Vec<NodeId>) -> Self {
        Self {
            distinct: false,
            columns,
            from: None,
            where_clause: None,
            group_by: None,
            order_by: None,
            limit: None,
        }
    }

    #[must_use]
    pub const fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    #[must_use]
    pub const fn with_from(mut self, from: Option<NodeId>) -> Self {
        self.from = from;
        self
    }

    #[must_use]
    pub const fn with_where(mut self, where_clause: Option<NodeId>) -> Self {
        self.where_clause = where_clause;
        self
    }

    #[must_use]
    pub const fn with_group_by(mut self, group_by: Option<NodeId>) -> Self {
        self.group_by = group_by;
        self
    }

    #[must_use]
    pub const fn with_order_by(mut self, order_by: Option<NodeId>) -> Self {
        self.order_by = order_by;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<NodeId>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[NodeId] {
        &self.columns
    }

    #[must_use]
    pub const fn from(&self) -> Option<NodeId> {
        self.from
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<NodeId> {
        self.where_clause
    }

    #[must_use]
    pub const fn group_by(&self) -> Option<NodeId> {
        self.group_by
    }

    #[must_use]
    pub const fn order_by(&self) -> Option<NodeId> {
        self.order_by
    }

    #[must_use]
    pub const fn limit(&self) -> Option<NodeId> {
        self.limit
    }
}

/// A column in a SELECT list.
#[derive(Debug, Clone)]
pub struct SelectColumn {
    expr: NodeId,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    #[must_use]
    pub const fn new(expr: NodeId, alias: Option<String>) -> Self {
        Self { expr, alias }
    }

    #[must_use]
    pub const fn expr(&self) -> NodeId {
        self.expr
    }
}

/// A table in the FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

/// `GROUP BY items [HAVING having]`.
#[derive(Debug, Clone)]
pub struct GroupByClause {
    items: Vec<NodeId>,
    having: Option<NodeId>,
}

impl GroupByClause {
    #[must_use]
    pub const fn new(items: Vec<NodeId>, having: Option<NodeId>) -> Self {
        Self { items, having }
    }

    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    #[must_use]
    pub const fn having(&self) -> Option<NodeId> {
        self.having
    }
}

/// A tree node.
#[derive(Debug, Clone)]
pub enum Node {
    Column(Column),
    Wildcard(Wildcard),
    Literal(Literal),
    Placeholder(Placeholder),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpr),
    Between(BetweenExpr),
    InList(InListExpr),
    IsNull(IsNullExpr),
    Cast(CastExpr),
    Function(FunctionCall),
    Aggregate(AggregateExpr),
    Keep(KeepClause),
    Over(OverClause),
    OrderBy(OrderByClause),
    OrderByItem(OrderByItem),
    Select(SelectStatement),
    SelectColumn(SelectColumn),
    Table(TableRef),
    GroupBy(GroupByClause),
}

/// The optional child slots addressable by the tree's slot setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionalSlot {
    Keep,
    Over,
    WithinGroup,
}

impl OptionalSlot {
    pub(crate) const fn owner_kind(self) -> &'static str {
        match self {
            Self::Keep | Self::Over | Self::WithinGroup => "an aggregate call",
        }
    }
}

impl Node {
    /// Human-readable variant name, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Column(_) => "a column",
            Self::Wildcard(_) => "a wildcard",
            Self::Literal(_) => "a literal",
            Self::Placeholder(_) => "a placeholder",
            Self::Binary(_) => "a binary expression",
            Self::Unary(_) => "a unary expression",
            Self::Paren(_) => "a parenthesized expression",
            Self::Between(_) => "a BETWEEN expression",
            Self::InList(_) => "an IN list",
            Self::IsNull(_) => "an IS NULL test",
            Self::Cast(_) => "a CAST expression",
            Self::Function(_) => "a function call",
            Self::Aggregate(_) => "an aggregate call",
            Self::Keep(_) => "a KEEP clause",
            Self::Over(_) => "an OVER clause",
            Self::OrderBy(_) => "an ORDER BY clause",
            Self::OrderByItem(_) => "an ORDER BY item",
            Self::Select(_) => "a SELECT statement",
            Self::SelectColumn(_) => "a SELECT column",
            Self::Table(_) => "a table reference",
            Self::GroupBy(_) => "a GROUP BY clause",
        }
    }

    /// Returns true for every literal, `NULL` included.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns the literal carried by this node, if any.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns the binary expression carried by this node, if any.
    #[must_use]
    pub const fn as_binary(&self) -> Option<&BinaryExpr> {
        match self {
            Self::Binary(binary) => Some(binary),
            _ => None,
        }
    }

    /// Returns the aggregate call carried by this node, if any.
    #[must_use]
    pub const fn as_aggregate(&self) -> Option<&AggregateExpr> {
        match self {
            Self::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    /// The ordered value sequence of nodes that own one: call arguments and
    /// IN-list targets.
    #[must_use]
    pub fn sequence(&self) -> Option<&[NodeId]> {
        match self {
            Self::Function(call) => Some(&call.arguments),
            Self::Aggregate(call) => Some(&call.arguments),
            Self::InList(list) => Some(&list.targets),
            _ => None,
        }
    }

    /// Children in traversal order. Merged lists are not part of traversal.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Column(_)
            | Self::Wildcard(_)
            | Self::Literal(_)
            | Self::Placeholder(_)
            | Self::Table(_) => Vec::new(),
            Self::Binary(x) => vec![x.left, x.right],
            Self::Unary(x) => vec![x.operand],
            Self::Paren(x) => vec![x.inner],
            Self::Between(x) => vec![x.test, x.begin, x.end],
            Self::InList(x) => core::iter::once(x.expr)
                .chain(x.targets.iter().copied())
                .collect(),
            Self::IsNull(x) => vec![x.expr],
            Self::Cast(x) => vec![x.expr],
            Self::Function(x) => x.arguments.clone(),
            Self::Aggregate(x) => x
                .arguments
                .iter()
                .copied()
                .chain(x.keep)
                .chain(x.over)
                .chain(x.within_group)
                .collect(),
            Self::Keep(x) => vec![x.order_by],
            Self::Over(x) => x
                .partition_by
                .iter()
                .copied()
                .chain(x.order_by)
                .collect(),
            Self::OrderBy(x) => x.items.clone(),
            Self::OrderByItem(x) => vec![x.expr],
            Self::Select(x) => x
                .columns
                .iter()
                .copied()
                .chain(x.from)
                .chain(x.where_clause)
                .chain(x.group_by)
                .chain(x.order_by)
                .chain(x.limit)
                .collect(),
            Self::SelectColumn(x) => vec![x.expr],
            Self::GroupBy(x) => x.items.iter().copied().chain(x.having).collect(),
        }
    }

    /// Every owned child: traversal children followed by merged-list entries.
    ///
    /// The order matches [`Node::owned_slots_mut`].
    #[must_use]
    pub fn owned_children(&self) -> Vec<NodeId> {
        let mut children = self.children();
        if let Self::Binary(BinaryExpr {
            merged_list: Some(merged),
            ..
        }) = self
        {
            children.extend(merged.iter().copied());
        }
        children
    }

    /// Mutable access to every owned child slot, in [`Node::owned_children`]
    /// order.
    pub(crate) fn owned_slots_mut(&mut self) -> Vec<&mut NodeId> {
        match self {
            Self::Column(_)
            | Self::Wildcard(_)
            | Self::Literal(_)
            | Self::Placeholder(_)
            | Self::Table(_) => Vec::new(),
            Self::Binary(x) => {
                let mut slots = vec![&mut x.left, &mut x.right];
                if let Some(merged) = x.merged_list.as_mut() {
                    slots.extend(merged.iter_mut());
                }
                slots
            }
            Self::Unary(x) => vec![&mut x.operand],
            Self::Paren(x) => vec![&mut x.inner],
            Self::Between(x) => vec![&mut x.test, &mut x.begin, &mut x.end],
            Self::InList(x) => core::iter::once(&mut x.expr)
                .chain(x.targets.iter_mut())
                .collect(),
            Self::IsNull(x) => vec![&mut x.expr],
            Self::Cast(x) => vec![&mut x.expr],
            Self::Function(x) => x.arguments.iter_mut().collect(),
            Self::Aggregate(x) => x
                .arguments
                .iter_mut()
                .chain(x.keep.as_mut())
                .chain(x.over.as_mut())
                .chain(x.within_group.as_mut())
                .collect(),
            Self::Keep(x) => vec![&mut x.order_by],
            Self::Over(x) => x
                .partition_by
                .iter_mut()
                .chain(x.order_by.as_mut())
                .collect(),
            Self::OrderBy(x) => x.items.iter_mut().collect(),
            Self::OrderByItem(x) => vec![&mut x.expr],
            Self::Select(x) => x
                .columns
                .iter_mut()
                .chain(x.from.as_mut())
                .chain(x.where_clause.as_mut())
                .chain(x.group_by.as_mut())
                .chain(x.order_by.as_mut())
                .chain(x.limit.as_mut())
                .collect(),
            Self::SelectColumn(x) => vec![&mut x.expr],
            Self::GroupBy(x) => x.items.iter_mut().chain(x.having.as_mut()).collect(),
        }
    }

    pub(crate) fn optional_slot_mut(&mut self, slot: OptionalSlot) -> Option<&mut Option<NodeId>> {
        match (self, slot) {
            (Self::Aggregate(x), OptionalSlot::Keep) => Some(&mut x.keep),
            (Self::Aggregate(x), OptionalSlot::Over) => Some(&mut x.over),
            (Self::Aggregate(x), OptionalSlot::WithinGroup) => Some(&mut x.within_group),
            _ => None,
        }
    }

    pub(crate) fn arguments_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Self::Function(call) => Some(&mut call.arguments),
            Self::Aggregate(call) => Some(&mut call.arguments),
            _ => None,
        }
    }

    pub(crate) fn merged_list_mut(&mut self) -> Option<&mut Option<Vec<NodeId>>> {
        match self {
            Self::Binary(binary) => Some(&mut binary.merged_list),
            _ => None,
        }
    }

    /// The node's own tags, without children. Two nodes are structurally equal
    /// iff their shapes are equal and their children are pairwise equal.
    pub(crate) fn shape(&self) -> Shape<'_> {
        match self {
            Self::Column(x) => Shape::Column(x.table.as_deref(), &x.name),
            Self::Wildcard(x) => Shape::Wildcard(x.table.as_deref()),
            Self::Literal(x) => Shape::Literal(x),
            Self::Placeholder(x) => Shape::Placeholder(x.name.as_deref()),
            Self::Binary(x) => Shape::Binary(x.op),
            Self::Unary(x) => Shape::Unary(x.op),
            Self::Paren(_) => Shape::Paren,
            Self::Between(x) => Shape::Between(x.negated),
            Self::InList(x) => Shape::InList(x.negated, x.targets.len()),
            Self::IsNull(x) => Shape::IsNull(x.negated),
            Self::Cast(x) => Shape::Cast(&x.data_type),
            Self::Function(x) => Shape::Function(&x.name, x.arguments.len()),
            Self::Aggregate(x) => Shape::Aggregate {
                name: &x.method_name,
                option: x.option,
                ignore_nulls: x.ignore_nulls,
                arguments: x.arguments.len(),
                keep: x.keep.is_some(),
                over: x.over.is_some(),
                within_group: x.within_group.is_some(),
            },
            Self::Keep(x) => Shape::Keep(x.position),
            Self::Over(x) => Shape::Over(x.partition_by.len(), x.order_by.is_some()),
            Self::OrderBy(x) => Shape::OrderBy(x.items.len()),
            Self::OrderByItem(x) => Shape::OrderByItem(x.direction),
            Self::Select(x) => Shape::Select {
                distinct: x.distinct,
                columns: x.columns.len(),
                clauses: [
                    x.from.is_some(),
                    x.where_clause.is_some(),
                    x.group_by.is_some(),
                    x.order_by.is_some(),
                    x.limit.is_some(),
                ],
            },
            Self::SelectColumn(x) => Shape::SelectColumn(x.alias.as_deref()),
            Self::Table(x) => Shape::Table(&x.name, x.alias.as_deref()),
            Self::GroupBy(x) => Shape::GroupBy(x.items.len(), x.having.is_some()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) enum Shape<'a> {
    Column(Option<&'a str>, &'a str),
    Wildcard(Option<&'a str>),
    Literal(&'a Literal),
    Placeholder(Option<&'a str>),
    Binary(BinaryOp),
    Unary(UnaryOp),
    Paren,
    Between(bool),
    InList(bool, usize),
    IsNull(bool),
    Cast(&'a DataType),
    Function(&'a str, usize),
    Aggregate {
        name: &'a str,
        option: Option<AggregateOption>,
        ignore_nulls: bool,
        arguments: usize,
        keep: bool,
        over: bool,
        within_group: bool,
    },
    Keep(KeepPosition),
    Over(usize, bool),
    OrderBy(usize),
    OrderByItem(Option<OrderDirection>),
    Select {
        distinct: bool,
        columns: usize,
        clauses: [bool; 5],
    },
    SelectColumn(Option<&'a str>),
    Table(&'a str, Option<&'a str>),
    GroupBy(usize, bool),
}
