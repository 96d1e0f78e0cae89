//! Arena storage for SQL trees.

use core::fmt;

use rust_decimal::Decimal;

use super::compare::ExprRef;
use super::error::AstError;
use super::node::{
    AggregateExpr, BetweenExpr, BinaryExpr, Column, FunctionCall, InListExpr, Literal, Node,
    OptionalSlot, Placeholder, Wildcard,
};
use super::operator::{AggregateOption, BinaryOp};

/// Index of a node inside a [`SqlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in its arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
}

/// A SQL tree: an arena of nodes with parent back-references.
///
/// Every node is owned by at most one other node. The parent recorded on a
/// slot is written only when a child is attached, and cleared when it is
/// detached, so upward navigation always agrees with the owned-child slots.
/// Detached nodes stay in the arena; they are simply no longer reachable from
/// the root.
#[derive(Debug, Clone, Default)]
pub struct SqlTree {
    slots: Vec<Slot>,
    root: Option<NodeId>,
}

impl SqlTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            root: None,
        }
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Marks a detached node as the root of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::AlreadyAttached`] if the node has a parent.
    pub fn set_root(&mut self, root: NodeId) -> Result<(), AstError> {
        if let Some(parent) = self.parent(root) {
            return Err(AstError::AlreadyAttached { node: root, parent });
        }
        self.root = Some(root);
        Ok(())
    }

    /// Returns the node, or `None` if the id does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|slot| &slot.node)
    }

    /// Returns the node.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.slots[id.0].node
    }

    /// Returns the owner of the node, `None` for roots and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Children of a node in traversal order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children()
    }

    /// A structural view of the subtree rooted at `id`.
    #[must_use]
    pub const fn expr(&self, id: NodeId) -> ExprRef<'_> {
        ExprRef::new(self, id)
    }

    /// Returns true if `ancestor` is `id` or owns it transitively.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Adds a node to the arena and attaches its children to it.
    ///
    /// # Errors
    ///
    /// Fails if a child is already attached or appears twice.
    pub fn insert(&mut self, node: Node) -> Result<NodeId, AstError> {
        let mut children = node.owned_children();
        for &child in &children {
            if let Some(parent) = self.parent(child) {
                return Err(AstError::AlreadyAttached {
                    node: child,
                    parent,
                });
            }
        }
        children.sort_unstable();
        if let Some(pair) = children.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(AstError::DuplicateChild(pair[0]));
        }
        Ok(self.push(node))
    }

    /// Pushes a node whose children are known to be detached and distinct.
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len());
        let children = node.owned_children();
        self.slots.push(Slot { node, parent: None });
        for child in children {
            self.link(id, child);
        }
        id
    }

    /// Records `owner` as the parent of `child`. The only writer of parents.
    fn link(&mut self, owner: NodeId, child: NodeId) {
        self.slots[child.0].parent = Some(owner);
    }

    fn unlink(&mut self, child: NodeId) {
        self.slots[child.0].parent = None;
    }

    fn check_attachable(&self, owner: NodeId, child: NodeId) -> Result<(), AstError> {
        if let Some(parent) = self.parent(child) {
            return Err(AstError::AlreadyAttached {
                node: child,
                parent,
            });
        }
        if self.is_ancestor(child, owner) {
            return Err(AstError::Cycle { node: child, owner });
        }
        Ok(())
    }

    fn unexpected(&self, node: NodeId, expected: &'static str) -> AstError {
        AstError::UnexpectedNode {
            node,
            expected,
            found: self.node(node).kind_name(),
        }
    }

    // Leaf constructors.

    pub fn literal(&mut self, literal: Literal) -> NodeId {
        self.push(Node::Literal(literal))
    }

    pub fn null(&mut self) -> NodeId {
        self.literal(Literal::Null)
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.literal(Literal::Boolean(value))
    }

    pub fn integer(&mut self, value: i64) -> NodeId {
        self.literal(Literal::Integer(value))
    }

    pub fn number(&mut self, value: Decimal) -> NodeId {
        self.literal(Literal::Number(value))
    }

    pub fn string(&mut self, value: impl Into<String>) -> NodeId {
        self.literal(Literal::Char(value.into()))
    }

    pub fn hex(&mut self, bytes: &[u8]) -> NodeId {
        self.literal(Literal::hex(bytes))
    }

    /// Allocates a detached unnamed placeholder (`?`).
    pub fn placeholder(&mut self) -> NodeId {
        self.push(Node::Placeholder(Placeholder::default()))
    }

    pub fn column(&mut self, name: impl Into<String>) -> NodeId {
        self.push(Node::Column(Column {
            table: None,
            name: name.into(),
        }))
    }

    pub fn qualified_column(&mut self, table: impl Into<String>, name: impl Into<String>) -> NodeId {
        self.push(Node::Column(Column {
            table: Some(table.into()),
            name: name.into(),
        }))
    }

    pub fn wildcard(&mut self) -> NodeId {
        self.push(Node::Wildcard(Wildcard { table: None }))
    }

    // Compound constructors.

    /// Creates a binary expression.
    ///
    /// # Errors
    ///
    /// Fails if an operand is already attached or both operands are the same node.
    pub fn binary(&mut self, left: NodeId, op: BinaryOp, right: NodeId) -> Result<NodeId, AstError> {
        self.insert(Node::Binary(BinaryExpr::new(left, op, right)))
    }

    /// Creates a `BETWEEN` expression.
    ///
    /// # Errors
    ///
    /// Fails if an operand is already attached or repeated.
    pub fn between(
        &mut self,
        test: NodeId,
        negated: bool,
        begin: NodeId,
        end: NodeId,
    ) -> Result<NodeId, AstError> {
        self.insert(Node::Between(BetweenExpr::new(test, negated, begin, end)))
    }

    /// Creates an `IN` list.
    ///
    /// # Errors
    ///
    /// Fails if an operand is already attached or repeated.
    pub fn in_list(
        &mut self,
        expr: NodeId,
        negated: bool,
        targets: Vec<NodeId>,
    ) -> Result<NodeId, AstError> {
        self.insert(Node::InList(InListExpr::new(expr, negated, targets)))
    }

    /// Creates a plain function call.
    ///
    /// # Errors
    ///
    /// Fails if an argument is already attached or repeated.
    pub fn function(
        &mut self,
        name: impl Into<String>,
        arguments: Vec<NodeId>,
    ) -> Result<NodeId, AstError> {
        self.insert(Node::Function(FunctionCall::new(name, arguments)))
    }

    /// Creates an aggregate call with no arguments or clauses.
    pub fn aggregate(&mut self, method_name: impl Into<String>) -> NodeId {
        self.push(Node::Aggregate(AggregateExpr::new(method_name)))
    }

    // Mutation.

    /// Substitutes `new` for the owned child `old` of `owner`.
    ///
    /// Slots are matched by id, never by structural equality. Returns `false`
    /// and leaves the tree untouched if `old` is not a child of `owner`, or if
    /// `new` is attached, equal to `old`, or an ancestor of `owner`.
    pub fn replace(&mut self, owner: NodeId, old: NodeId, new: NodeId) -> bool {
        self.try_replace(owner, old, new).is_ok()
    }

    fn try_replace(&mut self, owner: NodeId, old: NodeId, new: NodeId) -> Result<(), AstError> {
        self.check_attachable(owner, new)?;
        let replaced = self.slots[owner.0]
            .node
            .owned_slots_mut()
            .into_iter()
            .find(|slot| **slot == old)
            .map(|slot| *slot = new)
            .is_some();
        if !replaced {
            return Err(AstError::NotAChild { owner, child: old });
        }
        self.unlink(old);
        self.link(owner, new);
        Ok(())
    }

    /// Puts `new` wherever `old` sits: in its parent's slot, or as the root.
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) -> bool {
        if let Some(parent) = self.parent(old) {
            return self.replace(parent, old, new);
        }
        if self.root == Some(old) && new != old && self.parent(new).is_none() {
            self.root = Some(new);
            return true;
        }
        false
    }

    fn set_required(
        &mut self,
        owner: NodeId,
        new: NodeId,
        expected: &'static str,
        current: fn(&Node) -> Option<NodeId>,
    ) -> Result<NodeId, AstError> {
        let old = current(self.node(owner)).ok_or_else(|| self.unexpected(owner, expected))?;
        self.try_replace(owner, old, new)?;
        Ok(old)
    }

    /// Sets the left operand of a binary expression, returning the detached one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a binary expression or `new` cannot be attached.
    pub fn set_left(&mut self, owner: NodeId, new: NodeId) -> Result<NodeId, AstError> {
        self.set_required(owner, new, "a binary expression", |node| {
            node.as_binary().map(BinaryExpr::left)
        })
    }

    /// Sets the right operand of a binary expression, returning the detached one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a binary expression or `new` cannot be attached.
    pub fn set_right(&mut self, owner: NodeId, new: NodeId) -> Result<NodeId, AstError> {
        self.set_required(owner, new, "a binary expression", |node| {
            node.as_binary().map(BinaryExpr::right)
        })
    }

    /// Sets the lower bound of a `BETWEEN`, returning the detached one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a `BETWEEN` or `new` cannot be attached.
    pub fn set_begin(&mut self, owner: NodeId, new: NodeId) -> Result<NodeId, AstError> {
        self.set_required(owner, new, "a BETWEEN expression", |node| match node {
            Node::Between(between) => Some(between.begin()),
            _ => None,
        })
    }

    /// Sets the upper bound of a `BETWEEN`, returning the detached one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a `BETWEEN` or `new` cannot be attached.
    pub fn set_end(&mut self, owner: NodeId, new: NodeId) -> Result<NodeId, AstError> {
        self.set_required(owner, new, "a BETWEEN expression", |node| match node {
            Node::Between(between) => Some(between.end()),
            _ => None,
        })
    }

    /// Appends an argument to a function or aggregate call.
    ///
    /// A `None` argument is dropped: nothing is attached, no positional entry
    /// is recorded and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a call or the argument cannot be attached.
    pub fn add_argument(&mut self, owner: NodeId, argument: Option<NodeId>) -> Result<bool, AstError> {
        let Some(argument) = argument else {
            return Ok(false);
        };
        if !matches!(self.node(owner), Node::Function(_) | Node::Aggregate(_)) {
            return Err(self.unexpected(owner, "a function or aggregate call"));
        }
        self.check_attachable(owner, argument)?;
        if let Some(arguments) = self.slots[owner.0].node.arguments_mut() {
            arguments.push(argument);
        }
        self.link(owner, argument);
        Ok(true)
    }

    fn set_optional(
        &mut self,
        owner: NodeId,
        new: Option<NodeId>,
        slot: OptionalSlot,
    ) -> Result<Option<NodeId>, AstError> {
        if self.slots[owner.0].node.optional_slot_mut(slot).is_none() {
            return Err(self.unexpected(owner, slot.owner_kind()));
        }
        if let Some(new) = new {
            self.check_attachable(owner, new)?;
        }
        let old = self.slots[owner.0]
            .node
            .optional_slot_mut(slot)
            .and_then(|current| core::mem::replace(current, new));
        if let Some(old) = old {
            self.unlink(old);
        }
        if let Some(new) = new {
            self.link(owner, new);
        }
        Ok(old)
    }

    /// Sets or clears the `KEEP` clause of an aggregate, returning the old one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate or the clause cannot be attached.
    pub fn set_keep(&mut self, owner: NodeId, keep: Option<NodeId>) -> Result<Option<NodeId>, AstError> {
        self.set_optional(owner, keep, OptionalSlot::Keep)
    }

    /// Sets or clears the `OVER` clause of an aggregate, returning the old one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate or the clause cannot be attached.
    pub fn set_over(&mut self, owner: NodeId, over: Option<NodeId>) -> Result<Option<NodeId>, AstError> {
        self.set_optional(owner, over, OptionalSlot::Over)
    }

    /// Sets or clears the `WITHIN GROUP` ordering of an aggregate, returning
    /// the old one.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate or the clause cannot be attached.
    pub fn set_within_group(
        &mut self,
        owner: NodeId,
        within_group: Option<NodeId>,
    ) -> Result<Option<NodeId>, AstError> {
        self.set_optional(owner, within_group, OptionalSlot::WithinGroup)
    }

    /// Replaces the merged list of a binary expression, returning the old list.
    ///
    /// Entries of the old list are detached.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not a binary expression, or an entry is attached,
    /// repeated, or an ancestor of `owner`.
    pub fn set_merged_list(
        &mut self,
        owner: NodeId,
        merged: Option<Vec<NodeId>>,
    ) -> Result<Option<Vec<NodeId>>, AstError> {
        if self.node(owner).as_binary().is_none() {
            return Err(self.unexpected(owner, "a binary expression"));
        }
        if let Some(entries) = merged.as_deref() {
            for (i, &entry) in entries.iter().enumerate() {
                if entries[..i].contains(&entry) {
                    return Err(AstError::DuplicateChild(entry));
                }
                self.check_attachable(owner, entry)?;
            }
        }
        let attached: Vec<NodeId> = merged.iter().flatten().copied().collect();
        let old = self.slots[owner.0]
            .node
            .merged_list_mut()
            .and_then(|current| core::mem::replace(current, merged));
        for &entry in old.iter().flatten() {
            self.unlink(entry);
        }
        for entry in attached {
            self.link(owner, entry);
        }
        Ok(old)
    }

    fn aggregate_mut(&mut self, owner: NodeId) -> Result<&mut AggregateExpr, AstError> {
        let found = self.node(owner).kind_name();
        match &mut self.slots[owner.0].node {
            Node::Aggregate(aggregate) => Ok(aggregate),
            _ => Err(AstError::UnexpectedNode {
                node: owner,
                expected: "an aggregate call",
                found,
            }),
        }
    }

    /// Renames an aggregate. The cached fingerprint is recomputed on next use.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate call.
    pub fn set_method_name(&mut self, owner: NodeId, name: impl Into<String>) -> Result<(), AstError> {
        self.aggregate_mut(owner)?.set_method_name(name.into());
        Ok(())
    }

    /// Sets the `DISTINCT`/`ALL` option of an aggregate.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate call.
    pub fn set_aggregate_option(
        &mut self,
        owner: NodeId,
        option: Option<AggregateOption>,
    ) -> Result<(), AstError> {
        self.aggregate_mut(owner)?.set_option(option);
        Ok(())
    }

    /// Sets the `IGNORE NULLS` flag of an aggregate.
    ///
    /// # Errors
    ///
    /// Fails if `owner` is not an aggregate call.
    pub fn set_ignore_nulls(&mut self, owner: NodeId, ignore_nulls: bool) -> Result<(), AstError> {
        self.aggregate_mut(owner)?.set_ignore_nulls(ignore_nulls);
        Ok(())
    }

    // Cloning.

    /// Deep-copies a subtree inside this arena. The copy is detached.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let mut node = self.node(id).clone();
        let copies: Vec<NodeId> = node
            .owned_children()
            .into_iter()
            .map(|child| self.clone_subtree(child))
            .collect();
        for (slot, copy) in node.owned_slots_mut().into_iter().zip(copies) {
            *slot = copy;
        }
        self.push(node)
    }

    /// Deep-copies a subtree into another arena. The copy is detached.
    pub fn copy_into(&self, id: NodeId, dest: &mut Self) -> NodeId {
        let mut node = self.node(id).clone();
        let copies: Vec<NodeId> = node
            .owned_children()
            .into_iter()
            .map(|child| self.copy_into(child, dest))
            .collect();
        for (slot, copy) in node.owned_slots_mut().into_iter().zip(copies) {
            *slot = copy;
        }
        dest.push(node)
    }

    /// Copies a subtree into a fresh tree rooted at the copy.
    #[must_use]
    pub fn extract(&self, id: NodeId) -> Self {
        let mut tree = Self::new();
        let root = self.copy_into(id, &mut tree);
        tree.root = Some(root);
        tree
    }

    /// Checks that every owned child reachable from `root` points back to
    /// its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::BrokenLink`] for the first inconsistent child.
    pub fn verify_links(&self, root: NodeId) -> Result<(), AstError> {
        let mut pending = vec![root];
        while let Some(owner) = pending.pop() {
            for child in self.node(owner).owned_children() {
                let parent = self.parent(child);
                if parent != Some(owner) {
                    return Err(AstError::BrokenLink {
                        owner,
                        child,
                        parent,
                    });
                }
                pending.push(child);
            }
        }
        Ok(())
    }
}
