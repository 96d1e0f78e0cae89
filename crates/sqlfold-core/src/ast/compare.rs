//! Structural equality and hashing of subtrees.

use core::fmt;
use core::hash::{Hash, Hasher};

use super::node::Node;
use super::{NodeId, SqlTree};
use crate::dialect::GenericDialect;
use crate::visitor::OutputVisitor;

/// A borrowed view of the subtree rooted at one node.
///
/// Two views are equal when their nodes have the same variant, the same tags
/// and pairwise equal children. Parent links, fingerprint caches and merged
/// lists take no part, and the views may come from different trees. Displaying
/// a view renders the subtree with the generic dialect.
#[derive(Clone, Copy)]
pub struct ExprRef<'a> {
    tree: &'a SqlTree,
    id: NodeId,
}

impl<'a> ExprRef<'a> {
    #[must_use]
    pub const fn new(tree: &'a SqlTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[must_use]
    pub const fn tree(&self) -> &'a SqlTree {
        self.tree
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    fn children(&self) -> impl Iterator<Item = ExprRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children()
            .into_iter()
            .map(move |child| ExprRef::new(tree, child))
    }
}

impl PartialEq for ExprRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(*self, *other)];
        while let Some((left, right)) = pending.pop() {
            if left.node().shape() != right.node().shape() {
                return false;
            }
            let left_children: Vec<_> = left.children().collect();
            let right_children: Vec<_> = right.children().collect();
            if left_children.len() != right_children.len() {
                return false;
            }
            pending.extend(left_children.into_iter().zip(right_children));
        }
        true
    }
}

impl Eq for ExprRef<'_> {}

impl Hash for ExprRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Pre-order, children pushed in reverse so they pop in traversal order.
        let mut pending = vec![*self];
        while let Some(expr) = pending.pop() {
            expr.node().shape().hash(state);
            let children: Vec<_> = expr.children().collect();
            children.len().hash(state);
            pending.extend(children.into_iter().rev());
        }
    }
}

impl fmt::Display for ExprRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = OutputVisitor::new(f, &GenericDialect);
        self.tree.accept(self.id, &mut output);
        output.finish()
    }
}

impl fmt::Debug for ExprRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprRef")
            .field("id", &self.id)
            .field("sql", &format_args!("{self}"))
            .finish()
    }
}
