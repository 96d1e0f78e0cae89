//! Structural errors raised while linking tree nodes.

use super::NodeId;

/// An attempt to break the single-owner tree shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// The child is already owned by another node.
    #[error("node {node} is already attached to node {parent}")]
    AlreadyAttached {
        /// The child being attached.
        node: NodeId,
        /// Its current owner.
        parent: NodeId,
    },

    /// The same child appears twice among one node's children.
    #[error("node {0} appears more than once among the children of one node")]
    DuplicateChild(NodeId),

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching node {node} under node {owner} would create a cycle")]
    Cycle {
        /// The child being attached.
        node: NodeId,
        /// The intended owner.
        owner: NodeId,
    },

    /// The node exists but has the wrong variant for the operation.
    #[error("node {node} is {found}, expected {expected}")]
    UnexpectedNode {
        /// The offending node.
        node: NodeId,
        /// What the operation needs.
        expected: &'static str,
        /// What the node actually is.
        found: &'static str,
    },

    /// The node is not among the owner's children.
    #[error("node {child} is not a child of node {owner}")]
    NotAChild {
        /// The node searched in.
        owner: NodeId,
        /// The missing child.
        child: NodeId,
    },

    /// An owned child does not point back to its owner.
    #[error("node {child} is owned by node {owner} but its parent is {parent:?}")]
    BrokenLink {
        /// The owner holding the child in one of its slots.
        owner: NodeId,
        /// The child.
        child: NodeId,
        /// The parent recorded on the child.
        parent: Option<NodeId>,
    },
}
