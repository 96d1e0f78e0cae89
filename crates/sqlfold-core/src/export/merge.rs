//! Folding of `x = 1 OR x = 2 OR ...` chains into merged lists.

use tracing::debug;

use crate::ast::{BinaryOp, Node, NodeId, SqlTree};

/// Replaces every maximal `OR` chain under `root` whose branches all compare
/// the same expression for equality with a literal.
///
/// The chain is replaced by a copy of its first branch, whose merged list holds
/// copies of the others. Chains that do not qualify are searched for nested
/// chains instead. A chain at `root` itself is only replaced when `root` is the
/// tree's root. Returns the number of chains merged.
pub fn merge_equality_chains(tree: &mut SqlTree, root: NodeId) -> usize {
    let mut merged = 0;
    merge_under(tree, root, &mut merged);
    debug!(root = %root, chains = merged, "Merged equality chains");
    merged
}

fn merge_under(tree: &mut SqlTree, id: NodeId, merged: &mut usize) {
    if !is_or(tree, id) {
        for child in tree.children(id) {
            merge_under(tree, child, merged);
        }
        return;
    }
    let mut branches = vec![];
    collect_branches(tree, id, &mut branches);
    if merge_chain(tree, id, &branches) {
        *merged += 1;
        return;
    }
    for branch in branches {
        merge_under(tree, branch, merged);
    }
}

fn is_or(tree: &SqlTree, id: NodeId) -> bool {
    tree.node(id)
        .as_binary()
        .is_some_and(|binary| binary.op == BinaryOp::Or)
}

/// Flattens nested `OR` nodes, left to right.
fn collect_branches(tree: &SqlTree, id: NodeId, branches: &mut Vec<NodeId>) {
    match tree.node(id).as_binary() {
        Some(binary) if binary.op == BinaryOp::Or => {
            let (left, right) = (binary.left(), binary.right());
            collect_branches(tree, left, branches);
            collect_branches(tree, right, branches);
        }
        _ => branches.push(id),
    }
}

/// The left operand of `left = <literal>`.
fn equality_operand(tree: &SqlTree, id: NodeId) -> Option<NodeId> {
    let binary = tree.node(id).as_binary()?;
    let extractable = matches!(
        tree.node(binary.right()),
        Node::Literal(literal) if literal.is_extractable()
    );
    (binary.op == BinaryOp::Eq && extractable).then_some(binary.left())
}

fn merge_chain(tree: &mut SqlTree, chain: NodeId, branches: &[NodeId]) -> bool {
    let [first, rest @ ..] = branches else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    let Some(operand) = equality_operand(tree, *first) else {
        return false;
    };
    let same_operand = rest.iter().all(|&branch| {
        equality_operand(tree, branch).is_some_and(|other| tree.expr(other) == tree.expr(operand))
    });
    if !same_operand {
        return false;
    }

    let head = tree.clone_subtree(*first);
    let siblings: Vec<NodeId> = rest.iter().map(|&branch| tree.clone_subtree(branch)).collect();
    if tree.set_merged_list(head, Some(siblings)).is_err() || !tree.replace_node(chain, head) {
        return false;
    }
    debug!(chain = %chain, head = %head, branches = branches.len(), "Merged chain");
    true
}
