//! Double-dispatch traversal.
//!
//! Every node variant has a `visit_*` / `end_visit_*` pair. [`SqlTree::accept`]
//! calls `visit_*` on entry; when it returns `true` the structural children are
//! accepted in order, and `end_visit_*` is called on exit in every case.
//! Merged lists carried by binary expressions are never walked.
//!
//! [`Visitor`] sees the tree read-only. [`VisitorMut`] may relink the tree while
//! walking it: the children of a node are read after its `visit_*` returns, so
//! a visit that replaces children sends the walk into the replacements.

mod output;

pub use output::OutputVisitor;

use crate::ast::{Node, NodeId, SqlTree};

macro_rules! make_visitor {
    (
        $(#[$meta:meta])*
        $name:ident($tree:ty) => $enter:ident, $leave:ident;
        $( $variant:ident => $visit:ident, $end:ident; )*
    ) => {
        $(#[$meta])*
        pub trait $name {
            $(
                #[doc = concat!("Called on entering a `", stringify!($variant), "` node; returning `false` skips its children.")]
                fn $visit(&mut self, _tree: $tree, _id: NodeId) -> bool {
                    true
                }

                #[doc = concat!("Called on leaving a `", stringify!($variant), "` node.")]
                fn $end(&mut self, _tree: $tree, _id: NodeId) {}
            )*
        }

        fn $enter<V: $name + ?Sized>(visitor: &mut V, tree: $tree, id: NodeId) -> bool {
            let visit: fn(&mut V, $tree, NodeId) -> bool = match tree.node(id) {
                $( Node::$variant(_) => V::$visit, )*
            };
            visit(visitor, tree, id)
        }

        fn $leave<V: $name + ?Sized>(visitor: &mut V, tree: $tree, id: NodeId) {
            let end: fn(&mut V, $tree, NodeId) = match tree.node(id) {
                $( Node::$variant(_) => V::$end, )*
            };
            end(visitor, tree, id);
        }
    };
}

macro_rules! node_visitors {
    ($($(#[$meta:meta])* $name:ident($tree:ty) => $enter:ident, $leave:ident;)*) => {
        $(
            make_visitor! {
                $(#[$meta])*
                $name($tree) => $enter, $leave;
                Column => visit_column, end_visit_column;
                Wildcard => visit_wildcard, end_visit_wildcard;
                Literal => visit_literal, end_visit_literal;
                Placeholder => visit_placeholder, end_visit_placeholder;
                Binary => visit_binary, end_visit_binary;
                Unary => visit_unary, end_visit_unary;
                Paren => visit_paren, end_visit_paren;
                Between => visit_between, end_visit_between;
                InList => visit_in_list, end_visit_in_list;
                IsNull => visit_is_null, end_visit_is_null;
                Cast => visit_cast, end_visit_cast;
                Function => visit_function, end_visit_function;
                Aggregate => visit_aggregate, end_visit_aggregate;
                Keep => visit_keep, end_visit_keep;
                Over => visit_over, end_visit_over;
                OrderBy => visit_order_by, end_visit_order_by;
                OrderByItem => visit_order_by_item, end_visit_order_by_item;
                Select => visit_select, end_visit_select;
                SelectColumn => visit_select_column, end_visit_select_column;
                Table => visit_table, end_visit_table;
                GroupBy => visit_group_by, end_visit_group_by;
            }
        )*
    };
}

node_visitors! {
    /// A read-only walk over a [`SqlTree`].
    Visitor(&SqlTree) => enter, leave;
    /// A walk that may relink the [`SqlTree`] it visits.
    VisitorMut(&mut SqlTree) => enter_mut, leave_mut;
}

impl SqlTree {
    /// Walks the subtree rooted at `id`.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        if enter(visitor, self, id) {
            for child in self.children(id) {
                self.accept(child, visitor);
            }
        }
        leave(visitor, self, id);
    }

    /// Walks the subtree rooted at `id`, letting the visitor mutate the tree.
    pub fn accept_mut<V: VisitorMut + ?Sized>(&mut self, id: NodeId, visitor: &mut V) {
        if enter_mut(visitor, self, id) {
            for child in self.children(id) {
                self.accept_mut(child, visitor);
            }
        }
        leave_mut(visitor, self, id);
    }
}
