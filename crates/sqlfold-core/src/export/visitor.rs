//! Dialect-bound export visitors.

use core::fmt;

use tracing::debug;

use super::{export_child, export_slots, exported_value, ParamValue};
use crate::ast::{NodeId, SqlTree};
use crate::dialect::{
    DbType, Db2Dialect, Dialect, GenericDialect, MySqlDialect, OracleDialect, PostgreSqlDialect,
    SqlServerDialect,
};
use crate::error::Error;
use crate::visitor::{OutputVisitor, VisitorMut};

/// The dialect family an export visitor renders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportVisitorKind {
    MySql,
    Oracle,
    Db2,
    PostgreSql,
    SqlServer,
    Generic,
}

impl ExportVisitorKind {
    /// The rendering strategy of this family.
    #[must_use]
    pub const fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::MySql => &MySqlDialect,
            Self::Oracle => &OracleDialect,
            Self::Db2 => &Db2Dialect,
            Self::PostgreSql => &PostgreSqlDialect,
            Self::SqlServer => &SqlServerDialect,
            Self::Generic => &GenericDialect,
        }
    }
}

impl From<&DbType> for ExportVisitorKind {
    fn from(db_type: &DbType) -> Self {
        match db_type {
            DbType::MySql | DbType::MariaDb | DbType::H2 => Self::MySql,
            DbType::Oracle | DbType::AliOracle => Self::Oracle,
            DbType::Db2 => Self::Db2,
            DbType::PostgreSql | DbType::Edb => Self::PostgreSql,
            DbType::SqlServer | DbType::Jtds => Self::SqlServer,
            DbType::Other(_) => Self::Generic,
        }
    }
}

/// Returns the export visitor for a database-type tag, writing to `out`.
///
/// Unknown tags get the generic visitor.
pub fn create_export_parameter_visitor<'a>(
    out: &'a mut dyn fmt::Write,
    db_type: &str,
) -> ExportParameterVisitor<'a> {
    let kind = ExportVisitorKind::from(&DbType::from_tag(db_type));
    debug!(db_type, kind = ?kind, "Selected export visitor");
    ExportParameterVisitor::new(out, kind)
}

/// Moves literals out of a tree and renders what is left.
///
/// The walk exports the operands of binary expressions and `BETWEEN` bounds,
/// the targets of `IN` lists and the arguments of plain function calls, in
/// the order they are rendered: the i-th parameter binds to the i-th `?`.
/// Select-list columns, `GROUP BY` and `ORDER BY` are left untouched, as are
/// literals passed directly to an aggregate call.
pub struct ExportParameterVisitor<'a> {
    out: &'a mut dyn fmt::Write,
    kind: ExportVisitorKind,
    parameters: Vec<ParamValue>,
}

impl<'a> ExportParameterVisitor<'a> {
    pub fn new(out: &'a mut dyn fmt::Write, kind: ExportVisitorKind) -> Self {
        Self {
            out,
            kind,
            parameters: vec![],
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ExportVisitorKind {
        self.kind
    }

    /// The values exported so far, in extraction order.
    #[must_use]
    pub fn parameters(&self) -> &[ParamValue] {
        &self.parameters
    }

    #[must_use]
    pub fn into_parameters(self) -> Vec<ParamValue> {
        self.parameters
    }

    /// Exports the literals under the tree's root and renders the rewritten
    /// tree to the sink. A tree without a root renders nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the sink fails.
    pub fn export(&mut self, tree: &mut SqlTree) -> Result<(), Error> {
        let Some(root) = tree.root() else {
            return Ok(());
        };
        let before = self.parameters.len();
        tree.accept_mut(root, self);
        debug!(
            exported = self.parameters.len() - before,
            nodes = tree.len(),
            "Exported parameters"
        );
        let mut output = OutputVisitor::new(&mut *self.out, self.kind.dialect());
        tree.accept(root, &mut output);
        output.finish()?;
        Ok(())
    }
}

impl ExportParameterVisitor<'_> {
    /// Exports the literal operands of `id` and walks the others, left to
    /// right, so that values leave the tree in rendering order.
    fn export_operands(&mut self, tree: &mut SqlTree, id: NodeId) -> bool {
        for (child, export) in export_slots(tree, id) {
            if export && exported_value(tree, child).is_some() {
                export_child(tree, &mut self.parameters, id, child);
            } else {
                tree.accept_mut(child, self);
            }
        }
        false
    }
}

impl VisitorMut for ExportParameterVisitor<'_> {
    fn visit_binary(&mut self, tree: &mut SqlTree, id: NodeId) -> bool {
        self.export_operands(tree, id)
    }

    fn visit_between(&mut self, tree: &mut SqlTree, id: NodeId) -> bool {
        self.export_operands(tree, id)
    }

    fn visit_in_list(&mut self, tree: &mut SqlTree, id: NodeId) -> bool {
        self.export_operands(tree, id)
    }

    fn visit_function(&mut self, tree: &mut SqlTree, id: NodeId) -> bool {
        self.export_operands(tree, id)
    }

    fn visit_select_column(&mut self, _tree: &mut SqlTree, _id: NodeId) -> bool {
        false
    }

    fn visit_group_by(&mut self, _tree: &mut SqlTree, _id: NodeId) -> bool {
        false
    }

    fn visit_order_by(&mut self, _tree: &mut SqlTree, _id: NodeId) -> bool {
        false
    }
}
