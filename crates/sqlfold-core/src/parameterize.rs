//! One-call parameterization of SQL text.

use serde::Serialize;

use crate::error::Error;
use crate::export::{create_export_parameter_visitor, merge_equality_chains, ParamValue};
use crate::parser::Parser;

/// Options for [`parameterize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterizeOptions {
    /// Fold `x = 1 OR x = 2` chains before exporting, so their values travel
    /// as one grouped parameter.
    pub merge: bool,
}

/// SQL text with its literals moved out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameterized {
    /// The rewritten statement, rendered for the requested dialect.
    pub sql: String,
    /// The extracted values, one per placeholder, in order.
    pub parameters: Vec<ParamValue>,
}

/// Parses a statement, exports its literals and renders the result for
/// `db_type`.
///
/// # Errors
///
/// Returns an error if the SQL does not parse or rendering fails.
pub fn parameterize(
    sql: &str,
    db_type: &str,
    options: ParameterizeOptions,
) -> Result<Parameterized, Error> {
    let mut tree = Parser::new(sql).parse_statement()?;
    if options.merge {
        if let Some(root) = tree.root() {
            merge_equality_chains(&mut tree, root);
        }
    }

    let mut out = String::new();
    let mut visitor = create_export_parameter_visitor(&mut out, db_type);
    visitor.export(&mut tree)?;
    let parameters = visitor.into_parameters();
    Ok(Parameterized {
        sql: out,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parameterize_mysql() {
        let result = parameterize(
            "select * from users where name = 'bob' and age > 30",
            "mysql",
            ParameterizeOptions::default(),
        )
        .unwrap();
        assert_eq!(result.sql, "SELECT * FROM users WHERE name = ? AND age > ?");
        assert_eq!(
            result.parameters,
            vec![ParamValue::from("bob"), ParamValue::Int(30)]
        );
    }

    #[test]
    fn test_parameterize_with_merge() {
        let options = ParameterizeOptions { merge: true };
        let result = parameterize("SELECT id FROM t WHERE id = 1 OR id = 2", "oracle", options)
            .unwrap();
        assert_eq!(result.sql, "SELECT id FROM t WHERE id = ?");
        assert_eq!(
            result.parameters,
            vec![ParamValue::Group(vec![ParamValue::Int(1), ParamValue::Int(2)])]
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = parameterize("SELECT FROM", "mysql", ParameterizeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().starts_with("parse error: "));
    }

    #[test]
    fn test_serializes_to_json() {
        let result = parameterize(
            "SELECT a FROM t WHERE b = 2.50",
            "postgresql",
            ParameterizeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"sql":"SELECT a FROM t WHERE b = ?","parameters":["2.50"]}"#
        );
    }
}
