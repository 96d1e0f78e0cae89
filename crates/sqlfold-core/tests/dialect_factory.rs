//! Tests for the tag-to-visitor factory and per-dialect rendering.

mod common;
use common::*;

use pretty_assertions::assert_eq;
use sqlfold_core::{create_export_parameter_visitor, DbType, ExportVisitorKind};

#[test]
fn every_tag_resolves() {
    let expected = [
        ("mysql", ExportVisitorKind::MySql),
        ("mariadb", ExportVisitorKind::MySql),
        ("h2", ExportVisitorKind::MySql),
        ("oracle", ExportVisitorKind::Oracle),
        ("AliOracle", ExportVisitorKind::Oracle),
        ("db2", ExportVisitorKind::Db2),
        ("postgresql", ExportVisitorKind::PostgreSql),
        ("edb", ExportVisitorKind::PostgreSql),
        ("sqlserver", ExportVisitorKind::SqlServer),
        ("jtds", ExportVisitorKind::SqlServer),
    ];
    let mut out = String::new();
    for (tag, kind) in expected {
        assert_eq!(
            create_export_parameter_visitor(&mut out, tag).kind(),
            kind,
            "{tag}"
        );
        assert_eq!(ExportVisitorKind::from(&DbType::from_tag(tag)), kind);
    }
}

#[test]
fn unknown_tags_fall_back() {
    let mut out = String::new();
    for tag in ["", "sqlite", "MySQL", "ORACLE", "alioracle", "hive"] {
        assert_eq!(
            create_export_parameter_visitor(&mut out, tag).kind(),
            ExportVisitorKind::Generic,
            "{tag}"
        );
    }
}

#[test]
fn families_bind_distinct_dialects() {
    let kinds = [
        ExportVisitorKind::MySql,
        ExportVisitorKind::Oracle,
        ExportVisitorKind::Db2,
        ExportVisitorKind::PostgreSql,
        ExportVisitorKind::SqlServer,
        ExportVisitorKind::Generic,
    ];
    let names: Vec<&str> = kinds.iter().map(|kind| kind.dialect().name()).collect();
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn limit_styles() {
    let sql = "SELECT a FROM t ORDER BY a LIMIT 3";
    for (tag, expected) in [
        ("mysql", "SELECT a FROM t ORDER BY a LIMIT 3"),
        ("postgresql", "SELECT a FROM t ORDER BY a LIMIT 3"),
        ("oracle", "SELECT a FROM t ORDER BY a FETCH FIRST 3 ROWS ONLY"),
        ("db2", "SELECT a FROM t ORDER BY a FETCH FIRST 3 ROWS ONLY"),
        (
            "sqlserver",
            "SELECT a FROM t ORDER BY a OFFSET 0 ROWS FETCH NEXT 3 ROWS ONLY",
        ),
    ] {
        let (rendered, _) = export(sql, tag);
        assert_eq!(rendered, expected, "{tag}");
        round_trip(&rendered);
    }
}

#[test]
fn quoting_follows_dialect() {
    let sql = "SELECT \"select\" FROM \"from\" WHERE \"group\" IS NULL";
    let (mysql, _) = export(sql, "mysql");
    assert_eq!(mysql, "SELECT `select` FROM `from` WHERE `group` IS NULL");
    let (oracle, _) = export(sql, "oracle");
    assert_eq!(oracle, sql);
}

#[test]
fn constants_render_per_dialect() {
    // Constant comparisons survive extraction, so their literals are rendered.
    let sql = "SELECT * FROM t WHERE TRUE = FALSE OR X'0F' = X'0F'";
    let (mysql, _) = export(sql, "mysql");
    assert_eq!(mysql, "SELECT * FROM t WHERE TRUE = FALSE OR 0x0F = 0x0F");
    let (sqlserver, _) = export(sql, "sqlserver");
    assert_eq!(sqlserver, "SELECT * FROM t WHERE 1 = 0 OR X'0F' = X'0F'");
}
