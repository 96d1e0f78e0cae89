//! sqlfold CLI
//!
//! Command-line tool for parameterizing SQL statements.

use std::io::{self, Read, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlfold_core::{parameterize, ParameterizeOptions, Parameterized};

/// Moves the literals of a SQL statement into a parameter list.
#[derive(Parser)]
#[command(name = "sqlfold")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database type tag selecting the output dialect (mysql, oracle, db2,
    /// postgresql, sqlserver, ...).
    #[arg(short, long, env = "SQLFOLD_DB_TYPE", default_value = "mysql")]
    db_type: String,

    /// Fold `x = 1 OR x = 2` chains into one grouped parameter.
    #[arg(short, long)]
    merge: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// The statement to parameterize (read from stdin if not specified).
    sql: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The statement, then one `$n = value` line per parameter.
    Text,
    /// A JSON object with `sql` and `parameters`.
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = match &cli.sql {
        Some(sql) => sql.clone(),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read SQL from stdin")?;
            input
        }
    };

    let stdout = io::stdout();
    run(&cli, &sql, &mut stdout.lock())
}

/// Parameterizes `sql` with the options in `cli` and writes the result.
fn run(cli: &Cli, sql: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let options = ParameterizeOptions { merge: cli.merge };
    debug!(db_type = %cli.db_type, merge = options.merge, "Parameterizing statement");
    let result = parameterize(sql.trim(), &cli.db_type, options)
        .with_context(|| format!("failed to parameterize `{}`", sql.trim()))?;
    info!(parameters = result.parameters.len(), "Statement parameterized");

    match cli.format {
        Format::Text => write_text(&result, out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_text(result: &Parameterized, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", result.sql)?;
    for (i, value) in result.parameters.iter().enumerate() {
        writeln!(out, "${} = {value}", i + 1)?;
    }
    Ok(())
}
