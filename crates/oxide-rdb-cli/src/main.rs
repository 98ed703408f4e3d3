//! oxide-rdb CLI
//!
//! Renders CREATE and ALTER statements from JSON schema definitions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_rdb::dialect::DIALECT_NAMES;
use oxide_rdb::metadata::{ObjectKind, SchemaDefinition};
use oxide_rdb::prelude::*;

/// Dialect-aware DDL rendering for relational schemas.
#[derive(Parser)]
#[command(name = "oxide-rdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect to render for.
    #[arg(short, long, env = "OXIDE_RDB_DIALECT", default_value = "generic")]
    dialect: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in dialects.
    Dialects,

    /// Print CREATE TABLE statements for a schema definition.
    Create {
        /// Schema definition file (JSON).
        #[arg(short, long)]
        schema: PathBuf,

        /// Only this table.
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print the statements migrating one schema definition into another.
    Diff {
        /// Deployed schema definition file (JSON).
        #[arg(short, long)]
        before: PathBuf,

        /// Target schema definition file (JSON).
        #[arg(short, long)]
        after: PathBuf,

        /// Only this table.
        #[arg(short, long)]
        table: Option<String>,
    },
}

fn load(path: &Path, dialect: &str) -> anyhow::Result<DatabaseMetadata> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let definition = SchemaDefinition::from_json(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(DatabaseMetadata::from_definition(dialect, definition)?)
}

fn selected<'a>(db: &'a DatabaseMetadata, table: Option<&str>) -> anyhow::Result<Vec<&'a str>> {
    match table {
        Some(name) => Ok(vec![db.require_table(name)?.name()]),
        None => Ok(db
            .tables()
            .filter(|t| t.metadata().kind() == ObjectKind::Table)
            .map(|t| t.name())
            .collect()),
    }
}

fn create(db: &DatabaseMetadata, table: Option<&str>) -> anyhow::Result<()> {
    for name in selected(db, table)? {
        let table = db.require_table(name)?;
        let rendered = db.render(OperationKind::CreateTable, &RenderRequest::create_table(table))?;
        print!("{rendered}");
    }
    Ok(())
}

fn diff(
    before: &DatabaseMetadata,
    after: &DatabaseMetadata,
    table: Option<&str>,
) -> anyhow::Result<()> {
    let names = selected(after, table)?;
    for name in &names {
        let target = after.require_table(name)?;
        let rendered = match before.table(name) {
            Some(deployed) => after.render(
                OperationKind::AlterTable,
                &RenderRequest::alter_table(deployed, target),
            )?,
            None => {
                info!(table = %name, "New table");
                after.render(OperationKind::CreateTable, &RenderRequest::create_table(target))?
            }
        };
        print!("{rendered}");
    }
    if table.is_none() {
        for deployed in before.tables() {
            if after.table(deployed.name()).is_none() {
                warn!(table = %deployed.name(), "Table missing from target; not dropped");
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries the SQL
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = oxide_rdb::dialect::by_name(&cli.dialect)?.name();

    match cli.command {
        Commands::Dialects => {
            for name in DIALECT_NAMES {
                println!("{name}");
            }
        }

        Commands::Create { schema, table } => {
            let db = load(&schema, dialect)?;
            create(&db, table.as_deref())?;
        }

        Commands::Diff {
            before,
            after,
            table,
        } => {
            let before = load(&before, dialect)?;
            let after = load(&after, dialect)?;
            if before.schema() != after.schema() {
                bail!(
                    "Schema differs between definitions ({:?} vs {:?})",
                    before.schema(),
                    after.schema()
                );
            }
            diff(&before, &after, table.as_deref())?;
        }
    }

    Ok(())
}
