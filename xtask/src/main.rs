// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo and linting commands CI runs, plus a schema check for
//! the persistence layer.
//!
//! ### Schema Verification
//!
//! - `cargo test` runs every test against in-memory `SQLite`
//! - `cargo xtask verify-schema` applies the embedded migrations to a fresh
//!   database and checks the resulting tables against the layout the
//!   persistence crate expects
//!
//! No command here needs external services.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Verify the embedded `SQLite` migrations produce the expected schema
///
/// Applies `crates/persistence/migrations` to a fresh in-memory database,
/// introspects it, and compares every table and column against the layout
/// the Diesel schema in `airlift-persistence` is written against.
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-schema
/// ```
///
/// ## Failures
///
/// The command fails if:
/// - A migration fails to apply
/// - A table or column is missing or unexpected
/// - A column's type or nullability differs
/// - A declared foreign key is missing
fn verify_schema() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Applying SQLite migrations to an in-memory database");
    let mut conn =
        SqliteConnection::establish(":memory:").wrap_err("Failed to open in-memory SQLite")?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {e}"))?;

    let actual = introspect_sqlite_schema(&mut conn)?;
    compare_schemas(&expected_schema(), &actual)?;

    tracing::info!(
        tables = actual.tables.len(),
        "SQLite schema matches the persistence layer"
    );
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

/// Column layout: name, normalized type, nullable.
type ColumnSpec = (&'static str, &'static str, bool);

const PASSENGER_COLUMNS: &[ColumnSpec] = &[
    ("rank", "TEXT", false),
    ("name", "TEXT", false),
    ("identity_document", "TEXT", true),
    ("destination", "TEXT", false),
    ("weight_person", "REAL", false),
    ("weight_checked_baggage", "REAL", false),
    ("weight_carry_on", "REAL", false),
    ("priority_tier", "INTEGER", false),
    ("registered_by", "TEXT", false),
    ("relationship", "TEXT", false),
];

fn expected_table(
    primary_key: &str,
    columns: &[ColumnSpec],
    foreign_keys: &[(&str, &str, &str)],
) -> Table {
    Table {
        columns: columns
            .iter()
            .map(|&(name, ty, nullable)| {
                (
                    name.to_string(),
                    Column {
                        normalized_type: ty.to_string(),
                        nullable,
                    },
                )
            })
            .collect(),
        primary_keys: BTreeSet::from([primary_key.to_string()]),
        foreign_keys: foreign_keys
            .iter()
            .map(|&(from, table, to)| ForeignKey {
                from_column: from.to_string(),
                to_table: table.to_string(),
                to_column: to.to_string(),
            })
            .collect(),
    }
}

/// The schema `airlift-persistence` reads and writes.
fn expected_schema() -> Schema {
    let missions: Vec<ColumnSpec> = vec![
        ("mission_id", "INTEGER", true),
        ("station", "TEXT", false),
        ("mission_number", "TEXT", false),
        ("aircraft", "TEXT", true),
        ("departure_date", "TEXT", true),
        ("route_json", "TEXT", false),
        ("created_at", "TEXT", false),
    ];

    let mut waitlist: Vec<ColumnSpec> = vec![
        ("waitlist_entry_id", "INTEGER", true),
        ("station", "TEXT", false),
    ];
    waitlist.extend_from_slice(PASSENGER_COLUMNS);
    waitlist.push(("registered_at", "TEXT", false));
    waitlist.push(("allocated_mission_id", "INTEGER", true));

    let mut manifest: Vec<ColumnSpec> = vec![
        ("manifest_entry_id", "INTEGER", true),
        ("mission_id", "INTEGER", false),
    ];
    manifest.extend_from_slice(PASSENGER_COLUMNS);
    manifest.push(("source_waitlist_entry_id", "INTEGER", true));

    Schema {
        tables: BTreeMap::from([
            (
                "missions".to_string(),
                expected_table("mission_id", &missions, &[]),
            ),
            (
                "waitlist_entries".to_string(),
                expected_table(
                    "waitlist_entry_id",
                    &waitlist,
                    &[("allocated_mission_id", "missions", "mission_id")],
                ),
            ),
            (
                "manifest_entries".to_string(),
                expected_table(
                    "manifest_entry_id",
                    &manifest,
                    &[("mission_id", "missions", "mission_id")],
                ),
            ),
        ]),
    }
}

/// Introspect `SQLite` schema using PRAGMA statements
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(
                col.name,
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable: col.notnull == 0,
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type names to a comparable form
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "INTEGER".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("DOUB")
        || normalized.contains("FLOA")
    {
        "REAL".to_string()
    } else if normalized.contains("CHAR")
        || normalized.contains("TEXT")
        || normalized.contains("CLOB")
    {
        "TEXT".to_string()
    } else {
        normalized
    }
}

/// Compare the expected and actual schemas, reporting every difference
fn compare_schemas(expected: &Schema, actual: &Schema) -> Result<()> {
    let mut differences: Vec<String> = Vec::new();

    let expected_tables: BTreeSet<_> = expected.tables.keys().collect();
    let actual_tables: BTreeSet<_> = actual.tables.keys().collect();
    for table in expected_tables.difference(&actual_tables) {
        differences.push(format!("missing table: {table}"));
    }
    for table in actual_tables.difference(&expected_tables) {
        differences.push(format!("unexpected table: {table}"));
    }

    for (table_name, expected_table) in &expected.tables {
        let Some(actual_table) = actual.tables.get(table_name) else {
            continue;
        };

        for (col_name, expected_col) in &expected_table.columns {
            match actual_table.columns.get(col_name) {
                None => differences.push(format!("{table_name}: missing column {col_name}")),
                Some(actual_col) if actual_col != expected_col => differences.push(format!(
                    "{table_name}.{col_name}: expected {expected_col:?}, found {actual_col:?}"
                )),
                Some(_) => {}
            }
        }
        for col_name in actual_table.columns.keys() {
            if !expected_table.columns.contains_key(col_name) {
                differences.push(format!("{table_name}: unexpected column {col_name}"));
            }
        }

        if expected_table.primary_keys != actual_table.primary_keys {
            differences.push(format!(
                "{table_name}: primary key mismatch: expected {:?}, found {:?}",
                expected_table.primary_keys, actual_table.primary_keys
            ));
        }
        for fk in expected_table
            .foreign_keys
            .difference(&actual_table.foreign_keys)
        {
            differences.push(format!("{table_name}: missing foreign key {fk:?}"));
        }
    }

    if differences.is_empty() {
        return Ok(());
    }
    for difference in &differences {
        tracing::error!("{difference}");
    }
    color_eyre::eyre::bail!("schema verification found {} difference(s)", differences.len())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
