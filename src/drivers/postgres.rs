//! PostgreSQL catalog extraction.
//!
//! The first four passes read `information_schema` views restricted to the
//! `public` schema; the last pass reads `pg_index` directly because plain
//! (non-constraint) indexes never surface in the standard views. All
//! `information_schema` columns are domain types, so the queries cast them
//! to `text` / `int4` before decoding. Row decoding and schema folding are
//! split per pass, same as the MySQL extractor, so the folds can be tested
//! without a server.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::ExtractError;
use crate::options::{ConnectionParams, ExtractOptions, SslMode, Vendor};
use crate::schema::{Column, ForeignKey, ForeignKeyColumn, Index, IndexKind, Schema, Table};

/// Only objects in the `public` schema are extracted.
const PUBLIC_SCHEMA: &str = "public";

/// Extract the full schema of a PostgreSQL database.
#[tracing::instrument(skip_all, fields(database = %options.database_name()))]
pub(crate) async fn extract(options: &ExtractOptions) -> Result<Schema, ExtractError> {
    let connect_options = build_connect_options(options)?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .map_err(ExtractError::Connection)?;

    let result = run_pipeline(&pool, options).await;
    pool.close().await;
    result
}

fn build_connect_options(options: &ExtractOptions) -> Result<PgConnectOptions, ExtractError> {
    match &options.params {
        ConnectionParams::Server {
            hostname,
            port,
            username,
            password,
            database,
            ssl_mode,
        } => Ok(PgConnectOptions::new()
            .host(hostname)
            .port(*port)
            .username(username)
            .password(password)
            .database(database)
            .ssl_mode(map_ssl_mode(*ssl_mode))),
        ConnectionParams::File { .. } => Err(ExtractError::InvalidOptions(
            "PostgreSQL requires server connection parameters".to_string(),
        )),
    }
}

fn map_ssl_mode(ssl_mode: SslMode) -> PgSslMode {
    match ssl_mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

async fn run_pipeline(pool: &PgPool, options: &ExtractOptions) -> Result<Schema, ExtractError> {
    let mut schema = Schema::new(Vendor::PostgreSQL, options.database_name());

    let tables = load_tables(pool).await?;
    debug!(tables = tables.len(), "enumerated tables");
    fold_tables(&mut schema, tables);

    let columns = load_columns(pool).await?;
    fold_columns(&mut schema, columns)?;

    let constraints = load_constraints(pool).await?;
    fold_constraints(&mut schema, constraints)?;
    confirm_auto_increment(&mut schema);

    let references = load_references(pool).await?;
    fold_references(&mut schema, references)?;

    let indexes = load_indexes(pool).await?;
    fold_indexes(&mut schema, indexes)?;

    Ok(schema)
}

struct ColumnRow {
    table: String,
    name: String,
    position: i32,
    default_value: Option<String>,
    is_nullable: String,
    data_type: String,
    length_in_chars: Option<i32>,
    length_in_bytes: Option<i32>,
    is_identity: String,
}

struct ConstraintRow {
    table: String,
    name: String,
    constraint_type: String,
    column: String,
}

struct ReferenceRow {
    constraint_name: String,
    table: String,
    column: String,
    foreign_table: String,
    foreign_column: String,
    update_rule: String,
    delete_rule: String,
}

struct IndexRow {
    table: String,
    name: String,
    unique: bool,
    columns: Vec<String>,
}

async fn load_tables(pool: &PgPool) -> Result<Vec<String>, ExtractError> {
    let query = r#"
        SELECT table_name::text as table_name
        FROM information_schema.tables
        WHERE table_schema = $1
        ORDER BY table_name
    "#;

    let rows = sqlx::query(query)
        .bind(PUBLIC_SCHEMA)
        .fetch_all(pool)
        .await?;

    let names: Vec<String> = rows.into_iter().map(|row| row.get("table_name")).collect();
    Ok(names)
}

fn fold_tables(schema: &mut Schema, names: Vec<String>) {
    for name in names {
        schema.tables.insert(name.clone(), Table::new(name));
    }
    schema.table_count = schema.tables.len();
}

async fn load_columns(pool: &PgPool) -> Result<Vec<ColumnRow>, ExtractError> {
    let query = r#"
        SELECT
            table_name::text as table_name,
            column_name::text as column_name,
            ordinal_position::int4 as ordinal_position,
            column_default::text as column_default,
            is_nullable::text as is_nullable,
            data_type::text as data_type,
            character_maximum_length::int4 as character_maximum_length,
            character_octet_length::int4 as character_octet_length,
            is_identity::text as is_identity
        FROM information_schema.columns
        WHERE table_schema = $1
        ORDER BY table_name, ordinal_position
    "#;

    let rows = sqlx::query(query)
        .bind(PUBLIC_SCHEMA)
        .fetch_all(pool)
        .await?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let name: String = row.get("column_name");
        let position: i32 = row.get("ordinal_position");
        let default_value: Option<String> = row.get("column_default");
        let is_nullable: String = row.get("is_nullable");
        let data_type: String = row.get("data_type");
        let length_in_chars: Option<i32> = row.get("character_maximum_length");
        let length_in_bytes: Option<i32> = row.get("character_octet_length");
        let is_identity: String = row.get("is_identity");
        columns.push(ColumnRow {
            table,
            name,
            position,
            default_value,
            is_nullable,
            data_type,
            length_in_chars,
            length_in_bytes,
            is_identity,
        });
    }
    Ok(columns)
}

fn fold_columns(schema: &mut Schema, rows: Vec<ColumnRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        let mut column = Column::new(row.name.clone(), row.position as u32, row.data_type.clone());
        column.nullable = row.is_nullable == "YES";
        column.length_in_chars = row.length_in_chars.map(i64::from);
        column.length_in_bytes = row.length_in_bytes.map(i64::from);
        // Provisional: confirmed after the constraint pass, once primary key
        // membership is known.
        column.is_auto_increment = is_serial(&row.data_type, &row.is_identity, &row.default_value);
        column.default_value = row.default_value;
        table.columns.insert(row.name, column);
        table.column_count = table.columns.len();
    }
    Ok(())
}

/// Serial and identity columns both count as auto-increment: either the
/// column is declared `GENERATED .. AS IDENTITY`, or it is an integer whose
/// default draws from a sequence.
fn is_serial(data_type: &str, is_identity: &str, default_value: &Option<String>) -> bool {
    let integer_family = matches!(data_type, "smallint" | "integer" | "bigint");
    if !integer_family {
        return false;
    }
    if is_identity == "YES" {
        return true;
    }
    default_value
        .as_deref()
        .is_some_and(|d| d.starts_with("nextval("))
}

async fn load_constraints(pool: &PgPool) -> Result<Vec<ConstraintRow>, ExtractError> {
    // CHECK constraints have no key-column rows, so the inner join leaves
    // only primary key, unique and foreign key constraints.
    let query = r#"
        SELECT
            tc.table_name::text as table_name,
            tc.constraint_name::text as constraint_name,
            tc.constraint_type::text as constraint_type,
            kcu.column_name::text as column_name
        FROM information_schema.table_constraints tc
        JOIN information_schema.key_column_usage kcu
            ON kcu.constraint_name = tc.constraint_name
            AND kcu.table_name = tc.table_name
            AND kcu.constraint_schema = tc.constraint_schema
        WHERE tc.constraint_schema = $1
        ORDER BY tc.table_name, tc.constraint_name, kcu.ordinal_position
    "#;

    let rows = sqlx::query(query)
        .bind(PUBLIC_SCHEMA)
        .fetch_all(pool)
        .await?;

    let mut constraints = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let name: String = row.get("constraint_name");
        let constraint_type: String = row.get("constraint_type");
        let column: String = row.get("column_name");
        constraints.push(ConstraintRow {
            table,
            name,
            constraint_type,
            column,
        });
    }
    Ok(constraints)
}

fn fold_constraints(schema: &mut Schema, rows: Vec<ConstraintRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        let kind = IndexKind::from_constraint(&row.constraint_type);
        let index = table
            .indexes
            .entry(row.name.clone())
            .or_insert_with(|| Index::new(row.name, kind, kind != IndexKind::ForeignKey));
        index.columns.push(row.column.clone());

        if kind == IndexKind::PrimaryKey {
            table.primary_key.push(row.column.clone());
            let column = table
                .columns
                .get_mut(&row.column)
                .ok_or_else(|| ExtractError::unknown_column(row.column.as_str()))?;
            column.is_primary_key = true;
        }
    }
    Ok(())
}

/// Clears the provisional auto-increment flag on serial columns that turned
/// out not to be part of the primary key.
fn confirm_auto_increment(schema: &mut Schema) {
    for table in schema.tables.values_mut() {
        for column in table.columns.values_mut() {
            if column.is_auto_increment && !column.is_primary_key {
                column.is_auto_increment = false;
            }
        }
    }
}

async fn load_references(pool: &PgPool) -> Result<Vec<ReferenceRow>, ExtractError> {
    // Key-column usage is joined twice: once for the referencing side and
    // once for the referenced side, correlated per column through
    // position_in_unique_constraint.
    let query = r#"
        SELECT
            c.constraint_name::text as constraint_name,
            x.table_name::text as table_name,
            x.column_name::text as column_name,
            y.table_name::text as foreign_table_name,
            y.column_name::text as foreign_column_name,
            c.update_rule::text as update_rule,
            c.delete_rule::text as delete_rule
        FROM information_schema.referential_constraints c
        JOIN information_schema.key_column_usage x
            ON x.constraint_name = c.constraint_name
            AND x.constraint_schema = c.constraint_schema
        JOIN information_schema.key_column_usage y
            ON y.constraint_name = c.unique_constraint_name
            AND y.constraint_schema = c.unique_constraint_schema
            AND y.ordinal_position = x.position_in_unique_constraint
        WHERE c.constraint_schema = $1
        ORDER BY c.constraint_name, x.ordinal_position
    "#;

    let rows = sqlx::query(query)
        .bind(PUBLIC_SCHEMA)
        .fetch_all(pool)
        .await?;

    let mut references = Vec::with_capacity(rows.len());
    for row in rows {
        let constraint_name: String = row.get("constraint_name");
        let table: String = row.get("table_name");
        let column: String = row.get("column_name");
        let foreign_table: String = row.get("foreign_table_name");
        let foreign_column: String = row.get("foreign_column_name");
        let update_rule: String = row.get("update_rule");
        let delete_rule: String = row.get("delete_rule");
        references.push(ReferenceRow {
            constraint_name,
            table,
            column,
            foreign_table,
            foreign_column,
            update_rule,
            delete_rule,
        });
    }
    Ok(references)
}

fn fold_references(schema: &mut Schema, rows: Vec<ReferenceRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        let foreign_key = table
            .foreign_keys
            .entry(row.constraint_name)
            .or_insert_with(|| {
                ForeignKey::new(row.foreign_table, row.update_rule, row.delete_rule)
            });
        foreign_key.columns.push(ForeignKeyColumn {
            from: row.column,
            to: Some(row.foreign_column),
        });
    }
    Ok(())
}

async fn load_indexes(pool: &PgPool) -> Result<Vec<IndexRow>, ExtractError> {
    let query = r#"
        SELECT
            t.relname as table_name,
            i.relname as index_name,
            idx.indisunique as is_unique,
            ARRAY(
                SELECT pg_get_indexdef(idx.indexrelid, k + 1, true)
                FROM generate_subscripts(idx.indkey, 1) as k
                ORDER BY k
            ) as column_names
        FROM pg_index idx
        JOIN pg_class i ON i.oid = idx.indexrelid
        JOIN pg_class t ON t.oid = idx.indrelid
        JOIN pg_namespace ns ON ns.oid = i.relnamespace
        WHERE ns.nspname = ANY (current_schemas(false))
        ORDER BY t.relname, i.relname
    "#;

    let rows = sqlx::query(query).fetch_all(pool).await?;

    let mut indexes = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let name: String = row.get("index_name");
        let unique: bool = row.get("is_unique");
        let columns: Vec<String> = row.get("column_names");
        indexes.push(IndexRow {
            table,
            name,
            unique,
            columns,
        });
    }
    Ok(indexes)
}

fn fold_indexes(schema: &mut Schema, rows: Vec<IndexRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        // Constraint-backed indexes were already recorded with their columns
        // by the constraint pass; only indexes first seen here are added.
        table.indexes.entry(row.name.clone()).or_insert_with(|| {
            let mut index = Index::new(row.name, IndexKind::Index, row.unique);
            index.columns = row.columns;
            index
        });
    }
    Ok(())
}
