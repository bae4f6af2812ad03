//! SQLite extractor.
//!
//! SQLite has no database-wide catalog views: after listing table names from
//! `sqlite_master`, every introspection facet (columns, foreign keys,
//! indexes) is one PRAGMA per table, plus one `index_info` PRAGMA per
//! discovered index. The nested fan-out is inherent to the catalog model as
//! no batched equivalent exists.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::time::Duration;
use tracing::debug;

use crate::error::ExtractError;
use crate::options::{ConnectionParams, ExtractOptions, Vendor};
use crate::schema::{Column, ForeignKey, ForeignKeyColumn, Index, IndexKind, Schema, Table};

/// Run a full extraction against a SQLite database file.
///
/// The file is opened read-only and never created; the pool is closed on
/// both success and failure.
#[tracing::instrument(skip_all, fields(database = %options.database_name()))]
pub(crate) async fn extract(options: &ExtractOptions) -> Result<Schema, ExtractError> {
    let connect_options = build_connect_options(options)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .map_err(ExtractError::Connection)?;

    let result = run_pipeline(&pool, options).await;
    pool.close().await;
    result
}

/// Build SqliteConnectOptions from the extraction options.
fn build_connect_options(options: &ExtractOptions) -> Result<SqliteConnectOptions, ExtractError> {
    match &options.params {
        ConnectionParams::File { path } => Ok(SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .read_only(true)),
        ConnectionParams::Server { .. } => Err(ExtractError::InvalidOptions(
            "SQLite requires a database file path".to_string(),
        )),
    }
}

async fn run_pipeline(
    pool: &SqlitePool,
    options: &ExtractOptions,
) -> Result<Schema, ExtractError> {
    let mut schema = Schema::new(Vendor::SQLite, options.database_name());

    let table_names = load_table_names(pool).await?;
    debug!(tables = table_names.len(), "enumerated tables");

    for name in table_names {
        let mut table = Table::new(name.as_str());
        load_columns(pool, &mut table).await?;
        load_foreign_keys(pool, &mut table).await?;
        load_indexes(pool, &mut table).await?;
        schema.tables.insert(name, table);
    }

    schema.table_count = schema.tables.len();
    Ok(schema)
}

/// Enumerate user tables. Names starting with `sqlite_` are reserved
/// bookkeeping tables (`sqlite_sequence` and friends) and are excluded.
async fn load_table_names(pool: &SqlitePool) -> Result<Vec<String>, ExtractError> {
    let query = r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
            AND name NOT LIKE 'sqlite_%'
        ORDER BY name
    "#;

    let rows = sqlx::query(query).fetch_all(pool).await?;

    let names: Vec<String> = rows.into_iter().map(|row| row.get("name")).collect();
    Ok(names)
}

async fn load_columns(pool: &SqlitePool, table: &mut Table) -> Result<(), ExtractError> {
    let query = format!("PRAGMA table_info('{}')", table.name.replace('\'', "''"));
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let mut pk_columns: Vec<(i32, String)> = Vec::new();

    for row in rows {
        let cid: i32 = row.get("cid");
        let name: String = row.get("name");
        let data_type: String = row.get("type");
        let notnull: i32 = row.get("notnull");
        let dflt_value: Option<String> = row.get("dflt_value");
        let pk: i32 = row.get("pk");

        // SQLite cid is 0-indexed
        let mut column = Column::new(name.clone(), (cid + 1) as u32, data_type);
        column.nullable = notnull == 0;
        column.default_value = dflt_value.map(strip_default_wrapping);
        if pk > 0 {
            column.is_primary_key = true;
            pk_columns.push((pk, name.clone()));
        }

        table.columns.insert(name, column);
    }
    table.column_count = table.columns.len();

    // Composite keys come back in column order; `pk` carries the key
    // sequence, so sort by it to recover the declared order.
    pk_columns.sort_by_key(|(pk, _)| *pk);
    table.primary_key = pk_columns.into_iter().map(|(_, name)| name).collect();

    // Rowid-alias rule: a single-column INTEGER primary key is assigned by
    // the engine, whether or not AUTOINCREMENT was spelled out.
    if let [pk_name] = table.primary_key.as_slice() {
        let pk_name = pk_name.clone();
        if let Some(column) = table.columns.get_mut(&pk_name) {
            if column.data_type.eq_ignore_ascii_case("integer") {
                column.is_auto_increment = true;
            }
        }
    }

    Ok(())
}

async fn load_foreign_keys(pool: &SqlitePool, table: &mut Table) -> Result<(), ExtractError> {
    let query = format!(
        "PRAGMA foreign_key_list('{}')",
        table.name.replace('\'', "''")
    );
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    for row in rows {
        let id: i32 = row.get("id");
        let to_table: String = row.get("table");
        let from: String = row.get("from");
        // NULL for shorthand references to the target's implicit primary key
        let to: Option<String> = row.get("to");
        let on_update: String = row.get("on_update");
        let on_delete: String = row.get("on_delete");

        // The pragma has no constraint names, only numeric ids; synthesize a
        // stable identifier. Multi-column keys share an id across rows.
        let key = format!("fk_{}_{}", table.name, id);
        let foreign_key = table
            .foreign_keys
            .entry(key)
            .or_insert_with(|| ForeignKey::new(to_table, on_update, on_delete));
        foreign_key.columns.push(ForeignKeyColumn { from, to });
    }

    Ok(())
}

async fn load_indexes(pool: &SqlitePool, table: &mut Table) -> Result<(), ExtractError> {
    let query = format!("PRAGMA index_list('{}')", table.name.replace('\'', "''"));
    let index_rows = sqlx::query(&query).fetch_all(pool).await?;

    for index_row in index_rows {
        let name: String = index_row.get("name");
        let unique: i32 = index_row.get("unique");
        let origin: String = index_row.get("origin");

        let kind = if origin == "pk" {
            IndexKind::PrimaryKey
        } else if unique != 0 {
            IndexKind::Unique
        } else {
            IndexKind::Index
        };
        let mut index = Index::new(name.clone(), kind, unique != 0);

        let detail_query = format!("PRAGMA index_info('{}')", name.replace('\'', "''"));
        let detail_rows = sqlx::query(&detail_query).fetch_all(pool).await?;
        for detail_row in detail_rows {
            // Expression and rowid key parts carry no column name; skip them.
            let column: Option<String> = detail_row.get("name");
            if let Some(column) = column {
                index.columns.push(column);
            }
        }

        table.indexes.insert(name, index);
    }

    Ok(())
}

/// Strip one layer of quoting from a default literal. SQLite stores text
/// defaults with their quotes (`'active'`); bare literals pass through
/// untouched.
fn strip_default_wrapping(value: String) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        let wrapped = (first == last && (first == b'\'' || first == b'"'))
            || (first == b'(' && last == b')');
        if wrapped {
            return value[1..value.len() - 1].to_string();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_default_wrapping() {
        assert_eq!(strip_default_wrapping("'active'".to_string()), "active");
        assert_eq!(strip_default_wrapping("\"x\"".to_string()), "x");
        assert_eq!(strip_default_wrapping("(0)".to_string()), "0");
        assert_eq!(strip_default_wrapping("0".to_string()), "0");
        assert_eq!(strip_default_wrapping("42.5".to_string()), "42.5");
        assert_eq!(
            strip_default_wrapping("CURRENT_TIMESTAMP".to_string()),
            "CURRENT_TIMESTAMP"
        );
        // Only one layer comes off
        assert_eq!(strip_default_wrapping("''x''".to_string()), "'x'");
        // Too short or unbalanced values pass through
        assert_eq!(strip_default_wrapping("'".to_string()), "'");
        assert_eq!(strip_default_wrapping("".to_string()), "");
        assert_eq!(strip_default_wrapping("'a".to_string()), "'a");
    }

    #[test]
    fn test_build_connect_options_file() {
        let options = ExtractOptions::new(
            Vendor::SQLite,
            ConnectionParams::file("/tmp/introspect.db"),
        );
        assert!(build_connect_options(&options).is_ok());
    }

    #[test]
    fn test_build_connect_options_rejects_server_params() {
        let options = ExtractOptions::new(
            Vendor::SQLite,
            ConnectionParams::server("localhost", 3306, "root", "", "db"),
        );
        assert!(matches!(
            build_connect_options(&options),
            Err(ExtractError::InvalidOptions(_))
        ));
    }
}
