//! MySQL catalog extraction.
//!
//! All five passes are database-wide `information_schema` queries bound to
//! the target schema name, so the round-trip count stays constant no matter
//! how many tables the database holds. Each pass decodes its rows into a
//! plain row struct and a separate fold step merges them into the schema,
//! which keeps the merge logic testable without a running server.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlSslMode};
use sqlx::{MySqlPool, Row};
use tracing::debug;

use crate::error::ExtractError;
use crate::options::{ConnectionParams, ExtractOptions, SslMode, Vendor};
use crate::schema::{Column, ForeignKey, ForeignKeyColumn, Index, IndexKind, Schema, Table};

/// Extract the full schema of a MySQL (or MariaDB) database.
#[tracing::instrument(skip_all, fields(database = %options.database_name()))]
pub(crate) async fn extract(options: &ExtractOptions) -> Result<Schema, ExtractError> {
    let connect_options = build_connect_options(options)?;
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .map_err(ExtractError::Connection)?;

    let result = run_pipeline(&pool, options).await;
    pool.close().await;
    result
}

fn build_connect_options(options: &ExtractOptions) -> Result<MySqlConnectOptions, ExtractError> {
    match &options.params {
        ConnectionParams::Server {
            hostname,
            port,
            username,
            password,
            database,
            ssl_mode,
        } => Ok(MySqlConnectOptions::new()
            .host(hostname)
            .port(*port)
            .username(username)
            .password(password)
            .database(database)
            .ssl_mode(map_ssl_mode(*ssl_mode))),
        ConnectionParams::File { .. } => Err(ExtractError::InvalidOptions(
            "MySQL requires server connection parameters".to_string(),
        )),
    }
}

fn map_ssl_mode(ssl_mode: SslMode) -> MySqlSslMode {
    match ssl_mode {
        SslMode::Disable => MySqlSslMode::Disabled,
        SslMode::Prefer => MySqlSslMode::Preferred,
        SslMode::Require => MySqlSslMode::Required,
        SslMode::VerifyCa => MySqlSslMode::VerifyCa,
        SslMode::VerifyFull => MySqlSslMode::VerifyIdentity,
    }
}

async fn run_pipeline(
    pool: &MySqlPool,
    options: &ExtractOptions,
) -> Result<Schema, ExtractError> {
    let database = options.database_name();
    let mut schema = Schema::new(Vendor::MySQL, database.as_str());

    let tables = load_tables(pool, &database).await?;
    debug!(tables = tables.len(), "enumerated tables");
    fold_tables(&mut schema, tables);

    let columns = load_columns(pool, &database).await?;
    fold_columns(&mut schema, columns)?;

    let constraints = load_constraints(pool, &database).await?;
    fold_constraints(&mut schema, constraints)?;

    let key_usage = load_key_usage(pool, &database).await?;
    fold_key_usage(&mut schema, key_usage)?;

    let statistics = load_statistics(pool, &database).await?;
    fold_statistics(&mut schema, statistics)?;

    Ok(schema)
}

struct TableRow {
    name: String,
    engine: Option<String>,
    comment: Option<String>,
}

struct ColumnRow {
    table: String,
    name: String,
    position: u32,
    default_value: Option<String>,
    is_nullable: String,
    column_type: String,
    length_in_chars: Option<i64>,
    length_in_bytes: Option<i64>,
    comment: Option<String>,
    column_key: String,
    extra: String,
}

struct ConstraintRow {
    table: String,
    name: String,
    constraint_type: String,
    referenced_table: Option<String>,
    update_rule: Option<String>,
    delete_rule: Option<String>,
}

struct KeyUsageRow {
    table: String,
    constraint_name: String,
    column: String,
    referenced_table: Option<String>,
    referenced_column: Option<String>,
}

struct StatisticRow {
    table: String,
    index_name: String,
    columns: Vec<String>,
    non_unique: i64,
}

async fn load_tables(pool: &MySqlPool, database: &str) -> Result<Vec<TableRow>, ExtractError> {
    let query = r#"
        SELECT
            TABLE_NAME as table_name,
            ENGINE as engine,
            TABLE_COMMENT as table_comment
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = ?
        ORDER BY TABLE_NAME
    "#;

    let rows = sqlx::query(query).bind(database).fetch_all(pool).await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.get("table_name");
        let engine: Option<String> = row.get("engine");
        let comment: Option<String> = row.get("table_comment");
        tables.push(TableRow {
            name,
            engine,
            comment,
        });
    }
    Ok(tables)
}

fn fold_tables(schema: &mut Schema, rows: Vec<TableRow>) {
    for row in rows {
        let mut table = Table::new(row.name.as_str());
        table.engine = row.engine;
        table.comment = row.comment.filter(|c| !c.is_empty());
        schema.tables.insert(row.name, table);
    }
    schema.table_count = schema.tables.len();
}

async fn load_columns(pool: &MySqlPool, database: &str) -> Result<Vec<ColumnRow>, ExtractError> {
    let query = r#"
        SELECT
            TABLE_NAME as table_name,
            COLUMN_NAME as column_name,
            ORDINAL_POSITION as ordinal_position,
            COLUMN_DEFAULT as column_default,
            IS_NULLABLE as is_nullable,
            COLUMN_TYPE as column_type,
            CHARACTER_MAXIMUM_LENGTH as character_maximum_length,
            CHARACTER_OCTET_LENGTH as character_octet_length,
            COLUMN_COMMENT as column_comment,
            COLUMN_KEY as column_key,
            EXTRA as extra
        FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = ?
        ORDER BY TABLE_NAME, ORDINAL_POSITION
    "#;

    let rows = sqlx::query(query).bind(database).fetch_all(pool).await?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let name: String = row.get("column_name");
        let position: u32 = row.get("ordinal_position");
        let default_value: Option<String> = row.get("column_default");
        let is_nullable: String = row.get("is_nullable");
        let column_type: String = row.get("column_type");
        let length_in_chars: Option<i64> = row.get("character_maximum_length");
        let length_in_bytes: Option<i64> = row.get("character_octet_length");
        let comment: Option<String> = row.get("column_comment");
        let column_key: Option<String> = row.get("column_key");
        let extra: Option<String> = row.get("extra");
        columns.push(ColumnRow {
            table,
            name,
            position,
            default_value,
            is_nullable,
            column_type,
            length_in_chars,
            length_in_bytes,
            comment,
            column_key: column_key.unwrap_or_default(),
            extra: extra.unwrap_or_default(),
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

        let mut column = Column::new(row.name.clone(), row.position, row.column_type);
        column.default_value = row.default_value;
        column.nullable = row.is_nullable != "NO";
        column.length_in_chars = row.length_in_chars;
        column.length_in_bytes = row.length_in_bytes;
        column.comment = row.comment.filter(|c| !c.is_empty());
        if row.column_key == "PRI" {
            column.is_primary_key = true;
            column.is_auto_increment = row.extra.contains("auto_increment");
            table.primary_key.push(row.name.clone());
        }
        table.columns.insert(row.name, column);
        table.column_count = table.columns.len();
    }
    Ok(())
}

async fn load_constraints(
    pool: &MySqlPool,
    database: &str,
) -> Result<Vec<ConstraintRow>, ExtractError> {
    let query = r#"
        SELECT
            tc.TABLE_NAME as table_name,
            tc.CONSTRAINT_NAME as constraint_name,
            tc.CONSTRAINT_TYPE as constraint_type,
            rc.REFERENCED_TABLE_NAME as referenced_table_name,
            rc.UPDATE_RULE as update_rule,
            rc.DELETE_RULE as delete_rule
        FROM information_schema.TABLE_CONSTRAINTS tc
        LEFT JOIN information_schema.REFERENTIAL_CONSTRAINTS rc
            ON rc.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
            AND rc.TABLE_NAME = tc.TABLE_NAME
            AND rc.CONSTRAINT_SCHEMA = tc.CONSTRAINT_SCHEMA
        WHERE tc.CONSTRAINT_SCHEMA = ?
            AND tc.CONSTRAINT_TYPE IN ('PRIMARY KEY', 'UNIQUE', 'FOREIGN KEY')
        ORDER BY tc.TABLE_NAME, tc.CONSTRAINT_NAME
    "#;

    let rows = sqlx::query(query).bind(database).fetch_all(pool).await?;

    let mut constraints = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let name: String = row.get("constraint_name");
        let constraint_type: String = row.get("constraint_type");
        let referenced_table: Option<String> = row.get("referenced_table_name");
        let update_rule: Option<String> = row.get("update_rule");
        let delete_rule: Option<String> = row.get("delete_rule");
        constraints.push(ConstraintRow {
            table,
            name,
            constraint_type,
            referenced_table,
            update_rule,
            delete_rule,
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
        table.indexes.insert(
            row.name.clone(),
            Index::new(row.name.clone(), kind, kind != IndexKind::ForeignKey),
        );
        if kind == IndexKind::ForeignKey {
            table.foreign_keys.insert(
                row.name,
                ForeignKey::new(
                    row.referenced_table.unwrap_or_default(),
                    row.update_rule.unwrap_or_default(),
                    row.delete_rule.unwrap_or_default(),
                ),
            );
        }
    }
    Ok(())
}

async fn load_key_usage(
    pool: &MySqlPool,
    database: &str,
) -> Result<Vec<KeyUsageRow>, ExtractError> {
    let query = r#"
        SELECT
            TABLE_NAME as table_name,
            CONSTRAINT_NAME as constraint_name,
            COLUMN_NAME as column_name,
            REFERENCED_TABLE_NAME as referenced_table_name,
            REFERENCED_COLUMN_NAME as referenced_column_name
        FROM information_schema.KEY_COLUMN_USAGE
        WHERE CONSTRAINT_SCHEMA = ?
        ORDER BY TABLE_NAME, CONSTRAINT_NAME, ORDINAL_POSITION
    "#;

    let rows = sqlx::query(query).bind(database).fetch_all(pool).await?;

    let mut usage = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let constraint_name: String = row.get("constraint_name");
        let column: String = row.get("column_name");
        let referenced_table: Option<String> = row.get("referenced_table_name");
        let referenced_column: Option<String> = row.get("referenced_column_name");
        usage.push(KeyUsageRow {
            table,
            constraint_name,
            column,
            referenced_table,
            referenced_column,
        });
    }
    Ok(usage)
}

fn fold_key_usage(schema: &mut Schema, rows: Vec<KeyUsageRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        if row.referenced_table.is_some() {
            let foreign_key = table
                .foreign_keys
                .get_mut(&row.constraint_name)
                .ok_or_else(|| ExtractError::unknown_foreign_key(row.constraint_name.as_str()))?;
            foreign_key.columns.push(ForeignKeyColumn {
                from: row.column.clone(),
                to: row.referenced_column,
            });
        }

        // Key usage also reports constraints the constraint pass filtered
        // out (for example CHECK on MariaDB); those have no index entry and
        // are skipped rather than failed.
        if let Some(index) = table.indexes.get_mut(&row.constraint_name) {
            index.columns.push(row.column);
        }
    }
    Ok(())
}

async fn load_statistics(
    pool: &MySqlPool,
    database: &str,
) -> Result<Vec<StatisticRow>, ExtractError> {
    let query = r#"
        SELECT
            TABLE_NAME as table_name,
            INDEX_NAME as index_name,
            GROUP_CONCAT(COLUMN_NAME ORDER BY SEQ_IN_INDEX) as column_names,
            NON_UNIQUE as non_unique
        FROM information_schema.STATISTICS
        WHERE TABLE_SCHEMA = ?
            AND INDEX_NAME != 'PRIMARY'
        GROUP BY TABLE_NAME, INDEX_NAME, NON_UNIQUE
        ORDER BY TABLE_NAME, INDEX_NAME
    "#;

    let rows = sqlx::query(query).bind(database).fetch_all(pool).await?;

    let mut statistics = Vec::with_capacity(rows.len());
    for row in rows {
        let table: String = row.get("table_name");
        let index_name: String = row.get("index_name");
        // NULL when every part of the index is an expression.
        let column_names: Option<String> = row.get("column_names");
        let non_unique: i64 = row.get("non_unique");
        let columns = column_names
            .map(|c| c.split(',').map(str::to_string).collect())
            .unwrap_or_default();
        statistics.push(StatisticRow {
            table,
            index_name,
            columns,
            non_unique,
        });
    }
    Ok(statistics)
}

fn fold_statistics(schema: &mut Schema, rows: Vec<StatisticRow>) -> Result<(), ExtractError> {
    for row in rows {
        let table = schema
            .tables
            .get_mut(&row.table)
            .ok_or_else(|| ExtractError::unknown_table(row.table.as_str()))?;

        // Indexes backing PRIMARY KEY, UNIQUE and FOREIGN KEY constraints
        // already carry their columns from the key-usage pass; only indexes
        // first seen here are recorded.
        table.indexes.entry(row.index_name.clone()).or_insert_with(|| {
            let mut index = Index::new(row.index_name, IndexKind::Index, row.non_unique == 0);
            index.columns = row.columns;
            index
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ConnectionParams;

    fn schema_with_table(table: &str) -> Schema {
        let mut schema = Schema::new(Vendor::MySQL, "shop");
        schema.tables.insert(table.to_string(), Table::new(table));
        schema
    }

    #[test]
    fn test_fold_tables_sets_count_and_filters_empty_comments() {
        let mut schema = Schema::new(Vendor::MySQL, "shop");
        fold_tables(
            &mut schema,
            vec![
                TableRow {
                    name: "orders".to_string(),
                    engine: Some("InnoDB".to_string()),
                    comment: Some("order headers".to_string()),
                },
                TableRow {
                    name: "users".to_string(),
                    engine: Some("InnoDB".to_string()),
                    comment: Some(String::new()),
                },
            ],
        );

        assert_eq!(schema.table_count, 2);
        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.engine.as_deref(), Some("InnoDB"));
        assert_eq!(orders.comment.as_deref(), Some("order headers"));
        assert_eq!(schema.get_table("users").unwrap().comment, None);
    }

    #[test]
    fn test_fold_columns_marks_primary_key_and_auto_increment() {
        let mut schema = schema_with_table("users");
        fold_columns(
            &mut schema,
            vec![
                ColumnRow {
                    table: "users".to_string(),
                    name: "id".to_string(),
                    position: 1,
                    default_value: None,
                    is_nullable: "NO".to_string(),
                    column_type: "int".to_string(),
                    length_in_chars: None,
                    length_in_bytes: None,
                    comment: Some(String::new()),
                    column_key: "PRI".to_string(),
                    extra: "auto_increment".to_string(),
                },
                ColumnRow {
                    table: "users".to_string(),
                    name: "name".to_string(),
                    position: 2,
                    default_value: Some("guest".to_string()),
                    is_nullable: "YES".to_string(),
                    column_type: "varchar(80)".to_string(),
                    length_in_chars: Some(80),
                    length_in_bytes: Some(320),
                    comment: Some("display name".to_string()),
                    column_key: String::new(),
                    extra: String::new(),
                },
            ],
        )
        .unwrap();

        let users = schema.get_table("users").unwrap();
        assert_eq!(users.column_count, 2);
        assert_eq!(users.primary_key, vec!["id".to_string()]);

        let id = users.get_column("id").unwrap();
        assert!(id.is_primary_key);
        assert!(id.is_auto_increment);
        assert!(!id.nullable);
        assert_eq!(id.comment, None);

        let name = users.get_column("name").unwrap();
        assert!(!name.is_primary_key);
        assert!(name.nullable);
        assert_eq!(name.position, 2);
        assert_eq!(name.length_in_chars, Some(80));
        assert_eq!(name.length_in_bytes, Some(320));
        assert_eq!(name.default_value.as_deref(), Some("guest"));
        assert_eq!(name.comment.as_deref(), Some("display name"));
    }

    #[test]
    fn test_fold_columns_unknown_table_is_fatal() {
        let mut schema = Schema::new(Vendor::MySQL, "shop");
        let result = fold_columns(
            &mut schema,
            vec![ColumnRow {
                table: "ghost".to_string(),
                name: "id".to_string(),
                position: 1,
                default_value: None,
                is_nullable: "NO".to_string(),
                column_type: "int".to_string(),
                length_in_chars: None,
                length_in_bytes: None,
                comment: None,
                column_key: String::new(),
                extra: String::new(),
            }],
        );

        assert!(matches!(
            result,
            Err(ExtractError::UnknownEntity { kind: "table", .. })
        ));
    }

    #[test]
    fn test_fold_constraints_records_indexes_and_foreign_key_stubs() {
        let mut schema = schema_with_table("orders");
        fold_constraints(
            &mut schema,
            vec![
                ConstraintRow {
                    table: "orders".to_string(),
                    name: "PRIMARY".to_string(),
                    constraint_type: "PRIMARY KEY".to_string(),
                    referenced_table: None,
                    update_rule: None,
                    delete_rule: None,
                },
                ConstraintRow {
                    table: "orders".to_string(),
                    name: "uq_number".to_string(),
                    constraint_type: "UNIQUE".to_string(),
                    referenced_table: None,
                    update_rule: None,
                    delete_rule: None,
                },
                ConstraintRow {
                    table: "orders".to_string(),
                    name: "fk_user".to_string(),
                    constraint_type: "FOREIGN KEY".to_string(),
                    referenced_table: Some("users".to_string()),
                    update_rule: Some("CASCADE".to_string()),
                    delete_rule: Some("RESTRICT".to_string()),
                },
            ],
        )
        .unwrap();

        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.indexes.len(), 3);
        assert_eq!(orders.indexes["PRIMARY"].kind, IndexKind::PrimaryKey);
        assert!(orders.indexes["PRIMARY"].unique);
        assert!(orders.indexes["uq_number"].unique);
        assert!(!orders.indexes["fk_user"].unique);

        let fk = &orders.foreign_keys["fk_user"];
        assert_eq!(fk.to_table, "users");
        assert_eq!(fk.on_update, "CASCADE");
        assert_eq!(fk.on_delete, "RESTRICT");
        assert!(fk.columns.is_empty());
    }

    #[test]
    fn test_fold_key_usage_fills_indexes_and_foreign_keys() {
        let mut schema = schema_with_table("orders");
        fold_constraints(
            &mut schema,
            vec![
                ConstraintRow {
                    table: "orders".to_string(),
                    name: "PRIMARY".to_string(),
                    constraint_type: "PRIMARY KEY".to_string(),
                    referenced_table: None,
                    update_rule: None,
                    delete_rule: None,
                },
                ConstraintRow {
                    table: "orders".to_string(),
                    name: "fk_user".to_string(),
                    constraint_type: "FOREIGN KEY".to_string(),
                    referenced_table: Some("users".to_string()),
                    update_rule: Some("NO ACTION".to_string()),
                    delete_rule: Some("CASCADE".to_string()),
                },
            ],
        )
        .unwrap();

        fold_key_usage(
            &mut schema,
            vec![
                KeyUsageRow {
                    table: "orders".to_string(),
                    constraint_name: "PRIMARY".to_string(),
                    column: "id".to_string(),
                    referenced_table: None,
                    referenced_column: None,
                },
                KeyUsageRow {
                    table: "orders".to_string(),
                    constraint_name: "fk_user".to_string(),
                    column: "user_id".to_string(),
                    referenced_table: Some("users".to_string()),
                    referenced_column: Some("id".to_string()),
                },
            ],
        )
        .unwrap();

        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.indexes["PRIMARY"].columns, vec!["id".to_string()]);
        assert_eq!(orders.indexes["fk_user"].columns, vec!["user_id".to_string()]);

        let fk = &orders.foreign_keys["fk_user"];
        assert_eq!(fk.columns.len(), 1);
        assert_eq!(fk.columns[0].from, "user_id");
        assert_eq!(fk.columns[0].to.as_deref(), Some("id"));
    }

    #[test]
    fn test_fold_key_usage_skips_constraints_without_index_entries() {
        let mut schema = schema_with_table("orders");
        // A CHECK constraint row: no index entry, no referenced table.
        fold_key_usage(
            &mut schema,
            vec![KeyUsageRow {
                table: "orders".to_string(),
                constraint_name: "ck_total".to_string(),
                column: "total".to_string(),
                referenced_table: None,
                referenced_column: None,
            }],
        )
        .unwrap();

        assert!(schema.get_table("orders").unwrap().indexes.is_empty());
    }

    #[test]
    fn test_fold_key_usage_missing_foreign_key_is_fatal() {
        let mut schema = schema_with_table("orders");
        let result = fold_key_usage(
            &mut schema,
            vec![KeyUsageRow {
                table: "orders".to_string(),
                constraint_name: "fk_missing".to_string(),
                column: "user_id".to_string(),
                referenced_table: Some("users".to_string()),
                referenced_column: Some("id".to_string()),
            }],
        );

        assert!(matches!(
            result,
            Err(ExtractError::UnknownEntity {
                kind: "foreign key",
                ..
            })
        ));
    }

    #[test]
    fn test_fold_statistics_only_records_unseen_indexes() {
        let mut schema = schema_with_table("orders");
        fold_constraints(
            &mut schema,
            vec![ConstraintRow {
                table: "orders".to_string(),
                name: "uq_number".to_string(),
                constraint_type: "UNIQUE".to_string(),
                referenced_table: None,
                update_rule: None,
                delete_rule: None,
            }],
        )
        .unwrap();
        fold_key_usage(
            &mut schema,
            vec![KeyUsageRow {
                table: "orders".to_string(),
                constraint_name: "uq_number".to_string(),
                column: "number".to_string(),
                referenced_table: None,
                referenced_column: None,
            }],
        )
        .unwrap();

        fold_statistics(
            &mut schema,
            vec![
                // Backs the unique constraint; must not double its columns.
                StatisticRow {
                    table: "orders".to_string(),
                    index_name: "uq_number".to_string(),
                    columns: vec!["number".to_string()],
                    non_unique: 0,
                },
                StatisticRow {
                    table: "orders".to_string(),
                    index_name: "ix_created".to_string(),
                    columns: vec!["created_at".to_string(), "user_id".to_string()],
                    non_unique: 1,
                },
            ],
        )
        .unwrap();

        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.indexes.len(), 2);
        assert_eq!(orders.indexes["uq_number"].columns, vec!["number".to_string()]);
        assert_eq!(orders.indexes["uq_number"].kind, IndexKind::Unique);

        let ix = &orders.indexes["ix_created"];
        assert_eq!(ix.kind, IndexKind::Index);
        assert!(!ix.unique);
        assert_eq!(
            ix.columns,
            vec!["created_at".to_string(), "user_id".to_string()]
        );
    }

    #[test]
    fn test_build_connect_options_rejects_file_params() {
        let options = ExtractOptions::new(Vendor::MySQL, ConnectionParams::file("/tmp/app.db"));
        assert!(matches!(
            build_connect_options(&options),
            Err(ExtractError::InvalidOptions(_))
        ));
    }
}
