//! Vendor extraction pipelines.

mod mysql;
mod postgres;
mod sqlite;

use crate::error::ExtractError;
use crate::options::{ExtractOptions, Vendor};
use crate::schema::Schema;

/// Run the extraction pipeline for the vendor selected by `options`.
///
/// The catalog connection is opened when the call starts and closed before
/// it returns, on success and on failure alike. Any pipeline error aborts
/// the whole extraction; a partially folded schema is never returned.
pub async fn extract(options: &ExtractOptions) -> Result<Schema, ExtractError> {
    options.validate().map_err(ExtractError::InvalidOptions)?;

    tracing::debug!(adapter = %options.adapter, "starting schema extraction");
    match options.adapter {
        Vendor::MySQL => mysql::extract(options).await,
        Vendor::PostgreSQL => postgres::extract(options).await,
        Vendor::SQLite => sqlite::extract(options).await,
    }
}
