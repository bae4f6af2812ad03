//! Extraction error taxonomy.
//!
//! Extraction is all-or-nothing: the caller receives either a complete
//! schema or exactly one of these errors. Nothing is retried internally.

use thiserror::Error;

/// Error type for schema extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The supplied options do not fit the selected adapter (e.g. server
    /// parameters for a file-based vendor). Raised before any connection
    /// attempt.
    #[error("invalid extraction options: {0}")]
    InvalidOptions(String),

    /// The catalog connection could not be established (bad credentials,
    /// unreachable host, unreadable file).
    #[error("failed to open catalog connection: {0}")]
    Connection(#[source] sqlx::Error),

    /// A catalog query failed mid-pipeline. The connection is still released.
    #[error("catalog query failed: {0}")]
    CatalogQuery(#[from] sqlx::Error),

    /// A catalog row referenced an entity that no earlier pipeline stage
    /// created. Same severity as a failed query; never skipped.
    #[error("catalog row references unknown {kind} {name:?}")]
    UnknownEntity {
        /// What kind of entity the lookup expected
        kind: &'static str,
        /// The name the catalog row carried
        name: String,
    },
}

impl ExtractError {
    /// A later-stage lookup missed a table seeded in the table pass.
    pub fn unknown_table(name: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind: "table",
            name: name.into(),
        }
    }

    /// A later-stage lookup missed a column created in the column pass.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind: "column",
            name: name.into(),
        }
    }

    /// A key-usage row referenced a foreign key the constraint pass never
    /// stubbed out.
    pub fn unknown_foreign_key(name: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind: "foreign key",
            name: name.into(),
        }
    }
}
