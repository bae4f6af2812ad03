//! Vendor selection and connection configuration.
//!
//! This module contains:
//! - `Vendor` - Enum of supported vendor families
//! - `ConnectionParams` - Server or file connection parameters
//! - `ExtractOptions` - Everything one extraction call needs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Supported vendor families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    MySQL,
    PostgreSQL,
    SQLite,
}

impl Vendor {
    /// Get the display name for this vendor
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        }
    }

    /// Get the default port for server-based vendors
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySQL => Some(3306),
            Self::PostgreSQL => Some(5432),
            Self::SQLite => None, // File-based
        }
    }

    /// Check if this vendor is file-based
    pub fn is_file_based(&self) -> bool {
        matches!(self, Self::SQLite)
    }

    /// Parse an adapter name. Accepts the historic aliases alongside the
    /// canonical names.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mysql2" | "mariadb" => Some(Self::MySQL),
            "postgresql" | "postgres" | "pg" => Some(Self::PostgreSQL),
            "sqlite" | "sqlite3" => Some(Self::SQLite),
            _ => None,
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// SSL mode options for server-based vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    /// No SSL connection
    Disable,
    /// Try SSL first, fall back to non-SSL
    #[default]
    Prefer,
    /// Require SSL, don't verify certificates
    Require,
    /// Require SSL and verify server certificate
    VerifyCa,
    /// Require SSL, verify certificate and hostname
    VerifyFull,
}

impl SslMode {
    /// Parse from a flag string; unknown values fall back to the default
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "disable" => Self::Disable,
            "prefer" => Self::Prefer,
            "require" => Self::Require,
            "verify-ca" => Self::VerifyCa,
            "verify-full" => Self::VerifyFull,
            _ => Self::Prefer,
        }
    }
}

/// Connection parameters for the two vendor shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionParams {
    /// Server-based vendors (MySQL, PostgreSQL)
    Server {
        /// Server hostname or IP address
        hostname: String,
        /// Server port
        port: u16,
        /// Username for authentication
        username: String,
        /// Password for authentication
        #[serde(skip_serializing, default)]
        password: String,
        /// Database to introspect
        database: String,
        /// SSL mode for the connection
        #[serde(default)]
        ssl_mode: SslMode,
    },

    /// File-based vendors (SQLite); always opened read-only
    File {
        /// Path to the database file
        path: PathBuf,
    },
}

impl ConnectionParams {
    /// Create new server connection parameters with the default SSL mode
    pub fn server(
        hostname: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self::Server {
            hostname: hostname.into(),
            port,
            username: username.into(),
            password: password.into(),
            database: database.into(),
            ssl_mode: SslMode::default(),
        }
    }

    /// Create new file connection parameters
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }
}

/// Everything one extraction call needs: a vendor family and the matching
/// connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// The vendor family to extract from
    pub adapter: Vendor,
    /// Connection parameters (must match the adapter's shape)
    pub params: ConnectionParams,
}

impl ExtractOptions {
    /// Create extraction options
    pub fn new(adapter: Vendor, params: ConnectionParams) -> Self {
        Self { adapter, params }
    }

    /// Validate that the params match the adapter
    pub fn validate(&self) -> Result<(), String> {
        match (&self.adapter, &self.params) {
            (Vendor::SQLite, ConnectionParams::Server { .. }) => Err(format!(
                "{} requires a database file path",
                self.adapter.display_name()
            )),
            (Vendor::MySQL | Vendor::PostgreSQL, ConnectionParams::File { .. }) => Err(format!(
                "{} requires server connection parameters",
                self.adapter.display_name()
            )),
            _ => Ok(()),
        }
    }

    /// The database identifier carried into the extracted schema: the
    /// database name for server vendors, the file path for file vendors.
    pub fn database_name(&self) -> String {
        match &self.params {
            ConnectionParams::Server { database, .. } => database.clone(),
            ConnectionParams::File { path } => path.display().to_string(),
        }
    }
}
