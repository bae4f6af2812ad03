//! Vendor-neutral schema model.
//!
//! One `Schema` is produced per extraction run. It is built stage by stage
//! (tables, then columns, then constraints, key usage, and secondary indexes)
//! and handed to the caller as an immutable snapshot. All name-to-entity
//! mappings preserve catalog row order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::options::Vendor;

/// Root of an extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Vendor family that produced this schema
    pub vendor: Vendor,
    /// Target database name or file path, as given by the caller
    pub database: String,
    /// Number of extracted tables; always equals `tables.len()`
    pub table_count: usize,
    /// Tables keyed by name, in catalog order
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    /// Create an empty schema for a vendor and database name.
    pub fn new(vendor: Vendor, database: impl Into<String>) -> Self {
        Self {
            vendor,
            database: database.into(),
            table_count: 0,
            tables: IndexMap::new(),
        }
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

/// A single table and everything hanging off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as reported by the vendor
    pub name: String,
    /// Storage engine tag, for vendors that have one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Table comment, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Primary key column names in declared key order
    pub primary_key: Vec<String>,
    /// Number of columns; always equals `columns.len()`
    pub column_count: usize,
    /// Columns keyed by name
    pub columns: IndexMap<String, Column>,
    /// Constraint entries and secondary indexes keyed by name
    pub indexes: IndexMap<String, Index>,
    /// Foreign keys keyed by constraint identifier
    pub foreign_keys: IndexMap<String, ForeignKey>,
}

impl Table {
    /// Create an empty table entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: None,
            comment: None,
            primary_key: Vec::new(),
            column_count: 0,
            columns: IndexMap::new(),
            indexes: IndexMap::new(),
            foreign_keys: IndexMap::new(),
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Ordinal position in the table (1-based)
    pub position: u32,
    /// Raw default literal, one wrapping layer stripped where the vendor wraps it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Whether NULL is a legal value
    pub nullable: bool,
    /// Vendor-native type string
    pub data_type: String,
    /// Maximum length in characters, character types only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_in_chars: Option<i64>,
    /// Maximum length in bytes, character types only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_in_bytes: Option<i64>,
    /// Column comment, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the column is part of the primary key
    pub is_primary_key: bool,
    /// Whether the vendor auto-generates values for this key column
    pub is_auto_increment: bool,
}

impl Column {
    /// Create a column with the fields every vendor reports; the optional
    /// ones default to absent.
    pub fn new(name: impl Into<String>, position: u32, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            default_value: None,
            nullable: true,
            data_type: data_type.into(),
            length_in_chars: None,
            length_in_bytes: None,
            comment: None,
            is_primary_key: false,
            is_auto_increment: false,
        }
    }
}

/// Loose classification of an index or constraint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
    #[serde(rename = "UNIQUE")]
    Unique,
    #[serde(rename = "FOREIGN KEY")]
    ForeignKey,
    #[serde(rename = "INDEX")]
    Index,
}

impl IndexKind {
    /// Parse a vendor constraint-type string. Unknown kinds fall back to
    /// `Index` rather than failing.
    pub fn from_constraint(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRIMARY KEY" => Self::PrimaryKey,
            "UNIQUE" => Self::Unique,
            "FOREIGN KEY" => Self::ForeignKey,
            _ => Self::Index,
        }
    }

    /// The normalized constraint-type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Index => "INDEX",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint entry or secondary index on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index or constraint name
    pub name: String,
    /// Loose constraint classification
    pub kind: IndexKind,
    /// Whether the index enforces uniqueness; always false for FOREIGN KEY
    /// entries, by convention
    pub unique: bool,
    /// Column names in catalog row order
    pub columns: Vec<String>,
}

impl Index {
    /// Create an index entry with an empty column list.
    pub fn new(name: impl Into<String>, kind: IndexKind, unique: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            unique,
            columns: Vec::new(),
        }
    }
}

/// One column pair of a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyColumn {
    /// Referencing column in the owning table
    pub from: String,
    /// Referenced column in the target table; absent when the vendor reports
    /// a shorthand reference to the target's implicit primary key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referenced (parent) table name
    pub to_table: String,
    /// Referential action on update
    pub on_update: String,
    /// Referential action on delete
    pub on_delete: String,
    /// Column pairs in key order
    pub columns: Vec<ForeignKeyColumn>,
}

impl ForeignKey {
    /// Create a stub with an empty column list; key-usage rows fill it in.
    pub fn new(
        to_table: impl Into<String>,
        on_update: impl Into<String>,
        on_delete: impl Into<String>,
    ) -> Self {
        Self {
            to_table: to_table.into(),
            on_update: on_update.into(),
            on_delete: on_delete.into(),
            columns: Vec::new(),
        }
    }
}
