//! Read-only database schema introspection.
//!
//! `sqint` connects to a MySQL, PostgreSQL or SQLite database, walks the
//! vendor catalog in a fixed sequence of queries and folds the rows into a
//! single vendor-neutral [`Schema`] value. Extraction never writes to the
//! target database, opens at most one connection, and closes it before
//! returning.
//!
//! ```ignore
//! use sqint::{ConnectionParams, ExtractOptions, Vendor};
//!
//! let options = ExtractOptions::new(Vendor::SQLite, ConnectionParams::file("app.db"));
//! let schema = smol::block_on(sqint::extract(&options))?;
//! println!("{} tables", schema.table_count);
//! ```

pub mod drivers;
pub mod error;
pub mod options;
pub mod schema;

pub use drivers::extract;
pub use error::ExtractError;
pub use options::{ConnectionParams, ExtractOptions, SslMode, Vendor};
pub use schema::{Column, ForeignKey, ForeignKeyColumn, Index, IndexKind, Schema, Table};
