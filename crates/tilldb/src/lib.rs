//! # tilldb
//!
//! Postgres data-access core for a restaurant point-of-sale backend.
//!
//! The POS service modules (categories, menu, tables, orders, cash sessions,
//! customer profiles, auth) are thin consumers of two things this crate
//! provides:
//!
//! - **Query builder** ([`qb`]): chainable, consuming builders that compile
//!   one parameterized statement per instance. Filters AND together in call
//!   order, values bind positionally (`$1`, `$2`, ...), and DML carries
//!   `RETURNING *` so writes hand the affected rows back.
//! - **Transaction coordinator** ([`transaction`]): runs a unit of work on
//!   one exclusive pooled connection with all-or-nothing semantics — `BEGIN`,
//!   work, `COMMIT` on `Ok` / `ROLLBACK` on `Err`, connection released on
//!   every path.
//!
//! Around those sit an explicitly owned [`Database`] handle (no globals, no
//! import-time connectivity probes), environment-driven [`DbConfig`], a raw
//! [`query`] escape hatch for hand-written SQL, and a [`DbError`] taxonomy
//! that classifies constraint and schema violations by SQLSTATE.
//!
//! ## Example
//!
//! ```ignore
//! use tilldb::{Database, DbConfig, insert, select, SqlBuilder};
//!
//! let db = Database::connect(&DbConfig::from_env())?;
//! db.health_check().await?;
//!
//! let client = db.client().await?;
//! let category: Category = insert("categories")
//!     .set("name", "Drinks")
//!     .fetch_one(&client)
//!     .await?;
//!
//! let found: Option<Category> = select("categories")
//!     .eq("id", category.id)
//!     .single()
//!     .fetch_opt(&client)
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pool;
pub mod qb;
pub mod query;
pub mod row;
pub mod transaction;

pub use client::GenericClient;
pub use config::DbConfig;
pub use error::{DbError, DbResult, ErrorKind};
pub use pool::{create_pool, create_pool_with_tls, Database};
pub use query::query;
pub use row::{FromRow, RowExt};
pub use transaction::TxConn;

// Re-export the builders for easy access
pub use qb::{
    delete, insert, select, update, DeleteBuilder, Direction, InsertBuilder, MutationBuilder,
    SelectBuilder, SqlBuilder, UpdateBuilder,
};
