//! Query builder for the POS data-access layer.
//!
//! One builder instance represents one in-progress statement: it accumulates
//! table, projection, filters, ordering, and paging through chained calls,
//! then compiles a single parameterized SQL statement at its terminal call.
//! Values are always bound positionally (`$1`, `$2`, ...), never interpolated
//! into the SQL text.
//!
//! Terminal methods take the builder by value, so a spent builder cannot be
//! reused.
//!
//! # Usage
//!
//! ```ignore
//! use tilldb::{select, insert, update, delete, Direction, SqlBuilder, MutationBuilder};
//!
//! // SELECT
//! let drinks: Vec<MenuItem> = select("menu_items")
//!     .eq("category_id", category_id)
//!     .order_by("name", Direction::Asc)
//!     .limit(50)
//!     .fetch_all(&client)
//!     .await?;
//!
//! // INSERT (returns the inserted row via RETURNING *)
//! let category: Category = insert("categories")
//!     .set("name", "Drinks")
//!     .fetch_one(&client)
//!     .await?;
//!
//! // UPDATE
//! let updated: Category = update("categories")
//!     .set("name", "Beverages")
//!     .eq("id", category.id)
//!     .fetch_one(&client)
//!     .await?;
//!
//! // DELETE
//! delete("categories").eq("id", category.id).execute(&client).await?;
//! ```

mod delete;
mod filter;
mod insert;
mod param;
mod select;
mod traits;
mod update;

pub use delete::DeleteBuilder;
pub use filter::{Filter, FilterSet};
pub use insert::InsertBuilder;
pub use param::{Param, ParamList};
pub use select::{Direction, SelectBuilder};
pub use traits::{MutationBuilder, SqlBuilder};
pub use update::UpdateBuilder;

/// Create a SELECT query builder for the given table.
///
/// The table name is not validated against a schema; a bad name surfaces as
/// [`DbError::UndefinedTable`](crate::DbError::UndefinedTable) at execution.
pub fn select(table: &str) -> SelectBuilder {
    SelectBuilder::new(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// # Safety
/// By default, DELETE without WHERE conditions generates `WHERE 1=0` (no-op).
/// Use `allow_delete_all(true)` to allow deleting all rows.
pub fn delete(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

#[cfg(test)]
mod tests;
