//! Lightweight helper for hand-written SQL
//!
//! The service modules mostly go through the builders in [`crate::qb`], but
//! reports and other one-off statements are easier written by hand; this
//! keeps their parameters bound positionally instead of interpolated.

use crate::client::GenericClient;
use crate::error::DbResult;
use crate::row::FromRow;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A hand-written SQL statement with type-safe positional parameter binding.
///
/// # Example
///
/// ```ignore
/// use tilldb::query;
///
/// let open_orders: Vec<Order> =
///     query("SELECT * FROM orders WHERE status = $1 AND opened_at >= $2")
///         .bind("open")
///         .bind(since)
///         .fetch_all(&client)
///         .await?;
/// ```
pub struct Query {
    sql: String,
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

/// Create a new query with the given SQL
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        params: Vec::new(),
    }
}

impl Query {
    /// Bind the next positional parameter (`$1`, `$2`, ... in bind order)
    pub fn bind<T: ToSql + Sync + Send + 'static>(mut self, value: T) -> Self {
        self.params.push(Box::new(value));
        self
    }

    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref() as _).collect()
    }

    /// Execute the query and return all rows
    pub async fn query_rows(&self, conn: &impl GenericClient) -> DbResult<Vec<Row>> {
        conn.query(&self.sql, &self.params_ref()).await
    }

    /// Execute the query and return all rows mapped to type T
    pub async fn fetch_all<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Vec<T>> {
        let rows = self.query_rows(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return exactly one row mapped to type T
    pub async fn fetch_one<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<T> {
        let row = conn.query_one(&self.sql, &self.params_ref()).await?;
        T::from_row(&row)
    }

    /// Execute the query and return at most one row mapped to type T
    pub async fn fetch_opt<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Option<T>> {
        let row = conn.query_opt(&self.sql, &self.params_ref()).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the query and return the number of affected rows
    pub async fn execute(&self, conn: &impl GenericClient) -> DbResult<u64> {
        conn.execute(&self.sql, &self.params_ref()).await
    }
}
