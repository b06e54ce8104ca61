//! Trait definitions for query builders.

use crate::client::GenericClient;
use crate::error::DbResult;
use crate::qb::param::ParamList;
use crate::row::FromRow;
use tokio_postgres::Row;

/// Base trait for all query builders.
///
/// Terminal methods consume the builder: a builder instance accumulates state
/// through chained calls and is spent by exactly one terminal operation.
/// Reuse after a terminal call is a compile error, not undefined behavior.
pub trait SqlBuilder: Send + Sync {
    /// Compile the final SQL string and its positional parameters.
    fn build_query(&self) -> (String, ParamList);

    /// Validate builder state before execution.
    fn validate(&self) -> DbResult<()> {
        Ok(())
    }

    /// The SQL this builder would execute (for tests and debugging).
    fn to_sql(&self) -> String {
        self.build_query().0
    }

    /// Execute and return all raw rows.
    fn query_rows(
        self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = DbResult<Vec<Row>>> + Send
    where
        Self: Sized,
    {
        async move {
            self.validate()?;
            let (sql, params) = self.build_query();
            conn.query(&sql, &params.as_refs()).await
        }
    }

    /// Execute and map all rows to `T`.
    fn fetch_all<T: FromRow>(
        self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = DbResult<Vec<T>>> + Send
    where
        Self: Sized,
    {
        async move {
            let rows = self.query_rows(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }

    /// Execute and map the first row to `T`, if any.
    ///
    /// `Ok(None)` is the legitimate "zero rows, no error" read; callers that
    /// need exactly-one semantics check the `Option` themselves.
    fn fetch_opt<T: FromRow>(
        self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = DbResult<Option<T>>> + Send
    where
        Self: Sized,
    {
        async move {
            self.validate()?;
            let (sql, params) = self.build_query();
            let row = conn.query_opt(&sql, &params.as_refs()).await?;
            row.as_ref().map(T::from_row).transpose()
        }
    }

    /// Execute and map the first row to `T`, erroring with
    /// [`DbError::NotFound`](crate::DbError::NotFound) on zero rows.
    fn fetch_one<T: FromRow>(
        self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = DbResult<T>> + Send
    where
        Self: Sized,
    {
        async move {
            self.validate()?;
            let (sql, params) = self.build_query();
            let row = conn.query_one(&sql, &params.as_refs()).await?;
            T::from_row(&row)
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationBuilder: SqlBuilder {
    /// Execute and return the affected row count, discarding `RETURNING` rows.
    fn execute(
        self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = DbResult<u64>> + Send
    where
        Self: Sized,
    {
        async move {
            self.validate()?;
            let (sql, params) = self.build_query();
            conn.execute(&sql, &params.as_refs()).await
        }
    }
}
