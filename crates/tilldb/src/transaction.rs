//! Transaction coordinator: all-or-nothing execution of a unit of work over
//! one exclusive connection.
//!
//! The unit of work is a closure returning `DbResult<T>`; the coordinator
//! inspects the result and issues `COMMIT` or `ROLLBACK` accordingly. No
//! panic/catch control flow is involved.
//!
//! Per invocation the lifecycle is: checkout → `BEGIN` → work →
//! `COMMIT`/`ROLLBACK` → release. A connection only re-enters the pool after
//! a clean `COMMIT` or `ROLLBACK`; if the invocation ends any other way (the
//! work panics, the caller drops the future at an await point, `COMMIT` or
//! `ROLLBACK` itself fails), the connection is withdrawn from the pool and
//! closed, so no later checkout can land inside the abandoned transaction.
//!
//! # Example
//!
//! ```ignore
//! use tilldb::{insert, update, DbResult};
//!
//! let order = db.transaction(|tx| async move {
//!     let order: Order = insert("orders")
//!         .set("table_id", table_id)
//!         .set("status", "open")
//!         .fetch_one(&tx)
//!         .await?;
//!
//!     for item in &items {
//!         insert("order_items")
//!             .set("order_id", order.id)
//!             .set("menu_item_id", item.menu_item_id)
//!             .set("quantity", item.quantity)
//!             .execute(&tx)
//!             .await?;
//!     }
//!
//!     update("dining_tables")
//!         .set("status", "occupied")
//!         .eq("id", table_id)
//!         .execute(&tx)
//!         .await?;
//!
//!     Ok(order)
//! }).await?;
//! ```

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use deadpool_postgres::Pool;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A handle bound to the one connection checked out for a transaction.
///
/// Cloneable so the unit of work can thread it through helper calls; all
/// clones target the same connection, and statements issued through them run
/// strictly sequentially. The handle must not be retained beyond the unit of
/// work — a kept clone pins the connection out of the pool.
#[derive(Clone)]
pub struct TxConn {
    inner: Arc<deadpool_postgres::Client>,
}

impl TxConn {
    fn new(inner: Arc<deadpool_postgres::Client>) -> Self {
        Self { inner }
    }
}

impl GenericClient for TxConn {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        GenericClient::query(&*self.inner, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        GenericClient::execute(&*self.inner, sql, params).await
    }
}

/// Holds the checked-out connection until the transaction settles.
///
/// [`settle`](Self::settle) releases the connection for normal pool recycling
/// and is called only after a clean `COMMIT`/`ROLLBACK` (or when no
/// transaction was opened). If the guard drops unsettled, the connection is
/// taken out of the pool and closed: the server aborts the open transaction
/// on disconnect, and the pool replaces the slot with a fresh connection on
/// demand.
struct TxGuard {
    conn: Option<Arc<deadpool_postgres::Client>>,
}

impl TxGuard {
    fn new(conn: deadpool_postgres::Client) -> (Self, Arc<deadpool_postgres::Client>) {
        let conn = Arc::new(conn);
        let guard = Self {
            conn: Some(Arc::clone(&conn)),
        };
        (guard, conn)
    }

    fn settle(&mut self) {
        self.conn = None;
    }
}

impl Drop for TxGuard {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else { return };
        match Arc::try_unwrap(conn) {
            Ok(conn) => {
                tracing::warn!(
                    "transaction ended without COMMIT/ROLLBACK; closing its connection"
                );
                drop(deadpool_postgres::Client::take(conn));
            }
            Err(_) => {
                // A leaked TxConn clone still owns the connection; it will
                // re-enter the pool mid-transaction when that clone drops.
                tracing::warn!(
                    "transaction ended without COMMIT/ROLLBACK while a TxConn \
                     handle is still live; cannot withdraw the connection"
                );
            }
        }
    }
}

/// Run `work` inside a transaction on one connection checked out from `pool`.
///
/// - Checks out a connection (suspends until one is available).
/// - Issues `BEGIN`, then invokes `work` with a [`TxConn`] bound to that
///   connection.
/// - `Ok(_)` from the work commits; `Err(_)` rolls back and the work's error
///   is returned.
/// - If `ROLLBACK` itself fails, the failure is logged, the original error
///   still wins, and the connection is discarded rather than recycled.
/// - The connection re-enters the pool only after a clean `COMMIT` or
///   `ROLLBACK`; on every other exit (panic, cancellation, failed
///   `COMMIT`/`ROLLBACK`) it is withdrawn from the pool and closed.
pub async fn run<T, F, Fut>(pool: &Pool, work: F) -> DbResult<T>
where
    F: FnOnce(TxConn) -> Fut,
    Fut: std::future::Future<Output = DbResult<T>>,
{
    let (mut guard, conn) = TxGuard::new(pool.get().await.map_err(DbError::from)?);

    if let Err(begin_err) = conn.batch_execute("BEGIN").await {
        // Nothing was opened; the connection is safe to recycle.
        guard.settle();
        return Err(DbError::from_db_error(begin_err));
    }

    let outcome = work(TxConn::new(Arc::clone(&conn))).await;

    match outcome {
        Ok(value) => {
            conn.batch_execute("COMMIT")
                .await
                .map_err(DbError::from_db_error)?;
            guard.settle();
            Ok(value)
        }
        Err(error) => {
            match conn.batch_execute("ROLLBACK").await {
                Ok(()) => guard.settle(),
                Err(rollback_err) => {
                    tracing::warn!(
                        error = %rollback_err,
                        "transaction rollback failed; discarding the connection"
                    );
                }
            }
            Err(error)
        }
    }
}
