//! Connection pool construction and the owned `Database` handle.
//!
//! The pool is never global: callers construct a [`Database`] explicitly and
//! pass it (or clients checked out from it) into the service layer. Probing
//! connectivity is an explicit [`Database::health_check`] call, not an
//! import-time side effect.

use crate::client::GenericClient;
use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::transaction::{self, TxConn};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime, Status};
use std::time::Duration;
use tokio_postgres::NoTls;
use tokio_postgres::Socket;
use tokio_postgres::tls::{MakeTlsConnect, TlsConnect};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a [`DbConfig`].
///
/// Uses `NoTls`; for databases that require TLS, use [`create_pool_with_tls`]
/// with a connector from your TLS crate of choice.
pub fn create_pool(config: &DbConfig) -> DbResult<Pool> {
    create_pool_with_tls(config, NoTls)
}

/// Create a connection pool using a custom TLS connector.
pub fn create_pool_with_tls<T>(config: &DbConfig, tls: T) -> DbResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(config.to_pg_config(), tls, manager_config);

    Pool::builder(mgr)
        .max_size(config.pool_size)
        .wait_timeout(config.checkout_timeout)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| DbError::Pool(e.to_string()))
}

/// An explicitly owned database handle wrapping the connection pool.
///
/// Cloning is cheap (the pool is internally shared); pass clones into the
/// service modules instead of reaching for a global.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Open a database handle from configuration.
    ///
    /// Connections are established lazily on first checkout; call
    /// [`health_check`](Self::health_check) to probe connectivity eagerly.
    pub fn connect(config: &DbConfig) -> DbResult<Self> {
        Ok(Self {
            pool: create_pool(config)?,
        })
    }

    /// Wrap an already-built pool.
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Check out one connection from the pool.
    ///
    /// Suspends until a connection is available or the configured checkout
    /// timeout elapses.
    pub async fn client(&self) -> DbResult<deadpool_postgres::Client> {
        self.pool.get().await.map_err(DbError::from)
    }

    /// Probe connectivity with a `SELECT 1` round trip.
    ///
    /// Bounded so a dead server surfaces as an error instead of a hung
    /// startup.
    pub async fn health_check(&self) -> DbResult<()> {
        let probe = async {
            let client = self.client().await?;
            GenericClient::query_one(&client, "SELECT 1", &[]).await?;
            Ok::<(), DbError>(())
        };
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, probe).await {
            Ok(result) => {
                result?;
                tracing::debug!("database health check passed");
                Ok(())
            }
            Err(_) => Err(DbError::Connection(format!(
                "health check timed out after {:?}",
                HEALTH_CHECK_TIMEOUT
            ))),
        }
    }

    /// Pool counters (size, available, waiting).
    pub fn status(&self) -> Status {
        self.pool.status()
    }

    /// Run a unit of work inside a transaction.
    ///
    /// See [`transaction::run`] for the full contract.
    pub async fn transaction<T, F, Fut>(&self, work: F) -> DbResult<T>
    where
        F: FnOnce(TxConn) -> Fut,
        Fut: std::future::Future<Output = DbResult<T>>,
    {
        transaction::run(&self.pool, work).await
    }

    /// Close the pool. Outstanding checkouts fail; idle connections are dropped.
    pub fn close(&self) {
        tracing::info!("closing database pool");
        self.pool.close();
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("Database")
            .field("max_size", &status.max_size)
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
