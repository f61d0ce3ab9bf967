use crate::{config::StoreConfig, error::StoreError};
use log::{debug, info, warn};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, Statement, TransactionTrait,
};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Upper bound on a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Explicitly constructed handle to the relational store.
///
/// Cloning is cheap: clones share the connection pool and the write guard.
#[derive(Debug, Clone)]
pub struct Store {
    conn: DatabaseConnection,
    deadline: Duration,
    reservation_minutes: i64,
    retries: u32,
    backoff: Duration,
    /// Serializes guarded writes on backends without advisory locks
    write_guard: Arc<Mutex<()>>,
}

/// A transaction holding the lock on one conflict scope until it ends
pub(crate) struct GuardedTxn {
    txn: DatabaseTransaction,
    _guard: Option<OwnedMutexGuard<()>>,
}

impl GuardedTxn {
    pub(crate) fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub(crate) async fn commit(self) -> Result<(), StoreError> {
        let Self { txn, _guard } = self;
        txn.commit().await?;
        Ok(())
    }
}

impl Store {
    /// Builds the pool and waits for the store to answer, retrying with backoff
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .test_before_acquire(true)
            .sqlx_logging(config.sql_logging);

        if let Some(idle) = config.idle_timeout {
            options.idle_timeout(idle);
        }
        if let Some(lifetime) = config.max_lifetime {
            options.max_lifetime(lifetime);
        }

        let conn = with_backoff(
            config.connect_retries,
            config.retry_backoff,
            "connect",
            || Database::connect(options.clone()),
        )
        .await?;

        info!(
            "Connected to {:?} store (pool {}..={} connections)",
            conn.get_database_backend(),
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            conn,
            deadline: config.operation_timeout,
            reservation_minutes: config.reservation_minutes,
            retries: config.connect_retries,
            backoff: config.retry_backoff,
            write_guard: Arc::new(Mutex::new(())),
        })
    }

    /// Brings the schema up to date; called once at process start
    pub async fn migrate(&self) -> Result<(), StoreError> {
        info!("Running migrations");
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.conn.ping().await?;
        Ok(())
    }

    /// Closes every pooled connection
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        info!("Store closed");
        Ok(())
    }

    /// A handle on the same pool whose operations must finish within `deadline`
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            deadline,
            ..self.clone()
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub(crate) fn reservation_minutes(&self) -> i64 {
        self.reservation_minutes
    }

    /// Runs one store operation under this handle's deadline.
    ///
    /// On expiry the operation's future is dropped, which rolls back any open transaction.
    pub(crate) async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{op} exceeded its {:?} deadline and was rolled back", self.deadline);
                Err(StoreError::Timeout(format!(
                    "{op} exceeded {:?}",
                    self.deadline
                )))
            }
        }
    }

    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction, StoreError> {
        with_backoff(self.retries, self.backoff, "begin transaction", || {
            self.conn.begin()
        })
        .await
    }

    /// Opens a transaction that holds an exclusive lock on `scope` until commit or rollback
    pub(crate) async fn begin_guarded(&self, scope: &str) -> Result<GuardedTxn, StoreError> {
        match self.conn.get_database_backend() {
            DatabaseBackend::Postgres => {
                let txn = self.begin().await?;
                txn.execute(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))",
                    [scope.into()],
                ))
                .await?;
                debug!("Holding advisory lock on {scope}");

                Ok(GuardedTxn { txn, _guard: None })
            }
            _ => {
                // Take the guard before a connection so waiters do not pin pool slots
                let guard = Arc::clone(&self.write_guard).lock_owned().await;
                let txn = self.begin().await?;
                debug!("Holding write guard for {scope}");

                Ok(GuardedTxn {
                    txn,
                    _guard: Some(guard),
                })
            }
        }
    }
}

async fn with_backoff<T, F, Fut>(
    retries: u32,
    base: Duration,
    what: &str,
    mut attempt: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut delay = base;
    let mut tries = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if StoreError::is_transient(&err) => {
                if tries >= retries {
                    return Err(StoreError::Timeout(format!(
                        "{what} still failing after {retries} retries: {err}"
                    )));
                }

                tries += 1;
                warn!("{what} failed ({err}); retry {tries}/{retries} in {delay:?}");
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_BACKOFF);
            }
            Err(err) => return Err(err.into()),
        }
    }
}
