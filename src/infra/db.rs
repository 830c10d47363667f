use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use sqlx::pool::PoolOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Database, PgPool, Postgres, Sqlite, SqlitePool};
use tokio::sync::Mutex;
use tracing::log::LevelFilter;
use tracing::{error, info, warn};

use crate::config::DatabaseSettings;
use crate::error::{is_unique_violation, AppError};

/// Opens the underlying pool. Implementations do the actual network / file work;
/// [`ConnectionCache`] decides when that happens.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    fn settings(&self) -> &DatabaseSettings;
    async fn connect(&self) -> Result<Self::Handle, sqlx::Error>;
}

fn pool_options<DB: Database>(settings: &DatabaseSettings) -> PoolOptions<DB> {
    PoolOptions::<DB>::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.connect_timeout)
        .idle_timeout(settings.idle_timeout)
}

pub struct SqliteConnector {
    settings: DatabaseSettings,
}

impl SqliteConnector {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    type Handle = SqlitePool;

    fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(&self.settings.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = pool_options::<Sqlite>(&self.settings).connect_with(opts).await?;

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

        Ok(pool)
    }
}

pub struct PostgresConnector {
    settings: DatabaseSettings,
}

impl PostgresConnector {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    type Handle = PgPool;

    fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(&self.settings.url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = pool_options::<Postgres>(&self.settings).connect_with(opts).await?;

        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

        Ok(pool)
    }
}

type PendingConnection<H> = Shared<BoxFuture<'static, Result<H, Arc<sqlx::Error>>>>;

enum Slot<H> {
    Empty,
    Connecting(PendingConnection<H>),
    Ready(H),
}

/// Lazily opened, shared database handle.
///
/// Construct one per process and hand it out by `Arc`. Concurrent callers of
/// [`ConnectionCache::get_connection`] share a single in-flight attempt; a failed
/// attempt is reported to all of them and leaves the cache empty so the next call
/// starts over.
pub struct ConnectionCache<C: Connector> {
    connector: Arc<C>,
    slot: Mutex<Slot<C::Handle>>,
}

impl<C: Connector> ConnectionCache<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            slot: Mutex::new(Slot::Empty),
        }
    }

    pub fn settings(&self) -> &DatabaseSettings {
        self.connector.settings()
    }

    pub async fn is_connected(&self) -> bool {
        matches!(*self.slot.lock().await, Slot::Ready(_))
    }

    pub async fn get_connection(&self) -> Result<C::Handle, AppError> {
        let pending = {
            let mut slot = self.slot.lock().await;
            match &*slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Connecting(pending) => pending.clone(),
                Slot::Empty => {
                    let connector = self.connector.clone();
                    let pending = async move { connector.connect().await.map_err(Arc::new) }
                        .boxed()
                        .shared();
                    *slot = Slot::Connecting(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slot = self.slot.lock().await;
        let still_current = matches!(&*slot, Slot::Connecting(current) if current.ptr_eq(&pending));
        match outcome {
            Ok(handle) => {
                if still_current {
                    info!("Database connected successfully");
                    *slot = Slot::Ready(handle.clone());
                }
                Ok(handle)
            }
            Err(e) => {
                if still_current {
                    error!("Database connection failed: {}", e);
                    *slot = Slot::Empty;
                }
                Err(AppError::Connection(e))
            }
        }
    }
}

fn is_transient(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed
    )
}

/// Runs a write, retrying it once on a transient failure when `retry` is set.
pub async fn retry_write<T, F, Fut>(retry: bool, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    match op().await {
        Err(e) if retry && is_transient(&e) => {
            warn!("Transient write failure, retrying once: {}", e);
            op().await.map_err(AppError::Database)
        }
        other => other.map_err(AppError::Database),
    }
}

/// [`retry_write`] for inserts keyed by a client-generated id.
///
/// A transient error can arrive after the first attempt already committed, in which
/// case the retry trips the primary key. That conflict is resolved by reading the
/// row back through `recover`; a miss keeps the conflict.
pub async fn retry_insert<T, F, Fut, R, RFut>(retry: bool, mut op: F, recover: R) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
    R: FnOnce() -> RFut,
    RFut: Future<Output = Result<Option<T>, sqlx::Error>>,
{
    match op().await {
        Err(e) if retry && is_transient(&e) => {
            warn!("Transient insert failure, retrying once: {}", e);
            match op().await {
                Err(e) if is_unique_violation(&e) => {
                    match recover().await.map_err(AppError::Database)? {
                        Some(row) => {
                            info!("Insert committed before the transient failure, keeping stored row");
                            Ok(row)
                        }
                        None => Err(AppError::Database(e)),
                    }
                }
                other => other.map_err(AppError::Database),
            }
        }
        other => other.map_err(AppError::Database),
    }
}
