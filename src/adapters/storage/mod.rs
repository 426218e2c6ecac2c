//! SQLite storage: connection pool, migrations and the persona repository
//!
//! rusqlite is synchronous, so every query runs through [`with_connection`],
//! which moves the work onto tokio's blocking thread pool.

pub mod migrations;
pub mod repository;

pub use repository::SqlitePersonaRepository;

use crate::utils::error::{AgendaError, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub type SqlitePool = Pool<SqliteConnectionManager>;

pub const MEMORY_DATABASE: &str = ":memory:";

/// 建立連線池並把 schema 遷移到最新版本
///
/// 記憶體資料庫每條連線都是獨立的資料庫，所以固定只用一條連線。
pub fn initialize_pool(db_path: &str, pool_size: u32) -> Result<SqlitePool> {
    let (manager, size) = if db_path == MEMORY_DATABASE {
        (SqliteConnectionManager::memory(), 1)
    } else {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        (SqliteConnectionManager::file(db_path), pool_size.max(1))
    };

    let wal = db_path != MEMORY_DATABASE;
    let manager = manager.with_init(move |conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.busy_timeout(std::time::Duration::from_secs(5))
    });

    let pool = Pool::builder().max_size(size).build(manager)?;

    let mut conn = pool.get()?;
    migrations::migrate_to_latest(&mut conn)?;
    drop(conn);

    tracing::info!("Database ready at {} (pool size {})", db_path, size);
    Ok(pool)
}

/// 在 blocking 執行緒上取得連線並執行同步的資料庫操作
pub async fn with_connection<F, T>(pool: &SqlitePool, f: F) -> Result<T>
where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AgendaError::TaskError {
        message: format!("database task join error: {}", e),
    })?
}
