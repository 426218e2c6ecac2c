//! Schema versioning tracked with `PRAGMA user_version`

use crate::utils::error::Result;
use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 1;

/// 依序套用尚未執行的遷移；只會往前
pub fn migrate_to_latest(conn: &mut Connection) -> Result<()> {
    let current = schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        tracing::debug!("Schema up to date (version {})", current);
        return Ok(());
    }

    let tx = conn.transaction()?;
    if current < 1 {
        migration_v1(&tx)?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    tracing::info!("Database schema migrated from version {} to {}", current, SCHEMA_VERSION);
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn migration_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS personas (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre    TEXT NOT NULL,
            apellido  TEXT NOT NULL,
            email     TEXT NOT NULL UNIQUE,
            telefono  TEXT,
            direccion TEXT
        );",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_fresh_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        migrate_to_latest(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_to_latest(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO personas (nombre, apellido, email) VALUES ('Ana', 'Pérez', 'ana@example.com')",
            [],
        )
        .unwrap();

        migrate_to_latest(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_email_is_unique() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_to_latest(&mut conn).unwrap();

        let insert = "INSERT INTO personas (nombre, apellido, email) VALUES ('Ana', 'Pérez', 'ana@example.com')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }
}
