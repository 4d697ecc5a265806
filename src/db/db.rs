use super::migrations::init_with_migrations;
use crate::libs::config::{Config, DEFAULT_BUSY_TIMEOUT_MS};
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// One migrated connection to the board database.
///
/// Every command (and every concurrent caller in tests) opens its own `Db`;
/// connections are never shared between threads.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database configured for this machine and applies pending migrations.
    pub fn new() -> Result<Db> {
        let storage = DataStorage::new();
        let config = Config::read_from(&storage)?;
        let path = config.database_path(&storage)?;
        Self::open_with_timeout(path, config.database.busy_timeout())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        Self::open_with_timeout(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        configure(&conn, busy_timeout)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        configure(&conn, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the configured database without touching its schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let storage = DataStorage::new();
        let config = Config::read_from(&storage)?;
        let conn = Connection::open(config.database_path(&storage)?)?;
        configure(&conn, config.database.busy_timeout())?;

        Ok(conn)
    }
}

fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}
