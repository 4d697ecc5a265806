//! Persistence on SQLite.
//!
//! [`db::Db`] opens a configured, migrated connection. [`gateway`] builds every
//! owner-scoped statement; the table modules wrap it per entity and borrow a
//! connection (or a transaction) for their lifetime.
//!
//! ```rust,no_run
//! use taskboard::db::{db::Db, projects::Projects};
//!
//! let db = Db::new()?;
//! let projects = Projects::new(&db.conn).list(1)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup: foreign keys, WAL, busy timeout, migrations.
pub mod db;

/// Versioned schema changes recorded in the `migrations` table.
pub mod migrations;

/// Owner-scoped reads, whitelisted updates, bulk order shifts and transactions.
pub mod gateway;

pub mod categories;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod users;
