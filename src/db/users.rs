use crate::libs::error::{BoardError, BoardResult, EntityKind};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_USER: &str = "INSERT INTO users (username, email, created_at) VALUES (?1, ?2, ?3)";
const SELECT_USER_BY_ID: &str = "SELECT id, username, email, created_at FROM users WHERE id = ?1";
const SELECT_USER_BY_USERNAME: &str = "SELECT id, username, email, created_at FROM users WHERE username = ?1";
const SELECT_USER_BY_EMAIL: &str = "SELECT id, username, email, created_at FROM users WHERE email = ?1";
const UPDATE_USER: &str =
    "UPDATE users SET username = COALESCE(?2, username), email = COALESCE(?3, email) WHERE id = ?1";

/// Account owning projects, categories, tags and tasks. Its id never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

pub struct Users<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Users<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, username: &str, email: &str) -> BoardResult<i64> {
        self.conn.execute(INSERT_USER, params![username, email, Utc::now()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> BoardResult<Option<User>> {
        Ok(self.conn.query_row(SELECT_USER_BY_ID, params![id], |row| User::from_row(row)).optional()?)
    }

    pub fn get_by_username(&self, username: &str) -> BoardResult<Option<User>> {
        Ok(self
            .conn
            .query_row(SELECT_USER_BY_USERNAME, params![username], |row| User::from_row(row))
            .optional()?)
    }

    pub fn get_by_email(&self, email: &str) -> BoardResult<Option<User>> {
        Ok(self
            .conn
            .query_row(SELECT_USER_BY_EMAIL, params![email], |row| User::from_row(row))
            .optional()?)
    }

    /// Changes username and/or email; `None` keeps the stored value.
    pub fn update(&self, id: i64, username: Option<&str>, email: Option<&str>) -> BoardResult<()> {
        if self.conn.execute(UPDATE_USER, params![id, username, email])? == 0 {
            return Err(BoardError::not_found(EntityKind::User, id));
        }
        Ok(())
    }

    pub fn require(&self, id: i64) -> BoardResult<User> {
        self.get_by_id(id)?.ok_or_else(|| BoardError::not_found(EntityKind::User, id))
    }
}
