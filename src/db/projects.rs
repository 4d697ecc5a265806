use super::gateway::{self, Entity, Filter};
use crate::libs::error::{BoardError, BoardResult, EntityKind};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const INSERT_PROJECT: &str = "INSERT INTO projects (user_id, name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
// Tasks go with the project (ON DELETE CASCADE), so no scope is left gapped.
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1 AND user_id = ?2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str = "id, user_id, name, description, created_at, updated_at";
    const FILTERABLE: &'static [&'static str] = &["name"];
    const UPDATABLE: &'static [&'static str] = &["name", "description"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Project {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

pub struct Projects<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Projects<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, owner: i64, name: &str, description: Option<&str>) -> BoardResult<i64> {
        self.conn.execute(INSERT_PROJECT, params![owner, name, description, Utc::now()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, owner: i64, id: i64) -> BoardResult<Option<Project>> {
        gateway::find_owned::<Project>(self.conn, id, owner)
    }

    pub fn list(&self, owner: i64) -> BoardResult<Vec<Project>> {
        gateway::list_owned::<Project>(self.conn, owner, &Filter::new())
    }

    /// Renames a project; `description: None` leaves the description as is.
    pub fn update(&self, owner: i64, id: i64, name: Option<&str>, description: Option<&str>) -> BoardResult<()> {
        let mut fields = Vec::new();
        if let Some(name) = name {
            fields.push(("name", Value::Text(name.to_string())));
        }
        if let Some(description) = description {
            fields.push(("description", Value::Text(description.to_string())));
        }
        if gateway::update_fields::<Project>(self.conn, id, owner, &fields)? == 0 {
            return Err(BoardError::not_found(EntityKind::Project, id));
        }
        Ok(())
    }

    pub fn delete(&self, owner: i64, id: i64) -> BoardResult<()> {
        if self.conn.execute(DELETE_PROJECT, params![id, owner])? == 0 {
            return Err(BoardError::not_found(EntityKind::Project, id));
        }
        Ok(())
    }
}
