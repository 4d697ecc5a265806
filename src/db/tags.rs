use super::gateway::{self, Entity, Filter};
use crate::libs::error::{BoardError, BoardResult, EntityKind};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const INSERT_TAG: &str = "INSERT INTO tags (user_id, name, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const DELETE_TAG: &str = "DELETE FROM tags WHERE id = ?1 AND user_id = ?2";
const SELECT_TAGS_BY_TASK: &str = "
    SELECT t.id, t.user_id, t.name, t.color, t.created_at, t.updated_at FROM tags t
    JOIN task_tags tt ON t.id = tt.tag_id
    WHERE tt.task_id = ?1
    ORDER BY t.name
";
const SELECT_TASKS_BY_TAG: &str = "
    SELECT tt.task_id FROM task_tags tt
    JOIN tags t ON t.id = tt.tag_id
    WHERE tt.tag_id = ?1 AND t.user_id = ?2
    ORDER BY tt.task_id
";
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)";
const DELETE_TASK_TAG: &str = "DELETE FROM task_tags WHERE task_id = ?1 AND tag_id = ?2";
const DELETE_ALL_TASK_TAGS: &str = "DELETE FROM task_tags WHERE task_id = ?1";

/// Tags every new account starts with.
pub const DEFAULT_TAGS: &[(&str, &str)] = &[
    ("Feature", "#5CFFBC"),
    ("Testing", "#6FCCF6"),
    ("UI/UX", "#8F6BED"),
    ("Enhancement", "#FF55EE"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static str = "id, user_id, name, color, created_at, updated_at";
    const FILTERABLE: &'static [&'static str] = &["name", "color"];
    const UPDATABLE: &'static [&'static str] = &["name", "color"];
    const LIST_ORDER: &'static str = "name ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Tag {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            color: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

pub struct Tags<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Tags<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Create a new tag
    pub fn create(&self, owner: i64, name: &str, color: &str) -> BoardResult<i64> {
        self.conn.execute(INSERT_TAG, params![owner, name, color, Utc::now()])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update name and color of an owned tag
    pub fn update(&self, owner: i64, id: i64, name: &str, color: &str) -> BoardResult<()> {
        let fields = [("name", Value::Text(name.to_string())), ("color", Value::Text(color.to_string()))];
        if gateway::update_fields::<Tag>(self.conn, id, owner, &fields)? == 0 {
            return Err(BoardError::not_found(EntityKind::Tag, id));
        }
        Ok(())
    }

    /// Delete a tag and its task links
    pub fn delete(&self, owner: i64, id: i64) -> BoardResult<()> {
        if self.conn.execute(DELETE_TAG, params![id, owner])? == 0 {
            return Err(BoardError::not_found(EntityKind::Tag, id));
        }
        Ok(())
    }

    pub fn list(&self, owner: i64) -> BoardResult<Vec<Tag>> {
        gateway::list_owned::<Tag>(self.conn, owner, &Filter::new())
    }

    pub fn get_by_id(&self, owner: i64, id: i64) -> BoardResult<Option<Tag>> {
        gateway::find_owned::<Tag>(self.conn, id, owner)
    }

    pub fn get_by_name(&self, owner: i64, name: &str) -> BoardResult<Option<Tag>> {
        let mut found = gateway::list_owned::<Tag>(self.conn, owner, &Filter::new().eq("name", name.to_string()))?;
        Ok(found.pop())
    }

    /// Tags linked to a task, by name
    pub fn get_task_tags(&self, task_id: i64) -> BoardResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_BY_TASK)?;
        let tags = stmt
            .query_map(params![task_id], |row| Tag::from_row(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Ids of the owner's tasks carrying a tag
    pub fn get_tasks_with_tag(&self, owner: i64, tag_id: i64) -> BoardResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_BY_TAG)?;
        let ids = stmt
            .query_map(params![tag_id, owner], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    pub fn add_tag_to_task(&self, task_id: i64, tag_id: i64) -> BoardResult<()> {
        self.conn.execute(INSERT_TASK_TAG, params![task_id, tag_id])?;
        Ok(())
    }

    pub fn remove_tag_from_task(&self, task_id: i64, tag_id: i64) -> BoardResult<()> {
        self.conn.execute(DELETE_TASK_TAG, params![task_id, tag_id])?;
        Ok(())
    }

    /// Replace the tags of a task
    pub fn set_task_tags(&self, task_id: i64, tag_ids: &[i64]) -> BoardResult<()> {
        self.conn.execute(DELETE_ALL_TASK_TAGS, params![task_id])?;
        for tag_id in tag_ids {
            self.add_tag_to_task(task_id, *tag_id)?;
        }
        Ok(())
    }

    pub fn create_defaults(&self, owner: i64) -> BoardResult<()> {
        for (name, color) in DEFAULT_TAGS {
            self.create(owner, name, color)?;
        }
        Ok(())
    }
}
