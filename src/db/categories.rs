use super::gateway::{self, Entity, Filter};
use super::projects::Project;
use super::tasks::Tasks;
use crate::libs::error::{BoardError, BoardResult, EntityKind};
use crate::libs::task::BoardStatus;
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str =
    "INSERT INTO categories (user_id, project_id, name, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1 AND user_id = ?2";
const COUNT_NAME_CLASHES: &str =
    "SELECT COUNT(*) FROM categories WHERE user_id = ?1 AND project_id IS ?2 AND name = ?3 AND id IS NOT ?4";

/// Columns every new account starts with. They are not bound to a project.
pub const DEFAULT_CATEGORIES: &[(&str, BoardStatus)] = &[
    ("Open", BoardStatus::Open),
    ("In Progress", BoardStatus::InProgress),
    ("In Review", BoardStatus::Review),
    ("Complete", BoardStatus::Complete),
];

/// A board column. With `project_id` set it belongs to that project only;
/// without, every project of the owner can use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub name: String,
    pub status: BoardStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn accepts_project(&self, project_id: i64) -> bool {
        self.project_id.map_or(true, |own| own == project_id)
    }
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "id, user_id, project_id, name, status, created_at, updated_at";
    const FILTERABLE: &'static [&'static str] = &["project_id", "name", "status"];
    const UPDATABLE: &'static [&'static str] = &["name", "status"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            id: row.get(0)?,
            user_id: row.get(1)?,
            project_id: row.get(2)?,
            name: row.get(3)?,
            status: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

pub struct Categories<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Categories<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates a column, optionally bound to one of the owner's projects.
    pub fn create(&self, owner: i64, project_id: Option<i64>, name: &str, status: BoardStatus) -> BoardResult<i64> {
        if let Some(project_id) = project_id {
            if gateway::find_owned::<Project>(self.conn, project_id, owner)?.is_none() {
                return Err(BoardError::not_found(EntityKind::Project, project_id));
            }
        }
        self.ensure_name_free(owner, project_id, name, None)?;
        self.conn
            .execute(INSERT_CATEGORY, params![owner, project_id, name, status, Utc::now()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, owner: i64, id: i64) -> BoardResult<Option<Category>> {
        gateway::find_owned::<Category>(self.conn, id, owner)
    }

    /// Every column of the owner.
    pub fn list(&self, owner: i64) -> BoardResult<Vec<Category>> {
        gateway::list_owned::<Category>(self.conn, owner, &Filter::new())
    }

    /// Columns usable by a project: its own plus the unbound ones.
    pub fn list_for_project(&self, owner: i64, project_id: i64) -> BoardResult<Vec<Category>> {
        let categories = self.list(owner)?;
        Ok(categories.into_iter().filter(|c| c.accepts_project(project_id)).collect())
    }

    pub fn update(&self, owner: i64, id: i64, name: Option<&str>, status: Option<BoardStatus>) -> BoardResult<()> {
        let mut fields = Vec::new();
        if let Some(name) = name {
            let category = self
                .get_by_id(owner, id)?
                .ok_or_else(|| BoardError::not_found(EntityKind::Category, id))?;
            self.ensure_name_free(owner, category.project_id, name, Some(id))?;
            fields.push(("name", Value::Text(name.to_string())));
        }
        if let Some(status) = status {
            fields.push(("status", Value::Text(status.as_str().to_string())));
        }
        if gateway::update_fields::<Category>(self.conn, id, owner, &fields)? == 0 {
            return Err(BoardError::not_found(EntityKind::Category, id));
        }
        Ok(())
    }

    /// Deletes an empty column. Columns still holding tasks are refused.
    pub fn delete(&self, owner: i64, id: i64) -> BoardResult<()> {
        if self.get_by_id(owner, id)?.is_none() {
            return Err(BoardError::not_found(EntityKind::Category, id));
        }
        let remaining = Tasks::new(self.conn).count_in_category(owner, id)?;
        if remaining > 0 {
            return Err(BoardError::validation(format!(
                "category {id} still holds {remaining} task(s); move them first"
            )));
        }
        self.conn.execute(DELETE_CATEGORY, params![id, owner])?;
        Ok(())
    }

    /// Column names are unique per owner among the unbound columns and
    /// within each project.
    fn ensure_name_free(&self, owner: i64, project_id: Option<i64>, name: &str, except: Option<i64>) -> BoardResult<()> {
        let clashes: i64 = self
            .conn
            .query_row(COUNT_NAME_CLASHES, params![owner, project_id, name, except], |row| row.get(0))?;
        if clashes > 0 {
            return Err(BoardError::validation(format!("category `{name}` already exists")));
        }
        Ok(())
    }

    pub fn create_defaults(&self, owner: i64) -> BoardResult<()> {
        for (name, status) in DEFAULT_CATEGORIES {
            self.create(owner, None, name, *status)?;
        }
        Ok(())
    }
}
