use super::gateway::{self, Entity, Filter};
use super::tags::Tags;
use crate::libs::error::{BoardResult, EntityKind};
use crate::libs::task::{BoardStatus, NewTask, Task};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (
    user_id, project_id, category_id, title, description, assignee,
    start_date, end_date, status, display_order, created_at, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2";
const SELECT_SCOPE_BY_ORDER: &str = "SELECT id, user_id, project_id, category_id, title, description, assignee,
    start_date, end_date, status, display_order, created_at, updated_at
    FROM tasks
    WHERE user_id = ?1 AND project_id = ?2 AND category_id = ?3
    ORDER BY display_order ASC, id ASC";

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static str = "id, user_id, project_id, category_id, title, description, assignee, \
        start_date, end_date, status, display_order, created_at, updated_at";
    const FILTERABLE: &'static [&'static str] = &["project_id", "category_id", "status"];
    const UPDATABLE: &'static [&'static str] = &[
        "title",
        "description",
        "assignee",
        "start_date",
        "end_date",
        "status",
        "category_id",
        "display_order",
    ];
    const ORDER_COLUMN: Option<&'static str> = Some("display_order");

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Task {
            id: row.get(0)?,
            user_id: row.get(1)?,
            project_id: row.get(2)?,
            category_id: row.get(3)?,
            title: row.get(4)?,
            description: row.get(5)?,
            assignee: row.get(6)?,
            start_date: row.get(7)?,
            end_date: row.get(8)?,
            status: row.get(9)?,
            display_order: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
            tags: Vec::new(),
        })
    }
}

/// Task rows of one connection (or transaction).
pub struct Tasks<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Tasks<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a task at an already computed position and returns its id.
    pub fn insert(&self, owner: i64, task: &NewTask, status: BoardStatus, display_order: i64) -> BoardResult<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![
                owner,
                task.project_id,
                task.category_id,
                task.title,
                task.description,
                task.assignee,
                task.start_date,
                task.end_date,
                status,
                display_order,
                Utc::now(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete(&self, owner: i64, id: i64) -> BoardResult<usize> {
        Ok(self.conn.execute(DELETE_TASK, params![id, owner])?)
    }

    /// Number of tasks in a (user, project, category) scope.
    pub fn count_in_scope(&self, owner: i64, project_id: i64, category_id: i64) -> BoardResult<i64> {
        gateway::count_owned::<Task>(self.conn, owner, &Filter::scope(owner, project_id, category_id))
    }

    /// Tasks of one board column in display order.
    pub fn list_in_scope(&self, owner: i64, project_id: i64, category_id: i64) -> BoardResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_SCOPE_BY_ORDER)?;
        let tasks = stmt
            .query_map(params![owner, project_id, category_id], |row| Task::from_row(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Every task of a project, oldest first.
    pub fn list_for_project(&self, owner: i64, project_id: i64) -> BoardResult<Vec<Task>> {
        gateway::list_owned::<Task>(self.conn, owner, &Filter::new().eq("project_id", project_id))
    }

    pub fn count_in_category(&self, owner: i64, category_id: i64) -> BoardResult<i64> {
        gateway::count_owned::<Task>(self.conn, owner, &Filter::new().eq("category_id", category_id))
    }

    /// Fills `task.tags` for each task.
    pub fn attach_tags(&self, tasks: &mut [Task]) -> BoardResult<()> {
        let tags = Tags::new(self.conn);
        for task in tasks.iter_mut() {
            task.tags = tags.get_task_tags(task.id)?;
        }
        Ok(())
    }
}
