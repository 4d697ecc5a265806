use crate::db::categories::{Categories, Category};
use crate::db::db::Db;
use crate::db::gateway::{self, Filter, OrderRange};
use crate::db::projects::Project;
use crate::db::tags::{Tag, Tags};
use crate::db::tasks::Tasks;
use crate::libs::error::{BoardError, BoardResult, EntityKind};
use crate::libs::ordering::{self, RepositionRequest};
use crate::libs::scope::{assert_all_owned, assert_owned, Identity};
use crate::libs::task::{NewTask, Task, TaskUpdate};
use rusqlite::types::Value;
use tracing::info;

/// One board column with its tasks in display order.
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub category: Category,
    pub tasks: Vec<Task>,
}

/// Task operations for one identity over one connection.
pub struct TaskService {
    db: Db,
    identity: Identity,
}

impl TaskService {
    pub fn new(db: Db, identity: Identity) -> Self {
        Self { db, identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Appends a new task at the end of its (project, category) column.
    pub fn create_task(&mut self, new_task: &NewTask) -> BoardResult<Task> {
        let identity = self.identity;
        if new_task.title.trim().is_empty() {
            return Err(BoardError::validation("task title must not be empty"));
        }

        let task = gateway::run_in_transaction(&mut self.db.conn, |tx| {
            let project = assert_owned::<Project>(tx, new_task.project_id, &identity)?;
            let category = assert_owned::<Category>(tx, new_task.category_id, &identity)?;
            if !category.accepts_project(project.id) {
                return Err(BoardError::validation(format!(
                    "category {} does not belong to project {}",
                    category.id, project.id
                )));
            }
            assert_all_owned::<Tag>(tx, &new_task.tag_ids, &identity)?;

            let tasks = Tasks::new(tx);
            let position = tasks.count_in_scope(identity.user_id, project.id, category.id)?;
            let status = new_task.status.unwrap_or(category.status);
            let id = tasks.insert(identity.user_id, new_task, status, position)?;
            Tags::new(tx).set_task_tags(id, &new_task.tag_ids)?;

            load_task(tx, id, &identity)
        })?;

        info!(task_id = task.id, category_id = task.category_id, position = task.display_order, "task created");
        Ok(task)
    }

    /// Deletes a task and closes the gap it leaves in its column.
    pub fn delete_task(&mut self, task_id: i64) -> BoardResult<bool> {
        let identity = self.identity;
        gateway::run_in_transaction(&mut self.db.conn, |tx| {
            let task = assert_owned::<Task>(tx, task_id, &identity)?;
            let deleted = Tasks::new(tx).delete(identity.user_id, task.id)?;
            if deleted == 0 {
                return Ok(false);
            }
            gateway::bulk_shift::<Task>(
                tx,
                &Filter::scope(identity.user_id, task.project_id, task.category_id),
                OrderRange::after(task.display_order),
                -1,
                None,
            )?;
            info!(task_id, category_id = task.category_id, position = task.display_order, "task deleted");
            Ok(true)
        })
    }

    pub fn reposition_task(&mut self, request: &RepositionRequest) -> BoardResult<Vec<Task>> {
        ordering::reposition(&mut self.db.conn, &self.identity, request)
    }

    pub fn get_task(&self, task_id: i64) -> BoardResult<Task> {
        load_task(&self.db.conn, task_id, &self.identity)
    }

    /// Every task of a project, oldest first.
    pub fn list_tasks(&self, project_id: i64) -> BoardResult<Vec<Task>> {
        assert_owned::<Project>(&self.db.conn, project_id, &self.identity)?;
        let repo = Tasks::new(&self.db.conn);
        let mut tasks = repo.list_for_project(self.identity.user_id, project_id)?;
        repo.attach_tags(&mut tasks)?;
        Ok(tasks)
    }

    /// Edits the content of a task. Column and rank stay where they are.
    pub fn update_task(&mut self, task_id: i64, update: &TaskUpdate) -> BoardResult<Task> {
        let identity = self.identity;
        let mut fields: Vec<(&'static str, Value)> = Vec::new();
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(BoardError::validation("task title must not be empty"));
            }
            fields.push(("title", Value::Text(title.clone())));
        }
        if let Some(description) = &update.description {
            fields.push(("description", Value::Text(description.clone())));
        }
        if let Some(assignee) = &update.assignee {
            fields.push(("assignee", Value::Text(assignee.clone())));
        }
        if let Some(start_date) = update.start_date {
            fields.push(("start_date", Value::Text(start_date.to_string())));
        }
        if let Some(end_date) = update.end_date {
            fields.push(("end_date", Value::Text(end_date.to_string())));
        }
        if let Some(status) = update.status {
            fields.push(("status", Value::Text(status.as_str().to_string())));
        }

        gateway::run_in_transaction(&mut self.db.conn, |tx| {
            assert_owned::<Task>(tx, task_id, &identity)?;
            if !fields.is_empty() {
                gateway::update_fields::<Task>(tx, task_id, identity.user_id, &fields)?;
            }
            load_task(tx, task_id, &identity)
        })
    }

    pub fn add_tags(&mut self, task_id: i64, tag_ids: &[i64]) -> BoardResult<Task> {
        let identity = self.identity;
        gateway::run_in_transaction(&mut self.db.conn, |tx| {
            assert_owned::<Task>(tx, task_id, &identity)?;
            assert_all_owned::<Tag>(tx, tag_ids, &identity)?;
            let tags = Tags::new(tx);
            for tag_id in tag_ids {
                tags.add_tag_to_task(task_id, *tag_id)?;
            }
            load_task(tx, task_id, &identity)
        })
    }

    pub fn remove_tags(&mut self, task_id: i64, tag_ids: &[i64]) -> BoardResult<Task> {
        let identity = self.identity;
        gateway::run_in_transaction(&mut self.db.conn, |tx| {
            assert_owned::<Task>(tx, task_id, &identity)?;
            assert_all_owned::<Tag>(tx, tag_ids, &identity)?;
            let tags = Tags::new(tx);
            for tag_id in tag_ids {
                tags.remove_tag_from_task(task_id, *tag_id)?;
            }
            load_task(tx, task_id, &identity)
        })
    }

    pub fn category(&self, category_id: i64) -> BoardResult<Category> {
        assert_owned::<Category>(&self.db.conn, category_id, &self.identity)
    }

    pub fn project(&self, project_id: i64) -> BoardResult<Project> {
        assert_owned::<Project>(&self.db.conn, project_id, &self.identity)
    }

    /// The project's columns, each with its tasks in display order.
    pub fn board(&self, project_id: i64) -> BoardResult<Vec<BoardColumn>> {
        let owner = self.identity.user_id;
        assert_owned::<Project>(&self.db.conn, project_id, &self.identity)?;

        let repo = Tasks::new(&self.db.conn);
        let categories = Categories::new(&self.db.conn).list_for_project(owner, project_id)?;
        let mut columns = Vec::with_capacity(categories.len());
        for category in categories {
            let mut tasks = repo.list_in_scope(owner, project_id, category.id)?;
            repo.attach_tags(&mut tasks)?;
            columns.push(BoardColumn { category, tasks });
        }
        Ok(columns)
    }
}

fn load_task(conn: &rusqlite::Connection, task_id: i64, identity: &Identity) -> BoardResult<Task> {
    let mut task = gateway::find_owned::<Task>(conn, task_id, identity.user_id)?
        .ok_or_else(|| BoardError::not_found(EntityKind::Task, task_id))?;
    task.tags = Tags::new(conn).get_task_tags(task.id)?;
    Ok(task)
}
