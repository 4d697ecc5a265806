use super::{confirm, Session};
use crate::{
    libs::{
        messages::Message,
        ordering::RepositionRequest,
        task::{BoardStatus, NewTask, TaskUpdate},
        task_service::TaskService,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task at the end of a category
    Create {
        #[arg(short, long)]
        project: i64,
        #[arg(short, long)]
        category: i64,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        assignee: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Defaults to the category status
        #[arg(short, long, value_enum)]
        status: Option<BoardStatus>,
        /// Tag ids
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<i64>,
    },
    /// List the tasks of a project
    List {
        #[arg(short, long)]
        project: i64,
    },
    /// Show one task
    Show { id: i64 },
    /// Edit the content of a task
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        assignee: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(short, long, value_enum)]
        status: Option<BoardStatus>,
    },
    /// Move a task to another position and/or category
    Move {
        id: i64,
        /// Destination category (defaults to the current one)
        #[arg(short, long)]
        category: Option<i64>,
        /// Zero-based destination position
        #[arg(short, long, allow_negative_numbers = true)]
        position: i64,
        /// Defaults to the destination category status
        #[arg(short, long, value_enum)]
        status: Option<BoardStatus>,
    },
    /// Delete a task
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Attach tags to a task
    Tag {
        id: i64,
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<i64>,
    },
    /// Detach tags from a task
    Untag {
        id: i64,
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<i64>,
    },
}

pub fn cmd(session: Session, args: TaskArgs) -> Result<()> {
    let mut service = TaskService::new(session.db, session.identity);

    match args.command {
        TaskCommand::Create {
            project,
            category,
            title,
            description,
            assignee,
            start,
            end,
            status,
            tags,
        } => {
            let new_task = NewTask {
                description,
                assignee,
                start_date: start,
                end_date: end,
                status,
                ..NewTask::new(project, category, &title)
            }
            .with_tags(&tags);
            let task = service.create_task(&new_task)?;
            msg_success!(Message::TaskCreated(task.title, task.id));
        }
        TaskCommand::List { project } => {
            let name = service.project(project)?.name;
            let tasks = service.list_tasks(project)?;
            if tasks.is_empty() {
                msg_info!(Message::NoTasksFound);
                return Ok(());
            }
            msg_print!(Message::TaskListHeader(name), true);
            View::tasks(&tasks)?;
        }
        TaskCommand::Show { id } => {
            View::task(&service.get_task(id)?)?;
        }
        TaskCommand::Update {
            id,
            title,
            description,
            assignee,
            start,
            end,
            status,
        } => {
            let update = TaskUpdate {
                title,
                description,
                assignee,
                start_date: start,
                end_date: end,
                status,
            };
            if update.is_empty() {
                msg_info!(Message::NoChangesSpecified);
                return Ok(());
            }
            service.update_task(id, &update)?;
            msg_success!(Message::TaskUpdated(id));
        }
        TaskCommand::Move {
            id,
            category,
            position,
            status,
        } => {
            let task = service.get_task(id)?;
            let destination = service.category(category.unwrap_or(task.category_id))?;
            let request = RepositionRequest {
                task_id: task.id,
                project_id: task.project_id,
                status: status.unwrap_or(destination.status),
                old_category_id: task.category_id,
                new_category_id: destination.id,
                old_position: task.display_order,
                new_position: position,
            };
            let tasks = service.reposition_task(&request)?;
            let placed = tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.display_order)
                .unwrap_or(position);
            msg_success!(Message::TaskMoved(id, destination.name, placed));
        }
        TaskCommand::Delete { id, yes } => {
            let task = service.get_task(id)?;
            if !confirm(Message::ConfirmDeleteTask(task.title), yes)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            if service.delete_task(id)? {
                msg_success!(Message::TaskDeleted(id));
            }
        }
        TaskCommand::Tag { id, tags } => {
            service.add_tags(id, &tags)?;
            msg_success!(Message::TaskTagsUpdated(id));
        }
        TaskCommand::Untag { id, tags } => {
            service.remove_tags(id, &tags)?;
            msg_success!(Message::TaskTagsUpdated(id));
        }
    }

    Ok(())
}
