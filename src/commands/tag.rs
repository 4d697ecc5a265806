use super::{confirm, Session};
use crate::{
    db::{gateway, tags::Tags, tasks::Tasks},
    libs::{
        error::{BoardError, EntityKind},
        messages::Message,
        task::Task,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    command: TagCommand,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Create a new tag
    Create {
        /// Tag name
        name: String,
        /// Tag color
        #[arg(short, long, default_value = "#CCCCCC")]
        color: String,
    },
    /// List all tags
    List,
    /// Rename or recolor a tag
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a tag
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Show tasks with a specific tag
    Tasks {
        /// Tag name
        tag: String,
    },
}

pub fn cmd(session: Session, args: TagArgs) -> Result<()> {
    let owner = session.identity.user_id;
    let tags = Tags::new(&session.db.conn);

    match args.command {
        TagCommand::Create { name, color } => {
            let id = tags.create(owner, &name, &color)?;
            msg_success!(Message::TagCreated(name, id));
        }
        TagCommand::List => {
            let list = tags.list(owner)?;
            if list.is_empty() {
                msg_info!(Message::NoTagsFound);
                return Ok(());
            }
            msg_print!(Message::TagListHeader, true);
            View::tags(&list)?;
        }
        TagCommand::Update { id, name, color } => {
            let tag = tags.get_by_id(owner, id)?.ok_or_else(|| BoardError::not_found(EntityKind::Tag, id))?;
            if name.is_none() && color.is_none() {
                msg_info!(Message::NoChangesSpecified);
                return Ok(());
            }
            tags.update(
                owner,
                id,
                name.as_deref().unwrap_or(&tag.name),
                color.as_deref().unwrap_or(&tag.color),
            )?;
            msg_success!(Message::TagUpdated(id));
        }
        TagCommand::Delete { id, yes } => {
            let tag = tags.get_by_id(owner, id)?.ok_or_else(|| BoardError::not_found(EntityKind::Tag, id))?;
            let task_count = tags.get_tasks_with_tag(owner, id)?.len();
            let prompt = if task_count > 0 {
                Message::ConfirmDeleteTagWithTasks(tag.name, task_count)
            } else {
                Message::ConfirmDeleteTag(tag.name)
            };
            if !confirm(prompt, yes)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            tags.delete(owner, id)?;
            msg_success!(Message::TagDeleted(id));
        }
        TagCommand::Tasks { tag } => {
            let Some(found) = tags.get_by_name(owner, &tag)? else {
                msg_info!(Message::NoTagsFound);
                return Ok(());
            };
            let repo = Tasks::new(&session.db.conn);
            let mut tasks = Vec::new();
            for task_id in tags.get_tasks_with_tag(owner, found.id)? {
                if let Some(task) = gateway::find_owned::<Task>(&session.db.conn, task_id, owner)? {
                    tasks.push(task);
                }
            }
            if tasks.is_empty() {
                msg_info!(Message::NoTasksFound);
                return Ok(());
            }
            repo.attach_tags(&mut tasks)?;
            View::tasks(&tasks)?;
        }
    }

    Ok(())
}
