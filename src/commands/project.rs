use super::{confirm, Session};
use crate::{
    db::{projects::Projects, tasks::Tasks},
    libs::{
        error::{BoardError, EntityKind},
        messages::Message,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Create a project
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List projects
    List,
    /// Rename or describe a project
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a project and all of its tasks
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(session: Session, args: ProjectArgs) -> Result<()> {
    let owner = session.identity.user_id;
    let projects = Projects::new(&session.db.conn);

    match args.command {
        ProjectCommand::Create { name, description } => {
            let id = projects.create(owner, &name, description.as_deref())?;
            msg_success!(Message::ProjectCreated(name, id));
        }
        ProjectCommand::List => {
            let list = projects.list(owner)?;
            if list.is_empty() {
                msg_info!(Message::NoProjectsFound);
                return Ok(());
            }
            msg_print!(Message::ProjectListHeader, true);
            View::projects(&list)?;
        }
        ProjectCommand::Update { id, name, description } => {
            if name.is_none() && description.is_none() {
                msg_info!(Message::NoChangesSpecified);
                return Ok(());
            }
            projects.update(owner, id, name.as_deref(), description.as_deref())?;
            msg_success!(Message::ProjectUpdated(id));
        }
        ProjectCommand::Delete { id, yes } => {
            let project = projects
                .get_by_id(owner, id)?
                .ok_or_else(|| BoardError::not_found(EntityKind::Project, id))?;
            let task_count = Tasks::new(&session.db.conn).list_for_project(owner, id)?.len();
            if !confirm(Message::ConfirmDeleteProject(project.name, task_count), yes)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            projects.delete(owner, id)?;
            msg_success!(Message::ProjectDeleted(id));
        }
    }

    Ok(())
}
