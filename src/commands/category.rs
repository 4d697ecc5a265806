use super::{confirm, Session};
use crate::{
    db::categories::Categories,
    libs::{
        error::{BoardError, EntityKind},
        messages::Message,
        task::BoardStatus,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a category, shared by all projects unless --project is given
    Create {
        name: String,
        #[arg(short, long, value_enum, default_value_t = BoardStatus::Open)]
        status: BoardStatus,
        #[arg(short, long)]
        project: Option<i64>,
    },
    /// List categories, optionally only those usable by a project
    List {
        #[arg(short, long)]
        project: Option<i64>,
    },
    /// Rename a category or change its status
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_enum)]
        status: Option<BoardStatus>,
    },
    /// Delete an empty category
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(session: Session, args: CategoryArgs) -> Result<()> {
    let owner = session.identity.user_id;
    let categories = Categories::new(&session.db.conn);

    match args.command {
        CategoryCommand::Create { name, status, project } => {
            let id = categories.create(owner, project, &name, status)?;
            msg_success!(Message::CategoryCreated(name, id));
        }
        CategoryCommand::List { project } => {
            let list = match project {
                Some(project_id) => categories.list_for_project(owner, project_id)?,
                None => categories.list(owner)?,
            };
            if list.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }
            msg_print!(Message::CategoryListHeader, true);
            View::categories(&list)?;
        }
        CategoryCommand::Update { id, name, status } => {
            if name.is_none() && status.is_none() {
                msg_info!(Message::NoChangesSpecified);
                return Ok(());
            }
            categories.update(owner, id, name.as_deref(), status)?;
            msg_success!(Message::CategoryUpdated(id));
        }
        CategoryCommand::Delete { id, yes } => {
            let category = categories
                .get_by_id(owner, id)?
                .ok_or_else(|| BoardError::not_found(EntityKind::Category, id))?;
            if !confirm(Message::ConfirmDeleteCategory(category.name), yes)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            categories.delete(owner, id)?;
            msg_success!(Message::CategoryDeleted(id));
        }
    }

    Ok(())
}
