use super::Session;
use crate::{
    libs::{messages::Message, task_service::TaskService, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Project id
    project: i64,
}

pub fn cmd(session: Session, args: BoardArgs) -> Result<()> {
    let service = TaskService::new(session.db, session.identity);
    let project = service.project(args.project)?;
    let columns = service.board(project.id)?;

    if columns.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }
    msg_print!(Message::BoardHeader(project.name), true);
    View::board(&columns)?;
    Ok(())
}
