use crate::{
    db::{categories::DEFAULT_CATEGORIES, db::Db, tags::DEFAULT_TAGS},
    libs::{account, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Unique user name
    username: String,
    /// Contact email
    email: String,
}

pub fn cmd(args: SignupArgs) -> Result<()> {
    let mut db = Db::new()?;
    let user = account::signup(&mut db, &args.username, &args.email)?;

    msg_success!(Message::UserCreated(user.username, user.id));
    msg_info!(Message::DefaultBoardSeeded(DEFAULT_CATEGORIES.len(), DEFAULT_TAGS.len()));
    Ok(())
}
