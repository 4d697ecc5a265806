use super::Session;
use crate::{
    db::users::Users,
    libs::{account, messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Show the acting user
    Show,
    /// Change username or email
    Update {
        #[arg(short = 'n', long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
}

pub fn cmd(mut session: Session, args: UserArgs) -> Result<()> {
    let id = session.identity.user_id;

    match args.command {
        UserCommand::Show => {
            let user = Users::new(&session.db.conn).require(id)?;
            View::user(&user)?;
        }
        UserCommand::Update { username, email } => {
            if username.is_none() && email.is_none() {
                msg_info!(Message::NoChangesSpecified);
                return Ok(());
            }
            let user = account::update_user(&mut session.db, id, username.as_deref(), email.as_deref())?;
            msg_success!(Message::UserUpdated(user.username));
        }
    }

    Ok(())
}
