pub mod board;
pub mod category;
pub mod init;
pub mod migrations;
pub mod project;
pub mod signup;
pub mod tag;
pub mod task;
pub mod user;

use crate::{
    db::{db::Db, users::Users},
    libs::{config::Config, messages::Message, scope::Identity},
    msg_bail_anyhow,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Register a user with the default board")]
    Signup(signup::SignupArgs),
    #[command(about = "Show or edit the acting user")]
    User(user::UserArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Manage board categories")]
    Category(category::CategoryArgs),
    #[command(about = "Manage tags")]
    Tag(tag::TagArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Show a project board")]
    Board(board::BoardArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Acting user id
    #[arg(short, long, global = true, env = "TASKBOARD_USER")]
    user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let user = cli.user;
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Signup(args) => signup::cmd(args),
            Commands::User(args) => user::cmd(Session::open(user)?, args),
            Commands::Project(args) => project::cmd(Session::open(user)?, args),
            Commands::Category(args) => category::cmd(Session::open(user)?, args),
            Commands::Tag(args) => tag::cmd(Session::open(user)?, args),
            Commands::Task(args) => task::cmd(Session::open(user)?, args),
            Commands::Board(args) => board::cmd(Session::open(user)?, args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// An opened database plus the user every command acts for.
pub struct Session {
    pub db: Db,
    pub identity: Identity,
}

impl Session {
    /// Resolves the acting user from `--user`, `TASKBOARD_USER` or the configured default.
    pub fn open(user: Option<i64>) -> Result<Session> {
        let config = Config::read()?;
        let Some(user_id) = user.or(config.default_user) else {
            msg_bail_anyhow!(Message::NoUserSelected);
        };

        let db = Db::new()?;
        Users::new(&db.conn).require(user_id)?;
        Ok(Session {
            db,
            identity: Identity::new(user_id),
        })
    }
}

/// Asks before a destructive change unless `--yes` was passed.
pub(crate) fn confirm(prompt: Message, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    Ok(confirmed)
}
