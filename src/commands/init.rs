//! Writes the local configuration: database location, lock timeout and the
//! default acting user.

use crate::{
    libs::{
        config::{Config, CONFIG_FILE_NAME},
        data_storage::DataStorage,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// SQLite database file
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Milliseconds a write waits for the database lock
    #[arg(long)]
    busy_timeout_ms: Option<u64>,

    /// User id to act as when --user is not given
    #[arg(long)]
    default_user: Option<i64>,

    /// Remove existing configuration instead of writing it
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let storage = DataStorage::new();

    if init_args.delete {
        let path = storage.get_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    // Flags not given keep their current value.
    let mut config = Config::read_from(&storage)?;
    if let Some(path) = init_args.db_path {
        config.database.path = Some(path);
    }
    if let Some(timeout) = init_args.busy_timeout_ms {
        config.database.busy_timeout_ms = timeout;
    }
    if let Some(user) = init_args.default_user {
        config.default_user = Some(user);
    }
    config.save_to(&storage)?;

    msg_success!(Message::ConfigSaved);
    msg_info!(Message::ConfigPath(storage.get_path(CONFIG_FILE_NAME)?.display().to_string()));
    Ok(())
}
