//! # Taskboard
//!
//! Kanban-style project and task tracking backed by SQLite.
//!
//! Tasks live in categories (board columns) inside projects. Within each
//! (user, project, category) scope their `display_order` is kept dense, `0..N`,
//! across every create, move and delete.
//!
//! ## Layout
//!
//! - [`db`]: connection, migrations, the owner-scoped data store gateway and
//!   one repository per table
//! - [`libs`]: errors, access scoping, the ordering engine, the task service,
//!   configuration and console output
//! - [`commands`]: the `taskboard` command line front end
//!
//! ```rust,no_run
//! use taskboard::db::db::Db;
//! use taskboard::libs::{account, scope::Identity, task::NewTask, task_service::TaskService};
//!
//! let mut db = Db::open("board.db")?;
//! let user = account::signup(&mut db, "ada", "ada@example.com")?;
//! let mut service = TaskService::new(db, Identity::new(user.id));
//! # let (project_id, category_id) = (1, 1);
//! let task = service.create_task(&NewTask::new(project_id, category_id, "Write docs"))?;
//! assert_eq!(task.display_order, 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
