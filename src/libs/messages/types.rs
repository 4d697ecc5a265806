/// Every user-facing line of the command line front end.
///
/// Text lives in `display.rs`; variants only carry the values to interpolate.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigPath(String),

    // === ACCOUNT MESSAGES ===
    UserCreated(String, i64),
    DefaultBoardSeeded(usize, usize), // categories, tags
    NoUserSelected,
    UserUpdated(String),

    // === PROJECT MESSAGES ===
    ProjectCreated(String, i64),
    ProjectUpdated(i64),
    ProjectDeleted(i64),
    ProjectListHeader,
    NoProjectsFound,
    ConfirmDeleteProject(String, usize), // name, tasks

    // === CATEGORY MESSAGES ===
    CategoryCreated(String, i64),
    CategoryUpdated(i64),
    CategoryDeleted(i64),
    CategoryListHeader,
    NoCategoriesFound,
    ConfirmDeleteCategory(String),

    // === TAG MESSAGES ===
    TagCreated(String, i64),
    TagUpdated(i64),
    TagDeleted(i64),
    TagListHeader,
    NoTagsFound,
    ConfirmDeleteTag(String),
    ConfirmDeleteTagWithTasks(String, usize),

    // === TASK MESSAGES ===
    TaskCreated(String, i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskMoved(i64, String, i64), // task, category name, position
    TaskTagsUpdated(i64),
    TaskListHeader(String),
    NoTasksFound,
    NoChangesSpecified,
    ConfirmDeleteTask(String),

    // === BOARD MESSAGES ===
    BoardHeader(String),
    EmptyColumn,

    // === DATABASE MESSAGES ===
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationEntry(u32, String, String),
    MigrationFailed(u32, String),

    // === GENERAL ===
    OperationCancelled,
}
