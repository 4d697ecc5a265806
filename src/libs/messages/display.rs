//! Text of every [`Message`].
//!
//! Kept in one `match` so wording stays consistent across commands.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigPath(path) => format!("Configuration file: {}", path),

            // === ACCOUNT MESSAGES ===
            Message::UserCreated(name, id) => {
                format!("User '{}' created with id {} (pass --user {} or set TASKBOARD_USER)", name, id, id)
            }
            Message::DefaultBoardSeeded(categories, tags) => {
                format!("Added {} default categories and {} default tags", categories, tags)
            }
            Message::UserUpdated(name) => format!("User '{}' updated", name),
            Message::NoUserSelected => "No user selected. Pass --user, set TASKBOARD_USER or run `taskboard init --default-user <ID>`".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name, id) => format!("Project '{}' created with id {}", name, id),
            Message::ProjectUpdated(id) => format!("Project {} updated", id),
            Message::ProjectDeleted(id) => format!("Project {} deleted", id),
            Message::ProjectListHeader => "Projects:".to_string(),
            Message::NoProjectsFound => "No projects found".to_string(),
            Message::ConfirmDeleteProject(name, 0) => format!("Delete project '{}'?", name),
            Message::ConfirmDeleteProject(name, tasks) => {
                format!("Delete project '{}' and its {} task(s)?", name, tasks)
            }

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name, id) => format!("Category '{}' created with id {}", name, id),
            Message::CategoryUpdated(id) => format!("Category {} updated", id),
            Message::CategoryDeleted(id) => format!("Category {} deleted", id),
            Message::CategoryListHeader => "Categories:".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),

            // === TAG MESSAGES ===
            Message::TagCreated(name, id) => format!("Tag '{}' created with id {}", name, id),
            Message::TagUpdated(id) => format!("Tag {} updated", id),
            Message::TagDeleted(id) => format!("Tag {} deleted", id),
            Message::TagListHeader => "Tags:".to_string(),
            Message::NoTagsFound => "No tags found".to_string(),
            Message::ConfirmDeleteTag(name) => format!("Delete tag '{}'?", name),
            Message::ConfirmDeleteTagWithTasks(name, count) => {
                format!("Tag '{}' is used by {} task(s). Delete it anyway?", name, count)
            }

            // === TASK MESSAGES ===
            Message::TaskCreated(title, id) => format!("Task '{}' created with id {}", title, id),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskMoved(id, category, position) => {
                format!("Task {} moved to '{}' at position {}", id, category, position)
            }
            Message::TaskTagsUpdated(id) => format!("Tags of task {} updated", id),
            Message::TaskListHeader(project) => format!("Tasks of '{}':", project),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::NoChangesSpecified => "Nothing to change".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),

            // === BOARD MESSAGES ===
            Message::BoardHeader(project) => format!("Board of '{}'", project),
            Message::EmptyColumn => "(empty)".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_confirmation_mentions_tasks_only_when_present() {
        assert_eq!(Message::ConfirmDeleteProject("Web".into(), 0).to_string(), "Delete project 'Web'?");
        assert_eq!(
            Message::ConfirmDeleteProject("Web".into(), 3).to_string(),
            "Delete project 'Web' and its 3 task(s)?"
        );
    }

    #[test]
    fn task_moved_names_the_column() {
        assert_eq!(
            Message::TaskMoved(7, "In Review".into(), 0).to_string(),
            "Task 7 moved to 'In Review' at position 0"
        );
    }
}
