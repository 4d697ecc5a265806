use super::task::Task;
use super::task_service::BoardColumn;
use crate::db::categories::Category;
use crate::db::projects::Project;
use crate::db::tags::Tag;
use crate::db::users::User;
use crate::libs::messages::Message;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CATEGORY", "POS", "STATUS", "ASSIGNEE", "TAGS"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.category_id,
                task.display_order,
                task.status,
                task.assignee.as_deref().unwrap_or(""),
                tag_names(task)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task(task: &Task) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description.as_deref().unwrap_or("")]);
        table.add_row(row!["PROJECT", task.project_id]);
        table.add_row(row!["CATEGORY", task.category_id]);
        table.add_row(row!["POSITION", task.display_order]);
        table.add_row(row!["STATUS", task.status]);
        table.add_row(row!["ASSIGNEE", task.assignee.as_deref().unwrap_or("")]);
        table.add_row(row!["START", task.start_date.map(|d| d.to_string()).unwrap_or_default()]);
        table.add_row(row!["END", task.end_date.map(|d| d.to_string()).unwrap_or_default()]);
        table.add_row(row!["TAGS", tag_names(task)]);
        table.add_row(row!["CREATED", task.created_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn user(user: &User) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", user.id]);
        table.add_row(row!["USERNAME", user.username]);
        table.add_row(row!["EMAIL", user.email]);
        table.add_row(row!["CREATED", user.created_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn projects(projects: &[Project]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "CREATED"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.description.as_deref().unwrap_or(""),
                project.created_at.format("%Y-%m-%d")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[Category]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "STATUS", "PROJECT"]);
        for category in categories {
            let project = category.project_id.map(|id| id.to_string()).unwrap_or_else(|| "all".to_string());
            table.add_row(row![category.id, category.name, category.status, project]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tags(tags: &[Tag]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR"]);
        for tag in tags {
            table.add_row(row![tag.id, tag.name, tag.color]);
        }
        table.printstd();

        Ok(())
    }

    /// One table column per board column, cards stacked in display order.
    pub fn board(columns: &[BoardColumn]) -> Result<()> {
        let mut table = Table::new();

        let header = columns
            .iter()
            .map(|column| prettytable::Cell::new(&format!("{} ({})", column.category.name, column.tasks.len())))
            .collect::<Vec<_>>();
        table.set_titles(prettytable::Row::new(header));

        let depth = columns.iter().map(|column| column.tasks.len()).max().unwrap_or(0);
        if depth == 0 {
            let empty = columns
                .iter()
                .map(|_| prettytable::Cell::new(&Message::EmptyColumn.to_string()))
                .collect::<Vec<_>>();
            table.add_row(prettytable::Row::new(empty));
        }
        for index in 0..depth {
            let cells = columns
                .iter()
                .map(|column| {
                    let text = column
                        .tasks
                        .get(index)
                        .map(|task| format!("#{} {}", task.id, task.title))
                        .unwrap_or_default();
                    prettytable::Cell::new(&text)
                })
                .collect::<Vec<_>>();
            table.add_row(prettytable::Row::new(cells));
        }
        table.printstd();

        Ok(())
    }
}

fn tag_names(task: &Task) -> String {
    task.tags.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>().join(", ")
}
