use crate::db::tags::Tag;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column semantics of a board: where a task stands in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoardStatus {
    #[default]
    Open,
    InProgress,
    Review,
    Complete,
}

impl BoardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Open => "open",
            BoardStatus::InProgress => "in-progress",
            BoardStatus::Review => "review",
            BoardStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(BoardStatus::Open),
            "in-progress" => Ok(BoardStatus::InProgress),
            // alias matching the "In Review" column name
            "review" | "in-review" => Ok(BoardStatus::Review),
            "complete" => Ok(BoardStatus::Complete),
            other => Err(format!("unknown board status `{other}`")),
        }
    }
}

impl ToSql for BoardStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BoardStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err: String| FromSqlError::Other(err.into()))
    }
}

/// A card on the board.
///
/// `display_order` is the zero-based rank among tasks sharing
/// (`user_id`, `project_id`, `category_id`); within that scope the ranks are
/// always exactly `0..N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: BoardStatus,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Input for creating a task; the position is always assigned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to the category's status.
    pub status: Option<BoardStatus>,
    pub tag_ids: Vec<i64>,
}

impl NewTask {
    pub fn new(project_id: i64, category_id: i64, title: &str) -> Self {
        NewTask {
            project_id,
            category_id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tag_ids: &[i64]) -> Self {
        self.tag_ids = tag_ids.to_vec();
        self
    }
}

/// Partial update of a task's content. Category and position change only
/// through a reposition.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BoardStatus>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }
}
