//! Data store gateway: the only place that builds owner-scoped SQL.
//!
//! Repositories and services describe *what* they need (a row owned by a user,
//! the rows of one board column, a relative shift of a position range) and the
//! gateway turns it into one statement. All functions take a plain
//! `&Connection`, so they run unchanged inside a [`Transaction`], which derefs
//! to one.
//!
//! # Invariants
//! - Every read and write is constrained by `user_id = owner`.
//! - Column names never come from callers at runtime: filters and updates are
//!   checked against the entity's whitelists.
//! - [`bulk_shift`] is a single conditional `UPDATE ... SET display_order =
//!   display_order + delta`, never read-then-write per row.

use crate::libs::error::{BoardError, BoardResult, EntityKind};
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::ops::Bound;

/// A table whose rows belong to one user.
pub trait Entity: Sized {
    const KIND: EntityKind;
    const TABLE: &'static str;
    /// Select list, in the order `from_row` reads it.
    const COLUMNS: &'static str;
    /// Columns allowed in a [`Filter`].
    const FILTERABLE: &'static [&'static str];
    /// Columns allowed in [`update_fields`].
    const UPDATABLE: &'static [&'static str];
    /// Integer rank column used by [`bulk_shift`], if the entity is ordered.
    const ORDER_COLUMN: Option<&'static str> = None;
    const LIST_ORDER: &'static str = "created_at ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Equality conditions ANDed onto the owner constraint.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(&'static str, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = value`, or `column IS NULL` for a null value.
    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    /// The (user, project, category) ordering scope of a task.
    pub fn scope(owner: i64, project_id: i64, category_id: i64) -> Self {
        Self::new()
            .eq("user_id", owner)
            .eq("project_id", project_id)
            .eq("category_id", category_id)
    }

    fn check<E: Entity>(&self) -> BoardResult<()> {
        for (column, _) in &self.conditions {
            if *column != "user_id" && !E::FILTERABLE.contains(column) {
                return Err(BoardError::validation(format!("{} cannot be filtered by {}", E::TABLE, column)));
            }
        }
        Ok(())
    }

    fn push_sql(&self, clauses: &mut Vec<String>, values: &mut Vec<Value>) {
        for (column, value) in &self.conditions {
            if matches!(value, Value::Null) {
                clauses.push(format!("{column} IS NULL"));
            } else {
                clauses.push(format!("{column} = ?"));
                values.push(value.clone());
            }
        }
    }
}

/// A range of display positions, bounded on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRange {
    pub lower: Bound<i64>,
    pub upper: Bound<i64>,
}

impl OrderRange {
    pub fn new(lower: Bound<i64>, upper: Bound<i64>) -> Self {
        Self { lower, upper }
    }

    /// Every position strictly after `position`.
    pub fn after(position: i64) -> Self {
        Self::new(Bound::Excluded(position), Bound::Unbounded)
    }

    /// Every position at or after `position`.
    pub fn from(position: i64) -> Self {
        Self::new(Bound::Included(position), Bound::Unbounded)
    }

    pub fn contains(&self, position: i64) -> bool {
        let above = match self.lower {
            Bound::Included(low) => position >= low,
            Bound::Excluded(low) => position > low,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(high) => position <= high,
            Bound::Excluded(high) => position < high,
            Bound::Unbounded => true,
        };
        above && below
    }

    fn push_sql(&self, column: &str, clauses: &mut Vec<String>, values: &mut Vec<Value>) {
        match self.lower {
            Bound::Included(low) => {
                clauses.push(format!("{column} >= ?"));
                values.push(Value::Integer(low));
            }
            Bound::Excluded(low) => {
                clauses.push(format!("{column} > ?"));
                values.push(Value::Integer(low));
            }
            Bound::Unbounded => {}
        }
        match self.upper {
            Bound::Included(high) => {
                clauses.push(format!("{column} <= ?"));
                values.push(Value::Integer(high));
            }
            Bound::Excluded(high) => {
                clauses.push(format!("{column} < ?"));
                values.push(Value::Integer(high));
            }
            Bound::Unbounded => {}
        }
    }
}

/// Current time in the text layout rusqlite uses for `DateTime<Utc>`, so values
/// written here sort and parse like the ones bound through `ToSql`.
pub fn timestamp_now() -> String {
    Utc::now().format("%F %T%.f%:z").to_string()
}

/// Point read constrained to the owner.
pub fn find_owned<E: Entity>(conn: &Connection, id: i64, owner: i64) -> BoardResult<Option<E>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1 AND user_id = ?2", E::COLUMNS, E::TABLE);
    let row = conn.query_row(&sql, [id, owner], |row| E::from_row(row)).optional()?;
    Ok(row)
}

pub fn list_owned<E: Entity>(conn: &Connection, owner: i64, filter: &Filter) -> BoardResult<Vec<E>> {
    filter.check::<E>()?;
    let mut clauses = vec!["user_id = ?".to_string()];
    let mut values = vec![Value::Integer(owner)];
    filter.push_sql(&mut clauses, &mut values);

    let sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}",
        E::COLUMNS,
        E::TABLE,
        clauses.join(" AND "),
        E::LIST_ORDER
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| E::from_row(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_owned<E: Entity>(conn: &Connection, owner: i64, filter: &Filter) -> BoardResult<i64> {
    filter.check::<E>()?;
    let mut clauses = vec!["user_id = ?".to_string()];
    let mut values = vec![Value::Integer(owner)];
    filter.push_sql(&mut clauses, &mut values);

    let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", E::TABLE, clauses.join(" AND "));
    let count = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(count)
}

/// Sets whitelisted columns on one owned row and bumps `updated_at`.
/// Returns the number of rows changed (0 when the row is not owned).
pub fn update_fields<E: Entity>(conn: &Connection, id: i64, owner: i64, fields: &[(&'static str, Value)]) -> BoardResult<usize> {
    let mut assignments = Vec::with_capacity(fields.len() + 1);
    let mut values = Vec::with_capacity(fields.len() + 3);
    for (column, value) in fields {
        if !E::UPDATABLE.contains(column) {
            return Err(BoardError::validation(format!("{}.{} is not updatable", E::TABLE, column)));
        }
        assignments.push(format!("{column} = ?"));
        values.push(value.clone());
    }
    assignments.push("updated_at = ?".to_string());
    values.push(Value::Text(timestamp_now()));
    values.push(Value::Integer(id));
    values.push(Value::Integer(owner));

    let sql = format!("UPDATE {} SET {} WHERE id = ? AND user_id = ?", E::TABLE, assignments.join(", "));
    let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
    tracing::debug!(table = E::TABLE, id, changed, "fields updated");
    Ok(changed)
}

/// Adds `delta` to the order column of every row matching `scope` whose rank
/// lies in `range`, skipping `exclude`. One atomic statement.
pub fn bulk_shift<E: Entity>(conn: &Connection, scope: &Filter, range: OrderRange, delta: i64, exclude: Option<i64>) -> BoardResult<usize> {
    let Some(column) = E::ORDER_COLUMN else {
        return Err(BoardError::validation(format!("{} has no display order", E::TABLE)));
    };
    scope.check::<E>()?;

    let mut clauses = Vec::new();
    let mut values = vec![Value::Integer(delta)];
    scope.push_sql(&mut clauses, &mut values);
    range.push_sql(column, &mut clauses, &mut values);
    if let Some(id) = exclude {
        clauses.push("id != ?".to_string());
        values.push(Value::Integer(id));
    }
    if clauses.is_empty() {
        return Err(BoardError::validation("refusing to shift an unscoped range"));
    }

    let sql = format!("UPDATE {} SET {column} = {column} + ? WHERE {}", E::TABLE, clauses.join(" AND "));
    let shifted = conn.execute(&sql, params_from_iter(values.iter()))?;
    tracing::debug!(table = E::TABLE, delta, ?range, shifted, "bulk shift");
    Ok(shifted)
}

/// Runs `f` inside an `IMMEDIATE` transaction.
///
/// The write lock is taken at `BEGIN`, so two callers mutating the same board
/// serialize instead of interleaving their shifts. `Ok` commits; `Err` drops the
/// transaction, which rolls it back. Failing to begin or commit is a
/// [`BoardError::TransactionFailure`]; nothing is retried here.
pub fn run_in_transaction<T, F>(conn: &mut Connection, f: F) -> BoardResult<T>
where
    F: FnOnce(&Transaction<'_>) -> BoardResult<T>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|err| BoardError::TransactionFailure(format!("could not begin: {err}")))?;

    let value = f(&tx)?;

    tx.commit()
        .map_err(|err| BoardError::TransactionFailure(format!("could not commit: {err}")))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_range_bounds() {
        let after_two = OrderRange::after(2);
        assert!(!after_two.contains(2));
        assert!(after_two.contains(3));

        let window = OrderRange::new(Bound::Included(1), Bound::Excluded(3));
        assert!(!window.contains(0));
        assert!(window.contains(1));
        assert!(window.contains(2));
        assert!(!window.contains(3));
    }

    #[test]
    fn null_filter_renders_is_null() {
        let filter = Filter::new().eq("project_id", Value::Null).eq("name", "Open".to_string());
        let mut clauses = Vec::new();
        let mut values = Vec::new();
        filter.push_sql(&mut clauses, &mut values);

        assert_eq!(clauses, vec!["project_id IS NULL".to_string(), "name = ?".to_string()]);
        assert_eq!(values, vec![Value::Text("Open".to_string())]);
    }
}
