//! Reposition of a task inside its board.
//!
//! Tasks sharing (user, project, category) are ranked `0..N` by
//! `display_order`. Moving one task is planned as a short list of relative
//! range shifts ([`plan_reposition`]) and then applied in a single `IMMEDIATE`
//! transaction ([`reposition`]): the moved row is written first, then each
//! shift runs as one bulk `UPDATE` that skips the moved row.
//!
//! The old slot is always read back from the locked row. Whatever the client
//! believed about it only shows up in a warning.

use crate::db::categories::Category;
use crate::db::gateway::{self, Filter, OrderRange};
use crate::db::projects::Project;
use crate::db::tasks::Tasks;
use crate::libs::error::{BoardError, BoardResult, EntityKind};
use crate::libs::scope::{assert_owned, Identity};
use crate::libs::task::{BoardStatus, Task};
use rusqlite::types::Value;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::ops::Bound;
use tracing::{debug, info, warn};

/// A client's drag-and-drop of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositionRequest {
    pub task_id: i64,
    pub project_id: i64,
    pub status: BoardStatus,
    pub old_category_id: i64,
    pub new_category_id: i64,
    pub old_position: i64,
    pub new_position: i64,
}

/// A position inside one category of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub category_id: i64,
    pub position: i64,
}

impl Slot {
    pub fn new(category_id: i64, position: i64) -> Self {
        Self { category_id, position }
    }
}

/// Add `delta` to every sibling in `category_id` whose rank is in `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub category_id: i64,
    pub range: OrderRange,
    pub delta: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPlan {
    pub shifts: Vec<Shift>,
}

impl ShiftPlan {
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Where a sibling currently at `slot` ends up.
    pub fn apply_to(&self, slot: Slot) -> i64 {
        self.shifts
            .iter()
            .filter(|shift| shift.category_id == slot.category_id && shift.range.contains(slot.position))
            .fold(slot.position, |position, shift| position + shift.delta)
    }
}

/// Shifts needed to move a task from `from` to `to`, not counting the moved
/// row itself. `to.position` must already be clamped to the destination.
pub fn plan_reposition(from: Slot, to: Slot) -> ShiftPlan {
    let shifts = if from.category_id != to.category_id {
        vec![
            Shift {
                category_id: from.category_id,
                range: OrderRange::after(from.position),
                delta: -1,
            },
            Shift {
                category_id: to.category_id,
                range: OrderRange::from(to.position),
                delta: 1,
            },
        ]
    } else if to.position > from.position {
        vec![Shift {
            category_id: from.category_id,
            range: OrderRange::new(Bound::Excluded(from.position), Bound::Included(to.position)),
            delta: -1,
        }]
    } else if to.position < from.position {
        vec![Shift {
            category_id: from.category_id,
            range: OrderRange::new(Bound::Included(to.position), Bound::Excluded(from.position)),
            delta: 1,
        }]
    } else {
        Vec::new()
    };
    ShiftPlan { shifts }
}

/// Moves a task and returns every task of its project, oldest first.
pub fn reposition(conn: &mut Connection, identity: &Identity, request: &RepositionRequest) -> BoardResult<Vec<Task>> {
    if request.new_position < 0 {
        return Err(BoardError::validation(format!(
            "position must not be negative, got {}",
            request.new_position
        )));
    }
    let owner = identity.user_id;

    let tasks = gateway::run_in_transaction(conn, |tx| {
        let project = assert_owned::<Project>(tx, request.project_id, identity)?;
        let task = assert_owned::<Task>(tx, request.task_id, identity)?;
        if task.project_id != project.id {
            return Err(BoardError::not_found(EntityKind::Task, task.id));
        }
        let category = assert_owned::<Category>(tx, request.new_category_id, identity)?;
        if !category.accepts_project(project.id) {
            return Err(BoardError::validation(format!(
                "category {} does not belong to project {}",
                category.id, project.id
            )));
        }

        let from = Slot::new(task.category_id, task.display_order);
        if from != Slot::new(request.old_category_id, request.old_position) {
            warn!(
                task_id = task.id,
                client_category = request.old_category_id,
                client_position = request.old_position,
                category = from.category_id,
                position = from.position,
                "stale client slot, using stored one"
            );
        }

        let repo = Tasks::new(tx);
        let mut siblings = repo.count_in_scope(owner, project.id, category.id)?;
        if category.id == from.category_id {
            siblings -= 1;
        }
        let to = Slot::new(category.id, request.new_position.min(siblings));
        if to.position != request.new_position {
            debug!(task_id = task.id, requested = request.new_position, clamped = to.position, "position clamped");
        }

        gateway::update_fields::<Task>(
            tx,
            task.id,
            owner,
            &[
                ("category_id", Value::Integer(to.category_id)),
                ("display_order", Value::Integer(to.position)),
                ("status", Value::Text(request.status.as_str().to_string())),
            ],
        )?;

        let plan = plan_reposition(from, to);
        for shift in &plan.shifts {
            gateway::bulk_shift::<Task>(
                tx,
                &Filter::scope(owner, project.id, shift.category_id),
                shift.range,
                shift.delta,
                Some(task.id),
            )?;
        }

        info!(
            task_id = task.id,
            from_category = from.category_id,
            from_position = from.position,
            to_category = to.category_id,
            to_position = to.position,
            "task repositioned"
        );

        let mut tasks = repo.list_for_project(owner, project.id)?;
        repo.attach_tags(&mut tasks)?;
        Ok(tasks)
    })?;

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Final ranks of `count` tasks in `category` after moving one of them.
    fn ranks_after(plan: &ShiftPlan, category: i64, count: i64, moved: Option<i64>) -> Vec<i64> {
        (0..count)
            .filter(|position| Some(*position) != moved)
            .map(|position| plan.apply_to(Slot::new(category, position)))
            .collect()
    }

    #[test]
    fn cross_category_move_closes_and_opens_a_gap() {
        let plan = plan_reposition(Slot::new(1, 2), Slot::new(2, 1));
        assert_eq!(plan.shifts.len(), 2);

        assert_eq!(ranks_after(&plan, 1, 5, Some(2)), vec![0, 1, 2, 3]);
        assert_eq!(ranks_after(&plan, 2, 3, None), vec![0, 2, 3]);
    }

    #[test]
    fn moving_down_pulls_the_range_up() {
        let plan = plan_reposition(Slot::new(1, 0), Slot::new(1, 2));
        assert_eq!(ranks_after(&plan, 1, 4, Some(0)), vec![0, 1, 3]);
    }

    #[test]
    fn moving_up_pushes_the_range_down() {
        let plan = plan_reposition(Slot::new(1, 3), Slot::new(1, 1));
        assert_eq!(ranks_after(&plan, 1, 5, Some(3)), vec![0, 2, 3, 4]);
    }

    #[test]
    fn same_slot_plans_nothing() {
        assert!(plan_reposition(Slot::new(4, 2), Slot::new(4, 2)).is_empty());
    }

    #[test]
    fn moving_to_the_end_of_another_category() {
        let plan = plan_reposition(Slot::new(1, 0), Slot::new(2, 3));
        assert_eq!(ranks_after(&plan, 1, 2, Some(0)), vec![0]);
        assert_eq!(ranks_after(&plan, 2, 3, None), vec![0, 1, 2]);
    }
}
