//! Ownership gate in front of every write.
//!
//! A row that does not exist and a row that belongs to another user look the
//! same from here: both are [`BoardError::NotFound`].

use crate::db::gateway::{self, Entity};
use crate::libs::error::{BoardError, BoardResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// The authenticated caller. Every query is narrowed to `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
}

impl Identity {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Loads `id` if it is owned by `identity`.
pub fn assert_owned<E: Entity>(conn: &Connection, id: i64, identity: &Identity) -> BoardResult<E> {
    gateway::find_owned::<E>(conn, id, identity.user_id)?.ok_or_else(|| {
        tracing::debug!(entity = %E::KIND, id, user_id = identity.user_id, "ownership check failed");
        BoardError::not_found(E::KIND, id)
    })
}

/// Batch form of [`assert_owned`]; the first missing id is reported.
pub fn assert_all_owned<E: Entity>(conn: &Connection, ids: &[i64], identity: &Identity) -> BoardResult<Vec<E>> {
    ids.iter().map(|id| assert_owned::<E>(conn, *id, identity)).collect()
}
