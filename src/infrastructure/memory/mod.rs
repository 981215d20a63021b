//! In-process stores backed by `tokio::sync::RwLock` maps.
//!
//! Selected with `DATABASE_URL=memory`; data lives as long as the process.

pub mod database_probe_memory;
pub mod game_repository_memory;
pub mod leaderboard_repository_memory;
pub mod todo_repository_memory;
pub mod user_repository_memory;

use std::collections::BTreeMap;

/// Rows keyed by a monotonically increasing id, like a `BIGSERIAL` table.
#[derive(Debug)]
pub(crate) struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub(crate) fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, id: i64, row: T) {
        self.rows.insert(id, row);
    }

    pub(crate) fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}
