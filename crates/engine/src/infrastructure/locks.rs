//! Per-monster critical sections.
//!
//! Every mutating loadout use case holds the monster's lock across
//! read, compute and commit. Writers in other processes are caught by the
//! version check in the store instead.

use std::sync::Arc;

use dashmap::DashMap;
use menagerie_domain::MonsterId;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<MonsterId, Arc<Mutex<()>>>;

#[derive(Default)]
pub struct MonsterLocks {
    locks: Arc<LockTable>,
}

impl MonsterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`. Released when the guard drops.
    pub async fn acquire(&self, id: MonsterId) -> MonsterGuard {
        // Declared before the wait so a cancelled acquire still cleans up.
        let mut guard = MonsterGuard {
            id,
            table: self.locks.clone(),
            guard: None,
        };
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        guard.guard = Some(lock.lock_owned().await);
        guard
    }

    /// Monsters with a held or awaited lock.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one monster.
///
/// Dropping the last guard (with no task waiting) removes the table entry.
pub struct MonsterGuard {
    id: MonsterId,
    table: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for MonsterGuard {
    fn drop(&mut self) {
        // Unlock first so the guard's own handle no longer counts.
        self.guard.take();
        self.table
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_monster_is_serialized() {
        let locks = Arc::new(MonsterLocks::new());
        let id = MonsterId::new();

        let guard = locks.acquire(id).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_monsters_do_not_block() {
        let locks = MonsterLocks::new();

        let _first = locks.acquire(MonsterId::new()).await;
        let second = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(MonsterId::new()),
        )
        .await;

        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn released_locks_leave_no_entries() {
        let locks = MonsterLocks::new();

        for _ in 0..1000 {
            let guard = locks.acquire(MonsterId::new()).await;
            assert_eq!(locks.len(), 1);
            drop(guard);
        }

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_another_task_waits() {
        let locks = Arc::new(MonsterLocks::new());
        let id = MonsterId::new();

        let guard = locks.acquire(id).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        // The waiter still holds the mutex handle, so the entry stays.
        assert_eq!(locks.len(), 1);
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_acquire_leaves_no_entry() {
        let locks = MonsterLocks::new();
        let id = MonsterId::new();

        let held = locks.acquire(id).await;
        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire(id)).await;
        assert!(timed_out.is_err());
        drop(held);

        assert!(locks.is_empty());
    }
}
