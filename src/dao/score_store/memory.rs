//! Process-local score store used when no hosted database is compiled in, and by tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicI64, Ordering},
};

use futures::future::BoxFuture;
use time::OffsetDateTime;

use crate::{
    dao::{
        models::{HighScoreEntity, NewHighScoreEntity},
        score_store::ScoreStore,
        storage::{StorageError, StorageResult},
    },
    state::game::GameName,
};

/// Scores kept in a vector behind a mutex; cloning shares the same rows.
#[derive(Clone, Default)]
pub struct MemoryScoreStore {
    rows: Arc<Mutex<Vec<HighScoreEntity>>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl MemoryScoreStore {
    /// Empty store that answers every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every stored row in insertion order.
    pub fn rows(&self) -> Vec<HighScoreEntity> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::unavailable_without_source(
                "memory store is offline",
            ))
        } else {
            Ok(())
        }
    }

    fn lock_error() -> StorageError {
        StorageError::unavailable_without_source("memory store lock poisoned")
    }
}

impl ScoreStore for MemoryScoreStore {
    fn insert_score(
        &self,
        score: NewHighScoreEntity,
    ) -> BoxFuture<'static, StorageResult<HighScoreEntity>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_available()?;
            let row = HighScoreEntity {
                id: store.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                game: score.game,
                username: score.username,
                score: score.score,
                created_at: OffsetDateTime::now_utc(),
            };
            store
                .rows
                .lock()
                .map_err(|_| Self::lock_error())?
                .push(row.clone());
            Ok(row)
        })
    }

    fn top_scores(
        &self,
        game: GameName,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<HighScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_available()?;
            let mut rows: Vec<HighScoreEntity> = store
                .rows
                .lock()
                .map_err(|_| Self::lock_error())?
                .iter()
                .filter(|row| row.game == game)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
            rows.truncate(limit as usize);
            Ok(rows)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.check_available() })
    }
}
