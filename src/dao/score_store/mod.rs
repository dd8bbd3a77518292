pub mod memory;
/// Supabase (PostgREST) backed store.
#[cfg(feature = "supabase-store")]
pub mod supabase;

use crate::dao::models::{HighScoreEntity, NewHighScoreEntity};
use crate::dao::storage::StorageResult;
use crate::state::game::GameName;
use futures::future::BoxFuture;

/// Abstraction over the hosted high-score table.
pub trait ScoreStore: Send + Sync {
    /// Persist one accepted score and return the stored row.
    fn insert_score(
        &self,
        score: NewHighScoreEntity,
    ) -> BoxFuture<'static, StorageResult<HighScoreEntity>>;
    /// Best scores for `game`, highest first.
    fn top_scores(
        &self,
        game: GameName,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<HighScoreEntity>>>;
    /// Single lightweight read proving the store answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
