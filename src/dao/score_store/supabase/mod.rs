mod error;
mod store;

pub use error::SupabaseDaoError;
pub use store::SupabaseScoreStore;

use crate::dao::storage::StorageError;

impl From<SupabaseDaoError> for StorageError {
    fn from(err: SupabaseDaoError) -> Self {
        StorageError::unavailable("score store request failed".into(), err)
    }
}
