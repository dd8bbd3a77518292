/// Persistence models shared by every store.
pub mod models;
/// Score storage and retrieval operations.
pub mod score_store;
/// Storage abstraction layer for database operations.
pub mod storage;
