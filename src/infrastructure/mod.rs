use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Creature, CreatureDraft, CreatureFilter, CreatureId, CreaturePatch, SortOrder};

pub mod http_adapter;
pub mod in_memory_creature_store;

pub use http_adapter::{HttpAdapter, ReqwestHttpAdapter, StaticHttpAdapter, UpstreamError};
pub use in_memory_creature_store::InMemoryCreatureStore;

/// Failures a [`CreatureStore`] can report.
///
/// Only [`StoreError::DuplicateKey`] carries meaning for callers; every other
/// shape is an implementation detail of the backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key on {field}: {value}")]
    DuplicateKey { field: &'static str, value: String },
    #[error("bulk insert stopped after {inserted} records")]
    BulkInsert {
        inserted: usize,
        #[source]
        source: Box<StoreError>,
    },
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn duplicate(field: &'static str, value: impl ToString) -> Self {
        Self::DuplicateKey {
            field,
            value: value.to_string(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for creature records.
///
/// Implementations enforce uniqueness of `name` and `sequence_no` themselves;
/// callers never pre-check.
#[async_trait]
pub trait CreatureStore: Send + Sync {
    async fn create(&self, draft: CreatureDraft) -> StoreResult<Creature>;
    async fn find_one(&self, filter: &CreatureFilter) -> StoreResult<Option<Creature>>;
    async fn find_by_id(&self, id: CreatureId) -> StoreResult<Option<Creature>>;
    /// Applies `patch` to the record with `id`. Returns `false` when no record matched.
    async fn update_one(&self, id: CreatureId, patch: CreaturePatch) -> StoreResult<bool>;
    /// Returns the number of deleted records (0 or 1).
    async fn delete_one(&self, id: CreatureId) -> StoreResult<u64>;
    async fn delete_many(&self, filter: &CreatureFilter) -> StoreResult<u64>;
    /// Ordered, non-atomic bulk insert: records written before a failing one stay written.
    async fn insert_many(&self, drafts: Vec<CreatureDraft>) -> StoreResult<Vec<Creature>>;
    /// Lists records ordered by `sequence_no`. A non-positive `limit` means no cap.
    async fn list(&self, skip: u64, limit: i64, sort: SortOrder) -> StoreResult<Vec<Creature>>;
    async fn count(&self) -> StoreResult<u64>;
}
