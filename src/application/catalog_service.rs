use std::sync::Arc;

use tracing::info;

use crate::{
    application::{resolver::CreatureResolver, translate_store_error},
    domain::{Creature, CreatureDraft, CreatureId, CreaturePatch, DomainError, SortOrder},
    infrastructure::CreatureStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CreatureStore>,
    resolver: CreatureResolver,
    default_limit: i64,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CreatureStore>, default_limit: i64) -> Self {
        Self {
            resolver: CreatureResolver::new(store.clone()),
            store,
            default_limit,
        }
    }

    /// Persists a draft that already passed boundary validation.
    ///
    /// Duplicate names and numbers are caught by the store, not pre-checked here.
    pub async fn create(&self, draft: CreatureDraft) -> Result<Creature, DomainError> {
        let created = self
            .store
            .create(draft.normalized())
            .await
            .map_err(|err| translate_store_error("create", err))?;

        info!(id = %created.id, no = created.sequence_no, name = %created.name, "creature created");
        Ok(created)
    }

    /// Lists creatures by ascending number. `None` falls back to the configured
    /// default; an explicit limit is forwarded untouched.
    pub async fn list(&self, limit: Option<i64>, offset: u64) -> Result<Vec<Creature>, DomainError> {
        let limit = limit.unwrap_or(self.default_limit);
        self.store
            .list(offset, limit, SortOrder::Asc)
            .await
            .map_err(|err| translate_store_error("list", err))
    }

    pub async fn find_one(&self, term: &str) -> Result<Creature, DomainError> {
        self.resolver.resolve(term).await
    }

    pub async fn update(&self, term: &str, patch: CreaturePatch) -> Result<Creature, DomainError> {
        let creature = self.find_one(term).await?;
        let patch = patch.normalized();

        let matched = self
            .store
            .update_one(creature.id, patch.clone())
            .await
            .map_err(|err| translate_store_error("update", err))?;
        if !matched {
            return Err(DomainError::not_found(format!(
                "creature with id {} not found",
                creature.id
            )));
        }

        info!(id = %creature.id, "creature updated");
        Ok(creature.merged_with(&patch))
    }

    pub async fn remove(&self, id: CreatureId) -> Result<(), DomainError> {
        let deleted = self
            .store
            .delete_one(id)
            .await
            .map_err(|err| translate_store_error("remove", err))?;

        if deleted == 0 {
            return Err(DomainError::not_found(format!(
                "creature with id {id} not found"
            )));
        }

        info!(%id, "creature removed");
        Ok(())
    }
}
