use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        Creature, CreatureDraft, CreatureFilter, CreatureId, CreaturePatch, SortOrder,
        normalize_name,
    },
    infrastructure::{CreatureStore, StoreError, StoreResult},
};

#[derive(Default)]
struct CatalogState {
    by_id: HashMap<CreatureId, Creature>,
    id_by_name: HashMap<String, CreatureId>,
    id_by_sequence_no: BTreeMap<i64, CreatureId>,
}

impl CatalogState {
    fn ensure_unique(
        &self,
        name: &str,
        sequence_no: i64,
        owner: Option<CreatureId>,
    ) -> StoreResult<()> {
        if let Some(existing) = self.id_by_name.get(name)
            && Some(*existing) != owner
        {
            return Err(StoreError::duplicate("name", name));
        }
        if let Some(existing) = self.id_by_sequence_no.get(&sequence_no)
            && Some(*existing) != owner
        {
            return Err(StoreError::duplicate("no", sequence_no));
        }
        Ok(())
    }

    fn insert(&mut self, draft: CreatureDraft) -> StoreResult<Creature> {
        let name = normalize_name(&draft.name);
        self.ensure_unique(&name, draft.sequence_no, None)?;

        let now = Utc::now();
        let created = Creature {
            id: CreatureId::new(),
            sequence_no: draft.sequence_no,
            name,
            types: draft.types,
            revision: 1,
            created_at: now,
            updated_at: now,
        };

        self.id_by_name.insert(created.name.clone(), created.id);
        self.id_by_sequence_no
            .insert(created.sequence_no, created.id);
        self.by_id.insert(created.id, created.clone());
        Ok(created)
    }

    fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        let removed = self.by_id.remove(&id)?;
        self.id_by_name.remove(&removed.name);
        self.id_by_sequence_no.remove(&removed.sequence_no);
        Some(removed)
    }

    fn resolve_index(&self, id: Option<&CreatureId>) -> StoreResult<Option<Creature>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.by_id
            .get(id)
            .cloned()
            .map(Some)
            .ok_or_else(|| StoreError::backend(format!("index points at missing creature {id}")))
    }
}

/// Process-local store guarded by a single lock so that uniqueness checks and
/// writes happen atomically with respect to each other.
#[derive(Default)]
pub struct InMemoryCreatureStore {
    state: RwLock<CatalogState>,
}

impl InMemoryCreatureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CreatureStore for InMemoryCreatureStore {
    async fn create(&self, draft: CreatureDraft) -> StoreResult<Creature> {
        self.state.write().await.insert(draft)
    }

    async fn find_one(&self, filter: &CreatureFilter) -> StoreResult<Option<Creature>> {
        let state = self.state.read().await;
        match filter {
            CreatureFilter::All => {
                state.resolve_index(state.id_by_sequence_no.values().next())
            }
            CreatureFilter::SequenceNo(sequence_no) => {
                state.resolve_index(state.id_by_sequence_no.get(sequence_no))
            }
            CreatureFilter::Name(name) => {
                state.resolve_index(state.id_by_name.get(&normalize_name(name)))
            }
        }
    }

    async fn find_by_id(&self, id: CreatureId) -> StoreResult<Option<Creature>> {
        Ok(self.state.read().await.by_id.get(&id).cloned())
    }

    async fn update_one(&self, id: CreatureId, patch: CreaturePatch) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let Some(existing) = state.by_id.get(&id) else {
            return Ok(false);
        };

        let patch = patch.normalized();
        let mut updated = existing.merged_with(&patch);
        state.ensure_unique(&updated.name, updated.sequence_no, Some(id))?;

        let previous_name = existing.name.clone();
        let previous_sequence_no = existing.sequence_no;
        updated.revision += 1;
        updated.updated_at = Utc::now();

        if previous_name != updated.name {
            state.id_by_name.remove(&previous_name);
            state.id_by_name.insert(updated.name.clone(), id);
        }
        if previous_sequence_no != updated.sequence_no {
            state.id_by_sequence_no.remove(&previous_sequence_no);
            state.id_by_sequence_no.insert(updated.sequence_no, id);
        }
        state.by_id.insert(id, updated);

        Ok(true)
    }

    async fn delete_one(&self, id: CreatureId) -> StoreResult<u64> {
        Ok(self.state.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn delete_many(&self, filter: &CreatureFilter) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        let target = match filter {
            CreatureFilter::All => {
                let deleted = u64::try_from(state.by_id.len()).unwrap_or(u64::MAX);
                *state = CatalogState::default();
                return Ok(deleted);
            }
            CreatureFilter::SequenceNo(sequence_no) => {
                state.id_by_sequence_no.get(sequence_no).copied()
            }
            CreatureFilter::Name(name) => state.id_by_name.get(&normalize_name(name)).copied(),
        };

        Ok(target
            .and_then(|id| state.remove(id))
            .map_or(0, |_| 1))
    }

    async fn insert_many(&self, drafts: Vec<CreatureDraft>) -> StoreResult<Vec<Creature>> {
        let mut state = self.state.write().await;
        let mut inserted = Vec::with_capacity(drafts.len());

        for draft in drafts {
            match state.insert(draft) {
                Ok(created) => inserted.push(created),
                Err(error) => {
                    return Err(StoreError::BulkInsert {
                        inserted: inserted.len(),
                        source: Box::new(error),
                    });
                }
            }
        }

        Ok(inserted)
    }

    async fn list(&self, skip: u64, limit: i64, sort: SortOrder) -> StoreResult<Vec<Creature>> {
        let state = self.state.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = if limit > 0 {
            usize::try_from(limit).unwrap_or(usize::MAX)
        } else {
            usize::MAX
        };

        let ids: Box<dyn Iterator<Item = &CreatureId> + '_> = match sort {
            SortOrder::Asc => Box::new(state.id_by_sequence_no.values()),
            SortOrder::Desc => Box::new(state.id_by_sequence_no.values().rev()),
        };

        ids.skip(skip)
            .take(take)
            .map(|id| {
                state.resolve_index(Some(id)).and_then(|creature| {
                    creature.ok_or_else(|| StoreError::backend("index resolved to nothing"))
                })
            })
            .collect()
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(u64::try_from(self.state.read().await.by_id.len()).unwrap_or(u64::MAX))
    }
}
