use std::sync::Arc;

use tracing::debug;

use crate::{
    application::translate_store_error,
    domain::{Creature, CreatureFilter, CreatureId, DomainError, normalize_name},
    infrastructure::CreatureStore,
};

/// Maps a free-form search term onto exactly one creature.
///
/// Strategies run in a fixed order and stop at the first hit:
/// sequence number (when the term is a decimal integer), then store id (when
/// the term is a well-formed id), then normalized name. The first two are
/// independent checks on the same input, so a term that looks like a number
/// still gets an id lookup if the number matched nothing.
#[derive(Clone)]
pub struct CreatureResolver {
    store: Arc<dyn CreatureStore>,
}

impl CreatureResolver {
    pub fn new(store: Arc<dyn CreatureStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, term: &str) -> Result<Creature, DomainError> {
        if let Ok(sequence_no) = term.parse::<i64>() {
            debug!(term, sequence_no, "resolving by sequence number");
            let found = self
                .store
                .find_one(&CreatureFilter::SequenceNo(sequence_no))
                .await
                .map_err(|err| translate_store_error("resolve", err))?;
            if let Some(creature) = found {
                return Ok(creature);
            }
        }

        if let Some(id) = CreatureId::parse(term) {
            debug!(term, %id, "resolving by id");
            let found = self
                .store
                .find_by_id(id)
                .await
                .map_err(|err| translate_store_error("resolve", err))?;
            if let Some(creature) = found {
                return Ok(creature);
            }
        }

        let name = normalize_name(term);
        debug!(term, name = %name, "resolving by name");
        self.store
            .find_one(&CreatureFilter::Name(name))
            .await
            .map_err(|err| translate_store_error("resolve", err))?
            .ok_or_else(|| {
                DomainError::not_found(format!("creature with id, name or no \"{term}\" not found"))
            })
    }
}
