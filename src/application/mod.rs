use tracing::{error, warn};

use crate::{domain::DomainError, infrastructure::StoreError};

pub mod catalog_service;
pub mod dto;
pub mod resolver;
pub mod seed_service;

pub use catalog_service::CatalogService;
pub use resolver::CreatureResolver;
pub use seed_service::{SeedService, SeedSource, SeedSummary};

/// Maps store failures onto domain errors.
///
/// Duplicate keys become [`DomainError::Conflict`]; a bulk insert that stopped
/// partway becomes [`DomainError::Interrupted`] around its translated cause,
/// keeping the written count. Anything else is logged
/// here and collapsed into [`DomainError::Internal`] so storage details never
/// reach a client.
pub(crate) fn translate_store_error(operation: &'static str, error: StoreError) -> DomainError {
    match error {
        StoreError::DuplicateKey { field, value } => DomainError::conflict(field, value),
        StoreError::BulkInsert { inserted, source } => {
            warn!(operation, inserted, "bulk insert stopped before completion");
            DomainError::interrupted(inserted, translate_store_error(operation, *source))
        }
        other => {
            error!(operation, error = %other, "unexpected store failure");
            DomainError::internal("internal error, check server logs")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_become_conflicts() {
        let translated = translate_store_error("create", StoreError::duplicate("name", "mew"));
        assert!(matches!(
            translated,
            DomainError::Conflict { ref field, ref value } if field == "name" && value == "mew"
        ));
    }

    #[test]
    fn bulk_insert_failures_keep_the_written_count() {
        let translated = translate_store_error(
            "seed",
            StoreError::BulkInsert {
                inserted: 3,
                source: Box::new(StoreError::duplicate("no", 4)),
            },
        );
        assert!(translated.is_conflict());
        match translated {
            DomainError::Interrupted { written, cause } => {
                assert_eq!(written, 3);
                assert!(matches!(*cause, DomainError::Conflict { ref field, .. } if field == "no"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_store_failures_collapse_into_internal() {
        let translated = translate_store_error("list", StoreError::backend("disk on fire"));
        match translated {
            DomainError::Internal(detail) => assert!(!detail.contains("disk")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
