use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    application::translate_store_error,
    domain::{CreatureDraft, CreatureFilter, DomainError, validate_draft},
    infrastructure::{CreatureStore, HttpAdapter},
};

pub const SEED_SUCCESS_MESSAGE: &str = "Seed executed successfully";

/// Where the seed pulls its single page of entries from.
#[derive(Debug, Clone)]
pub struct SeedSource {
    pub url: String,
    pub page_size: u32,
}

impl SeedSource {
    pub fn new(url: impl Into<String>, page_size: u32) -> Self {
        Self {
            url: url.into(),
            page_size,
        }
    }

    pub fn page_url(&self) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}limit={}", self.url, separator, self.page_size)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub message: String,
    pub inserted: usize,
    pub skipped: usize,
    pub executed_at: DateTime<Utc>,
}

/// Replaces the whole catalog with one page of upstream entries.
///
/// The wipe happens before the fetch. An upstream failure therefore leaves
/// the store empty, and a duplicate inside the batch leaves whatever was
/// written before it. Neither case is retried or rolled back.
#[derive(Clone)]
pub struct SeedService {
    store: Arc<dyn CreatureStore>,
    http: Arc<dyn HttpAdapter>,
    source: SeedSource,
}

impl SeedService {
    pub fn new(store: Arc<dyn CreatureStore>, http: Arc<dyn HttpAdapter>, source: SeedSource) -> Self {
        Self { store, http, source }
    }

    pub async fn execute_seed(&self) -> Result<SeedSummary, DomainError> {
        let deleted = self
            .store
            .delete_many(&CreatureFilter::All)
            .await
            .map_err(|err| translate_store_error("seed", err))?;
        info!(deleted, "catalog wiped before seeding");

        let url = self.source.page_url();
        let page = self.http.get::<CatalogPage>(&url).await.map_err(|err| {
            error!(error = %err, "seed aborted after wipe; catalog left empty");
            DomainError::upstream("catalog source unavailable")
        })?;
        info!(
            url = %url,
            entries = page.results.len(),
            upstream_total = ?page.count,
            has_next = page.next.is_some(),
            has_previous = page.previous.is_some(),
            "fetched upstream catalog page"
        );

        let (drafts, skipped) = drafts_from_page(page);
        let inserted = self
            .store
            .insert_many(drafts)
            .await
            .map_err(|err| translate_store_error("seed", err))?;

        info!(inserted = inserted.len(), skipped, "seed completed");
        Ok(SeedSummary {
            message: SEED_SUCCESS_MESSAGE.to_string(),
            inserted: inserted.len(),
            skipped,
            executed_at: Utc::now(),
        })
    }
}

fn drafts_from_page(page: CatalogPage) -> (Vec<CreatureDraft>, usize) {
    let mut drafts = Vec::with_capacity(page.results.len());
    let mut skipped = 0;

    for entry in page.results {
        let Some(sequence_no) = sequence_no_from_url(&entry.url) else {
            warn!(name = %entry.name, url = %entry.url, "skipping entry without a numeric reference");
            skipped += 1;
            continue;
        };

        let draft = CreatureDraft::new(sequence_no, entry.name).normalized();
        if let Err(err) = validate_draft(&draft) {
            warn!(name = %draft.name, no = sequence_no, error = %err, "skipping invalid entry");
            skipped += 1;
            continue;
        }
        drafts.push(draft);
    }

    (drafts, skipped)
}

/// Reads the catalog number from the second-to-last `/` segment, so
/// `.../pokemon/25/` yields 25.
pub fn sequence_no_from_url(url: &str) -> Option<i64> {
    let segments: Vec<&str> = url.split('/').collect();
    let index = segments.len().checked_sub(2)?;
    segments[index].parse::<i64>().ok()
}
