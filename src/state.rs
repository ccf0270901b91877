use std::sync::Arc;

use crate::application::{CatalogService, SeedService};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub seed: Arc<SeedService>,
}

impl AppState {
    pub fn new(catalog: CatalogService, seed: SeedService) -> Self {
        Self {
            catalog: Arc::new(catalog),
            seed: Arc::new(seed),
        }
    }
}
