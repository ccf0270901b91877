//! Creature catalog service.
//!
//! Creatures are addressable by catalog number, store id, or name; a single
//! search term is resolved against all three. The catalog can be rebuilt
//! wholesale from an upstream listing through the seed pipeline.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod state;

pub use app::build_router;
pub use application::{CatalogService, CreatureResolver, SeedService, SeedSource, SeedSummary};
pub use domain::{Creature, CreatureDraft, CreatureId, CreaturePatch, DomainError};
