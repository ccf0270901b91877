pub mod creature;
pub mod errors;

pub use creature::{
    Creature, CreatureDraft, CreatureFilter, CreatureId, CreaturePatch, SortOrder,
    normalize_name, validate_draft, validate_patch,
};
pub use errors::DomainError;
