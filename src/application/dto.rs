use serde::{Deserialize, Serialize};

use crate::domain::{
    Creature, CreatureDraft, CreatureId, CreaturePatch, DomainError, validate_draft,
    validate_patch,
};

#[derive(Debug, Deserialize)]
pub struct CreateCreatureRequest {
    pub no: i64,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl CreateCreatureRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_draft(&self.to_draft())
    }

    pub fn into_draft(self) -> CreatureDraft {
        CreatureDraft {
            sequence_no: self.no,
            name: self.name,
            types: self.types,
        }
    }

    fn to_draft(&self) -> CreatureDraft {
        CreatureDraft {
            sequence_no: self.no,
            name: self.name.clone(),
            types: self.types.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCreatureRequest {
    #[serde(default)]
    pub no: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

impl UpdateCreatureRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_patch(&self.to_patch())
    }

    pub fn into_patch(self) -> CreaturePatch {
        CreaturePatch {
            sequence_no: self.no,
            name: self.name,
            types: self.types,
        }
    }

    fn to_patch(&self) -> CreaturePatch {
        CreaturePatch {
            sequence_no: self.no,
            name: self.name.clone(),
            types: self.types.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl PaginationQuery {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(limit) = self.limit
            && limit < 1
        {
            return Err(DomainError::validation("limit must be a positive integer"));
        }
        if let Some(offset) = self.offset
            && offset < 0
        {
            return Err(DomainError::validation("offset must not be negative"));
        }
        Ok(())
    }

    pub fn offset(&self) -> u64 {
        self.offset
            .and_then(|offset| u64::try_from(offset).ok())
            .unwrap_or(0)
    }
}

/// Client-facing view of a creature; revision and timestamps stay internal.
#[derive(Debug, Serialize)]
pub struct CreatureResponse {
    pub id: CreatureId,
    pub no: i64,
    pub name: String,
    pub types: Vec<String>,
}

impl From<Creature> for CreatureResponse {
    fn from(value: Creature) -> Self {
        Self {
            id: value.id,
            no: value.sequence_no,
            name: value.name,
            types: value.types,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
