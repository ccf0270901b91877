use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const MAX_NAME_LEN: usize = 64;

/// Store-assigned identifier of a creature.
///
/// Any textual form accepted by [`Uuid::parse_str`] is a syntactically valid
/// id, which is what the resolver relies on when it decides whether a search
/// term is worth an id lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(Uuid);

impl CreatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CreatureId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub sequence_no: i64,
    pub name: String,
    pub types: Vec<String>,
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Creature {
    /// Returns the stored record with every field present in `patch` taking
    /// precedence. Metadata is left untouched.
    pub fn merged_with(&self, patch: &CreaturePatch) -> Self {
        let mut merged = self.clone();
        if let Some(sequence_no) = patch.sequence_no {
            merged.sequence_no = sequence_no;
        }
        if let Some(name) = &patch.name {
            merged.name = name.clone();
        }
        if let Some(types) = &patch.types {
            merged.types = types.clone();
        }
        merged
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureDraft {
    pub sequence_no: i64,
    pub name: String,
    pub types: Vec<String>,
}

impl CreatureDraft {
    pub fn new(sequence_no: i64, name: impl Into<String>) -> Self {
        Self {
            sequence_no,
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn normalized(mut self) -> Self {
        self.name = normalize_name(&self.name);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreaturePatch {
    pub sequence_no: Option<i64>,
    pub name: Option<String>,
    pub types: Option<Vec<String>>,
}

impl CreaturePatch {
    pub fn is_empty(&self) -> bool {
        self.sequence_no.is_none() && self.name.is_none() && self.types.is_none()
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.as_deref().map(normalize_name);
        self
    }
}

/// Lookup criteria understood by the store's filter-based operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatureFilter {
    All,
    SequenceNo(i64),
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_draft(draft: &CreatureDraft) -> Result<(), DomainError> {
    validate_sequence_no(draft.sequence_no)?;
    validate_name(&draft.name)?;
    validate_types(&draft.types)
}

pub fn validate_patch(patch: &CreaturePatch) -> Result<(), DomainError> {
    if patch.is_empty() {
        return Err(DomainError::validation(
            "at least one field must be provided for update",
        ));
    }
    if let Some(sequence_no) = patch.sequence_no {
        validate_sequence_no(sequence_no)?;
    }
    if let Some(name) = patch.name.as_deref() {
        validate_name(name)?;
    }
    if let Some(types) = patch.types.as_deref() {
        validate_types(types)?;
    }
    Ok(())
}

fn validate_sequence_no(sequence_no: i64) -> Result<(), DomainError> {
    if sequence_no < 1 {
        return Err(DomainError::validation("no must be a positive integer"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name must not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_types(types: &[String]) -> Result<(), DomainError> {
    if types.iter().any(|value| value.trim().is_empty()) {
        return Err(DomainError::validation("types must not contain blank entries"));
    }
    Ok(())
}
