use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("creature already exists with {field} {value:?}")]
    Conflict { field: String, value: String },
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("stopped after {written} records were written: {cause}")]
    Interrupted {
        written: usize,
        #[source]
        cause: Box<DomainError>,
    },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wraps the failure of a multi-record write that kept its first
    /// `written` records.
    pub fn interrupted(written: usize, cause: DomainError) -> Self {
        Self::Interrupted {
            written,
            cause: Box::new(cause),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Interrupted { cause, .. } => cause.is_not_found(),
            _ => false,
        }
    }

    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Conflict { .. } => true,
            Self::Interrupted { cause, .. } => cause.is_conflict(),
            _ => false,
        }
    }
}
