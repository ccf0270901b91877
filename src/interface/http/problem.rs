use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiProblem>;

const GENERIC_INTERNAL_DETAIL: &str = "internal error, check server logs";

#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    title: &'static str,
    detail: String,
    kind: &'static str,
    correlation_id: String,
}

impl ApiProblem {
    pub fn from_domain(error: DomainError) -> Self {
        match error {
            DomainError::Validation(detail) => Self::new(
                StatusCode::BAD_REQUEST,
                "Validation failed",
                "https://creature-catalog.dev/problems/validation",
                detail,
            ),
            DomainError::NotFound(detail) => Self::new(
                StatusCode::NOT_FOUND,
                "Not found",
                "https://creature-catalog.dev/problems/not-found",
                detail,
            ),
            DomainError::Conflict { field, value } => Self::new(
                StatusCode::CONFLICT,
                "Conflict",
                "https://creature-catalog.dev/problems/conflict",
                format!("creature already exists in catalog: {field} = {value:?}"),
            ),
            DomainError::Interrupted { written, cause } => {
                let mut problem = Self::from_domain(*cause);
                if problem.status != StatusCode::INTERNAL_SERVER_ERROR {
                    problem.detail = format!(
                        "{} ({written} records written before the failure)",
                        problem.detail
                    );
                }
                problem
            }
            other @ (DomainError::Upstream(_) | DomainError::Internal(_)) => {
                let problem = Self::internal();
                error!(
                    correlation_id = %problem.correlation_id,
                    error = %other,
                    "request failed"
                );
                problem
            }
        }
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "https://creature-catalog.dev/problems/internal",
            GENERIC_INTERNAL_DETAIL,
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(
        status: StatusCode,
        title: &'static str,
        kind: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title,
            detail: detail.into(),
            kind,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl From<DomainError> for ApiProblem {
    fn from(error: DomainError) -> Self {
        Self::from_domain(error)
    }
}

impl From<JsonRejection> for ApiProblem {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_domain(DomainError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiProblem {
    fn from(rejection: QueryRejection) -> Self {
        Self::from_domain(DomainError::validation(rejection.body_text()))
    }
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    status: u16,
    detail: String,
    correlation_id: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let payload = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            correlation_id: self.correlation_id,
        };

        let mut response = (self.status, Json(payload)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_errors_keep_distinct_statuses() {
        assert_eq!(
            ApiProblem::from_domain(DomainError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiProblem::from_domain(DomainError::not_found("gone")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiProblem::from_domain(DomainError::conflict("name", "mew")).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn interrupted_writes_report_the_written_count() {
        let problem = ApiProblem::from_domain(DomainError::interrupted(
            2,
            DomainError::conflict("name", "bulbasaur"),
        ));
        assert_eq!(problem.status(), StatusCode::CONFLICT);
        assert!(problem.detail.contains("\"bulbasaur\""));
        assert!(problem.detail.contains("2 records written"));

        let problem = ApiProblem::from_domain(DomainError::interrupted(
            5,
            DomainError::internal("lock poisoned"),
        ));
        assert_eq!(problem.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, GENERIC_INTERNAL_DETAIL);
    }

    #[test]
    fn upstream_and_internal_errors_hide_their_detail() {
        let problem = ApiProblem::from_domain(DomainError::upstream("pokeapi.co timed out"));
        assert_eq!(problem.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, GENERIC_INTERNAL_DETAIL);

        let problem = ApiProblem::from_domain(DomainError::internal("lock poisoned"));
        assert_eq!(problem.detail, GENERIC_INTERNAL_DETAIL);
    }
}
