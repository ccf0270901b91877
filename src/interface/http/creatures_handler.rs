use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    application::dto::{
        CreateCreatureRequest, CreatureResponse, HealthResponse, PaginationQuery,
        UpdateCreatureRequest,
    },
    domain::{CreatureId, DomainError},
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_creature(
    State(state): State<AppState>,
    payload: Result<Json<CreateCreatureRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatureResponse>)> {
    let Json(request) = payload?;
    request.validate()?;

    let created = state.catalog.create(request.into_draft()).await?;

    Ok((StatusCode::CREATED, Json(CreatureResponse::from(created))))
}

pub async fn list_creatures(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CreatureResponse>>> {
    let Query(query) = query?;
    query.validate()?;

    let creatures = state.catalog.list(query.limit, query.offset()).await?;

    Ok(Json(
        creatures.into_iter().map(CreatureResponse::from).collect(),
    ))
}

pub async fn get_creature(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> ApiResult<Json<CreatureResponse>> {
    let creature = state.catalog.find_one(&term).await?;
    Ok(Json(CreatureResponse::from(creature)))
}

pub async fn update_creature(
    State(state): State<AppState>,
    Path(term): Path<String>,
    payload: Result<Json<UpdateCreatureRequest>, JsonRejection>,
) -> ApiResult<Json<CreatureResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    let updated = state.catalog.update(&term, request.into_patch()).await?;

    Ok(Json(CreatureResponse::from(updated)))
}

pub async fn delete_creature(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_creature_id(&id)?;
    state.catalog.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_creature_id(raw: &str) -> ApiResult<CreatureId> {
    CreatureId::parse(raw).ok_or_else(|| {
        ApiProblem::from_domain(DomainError::validation(format!(
            "{raw} is not a valid creature id"
        )))
    })
}
