use axum::{Json, extract::State};

use crate::{
    application::SeedSummary, interface::http::problem::ApiResult, state::AppState,
};

pub async fn execute_seed(State(state): State<AppState>) -> ApiResult<Json<SeedSummary>> {
    let summary = state.seed.execute_seed().await?;
    Ok(Json(summary))
}
