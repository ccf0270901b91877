use axum::{
    Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{
    interface::http::{creatures_handler, seed_handler},
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/creatures",
            get(creatures_handler::list_creatures).post(creatures_handler::create_creature),
        )
        .route(
            "/creatures/{term}",
            get(creatures_handler::get_creature)
                .patch(creatures_handler::update_creature)
                .delete(creatures_handler::delete_creature),
        )
        .route("/seed", get(seed_handler::execute_seed));

    Router::new()
        .route("/health", get(creatures_handler::healthcheck))
        .nest("/api/v2", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
