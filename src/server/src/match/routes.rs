use crate::GameAppData;
use crate::r#match::instant::simulate_instant_action;
use crate::r#match::stream::simulate_stream_action;
use axum::Json;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

pub fn match_routes() -> Router<GameAppData> {
    Router::new()
        .route("/matches", get(matches_list_action))
        .route(
            "/matches/{match_id}/simulate-stream",
            post(simulate_stream_action),
        )
        .route(
            "/matches/{match_id}/simulate-instant",
            get(simulate_instant_action),
        )
}

/// The fixtures currently available to simulate.
async fn matches_list_action(State(state): State<GameAppData>) -> Json<Vec<String>> {
    Json(state.store.fixture_ids().await)
}
