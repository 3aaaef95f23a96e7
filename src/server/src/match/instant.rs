use crate::GameAppData;
use crate::error::{ApiError, ApiResult};
use crate::r#match::stream::SimulationQuery;
use axum::Json;
use axum::extract::{Path, Query, State};
use match_core::{MatchEngine, MatchInput, MatchResult, SimulationSpeed};
use database::StoredResult;
use log::debug;

/// GET /matches/{id}/simulate-instant — runs the whole match off the async
/// runtime and returns the single batch document.
pub async fn simulate_instant_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<String>,
    Query(query): Query<SimulationQuery>,
) -> ApiResult<Json<MatchResult>> {
    let fixture = state
        .store
        .fixture(&match_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

    let options = query.into_options(SimulationSpeed::Instant);

    let input = MatchInput {
        match_id: fixture.match_id,
        home: fixture.home,
        away: fixture.away,
        options,
    };

    let engine = MatchEngine::new(input)?;

    let result = tokio::task::spawn_blocking(move || engine.run_to_completion())
        .await
        .map_err(|err| ApiError::InternalError(format!("simulation task failed: {}", err)))??;

    debug!(
        "instant simulation of {} finished {}-{}",
        match_id, result.final_score.home, result.final_score.away
    );

    state.store.store_result(StoredResult::from(&result)).await;

    Ok(Json(result))
}
