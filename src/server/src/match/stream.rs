use crate::GameAppData;
use crate::error::{ApiError, ApiResult};
use crate::r#match::frames;
use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use match_core::{MatchEngine, MatchInput, MatchPhase, SimulationOptions, SimulationSpeed, Tick};
use database::{FixtureStore, StoredResult};
use futures::Stream;
use futures::stream;
use log::info;
use serde::Deserialize;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock cap for one streamed simulation, generous enough for a full
/// match at realtime pacing.
const SIMULATION_BUDGET: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
pub struct SimulationQuery {
    pub speed: Option<SimulationSpeed>,
    pub seed: Option<u64>,
    pub commentary: Option<bool>,
}

impl SimulationQuery {
    pub fn into_options(self, default_speed: SimulationSpeed) -> SimulationOptions {
        let mut options = SimulationOptions::default();
        options.speed = self.speed.unwrap_or(default_speed);
        options.seed = self.seed;
        if let Some(commentary) = self.commentary {
            options.commentary = commentary;
        }
        options
    }
}

/// POST /matches/{id}/simulate-stream — a long-lived `text/event-stream`
/// of lineup, minute, convenience and phase frames. Lineup and
/// precondition failures surface as HTTP 422 before the first frame.
pub async fn simulate_stream_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<String>,
    Query(query): Query<SimulationQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let fixture = state
        .store
        .fixture(&match_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

    let options = query.into_options(SimulationSpeed::Realtime);
    let delay = options.speed.tick_delay();

    let input = MatchInput {
        match_id: fixture.match_id,
        home: fixture.home,
        away: fixture.away,
        options,
    };

    let engine = MatchEngine::new(input)?;

    info!(
        "streaming match {} with seed {:#018x}",
        match_id,
        engine.seed()
    );

    let stream = frame_stream(engine, Arc::clone(&state.store), delay);
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

struct FrameProducer {
    engine: Option<MatchEngine>,
    store: Arc<FixtureStore>,
    delay: Duration,
    pending: VecDeque<Event>,
    ticks: Vec<Tick>,
    started: Instant,
    done: bool,
}

/// Lazily-polled frame source: one tick is computed only when the client
/// has consumed the previous frames, so a disconnect cancels the engine at
/// the next tick boundary and nothing is persisted.
fn frame_stream(
    engine: MatchEngine,
    store: Arc<FixtureStore>,
    delay: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let mut pending = VecDeque::new();
    {
        let lineups = engine.lineup_views();
        pending.push_back(frames::frame(
            "lineup",
            &frames::LineupFrame {
                home: &lineups.home,
                away: &lineups.away,
            },
        ));
    }

    let producer = FrameProducer {
        engine: Some(engine),
        store,
        delay,
        pending,
        ticks: Vec::new(),
        started: Instant::now(),
        done: false,
    };

    stream::unfold(producer, |mut p| async move {
        loop {
            if let Some(event) = p.pending.pop_front() {
                return Some((Ok(event), p));
            }
            if p.done {
                return None;
            }

            // A wedged client or pathological pacing cannot hold the
            // producer alive forever
            if p.started.elapsed() > SIMULATION_BUDGET {
                p.pending.push_back(frames::error_frame(&match_core::MatchError::Invariant(
                    "simulation exceeded its wall-clock budget".to_string(),
                )));
                p.engine = None;
                p.done = true;
                continue;
            }

            // Pace between minute frames, never before the opening one
            if !p.delay.is_zero() && !p.ticks.is_empty() {
                tokio::time::sleep(p.delay).await;
            }

            let step = match p.engine.as_mut() {
                Some(engine) => engine.next(),
                None => None,
            };

            match step {
                Some(Ok(tick)) => {
                    let finished = tick.phase == MatchPhase::FullTime;
                    p.pending.extend(frames::tick_frames(&tick));
                    p.ticks.push(tick);

                    if finished {
                        p.done = true;
                        // Freeze and persist exactly once, on full time
                        if let Some(engine) = p.engine.take() {
                            let result = engine.into_result(std::mem::take(&mut p.ticks));
                            p.store.store_result(StoredResult::from(&result)).await;
                        }
                    }
                }
                Some(Err(err)) => {
                    // Terminal error frame; the partial state is discarded
                    p.pending.push_back(frames::error_frame(&err));
                    p.engine = None;
                    p.done = true;
                }
                None => {
                    p.done = true;
                }
            }
        }
    })
}
