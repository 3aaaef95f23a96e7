use axum::response::sse::Event;
use match_core::{
    EventKind, MatchError, MatchPhase, PerSide, Score, SideLineupView, TeamSide, TeamStats, Tick,
};
use log::error;
use serde::Serialize;

/// Wire payloads for the named convenience frames. The `minute` frame
/// carries the tick itself.
#[derive(Debug, Serialize)]
pub struct LineupFrame<'a> {
    pub home: &'a SideLineupView,
    pub away: &'a SideLineupView,
}

#[derive(Debug, Serialize)]
pub struct GoalFrame {
    pub minute: u8,
    pub team: TeamSide,
    pub scorer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assister: Option<String>,
    pub score: Score,
}

#[derive(Debug, Serialize)]
pub struct CardFrame {
    pub minute: u8,
    pub team: TeamSide,
    pub player: String,
    pub card_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubstitutionFrame {
    pub minute: u8,
    pub team: TeamSide,
    pub off: String,
    pub on: String,
}

#[derive(Debug, Serialize)]
pub struct PhaseFrame {
    pub score: Score,
    pub stats: PerSide<TeamStats>,
}

#[derive(Debug, Serialize)]
pub struct ErrorFrame {
    pub message: String,
    pub code: &'static str,
}

/// Builds one SSE frame, `event: <name>` plus a JSON body.
pub fn frame<T: Serialize>(name: &'static str, payload: &T) -> Event {
    match Event::default().event(name).json_data(payload) {
        Ok(event) => event,
        Err(err) => {
            // Serialization of our own wire types failing is a programming
            // error; degrade to an error frame rather than killing the task
            error!("failed to serialize {} frame: {}", name, err);
            Event::default()
                .event("error")
                .data("{\"message\":\"frame serialization failed\",\"code\":\"InternalFailure\"}")
        }
    }
}

pub fn error_frame(err: &MatchError) -> Event {
    frame(
        "error",
        &ErrorFrame {
            message: err.reason(),
            code: err.code(),
        },
    )
}

/// All frames a single tick produces, in contract order: the `minute`
/// frame, the derived `goal`/`card`/`substitution` frames in event order,
/// then `half_time`/`full_time` when the tick closes a phase.
pub fn tick_frames(tick: &Tick) -> Vec<Event> {
    let mut frames = vec![frame("minute", tick)];

    for event in &tick.events {
        match event.kind {
            EventKind::Goal => frames.push(frame(
                "goal",
                &GoalFrame {
                    minute: tick.minute,
                    team: event.team,
                    scorer: event.primary_player_name.clone(),
                    assister: event.secondary_player_name.clone(),
                    score: tick.score,
                },
            )),
            EventKind::YellowCard | EventKind::RedCard => frames.push(frame(
                "card",
                &CardFrame {
                    minute: tick.minute,
                    team: event.team,
                    player: event.primary_player_name.clone(),
                    card_type: if event.kind == EventKind::YellowCard {
                        "yellow"
                    } else {
                        "red"
                    },
                },
            )),
            EventKind::Substitution => {
                if let Some(on) = &event.secondary_player_name {
                    frames.push(frame(
                        "substitution",
                        &SubstitutionFrame {
                            minute: tick.minute,
                            team: event.team,
                            off: event.primary_player_name.clone(),
                            on: on.clone(),
                        },
                    ));
                }
            }
            _ => {}
        }
    }

    match tick.phase {
        MatchPhase::HalfTime => frames.push(frame(
            "half_time",
            &PhaseFrame {
                score: tick.score,
                stats: tick.stats,
            },
        )),
        MatchPhase::FullTime => frames.push(frame(
            "full_time",
            &PhaseFrame {
                score: tick.score,
                stats: tick.stats,
            },
        )),
        _ => {}
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_core::{BallZone, Coordinate, EventOutcome, MatchEvent, Possession};

    fn tick_with_goal() -> Tick {
        let event = MatchEvent::new(
            EventKind::Goal,
            TeamSide::Home,
            9,
            "Scorer".into(),
            EventOutcome::Success,
            Coordinate::new(95.0, 50.0),
            "goal".into(),
        );

        Tick {
            minute: 23,
            phase: MatchPhase::FirstHalf,
            possession: Possession::Home,
            ball_zone: BallZone::Attacking,
            score: Score { home: 1, away: 0 },
            stats: PerSide::default(),
            events: vec![event],
            commentary: String::new(),
        }
    }

    #[test]
    fn test_goal_tick_yields_minute_then_goal_frame() {
        let frames = tick_frames(&tick_with_goal());
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_half_time_tick_appends_phase_frame() {
        let mut tick = tick_with_goal();
        tick.events.clear();
        tick.minute = 45;
        tick.phase = MatchPhase::HalfTime;

        let frames = tick_frames(&tick);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_quiet_tick_is_a_single_minute_frame() {
        let mut tick = tick_with_goal();
        tick.events.clear();

        let frames = tick_frames(&tick);
        assert_eq!(frames.len(), 1);
    }
}
