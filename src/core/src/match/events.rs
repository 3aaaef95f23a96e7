use serde::{Deserialize, Serialize};

/// Which side of the fixture an event belongs to. Passed explicitly with
/// every event so nothing ever compares team names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opposite(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Pitch coordinates on the 0..=100 square. The acting team always attacks
/// toward x = 100; a client needing a fixed orientation mirrors away-team
/// events itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub fn new(x: f32, y: f32) -> Self {
        Coordinate {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }
}

/// Closed set of event types the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    ShotOnTarget,
    ShotOffTarget,
    ShotBlocked,
    Save,
    Corner,
    Foul,
    FreeKick,
    Penalty,
    Offside,
    YellowCard,
    RedCard,
    Substitution,
    PassCompleted,
    PassAttempted,
    Tackle,
    Interception,
    Injury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Success,
    Failure,
    Neutral,
}

/// One sub-action within a causal chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAction {
    pub action: ActionKind,
    pub actor_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<u32>,
    pub ball_start: Coordinate,
    pub ball_end: Coordinate,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Pass,
    Dribble,
    Cross,
    Shoot,
    Header,
    Volley,
    Penalty,
    TapIn,
    Save,
    Catch,
    Block,
    Clearance,
    CornerDelivery,
    FreeKick,
    Tackle,
    Interception,
}

impl ActionKind {
    /// Actions that can legitimately end a scoring sequence.
    pub fn is_finish(&self) -> bool {
        matches!(
            self,
            ActionKind::Shoot
                | ActionKind::Header
                | ActionKind::Volley
                | ActionKind::Penalty
                | ActionKind::TapIn
        )
    }
}

/// A fully resolved event within one tick, carrying the causal chain that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub team: TeamSide,
    pub primary_player_id: u32,
    pub primary_player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_player_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_player_name: Option<String>,
    pub outcome: EventOutcome,
    pub coordinates: Coordinate,
    pub description: String,
    pub sequence: Vec<SubAction>,
}

impl MatchEvent {
    pub fn new(
        kind: EventKind,
        team: TeamSide,
        primary_player_id: u32,
        primary_player_name: String,
        outcome: EventOutcome,
        coordinates: Coordinate,
        description: String,
    ) -> Self {
        MatchEvent {
            kind,
            team,
            primary_player_id,
            primary_player_name,
            secondary_player_id: None,
            secondary_player_name: None,
            outcome,
            coordinates,
            description,
            sequence: Vec::new(),
        }
    }

    pub fn with_secondary(mut self, id: u32, name: String) -> Self {
        self.secondary_player_id = Some(id);
        self.secondary_player_name = Some(name);
        self
    }
}
