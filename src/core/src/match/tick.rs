use crate::r#match::events::MatchEvent;
use crate::r#match::state::{BallZone, MatchPhase, Possession, Score};
use crate::r#match::stats::{PerSide, TeamStats};
use serde::{Deserialize, Serialize};

/// One simulated minute: the frame streamed to clients and collected into
/// the batch result. Score and stats are snapshots taken after every event
/// of the minute has been applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub minute: u8,
    pub phase: MatchPhase,
    pub possession: Possession,
    pub ball_zone: BallZone,
    pub score: Score,
    pub stats: PerSide<TeamStats>,
    pub events: Vec<MatchEvent>,
    pub commentary: String,
}
