use crate::r#match::lineup::SideLineupView;
use crate::r#match::player_stats::PlayerMatchStats;
use crate::r#match::state::Score;
use crate::r#match::stats::{PerSide, TeamStats};
use crate::r#match::tick::Tick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete frozen outcome of a simulation: what the instant endpoint
/// returns and what the caller may hand to a persistence sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: String,
    /// The seed that reproduces this exact match.
    pub seed: u64,
    pub lineups: PerSide<SideLineupView>,
    pub minutes: Vec<Tick>,
    pub final_score: Score,
    pub full_time_stats: PerSide<TeamStats>,
    pub player_stats: BTreeMap<u32, PlayerMatchStats>,
}
