use match_core::{
    Formation, MatchEvent, MatchResult, PerSide, Score, SideInput, Tactic, TeamStats,
};
use match_core::{Mentality, Pressing, Tempo};
use crate::generators::TeamGenerator;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A scheduled match: the read-only input snapshot the engine consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub match_id: String,
    pub home: SideInput,
    pub away: SideInput,
}

/// What gets persisted exactly once when a match reaches full time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResult {
    pub match_id: String,
    pub final_score: Score,
    pub stats: PerSide<TeamStats>,
    pub events: Vec<MatchEvent>,
}

impl From<&MatchResult> for StoredResult {
    fn from(result: &MatchResult) -> Self {
        StoredResult {
            match_id: result.match_id.clone(),
            final_score: result.final_score,
            stats: result.full_time_stats,
            events: result
                .minutes
                .iter()
                .flat_map(|tick| tick.events.iter().cloned())
                .collect(),
        }
    }
}

/// In-memory store of fixtures and completed results. Fixtures are handed
/// out as deep clones so a running simulation never observes later edits;
/// results are write-once.
pub struct FixtureStore {
    fixtures: RwLock<HashMap<String, Fixture>>,
    results: RwLock<HashMap<String, StoredResult>>,
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureStore {
    pub fn new() -> Self {
        FixtureStore {
            fixtures: RwLock::new(HashMap::new()),
            results: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-loaded with one playable fixture between two generated
    /// squads, so the server works out of the box.
    pub fn with_sample_data() -> Self {
        let store = Self::new();

        let home_team = TeamGenerator::generate(1, "Northbridge United", "#c0392b", 32);
        let away_team = TeamGenerator::generate(2, "Easton Rovers", "#2980b9", 28);

        let mut home_tactic = Tactic::default();
        home_tactic.mentality = Mentality::Attacking;
        home_tactic.pressing = Pressing::Often;

        let mut away_tactic = Tactic::default();
        away_tactic.tempo = Tempo::Fast;
        away_tactic.counter_attack = true;

        let fixture = Fixture {
            match_id: "northbridge-easton".to_string(),
            home: SideInput {
                team: home_team,
                formation: Formation::by_name("4-3-3").expect("builtin formation"),
                tactic: home_tactic,
                lineup: None,
            },
            away: SideInput {
                team: away_team,
                formation: Formation::by_name("4-4-2").expect("builtin formation"),
                tactic: away_tactic,
                lineup: None,
            },
        };

        store
            .fixtures
            .try_write()
            .expect("store not shared yet")
            .insert(fixture.match_id.clone(), fixture);

        info!("fixture store seeded with sample data");
        store
    }

    pub async fn fixture(&self, match_id: &str) -> Option<Fixture> {
        self.fixtures.read().await.get(match_id).cloned()
    }

    pub async fn fixture_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.fixtures.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn insert_fixture(&self, fixture: Fixture) {
        self.fixtures
            .write()
            .await
            .insert(fixture.match_id.clone(), fixture);
    }

    /// Write-once sink. A repeated write for the same match is dropped.
    pub async fn store_result(&self, result: StoredResult) -> bool {
        let mut results = self.results.write().await;
        if results.contains_key(&result.match_id) {
            warn!(
                "result for {} already stored, ignoring duplicate write",
                result.match_id
            );
            return false;
        }

        info!(
            "stored result for {}: {}-{}",
            result.match_id, result.final_score.home, result.final_score.away
        );
        results.insert(result.match_id.clone(), result);
        true
    }

    pub async fn result(&self, match_id: &str) -> Option<StoredResult> {
        self.results.read().await.get(match_id).cloned()
    }
}
