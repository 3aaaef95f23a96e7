use crate::club::team::{Formation, Tactic, Team};
use crate::r#match::lineup::MatchLineup;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the engine needs for one fixture: a deep-cloned snapshot,
/// never re-read after kickoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub match_id: String,
    pub home: SideInput,
    pub away: SideInput,
    #[serde(default)]
    pub options: SimulationOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideInput {
    pub team: Team,
    pub formation: Formation,
    #[serde(default)]
    pub tactic: Tactic,
    #[serde(default)]
    pub lineup: Option<MatchLineup>,
}

/// Inter-tick pacing of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationSpeed {
    Realtime,
    Fast,
    #[default]
    Instant,
}

impl SimulationSpeed {
    pub fn tick_delay(&self) -> Duration {
        match self {
            SimulationSpeed::Realtime => Duration::from_millis(1000),
            SimulationSpeed::Fast => Duration::from_millis(300),
            SimulationSpeed::Instant => Duration::ZERO,
        }
    }
}

fn default_stoppage_bias() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

fn default_max_substitutions() -> u8 {
    crate::r#match::discipline::MAX_SUBSTITUTIONS
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationOptions {
    #[serde(default)]
    pub speed: SimulationSpeed,
    /// Maximum extra minutes appended to the second half, 0..=5.
    #[serde(default = "default_stoppage_bias")]
    pub stoppage_bias: u8,
    /// Fixing the seed makes the whole run reproducible frame for frame.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub commentary: bool,
    #[serde(default = "default_true")]
    pub allow_auto_lineup: bool,
    /// Clamped to the hard cap of 5.
    #[serde(default = "default_max_substitutions")]
    pub max_substitutions: u8,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            speed: SimulationSpeed::default(),
            stoppage_bias: default_stoppage_bias(),
            seed: None,
            commentary: true,
            allow_auto_lineup: true,
            max_substitutions: default_max_substitutions(),
        }
    }
}

impl SimulationOptions {
    /// Normalises out-of-range knobs instead of failing.
    pub fn clamped(mut self) -> Self {
        self.stoppage_bias = self.stoppage_bias.min(5);
        self.max_substitutions = self
            .max_substitutions
            .min(crate::r#match::discipline::MAX_SUBSTITUTIONS);
        self
    }
}
