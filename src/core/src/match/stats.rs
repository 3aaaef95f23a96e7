use serde::{Deserialize, Serialize};

/// Cumulative per-side statistics. Every field only ever increases over the
/// course of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub possession_ticks: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u16,
    pub fouls: u16,
    pub passes_attempted: u16,
    pub passes_completed: u16,
    pub tackles: u16,
    pub interceptions: u16,
    pub offsides: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
}

impl TeamStats {
    /// True when every counter in `self` is at least as large as in `earlier`.
    pub fn includes(&self, earlier: &TeamStats) -> bool {
        self.possession_ticks >= earlier.possession_ticks
            && self.shots >= earlier.shots
            && self.shots_on_target >= earlier.shots_on_target
            && self.corners >= earlier.corners
            && self.fouls >= earlier.fouls
            && self.passes_attempted >= earlier.passes_attempted
            && self.passes_completed >= earlier.passes_completed
            && self.tackles >= earlier.tackles
            && self.interceptions >= earlier.interceptions
            && self.offsides >= earlier.offsides
            && self.yellow_cards >= earlier.yellow_cards
            && self.red_cards >= earlier.red_cards
    }
}

/// Anything the engine tracks once per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerSide<T> {
    pub fn get(&self, side: crate::r#match::events::TeamSide) -> &T {
        match side {
            crate::r#match::events::TeamSide::Home => &self.home,
            crate::r#match::events::TeamSide::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: crate::r#match::events::TeamSide) -> &mut T {
        match side {
            crate::r#match::events::TeamSide::Home => &mut self.home,
            crate::r#match::events::TeamSide::Away => &mut self.away,
        }
    }
}
