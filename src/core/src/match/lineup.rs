use crate::club::player::{Player, PlayerPosition};
use crate::club::team::{Formation, FormationSlot, Team};
use crate::r#match::error::MatchError;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

pub const MAX_BENCH_SIZE: usize = 17;

/// One starting assignment: a player bound to a formation slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player_id: u32,
    pub position: PlayerPosition,
    pub x: f32,
    pub y: f32,
}

/// A full selection for one side: eleven starters plus the bench.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLineup {
    pub starting: Vec<LineupSlot>,
    #[serde(default)]
    pub bench: Vec<u32>,
}

/// Display form of a lineup, used in the opening stream frame and the
/// batch document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideLineupView {
    pub team_name: String,
    pub formation: String,
    pub starting: Vec<StartingPlayerView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingPlayerView {
    pub player_id: u32,
    pub name: String,
    pub position: PlayerPosition,
    pub shirt_number: u8,
}

impl SideLineupView {
    pub fn build(team: &Team, formation: &Formation, lineup: &MatchLineup) -> Self {
        let starting = lineup
            .starting
            .iter()
            .filter_map(|slot| {
                team.player(slot.player_id).map(|p| StartingPlayerView {
                    player_id: p.id,
                    name: p.name.clone(),
                    position: slot.position,
                    shirt_number: p.shirt_number,
                })
            })
            .collect();

        SideLineupView {
            team_name: team.name.clone(),
            formation: formation.name.clone(),
            starting,
        }
    }
}

/// Produces a starting XI and bench from a formation and squad, or
/// validates a submitted one. Deterministic given its inputs: ties break
/// on higher ability, then lower shirt number, then lower id.
pub struct LineupResolver;

impl LineupResolver {
    pub fn resolve(
        team: &Team,
        formation: &Formation,
        submitted: Option<&MatchLineup>,
        allow_auto_lineup: bool,
    ) -> Result<MatchLineup, MatchError> {
        formation.validate()?;

        if let Some(lineup) = submitted {
            Self::validate(team, lineup)?;
            return Ok(lineup.clone());
        }

        if !allow_auto_lineup {
            return Err(MatchError::Precondition(format!(
                "no lineup submitted for {} and auto selection is disabled",
                team.name
            )));
        }

        Self::auto_suggest(team, formation)
    }

    // ========== VALIDATION ==========

    fn validate(team: &Team, lineup: &MatchLineup) -> Result<(), MatchError> {
        if lineup.starting.len() != 11 {
            return Err(MatchError::InvalidLineup(format!(
                "must contain exactly 11 starters, got {}",
                lineup.starting.len()
            )));
        }

        let mut seen: HashSet<u32> = HashSet::new();
        for slot in &lineup.starting {
            if !seen.insert(slot.player_id) {
                return Err(MatchError::InvalidLineup(format!(
                    "player {} appears twice in the starting lineup",
                    slot.player_id
                )));
            }
        }

        let keepers = lineup
            .starting
            .iter()
            .filter(|s| s.position.is_goalkeeper())
            .count();
        if keepers != 1 {
            return Err(MatchError::InvalidLineup(
                "must contain exactly 1 GK".to_string(),
            ));
        }

        for id in lineup.starting.iter().map(|s| s.player_id).chain(lineup.bench.iter().copied()) {
            if team.player(id).is_none() {
                return Err(MatchError::InvalidLineup(format!(
                    "player {} does not belong to {}",
                    id, team.name
                )));
            }
        }

        if lineup.bench.len() > MAX_BENCH_SIZE {
            return Err(MatchError::InvalidLineup(format!(
                "bench holds {} players, maximum is {}",
                lineup.bench.len(),
                MAX_BENCH_SIZE
            )));
        }

        let mut bench_seen: HashSet<u32> = HashSet::new();
        for &id in &lineup.bench {
            if seen.contains(&id) {
                return Err(MatchError::InvalidLineup(format!(
                    "player {} appears in both the lineup and the bench",
                    id
                )));
            }
            if !bench_seen.insert(id) {
                return Err(MatchError::InvalidLineup(format!(
                    "player {} appears twice on the bench",
                    id
                )));
            }
        }

        Ok(())
    }

    // ========== AUTO SELECTION ==========

    fn auto_suggest(team: &Team, formation: &Formation) -> Result<MatchLineup, MatchError> {
        let eligible: Vec<&Player> = team.eligible_players().collect();
        if eligible.len() < 11 {
            return Err(MatchError::Precondition(format!(
                "{} has only {} eligible players",
                team.name,
                eligible.len()
            )));
        }

        // GK slot first, then from the back line forward
        let ordered_slots: Vec<&FormationSlot> = formation
            .slots
            .iter()
            .sorted_by(|a, b| {
                let gk_a = a.position.is_goalkeeper();
                let gk_b = b.position.is_goalkeeper();
                gk_b.cmp(&gk_a)
                    .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
                    .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
            })
            .collect();

        let mut starting: Vec<LineupSlot> = Vec::with_capacity(11);
        let mut used: HashSet<u32> = HashSet::new();

        for slot in ordered_slots {
            let pick = Self::best_for_slot(&eligible, &used, slot.position)
                .or_else(|| {
                    // No natural fit left: best remaining player covers the hole
                    let fallback = Self::best_remaining(&eligible, &used);
                    if let Some(p) = fallback {
                        warn!(
                            "{}: no compatible player for {}, falling back to {}",
                            team.name, slot.position, p.name
                        );
                    }
                    fallback
                });

            if let Some(player) = pick {
                used.insert(player.id);
                starting.push(LineupSlot {
                    player_id: player.id,
                    position: slot.position,
                    x: slot.x,
                    y: slot.y,
                });
            }
        }

        if starting.len() != 11 {
            return Err(MatchError::Precondition(format!(
                "could only fill {} of 11 slots for {}",
                starting.len(),
                team.name
            )));
        }

        let bench: Vec<u32> = eligible
            .iter()
            .filter(|p| !used.contains(&p.id))
            .sorted_by_key(|p| (Reverse(p.current_ability()), p.shirt_number, p.id))
            .take(MAX_BENCH_SIZE)
            .map(|p| p.id)
            .collect();

        debug!(
            "auto lineup for {}: 11 starters, {} on the bench",
            team.name,
            bench.len()
        );

        Ok(MatchLineup { starting, bench })
    }

    fn best_for_slot<'p>(
        eligible: &[&'p Player],
        used: &HashSet<u32>,
        slot: PlayerPosition,
    ) -> Option<&'p Player> {
        eligible
            .iter()
            .filter(|p| !used.contains(&p.id))
            .filter(|p| p.position_compatibility(slot) >= 0.7)
            .max_by_key(|p| (p.current_ability(), Reverse(p.shirt_number), Reverse(p.id)))
            .copied()
    }

    fn best_remaining<'p>(eligible: &[&'p Player], used: &HashSet<u32>) -> Option<&'p Player> {
        eligible
            .iter()
            .filter(|p| !used.contains(&p.id))
            .max_by_key(|p| (p.current_ability(), Reverse(p.shirt_number), Reverse(p.id)))
            .copied()
    }
}
